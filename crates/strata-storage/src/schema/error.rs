//! Schema error types.

use thiserror::Error;

/// Result alias for schema operations.
pub type SchemaResult<T> = Result<T, SchemaError>;

/// Errors raised when building or querying a tuple descriptor.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// Field index past the end of the descriptor.
    #[error("field index {index} out of range for descriptor with {num_fields} fields")]
    IndexOutOfRange {
        /// The requested index.
        index: usize,
        /// Number of fields in the descriptor.
        num_fields: usize,
    },

    /// No field carries the requested name.
    #[error("no field named '{name}'")]
    FieldNotFound {
        /// The requested name.
        name: String,
    },

    /// A descriptor must describe at least one field.
    #[error("tuple descriptor must have at least one field")]
    Empty,
}

impl SchemaError {
    /// Creates an `IndexOutOfRange` error.
    #[must_use]
    pub const fn index_out_of_range(index: usize, num_fields: usize) -> Self {
        Self::IndexOutOfRange { index, num_fields }
    }

    /// Creates a `FieldNotFound` error.
    pub fn field_not_found(name: impl Into<String>) -> Self {
        Self::FieldNotFound { name: name.into() }
    }
}
