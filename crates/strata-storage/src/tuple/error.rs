//! Tuple error types.

use crate::schema::FieldType;
use thiserror::Error;

/// Result alias for tuple operations.
pub type TupleResult<T> = Result<T, TupleError>;

/// Errors raised when building, mutating, or decoding tuples.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TupleError {
    /// Field index past the end of the tuple.
    #[error("field index {index} out of range for tuple with {num_fields} fields")]
    IndexOutOfRange {
        /// The requested index.
        index: usize,
        /// Number of fields in the tuple.
        num_fields: usize,
    },

    /// A value's type does not match the descriptor at its position.
    #[error("field {index} expects {expected}, got {actual}")]
    TypeMismatch {
        /// Position of the offending value.
        index: usize,
        /// Type the descriptor declares.
        expected: FieldType,
        /// Type of the supplied value.
        actual: FieldType,
    },

    /// The number of values does not match the descriptor.
    #[error("tuple has {actual} values but descriptor has {expected} fields")]
    WrongArity {
        /// Number of fields in the descriptor.
        expected: usize,
        /// Number of values supplied.
        actual: usize,
    },

    /// Stored bytes do not decode as a value of the declared type.
    #[error("malformed {field_type} encoding: {reason}")]
    InvalidEncoding {
        /// Type the bytes were decoded as.
        field_type: FieldType,
        /// What was wrong with the bytes.
        reason: String,
    },
}

impl TupleError {
    /// Creates an `InvalidEncoding` error.
    pub fn invalid_encoding(field_type: FieldType, reason: impl Into<String>) -> Self {
        Self::InvalidEncoding {
            field_type,
            reason: reason.into(),
        }
    }
}
