//! Crate-wide error type.
//!
//! Each module raises its own error enum ([`SchemaError`],
//! [`TupleError`], [`PageError`], [`IoError`], [`BufferError`]);
//! [`StorageError`] aggregates them at the public API boundary and
//! classifies every failure into a coarse [`ErrorKind`] so callers can
//! branch on what went wrong without matching module internals.

use crate::buffer::BufferError;
use crate::file::IoError;
use crate::page::PageError;
use crate::schema::SchemaError;
use crate::tuple::TupleError;
use std::fmt;
use thiserror::Error;

/// Result alias for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Coarse classification of a [`StorageError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A field or slot index past the end of its range.
    OutOfRange,
    /// A named field, a registered table, or a page's backing bytes
    /// that do not exist.
    NotFound,
    /// Stored bytes that fail validation.
    Corruption,
    /// An operating system I/O failure.
    Io,
    /// The buffer manager aborted the transaction.
    TransactionAborted,
    /// An iterator call that violates the open/next protocol.
    IteratorMisuse,
    /// The buffer pool is full and cannot evict.
    PoolExhausted,
    /// An operation this layer does not implement.
    Unsupported,
    /// A request that is malformed regardless of storage state.
    InvalidArgument,
}

impl ErrorKind {
    /// Returns the kind's name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::OutOfRange => "out of range",
            Self::NotFound => "not found",
            Self::Corruption => "corruption",
            Self::Io => "io",
            Self::TransactionAborted => "transaction aborted",
            Self::IteratorMisuse => "iterator misuse",
            Self::PoolExhausted => "pool exhausted",
            Self::Unsupported => "unsupported",
            Self::InvalidArgument => "invalid argument",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Any failure the storage layer can report.
#[derive(Debug, Error)]
pub enum StorageError {
    // =========================================================================
    // Wrapped module errors
    // =========================================================================
    /// Descriptor construction or lookup failed.
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// Tuple construction, mutation, or decoding failed.
    #[error(transparent)]
    Tuple(#[from] TupleError),

    /// Page decoding or slot access failed.
    #[error(transparent)]
    Page(#[from] PageError),

    /// Heap file I/O failed.
    #[error(transparent)]
    Io(#[from] IoError),

    /// The buffer manager refused or failed a page fetch.
    #[error(transparent)]
    Buffer(#[from] BufferError),

    // =========================================================================
    // Errors raised at this level
    // =========================================================================
    /// An iterator method was called out of protocol.
    #[error("{operation} called on {state} iterator")]
    IteratorMisuse {
        /// The offending method.
        operation: &'static str,
        /// The iterator's state at the time.
        state: &'static str,
    },

    /// The operation is declared but not implemented by this layer.
    #[error("{operation} is not supported by this storage layer")]
    Unsupported {
        /// The unimplemented operation.
        operation: &'static str,
    },

    /// The request was malformed regardless of storage state.
    #[error("invalid argument: {message}")]
    InvalidArgument {
        /// What was wrong with the request.
        message: String,
    },
}

impl StorageError {
    /// Creates an `IteratorMisuse` error.
    #[must_use]
    pub const fn iterator_misuse(operation: &'static str, state: &'static str) -> Self {
        Self::IteratorMisuse { operation, state }
    }

    /// Creates an `Unsupported` error.
    #[must_use]
    pub const fn unsupported(operation: &'static str) -> Self {
        Self::Unsupported { operation }
    }

    /// Creates an `InvalidArgument` error.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Classifies this error.
    ///
    /// Wrapping never changes the classification: a transaction abort
    /// surfaced through a scan still reports
    /// [`ErrorKind::TransactionAborted`].
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Schema(err) => match err {
                SchemaError::IndexOutOfRange { .. } => ErrorKind::OutOfRange,
                SchemaError::FieldNotFound { .. } => ErrorKind::NotFound,
                SchemaError::Empty => ErrorKind::InvalidArgument,
            },
            Self::Tuple(err) => match err {
                TupleError::IndexOutOfRange { .. } => ErrorKind::OutOfRange,
                TupleError::InvalidEncoding { .. } => ErrorKind::Corruption,
                TupleError::TypeMismatch { .. } | TupleError::WrongArity { .. } => {
                    ErrorKind::InvalidArgument
                }
            },
            Self::Page(err) => match err {
                PageError::SlotOutOfRange { .. } => ErrorKind::OutOfRange,
                PageError::BufferSize { .. }
                | PageError::CorruptHeader { .. }
                | PageError::CorruptSlot { .. } => ErrorKind::Corruption,
                PageError::DescriptorMismatch { .. } | PageError::TupleTooLarge { .. } => {
                    ErrorKind::InvalidArgument
                }
            },
            Self::Io(err) => match err {
                IoError::PageNotFound { .. } => ErrorKind::NotFound,
                IoError::ShortRead { .. } | IoError::NotPageAligned { .. } => {
                    ErrorKind::Corruption
                }
                IoError::Io { .. } => ErrorKind::Io,
            },
            Self::Buffer(err) => Self::buffer_kind(err),
            Self::IteratorMisuse { .. } => ErrorKind::IteratorMisuse,
            Self::Unsupported { .. } => ErrorKind::Unsupported,
            Self::InvalidArgument { .. } => ErrorKind::InvalidArgument,
        }
    }

    fn buffer_kind(err: &BufferError) -> ErrorKind {
        match err {
            BufferError::TransactionAborted { .. } => ErrorKind::TransactionAborted,
            BufferError::UnknownTable { .. } => ErrorKind::NotFound,
            BufferError::PoolFull { .. } => ErrorKind::PoolExhausted,
            BufferError::Config { .. } => ErrorKind::InvalidArgument,
            BufferError::Storage(inner) => inner.kind(),
        }
    }
}
