//! Buffer manager error types.

use crate::error::StorageError;
use strata_common::types::{TableId, TransactionId};
use thiserror::Error;

/// Result alias for buffer operations.
pub type BufferResult<T> = Result<T, BufferError>;

/// Errors raised while mediating page access.
#[derive(Debug, Error)]
#[allow(missing_docs)] // Fields are documented by the variant docs.
pub enum BufferError {
    /// The buffer manager aborted the transaction instead of granting
    /// the page, e.g. on a lock timeout or deadlock victim choice.
    #[error("transaction {txn} aborted: {reason}")]
    TransactionAborted { txn: TransactionId, reason: String },

    /// No heap file is registered for the page's table.
    #[error("no file registered for table {table}")]
    UnknownTable { table: TableId },

    /// Every frame is occupied and nothing can be evicted.
    #[error("buffer pool full: {capacity} pages cached")]
    PoolFull { capacity: usize },

    /// Pool configuration failed validation.
    #[error("invalid buffer pool config: {message}")]
    Config { message: String },

    /// The storage layer failed while loading a page on a cache miss.
    #[error(transparent)]
    Storage(Box<StorageError>),
}

impl BufferError {
    /// Creates a `TransactionAborted` error.
    pub fn transaction_aborted(txn: TransactionId, reason: impl Into<String>) -> Self {
        Self::TransactionAborted {
            txn,
            reason: reason.into(),
        }
    }

    /// Creates a `Config` error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Whether retrying the operation (possibly in a fresh transaction)
    /// can succeed without operator intervention.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::PoolFull { .. } | Self::TransactionAborted { .. }
        )
    }
}

impl From<StorageError> for BufferError {
    fn from(source: StorageError) -> Self {
        Self::Storage(Box::new(source))
    }
}
