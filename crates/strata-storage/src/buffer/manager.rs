//! The page-access trait heap file scans go through.

use crate::buffer::BufferResult;
use crate::page::HeapPage;
use std::sync::Arc;
use strata_common::types::{PageId, TransactionId};

/// How a caller intends to use a fetched page.
///
/// The pool serves both modes from the same cache today; the mode
/// exists so a locking buffer manager can grant shared or exclusive
/// access without changing any call site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccessMode {
    /// Page will only be read.
    ReadOnly,
    /// Page may be modified.
    ReadWrite,
}

impl AccessMode {
    /// Returns whether this mode forbids modification.
    #[inline]
    #[must_use]
    pub const fn is_read_only(self) -> bool {
        matches!(self, Self::ReadOnly)
    }
}

/// Mediates every page access on behalf of a transaction.
///
/// Heap file scans never read pages from disk themselves; they ask
/// their buffer manager, which may serve a cached copy, read through
/// to the file, block the calling transaction, or abort it with
/// [`BufferError::TransactionAborted`](crate::buffer::BufferError::TransactionAborted).
///
/// Implementations must be shareable across threads; a scan holds one
/// `&dyn BufferManager` for its whole lifetime.
pub trait BufferManager: Send + Sync {
    /// Fetches one page for `txn`, in the given access mode.
    ///
    /// # Errors
    ///
    /// Implementations report unknown tables, exhausted capacity,
    /// aborted transactions, and underlying storage failures through
    /// [`BufferError`](crate::buffer::BufferError).
    fn fetch_page(
        &self,
        txn: TransactionId,
        page_id: PageId,
        mode: AccessMode,
    ) -> BufferResult<Arc<HeapPage>>;
}
