//! Page error types.

use crate::tuple::TupleError;
use strata_common::types::{PageId, SlotId};
use thiserror::Error;

/// Result alias for page operations.
pub type PageResult<T> = Result<T, PageError>;

/// Errors raised when decoding or mutating heap pages.
#[derive(Debug, Error)]
pub enum PageError {
    /// Page buffer is not exactly one page long.
    #[error("page buffer is {actual} bytes, expected {expected}")]
    BufferSize {
        /// Configured page size.
        expected: usize,
        /// Bytes actually supplied.
        actual: usize,
    },

    /// Slot index past the page's slot capacity.
    #[error("slot {slot} out of range for page {page_id} with {capacity} slots")]
    SlotOutOfRange {
        /// Page being addressed.
        page_id: PageId,
        /// The requested slot.
        slot: SlotId,
        /// Slots the page actually has.
        capacity: usize,
    },

    /// Tuple layout does not match the page's descriptor.
    #[error("tuple descriptor mismatch on page {page_id}")]
    DescriptorMismatch {
        /// Page being written.
        page_id: PageId,
    },

    /// Not even one tuple of this layout fits in a page.
    #[error("{tuple_bytes} byte tuples do not fit in {page_size} byte pages")]
    TupleTooLarge {
        /// Encoded tuple width.
        tuple_bytes: usize,
        /// Configured page size.
        page_size: usize,
    },

    /// Occupancy header failed validation.
    #[error("corrupt header on page {page_id}: {reason}")]
    CorruptHeader {
        /// Page that failed to decode.
        page_id: PageId,
        /// What was wrong with the header.
        reason: String,
    },

    /// An occupied slot failed to decode as a tuple.
    #[error("corrupt tuple in page {page_id} slot {slot}")]
    CorruptSlot {
        /// Page that failed to decode.
        page_id: PageId,
        /// Slot holding the bad bytes.
        slot: SlotId,
        /// The underlying decode failure.
        #[source]
        source: TupleError,
    },
}

impl PageError {
    /// Creates a `CorruptHeader` error.
    pub fn corrupt_header(page_id: PageId, reason: impl Into<String>) -> Self {
        Self::CorruptHeader {
            page_id,
            reason: reason.into(),
        }
    }

    /// Whether this error indicates on-disk corruption rather than a
    /// caller mistake.
    #[must_use]
    pub const fn is_corruption(&self) -> bool {
        matches!(
            self,
            Self::BufferSize { .. } | Self::CorruptHeader { .. } | Self::CorruptSlot { .. }
        )
    }
}
