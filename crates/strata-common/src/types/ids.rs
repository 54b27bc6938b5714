//! Core identifier types for StrataDB.
//!
//! All identifiers are small, copyable newtypes. Using distinct types
//! instead of raw integers prevents mixing up identifiers (e.g. passing
//! a slot index where a page number is expected).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Table identifier - uniquely identifies a heap file.
///
/// Table IDs are derived from the canonical path of the backing file with
/// a 64-bit FNV-1a hash, so the same file yields the same ID across
/// process restarts without any global counter.
///
/// # Example
///
/// ```rust
/// use strata_common::types::TableId;
/// use std::path::Path;
///
/// let a = TableId::from_path(Path::new("/data/users.tbl"));
/// let b = TableId::from_path(Path::new("/data/users.tbl"));
/// assert_eq!(a, b);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(transparent)]
pub struct TableId(u64);

impl TableId {
    /// Creates a new `TableId` from a raw u64 value.
    #[inline]
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Derives a `TableId` from a file path.
    ///
    /// The caller is expected to canonicalize the path first; two
    /// spellings of the same file only map to the same ID once they are
    /// resolved to the same canonical form.
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
        const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

        let mut hash = FNV_OFFSET;
        for byte in path.to_string_lossy().as_bytes() {
            hash ^= u64::from(*byte);
            hash = hash.wrapping_mul(FNV_PRIME);
        }
        Self(hash)
    }

    /// Returns the raw u64 value.
    #[inline]
    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Debug for TableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TableId({:#x})", self.0)
    }
}

impl fmt::Display for TableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

impl From<u64> for TableId {
    #[inline]
    fn from(id: u64) -> Self {
        Self::new(id)
    }
}

impl From<TableId> for u64 {
    #[inline]
    fn from(id: TableId) -> Self {
        id.0
    }
}

/// Page identifier - names one page of one table.
///
/// A page is addressed by the table it belongs to and its zero-based
/// position within that table's file. Page `n` occupies the byte range
/// `[n * page_size, (n + 1) * page_size)` of the file.
///
/// # Example
///
/// ```rust
/// use strata_common::types::{PageId, TableId};
///
/// let page = PageId::new(TableId::new(7), 3);
/// assert_eq!(page.number(), 3);
/// assert_eq!(page.byte_offset(4096), 12288);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PageId {
    table: TableId,
    number: u32,
}

impl PageId {
    /// Creates a new `PageId` for the given table and page number.
    #[inline]
    #[must_use]
    pub const fn new(table: TableId, number: u32) -> Self {
        Self { table, number }
    }

    /// Returns the table this page belongs to.
    #[inline]
    #[must_use]
    pub const fn table(self) -> TableId {
        self.table
    }

    /// Returns the zero-based page number within the table's file.
    #[inline]
    #[must_use]
    pub const fn number(self) -> u32 {
        self.number
    }

    /// Returns the next page of the same table.
    #[inline]
    #[must_use]
    pub const fn next(self) -> Self {
        Self {
            table: self.table,
            number: self.number + 1,
        }
    }

    /// Returns the byte offset of this page in its backing file.
    #[inline]
    #[must_use]
    pub const fn byte_offset(self, page_size: usize) -> u64 {
        self.number as u64 * page_size as u64
    }
}

impl fmt::Debug for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PageId({:#x}.{})", self.table.as_u64(), self.number)
    }
}

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.table, self.number)
    }
}

/// Slot identifier - indexes one tuple slot within a page.
///
/// Slots are dense: a page with capacity `c` has slots `0..c`, each
/// either free or holding exactly one tuple.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(transparent)]
pub struct SlotId(u16);

impl SlotId {
    /// First slot of any page.
    pub const FIRST: Self = Self(0);

    /// Creates a new `SlotId` from a raw u16 value.
    #[inline]
    #[must_use]
    pub const fn new(slot: u16) -> Self {
        Self(slot)
    }

    /// Returns the raw u16 value.
    #[inline]
    #[must_use]
    pub const fn as_u16(self) -> u16 {
        self.0
    }

    /// Returns the slot as a usize index.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SlotId({})", self.0)
    }
}

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u16> for SlotId {
    #[inline]
    fn from(slot: u16) -> Self {
        Self::new(slot)
    }
}

impl From<SlotId> for u16 {
    #[inline]
    fn from(slot: SlotId) -> Self {
        slot.0
    }
}

/// Record identifier - the physical address of one tuple.
///
/// A record ID pins a tuple to a (page, slot) pair. It is assigned when
/// a tuple is read out of a page and is meaningless for tuples that have
/// not been stored yet.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RecordId {
    page: PageId,
    slot: SlotId,
}

impl RecordId {
    /// Creates a new `RecordId` for the given page and slot.
    #[inline]
    #[must_use]
    pub const fn new(page: PageId, slot: SlotId) -> Self {
        Self { page, slot }
    }

    /// Returns the page holding the tuple.
    #[inline]
    #[must_use]
    pub const fn page(self) -> PageId {
        self.page
    }

    /// Returns the slot holding the tuple.
    #[inline]
    #[must_use]
    pub const fn slot(self) -> SlotId {
        self.slot
    }
}

impl fmt::Debug for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RecordId({:?}, {:?})", self.page, self.slot)
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.page, self.slot)
    }
}

/// Transaction identifier - uniquely identifies a transaction.
///
/// The storage layer does not interpret transaction IDs; it threads them
/// through to the buffer manager, which may block or abort a transaction
/// while mediating page access.
///
/// # Example
///
/// ```rust
/// use strata_common::types::TransactionId;
///
/// let txn = TransactionId::new(1);
/// assert!(txn.is_valid());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(transparent)]
pub struct TransactionId(u64);

impl TransactionId {
    /// Invalid transaction ID, used as a sentinel value.
    pub const INVALID: Self = Self(0);

    /// First valid transaction ID.
    pub const FIRST: Self = Self(1);

    /// Creates a new `TransactionId` from a raw u64 value.
    #[inline]
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw u64 value.
    #[inline]
    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0
    }

    /// Returns the next transaction ID.
    #[inline]
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }

    /// Checks if this is a valid transaction ID.
    #[inline]
    #[must_use]
    pub const fn is_valid(self) -> bool {
        self.0 != Self::INVALID.0
    }
}

impl fmt::Debug for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if *self == Self::INVALID {
            write!(f, "TransactionId(INVALID)")
        } else {
            write!(f, "TransactionId({})", self.0)
        }
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for TransactionId {
    #[inline]
    fn from(id: u64) -> Self {
        Self::new(id)
    }
}

impl From<TransactionId> for u64 {
    #[inline]
    fn from(id: TransactionId) -> Self {
        id.0
    }
}
