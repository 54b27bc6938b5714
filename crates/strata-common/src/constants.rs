//! System-wide constants for StrataDB.
//!
//! This module defines constants used across the database.

// =============================================================================
// Page Constants
// =============================================================================

/// Default page size in bytes (4 KB).
///
/// Matches the typical OS page size, so a heap page maps onto a whole
/// number of filesystem blocks.
pub const DEFAULT_PAGE_SIZE: usize = 4 * 1024;

/// Minimum page size in bytes (512 B).
pub const MIN_PAGE_SIZE: usize = 512;

/// Maximum page size in bytes (64 KB).
///
/// Bounded so a slot index always fits in a `u16`: even with the
/// narrowest 4-byte tuple, a 64 KB page holds fewer than 2^16 slots.
pub const MAX_PAGE_SIZE: usize = 64 * 1024;

// =============================================================================
// Field Encoding Constants
// =============================================================================

/// Encoded width of an integer field in bytes.
pub const INT_FIELD_BYTES: usize = 4;

/// Maximum content bytes of a text field.
///
/// Longer strings are truncated when the value is constructed, so every
/// text field fits its fixed slot region.
pub const TEXT_FIELD_BYTES: usize = 128;

/// Width of the length prefix stored before text field content.
pub const TEXT_LENGTH_PREFIX_BYTES: usize = 4;

/// Encoded width of a text field in bytes: length prefix plus content.
pub const TEXT_FIELD_ENCODED_BYTES: usize = TEXT_LENGTH_PREFIX_BYTES + TEXT_FIELD_BYTES;

// =============================================================================
// Buffer Pool Constants
// =============================================================================

/// Default buffer pool capacity in pages (2048 pages = 8 MB at the
/// default page size).
pub const DEFAULT_BUFFER_POOL_PAGES: usize = 2048;
