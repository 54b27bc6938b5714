//! File I/O error types.

use std::path::PathBuf;
use strata_common::types::PageId;
use thiserror::Error;

/// Result alias for file operations.
pub type IoResult<T> = Result<T, IoError>;

/// Errors raised by heap file I/O.
#[derive(Debug, Error)]
pub enum IoError {
    /// Operating system I/O failure, with the file it happened on.
    #[error("i/o failure on {}: {source}", path.display())]
    Io {
        /// File being accessed.
        path: PathBuf,
        /// The underlying failure.
        #[source]
        source: std::io::Error,
    },

    /// Read of a page past the end of the file.
    #[error("page {page_id} not found: file has {num_pages} pages")]
    PageNotFound {
        /// The requested page.
        page_id: PageId,
        /// Pages the file actually has.
        num_pages: usize,
    },

    /// The file ended in the middle of a page.
    #[error("short read on page {page_id}: wanted {expected} bytes at offset {offset}")]
    ShortRead {
        /// The page being read.
        page_id: PageId,
        /// Byte offset the read started at.
        offset: u64,
        /// Bytes the read needed.
        expected: usize,
    },

    /// File length is not a whole number of pages.
    #[error("{} is {file_len} bytes, not a multiple of the {page_size} byte page size", path.display())]
    NotPageAligned {
        /// The offending file.
        path: PathBuf,
        /// Its length in bytes.
        file_len: u64,
        /// Configured page size.
        page_size: usize,
    },
}

impl IoError {
    /// Wraps an OS error with the path it occurred on.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Whether this error indicates a damaged file rather than a bad
    /// request or an environmental failure.
    #[must_use]
    pub const fn is_corruption(&self) -> bool {
        matches!(self, Self::ShortRead { .. } | Self::NotPageAligned { .. })
    }
}
