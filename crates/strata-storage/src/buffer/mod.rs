//! Buffer management: cached, transaction-mediated page access.
//!
//! Scans reach pages through a [`BufferManager`] instead of reading
//! files directly:
//!
//! ```text
//!   HeapFileIterator          BufferManager            HeapFile
//!         |                        |                       |
//!         |  fetch_page(txn, id)   |                       |
//!         |----------------------->|    hit: cached Arc    |
//!         |                        |                       |
//!         |                        |  miss: read_page(id)  |
//!         |                        |---------------------->|
//!         |                        |<----------------------|
//!         |<-----------------------|                       |
//! ```
//!
//! [`BufferPool`] is the built-in implementation: a capacity-bounded
//! read-through cache keyed by [`PageId`](strata_common::types::PageId).
//! A locking or multi-version manager can implement the same trait and
//! slot under every scan unchanged.

mod error;
mod manager;
mod pool;

pub use error::{BufferError, BufferResult};
pub use manager::{AccessMode, BufferManager};
pub use pool::BufferPool;

/// Point-in-time counters of a [`BufferPool`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BufferPoolStats {
    /// Total `fetch_page` calls.
    pub fetches: u64,
    /// Fetches served from the cache.
    pub hits: u64,
    /// Fetches that read through to a file.
    pub misses: u64,
    /// Pages explicitly evicted.
    pub evictions: u64,
    /// Pages cached right now.
    pub cached_pages: usize,
}

impl BufferPoolStats {
    /// Returns the fraction of fetches served from the cache, zero if
    /// nothing has been fetched yet.
    #[must_use]
    pub fn hit_ratio(&self) -> f64 {
        if self.fetches == 0 {
            return 0.0;
        }
        self.hits as f64 / self.fetches as f64
    }
}
