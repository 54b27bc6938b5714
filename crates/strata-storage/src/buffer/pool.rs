//! A page cache implementing [`BufferManager`].

use crate::buffer::{AccessMode, BufferError, BufferManager, BufferPoolStats, BufferResult};
use crate::file::HeapFile;
use crate::page::HeapPage;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use strata_common::config::BufferPoolConfig;
use strata_common::types::{PageId, TableId, TransactionId};
use tracing::debug;

/// Caches pages of registered heap files, reading through on misses.
///
/// The pool is the process-wide page cache: files are registered once,
/// then every scan fetches through [`fetch_page`](BufferManager::fetch_page)
/// and hits the cache for pages already in memory. Cached pages are
/// immutable and shared via `Arc`.
///
/// The pool holds at most `capacity_pages` pages and has no eviction
/// policy; a miss with the pool full fails with
/// [`BufferError::PoolFull`] rather than silently dropping someone
/// else's page. Tests and administrative tooling can make room with
/// [`evict_page`](BufferPool::evict_page).
pub struct BufferPool {
    config: BufferPoolConfig,
    pages: RwLock<HashMap<PageId, Arc<HeapPage>>>,
    files: RwLock<HashMap<TableId, Arc<HeapFile>>>,
    fetches: AtomicU64,
    hits: AtomicU64,
    misses: AtomicU64,
    evictions: AtomicU64,
}

impl BufferPool {
    /// Creates a pool with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::Config`] if the configuration fails
    /// validation.
    pub fn new(config: BufferPoolConfig) -> BufferResult<Self> {
        config.validate().map_err(BufferError::config)?;
        Ok(Self {
            config,
            pages: RwLock::new(HashMap::new()),
            files: RwLock::new(HashMap::new()),
            fetches: AtomicU64::new(0),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            evictions: AtomicU64::new(0),
        })
    }

    /// Creates a pool holding at most `capacity_pages` pages.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::Config`] if `capacity_pages` is zero.
    pub fn with_capacity(capacity_pages: usize) -> BufferResult<Self> {
        Self::new(BufferPoolConfig { capacity_pages })
    }

    /// Registers a heap file so its pages can be fetched. Replaces any
    /// previous registration for the same table.
    pub fn register_file(&self, file: Arc<HeapFile>) -> TableId {
        let table = file.id();
        self.files.write().insert(table, file);
        table
    }

    /// Returns the maximum number of pages the pool may cache.
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.config.capacity_pages
    }

    /// Returns whether `page_id` is currently cached.
    #[must_use]
    pub fn contains(&self, page_id: PageId) -> bool {
        self.pages.read().contains_key(&page_id)
    }

    /// Drops `page_id` from the cache, returning whether it was cached.
    /// The next fetch of the page reads it from disk again.
    pub fn evict_page(&self, page_id: PageId) -> bool {
        let evicted = self.pages.write().remove(&page_id).is_some();
        if evicted {
            self.evictions.fetch_add(1, Ordering::Relaxed);
            debug!("evicted page {} from buffer pool", page_id);
        }
        evicted
    }

    /// Returns a snapshot of the pool's counters.
    #[must_use]
    pub fn stats(&self) -> BufferPoolStats {
        BufferPoolStats {
            fetches: self.fetches.load(Ordering::Relaxed),
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            evictions: self.evictions.load(Ordering::Relaxed),
            cached_pages: self.pages.read().len(),
        }
    }

    // -------------------------------------------------------------------------
    // Private helpers
    // -------------------------------------------------------------------------

    /// Reads `page_id` through its registered file.
    fn load_page(&self, page_id: PageId) -> BufferResult<Arc<HeapPage>> {
        let file = self
            .files
            .read()
            .get(&page_id.table())
            .cloned()
            .ok_or(BufferError::UnknownTable {
                table: page_id.table(),
            })?;
        let page = file.read_page(page_id)?;
        Ok(Arc::new(page))
    }
}

impl BufferManager for BufferPool {
    /// Serves `page_id` from cache, reading it from its file on a miss.
    ///
    /// The transaction ID and access mode are accepted for interface
    /// compatibility: this pool never blocks or aborts transactions,
    /// and cached pages are immutable, so both modes share one copy.
    fn fetch_page(
        &self,
        _txn: TransactionId,
        page_id: PageId,
        _mode: AccessMode,
    ) -> BufferResult<Arc<HeapPage>> {
        self.fetches.fetch_add(1, Ordering::Relaxed);

        if let Some(page) = self.pages.read().get(&page_id) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            return Ok(Arc::clone(page));
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        let page = self.load_page(page_id)?;

        let mut pages = self.pages.write();
        // Another thread may have loaded the page while we read it.
        if let Some(existing) = pages.get(&page_id) {
            return Ok(Arc::clone(existing));
        }
        if pages.len() >= self.config.capacity_pages {
            return Err(BufferError::PoolFull {
                capacity: self.config.capacity_pages,
            });
        }
        pages.insert(page_id, Arc::clone(&page));
        debug!(
            "cached page {} ({}/{} pages)",
            page_id,
            pages.len(),
            self.config.capacity_pages
        );
        Ok(page)
    }
}

impl fmt::Debug for BufferPool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BufferPool")
            .field("capacity_pages", &self.config.capacity_pages)
            .field("cached_pages", &self.pages.read().len())
            .field("registered_files", &self.files.read().len())
            .finish()
    }
}
