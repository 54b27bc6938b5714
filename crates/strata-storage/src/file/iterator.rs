//! Stateful tuple scan over a heap file.

use crate::buffer::{AccessMode, BufferManager};
use crate::error::{StorageError, StorageResult};
use crate::file::HeapFile;
use crate::page::HeapPage;
use crate::tuple::Tuple;
use std::fmt;
use std::sync::Arc;
use strata_common::types::{PageId, SlotId, TransactionId};

/// Lifecycle state of a [`HeapFileIterator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IteratorState {
    /// Not opened yet, or closed. Only `open` and `close` are legal.
    Closed,
    /// Mid-scan; `has_next`, `next`, `rewind`, and `close` are legal.
    Open,
    /// Scan ran off the end of the file. `has_next` answers `false`
    /// until `rewind` starts a fresh pass.
    Exhausted,
}

impl IteratorState {
    /// Returns the state's lower-case name, used in error messages.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Closed => "closed",
            Self::Open => "open",
            Self::Exhausted => "exhausted",
        }
    }
}

impl fmt::Display for IteratorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Scans a heap file tuple by tuple, in page order and slot order
/// within each page.
///
/// Pages are fetched through the [`BufferManager`] the iterator was
/// created with, one `fetch_page` call per page per pass, so a second
/// pass over a cached file does not touch disk. Free slots are skipped.
///
/// The iterator follows an explicit protocol:
///
/// - it starts [`Closed`](IteratorState::Closed) and reads nothing
///   until [`open`](Self::open) is called;
/// - each [`next`](Self::next) must be preceded by a
///   [`has_next`](Self::has_next) that answered `true`;
/// - [`rewind`](Self::rewind) restarts the scan from the first page;
/// - [`close`](Self::close) releases the current page and is idempotent.
///
/// Anything else fails with [`StorageError::IteratorMisuse`]. Errors
/// from the buffer manager, including transaction aborts, propagate
/// unchanged.
pub struct HeapFileIterator<'a> {
    file: &'a HeapFile,
    buffer: &'a dyn BufferManager,
    txn: TransactionId,
    state: IteratorState,
    next_page: u32,
    cursor: Option<PageCursor>,
    pending: Option<Tuple>,
}

/// Position within the page currently being scanned.
struct PageCursor {
    page: Arc<HeapPage>,
    next_slot: usize,
}

impl<'a> HeapFileIterator<'a> {
    pub(crate) fn new(
        file: &'a HeapFile,
        buffer: &'a dyn BufferManager,
        txn: TransactionId,
    ) -> Self {
        Self {
            file,
            buffer,
            txn,
            state: IteratorState::Closed,
            next_page: 0,
            cursor: None,
            pending: None,
        }
    }

    /// Returns the iterator's current lifecycle state.
    #[inline]
    #[must_use]
    pub const fn state(&self) -> IteratorState {
        self.state
    }

    /// Starts a scan from the first page.
    ///
    /// Opening is lazy: no page is fetched until the first `has_next`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::IteratorMisuse`] if the iterator is
    /// already open.
    pub fn open(&mut self) -> StorageResult<()> {
        if self.state != IteratorState::Closed {
            return Err(StorageError::iterator_misuse("open", self.state.as_str()));
        }
        self.state = IteratorState::Open;
        self.next_page = 0;
        Ok(())
    }

    /// Reports whether another tuple is available, advancing to the
    /// next occupied slot (and fetching pages as needed) to find out.
    ///
    /// The found tuple is held back for the following [`next`](Self::next);
    /// asking again without consuming it is cheap and fetches nothing.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::IteratorMisuse`] on a closed iterator,
    /// and propagates buffer manager and I/O failures.
    pub fn has_next(&mut self) -> StorageResult<bool> {
        match self.state {
            IteratorState::Closed => {
                Err(StorageError::iterator_misuse("has_next", self.state.as_str()))
            }
            IteratorState::Exhausted => Ok(false),
            IteratorState::Open => {
                if self.pending.is_some() {
                    return Ok(true);
                }
                self.advance()
            }
        }
    }

    /// Returns the tuple the last `has_next` found.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::IteratorMisuse`] if the iterator is
    /// closed, exhausted, or `has_next` was not called (or answered
    /// `false`) since the last `next`.
    pub fn next(&mut self) -> StorageResult<Tuple> {
        if self.state == IteratorState::Closed {
            return Err(StorageError::iterator_misuse("next", self.state.as_str()));
        }
        self.pending
            .take()
            .ok_or_else(|| StorageError::iterator_misuse("next", self.state.as_str()))
    }

    /// Restarts the scan from the first page. The next `has_next`
    /// fetches page 0 again through the buffer manager.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::IteratorMisuse`] if the iterator is
    /// closed.
    pub fn rewind(&mut self) -> StorageResult<()> {
        if self.state == IteratorState::Closed {
            return Err(StorageError::iterator_misuse("rewind", self.state.as_str()));
        }
        self.state = IteratorState::Open;
        self.next_page = 0;
        self.cursor = None;
        self.pending = None;
        Ok(())
    }

    /// Closes the iterator, dropping its page reference. Idempotent;
    /// a closed iterator can be reopened with [`open`](Self::open).
    pub fn close(&mut self) {
        self.state = IteratorState::Closed;
        self.next_page = 0;
        self.cursor = None;
        self.pending = None;
    }

    /// Walks forward to the next occupied slot, buffering its tuple.
    /// Moves to `Exhausted` when the file runs out of pages.
    fn advance(&mut self) -> StorageResult<bool> {
        loop {
            if let Some(tuple) = self.next_in_current_page()? {
                self.pending = Some(tuple);
                return Ok(true);
            }
            self.cursor = None;

            let num_pages = self.file.num_pages()?;
            if self.next_page as usize >= num_pages {
                self.state = IteratorState::Exhausted;
                return Ok(false);
            }
            let page_id = PageId::new(self.file.id(), self.next_page);
            let page = self
                .buffer
                .fetch_page(self.txn, page_id, AccessMode::ReadOnly)?;
            self.next_page += 1;
            self.cursor = Some(PageCursor { page, next_slot: 0 });
        }
    }

    fn next_in_current_page(&mut self) -> StorageResult<Option<Tuple>> {
        let Some(cursor) = self.cursor.as_mut() else {
            return Ok(None);
        };
        while cursor.next_slot < cursor.page.slot_capacity() {
            let slot = SlotId::new(cursor.next_slot as u16);
            cursor.next_slot += 1;
            if let Some(tuple) = cursor.page.tuple(slot)? {
                return Ok(Some(tuple));
            }
        }
        Ok(None)
    }
}

impl fmt::Debug for HeapFileIterator<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HeapFileIterator")
            .field("table", &self.file.id())
            .field("txn", &self.txn)
            .field("state", &self.state)
            .field("next_page", &self.next_page)
            .finish()
    }
}
