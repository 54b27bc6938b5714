//! Heap files: one table's pages in one on-disk file.

use crate::buffer::BufferManager;
use crate::error::{StorageError, StorageResult};
use crate::file::{HeapFileIterator, IoError};
use crate::page::{HeapPage, PageError};
use crate::schema::DescriptorRef;
use crate::tuple::Tuple;
use std::fs::{self, File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use strata_common::config::StorageConfig;
use strata_common::types::{PageId, TableId, TransactionId};
use tracing::debug;

/// One heap file: a sequence of pages backing one table.
///
/// A `HeapFile` holds no open file handle and no cache. Every read and
/// write opens the file, seeks to the page's offset, transfers exactly
/// one page, and closes the handle again, so the file's length is the
/// single source of truth for how many pages exist. Calls block until
/// the transfer completes.
///
/// Page caching belongs to the [`BufferManager`]; scans obtain pages
/// through it (see [`iterator`](HeapFile::iterator)), never through
/// `read_page` directly.
#[derive(Debug)]
pub struct HeapFile {
    path: PathBuf,
    id: TableId,
    descriptor: DescriptorRef,
    page_size: usize,
}

impl HeapFile {
    /// Opens an existing heap file.
    ///
    /// The path is canonicalized and hashed into the file's [`TableId`],
    /// so the same file yields the same ID across restarts and across
    /// different spellings of its path.
    ///
    /// # Errors
    ///
    /// Returns [`PageError::TupleTooLarge`] if no tuple of this
    /// descriptor fits in a page, an I/O error if the file cannot be
    /// opened, or [`IoError::NotPageAligned`] if its length is not a
    /// whole number of pages.
    pub fn open(
        path: impl AsRef<Path>,
        descriptor: DescriptorRef,
        config: &StorageConfig,
    ) -> StorageResult<Self> {
        let page_size = config.page_size;
        let tuple_bytes = descriptor.byte_size();
        if HeapPage::capacity_for(page_size, tuple_bytes) == 0 {
            return Err(PageError::TupleTooLarge {
                tuple_bytes,
                page_size,
            }
            .into());
        }

        let path = fs::canonicalize(path.as_ref())
            .map_err(|source| IoError::io(path.as_ref(), source))?;
        let file = Self {
            id: TableId::from_path(&path),
            path,
            descriptor,
            page_size,
        };
        let num_pages = file.num_pages()?;
        debug!(
            "opened heap file {} with {} pages as table {}",
            file.path.display(),
            num_pages,
            file.id
        );
        Ok(file)
    }

    /// Creates a new, empty heap file and opens it.
    ///
    /// # Errors
    ///
    /// Fails with an I/O error if the file already exists or cannot be
    /// created, and otherwise like [`open`](HeapFile::open).
    pub fn create(
        path: impl AsRef<Path>,
        descriptor: DescriptorRef,
        config: &StorageConfig,
    ) -> StorageResult<Self> {
        OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(path.as_ref())
            .map_err(|source| IoError::io(path.as_ref(), source))?;
        Self::open(path, descriptor, config)
    }

    /// Returns the table ID derived from this file's canonical path.
    #[inline]
    #[must_use]
    pub const fn id(&self) -> TableId {
        self.id
    }

    /// Returns the canonical path of the backing file.
    #[inline]
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the descriptor shared by every tuple in this file.
    #[inline]
    #[must_use]
    pub fn descriptor(&self) -> &DescriptorRef {
        &self.descriptor
    }

    /// Returns the page size this file was opened with.
    #[inline]
    #[must_use]
    pub const fn page_size(&self) -> usize {
        self.page_size
    }

    /// Returns the current number of pages, computed from the file
    /// length on every call so concurrent appends are observed.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file cannot be inspected, or
    /// [`IoError::NotPageAligned`] if its length is not a whole number
    /// of pages.
    pub fn num_pages(&self) -> StorageResult<usize> {
        let file_len = fs::metadata(&self.path)
            .map_err(|source| IoError::io(&self.path, source))?
            .len();
        if file_len % self.page_size as u64 != 0 {
            return Err(IoError::NotPageAligned {
                path: self.path.clone(),
                file_len,
                page_size: self.page_size,
            }
            .into());
        }
        Ok((file_len / self.page_size as u64) as usize)
    }

    /// Reads and decodes one page from disk.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::InvalidArgument`] if the page belongs to
    /// another table, [`IoError::PageNotFound`] if it is past the end
    /// of the file, [`IoError::ShortRead`] if the file ends mid-page,
    /// or a [`PageError`] if the bytes fail validation.
    pub fn read_page(&self, page_id: PageId) -> StorageResult<HeapPage> {
        self.check_table(page_id)?;
        let num_pages = self.num_pages()?;
        if page_id.number() as usize >= num_pages {
            return Err(IoError::PageNotFound { page_id, num_pages }.into());
        }

        let offset = page_id.byte_offset(self.page_size);
        let mut file = File::open(&self.path).map_err(|source| IoError::io(&self.path, source))?;
        file.seek(SeekFrom::Start(offset))
            .map_err(|source| IoError::io(&self.path, source))?;

        let mut buf = vec![0u8; self.page_size];
        file.read_exact(&mut buf).map_err(|source| {
            if source.kind() == std::io::ErrorKind::UnexpectedEof {
                IoError::ShortRead {
                    page_id,
                    offset,
                    expected: self.page_size,
                }
            } else {
                IoError::io(&self.path, source)
            }
        })?;

        Ok(HeapPage::decode(
            page_id,
            DescriptorRef::clone(&self.descriptor),
            self.page_size,
            buf,
        )?)
    }

    /// Writes one page at its offset, extending the file if the page
    /// lies at or past the current end.
    ///
    /// Writing more than one page past the end leaves zero-filled gaps,
    /// which read back as valid empty pages.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::InvalidArgument`] if the page belongs to
    /// another table or was built for a different page size, or an I/O
    /// error if the write fails.
    pub fn write_page(&self, page: &HeapPage) -> StorageResult<()> {
        self.check_table(page.id())?;
        if page.page_size() != self.page_size {
            return Err(StorageError::invalid_argument(format!(
                "page {} is {} bytes, file uses {} byte pages",
                page.id(),
                page.page_size(),
                self.page_size
            )));
        }
        let num_pages = self.num_pages()?;

        let offset = page.id().byte_offset(self.page_size);
        let mut file = OpenOptions::new()
            .write(true)
            .open(&self.path)
            .map_err(|source| IoError::io(&self.path, source))?;
        file.seek(SeekFrom::Start(offset))
            .map_err(|source| IoError::io(&self.path, source))?;
        file.write_all(page.encode())
            .map_err(|source| IoError::io(&self.path, source))?;

        if page.id().number() as usize >= num_pages {
            debug!(
                "extended heap file {} to {} pages",
                self.path.display(),
                page.id().number() as usize + 1
            );
        }
        Ok(())
    }

    /// Returns a scan over every tuple in the file, fetching pages
    /// through `buffer` on behalf of `txn`.
    ///
    /// The iterator starts closed; call
    /// [`open`](HeapFileIterator::open) before using it.
    #[must_use]
    pub fn iterator<'a>(
        &'a self,
        buffer: &'a dyn BufferManager,
        txn: TransactionId,
    ) -> HeapFileIterator<'a> {
        HeapFileIterator::new(self, buffer, txn)
    }

    /// Inserts a tuple into the first page with a free slot.
    ///
    /// # Errors
    ///
    /// Not yet implemented; always returns
    /// [`StorageError::Unsupported`].
    pub fn insert_tuple(
        &self,
        _txn: TransactionId,
        _tuple: &Tuple,
    ) -> StorageResult<Vec<PageId>> {
        Err(StorageError::unsupported("insert_tuple"))
    }

    /// Deletes a tuple by its record ID.
    ///
    /// # Errors
    ///
    /// Not yet implemented; always returns
    /// [`StorageError::Unsupported`].
    pub fn delete_tuple(&self, _txn: TransactionId, _tuple: &Tuple) -> StorageResult<PageId> {
        Err(StorageError::unsupported("delete_tuple"))
    }

    fn check_table(&self, page_id: PageId) -> StorageResult<()> {
        if page_id.table() != self.id {
            return Err(StorageError::invalid_argument(format!(
                "page {page_id} does not belong to table {}",
                self.id
            )));
        }
        Ok(())
    }
}
