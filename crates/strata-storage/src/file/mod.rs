//! Heap files and scans over them.
//!
//! Each table is one file of back-to-back pages:
//!
//! ```text
//! users.tbl
//! +-----------+-----------+-----------+----
//! |  page 0   |  page 1   |  page 2   | ...
//! +-----------+-----------+-----------+----
//! 0        4096        8192       12288
//! ```
//!
//! Page `n` lives at byte offset `n * page_size`, and the file length
//! is always a whole number of pages; anything else is reported as
//! corruption rather than rounded over.
//!
//! I/O is synchronous and unbuffered at this layer. [`HeapFile`] opens
//! a fresh handle per call and transfers exactly one page; all caching
//! happens above it, in the buffer manager.

mod error;
mod heap_file;
mod iterator;

pub use error::{IoError, IoResult};
pub use heap_file::HeapFile;
pub use iterator::{HeapFileIterator, IteratorState};
