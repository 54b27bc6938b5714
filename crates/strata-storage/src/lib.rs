//! # strata-storage
//!
//! Heap file storage engine for StrataDB.
//!
//! Tables are stored as heap files: flat files of fixed-size pages,
//! each page holding fixed-size tuple slots behind an occupancy bitmap.
//! This crate provides:
//!
//! - **Schema**: [`TupleDescriptor`] field layouts with name lookup
//! - **Tuples**: typed rows with a validated fixed-width encoding
//! - **Pages**: [`HeapPage`], the unit of I/O and caching
//! - **Files**: [`HeapFile`] per-call synchronous page I/O and the
//!   [`HeapFileIterator`] scan protocol
//! - **Buffering**: the [`BufferManager`] trait and the [`BufferPool`]
//!   read-through cache every scan fetches pages from
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use strata_common::config::{BufferPoolConfig, StorageConfig};
//! use strata_common::types::TransactionId;
//! use strata_storage::buffer::BufferPool;
//! use strata_storage::file::HeapFile;
//! use strata_storage::schema::{FieldDef, FieldType, TupleDescriptor};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let descriptor = Arc::new(TupleDescriptor::new(vec![
//!         FieldDef::named(FieldType::Int, "id"),
//!         FieldDef::named(FieldType::Text, "name"),
//!     ])?);
//!
//!     let file = Arc::new(HeapFile::open(
//!         "users.tbl",
//!         descriptor,
//!         &StorageConfig::default(),
//!     )?);
//!     let pool = BufferPool::new(BufferPoolConfig::default())?;
//!     pool.register_file(Arc::clone(&file));
//!
//!     let mut scan = file.iterator(&pool, TransactionId::new(1));
//!     scan.open()?;
//!     while scan.has_next()? {
//!         println!("{}", scan.next()?);
//!     }
//!     scan.close();
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod buffer;
pub mod error;
pub mod file;
pub mod page;
pub mod schema;
pub mod tuple;

// Re-export the public surface at the crate root
pub use buffer::{AccessMode, BufferManager, BufferPool, BufferPoolStats};
pub use error::{ErrorKind, StorageError, StorageResult};
pub use file::{HeapFile, HeapFileIterator, IteratorState};
pub use page::HeapPage;
pub use schema::{DescriptorRef, FieldDef, FieldType, TupleDescriptor};
pub use tuple::{FieldValue, Tuple};
