//! # strata-common
//!
//! Common types, configuration, and constants for StrataDB.
//!
//! This crate provides the foundational types shared by all StrataDB
//! components. It includes:
//!
//! - **Types**: Core identifiers (`TableId`, `PageId`, `SlotId`, `RecordId`,
//!   `TransactionId`)
//! - **Config**: Database configuration structures
//! - **Constants**: System-wide constants and limits
//!
//! ## Example
//!
//! ```rust
//! use strata_common::types::{PageId, SlotId, TableId, TransactionId};
//!
//! let table = TableId::new(7);
//! let page = PageId::new(table, 3);
//! let slot = SlotId::new(12);
//! let txn = TransactionId::new(1);
//!
//! assert_eq!(page.byte_offset(4096), 3 * 4096);
//! assert!(txn.is_valid());
//! # let _ = slot;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod constants;
pub mod types;

// Re-export commonly used items at the crate root
pub use config::{BufferPoolConfig, DatabaseConfig, StorageConfig};
pub use constants::*;
pub use types::{PageId, RecordId, SlotId, TableId, TransactionId};
