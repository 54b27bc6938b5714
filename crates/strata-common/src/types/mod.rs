//! Type definitions for StrataDB.
//!
//! This module contains the core identifier types used across the database.

mod ids;

pub use ids::{PageId, RecordId, SlotId, TableId, TransactionId};
