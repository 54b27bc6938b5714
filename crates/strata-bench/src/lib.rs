//! StrataDB storage benchmarks.
//!
//! This crate contains benchmarks for the storage layer:
//! - Page encode/decode
//! - In-page tuple scans
//! - Full heap file scans through the buffer pool
//!
//! Run benchmarks with:
//! ```bash
//! cargo bench -p strata-bench
//! ```

pub mod utils;
