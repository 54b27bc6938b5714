//! Configuration structures for StrataDB.
//!
//! Configuration is loaded once at startup and handed to components by
//! reference. Every structure has a sensible `Default` and a `validate`
//! method that reports the first problem found.

use crate::constants::{DEFAULT_BUFFER_POOL_PAGES, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE, MIN_PAGE_SIZE};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Top-level database configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Directory holding table files.
    ///
    /// Default: `./data`
    pub data_dir: PathBuf,

    /// Storage engine configuration.
    pub storage: StorageConfig,

    /// Buffer pool configuration.
    pub buffer_pool: BufferPoolConfig,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./data"),
            storage: StorageConfig::default(),
            buffer_pool: BufferPoolConfig::default(),
        }
    }
}

impl DatabaseConfig {
    /// Creates a configuration with a custom data directory.
    #[must_use]
    pub fn with_data_dir(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            ..Self::default()
        }
    }

    /// Creates a configuration suitable for tests: a small buffer pool
    /// and a data directory under the system temp dir.
    #[must_use]
    pub fn for_testing() -> Self {
        Self {
            data_dir: std::env::temp_dir().join("strata-test"),
            storage: StorageConfig::default(),
            buffer_pool: BufferPoolConfig { capacity_pages: 64 },
        }
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns a description of the first invalid setting found.
    pub fn validate(&self) -> Result<(), String> {
        self.storage.validate()?;
        self.buffer_pool.validate()?;
        Ok(())
    }
}

/// Storage engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Page size in bytes. Must be a power of two.
    ///
    /// Default: 4096
    pub page_size: usize,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl StorageConfig {
    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns a description of the first invalid setting found.
    pub fn validate(&self) -> Result<(), String> {
        if !self.page_size.is_power_of_two() {
            return Err(format!("page_size must be a power of two, got {}", self.page_size));
        }
        if self.page_size < MIN_PAGE_SIZE {
            return Err(format!(
                "page_size must be at least {MIN_PAGE_SIZE} bytes, got {}",
                self.page_size
            ));
        }
        if self.page_size > MAX_PAGE_SIZE {
            return Err(format!(
                "page_size must be at most {MAX_PAGE_SIZE} bytes, got {}",
                self.page_size
            ));
        }
        Ok(())
    }
}

/// Buffer pool configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BufferPoolConfig {
    /// Maximum number of pages the pool may cache at once.
    ///
    /// Default: 2048
    pub capacity_pages: usize,
}

impl Default for BufferPoolConfig {
    fn default() -> Self {
        Self {
            capacity_pages: DEFAULT_BUFFER_POOL_PAGES,
        }
    }
}

impl BufferPoolConfig {
    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns a description of the first invalid setting found.
    pub fn validate(&self) -> Result<(), String> {
        if self.capacity_pages == 0 {
            return Err("capacity_pages must be at least 1".to_string());
        }
        Ok(())
    }
}
