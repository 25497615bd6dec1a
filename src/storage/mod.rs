//! Durable local storage for client-owned documents
//!
//! A document is a whole JSON string stored under a fixed key. Writes replace
//! the full document; there is no partial update and no schema version.

use std::sync::Arc;

use crate::config::StorageConfig;
use crate::errors::Result;

mod file;
mod memory;

pub use file::FileDocumentStore;
pub use memory::MemoryDocumentStore;

pub trait DocumentStore: Send + Sync {
    /// `Ok(None)` when nothing has been stored under `key` yet.
    fn read(&self, key: &str) -> Result<Option<String>>;

    /// Replace the whole document stored under `key`.
    fn write(&self, key: &str, value: &str) -> Result<()>;

    fn name(&self) -> &'static str;
}

pub struct StorageFactory;

impl StorageFactory {
    /// File-backed store rooted at `config.data_dir`.
    pub fn create(config: &StorageConfig) -> Arc<dyn DocumentStore> {
        Arc::new(FileDocumentStore::new(&config.data_dir))
    }
}
