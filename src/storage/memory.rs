use std::collections::HashMap;

use parking_lot::Mutex;

use super::DocumentStore;
use crate::errors::Result;

/// Process-local store, used when no durable location is wanted.
#[derive(Default)]
pub struct MemoryDocumentStore {
    docs: Mutex<HashMap<String, String>>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DocumentStore for MemoryDocumentStore {
    fn read(&self, key: &str) -> Result<Option<String>> {
        Ok(self.docs.lock().get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        self.docs.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}
