//! In-memory key-value store.

use crate::domain::error::Result;
use crate::storage::backend::KeyValueStore;
use std::collections::BTreeMap;

/// Key-value store that lives only as long as the process.
///
/// Useful for headless embedding and for tests that need to inspect or tamper
/// with the raw stored value.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) -> Result<()> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }
}
