//! Storage backend abstraction.
//!
//! This module defines the [`KeyValueStore`] trait that abstracts over the place a
//! session is persisted. The session only ever needs a flat string-to-string map
//! with one well-known key, so the trait is exactly that and nothing more.

use crate::domain::error::Result;

/// Abstraction over a persistent string key-value store.
///
/// Reads never fail: a backend that cannot produce a value reports it as absent,
/// which the session treats the same as "nothing stored yet". Writes can fail
/// and must surface the failure.
///
/// # Implementations
///
/// - [`JsonFileStore`](crate::storage::JsonFileStore): JSON file with atomic writes (default)
/// - [`MemoryStore`](crate::storage::MemoryStore): in-process map for tests and embedding
pub trait KeyValueStore {
    /// Returns the value stored under `key`, if any.
    fn get(&self, key: &str) -> Option<String>;

    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the value cannot be persisted.
    fn set(&mut self, key: &str, value: String) -> Result<()>;
}
