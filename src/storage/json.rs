//! JSON file-based key-value store.
//!
//! This module provides a simple, human-readable store implementation using JSON
//! serialization. It uses atomic file writes (write-to-temp + rename) to prevent
//! corruption on crashes.
//!
//! # Performance Characteristics
//!
//! - **Read**: O(1) - loads entire file into memory once
//! - **Write**: O(n) - serializes and writes the entire map
//! - **Best for**: a handful of keys, one write per user action

use crate::domain::error::{Result, WhosNextError};
use crate::storage::backend::KeyValueStore;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// On-disk container format.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoreData {
    /// Version of the container format (not of the values stored in it).
    version: u32,

    #[serde(default)]
    entries: BTreeMap<String, String>,
}

impl Default for StoreData {
    fn default() -> Self {
        Self {
            version: 1,
            entries: BTreeMap::new(),
        }
    }
}

/// JSON file key-value store.
///
/// The entire map is kept in memory and persisted on every modification. Values
/// are opaque strings; the session stores its record as a JSON string under a
/// single key.
///
/// # File Format
///
/// ```json
/// {
///   "version": 1,
///   "entries": {
///     "whosnext.anyone.appState.v1": "{\"schemaVersion\":1, ...}"
///   }
/// }
/// ```
///
/// An unreadable or unparsable file is treated as empty so that a damaged file
/// never prevents the tool from starting; it is overwritten on the next write.
pub struct JsonFileStore {
    /// Path to the JSON file on disk.
    file_path: PathBuf,

    /// In-memory data cache, loaded on creation.
    data: StoreData,

    /// Tracks if data has been modified since last save.
    dirty: bool,
}

impl JsonFileStore {
    /// Creates or opens a JSON file store.
    ///
    /// Parent directories are created automatically.
    ///
    /// # Errors
    ///
    /// Returns an error if the parent directory cannot be created.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use whosnext::storage::{JsonFileStore, KeyValueStore};
    /// use std::path::PathBuf;
    ///
    /// let store = JsonFileStore::open(PathBuf::from("/tmp/whosnext/store.json"))?;
    /// let raw = store.get("whosnext.anyone.appState.v1");
    /// # Ok::<(), whosnext::WhosNextError>(())
    /// ```
    pub fn open(file_path: PathBuf) -> Result<Self> {
        tracing::debug!(path = ?file_path, "opening JSON store");

        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let data = if file_path.exists() {
            Self::load_from_file(&file_path).unwrap_or_else(|e| {
                tracing::warn!(path = ?file_path, error = %e, "store file unreadable, starting empty");
                StoreData::default()
            })
        } else {
            tracing::debug!("initializing new empty store");
            StoreData::default()
        };

        tracing::debug!(entries = data.entries.len(), "store opened");

        Ok(Self {
            file_path,
            data,
            dirty: false,
        })
    }

    /// Returns the path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.file_path
    }

    fn load_from_file(path: &Path) -> Result<StoreData> {
        let contents = std::fs::read_to_string(path)?;
        let data: StoreData = serde_json::from_str(&contents)
            .map_err(|e| WhosNextError::Storage(format!("failed to parse JSON: {e}")))?;

        tracing::debug!(version = data.version, entries = data.entries.len(), "loaded store data");
        Ok(data)
    }

    /// Saves the map to disk using an atomic write.
    ///
    /// Writes to a temporary file first, then renames it over the target path so
    /// the file is never left half-written.
    fn save_to_file(&mut self) -> Result<()> {
        if !self.dirty {
            tracing::trace!("skipping save, no changes");
            return Ok(());
        }

        let json = serde_json::to_string_pretty(&self.data)
            .map_err(|e| WhosNextError::Storage(format!("failed to serialize JSON: {e}")))?;

        let tmp_path = self.file_path.with_extension("tmp");
        std::fs::write(&tmp_path, json)?;
        std::fs::rename(&tmp_path, &self.file_path)?;

        self.dirty = false;
        tracing::debug!(path = ?self.file_path, "store saved");
        Ok(())
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.data.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) -> Result<()> {
        let _span = tracing::debug_span!("json_store_set", key = %key, bytes = value.len()).entered();

        self.data.entries.insert(key.to_string(), value);
        self.dirty = true;
        self.save_to_file()
    }
}

impl Drop for JsonFileStore {
    fn drop(&mut self) {
        if self.dirty {
            tracing::debug!("saving dirty data on drop");
            if let Err(e) = self.save_to_file() {
                tracing::error!(error = %e, "failed to save on drop");
            }
        }
    }
}

impl std::fmt::Debug for JsonFileStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsonFileStore")
            .field("file_path", &self.file_path)
            .field("entries", &self.data.entries.len())
            .field("dirty", &self.dirty)
            .finish()
    }
}
