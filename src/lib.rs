//! Whosnext: a terminal random-drawing tool.
//!
//! Whosnext keeps one persistent drawing session:
//! - Import a names list, one name per line
//! - Draw a chosen number of names uniformly at random, without replacement
//! - Track the full draw history until the pool is exhausted
//! - Reset the lottery (keeping the names) or initialize everything
//! - Resume exactly where it left off after a restart

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! The crate follows a layered architecture pattern:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Terminal Front End (main.rs)                       │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← State machine
//! │  - Intent handling                                  │  ← Session logic
//! │  - Action dispatching                               │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!                 │                         │
//!         ┌───────────────┐         ┌───────────────┐
//!         │ UI Layer      │         │ Storage Layer │
//!         │ (ui/)         │         │ (storage/)    │
//!         │ - Rendering   │         │ - JSON I/O    │
//!         │ - Theming     │         │ - In-memory   │
//!         │ - Components  │         │ - Backend API │
//!         └───────────────┘         └───────────────┘
//!                 │                         │
//! ┌─────────────────────────────────────────────────────┐
//! │  Infrastructure & Domain Layers                     │
//! │  - Data directory (infrastructure/)                 │
//! │  - Error types (domain/error)                       │
//! │  - Entrants, roster parsing, draw engine (domain/)  │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │
//! │  - tracing-subscriber fmt layer                     │
//! │  - Rotating log file                                │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`app`]: Session state machine with intent/action model
//! - [`domain`]: Core domain types and the draw engine
//! - [`infrastructure`]: Data directory resolution
//! - [`storage`]: Key-value persistence (JSON file, in-memory)
//! - [`ui`]: Terminal rendering with theme support
//! - [`observability`]: File-based logging
//!
//! # Configuration
//!
//! Settings come from `<data_dir>/config.toml`, overridden by `key=value`
//! command-line arguments:
//!
//! ```toml
//! # ~/.local/share/whosnext/config.toml
//! trace_level = "debug"
//! ```
//!
//! ```text
//! whosnext data_dir=/srv/lottery trace_level=whosnext=debug
//! ```
//!
//! # Example
//!
//! ```rust
//! use whosnext::app::{handle_intent, Intent, Session};
//! use whosnext::storage::MemoryStore;
//!
//! let mut session = Session::load(MemoryStore::new());
//! handle_intent(&mut session, &Intent::ImportRoster("Ann\nBob\nCara".into()))?;
//! handle_intent(&mut session, &Intent::SetPickCount("2".into()))?;
//! handle_intent(&mut session, &Intent::Draw)?;
//!
//! assert_eq!(session.state().current_pick_ids.len(), 2);
//! assert_eq!(session.compute_view().status, "done: 2/3");
//! # Ok::<(), whosnext::WhosNextError>(())
//! ```

pub mod app;
pub mod domain;
pub mod infrastructure;
pub mod storage;

pub mod ui;

pub mod observability;

pub use app::{handle_intent, Action, Intent, Notice, Screen, Session};
pub use domain::{Entrant, Result, WhosNextError};
pub use ui::Theme;

use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use storage::JsonFileStore;

/// Name of the optional configuration file inside the data directory.
pub const CONFIG_FILE: &str = "config.toml";

/// Name of the key-value store file inside the data directory.
pub const STORE_FILE: &str = "store.json";

/// Name of the log file inside the data directory.
pub const LOG_FILE: &str = "whosnext.log";

/// Runtime configuration.
///
/// Resolved in three layers: built-in defaults, then `config.toml`, then
/// `key=value` overrides.
///
/// # Example
///
/// ```toml
/// data_dir = "~/lottery"
/// trace_level = "debug"
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Directory holding the store, config and log files.
    ///
    /// Default: see [`infrastructure::get_data_dir`].
    pub data_dir: PathBuf,

    /// Log filter directive.
    ///
    /// Options: `trace`, `debug`, `info`, `warn`, `error`, or any `EnvFilter`
    /// directive. Default: `"info"`
    pub trace_level: Option<String>,
}

/// Fields accepted in `config.toml`; all optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    data_dir: Option<String>,
    trace_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: infrastructure::get_data_dir(),
            trace_level: None,
        }
    }
}

impl Config {
    /// Builds a configuration from defaults plus the given overrides.
    ///
    /// # Parsing Rules
    ///
    /// - `data_dir`: path, `~` expanded; empty values ignored
    /// - `trace_level`: filter directive; empty values ignored
    /// - other keys are ignored
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use std::path::PathBuf;
    /// use whosnext::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("data_dir".to_string(), "/srv/lottery".to_string());
    /// map.insert("trace_level".to_string(), "debug".to_string());
    ///
    /// let config = Config::from_map(&map);
    /// assert_eq!(config.data_dir, PathBuf::from("/srv/lottery"));
    /// assert_eq!(config.trace_level.as_deref(), Some("debug"));
    /// ```
    #[must_use]
    pub fn from_map(map: &BTreeMap<String, String>) -> Self {
        Self::default().with_overrides(map)
    }

    /// Loads the full configuration: defaults, then the data directory's
    /// `config.toml` if present, then `overrides`.
    ///
    /// A `data_dir` override decides where `config.toml` is looked up.
    ///
    /// # Errors
    ///
    /// Returns [`WhosNextError::Config`] if the file exists but is not valid,
    /// or [`WhosNextError::Io`] if it cannot be read.
    pub fn load(overrides: &BTreeMap<String, String>) -> Result<Self> {
        let base = Self::from_map(overrides);
        let path = base.config_path();
        if !path.is_file() {
            return Ok(base);
        }

        tracing::debug!(path = %path.display(), "reading config file");
        let file = ConfigFile::read(&path)?;
        Ok(Self::default().with_file(file).with_overrides(overrides))
    }

    /// Parses `key=value` arguments into an override map.
    ///
    /// # Errors
    ///
    /// Returns [`WhosNextError::Config`] for an argument without `=` or with
    /// an empty key.
    ///
    /// # Example
    ///
    /// ```rust
    /// use whosnext::Config;
    ///
    /// let map = Config::parse_overrides(["trace_level=debug"])?;
    /// assert_eq!(map["trace_level"], "debug");
    /// assert!(Config::parse_overrides(["verbose"]).is_err());
    /// # Ok::<(), whosnext::WhosNextError>(())
    /// ```
    pub fn parse_overrides<I, T>(args: I) -> Result<BTreeMap<String, String>>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        args.into_iter()
            .map(|arg| {
                let arg = arg.as_ref();
                match arg.split_once('=') {
                    Some((key, value)) if !key.trim().is_empty() => {
                        Ok((key.trim().to_string(), value.trim().to_string()))
                    }
                    _ => Err(WhosNextError::Config(format!(
                        "expected key=value argument, got {arg:?}"
                    ))),
                }
            })
            .collect()
    }

    /// Path of the optional configuration file.
    #[must_use]
    pub fn config_path(&self) -> PathBuf {
        self.data_dir.join(CONFIG_FILE)
    }

    /// Path of the key-value store file.
    #[must_use]
    pub fn store_path(&self) -> PathBuf {
        self.data_dir.join(STORE_FILE)
    }

    /// Path of the log file.
    #[must_use]
    pub fn log_path(&self) -> PathBuf {
        self.data_dir.join(LOG_FILE)
    }

    fn with_overrides(mut self, map: &BTreeMap<String, String>) -> Self {
        if let Some(dir) = non_empty(map.get("data_dir")) {
            self.data_dir = PathBuf::from(infrastructure::expand_tilde(dir));
        }
        if let Some(level) = non_empty(map.get("trace_level")) {
            self.trace_level = Some(level.to_string());
        }
        self
    }

    fn with_file(mut self, file: ConfigFile) -> Self {
        if let Some(dir) = non_empty(file.data_dir.as_ref()) {
            self.data_dir = PathBuf::from(infrastructure::expand_tilde(dir));
        }
        if let Some(level) = non_empty(file.trace_level.as_ref()) {
            self.trace_level = Some(level.to_string());
        }
        self
    }
}

impl ConfigFile {
    fn read(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::parse(&text)
            .map_err(|e| WhosNextError::Config(format!("{}: {e}", path.display())))
    }

    fn parse(text: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(text)
    }
}

fn non_empty(value: Option<&String>) -> Option<&str> {
    value.map(|v| v.trim()).filter(|v| !v.is_empty())
}

/// Opens the persistent session described by `config`.
///
/// Opens (creating if needed) the JSON store, restores the saved session, or
/// starts fresh if nothing usable is stored, and advances the colour theme
/// so each start gets a new look.
///
/// # Errors
///
/// Returns an error if the data directory cannot be created or the advanced
/// theme cannot be saved.
///
/// # Example
///
/// ```rust
/// use whosnext::{initialize, Config};
///
/// let dir = tempfile::tempdir()?;
/// let config = Config { data_dir: dir.path().to_path_buf(), trace_level: None };
///
/// let session = initialize(&config)?;
/// assert_eq!(session.state().theme_index, 1);
/// assert!(config.store_path().exists());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn initialize(config: &Config) -> Result<Session<JsonFileStore>> {
    let _span = tracing::debug_span!("initialize", data_dir = %config.data_dir.display()).entered();

    let store = JsonFileStore::open(config.store_path())?;
    let mut session = Session::load(store);
    let theme_index = session.cycle_theme()?;

    tracing::debug!(
        roster = session.state().roster.len(),
        theme_index,
        "session ready"
    );
    Ok(session)
}
