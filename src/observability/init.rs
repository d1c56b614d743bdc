//! Tracing initialization and subscriber setup.
//!
//! This module configures the tracing subscriber, routing events from the
//! `tracing` macros into a rotating log file in the data directory so log
//! output never interleaves with the terminal UI.

use super::file_writer::FileWriter;
use crate::Config;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Default filter directive when neither `RUST_LOG` nor the config sets one.
const DEFAULT_LEVEL: &str = "info";

/// Initializes the tracing subscriber with file-based output.
///
/// Sets up a subscriber pipeline that:
/// 1. Filters events based on the resolved level
/// 2. Formats them as plain text (no ANSI colours)
/// 3. Writes to a rotating file with backups
///
/// # Level Resolution
///
/// 1. `RUST_LOG` environment variable
/// 2. `config.trace_level`
/// 3. Default: `"info"`
///
/// # File Location
///
/// Logs are written to [`Config::log_path`], `<data_dir>/whosnext.log`.
///
/// # Initialization Behavior
///
/// - Creates the data directory if it doesn't exist
/// - Silently does nothing if directory creation fails (logging is optional)
/// - Idempotent: only the first call takes effect
///
/// # Example
///
/// ```rust
/// use whosnext::observability::init_tracing;
/// use whosnext::Config;
///
/// let dir = tempfile::tempdir()?;
/// let config = Config {
///     data_dir: dir.path().to_path_buf(),
///     trace_level: Some("debug".to_string()),
/// };
///
/// init_tracing(&config);
/// tracing::debug!("tracing is now active");
/// # Ok::<(), std::io::Error>(())
/// ```
pub fn init_tracing(config: &Config) {
    if std::fs::create_dir_all(&config.data_dir).is_err() {
        return;
    }

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(resolve_level(config)));

    let file_layer = fmt::layer()
        .with_ansi(false)
        .with_target(true)
        .with_writer(FileWriter::new(config.log_path()));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .try_init();
}

fn resolve_level(config: &Config) -> &str {
    config
        .trace_level
        .as_deref()
        .map(str::trim)
        .filter(|level| !level.is_empty())
        .unwrap_or(DEFAULT_LEVEL)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn config(level: Option<&str>) -> Config {
        Config {
            data_dir: PathBuf::from("/tmp/unused"),
            trace_level: level.map(String::from),
        }
    }

    #[test]
    fn level_defaults_to_info() {
        assert_eq!(resolve_level(&config(None)), "info");
        assert_eq!(resolve_level(&config(Some("  "))), "info");
    }

    #[test]
    fn level_from_config() {
        assert_eq!(resolve_level(&config(Some("whosnext=debug"))), "whosnext=debug");
    }
}
