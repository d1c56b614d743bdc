//! File-based structured logging.
//!
//! Events from the `tracing` macros are formatted by `tracing-subscriber` and
//! written to a size-rotated log file, keeping the terminal free for the UI.
//!
//! # Architecture
//!
//! ```text
//! tracing macros → EnvFilter → fmt layer → FileWriter → whosnext.log
//! ```
//!
//! # Features
//!
//! - **File Output**: `<data_dir>/whosnext.log`
//! - **Automatic Rotation**: Files rotate at 10MB with 3-backup retention
//!
//! # Configuration
//!
//! Log level is controlled via:
//! 1. `RUST_LOG` environment variable (highest priority)
//! 2. `trace_level` config option
//! 3. Default: `"info"`
//!
//! # Modules
//!
//! - [`init`]: Subscriber initialization
//! - [`file_writer`]: Rotating file writer with size-based rotation

mod file_writer;
mod init;

pub use file_writer::FileWriter;
pub use init::init_tracing;
