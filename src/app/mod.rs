//! Application layer: session state machine, persistence boundary, intents.
//!
//! This module sits between the front end (`main.rs`) and the domain/storage
//! layers. It owns the drawing session and turns user intents into persisted
//! transitions.
//!
//! # Architecture
//!
//! ```text
//! User Input → Intent → handle_intent → Session transition → persist
//!                                              │
//!                    Actions + redraw flag ◀───┘ → front end renders view model
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands and advisory notices
//! - [`handler`]: Intent dispatch
//! - [`modes`]: Start/result screen state
//! - [`session`]: Owned session with load/save at its boundary
//! - [`state`]: The persisted record and its pure transitions

pub mod actions;
pub mod handler;
pub mod modes;
pub mod session;
pub mod state;

pub use actions::{Action, Notice};
pub use handler::{handle_intent, Intent};
pub use modes::Screen;
pub use session::{Session, STORAGE_KEY, UNKNOWN_NAME};
pub use state::{DrawOutcome, SessionState, SCHEMA_VERSION};
