//! User interface rendering layer with component-based architecture.
//!
//! This module turns view models into ANSI-styled terminal output through
//! composable rendering components, coloured with the session's current theme.
//!
//! ```text
//! Session → compute_view → SessionView → render_view → ANSI Output
//! ```
//!
//! # Modules
//!
//! - [`viewmodel`]: View model types representing renderable session state
//! - [`renderer`]: Top-level rendering coordinator
//! - [`components`]: Composable UI component renderers
//! - [`helpers`]: Shared width/centering utilities
//! - [`theme`]: Colour palette and ANSI escape sequence generation

pub mod components;
pub mod helpers;
pub mod renderer;
pub mod theme;
pub mod viewmodel;

pub use renderer::render_view;
pub use theme::{Theme, THEMES};
pub use viewmodel::{grid_columns, Hint, HistoryRow, PickCard, SessionView};
