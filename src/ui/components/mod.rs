//! Composable UI component renderers.
//!
//! Each component writes one region of the frame to any `io::Write`, so the
//! whole frame can be rendered into a buffer in tests.
//!
//! # Components
//!
//! - [`header`]: Title and progress status
//! - [`stage`]: Start control or result cards, plus the hint line
//! - [`history`]: Numbered draw history
//! - [`footer`]: Pick count, command hints and the latest notice
//!
//! # Layout
//!
//! ```text
//! [Header]
//! [Rule]
//! [Stage + Hint]
//! [Rule]
//! [History rows]
//! [Rule]
//! [Footer]
//! ```

mod footer;
mod header;
mod history;
mod stage;

pub use footer::render_footer;
pub use header::render_header;
pub use history::render_history;
pub use stage::render_stage;
