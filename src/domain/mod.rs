//! Domain layer for whosnext.
//!
//! This module contains the core domain types and pure logic, independent of
//! storage, rendering, or the terminal front end.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`entrant`]: Entrant model and id formatting
//! - [`roster`]: Parsing text into a roster
//! - [`draw`]: Shuffle-based selection without replacement
//!
//! # Examples
//!
//! ```
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//! use whosnext::domain::{draw, parse_roster};
//!
//! let roster = parse_roster("Ann\nBob\nCara");
//! let pool: Vec<String> = roster.iter().map(|e| e.id.clone()).collect();
//!
//! let result = draw(&pool, 2, &mut StdRng::seed_from_u64(1)).unwrap();
//! assert_eq!(result.picked.len() + result.remaining.len(), roster.len());
//! ```

pub mod draw;
pub mod entrant;
pub mod error;
pub mod roster;

pub use draw::{clamp_pick_count, draw, normalize_pick_input, Draw};
pub use entrant::{format_number, Entrant};
pub use error::{Result, WhosNextError};
pub use roster::{parse_roster, roster_text};
