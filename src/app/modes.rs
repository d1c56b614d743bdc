//! Display mode of a session.
//!
//! A session is always on one of two screens:
//! - **Start**: waiting for the next draw
//! - **Result**: showing the entrants picked by the most recent draw
//!
//! ```text
//!            draw (pool non-empty)
//!   START ───────────────────────────▶ RESULT
//!     ▲                                   │
//!     └────────── acknowledge ────────────┘
//!
//!   import / initialize / reset-only: any screen ──▶ START
//! ```

use serde::{Deserialize, Serialize};

/// Current display mode, persisted as `"START"` or `"RESULT"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Screen {
    /// Waiting for a draw. Initial screen of every fresh session.
    #[default]
    Start,

    /// Showing the current pick until it is acknowledged.
    Result,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn screens_serialize_in_upper_case() {
        assert_eq!(serde_json::to_string(&Screen::Start).unwrap(), r#""START""#);
        assert_eq!(serde_json::to_string(&Screen::Result).unwrap(), r#""RESULT""#);
        assert!(serde_json::from_str::<Screen>(r#""result""#).is_err());
    }
}
