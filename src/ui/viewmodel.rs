//! View model types representing renderable session state.
//!
//! View models are computed from a session via
//! [`Session::compute_view`](crate::app::Session::compute_view) and consumed by the
//! renderer. They carry display-ready data only: names are already resolved,
//! numbers already padded, and the hint already chosen.

use crate::app::Screen;
use crate::ui::theme::Theme;
use std::fmt;
use std::ops::RangeInclusive;

/// Complete view model for one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionView {
    pub screen: Screen,

    pub roster_size: usize,

    /// Entrants still in the pool.
    pub remaining: usize,

    /// Entrants drawn so far.
    pub done: usize,

    /// Status line, e.g. `done: 2/3`.
    pub status: String,

    /// One row per roster slot, in draw order.
    pub history: Vec<HistoryRow>,

    /// Cards for the most recent draw. Empty on the start screen.
    pub current_picks: Vec<PickCard>,

    /// Number of columns the current pick is laid out in.
    pub grid_columns: usize,

    pub pick_count: usize,

    /// Valid range for the pick count input.
    pub pick_range: RangeInclusive<usize>,

    /// Whether a draw can be started right now.
    pub start_enabled: bool,

    pub hint: Hint,

    pub theme: Theme,
}

/// One numbered row of the draw history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryRow {
    /// Draw number, zero-padded (`01`, `02`, ...).
    pub number: String,

    /// Name drawn in this slot, or `None` if the slot has not been drawn yet.
    pub name: Option<String>,
}

/// One entrant of the current pick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickCard {
    /// Overall draw number of this entrant within the session.
    pub number: String,
    pub name: String,
}

/// Guidance shown under the main control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hint {
    /// No roster has been imported.
    ImportNames,
    /// Every entrant has been drawn.
    Finished,
    /// Draws are possible; point at the reset controls.
    ResetAvailable,
}

impl fmt::Display for Hint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ImportNames => f.write_str("Import the names list."),
            Self::Finished => f.write_str("finished!"),
            Self::ResetAvailable => f.write_str("For initialization or reset, use `init` or `reset`."),
        }
    }
}

/// Number of grid columns used to lay out `picks` result cards.
///
/// ```
/// use whosnext::ui::grid_columns;
///
/// assert_eq!(grid_columns(3), 1);
/// assert_eq!(grid_columns(8), 2);
/// assert_eq!(grid_columns(30), 5);
/// ```
#[must_use]
pub const fn grid_columns(picks: usize) -> usize {
    match picks {
        0..=3 => 1,
        4..=8 => 2,
        9..=15 => 3,
        16..=24 => 4,
        _ => 5,
    }
}
