//! Actions representing side effects for the front end to carry out.
//!
//! The intent handler never touches the terminal. After processing an intent it
//! returns a `Vec<Action>` describing what the front end should do besides
//! redrawing: show a short notice, write a corrected value back into the pick
//! count input, or exit.
//!
//! # Example
//!
//! ```rust
//! use whosnext::app::{Action, Notice};
//!
//! let actions = vec![
//!     Action::SyncPickInput(2),
//!     Action::Notify(Notice::Imported(12)),
//! ];
//! assert_eq!(actions[1], Action::Notify(Notice::Imported(12)));
//! assert_eq!(Notice::Imported(12).to_string(), "Imported: 12 names");
//! ```

use std::fmt;

/// Commands produced by the intent handler for the front end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Show a short-lived advisory message.
    Notify(Notice),

    /// Write the stored pick count back into the pick count input.
    ///
    /// Emitted whenever the stored value may differ from what the user typed.
    SyncPickInput(usize),

    /// Exit the front end.
    Quit,
}

/// Short advisory messages shown after an intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    /// A draw was requested before any names were imported.
    ImportNamesFirst,
    /// A draw was requested after every entrant had been drawn.
    Finished,
    /// A non-empty roster was imported.
    Imported(usize),
    /// Empty text was imported, clearing the roster.
    RosterCleared,
    Initialized,
    Reset,
    /// The pick count was set (after clamping).
    PickCount(usize),
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ImportNamesFirst => f.write_str("Import the names list."),
            Self::Finished => f.write_str("finished!"),
            Self::Imported(count) => write!(f, "Imported: {count} names"),
            Self::RosterCleared => f.write_str("Names list cleared."),
            Self::Initialized => f.write_str("Initialized."),
            Self::Reset => f.write_str("Reset."),
            Self::PickCount(count) => write!(f, "PICK = {count}"),
        }
    }
}
