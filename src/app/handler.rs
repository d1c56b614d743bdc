//! Intent handling and transition dispatch.
//!
//! This module translates user intents into session transitions and collects the
//! follow-up actions for the front end. It is the only entry point a front end
//! needs besides reading the view model.
//!
//! # Architecture
//!
//! 1. The front end turns user input into an [`Intent`]
//! 2. [`handle_intent`] applies the matching [`Session`] transition (which persists)
//! 3. It returns whether a redraw is needed plus any [`Action`]s
//!
//! # Example
//!
//! ```rust
//! use whosnext::app::{handle_intent, Action, Intent, Notice, Session};
//! use whosnext::storage::MemoryStore;
//!
//! let mut session = Session::load(MemoryStore::new());
//!
//! let (redraw, actions) = handle_intent(&mut session, &Intent::Draw)?;
//! assert!(!redraw);
//! assert_eq!(actions, vec![Action::Notify(Notice::ImportNamesFirst)]);
//! # Ok::<(), whosnext::WhosNextError>(())
//! ```

use super::actions::{Action, Notice};
use super::session::Session;
use super::state::DrawOutcome;
use crate::domain::error::Result;
use crate::storage::KeyValueStore;
use rand::Rng;

/// User intents forwarded by the front end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// Replace the roster with names parsed from the given text.
    ImportRoster(String),
    /// Draw the next batch of entrants.
    Draw,
    /// Leave the result screen.
    AcknowledgeResult,
    /// Discard everything, roster included.
    Initialize,
    /// Restart the lottery, keeping the roster.
    ResetOnly,
    /// Set the pick count from raw input text.
    SetPickCount(String),
    /// Switch to the next colour theme.
    CycleTheme,
    Quit,
}

/// Applies an intent to the session and returns `(needs_redraw, actions)`.
///
/// Advisory conditions (no roster, exhausted pool, out-of-range pick count)
/// come back as [`Notice`]s, never as errors.
///
/// # Errors
///
/// Returns an error only if a transition fails to persist.
pub fn handle_intent<S: KeyValueStore, R: Rng>(
    session: &mut Session<S, R>,
    intent: &Intent,
) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_intent", intent = ?intent).entered();

    match intent {
        Intent::ImportRoster(text) => {
            let count = session.import_roster(text)?;
            let notice = if count == 0 {
                Notice::RosterCleared
            } else {
                Notice::Imported(count)
            };
            Ok((
                true,
                vec![
                    Action::SyncPickInput(session.state().pick_count),
                    Action::Notify(notice),
                ],
            ))
        }
        Intent::Draw => match session.draw()? {
            DrawOutcome::Drawn(_) => Ok((true, vec![Action::SyncPickInput(session.state().pick_count)])),
            DrawOutcome::NoRoster => Ok((false, vec![Action::Notify(Notice::ImportNamesFirst)])),
            DrawOutcome::Exhausted => Ok((false, vec![Action::Notify(Notice::Finished)])),
        },
        Intent::AcknowledgeResult => {
            let changed = session.acknowledge_result()?;
            Ok((changed, vec![]))
        }
        Intent::Initialize => {
            session.initialize()?;
            Ok((
                true,
                vec![
                    Action::SyncPickInput(session.state().pick_count),
                    Action::Notify(Notice::Initialized),
                ],
            ))
        }
        Intent::ResetOnly => {
            session.reset_only()?;
            Ok((
                true,
                vec![
                    Action::SyncPickInput(session.state().pick_count),
                    Action::Notify(Notice::Reset),
                ],
            ))
        }
        Intent::SetPickCount(raw) => {
            let stored = session.set_pick_input(raw)?;
            Ok((
                true,
                vec![Action::SyncPickInput(stored), Action::Notify(Notice::PickCount(stored))],
            ))
        }
        Intent::CycleTheme => {
            session.cycle_theme()?;
            Ok((true, vec![]))
        }
        Intent::Quit => Ok((false, vec![Action::Quit])),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn session() -> Session<MemoryStore, StdRng> {
        Session::load_with_rng(MemoryStore::new(), StdRng::seed_from_u64(99))
    }

    #[test]
    fn import_reports_count_or_clear() {
        let mut session = session();
        let (redraw, actions) =
            handle_intent(&mut session, &Intent::ImportRoster("Ann\nBob".into())).unwrap();
        assert!(redraw);
        assert_eq!(
            actions,
            vec![Action::SyncPickInput(1), Action::Notify(Notice::Imported(2))]
        );

        let (_, actions) = handle_intent(&mut session, &Intent::ImportRoster("  \n".into())).unwrap();
        assert_eq!(actions[1], Action::Notify(Notice::RosterCleared));
        assert!(session.state().roster.is_empty());
    }

    #[test]
    fn draw_until_finished() {
        let mut session = session();
        handle_intent(&mut session, &Intent::ImportRoster("Ann".into())).unwrap();

        let (redraw, _) = handle_intent(&mut session, &Intent::Draw).unwrap();
        assert!(redraw);

        let (redraw, actions) = handle_intent(&mut session, &Intent::Draw).unwrap();
        assert!(!redraw);
        assert_eq!(actions, vec![Action::Notify(Notice::Finished)]);
    }

    #[test]
    fn pick_count_is_corrected_and_echoed() {
        let mut session = session();
        handle_intent(&mut session, &Intent::ImportRoster("a\nb\nc".into())).unwrap();

        let (_, actions) = handle_intent(&mut session, &Intent::SetPickCount("12".into())).unwrap();
        assert_eq!(
            actions,
            vec![Action::SyncPickInput(3), Action::Notify(Notice::PickCount(3))]
        );

        let (_, actions) = handle_intent(&mut session, &Intent::SetPickCount("abc".into())).unwrap();
        assert_eq!(actions[0], Action::SyncPickInput(1));
    }

    #[test]
    fn acknowledge_on_start_screen_needs_no_redraw() {
        let mut session = session();
        let (redraw, actions) = handle_intent(&mut session, &Intent::AcknowledgeResult).unwrap();
        assert!(!redraw);
        assert!(actions.is_empty());
    }

    #[test]
    fn quit_is_passed_through() {
        let mut session = session();
        let (redraw, actions) = handle_intent(&mut session, &Intent::Quit).unwrap();
        assert!(!redraw);
        assert_eq!(actions, vec![Action::Quit]);
    }
}
