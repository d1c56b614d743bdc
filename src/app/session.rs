//! Session container: state, persistence, and derived lookups.
//!
//! [`Session`] owns a [`SessionState`] together with the store it is persisted
//! to and the random source draws use. Every mutating operation persists the
//! record before returning, so the stored value always reflects the last
//! completed transition. A transition whose write fails is rolled back, so
//! memory never runs ahead of the store.
//!
//! # Persistence Contract
//!
//! The record is stored as JSON under [`STORAGE_KEY`]. On load, a value that is
//! missing, unparsable, has the wrong shape, carries a different
//! `schemaVersion`, or breaks the pool/history partition is discarded and a
//! fresh session is used instead. An out-of-range pick count is clamped, not
//! discarded. There is no migration.
//!
//! # Example
//!
//! ```
//! use whosnext::app::{DrawOutcome, Session};
//! use whosnext::storage::MemoryStore;
//!
//! let mut session = Session::load(MemoryStore::new());
//! session.import_roster("Ann\nBob\nCara")?;
//! session.set_pick_input("2")?;
//!
//! let DrawOutcome::Drawn(picked) = session.draw()? else { unreachable!() };
//! assert_eq!(picked.len(), 2);
//! assert_eq!(session.state().remaining_ids.len(), 1);
//! # Ok::<(), whosnext::WhosNextError>(())
//! ```

use super::state::{DrawOutcome, SessionState, SCHEMA_VERSION};
use crate::domain::error::{Result, WhosNextError};
use crate::domain::{format_number, parse_roster, roster_text};
use crate::storage::KeyValueStore;
use crate::ui::viewmodel::{grid_columns, Hint, HistoryRow, PickCard, SessionView};
use crate::ui::Theme;
use rand::rngs::ThreadRng;
use rand::Rng;
use std::collections::HashMap;

/// Fixed key the session record is stored under.
pub const STORAGE_KEY: &str = "whosnext.anyone.appState.v1";

/// Placeholder shown for an id that does not resolve to a roster entrant.
pub const UNKNOWN_NAME: &str = "(unknown)";

/// Owned session: the record, its store, and its random source.
pub struct Session<S, R = ThreadRng> {
    state: SessionState,
    /// Derived id → name index, rebuilt whenever the roster changes.
    names: HashMap<String, String>,
    store: S,
    rng: R,
}

impl<S: KeyValueStore> Session<S, ThreadRng> {
    /// Loads the session from `store`, drawing with the thread-local RNG.
    pub fn load(store: S) -> Self {
        Self::load_with_rng(store, rand::rng())
    }
}

impl<S: KeyValueStore, R: Rng> Session<S, R> {
    /// Loads the session from `store` with an explicit random source.
    ///
    /// Loading never fails; anything unusable in the store yields a fresh
    /// session. Nothing is written until the first transition.
    pub fn load_with_rng(store: S, rng: R) -> Self {
        let state = load_state(&store);
        let names = index_names(&state);
        Self { state, names, store, rng }
    }

    /// Read-only view of the current record.
    #[must_use]
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// The underlying store.
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Consumes the session and returns its store.
    pub fn into_store(self) -> S {
        self.store
    }

    /// Resolves an entrant id to its display name, or the unknown placeholder.
    #[must_use]
    pub fn name_of(&self, id: &str) -> &str {
        self.names.get(id).map_or(UNKNOWN_NAME, String::as_str)
    }

    /// Roster names as newline-joined text, for pre-filling an editor.
    #[must_use]
    pub fn roster_text(&self) -> String {
        roster_text(&self.state.roster)
    }

    /// Parses `raw_text` and replaces the roster with it. Returns the roster size.
    ///
    /// Empty text clears the roster.
    ///
    /// # Errors
    ///
    /// Returns an error if the record cannot be persisted.
    pub fn import_roster(&mut self, raw_text: &str) -> Result<usize> {
        let _span = tracing::debug_span!("import_roster", bytes = raw_text.len()).entered();

        let roster = parse_roster(raw_text);
        let count = roster.len();
        let previous = self.state.clone();
        self.state.apply_roster(roster);
        self.names = index_names(&self.state);
        self.commit(previous)?;

        tracing::info!(entrants = count, "roster imported");
        Ok(count)
    }

    /// Draws the next batch of entrants.
    ///
    /// When there is no roster or the pool is exhausted, nothing changes and
    /// nothing is written.
    ///
    /// # Errors
    ///
    /// Returns an error if the record cannot be persisted.
    pub fn draw(&mut self) -> Result<DrawOutcome> {
        let _span = tracing::debug_span!(
            "draw",
            pick_count = self.state.pick_count,
            remaining = self.state.remaining_ids.len()
        )
        .entered();

        let previous = self.state.clone();
        let outcome = self.state.draw_with(&mut self.rng);
        match &outcome {
            DrawOutcome::Drawn(picked) => {
                self.commit(previous)?;
                tracing::info!(picked = picked.len(), "draw persisted");
            }
            DrawOutcome::NoRoster => tracing::debug!("draw ignored, no roster"),
            DrawOutcome::Exhausted => tracing::debug!("draw ignored, pool exhausted"),
        }
        Ok(outcome)
    }

    /// Leaves the result screen. Returns `false` if already on the start screen.
    ///
    /// Acknowledging also advances the colour theme.
    ///
    /// # Errors
    ///
    /// Returns an error if the record cannot be persisted.
    pub fn acknowledge_result(&mut self) -> Result<bool> {
        let previous = self.state.clone();
        if !self.state.acknowledge() {
            tracing::debug!("acknowledge ignored, not on result screen");
            return Ok(false);
        }
        self.state.cycle_theme();
        self.commit(previous)?;
        Ok(true)
    }

    /// Replaces everything, roster included, with a fresh session.
    ///
    /// # Errors
    ///
    /// Returns an error if the record cannot be persisted.
    pub fn initialize(&mut self) -> Result<()> {
        let previous = std::mem::replace(&mut self.state, SessionState::fresh());
        self.names = index_names(&self.state);
        self.commit(previous)?;
        tracing::info!("session initialized");
        Ok(())
    }

    /// Restarts the lottery, keeping the roster.
    ///
    /// # Errors
    ///
    /// Returns an error if the record cannot be persisted.
    pub fn reset_only(&mut self) -> Result<()> {
        let previous = self.state.clone();
        self.state.reset_draws();
        self.commit(previous)?;
        tracing::info!(entrants = self.state.roster.len(), "draws reset");
        Ok(())
    }

    /// Sets the pick count from raw input text, clamped to the allowed range.
    /// Returns the stored value.
    ///
    /// # Errors
    ///
    /// Returns an error if the record cannot be persisted.
    pub fn set_pick_input(&mut self, raw: &str) -> Result<usize> {
        let previous = self.state.clone();
        let stored = self.state.set_pick_input(raw);
        tracing::debug!(raw = %raw, stored, "pick count set");
        self.commit(previous)?;
        Ok(stored)
    }

    /// Advances to the next colour theme. Returns the new theme index.
    ///
    /// # Errors
    ///
    /// Returns an error if the record cannot be persisted.
    pub fn cycle_theme(&mut self) -> Result<usize> {
        let previous = self.state.clone();
        let index = self.state.cycle_theme();
        self.commit(previous)?;
        Ok(index)
    }

    /// Computes the view model for the current state.
    ///
    /// The history has one row per roster slot; slots not yet drawn have no
    /// name. Ids that no longer resolve render as [`UNKNOWN_NAME`].
    #[must_use]
    pub fn compute_view(&self) -> SessionView {
        let state = &self.state;
        let total = state.roster.len();
        let done = state.picked_history_ids.len();

        let history = (0..total)
            .map(|slot| HistoryRow {
                number: format_number(slot + 1),
                name: state
                    .picked_history_ids
                    .get(slot)
                    .map(|id| self.name_of(id).to_string()),
            })
            .collect();

        let base = done.saturating_sub(state.current_pick_ids.len());
        let current_picks: Vec<PickCard> = state
            .current_pick_ids
            .iter()
            .enumerate()
            .map(|(offset, id)| PickCard {
                number: format_number(base + offset + 1),
                name: self.name_of(id).to_string(),
            })
            .collect();

        let hint = if !state.has_roster() {
            Hint::ImportNames
        } else if state.remaining_ids.is_empty() {
            Hint::Finished
        } else {
            Hint::ResetAvailable
        };

        SessionView {
            screen: state.screen,
            roster_size: total,
            remaining: state.remaining_ids.len(),
            done,
            status: format!("done: {done}/{total}"),
            history,
            grid_columns: grid_columns(current_picks.len()),
            current_picks,
            pick_count: state.pick_count,
            pick_range: 1..=state.max_pick_count(),
            start_enabled: state.has_roster() && !state.remaining_ids.is_empty(),
            hint,
            theme: Theme::for_index(state.theme_index),
        }
    }

    /// Stamps `updated_at` and writes the record to the store.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the store write fails.
    pub fn save(&mut self) -> Result<()> {
        self.state.updated_at = chrono::Utc::now().timestamp_millis();
        let json = serde_json::to_string(&self.state)
            .map_err(|e| WhosNextError::Storage(format!("failed to serialize session: {e}")))?;
        self.store.set(STORAGE_KEY, json)
    }

    /// Saves the current state, or puts `previous` back if the write fails.
    fn commit(&mut self, previous: SessionState) -> Result<()> {
        if let Err(e) = self.save() {
            tracing::warn!(error = %e, "session write failed, rolling back");
            self.state = previous;
            self.names = index_names(&self.state);
            return Err(e);
        }
        Ok(())
    }
}

impl<S, R> std::fmt::Debug for Session<S, R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

fn index_names(state: &SessionState) -> HashMap<String, String> {
    state
        .roster
        .iter()
        .map(|entrant| (entrant.id.clone(), entrant.name.clone()))
        .collect()
}

/// Reads the record from `store`, falling back to a fresh session.
fn load_state<S: KeyValueStore>(store: &S) -> SessionState {
    let _span = tracing::debug_span!("load_state").entered();

    let Some(raw) = store.get(STORAGE_KEY) else {
        tracing::debug!("no stored session, starting fresh");
        return SessionState::fresh();
    };

    let value: serde_json::Value = match serde_json::from_str(&raw) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!(error = %e, "stored session is not JSON, discarding");
            return SessionState::fresh();
        }
    };

    let version = value.get("schemaVersion").and_then(serde_json::Value::as_u64);
    if version != Some(u64::from(SCHEMA_VERSION)) {
        tracing::warn!(found = ?version, expected = SCHEMA_VERSION, "schema mismatch, discarding");
        return SessionState::fresh();
    }

    let mut state: SessionState = match serde_json::from_value(value) {
        Ok(state) => state,
        Err(e) => {
            tracing::warn!(error = %e, "stored session has unexpected shape, discarding");
            return SessionState::fresh();
        }
    };

    let stored_pick_count = state.pick_count;
    state.clamp_pick_count_to_pool();
    if state.pick_count != stored_pick_count {
        tracing::debug!(
            stored = stored_pick_count,
            clamped = state.pick_count,
            "stored pick count out of range, clamped"
        );
    }

    if let Err(reason) = state.check_invariants() {
        tracing::warn!(reason = %reason, "stored session is inconsistent, discarding");
        return SessionState::fresh();
    }

    tracing::debug!(
        entrants = state.roster.len(),
        drawn = state.picked_history_ids.len(),
        screen = ?state.screen,
        "session restored"
    );
    state
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::Screen;
    use crate::storage::MemoryStore;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::cell::Cell;
    use std::rc::Rc;

    fn seeded(store: MemoryStore) -> Session<MemoryStore, StdRng> {
        Session::load_with_rng(store, StdRng::seed_from_u64(17))
    }

    fn stored(session: &Session<MemoryStore, StdRng>) -> SessionState {
        let raw = session.store().get(STORAGE_KEY).expect("record written");
        serde_json::from_str(&raw).unwrap()
    }

    #[test]
    fn every_transition_persists() {
        let mut session = seeded(MemoryStore::new());
        assert!(session.store().get(STORAGE_KEY).is_none());

        session.import_roster("Ann\nBob\nCara").unwrap();
        assert_eq!(stored(&session), *session.state());

        session.set_pick_input("2").unwrap();
        assert_eq!(stored(&session).pick_count, 2);

        session.draw().unwrap();
        assert_eq!(stored(&session).picked_history_ids.len(), 2);

        session.acknowledge_result().unwrap();
        assert_eq!(stored(&session).screen, Screen::Start);

        session.reset_only().unwrap();
        assert!(stored(&session).picked_history_ids.is_empty());

        session.initialize().unwrap();
        assert!(stored(&session).roster.is_empty());
    }

    #[test]
    fn ignored_draws_do_not_write() {
        let mut session = seeded(MemoryStore::new());
        assert_eq!(session.draw().unwrap(), DrawOutcome::NoRoster);
        assert!(session.store().get(STORAGE_KEY).is_none());
    }

    #[test]
    fn state_round_trips_through_store() {
        let mut session = seeded(MemoryStore::new());
        session.import_roster("Ann\nBob\nCara\nDan").unwrap();
        session.set_pick_input("3").unwrap();
        session.draw().unwrap();
        let before = session.state().clone();

        let reloaded = seeded(session.into_store());
        assert_eq!(*reloaded.state(), before);
        assert_eq!(reloaded.state().screen, Screen::Result);
    }

    #[test]
    fn unusable_records_load_fresh() {
        let fresh = SessionState::fresh();
        let mut valid = serde_json::to_value(&fresh).unwrap();
        valid["roster"] = serde_json::json!([{ "id": "01", "name": "Ann" }]);
        valid["remainingIds"] = serde_json::json!(["01"]);

        let mut wrong_version = valid.clone();
        wrong_version["schemaVersion"] = serde_json::json!(2);
        let mut wrong_shape = valid.clone();
        wrong_shape["pickCount"] = serde_json::json!("three");
        let mut inconsistent = valid.clone();
        inconsistent["pickedHistoryIds"] = serde_json::json!(["01"]);

        for raw in [
            "not json at all".to_string(),
            "null".to_string(),
            "{}".to_string(),
            wrong_version.to_string(),
            wrong_shape.to_string(),
            inconsistent.to_string(),
        ] {
            let mut store = MemoryStore::new();
            store.set(STORAGE_KEY, raw.clone()).unwrap();
            let session = seeded(store);
            assert!(session.state().roster.is_empty(), "accepted {raw}");
            assert_eq!(session.state().pick_count, 1);
        }

        let mut store = MemoryStore::new();
        store.set(STORAGE_KEY, valid.to_string()).unwrap();
        assert_eq!(seeded(store).state().roster.len(), 1);
    }

    #[test]
    fn names_resolve_with_placeholder() {
        let mut session = seeded(MemoryStore::new());
        session.import_roster("Ann\nAnn").unwrap();
        assert_eq!(session.name_of("01"), "Ann");
        assert_eq!(session.name_of("02"), "Ann");
        assert_eq!(session.name_of("03"), UNKNOWN_NAME);

        session.import_roster("").unwrap();
        assert_eq!(session.name_of("01"), UNKNOWN_NAME);
    }

    #[test]
    fn acknowledge_advances_theme_only_from_result() {
        let mut session = seeded(MemoryStore::new());
        session.import_roster("Ann\nBob").unwrap();
        assert!(!session.acknowledge_result().unwrap());
        assert_eq!(session.state().theme_index, 0);

        session.draw().unwrap();
        assert!(session.acknowledge_result().unwrap());
        assert_eq!(session.state().theme_index, 1);
        assert!(session.state().current_pick_ids.is_empty());
        assert_eq!(session.state().picked_history_ids.len(), 1);
    }

    #[test]
    fn view_numbers_history_and_current_pick() {
        use crate::ui::Hint;

        let mut session = seeded(MemoryStore::new());
        let view = session.compute_view();
        assert_eq!(view.status, "done: 0/0");
        assert_eq!(view.hint, Hint::ImportNames);
        assert!(!view.start_enabled);
        assert_eq!(view.pick_range, 1..=1);

        session.import_roster("Ann\nBob\nCara\nDan").unwrap();
        session.set_pick_input("2").unwrap();
        session.draw().unwrap();
        session.acknowledge_result().unwrap();
        session.draw().unwrap();

        let view = session.compute_view();
        assert_eq!(view.screen, Screen::Result);
        assert_eq!(view.status, "done: 4/4");
        assert_eq!(view.hint, Hint::Finished);
        assert!(!view.start_enabled);

        let numbers: Vec<&str> = view.current_picks.iter().map(|c| c.number.as_str()).collect();
        assert_eq!(numbers, ["03", "04"]);
        assert_eq!(view.grid_columns, 1);

        assert_eq!(view.history.len(), 4);
        for (row, id) in view.history.iter().zip(&session.state().picked_history_ids) {
            assert_eq!(row.name.as_deref(), Some(session.name_of(id)));
        }
    }

    #[test]
    fn view_marks_undrawn_slots_and_unknown_ids() {
        let mut session = seeded(MemoryStore::new());
        session.import_roster("Ann\nBob\nCara").unwrap();
        session.draw().unwrap();

        let view = session.compute_view();
        assert!(view.history[0].name.is_some());
        assert_eq!(view.history[1].name, None);
        assert_eq!(view.history[2].number, "03");
        assert_eq!(view.pick_range, 1..=2);

        session.names.clear();
        let view = session.compute_view();
        assert_eq!(view.history[0].name.as_deref(), Some(UNKNOWN_NAME));
        assert_eq!(view.current_picks[0].name, UNKNOWN_NAME);
    }

    #[test]
    fn updated_at_is_stamped_on_write() {
        let mut session = seeded(MemoryStore::new());
        session.state.updated_at = 0;
        session.cycle_theme().unwrap();
        assert!(stored(&session).updated_at > 0);
    }

    #[test]
    fn session_resumes_from_file_store_after_restart() {
        use crate::storage::JsonFileStore;

        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("store.json");

        let before = {
            let store = JsonFileStore::open(path.clone()).unwrap();
            let mut session = Session::load_with_rng(store, StdRng::seed_from_u64(3));
            session.import_roster("Ann\nBob\nCara").unwrap();
            session.set_pick_input("2").unwrap();
            session.draw().unwrap();
            session.state().clone()
        };

        let store = JsonFileStore::open(path).unwrap();
        let mut session = Session::load_with_rng(store, StdRng::seed_from_u64(4));
        assert_eq!(*session.state(), before);
        assert_eq!(session.state().remaining_ids.len(), 1);

        session.acknowledge_result().unwrap();
        session.draw().unwrap();
        let mut history = session.state().picked_history_ids.clone();
        history.sort();
        assert_eq!(history, ["01", "02", "03"]);

        session.reset_only().unwrap();
        assert_eq!(session.state().roster.len(), 3);
        assert_eq!(session.state().remaining_ids.len(), 3);
        assert_eq!(session.state().screen, Screen::Start);
    }

    #[test]
    fn out_of_range_pick_count_is_clamped_on_load() {
        let mut session = seeded(MemoryStore::new());
        session.import_roster("Ann\nBob\nCara").unwrap();
        let mut record = serde_json::to_value(session.state()).unwrap();
        record["pickCount"] = serde_json::json!(5);

        let mut store = MemoryStore::new();
        store.set(STORAGE_KEY, record.to_string()).unwrap();
        let session = seeded(store);
        assert_eq!(session.state().roster.len(), 3);
        assert_eq!(session.state().remaining_ids.len(), 3);
        assert_eq!(session.state().pick_count, 3);

        let mut record = record;
        record["remainingIds"] = serde_json::json!(["03"]);
        record["pickedHistoryIds"] = serde_json::json!(["01", "02"]);
        record["currentPickIds"] = serde_json::json!(["01", "02"]);
        record["screen"] = serde_json::json!("RESULT");
        record["pickCount"] = serde_json::json!(2);

        let mut store = MemoryStore::new();
        store.set(STORAGE_KEY, record.to_string()).unwrap();
        let session = seeded(store);
        assert_eq!(session.state().picked_history_ids, ["01", "02"]);
        assert_eq!(session.state().screen, Screen::Result);
        assert_eq!(session.state().pick_count, 1);
    }

    #[test]
    fn initialize_after_draws_resets_every_field() {
        let mut session = seeded(MemoryStore::new());
        session.import_roster("Ann\nBob\nCara\nDan").unwrap();
        session.set_pick_input("3").unwrap();
        session.draw().unwrap();

        session.initialize().unwrap();
        let state = session.state();
        assert!(state.roster.is_empty());
        assert!(state.remaining_ids.is_empty());
        assert!(state.picked_history_ids.is_empty());
        assert!(state.current_pick_ids.is_empty());
        assert_eq!(state.screen, Screen::Start);
        assert_eq!(state.pick_count, 1);
        assert_eq!(stored(&session), *session.state());
    }

    /// Store whose writes fail while the shared flag is set.
    struct FlakyStore {
        inner: MemoryStore,
        failing: Rc<Cell<bool>>,
    }

    impl KeyValueStore for FlakyStore {
        fn get(&self, key: &str) -> Option<String> {
            self.inner.get(key)
        }

        fn set(&mut self, key: &str, value: String) -> Result<()> {
            if self.failing.get() {
                return Err(WhosNextError::Storage("disk full".to_string()));
            }
            self.inner.set(key, value)
        }
    }

    #[test]
    fn failed_write_rolls_transition_back() {
        let failing = Rc::new(Cell::new(false));
        let store = FlakyStore {
            inner: MemoryStore::new(),
            failing: Rc::clone(&failing),
        };
        let mut session = Session::load_with_rng(store, StdRng::seed_from_u64(8));
        session.import_roster("Ann\nBob\nCara").unwrap();
        let before = session.state().clone();

        failing.set(true);
        assert!(session.draw().is_err());
        assert_eq!(*session.state(), before);

        assert!(session.import_roster("Dan").is_err());
        assert_eq!(*session.state(), before);
        assert_eq!(session.name_of("01"), "Ann");

        assert!(session.set_pick_input("2").is_err());
        assert!(session.cycle_theme().is_err());
        assert!(session.initialize().is_err());
        assert_eq!(*session.state(), before);

        failing.set(false);
        assert!(matches!(session.draw().unwrap(), DrawOutcome::Drawn(_)));
        let raw = session.store().get(STORAGE_KEY).unwrap();
        let stored: SessionState = serde_json::from_str(&raw).unwrap();
        assert_eq!(stored, *session.state());
        assert_eq!(stored.picked_history_ids.len(), 1);
    }
}
