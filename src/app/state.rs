//! The persisted session record and its transitions.
//!
//! [`SessionState`] is the single source of truth for a drawing session: the
//! imported roster, the pool of entrants not yet drawn, the draw history, and
//! the current screen. It serializes to exactly the JSON record that is
//! persisted, field for field.
//!
//! Every method here is a pure in-memory transition. Persisting after each
//! transition is the job of [`Session`](crate::app::Session).
//!
//! # Invariants
//!
//! After any completed transition:
//! - roster ids are unique
//! - `remaining_ids` and `picked_history_ids` partition the roster ids
//! - `current_pick_ids` is the most recent suffix of `picked_history_ids`
//! - `1 <= pick_count <= max(1, remaining_ids.len())`
//!
//! [`SessionState::check_invariants`] verifies all of them and is used to
//! reject damaged records on load.

use super::modes::Screen;
use crate::domain::{clamp_pick_count, draw, normalize_pick_input, Entrant};
use crate::ui::theme::THEMES;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Schema version this build reads and writes.
pub const SCHEMA_VERSION: u32 = 1;

/// Outcome of a draw request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawOutcome {
    /// Entrants were drawn; holds their ids in draw order.
    Drawn(Vec<String>),
    /// Nothing to draw from: no roster has been imported.
    NoRoster,
    /// Every entrant has already been drawn.
    Exhausted,
}

/// The complete, persisted state of one drawing session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionState {
    pub schema_version: u32,
    pub roster: Vec<Entrant>,
    pub remaining_ids: Vec<String>,
    pub picked_history_ids: Vec<String>,
    pub current_pick_ids: Vec<String>,
    pub pick_count: usize,
    pub theme_index: usize,
    pub screen: Screen,
    /// Milliseconds since the Unix epoch of the last persisted write.
    pub updated_at: i64,
}

impl Default for SessionState {
    fn default() -> Self {
        Self::fresh()
    }
}

impl SessionState {
    /// Creates a fresh session: empty roster, start screen, pick count 1.
    #[must_use]
    pub fn fresh() -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            roster: Vec::new(),
            remaining_ids: Vec::new(),
            picked_history_ids: Vec::new(),
            current_pick_ids: Vec::new(),
            pick_count: 1,
            theme_index: 0,
            screen: Screen::Start,
            updated_at: chrono::Utc::now().timestamp_millis(),
        }
    }

    #[must_use]
    pub fn has_roster(&self) -> bool {
        !self.roster.is_empty()
    }

    /// Largest pick count currently allowed.
    #[must_use]
    pub fn max_pick_count(&self) -> usize {
        self.remaining_ids.len().max(1)
    }

    /// Clamps the pick count into `[1, max(1, remaining)]`.
    pub fn clamp_pick_count_to_pool(&mut self) {
        let requested = i64::try_from(self.pick_count).unwrap_or(i64::MAX);
        self.pick_count = clamp_pick_count(requested, self.remaining_ids.len());
    }

    /// Replaces the roster and restarts the lottery over it.
    ///
    /// The pick count keeps its previous value, clamped to the new pool size.
    /// An empty roster clears the list.
    pub fn apply_roster(&mut self, roster: Vec<Entrant>) {
        self.remaining_ids = roster.iter().map(|entrant| entrant.id.clone()).collect();
        self.roster = roster;
        self.picked_history_ids.clear();
        self.current_pick_ids.clear();
        self.screen = Screen::Start;
        self.clamp_pick_count_to_pool();

        tracing::debug!(
            entrants = self.roster.len(),
            pick_count = self.pick_count,
            "roster applied"
        );
    }

    /// Restarts the lottery while keeping the current roster.
    pub fn reset_draws(&mut self) {
        self.remaining_ids = self.roster.iter().map(|entrant| entrant.id.clone()).collect();
        self.picked_history_ids.clear();
        self.current_pick_ids.clear();
        self.screen = Screen::Start;
        self.clamp_pick_count_to_pool();

        tracing::debug!(entrants = self.roster.len(), "draws reset");
    }

    /// Returns from the result screen to the start screen.
    ///
    /// Clears the current pick but keeps the history. Returns `false` and
    /// changes nothing if the session is already on the start screen.
    pub fn acknowledge(&mut self) -> bool {
        if self.screen != Screen::Result {
            return false;
        }
        self.screen = Screen::Start;
        self.current_pick_ids.clear();
        true
    }

    /// Sets the pick count from raw input text. Returns the stored value.
    pub fn set_pick_input(&mut self, raw: &str) -> usize {
        self.pick_count = normalize_pick_input(raw, self.remaining_ids.len());
        self.pick_count
    }

    /// Advances to the next colour theme. Returns the new theme index.
    pub fn cycle_theme(&mut self) -> usize {
        self.theme_index = (self.theme_index % THEMES.len() + 1) % THEMES.len();
        self.theme_index
    }

    /// Draws the next batch of entrants.
    ///
    /// On success the picked ids are appended to the history, become the
    /// current pick, leave the pool, and the screen switches to the result.
    /// Nothing changes when there is no roster or the pool is exhausted.
    pub fn draw_with<R: Rng + ?Sized>(&mut self, rng: &mut R) -> DrawOutcome {
        if !self.has_roster() {
            return DrawOutcome::NoRoster;
        }

        let count = clamp_pick_count(
            i64::try_from(self.pick_count).unwrap_or(i64::MAX),
            self.remaining_ids.len(),
        );

        let Some(result) = draw(&self.remaining_ids, count, rng) else {
            return DrawOutcome::Exhausted;
        };

        self.remaining_ids = result.remaining;
        self.picked_history_ids.extend(result.picked.iter().cloned());
        self.current_pick_ids.clone_from(&result.picked);
        self.screen = Screen::Result;
        self.pick_count = count;
        self.clamp_pick_count_to_pool();

        tracing::debug!(
            picked = result.picked.len(),
            remaining = self.remaining_ids.len(),
            drawn_total = self.picked_history_ids.len(),
            "entrants drawn"
        );

        DrawOutcome::Drawn(result.picked)
    }

    /// Verifies the record invariants.
    ///
    /// # Errors
    ///
    /// Returns a description of the first violated invariant.
    pub fn check_invariants(&self) -> Result<(), String> {
        let mut roster_ids = HashSet::with_capacity(self.roster.len());
        for entrant in &self.roster {
            if !roster_ids.insert(entrant.id.as_str()) {
                return Err(format!("duplicate roster id {}", entrant.id));
            }
        }

        if self.remaining_ids.len() + self.picked_history_ids.len() != self.roster.len() {
            return Err(format!(
                "pool ({}) and history ({}) do not add up to roster ({})",
                self.remaining_ids.len(),
                self.picked_history_ids.len(),
                self.roster.len()
            ));
        }

        let mut seen = HashSet::with_capacity(self.roster.len());
        for id in self.remaining_ids.iter().chain(&self.picked_history_ids) {
            if !roster_ids.contains(id.as_str()) {
                return Err(format!("id {id} is not in the roster"));
            }
            if !seen.insert(id.as_str()) {
                return Err(format!("id {id} appears more than once"));
            }
        }

        if !self.picked_history_ids.ends_with(&self.current_pick_ids) {
            return Err("current pick is not the tail of the history".to_string());
        }

        if self.pick_count == 0 || self.pick_count > self.max_pick_count() {
            return Err(format!(
                "pick count {} outside 1..={}",
                self.pick_count,
                self.max_pick_count()
            ));
        }

        Ok(())
    }
}
