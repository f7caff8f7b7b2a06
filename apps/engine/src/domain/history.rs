//! Per-innings undo log: an append-only sequence of full match snapshots.
//!
//! Undo granularity is one user-visible scoring action. The log is scoped to
//! an innings; recording a snapshot from a different innings starts a fresh
//! sequence, so undo can never cross the innings boundary.

use tracing::debug;

use crate::domain::state::{GamePhase, MatchState};

#[derive(Debug, Clone)]
pub struct ScoringHistory {
    match_id: String,
    innings_no: u8,
    states: Vec<MatchState>,
}

impl ScoringHistory {
    pub fn new(initial: MatchState) -> Self {
        Self {
            match_id: initial.id.clone(),
            innings_no: initial.current_innings,
            states: vec![initial],
        }
    }

    pub fn latest(&self) -> &MatchState {
        // Non-empty by construction: new() seeds one entry and undo() never
        // pops the last one.
        &self.states[self.states.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn can_undo(&self) -> bool {
        self.states.len() > 1
    }

    /// Append one action's resulting snapshot. A snapshot from a later innings
    /// resets the log to that snapshot alone.
    pub fn record(&mut self, state: MatchState) {
        if state.id != self.match_id || state.current_innings != self.innings_no {
            debug!(
                match_id = %state.id,
                innings = state.current_innings,
                "history reset for new innings"
            );
            self.match_id = state.id.clone();
            self.innings_no = state.current_innings;
            self.states = vec![state];
            return;
        }
        self.states.push(state);
    }

    /// Pop the last action. A no-op at the innings' first snapshot: undo never
    /// reaches back past the innings start.
    pub fn undo(&mut self) -> &MatchState {
        if self.states.len() > 1 {
            self.states.pop();
            debug!(match_id = %self.match_id, depth = self.states.len(), "undo");
        }
        self.latest()
    }

    /// One-shot soft undo of a finish: if the latest snapshot is a finished
    /// match, pop it and surface the last in-progress state. Not a redo stack.
    pub fn undo_finish(&mut self) -> Option<&MatchState> {
        if self.latest().game_state != GamePhase::Finished || self.states.len() <= 1 {
            return None;
        }
        self.states.pop();
        debug!(match_id = %self.match_id, "finish reverted");
        Some(self.latest())
    }
}
