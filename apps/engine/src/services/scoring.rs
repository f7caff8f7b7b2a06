//! Scoring orchestration: one action in, one persisted snapshot out.
//!
//! Every mutation flows the same way: the pure engine produces the next
//! snapshot, the lifecycle check runs on it, the undo history records it, and
//! the store is brought up to date. Input is serialized by construction — each
//! call completes (and persists) before the next is accepted.

use tracing::{debug, info, warn};

use crate::domain::delivery::{apply_delivery, DeliveryAction};
use crate::domain::history::ScoringHistory;
use crate::domain::lifecycle::{
    check_transition, match_result, rename_player, set_man_of_the_match, start_second_innings,
    update_settings,
};
use crate::domain::overs::complete_over;
use crate::domain::players::Team;
use crate::domain::rules::MatchRules;
use crate::domain::setup::{start_chase, start_match};
use crate::domain::snapshot::{scorecard, ScorecardSnapshot};
use crate::domain::state::{GamePhase, MatchState, TossDecision};
use crate::error::AppError;
use crate::store::MatchStore;

pub struct ScoringService<S: MatchStore> {
    store: S,
    user_id: String,
    history: Option<ScoringHistory>,
}

impl<S: MatchStore> ScoringService<S> {
    /// Attach to a store, resuming the user's active match if one is saved.
    pub fn new(store: S, user_id: impl Into<String>) -> Self {
        let user_id = user_id.into();
        let history = store.get_active(&user_id).map(ScoringHistory::new);
        Self {
            store,
            user_id,
            history,
        }
    }

    pub fn active_match(&self) -> Option<&MatchState> {
        self.history.as_ref().map(ScoringHistory::latest)
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Start a full two-innings match and make it the active match.
    pub fn start_match(
        &mut self,
        team1: Team,
        team2: Team,
        max_overs: u32,
        toss_winner_id: &str,
        decision: TossDecision,
        rules: MatchRules,
    ) -> Result<&MatchState, AppError> {
        let state = start_match(team1, team2, max_overs, toss_winner_id, decision, rules)?;
        info!(match_id = %state.id, max_overs, "match started");
        self.adopt(state)
    }

    /// Start a chase-only match and make it the active match.
    pub fn start_chase(
        &mut self,
        chasing_team: Team,
        bowling_team: Team,
        target_runs: u32,
        target_overs: u32,
        rules: MatchRules,
    ) -> Result<&MatchState, AppError> {
        let state = start_chase(chasing_team, bowling_team, target_runs, target_overs, rules)?;
        info!(match_id = %state.id, target_runs, target_overs, "chase started");
        self.adopt(state)
    }

    /// Apply one ball-level action.
    pub fn apply(&mut self, action: &DeliveryAction) -> Result<&MatchState, AppError> {
        let current = self.require_active()?;
        let next = match apply_delivery(current, action) {
            Ok(next) => next,
            Err(err) => {
                warn!(action = ?action, %err, "action rejected");
                return Err(err.into());
            }
        };
        self.commit(next)
    }

    /// Close the finished over and hand the ball to the next bowler.
    pub fn complete_over(&mut self, new_bowler_id: &str) -> Result<&MatchState, AppError> {
        let current = self.require_active()?;
        let next = complete_over(current, new_bowler_id)?;
        debug!(bowler = new_bowler_id, "over complete");
        self.commit(next)
    }

    /// Begin the chase with the confirmed target.
    pub fn start_second_innings(
        &mut self,
        target_runs: u32,
        target_overs: u32,
    ) -> Result<&MatchState, AppError> {
        let current = self.require_active()?;
        let next = start_second_innings(current, target_runs, target_overs)?;
        info!(match_id = %next.id, target_runs, target_overs, "second innings started");
        self.commit(next)
    }

    /// Undo the last scoring action of the current innings. Reverting a
    /// finish is reserved for `undo_finish`, which also unarchives the match.
    pub fn undo(&mut self) -> Result<&MatchState, AppError> {
        let history = self.history.as_mut().ok_or_else(Self::no_active)?;
        if history.latest().game_state == GamePhase::Finished {
            return Err(AppError::validation(
                "PHASE_MISMATCH",
                "Match is finished; revert the finish instead",
            ));
        }
        let state = history.undo().clone();
        self.store.set_active(&self.user_id, &state);
        self.require_active()
    }

    /// Revert a just-finished match to its last in-progress state.
    pub fn undo_finish(&mut self) -> Result<&MatchState, AppError> {
        let history = self.history.as_mut().ok_or_else(Self::no_active)?;
        let finished_id = history.latest().id.clone();
        let Some(reverted) = history.undo_finish() else {
            return Err(AppError::validation(
                "PHASE_MISMATCH",
                "No finished match to revert",
            ));
        };
        let reverted = reverted.clone();
        info!(match_id = %finished_id, "finish reverted");
        self.store.remove_history(&self.user_id, &finished_id);
        self.store.set_active(&self.user_id, &reverted);
        self.require_active()
    }

    /// Award man of the match on the finished game; updates stored history.
    pub fn set_man_of_the_match(&mut self, player_id: &str) -> Result<&MatchState, AppError> {
        let current = self.require_active()?;
        let next = set_man_of_the_match(current, player_id)?;
        self.commit(next)
    }

    /// Edit a player's display name everywhere it appears.
    pub fn rename_player(&mut self, player_id: &str, new_name: &str) -> Result<&MatchState, AppError> {
        let current = self.require_active()?;
        let next = rename_player(current, player_id, new_name)?;
        self.commit(next)
    }

    /// Mid-match settings edit.
    pub fn update_settings(
        &mut self,
        max_overs: u32,
        target: Option<u32>,
        target_overs: Option<u32>,
    ) -> Result<&MatchState, AppError> {
        let current = self.require_active()?;
        let next = update_settings(current, max_overs, target, target_overs)?;
        self.commit(next)
    }

    /// Read-only scorecard of the active match.
    pub fn scorecard(&self) -> Option<ScorecardSnapshot> {
        self.active_match().map(scorecard)
    }

    fn adopt(&mut self, state: MatchState) -> Result<&MatchState, AppError> {
        let state = check_transition(&state);
        self.store.set_active(&self.user_id, &state);
        self.history = Some(ScoringHistory::new(state));
        self.require_active()
    }

    /// Record the post-action snapshot, run the lifecycle check, and persist.
    ///
    /// The archive push happens only on the transition into `Finished`; an
    /// edit to an already-finished match replaces its archive entry in place.
    fn commit(&mut self, state: MatchState) -> Result<&MatchState, AppError> {
        let state = check_transition(&state);
        let history = self.history.as_mut().ok_or_else(Self::no_active)?;
        let was_finished = history.latest().game_state == GamePhase::Finished;

        match state.game_state {
            GamePhase::Finished if was_finished => {
                self.store.update_history(&self.user_id, &state);
            }
            GamePhase::Finished => {
                info!(match_id = %state.id, result = %match_result(&state), "match finished");
                self.store.push_history(&self.user_id, &state);
                self.store.clear_active(&self.user_id);
            }
            GamePhase::InningsBreak => {
                info!(match_id = %state.id, score = state.innings[0].score, "innings break");
                self.store.set_active(&self.user_id, &state);
            }
            GamePhase::InProgress => {
                self.store.set_active(&self.user_id, &state);
            }
        }
        history.record(state);
        Ok(history.latest())
    }

    fn require_active(&self) -> Result<&MatchState, AppError> {
        self.active_match().ok_or_else(Self::no_active)
    }

    fn no_active() -> AppError {
        AppError::NotFound {
            code: "MATCH_NOT_FOUND",
            detail: "No active match".to_string(),
        }
    }
}
