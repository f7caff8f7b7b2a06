//! Ports the engine consumes for persistence and sharing, plus the in-memory
//! adapters used in tests and embedding shells.

pub mod memory;
pub mod share;

use crate::domain::state::MatchState;

/// Narrow persistence contract: one active match and an ordered finished-match
/// history per user. Synchronous from the engine's point of view; anything
/// async or remote lives behind an adapter.
pub trait MatchStore {
    fn get_active(&self, user_id: &str) -> Option<MatchState>;
    fn set_active(&mut self, user_id: &str, state: &MatchState);
    fn clear_active(&mut self, user_id: &str);

    /// Finished matches, newest first.
    fn history(&self, user_id: &str) -> Vec<MatchState>;
    fn push_history(&mut self, user_id: &str, state: &MatchState);
    /// Replace a history entry by match id (post-hoc edits such as the
    /// man-of-the-match award).
    fn update_history(&mut self, user_id: &str, state: &MatchState);
    fn remove_history(&mut self, user_id: &str, match_id: &str);
}
