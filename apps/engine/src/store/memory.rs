//! In-memory `MatchStore` adapter.

use std::collections::HashMap;

use crate::domain::state::MatchState;
use crate::store::MatchStore;

#[derive(Debug, Default)]
pub struct MemoryStore {
    active: HashMap<String, MatchState>,
    history: HashMap<String, Vec<MatchState>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl MatchStore for MemoryStore {
    fn get_active(&self, user_id: &str) -> Option<MatchState> {
        self.active.get(user_id).cloned()
    }

    fn set_active(&mut self, user_id: &str, state: &MatchState) {
        self.active.insert(user_id.to_string(), state.clone());
    }

    fn clear_active(&mut self, user_id: &str) {
        self.active.remove(user_id);
    }

    fn history(&self, user_id: &str) -> Vec<MatchState> {
        self.history.get(user_id).cloned().unwrap_or_default()
    }

    fn push_history(&mut self, user_id: &str, state: &MatchState) {
        self.history
            .entry(user_id.to_string())
            .or_default()
            .insert(0, state.clone());
    }

    fn update_history(&mut self, user_id: &str, state: &MatchState) {
        if let Some(entries) = self.history.get_mut(user_id) {
            for entry in entries.iter_mut() {
                if entry.id == state.id {
                    *entry = state.clone();
                }
            }
        }
    }

    fn remove_history(&mut self, user_id: &str, match_id: &str) {
        if let Some(entries) = self.history.get_mut(user_id) {
            entries.retain(|m| m.id != match_id);
        }
    }
}
