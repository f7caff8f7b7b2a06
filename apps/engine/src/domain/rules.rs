use serde::{Deserialize, Serialize};

pub const TEAM_SIZE: usize = 11;
pub const BALLS_PER_OVER: u8 = 6;
pub const MAX_WICKETS: u8 = 10;
pub const MAX_RUNS_OFF_BAT: u8 = 6;

/// Configurable scoring conventions that the laws leave to the match format
/// or that the engine deliberately does not hard-code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MatchRules {
    /// Roster slot (0-based) handed the ball for the first over of an innings.
    /// The conventional default is the 11th player.
    pub opening_bowler_slot: usize,
    /// Reject a bowler bowling two consecutive overs. Off by default: many
    /// casual formats ignore the law, and the scorer can always pick someone
    /// else.
    pub enforce_bowler_change: bool,
}

impl Default for MatchRules {
    fn default() -> Self {
        Self {
            opening_bowler_slot: TEAM_SIZE - 1,
            enforce_bowler_change: false,
        }
    }
}
