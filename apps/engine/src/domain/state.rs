//! Match and innings state containers, sufficient for pure scoring operations.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::domain::players::{Batsman, Bowler, FallOfWicket, PlayerId, Team};
use crate::domain::rules::{MatchRules, BALLS_PER_OVER};
use crate::domain::tokens::BallToken;
use crate::errors::domain::DomainError;

/// Overall match progression phases.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GamePhase {
    /// Balls are being bowled in the current innings.
    InProgress,
    /// First innings over; waiting for the target and the second innings start.
    InningsBreak,
    /// Match decided. Immutable except for the man-of-the-match assignment.
    Finished,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TossDecision {
    Bat,
    Bowl,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Toss {
    pub winner_id: String,
    pub decision: TossDecision,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Extras {
    pub wides: u32,
    pub no_balls: u32,
    pub byes: u32,
    pub leg_byes: u32,
    pub penalty: u32,
}

impl Extras {
    pub fn total(&self) -> u32 {
        self.wides + self.no_balls + self.byes + self.leg_byes + self.penalty
    }
}

/// One team's turn at batting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Innings {
    pub batting_team_id: String,
    pub bowling_team_id: String,
    pub score: u32,
    pub wickets: u8,
    /// Completed overs.
    pub overs: u32,
    /// Legal deliveries in the current over (0..=5 at rest; 6 demands an
    /// over transition before the next legal ball).
    pub balls: u8,
    /// Ordered overs, each an ordered sequence of ball tokens.
    pub timeline: Vec<Vec<BallToken>>,
    pub batsmen: Vec<Batsman>,
    pub bowlers: Vec<Bowler>,
    pub fall_of_wickets: Vec<FallOfWicket>,
    pub extras: Extras,
    pub current_striker_id: PlayerId,
    pub current_non_striker_id: PlayerId,
    pub current_bowler_id: PlayerId,
}

impl Innings {
    /// Empty innings shell with no batsmen or bowlers seeded yet.
    pub fn skeleton(batting_team_id: impl Into<String>, bowling_team_id: impl Into<String>) -> Self {
        Self {
            batting_team_id: batting_team_id.into(),
            bowling_team_id: bowling_team_id.into(),
            score: 0,
            wickets: 0,
            overs: 0,
            balls: 0,
            timeline: vec![Vec::new()],
            batsmen: Vec::new(),
            bowlers: Vec::new(),
            fall_of_wickets: Vec::new(),
            extras: Extras::default(),
            current_striker_id: String::new(),
            current_non_striker_id: String::new(),
            current_bowler_id: String::new(),
        }
    }

    pub fn batsman(&self, id: &str) -> Option<&Batsman> {
        self.batsmen.iter().find(|b| b.player.id == id)
    }

    pub fn batsman_mut(&mut self, id: &str) -> Option<&mut Batsman> {
        self.batsmen.iter_mut().find(|b| b.player.id == id)
    }

    pub fn bowler(&self, id: &str) -> Option<&Bowler> {
        self.bowlers.iter().find(|b| b.player.id == id)
    }

    pub fn bowler_mut(&mut self, id: &str) -> Option<&mut Bowler> {
        self.bowlers.iter_mut().find(|b| b.player.id == id)
    }

    pub fn striker(&self) -> Option<&Batsman> {
        self.batsman(&self.current_striker_id)
    }

    pub fn non_striker(&self) -> Option<&Batsman> {
        self.batsman(&self.current_non_striker_id)
    }

    pub fn current_bowler(&self) -> Option<&Bowler> {
        self.bowler(&self.current_bowler_id)
    }

    /// The over currently being bowled (always present once the innings is
    /// seeded; placeholder innings have no overs at all).
    pub fn current_over(&self) -> Option<&Vec<BallToken>> {
        self.timeline.last()
    }

    pub fn push_token(&mut self, token: BallToken) {
        if let Some(over) = self.timeline.last_mut() {
            over.push(token);
        }
    }

    /// Count of legal deliveries recorded across the whole timeline. Must
    /// equal `overs * 6 + balls` after every action.
    pub fn legal_ball_count(&self) -> u32 {
        self.timeline
            .iter()
            .flatten()
            .filter(|t| t.is_legal_delivery())
            .count() as u32
    }

    /// Ends-change / strike-rotation swap. Restores the single-striker
    /// invariant before returning.
    pub fn swap_strike(&mut self) {
        let striker_id = self.current_striker_id.clone();
        let non_striker_id = self.current_non_striker_id.clone();
        if let Some(b) = self.batsman_mut(&striker_id) {
            b.on_strike = false;
        }
        if let Some(b) = self.batsman_mut(&non_striker_id) {
            b.on_strike = true;
        }
        self.current_striker_id = non_striker_id;
        self.current_non_striker_id = striker_id;
    }

    pub fn over_is_complete(&self) -> bool {
        self.balls >= BALLS_PER_OVER
    }
}

/// Entire match container; the unit of snapshotting for undo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchState {
    pub id: String,
    pub game_state: GamePhase,
    pub team1: Team,
    pub team2: Team,
    pub max_overs: u32,
    /// One entry per innings; the second appears at the innings break.
    pub innings: Vec<Innings>,
    /// 1-based index of the innings being played.
    pub current_innings: u8,
    pub toss: Toss,
    pub target: Option<u32>,
    pub target_overs: Option<u32>,
    #[serde(default)]
    pub is_chase_only: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub man_of_the_match_id: Option<PlayerId>,
    #[serde(default)]
    pub rules: MatchRules,
    pub created_at: OffsetDateTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ended_at: Option<OffsetDateTime>,
}

impl MatchState {
    pub fn innings_in_play(&self) -> &Innings {
        &self.innings[usize::from(self.current_innings) - 1]
    }

    pub fn innings_in_play_mut(&mut self) -> &mut Innings {
        &mut self.innings[usize::from(self.current_innings) - 1]
    }

    pub fn team_by_id(&self, id: &str) -> Option<&Team> {
        if self.team1.id == id {
            Some(&self.team1)
        } else if self.team2.id == id {
            Some(&self.team2)
        } else {
            None
        }
    }

    pub fn batting_team(&self, innings: &Innings) -> Option<&Team> {
        self.team_by_id(&innings.batting_team_id)
    }

    pub fn bowling_team(&self, innings: &Innings) -> Option<&Team> {
        self.team_by_id(&innings.bowling_team_id)
    }

    /// Overs limit for the innings in play: `max_overs` for the first,
    /// `target_overs` (falling back to `max_overs`) for the chase.
    pub fn overs_limit(&self) -> u32 {
        if self.current_innings == 1 {
            self.max_overs
        } else {
            self.target_overs.unwrap_or(self.max_overs)
        }
    }
}

pub fn require_striker<'a>(
    innings: &'a mut Innings,
    ctx: &'static str,
) -> Result<&'a mut Batsman, DomainError> {
    let id = innings.current_striker_id.clone();
    innings.batsman_mut(&id).ok_or_else(|| {
        DomainError::validation_other(format!("Invariant violated: striker must be set ({ctx})"))
    })
}

pub fn require_bowler<'a>(
    innings: &'a mut Innings,
    ctx: &'static str,
) -> Result<&'a mut Bowler, DomainError> {
    let id = innings.current_bowler_id.clone();
    innings.bowler_mut(&id).ok_or_else(|| {
        DomainError::validation_other(format!("Invariant violated: bowler must be set ({ctx})"))
    })
}
