//! Player-level entities: rosters, batting and bowling cards, dismissals.

use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::{Deserialize, Serialize};

use crate::domain::rules::BALLS_PER_OVER;

/// Opaque player identity, supplied by the roster provider at match setup.
pub type PlayerId = String;

/// Sentinel bowler id carried by retirement dismissal records.
pub const RETIRED_SENTINEL: &str = "retired";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
}

impl Player {
    /// Dismissal credit used for retirements, where no bowler earns the wicket.
    pub fn retired() -> Self {
        Self {
            id: RETIRED_SENTINEL.to_string(),
            name: RETIRED_SENTINEL.to_string(),
        }
    }
}

/// Fixed roster of eleven; only player names may change after setup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub id: String,
    pub name: String,
    pub players: Vec<Player>,
}

impl Team {
    pub fn player(&self, id: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DismissalKind {
    Bowled,
    Caught,
    #[serde(rename = "LBW")]
    Lbw,
    #[serde(rename = "Run Out")]
    RunOut,
    Stumped,
    #[serde(rename = "Hit Wicket")]
    HitWicket,
    #[serde(rename = "Retired Out")]
    RetiredOut,
    #[serde(rename = "Timed Out")]
    TimedOut,
}

impl DismissalKind {
    /// Whether the bowler is credited the wicket for this dismissal.
    pub fn credits_bowler(self) -> bool {
        !matches!(
            self,
            DismissalKind::RunOut | DismissalKind::RetiredOut | DismissalKind::TimedOut
        )
    }

    /// Whether a legal delivery is consumed. Only retirements leave the ball
    /// count untouched.
    pub fn consumes_ball(self) -> bool {
        self != DismissalKind::RetiredOut
    }
}

impl Display for DismissalKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let s = match self {
            DismissalKind::Bowled => "Bowled",
            DismissalKind::Caught => "Caught",
            DismissalKind::Lbw => "LBW",
            DismissalKind::RunOut => "Run Out",
            DismissalKind::Stumped => "Stumped",
            DismissalKind::HitWicket => "Hit Wicket",
            DismissalKind::RetiredOut => "Retired Out",
            DismissalKind::TimedOut => "Timed Out",
        };
        write!(f, "{s}")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dismissal {
    #[serde(rename = "type")]
    pub kind: DismissalKind,
    pub bowler: Player,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fielder: Option<Player>,
}

/// One batting card entry. Created when the player comes to the crease and
/// never removed, only marked out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Batsman {
    #[serde(flatten)]
    pub player: Player,
    pub runs: u32,
    /// Legal deliveries faced.
    pub balls: u32,
    pub fours: u32,
    pub sixes: u32,
    pub on_strike: bool,
    pub out: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dismissal: Option<Dismissal>,
}

impl Batsman {
    pub fn new(player: Player, on_strike: bool) -> Self {
        Self {
            player,
            runs: 0,
            balls: 0,
            fours: 0,
            sixes: 0,
            on_strike,
            out: false,
            dismissal: None,
        }
    }

    pub fn strike_rate(&self) -> f64 {
        if self.balls == 0 {
            return 0.0;
        }
        (self.runs as f64 / self.balls as f64) * 100.0
    }
}

/// One bowling card entry, accumulated across every spell in the innings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bowler {
    #[serde(flatten)]
    pub player: Player,
    /// Completed overs.
    pub overs: u32,
    /// Legal deliveries bowled in the current over (0..=5 at rest).
    pub balls: u8,
    pub maidens: u32,
    pub runs_conceded: u32,
    pub wickets: u32,
}

impl Bowler {
    pub fn new(player: Player) -> Self {
        Self {
            player,
            overs: 0,
            balls: 0,
            maidens: 0,
            runs_conceded: 0,
            wickets: 0,
        }
    }

    pub fn economy(&self) -> f64 {
        let total_balls = self.overs * u32::from(BALLS_PER_OVER) + u32::from(self.balls);
        if total_balls == 0 {
            return 0.0;
        }
        self.runs_conceded as f64 * 6.0 / total_balls as f64
    }
}

/// Immutable record of the moment a batsman left the crease, in arrival order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FallOfWicket {
    pub score: u32,
    pub overs: u32,
    pub balls: u8,
    pub player: Batsman,
}
