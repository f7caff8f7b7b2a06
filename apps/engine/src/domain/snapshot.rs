//! Read-only scorecard view for renderers and spectators.
//!
//! Everything here is derived; nothing writes back to match state. The
//! placeholder first innings of a chase-only match is omitted, since it holds
//! no real ball-by-ball data.

use serde::Serialize;

use crate::domain::lifecycle::match_result;
use crate::domain::players::{Batsman, Bowler};
use crate::domain::rules::BALLS_PER_OVER;
use crate::domain::state::{Extras, GamePhase, Innings, MatchState};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScorecardSnapshot {
    pub match_id: String,
    pub result: String,
    pub innings: Vec<InningsCard>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub man_of_the_match: Option<String>,
    /// Present only while a chase is in progress.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chase: Option<ChaseCard>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InningsCard {
    pub batting_team: String,
    pub bowling_team: String,
    pub score: u32,
    pub wickets: u8,
    pub overs: String,
    pub run_rate: f64,
    pub extras: Extras,
    pub extras_total: u32,
    pub batting: Vec<BattingLine>,
    pub bowling: Vec<BowlingLine>,
    pub fall_of_wickets: Vec<FallOfWicketLine>,
    /// Tokens of the over in progress, newest last.
    pub this_over: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BattingLine {
    pub name: String,
    pub how_out: String,
    pub runs: u32,
    pub balls: u32,
    pub fours: u32,
    pub sixes: u32,
    pub strike_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BowlingLine {
    pub name: String,
    pub overs: String,
    pub maidens: u32,
    pub runs_conceded: u32,
    pub wickets: u32,
    pub economy: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FallOfWicketLine {
    pub wicket: usize,
    pub score: u32,
    pub overs: String,
    pub batsman: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChaseCard {
    pub target: u32,
    pub runs_needed: u32,
    pub balls_remaining: u32,
    pub current_run_rate: f64,
    pub required_run_rate: f64,
}

/// Build the full scorecard for a match in any phase.
pub fn scorecard(state: &MatchState) -> ScorecardSnapshot {
    let innings = state
        .innings
        .iter()
        .enumerate()
        .filter(|(idx, _)| !(state.is_chase_only && *idx == 0))
        .map(|(_, innings)| innings_card(state, innings))
        .collect();

    let man_of_the_match = state
        .man_of_the_match_id
        .as_deref()
        .and_then(|id| state.team1.player(id).or_else(|| state.team2.player(id)))
        .map(|p| p.name.clone());

    ScorecardSnapshot {
        match_id: state.id.clone(),
        result: match_result(state).to_string(),
        innings,
        man_of_the_match,
        chase: chase_card(state),
    }
}

fn innings_card(state: &MatchState, innings: &Innings) -> InningsCard {
    InningsCard {
        batting_team: state
            .batting_team(innings)
            .map(|t| t.name.clone())
            .unwrap_or_default(),
        bowling_team: state
            .bowling_team(innings)
            .map(|t| t.name.clone())
            .unwrap_or_default(),
        score: innings.score,
        wickets: innings.wickets,
        overs: format_overs(innings.overs, innings.balls),
        run_rate: run_rate(innings.score, innings.overs, innings.balls),
        extras: innings.extras,
        extras_total: innings.extras.total(),
        batting: innings.batsmen.iter().map(batting_line).collect(),
        bowling: innings.bowlers.iter().map(bowling_line).collect(),
        fall_of_wickets: innings
            .fall_of_wickets
            .iter()
            .enumerate()
            .map(|(i, fow)| FallOfWicketLine {
                wicket: i + 1,
                score: fow.score,
                overs: format_overs(fow.overs, fow.balls),
                batsman: fow.player.player.name.clone(),
            })
            .collect(),
        this_over: innings
            .current_over()
            .map(|over| over.iter().map(|t| t.to_string()).collect())
            .unwrap_or_default(),
    }
}

fn batting_line(b: &Batsman) -> BattingLine {
    BattingLine {
        name: b.player.name.clone(),
        how_out: how_out(b),
        runs: b.runs,
        balls: b.balls,
        fours: b.fours,
        sixes: b.sixes,
        strike_rate: b.strike_rate(),
    }
}

fn how_out(b: &Batsman) -> String {
    match &b.dismissal {
        None => "not out".to_string(),
        Some(d) => match &d.fielder {
            Some(fielder) => format!("{} ({}) b {}", d.kind, fielder.name, d.bowler.name),
            None => format!("{} b {}", d.kind, d.bowler.name),
        },
    }
}

fn bowling_line(b: &Bowler) -> BowlingLine {
    BowlingLine {
        name: b.player.name.clone(),
        overs: format_overs(b.overs, b.balls),
        maidens: b.maidens,
        runs_conceded: b.runs_conceded,
        wickets: b.wickets,
        economy: b.economy(),
    }
}

fn chase_card(state: &MatchState) -> Option<ChaseCard> {
    if state.game_state != GamePhase::InProgress || state.current_innings != 2 {
        return None;
    }
    let target = state.target?;
    let innings = state.innings_in_play();

    let runs_needed = target.saturating_sub(innings.score);
    let total_balls = state.overs_limit() * u32::from(BALLS_PER_OVER);
    let balls_bowled = innings.overs * u32::from(BALLS_PER_OVER) + u32::from(innings.balls);
    let balls_remaining = total_balls.saturating_sub(balls_bowled);
    let required_run_rate = if balls_remaining == 0 {
        0.0
    } else {
        runs_needed as f64 * 6.0 / balls_remaining as f64
    };

    Some(ChaseCard {
        target,
        runs_needed,
        balls_remaining,
        current_run_rate: run_rate(innings.score, innings.overs, innings.balls),
        required_run_rate,
    })
}

pub fn format_overs(overs: u32, balls: u8) -> String {
    format!("{overs}.{balls}")
}

fn run_rate(score: u32, overs: u32, balls: u8) -> f64 {
    let total_balls = overs * u32::from(BALLS_PER_OVER) + u32::from(balls);
    if total_balls == 0 {
        return 0.0;
    }
    score as f64 * 6.0 / total_balls as f64
}
