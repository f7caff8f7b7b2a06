//! Innings lifecycle: end-of-innings detection, the innings handoff, and the
//! handful of whole-match mutations that live outside ball-by-ball scoring.

use std::fmt::{Display, Formatter, Result as FmtResult};

use time::OffsetDateTime;

use crate::domain::players::Batsman;
use crate::domain::rules::MAX_WICKETS;
use crate::domain::setup::seed_innings;
use crate::domain::state::{GamePhase, Innings, MatchState};
use crate::errors::domain::{DomainError, ValidationKind};

/// Check end-of-innings conditions and transition if one holds.
///
/// Idempotent: applying it twice without an intervening action is the same as
/// applying it once. Conditions in priority order: target reached (second
/// innings, even mid-over), all out, overs exhausted.
pub fn check_transition(state: &MatchState) -> MatchState {
    if state.game_state != GamePhase::InProgress {
        return state.clone();
    }

    let innings = state.innings_in_play();
    let target_reached = state.current_innings == 2
        && state.target.map(|t| innings.score >= t).unwrap_or(false);
    let all_out = innings.wickets >= MAX_WICKETS;
    let overs_done = innings.overs >= state.overs_limit();

    if !(target_reached || all_out || overs_done) {
        return state.clone();
    }

    let mut next = state.clone();
    if next.current_innings == 1 {
        next.game_state = GamePhase::InningsBreak;
        let first = &next.innings[0];
        let second = Innings::skeleton(first.bowling_team_id.clone(), first.batting_team_id.clone());
        next.innings.push(second);
        next.current_innings = 2;
    } else {
        next.game_state = GamePhase::Finished;
        next.ended_at = Some(OffsetDateTime::now_utc());
    }
    next
}

/// The target a straight chase of the first innings implies.
pub fn default_target(state: &MatchState) -> u32 {
    state.innings[0].score + 1
}

/// Begin the second innings with an externally supplied target.
///
/// Distinct from the automatic break detection: the scorer confirms (or
/// adjusts) the target and overs before the chase starts.
pub fn start_second_innings(
    state: &MatchState,
    target_runs: u32,
    target_overs: u32,
) -> Result<MatchState, DomainError> {
    if state.game_state != GamePhase::InningsBreak || state.current_innings != 2 {
        return Err(DomainError::validation(
            ValidationKind::PhaseMismatch,
            "Second innings can only start from the innings break",
        ));
    }
    if target_runs == 0 {
        return Err(DomainError::validation(
            ValidationKind::InvalidTarget,
            "Target must be at least one run",
        ));
    }
    if target_overs == 0 {
        return Err(DomainError::validation(
            ValidationKind::InvalidOvers,
            "Chase must be at least one over",
        ));
    }

    let second = &state.innings[1];
    let batting = state
        .batting_team(second)
        .ok_or_else(|| DomainError::validation_other("Unknown batting team id"))?;
    let bowling = state
        .bowling_team(second)
        .ok_or_else(|| DomainError::validation_other("Unknown bowling team id"))?;
    let seeded = seed_innings(batting, bowling, &state.rules)?;

    let mut next = state.clone();
    next.game_state = GamePhase::InProgress;
    next.target = Some(target_runs);
    next.target_overs = Some(target_overs);
    next.innings[1] = seeded;
    Ok(next)
}

/// How the match ended, derived from the two-innings comparison.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchResult {
    InProgress,
    /// Single-innings match with no target to compare against.
    WonByDefault { team: String },
    WonByWickets { team: String, margin: u8 },
    WonByRuns { team: String, margin: u32 },
    Tied,
}

impl Display for MatchResult {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            MatchResult::InProgress => write!(f, "Match in progress"),
            MatchResult::WonByDefault { team } => {
                write!(f, "{team} won by default (match format)")
            }
            MatchResult::WonByWickets { team, margin } => {
                let s = if *margin == 1 { "" } else { "s" };
                write!(f, "{team} won by {margin} wicket{s}")
            }
            MatchResult::WonByRuns { team, margin } => {
                let s = if *margin == 1 { "" } else { "s" };
                write!(f, "{team} won by {margin} run{s}")
            }
            MatchResult::Tied => write!(f, "Match Tied"),
        }
    }
}

/// Derive the result of a finished match.
pub fn match_result(state: &MatchState) -> MatchResult {
    if state.game_state != GamePhase::Finished {
        return MatchResult::InProgress;
    }

    let first = &state.innings[0];
    let first_team = state
        .batting_team(first)
        .map(|t| t.name.clone())
        .unwrap_or_default();

    let (Some(second), Some(target)) = (state.innings.get(1), state.target) else {
        return MatchResult::WonByDefault { team: first_team };
    };
    let second_team = state
        .batting_team(second)
        .map(|t| t.name.clone())
        .unwrap_or_default();

    if second.score >= target {
        MatchResult::WonByWickets {
            team: second_team,
            margin: MAX_WICKETS - second.wickets,
        }
    } else if second.score < first.score {
        MatchResult::WonByRuns {
            team: first_team,
            margin: first.score - second.score,
        }
    } else {
        MatchResult::Tied
    }
}

/// The one mutation a finished match accepts.
pub fn set_man_of_the_match(state: &MatchState, player_id: &str) -> Result<MatchState, DomainError> {
    if state.game_state != GamePhase::Finished {
        return Err(DomainError::validation(
            ValidationKind::PhaseMismatch,
            "Man of the match is awarded after the match ends",
        ));
    }
    if state.team1.player(player_id).is_none() && state.team2.player(player_id).is_none() {
        return Err(DomainError::validation(
            ValidationKind::InvalidRosterReference,
            format!("Player {player_id} is not in either roster"),
        ));
    }
    let mut next = state.clone();
    next.man_of_the_match_id = Some(player_id.to_string());
    Ok(next)
}

/// Edit a player's display name everywhere the id appears: rosters, batting
/// and bowling cards, dismissal credits, fall-of-wicket snapshots.
pub fn rename_player(
    state: &MatchState,
    player_id: &str,
    new_name: &str,
) -> Result<MatchState, DomainError> {
    if state.team1.player(player_id).is_none() && state.team2.player(player_id).is_none() {
        return Err(DomainError::validation(
            ValidationKind::InvalidRosterReference,
            format!("Player {player_id} is not in either roster"),
        ));
    }

    let mut next = state.clone();
    for team in [&mut next.team1, &mut next.team2] {
        for p in &mut team.players {
            if p.id == player_id {
                p.name = new_name.to_string();
            }
        }
    }
    for innings in &mut next.innings {
        for b in &mut innings.batsmen {
            rename_in_batsman(b, player_id, new_name);
        }
        for b in &mut innings.bowlers {
            if b.player.id == player_id {
                b.player.name = new_name.to_string();
            }
        }
        for fow in &mut innings.fall_of_wickets {
            rename_in_batsman(&mut fow.player, player_id, new_name);
        }
    }
    Ok(next)
}

fn rename_in_batsman(b: &mut Batsman, player_id: &str, new_name: &str) {
    if b.player.id == player_id {
        b.player.name = new_name.to_string();
    }
    if let Some(d) = &mut b.dismissal {
        if d.bowler.id == player_id {
            d.bowler.name = new_name.to_string();
        }
        if let Some(fielder) = &mut d.fielder {
            if fielder.id == player_id {
                fielder.name = new_name.to_string();
            }
        }
    }
}

/// Mid-match settings edit: overs cap and (for a chase) the target.
pub fn update_settings(
    state: &MatchState,
    max_overs: u32,
    target: Option<u32>,
    target_overs: Option<u32>,
) -> Result<MatchState, DomainError> {
    if state.game_state == GamePhase::Finished {
        return Err(DomainError::validation(
            ValidationKind::PhaseMismatch,
            "Settings cannot change after the match ends",
        ));
    }
    if max_overs == 0 || target_overs == Some(0) {
        return Err(DomainError::validation(
            ValidationKind::InvalidOvers,
            "Overs must be positive",
        ));
    }
    if target == Some(0) {
        return Err(DomainError::validation(
            ValidationKind::InvalidTarget,
            "Target must be at least one run",
        ));
    }
    let mut next = state.clone();
    next.max_overs = max_overs;
    if let Some(t) = target {
        next.target = Some(t);
    }
    if let Some(o) = target_overs {
        next.target_overs = Some(o);
    }
    Ok(next)
}
