//! Over completion: maiden credit, counter resets, and the next bowler.

use crate::domain::players::Bowler;
use crate::domain::state::{GamePhase, MatchState};
use crate::errors::domain::{DomainError, ValidationKind};

/// Close the finished over and hand the ball to `new_bowler_id`.
///
/// Requires exactly six legal deliveries in the current over. Pure: returns a
/// new snapshot, never mutates the input.
pub fn complete_over(state: &MatchState, new_bowler_id: &str) -> Result<MatchState, DomainError> {
    if state.game_state != GamePhase::InProgress {
        return Err(DomainError::validation(
            ValidationKind::PhaseMismatch,
            "Match is not in progress",
        ));
    }

    let innings = state.innings_in_play();
    if !innings.over_is_complete() {
        return Err(DomainError::validation(
            ValidationKind::OverIncomplete,
            format!("Over has only {} legal deliveries", innings.balls),
        ));
    }
    if state.rules.enforce_bowler_change && new_bowler_id == innings.current_bowler_id {
        return Err(DomainError::validation(
            ValidationKind::InvalidRosterReference,
            "A bowler may not bowl consecutive overs",
        ));
    }

    // Resolve before mutating: an unknown bowler must reject without effect.
    let incoming = if innings.bowler(new_bowler_id).is_some() {
        None
    } else {
        let fielding_team = state
            .bowling_team(innings)
            .ok_or_else(|| DomainError::validation_other("Unknown bowling team id"))?;
        let player = fielding_team.player(new_bowler_id).cloned().ok_or_else(|| {
            DomainError::validation(
                ValidationKind::InvalidRosterReference,
                format!("Player {new_bowler_id} is not in the fielding roster"),
            )
        })?;
        Some(Bowler::new(player))
    };

    let mut next = state.clone();
    let innings = next.innings_in_play_mut();

    // Maiden check: sum what the finished over charged to the bowler.
    let over_runs: u32 = innings
        .current_over()
        .map(|over| over.iter().map(|t| t.runs_against_bowler()).sum())
        .unwrap_or(0);
    let outgoing_id = innings.current_bowler_id.clone();
    if let Some(outgoing) = innings.bowler_mut(&outgoing_id) {
        if over_runs == 0 {
            outgoing.maidens += 1;
        }
        outgoing.overs += 1;
        outgoing.balls = 0;
    }

    innings.overs += 1;
    innings.balls = 0;
    innings.timeline.push(Vec::new());

    if let Some(bowler) = incoming {
        innings.bowlers.push(bowler);
    }
    innings.current_bowler_id = new_bowler_id.to_string();

    // Ends change at every over boundary.
    innings.swap_strike();
    Ok(next)
}
