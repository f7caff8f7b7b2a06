//! Match creation: the two entry points the roster provider drives.

use time::OffsetDateTime;
use uuid::Uuid;

use crate::domain::players::{Batsman, Bowler, Team};
use crate::domain::rules::{MatchRules, MAX_WICKETS, TEAM_SIZE};
use crate::domain::state::{GamePhase, Innings, MatchState, Toss, TossDecision};
use crate::errors::domain::{DomainError, ValidationKind};

/// Start a full two-innings match.
///
/// The toss decides who bats: the winner's choice is applied to the winner,
/// the other side gets the opposite role.
pub fn start_match(
    team1: Team,
    team2: Team,
    max_overs: u32,
    toss_winner_id: &str,
    decision: TossDecision,
    rules: MatchRules,
) -> Result<MatchState, DomainError> {
    validate_roster(&team1)?;
    validate_roster(&team2)?;
    if max_overs == 0 {
        return Err(DomainError::validation(
            ValidationKind::InvalidOvers,
            "Match must be at least one over",
        ));
    }
    if toss_winner_id != team1.id && toss_winner_id != team2.id {
        return Err(DomainError::validation(
            ValidationKind::InvalidRosterReference,
            format!("Toss winner {toss_winner_id} is not one of the teams"),
        ));
    }

    let team1_bats = (toss_winner_id == team1.id && decision == TossDecision::Bat)
        || (toss_winner_id == team2.id && decision == TossDecision::Bowl);
    let (batting, bowling) = if team1_bats {
        (&team1, &team2)
    } else {
        (&team2, &team1)
    };
    let first_innings = seed_innings(batting, bowling, &rules)?;

    Ok(MatchState {
        id: Uuid::new_v4().to_string(),
        game_state: GamePhase::InProgress,
        toss: Toss {
            winner_id: toss_winner_id.to_string(),
            decision,
        },
        team1,
        team2,
        max_overs,
        innings: vec![first_innings],
        current_innings: 1,
        target: None,
        target_overs: None,
        is_chase_only: false,
        man_of_the_match_id: None,
        rules,
        created_at: OffsetDateTime::now_utc(),
        ended_at: None,
    })
}

/// Start a chase-only match: the first innings never happened, so a synthetic
/// placeholder stands in for it purely so target/result derivation can reuse
/// the two-innings comparison. The placeholder carries no ball-by-ball data.
pub fn start_chase(
    chasing_team: Team,
    bowling_team: Team,
    target_runs: u32,
    target_overs: u32,
    rules: MatchRules,
) -> Result<MatchState, DomainError> {
    validate_roster(&chasing_team)?;
    validate_roster(&bowling_team)?;
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

    let placeholder = Innings {
        score: target_runs - 1,
        wickets: MAX_WICKETS,
        overs: target_overs,
        timeline: Vec::new(),
        ..Innings::skeleton(&bowling_team.id, &chasing_team.id)
    };
    let second_innings = seed_innings(&chasing_team, &bowling_team, &rules)?;

    Ok(MatchState {
        id: Uuid::new_v4().to_string(),
        game_state: GamePhase::InProgress,
        toss: Toss {
            winner_id: bowling_team.id.clone(),
            decision: TossDecision::Bowl,
        },
        team1: chasing_team,
        team2: bowling_team,
        max_overs: target_overs,
        innings: vec![placeholder, second_innings],
        current_innings: 2,
        target: Some(target_runs),
        target_overs: Some(target_overs),
        is_chase_only: true,
        man_of_the_match_id: None,
        rules,
        created_at: OffsetDateTime::now_utc(),
        ended_at: None,
    })
}

/// Seed an innings with its openers and opening bowler.
///
/// Roster slots 0 and 1 open the batting (strike to slot 0); the opening
/// bowler comes from `rules.opening_bowler_slot`.
pub fn seed_innings(
    batting: &Team,
    bowling: &Team,
    rules: &MatchRules,
) -> Result<Innings, DomainError> {
    let opening_bowler = bowling.players.get(rules.opening_bowler_slot).ok_or_else(|| {
        DomainError::validation(
            ValidationKind::InvalidRosterReference,
            format!("No roster slot {} to open the bowling", rules.opening_bowler_slot),
        )
    })?;

    let mut innings = Innings::skeleton(&batting.id, &bowling.id);
    let openers = [
        Batsman::new(batting.players[0].clone(), true),
        Batsman::new(batting.players[1].clone(), false),
    ];
    innings.current_striker_id = openers[0].player.id.clone();
    innings.current_non_striker_id = openers[1].player.id.clone();
    innings.batsmen = openers.into();
    let bowler = Bowler::new(opening_bowler.clone());
    innings.current_bowler_id = bowler.player.id.clone();
    innings.bowlers = vec![bowler];
    Ok(innings)
}

fn validate_roster(team: &Team) -> Result<(), DomainError> {
    if team.players.len() != TEAM_SIZE {
        return Err(DomainError::validation(
            ValidationKind::InvalidRosterReference,
            format!(
                "Team {} must field exactly {TEAM_SIZE} players, got {}",
                team.id,
                team.players.len()
            ),
        ));
    }
    Ok(())
}
