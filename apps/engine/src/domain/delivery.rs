//! Delivery processor: one ball-level action in, one new match snapshot out.
//!
//! `apply_delivery` never mutates its input. It validates everything first,
//! clones the state, applies the action to the clone, and returns it; a
//! rejected action leaves the caller's state untouched by construction.

use crate::domain::players::{Batsman, Dismissal, DismissalKind, FallOfWicket, Player, PlayerId};
use crate::domain::rules::{MAX_RUNS_OFF_BAT, MAX_WICKETS};
use crate::domain::state::{require_bowler, require_striker, GamePhase, Innings, MatchState};
use crate::domain::tokens::BallToken;
use crate::errors::domain::{DomainError, ValidationKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtraKind {
    Wide,
    NoBall,
    Bye,
    LegBye,
}

impl ExtraKind {
    /// Byes and leg byes consume a legal-delivery slot; wides and no-balls
    /// must be re-bowled.
    pub fn is_legal_delivery(self) -> bool {
        matches!(self, ExtraKind::Bye | ExtraKind::LegBye)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WicketAction {
    pub kind: DismissalKind,
    pub out_player_id: PlayerId,
    pub fielder_id: Option<PlayerId>,
    /// Runs completed before the dismissal; only meaningful for run outs.
    pub runs_on_dismissal: u8,
    pub next_batsman_id: Option<PlayerId>,
}

/// One user-visible scoring action. Each variant is a single undo step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryAction {
    /// Runs off the bat on an ordinary legal delivery.
    Run(u8),
    Extra {
        kind: ExtraKind,
        runs: u8,
    },
    Wicket(WicketAction),
    Retire {
        out_player_id: PlayerId,
        next_batsman_id: Option<PlayerId>,
    },
    /// Manual strike correction; records a snapshot but no ball.
    SwapStrike,
}

/// Apply one scoring action, returning the next match snapshot.
pub fn apply_delivery(
    state: &MatchState,
    action: &DeliveryAction,
) -> Result<MatchState, DomainError> {
    if state.game_state != GamePhase::InProgress {
        return Err(DomainError::validation(
            ValidationKind::PhaseMismatch,
            "Match is not in progress",
        ));
    }

    // Legal-delivery actions are rejected while the over stands complete.
    let needs_ball_slot = match action {
        DeliveryAction::Run(_) => true,
        DeliveryAction::Extra { kind, .. } => kind.is_legal_delivery(),
        DeliveryAction::Wicket(w) => w.kind.consumes_ball(),
        DeliveryAction::Retire { .. } | DeliveryAction::SwapStrike => false,
    };
    if needs_ball_slot && state.innings_in_play().over_is_complete() {
        return Err(DomainError::validation(
            ValidationKind::OverComplete,
            "Over complete: select the next bowler first",
        ));
    }

    let mut next = state.clone();
    match action {
        DeliveryAction::Run(runs) => apply_run(next.innings_in_play_mut(), *runs)?,
        DeliveryAction::Extra { kind, runs } => apply_extra(next.innings_in_play_mut(), *kind, *runs)?,
        DeliveryAction::Wicket(wicket) => apply_wicket(&mut next, wicket)?,
        DeliveryAction::Retire {
            out_player_id,
            next_batsman_id,
        } => apply_wicket(
            &mut next,
            &WicketAction {
                kind: DismissalKind::RetiredOut,
                out_player_id: out_player_id.clone(),
                fielder_id: None,
                runs_on_dismissal: 0,
                next_batsman_id: next_batsman_id.clone(),
            },
        )?,
        DeliveryAction::SwapStrike => next.innings_in_play_mut().swap_strike(),
    }
    Ok(next)
}

fn apply_run(innings: &mut Innings, runs: u8) -> Result<(), DomainError> {
    if runs > MAX_RUNS_OFF_BAT {
        return Err(DomainError::validation(
            ValidationKind::Other("RUNS_OUT_OF_RANGE".into()),
            format!("Runs off the bat must be 0..=6, got {runs}"),
        ));
    }

    innings.score += u32::from(runs);

    let striker = require_striker(innings, "apply_run")?;
    striker.runs += u32::from(runs);
    striker.balls += 1;
    if runs == 4 {
        striker.fours += 1;
    }
    if runs == 6 {
        striker.sixes += 1;
    }

    let bowler = require_bowler(innings, "apply_run")?;
    bowler.runs_conceded += u32::from(runs);
    bowler.balls += 1;

    innings.balls += 1;
    innings.push_token(BallToken::Runs(runs));

    if runs % 2 != 0 {
        innings.swap_strike();
    }
    Ok(())
}

fn apply_extra(innings: &mut Innings, kind: ExtraKind, runs: u8) -> Result<(), DomainError> {
    match kind {
        ExtraKind::Wide | ExtraKind::NoBall => {
            // Illegal delivery: one penalty run plus whatever was taken, no
            // ball consumed.
            let total = 1 + u32::from(runs);
            innings.score += total;
            require_bowler(innings, "apply_extra")?.runs_conceded += total;
            match kind {
                ExtraKind::Wide => {
                    innings.extras.wides += total;
                    innings.push_token(BallToken::Wide(runs));
                }
                ExtraKind::NoBall => {
                    // Only the penalty run is an extra; runs off the bat on a
                    // no-ball belong to the striker.
                    innings.extras.no_balls += 1;
                    let striker = require_striker(innings, "apply_extra")?;
                    striker.runs += u32::from(runs);
                    if runs == 4 {
                        striker.fours += 1;
                    }
                    if runs == 6 {
                        striker.sixes += 1;
                    }
                    innings.push_token(BallToken::NoBall(runs));
                }
                _ => unreachable!(),
            }
        }
        ExtraKind::Bye | ExtraKind::LegBye => {
            innings.score += u32::from(runs);
            match kind {
                ExtraKind::Bye => {
                    innings.extras.byes += u32::from(runs);
                    innings.push_token(BallToken::Bye(runs));
                }
                ExtraKind::LegBye => {
                    innings.extras.leg_byes += u32::from(runs);
                    innings.push_token(BallToken::LegBye(runs));
                }
                _ => unreachable!(),
            }
            innings.balls += 1;
            require_striker(innings, "apply_extra")?.balls += 1;
            require_bowler(innings, "apply_extra")?.balls += 1;
        }
    }

    // Strike rotates on the runs actually run between the wickets; the
    // wide/no-ball penalty run does not move the batsmen.
    if runs % 2 != 0 {
        innings.swap_strike();
    }
    Ok(())
}

fn apply_wicket(state: &mut MatchState, wicket: &WicketAction) -> Result<(), DomainError> {
    let innings = state.innings_in_play();

    // The departing batsman must be one of the two at the crease.
    let at_crease = wicket.out_player_id == innings.current_striker_id
        || wicket.out_player_id == innings.current_non_striker_id;
    let already_out = innings
        .batsman(&wicket.out_player_id)
        .map(|b| b.out)
        .unwrap_or(true);
    if !at_crease || already_out {
        return Err(DomainError::validation(
            ValidationKind::InvalidRosterReference,
            format!("Player {} is not batting", wicket.out_player_id),
        ));
    }

    let fielder = match &wicket.fielder_id {
        Some(id) => {
            let fielding_team = state
                .bowling_team(innings)
                .ok_or_else(|| DomainError::validation_other("Unknown bowling team id"))?;
            Some(
                fielding_team
                    .player(id)
                    .cloned()
                    .ok_or_else(|| {
                        DomainError::validation(
                            ValidationKind::InvalidRosterReference,
                            format!("Fielder {id} is not in the fielding roster"),
                        )
                    })?,
            )
        }
        None => None,
    };
    let replacement = resolve_replacement(state, wicket)?;

    let is_retired = wicket.kind == DismissalKind::RetiredOut;
    let innings = state.innings_in_play_mut();
    innings.wickets += 1;

    // Run-out: runs completed before the ball ended stand, credited to the
    // striker and against the bowler, and they rotate strike first.
    if wicket.kind == DismissalKind::RunOut && wicket.runs_on_dismissal > 0 {
        let runs = u32::from(wicket.runs_on_dismissal);
        innings.score += runs;
        require_striker(innings, "apply_wicket")?.runs += runs;
        require_bowler(innings, "apply_wicket")?.runs_conceded += runs;
        if wicket.runs_on_dismissal % 2 != 0 {
            innings.swap_strike();
        }
    }

    let token = if is_retired {
        BallToken::Retired
    } else if wicket.kind == DismissalKind::RunOut {
        BallToken::Wicket {
            runs: wicket.runs_on_dismissal,
            run_out: true,
        }
    } else {
        BallToken::Wicket {
            runs: 0,
            run_out: false,
        }
    };
    innings.push_token(token);

    if wicket.kind.consumes_ball() {
        innings.balls += 1;
        let bowler = require_bowler(innings, "apply_wicket")?;
        bowler.balls += 1;
        if wicket.kind.credits_bowler() {
            bowler.wickets += 1;
        }
        // The outgoing batsman is credited the ball faced, whichever end they
        // were dismissed at.
        if let Some(out_batsman) = innings.batsman_mut(&wicket.out_player_id) {
            out_batsman.balls += 1;
        }
    }

    let bowler_credit = if is_retired {
        Player::retired()
    } else {
        require_bowler(innings, "apply_wicket")?.player.clone()
    };
    let departing_held_strike = wicket.out_player_id == innings.current_striker_id;

    if let Some(out_batsman) = innings.batsman_mut(&wicket.out_player_id) {
        out_batsman.out = true;
        out_batsman.on_strike = false;
        out_batsman.dismissal = Some(Dismissal {
            kind: wicket.kind,
            bowler: bowler_credit,
            fielder,
        });
    }
    let fow_snapshot = innings
        .batsman(&wicket.out_player_id)
        .cloned()
        .ok_or_else(|| {
            DomainError::validation_other("Invariant violated: departing batsman disappeared")
        })?;
    innings.fall_of_wickets.push(FallOfWicket {
        score: innings.score,
        overs: innings.overs,
        balls: innings.balls,
        player: fow_snapshot,
    });

    // Seat the replacement at the departing batsman's end; the survivor keeps
    // their end and their strike status is recomputed.
    if let Some(next_player) = replacement {
        let new_id = next_player.id.clone();
        innings
            .batsmen
            .push(Batsman::new(next_player, departing_held_strike));
        if departing_held_strike {
            innings.current_striker_id = new_id;
            let non_striker_id = innings.current_non_striker_id.clone();
            if let Some(b) = innings.batsman_mut(&non_striker_id) {
                b.on_strike = false;
            }
        } else {
            innings.current_non_striker_id = new_id;
            let striker_id = innings.current_striker_id.clone();
            if let Some(b) = innings.batsman_mut(&striker_id) {
                b.on_strike = true;
            }
        }
    }
    Ok(())
}

/// Resolve and validate the incoming batsman before anything is mutated.
fn resolve_replacement(
    state: &MatchState,
    wicket: &WicketAction,
) -> Result<Option<Player>, DomainError> {
    let innings = state.innings_in_play();
    if innings.wickets + 1 >= MAX_WICKETS {
        // All out; nobody replaces the departing batsman.
        return Ok(None);
    }
    let Some(next_id) = &wicket.next_batsman_id else {
        return Ok(None);
    };

    let batting_team = state
        .batting_team(innings)
        .ok_or_else(|| DomainError::validation_other("Unknown batting team id"))?;
    let eligible: Vec<&Player> = batting_team
        .players
        .iter()
        .filter(|p| innings.batsman(&p.id).is_none())
        .collect();
    if eligible.is_empty() {
        return Err(DomainError::validation(
            ValidationKind::NoEligibleBatsmen,
            "Every roster member has already batted",
        ));
    }
    eligible
        .iter()
        .find(|p| &p.id == next_id)
        .map(|p| Some((*p).clone()))
        .ok_or_else(|| {
            DomainError::validation(
                ValidationKind::InvalidRosterReference,
                format!("Player {next_id} cannot come in to bat"),
            )
        })
}
