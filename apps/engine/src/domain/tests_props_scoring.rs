//! Property tests for the scoring engine (pure domain, no store).
//!
//! Accounting contract:
//! - legal deliveries recorded in the timeline always equal overs * 6 + balls
//! - the innings score always equals the sum of token contributions
//! - exactly one batsman at the crease holds strike
//! - undo by snapshot restores the previous state exactly

use proptest::prelude::*;

use crate::domain::delivery::{apply_delivery, DeliveryAction};
use crate::domain::lifecycle::check_transition;
use crate::domain::state::{GamePhase, Innings, MatchState};
use crate::domain::test_gens;
use crate::domain::test_prelude;
use crate::domain::test_state_helpers::{change_bowler, fresh_match};
use crate::domain::tokens::BallToken;

/// Apply a random action sequence, turning the over whenever it fills.
fn play(actions: &[DeliveryAction]) -> MatchState {
    let mut state = fresh_match();
    for action in actions {
        if state.game_state != GamePhase::InProgress {
            break;
        }
        if state.innings_in_play().over_is_complete() {
            state = change_bowler(&state);
            state = check_transition(&state);
            if state.game_state != GamePhase::InProgress {
                break;
            }
        }
        state = apply_delivery(&state, action).unwrap();
        state = check_transition(&state);
    }
    state
}

fn timeline_total(innings: &Innings) -> u32 {
    innings
        .timeline
        .iter()
        .flatten()
        .map(|t| t.total_runs())
        .sum()
}

proptest! {
    #![proptest_config(test_prelude::proptest_config())]

    #[test]
    fn prop_legal_ball_accounting_holds(
        actions in prop::collection::vec(test_gens::non_wicket_action(), 1..80),
    ) {
        let state = play(&actions);
        for innings in &state.innings {
            let counted = innings.legal_ball_count();
            let derived = innings.overs * 6 + u32::from(innings.balls);
            prop_assert_eq!(counted, derived,
                "timeline legal balls must match the over counters");
        }
    }

    #[test]
    fn prop_score_equals_timeline_contribution(
        actions in prop::collection::vec(test_gens::non_wicket_action(), 1..80),
    ) {
        let state = play(&actions);
        let innings = &state.innings[0];
        prop_assert_eq!(innings.score, timeline_total(innings));
        prop_assert_eq!(
            innings.score,
            innings.batsmen.iter().map(|b| b.runs).sum::<u32>()
                + innings.extras.wides
                + innings.extras.no_balls
                + innings.extras.byes
                + innings.extras.leg_byes
        );
    }

    #[test]
    fn prop_exactly_one_striker(
        actions in prop::collection::vec(test_gens::non_wicket_action(), 1..40),
    ) {
        let state = play(&actions);
        let innings = state.innings_in_play();
        let strikers = innings.batsmen.iter().filter(|b| b.on_strike).count();
        prop_assert_eq!(strikers, 1);
        prop_assert!(innings.striker().map(|b| b.on_strike).unwrap_or(false));
        prop_assert_ne!(&innings.current_striker_id, &innings.current_non_striker_id);
    }

    #[test]
    fn prop_apply_delivery_is_pure(
        action in test_gens::non_wicket_action(),
    ) {
        let state = fresh_match();
        let before = state.clone();
        let _ = apply_delivery(&state, &action).unwrap();
        prop_assert_eq!(state, before);
    }

    #[test]
    fn prop_check_transition_is_idempotent(
        actions in prop::collection::vec(test_gens::non_wicket_action(), 1..40),
    ) {
        let state = play(&actions);
        let once = check_transition(&state);
        let twice = check_transition(&once);
        prop_assert_eq!(once.game_state, twice.game_state);
        prop_assert_eq!(once.innings, twice.innings);
    }

    #[test]
    fn prop_tokens_round_trip_as_strings(token in test_gens::ball_token()) {
        let text = token.to_string();
        let parsed: BallToken = text.parse().unwrap();
        prop_assert_eq!(parsed, token);
    }

    #[test]
    fn prop_tokens_round_trip_through_json(
        tokens in prop::collection::vec(test_gens::ball_token(), 0..24),
    ) {
        let json = serde_json::to_string(&tokens).unwrap();
        let back: Vec<BallToken> = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(back, tokens);
    }

    #[test]
    fn prop_match_state_round_trips_through_json(
        actions in prop::collection::vec(test_gens::non_wicket_action(), 1..30),
    ) {
        let state = play(&actions);
        let json = serde_json::to_string(&state).unwrap();
        let back: MatchState = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(back, state);
    }
}
