use crate::domain::delivery::{apply_delivery, DeliveryAction, WicketAction};
use crate::domain::players::{DismissalKind, RETIRED_SENTINEL};
use crate::domain::state::MatchState;
use crate::domain::test_state_helpers::{change_bowler, fresh_match};
use crate::domain::tokens::BallToken;
use crate::errors::domain::ValidationKind;

fn wicket(kind: DismissalKind, out: &str, next: Option<&str>) -> DeliveryAction {
    DeliveryAction::Wicket(WicketAction {
        kind,
        out_player_id: out.to_string(),
        fielder_id: None,
        runs_on_dismissal: 0,
        next_batsman_id: next.map(str::to_string),
    })
}

#[test]
fn bowled_credits_the_bowler_and_consumes_a_ball() {
    let state = fresh_match();
    let next = apply_delivery(&state, &wicket(DismissalKind::Bowled, "a1", Some("a3"))).unwrap();
    let innings = next.innings_in_play();

    assert_eq!(innings.wickets, 1);
    assert_eq!(innings.balls, 1);
    assert_eq!(innings.score, 0);

    let bowler = innings.bowler("b11").unwrap();
    assert_eq!(bowler.wickets, 1);
    assert_eq!(bowler.balls, 1);

    let out = innings.batsman("a1").unwrap();
    assert!(out.out);
    assert_eq!(out.balls, 1);
    let dismissal = out.dismissal.as_ref().unwrap();
    assert_eq!(dismissal.kind, DismissalKind::Bowled);
    assert_eq!(dismissal.bowler.id, "b11");

    assert_eq!(
        innings.current_over().unwrap()[0],
        BallToken::Wicket {
            runs: 0,
            run_out: false
        }
    );
}

#[test]
fn caught_records_the_fielder_from_the_fielding_roster() {
    let state = fresh_match();
    let action = DeliveryAction::Wicket(WicketAction {
        kind: DismissalKind::Caught,
        out_player_id: "a1".to_string(),
        fielder_id: Some("b5".to_string()),
        runs_on_dismissal: 0,
        next_batsman_id: Some("a3".to_string()),
    });
    let next = apply_delivery(&state, &action).unwrap();
    let dismissal = next
        .innings_in_play()
        .batsman("a1")
        .unwrap()
        .dismissal
        .as_ref()
        .unwrap();
    assert_eq!(dismissal.fielder.as_ref().unwrap().id, "b5");
}

#[test]
fn unknown_fielder_rejects_without_effect() {
    let state = fresh_match();
    let action = DeliveryAction::Wicket(WicketAction {
        kind: DismissalKind::Caught,
        out_player_id: "a1".to_string(),
        fielder_id: Some("a5".to_string()), // batting side, not fielding
        runs_on_dismissal: 0,
        next_batsman_id: Some("a3".to_string()),
    });
    let err = apply_delivery(&state, &action).unwrap_err();
    assert_eq!(
        err.validation_kind(),
        Some(&ValidationKind::InvalidRosterReference)
    );
}

#[test]
fn run_out_applies_completed_runs_before_the_dismissal() {
    let state = fresh_match();
    let action = DeliveryAction::Wicket(WicketAction {
        kind: DismissalKind::RunOut,
        out_player_id: "a2".to_string(), // non-striker after crossing
        fielder_id: Some("b3".to_string()),
        runs_on_dismissal: 1,
        next_batsman_id: Some("a3".to_string()),
    });
    let next = apply_delivery(&state, &action).unwrap();
    let innings = next.innings_in_play();

    assert_eq!(innings.score, 1);
    // The completed run went to the striker and against the bowler.
    assert_eq!(innings.batsman("a1").unwrap().runs, 1);
    assert_eq!(innings.bowler("b11").unwrap().runs_conceded, 1);
    // No bowler wicket credit for a run out.
    assert_eq!(innings.bowler("b11").unwrap().wickets, 0);
    // The departing batsman faced the ball, whichever end they were at.
    assert_eq!(innings.batsman("a2").unwrap().balls, 1);
    assert_eq!(innings.balls, 1);
    assert_eq!(
        innings.current_over().unwrap()[0],
        BallToken::Wicket {
            runs: 1,
            run_out: true
        }
    );
}

#[test]
fn replacement_takes_the_departing_batsmans_end() {
    let state = fresh_match();

    // Striker out: replacement is on strike.
    let next = apply_delivery(&state, &wicket(DismissalKind::Bowled, "a1", Some("a3"))).unwrap();
    let innings = next.innings_in_play();
    assert_eq!(innings.current_striker_id, "a3");
    assert_eq!(innings.current_non_striker_id, "a2");
    assert!(innings.batsman("a3").unwrap().on_strike);
    assert!(!innings.batsman("a2").unwrap().on_strike);

    // Non-striker run out: replacement waits at the far end.
    let action = DeliveryAction::Wicket(WicketAction {
        kind: DismissalKind::RunOut,
        out_player_id: "a2".to_string(),
        fielder_id: None,
        runs_on_dismissal: 0,
        next_batsman_id: Some("a4".to_string()),
    });
    let next = apply_delivery(&next, &action).unwrap();
    let innings = next.innings_in_play();
    assert_eq!(innings.current_striker_id, "a3");
    assert_eq!(innings.current_non_striker_id, "a4");
    assert!(innings.batsman("a3").unwrap().on_strike);
    assert!(!innings.batsman("a4").unwrap().on_strike);
}

#[test]
fn retirement_consumes_no_ball_and_credits_the_sentinel() {
    let state = fresh_match();
    let next = apply_delivery(
        &state,
        &DeliveryAction::Retire {
            out_player_id: "a1".to_string(),
            next_batsman_id: Some("a3".to_string()),
        },
    )
    .unwrap();
    let innings = next.innings_in_play();

    assert_eq!(innings.wickets, 1);
    assert_eq!(innings.balls, 0);
    assert_eq!(innings.bowler("b11").unwrap().wickets, 0);

    let out = innings.batsman("a1").unwrap();
    assert!(out.out);
    assert_eq!(out.balls, 0);
    assert_eq!(out.dismissal.as_ref().unwrap().bowler.id, RETIRED_SENTINEL);
    assert_eq!(innings.current_over().unwrap()[0], BallToken::Retired);
    assert_eq!(innings.current_striker_id, "a3");
}

#[test]
fn fall_of_wicket_snapshots_the_moment_of_dismissal() {
    let mut state = fresh_match();
    state = apply_delivery(&state, &DeliveryAction::Run(4)).unwrap();
    state = apply_delivery(&state, &wicket(DismissalKind::Lbw, "a1", Some("a3"))).unwrap();

    let innings = state.innings_in_play();
    assert_eq!(innings.fall_of_wickets.len(), 1);
    let fow = &innings.fall_of_wickets[0];
    assert_eq!(fow.score, 4);
    assert_eq!(fow.overs, 0);
    assert_eq!(fow.balls, 2);
    assert_eq!(fow.player.player.id, "a1");
    assert_eq!(fow.player.runs, 4);
    assert!(fow.player.out);
}

#[test]
fn dismissing_a_player_not_at_the_crease_is_rejected() {
    let state = fresh_match();
    let err =
        apply_delivery(&state, &wicket(DismissalKind::Bowled, "a5", Some("a3"))).unwrap_err();
    assert_eq!(
        err.validation_kind(),
        Some(&ValidationKind::InvalidRosterReference)
    );
}

#[test]
fn replacement_who_already_batted_is_rejected() {
    let state = fresh_match();
    // a2 is already at the crease.
    let err =
        apply_delivery(&state, &wicket(DismissalKind::Bowled, "a1", Some("a2"))).unwrap_err();
    assert_eq!(
        err.validation_kind(),
        Some(&ValidationKind::InvalidRosterReference)
    );
}

/// Dismiss batsmen one by one until nine are down, bringing in each roster
/// slot in turn and turning the over when it fills.
fn nine_down(state: &MatchState) -> MatchState {
    let mut state = state.clone();
    for n in 0..9 {
        if state.innings_in_play().over_is_complete() {
            state = change_bowler(&state);
        }
        let out = format!("a{}", n + 1);
        let incoming = format!("a{}", n + 3);
        state = apply_delivery(
            &state,
            &wicket(DismissalKind::Bowled, &out, Some(&incoming)),
        )
        .unwrap();
    }
    state
}

#[test]
fn tenth_wicket_seats_no_replacement() {
    let state = nine_down(&fresh_match());
    let innings = state.innings_in_play();
    assert_eq!(innings.wickets, 9);
    assert_eq!(innings.batsmen.len(), 11);

    // One more wicket is all out; the supplied replacement is ignored.
    let done = apply_delivery(
        &state,
        &wicket(DismissalKind::Bowled, &innings.current_striker_id.clone(), None),
    )
    .unwrap();
    assert_eq!(done.innings[0].wickets, 10);
    assert_eq!(done.innings[0].batsmen.len(), 11);
}
