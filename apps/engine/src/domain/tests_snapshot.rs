use crate::domain::delivery::{apply_delivery, DeliveryAction, ExtraKind, WicketAction};
use crate::domain::lifecycle::check_transition;
use crate::domain::players::DismissalKind;
use crate::domain::snapshot::{format_overs, scorecard};
use crate::domain::test_state_helpers::{bowl_over, chase_match, fresh_match};

#[test]
fn card_totals_follow_the_innings() {
    let mut state = fresh_match();
    state = apply_delivery(&state, &DeliveryAction::Run(4)).unwrap();
    state = apply_delivery(
        &state,
        &DeliveryAction::Extra {
            kind: ExtraKind::Wide,
            runs: 0,
        },
    )
    .unwrap();

    let card = scorecard(&state);
    assert_eq!(card.innings.len(), 1);
    let innings = &card.innings[0];
    assert_eq!(innings.batting_team, "A");
    assert_eq!(innings.bowling_team, "B");
    assert_eq!(innings.score, 5);
    assert_eq!(innings.wickets, 0);
    assert_eq!(innings.overs, "0.1");
    assert_eq!(innings.extras_total, 1);
    assert_eq!(innings.this_over, vec!["4", "Wd"]);
    assert_eq!(card.result, "Match in progress");
    assert!(card.chase.is_none());
    assert!(card.man_of_the_match.is_none());
}

#[test]
fn batting_lines_describe_the_dismissal() {
    let mut state = fresh_match();
    state = apply_delivery(&state, &DeliveryAction::Run(4)).unwrap();
    state = apply_delivery(
        &state,
        &DeliveryAction::Wicket(WicketAction {
            kind: DismissalKind::Caught,
            out_player_id: "a1".to_string(),
            fielder_id: Some("b5".to_string()),
            runs_on_dismissal: 0,
            next_batsman_id: Some("a3".to_string()),
        }),
    )
    .unwrap();

    let card = scorecard(&state);
    let innings = &card.innings[0];

    let opener = &innings.batting[0];
    assert_eq!(opener.name, "A player 1");
    assert_eq!(opener.how_out, "Caught (B player 5) b B player 11");
    assert_eq!(opener.runs, 4);
    assert_eq!(opener.balls, 2);
    assert!((opener.strike_rate - 200.0).abs() < f64::EPSILON);

    let partner = &innings.batting[1];
    assert_eq!(partner.how_out, "not out");

    assert_eq!(innings.fall_of_wickets.len(), 1);
    let fow = &innings.fall_of_wickets[0];
    assert_eq!(fow.wicket, 1);
    assert_eq!(fow.score, 4);
    assert_eq!(fow.overs, "0.2");
    assert_eq!(fow.batsman, "A player 1");
}

#[test]
fn bowling_lines_carry_figures_and_economy() {
    let mut state = bowl_over(&fresh_match(), [4, 0, 0, 0, 0, 2]);
    state = crate::domain::overs::complete_over(&state, "b10").unwrap();

    let card = scorecard(&state);
    let line = &card.innings[0].bowling[0];
    assert_eq!(line.name, "B player 11");
    assert_eq!(line.overs, "1.0");
    assert_eq!(line.maidens, 0);
    assert_eq!(line.runs_conceded, 6);
    assert_eq!(line.wickets, 0);
    assert!((line.economy - 6.0).abs() < f64::EPSILON);
}

#[test]
fn chase_card_tracks_the_equation() {
    let mut state = chase_match(50, 5);
    state = bowl_over(&state, [4, 0, 0, 0, 0, 0]);

    let card = scorecard(&state);
    // Placeholder innings omitted from the card entirely.
    assert_eq!(card.innings.len(), 1);

    let chase = card.chase.unwrap();
    assert_eq!(chase.target, 50);
    assert_eq!(chase.runs_needed, 46);
    assert_eq!(chase.balls_remaining, 24);
    assert!((chase.current_run_rate - 4.0).abs() < f64::EPSILON);
    assert!((chase.required_run_rate - 11.5).abs() < f64::EPSILON);
}

#[test]
fn finished_card_names_the_result() {
    let mut state = chase_match(2, 1);
    state = apply_delivery(&state, &DeliveryAction::Run(2)).unwrap();
    let done = check_transition(&state);

    let card = scorecard(&done);
    assert_eq!(card.result, "A won by 10 wickets");
    assert!(card.chase.is_none());
}

#[test]
fn overs_format_pairs_completed_and_balls() {
    assert_eq!(format_overs(0, 0), "0.0");
    assert_eq!(format_overs(19, 5), "19.5");
}

#[test]
fn snapshot_serializes_with_camel_case_keys() {
    let card = scorecard(&fresh_match());
    let value = serde_json::to_value(&card).unwrap();
    assert!(value.get("matchId").is_some());
    assert!(value["innings"][0].get("battingTeam").is_some());
    assert!(value["innings"][0].get("fallOfWickets").is_some());
    assert!(value["innings"][0]["batting"][0].get("strikeRate").is_some());
}
