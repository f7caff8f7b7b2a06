use serde_json::json;

use crate::domain::tokens::BallToken;
use crate::errors::domain::ValidationKind;

#[test]
fn formats_match_the_timeline_grammar() {
    let cases = [
        (BallToken::Runs(0), "0"),
        (BallToken::Runs(4), "4"),
        (BallToken::Wide(0), "Wd"),
        (BallToken::Wide(2), "2Wd"),
        (BallToken::NoBall(0), "Nb"),
        (BallToken::NoBall(4), "4Nb"),
        (BallToken::Bye(1), "1B"),
        (BallToken::LegBye(1), "1Lb"),
        (
            BallToken::Wicket {
                runs: 0,
                run_out: false,
            },
            "W",
        ),
        (
            BallToken::Wicket {
                runs: 2,
                run_out: true,
            },
            "2W-RO",
        ),
        (
            BallToken::Wicket {
                runs: 0,
                run_out: true,
            },
            "W-RO",
        ),
        (BallToken::Retired, "RET"),
    ];
    for (token, expected) in cases {
        assert_eq!(token.to_string(), expected);
        assert_eq!(expected.parse::<BallToken>().unwrap(), token);
    }
}

#[test]
fn parse_rejects_out_of_grammar_strings() {
    for s in ["", "7", "12", "3X", "Wd2", "2W", "2RET", "w", "-1"] {
        let err = s.parse::<BallToken>().unwrap_err();
        assert_eq!(
            err.validation_kind(),
            Some(&ValidationKind::ParseToken),
            "expected parse failure for {s:?}"
        );
    }
}

#[test]
fn accounting_splits_score_ball_and_bowler_charge() {
    // (token, legal, against bowler, total runs)
    let cases = [
        (BallToken::Runs(4), true, 4, 4),
        (BallToken::Wide(2), false, 3, 3),
        (BallToken::NoBall(6), false, 7, 7),
        (BallToken::Bye(4), true, 0, 4),
        (BallToken::LegBye(1), true, 0, 1),
        (
            BallToken::Wicket {
                runs: 1,
                run_out: true,
            },
            true,
            1,
            1,
        ),
        (BallToken::Retired, false, 0, 0),
    ];
    for (token, legal, against, total) in cases {
        assert_eq!(token.is_legal_delivery(), legal, "{token}");
        assert_eq!(token.runs_against_bowler(), against, "{token}");
        assert_eq!(token.total_runs(), total, "{token}");
    }
}

#[test]
fn serializes_runs_as_numbers_and_the_rest_as_strings() {
    let over = vec![
        BallToken::Runs(4),
        BallToken::Wide(1),
        BallToken::Runs(0),
        BallToken::Wicket {
            runs: 0,
            run_out: false,
        },
    ];
    let value = serde_json::to_value(&over).unwrap();
    assert_eq!(value, json!([4, "1Wd", 0, "W"]));

    let back: Vec<BallToken> = serde_json::from_value(value).unwrap();
    assert_eq!(back, over);
}

#[test]
fn deserialize_rejects_run_counts_above_six() {
    assert!(serde_json::from_str::<BallToken>("7").is_err());
    assert!(serde_json::from_str::<BallToken>("-1").is_err());
    assert!(serde_json::from_str::<BallToken>("\"9Wd\"").is_ok());
}
