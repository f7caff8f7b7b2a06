//! Ball tokens: the canonical grammar for timeline entries.
//!
//! A token is either a bare run count off a legal delivery, or a tagged
//! extra/wicket form: `"Wd"`/`"2Wd"`, `"Nb"`/`"4Nb"`, `"1B"`, `"1Lb"`, `"W"`,
//! `"2W-RO"`, `"RET"`. This module owns the single formatter/parser pair used
//! everywhere; nothing else in the engine inspects token strings.

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use serde::de::{Error as DeError, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::errors::domain::{DomainError, ValidationKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BallToken {
    /// Runs off the bat on an ordinary legal delivery.
    Runs(u8),
    /// Wide plus runs taken; the wide itself is one run.
    Wide(u8),
    /// No-ball plus runs off the bat; the no-ball itself is one run.
    NoBall(u8),
    Bye(u8),
    LegBye(u8),
    /// Wicket. `runs` were completed before a run out; zero otherwise.
    Wicket { runs: u8, run_out: bool },
    /// Retirement: no runs, no ball consumed.
    Retired,
}

impl BallToken {
    /// Whether this delivery counts toward the six-ball over.
    pub fn is_legal_delivery(self) -> bool {
        match self {
            BallToken::Runs(_) | BallToken::Bye(_) | BallToken::LegBye(_) => true,
            BallToken::Wicket { .. } => true,
            BallToken::Wide(_) | BallToken::NoBall(_) | BallToken::Retired => false,
        }
    }

    /// Runs charged to the bowler for maiden arithmetic. Byes and leg byes are
    /// never the bowler's fault; the illegal-delivery penalty always is.
    pub fn runs_against_bowler(self) -> u32 {
        match self {
            BallToken::Runs(n) => u32::from(n),
            BallToken::Wide(n) | BallToken::NoBall(n) => 1 + u32::from(n),
            BallToken::Bye(_) | BallToken::LegBye(_) => 0,
            BallToken::Wicket { runs, .. } => u32::from(runs),
            BallToken::Retired => 0,
        }
    }

    /// Total contribution to the innings score.
    pub fn total_runs(self) -> u32 {
        match self {
            BallToken::Runs(n) => u32::from(n),
            BallToken::Wide(n) | BallToken::NoBall(n) => 1 + u32::from(n),
            BallToken::Bye(n) | BallToken::LegBye(n) => u32::from(n),
            BallToken::Wicket { runs, .. } => u32::from(runs),
            BallToken::Retired => 0,
        }
    }
}

impl Display for BallToken {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        // A zero run count is omitted before a suffix: "Wd", not "0Wd".
        let prefixed = |f: &mut Formatter<'_>, n: u8, suffix: &str| {
            if n > 0 {
                write!(f, "{n}{suffix}")
            } else {
                write!(f, "{suffix}")
            }
        };
        match *self {
            BallToken::Runs(n) => write!(f, "{n}"),
            BallToken::Wide(n) => prefixed(f, n, "Wd"),
            BallToken::NoBall(n) => prefixed(f, n, "Nb"),
            BallToken::Bye(n) => prefixed(f, n, "B"),
            BallToken::LegBye(n) => prefixed(f, n, "Lb"),
            BallToken::Wicket { runs, run_out } => {
                if run_out {
                    prefixed(f, runs, "W-RO")
                } else {
                    write!(f, "W")
                }
            }
            BallToken::Retired => write!(f, "RET"),
        }
    }
}

impl FromStr for BallToken {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parse_err = || {
            DomainError::validation(ValidationKind::ParseToken, format!("Parse ball token: {s}"))
        };

        let digits: String = s.chars().take_while(|c| c.is_ascii_digit()).collect();
        let suffix = &s[digits.len()..];
        let runs: u8 = if digits.is_empty() {
            0
        } else {
            digits.parse().map_err(|_| parse_err())?
        };

        match suffix {
            "" if !digits.is_empty() => {
                if runs > 6 {
                    return Err(parse_err());
                }
                Ok(BallToken::Runs(runs))
            }
            "Wd" => Ok(BallToken::Wide(runs)),
            "Nb" => Ok(BallToken::NoBall(runs)),
            "B" => Ok(BallToken::Bye(runs)),
            "Lb" => Ok(BallToken::LegBye(runs)),
            "W" if digits.is_empty() => Ok(BallToken::Wicket {
                runs: 0,
                run_out: false,
            }),
            "W-RO" => Ok(BallToken::Wicket { runs, run_out: true }),
            "RET" if digits.is_empty() => Ok(BallToken::Retired),
            _ => Err(parse_err()),
        }
    }
}

// Tokens serialize the way the timeline stores them: a bare number for plain
// runs, the canonical string for everything else.
impl Serialize for BallToken {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match *self {
            BallToken::Runs(n) => serializer.serialize_u64(u64::from(n)),
            other => serializer.serialize_str(&other.to_string()),
        }
    }
}

struct BallTokenVisitor;

impl Visitor<'_> for BallTokenVisitor {
    type Value = BallToken;

    fn expecting(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str("a run count or a ball token string")
    }

    fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
    where
        E: DeError,
    {
        if v > 6 {
            return Err(E::custom(format!("run count out of range: {v}")));
        }
        Ok(BallToken::Runs(v as u8))
    }

    fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
    where
        E: DeError,
    {
        u64::try_from(v)
            .map_err(|_| E::custom(format!("run count out of range: {v}")))
            .and_then(|v| self.visit_u64(v))
    }

    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
    where
        E: DeError,
    {
        v.parse::<BallToken>().map_err(|e| E::custom(e.to_string()))
    }
}

impl<'de> Deserialize<'de> for BallToken {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(BallTokenVisitor)
    }
}
