#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

//! Ball-by-ball cricket scoring engine.
//!
//! The heart of the crate is `domain`: pure state-transition functions that
//! take a match snapshot and one scoring action and return the next snapshot.
//! `services` wires those transitions to the undo history and a `store`
//! port; everything user-facing (rendering, transport, real persistence)
//! stays outside.

pub mod domain;
pub mod error;
pub mod errors;
pub mod services;
pub mod store;


// Re-exports for public API
pub use domain::delivery::{apply_delivery, DeliveryAction, ExtraKind, WicketAction};
pub use domain::history::ScoringHistory;
pub use domain::lifecycle::{
    check_transition, default_target, match_result, start_second_innings, MatchResult,
};
pub use domain::overs::complete_over;
pub use domain::players::{Batsman, Bowler, Dismissal, DismissalKind, Player, PlayerId, Team};
pub use domain::rules::MatchRules;
pub use domain::setup::{start_chase, start_match};
pub use domain::snapshot::{scorecard, ScorecardSnapshot};
pub use domain::state::{GamePhase, Innings, MatchState, Toss, TossDecision};
pub use domain::tokens::BallToken;
pub use error::AppError;
pub use errors::domain::DomainError;
pub use services::scoring::ScoringService;
pub use store::share::{JsonShareCodec, ShareCodec};
pub use store::MatchStore;

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    test_bootstrap::logging::init();
}
