//! Domain layer: pure scoring logic, types, and helpers.

pub mod delivery;
pub mod history;
pub mod lifecycle;
pub mod overs;
pub mod players;
pub mod rules;
pub mod setup;
pub mod snapshot;
pub mod state;
pub mod tokens;


#[cfg(test)]
mod tests_props_scoring;
#[cfg(test)]
mod tests_snapshot;
#[cfg(test)]
mod tests_tokens;
#[cfg(test)]
mod tests_wickets;

// Re-exports for ergonomics
pub use delivery::{apply_delivery, DeliveryAction, ExtraKind, WicketAction};
pub use lifecycle::{check_transition, default_target, match_result, start_second_innings};
pub use overs::complete_over;
pub use players::{Batsman, Bowler, Dismissal, DismissalKind, Player, PlayerId, Team};
pub use rules::MatchRules;
pub use setup::{start_chase, start_match};
pub use state::{GamePhase, Innings, MatchState, Toss, TossDecision};
pub use tokens::BallToken;
