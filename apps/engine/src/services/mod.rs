//! Service layer: bridges the pure scoring engine with history and storage.

pub mod scoring;

pub use scoring::ScoringService;
