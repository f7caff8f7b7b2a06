//! Error handling for the scoring engine.

pub mod domain;

pub use domain::{DomainError, NotFoundKind, ValidationKind};
