//! Domain-level error type used across the scoring engine.
//!
//! This error type is transport- and storage-agnostic. Callers at the service
//! boundary should return `Result<T, crate::error::AppError>` and convert from
//! `DomainError` using the provided `From<DomainError> for AppError`
//! implementation.
//!
//! Every rejection happens before any mutation is attempted: a `DomainError`
//! always means the state the caller passed in is exactly as it was.

use std::error::Error;
use std::fmt::{Display, Formatter, Result as FmtResult};

/// Validation kinds for rejected scoring actions.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ValidationKind {
    /// A legal-delivery action was attempted with six legal balls already
    /// recorded; the caller must process the over transition first.
    OverComplete,
    /// An over transition was requested before six legal balls were bowled.
    OverIncomplete,
    /// The action is not valid in the current game phase.
    PhaseMismatch,
    /// A player id does not reference an eligible member of the relevant roster.
    InvalidRosterReference,
    /// Every roster member has already batted; the innings must end instead.
    NoEligibleBatsmen,
    /// Non-positive target runs supplied at chase or second-innings setup.
    InvalidTarget,
    /// Non-positive overs supplied at setup or in a settings edit.
    InvalidOvers,
    /// A ball token string did not match the canonical grammar.
    ParseToken,
    Other(String),
}

/// Domain-level not found entities (minimal set; extend as needed)
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum NotFoundKind {
    Player,
    Match,
    Other(String),
}

/// Central domain error type
#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Input validation or scoring rule violation
    Validation(ValidationKind, String),
    /// Missing resource in domain terms
    NotFound(NotFoundKind, String),
}

impl Display for DomainError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            DomainError::Validation(kind, d) => write!(f, "validation {kind:?}: {d}"),
            DomainError::NotFound(kind, d) => write!(f, "not found {kind:?}: {d}"),
        }
    }
}

impl Error for DomainError {}

impl DomainError {
    pub fn validation(kind: ValidationKind, detail: impl Into<String>) -> Self {
        Self::Validation(kind, detail.into())
    }
    pub fn validation_other(detail: impl Into<String>) -> Self {
        let detail = detail.into();
        Self::Validation(ValidationKind::Other(detail.clone()), detail)
    }
    pub fn not_found(kind: NotFoundKind, detail: impl Into<String>) -> Self {
        Self::NotFound(kind, detail.into())
    }

    /// Validation kind, if this is a validation error.
    pub fn validation_kind(&self) -> Option<&ValidationKind> {
        match self {
            DomainError::Validation(kind, _) => Some(kind),
            DomainError::NotFound(..) => None,
        }
    }
}
