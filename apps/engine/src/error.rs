use thiserror::Error;

use crate::errors::domain::{DomainError, NotFoundKind, ValidationKind};

/// Service-boundary error for the scoring engine.
///
/// Carries a stable machine-readable code per variant so an embedding UI can
/// explain every rejected action to the user without string-matching details.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {detail}")]
    Validation { code: &'static str, detail: String },
    #[error("Not found: {detail}")]
    NotFound { code: &'static str, detail: String },
    #[error("Bad request: {detail}")]
    BadRequest { code: &'static str, detail: String },
    #[error("Internal error: {detail}")]
    Internal { detail: String },
}

impl AppError {
    /// Helper method to extract error code from any error variant
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Validation { code, .. } => code,
            AppError::NotFound { code, .. } => code,
            AppError::BadRequest { code, .. } => code,
            AppError::Internal { .. } => "INTERNAL",
        }
    }

    pub fn validation(code: &'static str, detail: impl Into<String>) -> Self {
        Self::Validation {
            code,
            detail: detail.into(),
        }
    }

    pub fn bad_request(code: &'static str, detail: impl Into<String>) -> Self {
        Self::BadRequest {
            code,
            detail: detail.into(),
        }
    }

    pub fn internal(detail: impl Into<String>) -> Self {
        Self::Internal {
            detail: detail.into(),
        }
    }
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(kind, detail) => {
                let code = match kind {
                    ValidationKind::OverComplete => "OVER_COMPLETE",
                    ValidationKind::OverIncomplete => "OVER_INCOMPLETE",
                    ValidationKind::PhaseMismatch => "PHASE_MISMATCH",
                    ValidationKind::InvalidRosterReference => "INVALID_ROSTER_REFERENCE",
                    ValidationKind::NoEligibleBatsmen => "NO_ELIGIBLE_BATSMEN",
                    ValidationKind::InvalidTarget => "INVALID_TARGET",
                    ValidationKind::InvalidOvers => "INVALID_OVERS",
                    ValidationKind::ParseToken => "PARSE_TOKEN",
                    _ => "VALIDATION",
                };
                AppError::Validation { code, detail }
            }
            DomainError::NotFound(kind, detail) => {
                let code = match kind {
                    NotFoundKind::Player => "PLAYER_NOT_FOUND",
                    NotFoundKind::Match => "MATCH_NOT_FOUND",
                    _ => "NOT_FOUND",
                };
                AppError::NotFound { code, detail }
            }
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::bad_request("SHARE_DECODE", err.to_string())
    }
}
