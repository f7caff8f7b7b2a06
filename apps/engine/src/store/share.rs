//! Share codec port: serialize a match for a spectator link and back.
//!
//! The production app hands the serialized form to an external compression
//! service; the engine only requires round-trip fidelity of the full state
//! shape, so the contract is two functions and nothing else.

use crate::domain::state::MatchState;
use crate::error::AppError;

pub trait ShareCodec {
    /// Opaque compact form suitable for embedding in a shareable reference.
    fn encode(&self, state: &MatchState) -> Result<String, AppError>;
    /// Rebuild a read-only match from the opaque form.
    fn decode(&self, raw: &str) -> Result<MatchState, AppError>;
}

/// Identity codec over the JSON wire shape. Stands in wherever no external
/// compression oracle is wired up.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonShareCodec;

impl ShareCodec for JsonShareCodec {
    fn encode(&self, state: &MatchState) -> Result<String, AppError> {
        serde_json::to_string(state).map_err(|e| AppError::internal(e.to_string()))
    }

    fn decode(&self, raw: &str) -> Result<MatchState, AppError> {
        Ok(serde_json::from_str(raw)?)
    }
}
