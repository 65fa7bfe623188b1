use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failure reported by the external store collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreError {
    pub code: String,
    pub message: String,
}

impl StoreError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

/// Per-event failure inside the reconciliation engine. Both variants are
/// terminal for the single event that produced them: they are reduced to a
/// displayed message and never roll back or discard reconciled state.
#[derive(Debug, Clone, Error)]
pub enum EngineError {
    #[error("store error {code}: {message}")]
    Store { code: String, message: String },
    #[error("failed to decode {collection} snapshot: {message}")]
    Decode {
        collection: &'static str,
        message: String,
    },
}

impl From<StoreError> for EngineError {
    fn from(value: StoreError) -> Self {
        Self::Store {
            code: value.code,
            message: value.message,
        }
    }
}
