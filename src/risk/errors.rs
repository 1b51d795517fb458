// Risk pipeline error types
use thiserror::Error;

use crate::providers::ProviderError;

/// Hard failures of the scoring and ranking pipelines.
///
/// Provider outages never end up here; they degrade individual factors or
/// lookups instead. Only contract violations and internal faults surface.
#[derive(Error, Debug)]
pub enum RiskError {
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl RiskError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        RiskError::InvalidInput { message: message.into() }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        RiskError::Internal { message: message.into() }
    }
}
