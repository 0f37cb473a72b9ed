//! Provider error types

use thiserror::Error;

/// Provider errors
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("Entry not found: {0}")]
    NotFound(String),

    #[error("Bad provider config: {0}")]
    BadConfig(String),

    #[error("Unknown provider type: {0}")]
    UnknownProvider(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Stage failed: {0}")]
    Stage(String),
}

/// Result type for provider operations
pub type Result<T> = std::result::Result<T, ProviderError>;
