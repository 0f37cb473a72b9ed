//! Planning error types

use orbit_providers::ProviderError;
use thiserror::Error;

/// Planning errors
///
/// Constraint failures are not errors; they exclude a component from a
/// target and surface as diagnostics instead.
#[derive(Debug, Error)]
pub enum PlanningError {
    #[error("Invalid {kind} '{id}': spec is missing")]
    InvalidSpec { kind: &'static str, id: String },

    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },

    #[error("Failed to decode {kind} '{id}': {message}")]
    Decode {
        kind: &'static str,
        id: String,
        message: String,
    },

    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),
}

impl PlanningError {
    pub(crate) fn invalid_spec(kind: &'static str, id: impl Into<String>) -> Self {
        Self::InvalidSpec {
            kind,
            id: id.into(),
        }
    }
}

/// Result type for planning operations
pub type Result<T> = std::result::Result<T, PlanningError>;
