//! CLI error types

use thiserror::Error;

/// CLI errors
#[derive(Debug, Error)]
pub enum CliError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Planning failed: {0}")]
    Planning(#[from] orbit_planner::PlanningError),

    #[error("Provider error: {0}")]
    Provider(#[from] orbit_providers::ProviderError),

    #[error("Expression error: {0}")]
    Expr(#[from] orbit_expr::ExprError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;
