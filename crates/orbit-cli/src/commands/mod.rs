//! CLI commands

pub mod eval;
pub mod matching;
pub mod plan;

use crate::config::CliConfig;
use crate::output::OutputFormat;
use orbit_providers::ProviderRegistry;

/// Settings shared by every command
pub struct CommandContext {
    pub config: CliConfig,
    pub format: OutputFormat,
    pub show_diagnostics: bool,
    pub registry: ProviderRegistry,
}
