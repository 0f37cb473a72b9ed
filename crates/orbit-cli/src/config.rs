//! Configuration for the orbit CLI
//!
//! Sources, lowest precedence first: built-in defaults, the file passed with
//! `--config` (or `ORBIT_CONFIG`), then `ORBIT_`-prefixed environment
//! variables such as `ORBIT_LOGGING_LEVEL=debug`.

use crate::output::OutputFormat;
use orbit_providers::{ProviderConfig, MEMORY_STATE_PROVIDER};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Main CLI configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CliConfig {
    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub output: OutputConfig,

    /// State provider the planner loads documents into
    #[serde(default)]
    pub state: StateConfig,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level, overridden by `RUST_LOG`
    #[serde(default = "default_log_level")]
    pub level: String,

    /// JSON format
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,
}

/// State provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateConfig {
    /// Registered provider type
    #[serde(default = "default_state_provider")]
    pub provider: String,

    #[serde(default)]
    pub config: BTreeMap<String, String>,
}

impl Default for StateConfig {
    fn default() -> Self {
        Self {
            provider: default_state_provider(),
            config: BTreeMap::new(),
        }
    }
}

impl StateConfig {
    pub fn provider_config(&self) -> ProviderConfig {
        ProviderConfig::new(self.provider.clone()).with_string_config(&self.config)
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_state_provider() -> String {
    MEMORY_STATE_PROVIDER.to_string()
}

impl CliConfig {
    /// Load configuration from defaults, an optional file and the environment
    pub fn load(path: Option<&str>) -> Result<Self, config::ConfigError> {
        let mut builder = config::Config::builder();

        // Add default configuration
        builder = builder.add_source(config::Config::try_from(&CliConfig::default())?);

        // An explicitly named file must exist
        if let Some(path) = path {
            builder = builder.add_source(config::File::with_name(path).required(true));
        }

        // Add environment variables with ORBIT_ prefix
        builder = builder.add_source(
            config::Environment::with_prefix("ORBIT")
                .separator("_")
                .try_parsing(true),
        );

        builder.build()?.try_deserialize()
    }
}
