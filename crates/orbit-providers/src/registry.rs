//! Provider registry
//!
//! Maps provider type names to constructors. Each constructor builds its own
//! config struct from the supplied JSON, so two providers of the same type
//! never share configuration.

use crate::error::{ProviderError, Result};
use crate::stage::{MockStageProvider, MockStageProviderConfig, StageProvider};
use crate::state::{MemoryStateProvider, MemoryStateProviderConfig, StateProvider};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::debug;

/// Type name of the in-memory state provider
pub const MEMORY_STATE_PROVIDER: &str = "providers.state.memory";

/// Type name of the mock stage provider
pub const MOCK_STAGE_PROVIDER: &str = "providers.stage.mock";

/// Provider type plus its raw configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProviderConfig {
    #[serde(rename = "type")]
    pub provider_type: String,

    #[serde(default)]
    pub config: serde_json::Value,
}

impl ProviderConfig {
    pub fn new(provider_type: impl Into<String>) -> Self {
        Self {
            provider_type: provider_type.into(),
            config: serde_json::Value::Null,
        }
    }

    pub fn with_config(mut self, config: serde_json::Value) -> Self {
        self.config = config;
        self
    }

    /// Use a flat string map as the configuration
    pub fn with_string_config(mut self, config: &BTreeMap<String, String>) -> Self {
        self.config = serde_json::Value::Object(
            config
                .iter()
                .map(|(k, v)| (k.clone(), serde_json::Value::String(v.clone())))
                .collect(),
        );
        self
    }
}

/// Constructor for state providers
pub type StateFactory = fn(&serde_json::Value) -> Result<Arc<dyn StateProvider>>;

/// Constructor for stage providers
pub type StageFactory = fn(&serde_json::Value) -> Result<Arc<dyn StageProvider>>;

/// String-keyed provider constructors
#[derive(Clone, Default)]
pub struct ProviderRegistry {
    state: BTreeMap<String, StateFactory>,
    stage: BTreeMap<String, StageFactory>,
}

impl ProviderRegistry {
    /// Empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the built-in providers
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register_state(MEMORY_STATE_PROVIDER, memory_state);
        registry.register_stage(MOCK_STAGE_PROVIDER, mock_stage);
        registry
    }

    pub fn register_state(&mut self, provider_type: impl Into<String>, factory: StateFactory) {
        self.state.insert(provider_type.into(), factory);
    }

    pub fn register_stage(&mut self, provider_type: impl Into<String>, factory: StageFactory) {
        self.stage.insert(provider_type.into(), factory);
    }

    /// Construct a state provider
    pub fn create_state(&self, config: &ProviderConfig) -> Result<Arc<dyn StateProvider>> {
        let factory = self
            .state
            .get(&config.provider_type)
            .ok_or_else(|| ProviderError::UnknownProvider(config.provider_type.clone()))?;

        debug!(provider_type = %config.provider_type, "Creating state provider");
        factory(&config.config)
    }

    /// Construct a stage provider
    pub fn create_stage(&self, config: &ProviderConfig) -> Result<Arc<dyn StageProvider>> {
        let factory = self
            .stage
            .get(&config.provider_type)
            .ok_or_else(|| ProviderError::UnknownProvider(config.provider_type.clone()))?;

        debug!(provider_type = %config.provider_type, "Creating stage provider");
        factory(&config.config)
    }

    pub fn state_types(&self) -> Vec<&str> {
        self.state.keys().map(String::as_str).collect()
    }

    pub fn stage_types(&self) -> Vec<&str> {
        self.stage.keys().map(String::as_str).collect()
    }
}

fn memory_state(config: &serde_json::Value) -> Result<Arc<dyn StateProvider>> {
    let config = MemoryStateProviderConfig::from_value(config)?;
    Ok(Arc::new(MemoryStateProvider::new(config)))
}

fn mock_stage(config: &serde_json::Value) -> Result<Arc<dyn StageProvider>> {
    let config = MockStageProviderConfig::from_value(config)?;
    Ok(Arc::new(MockStageProvider::new(config)))
}
