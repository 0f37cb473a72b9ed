//! Mock stage provider for tests and dry runs

use super::{StageOutcome, StageProvider, StageValues};
use crate::error::{ProviderError, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

/// Configuration for [`MockStageProvider`]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MockStageProviderConfig {
    #[serde(default)]
    pub name: String,

    /// Outputs added on top of the echoed inputs
    #[serde(default)]
    pub outputs: StageValues,

    /// When set, every invocation fails with this message
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fail_with: Option<String>,
}

impl MockStageProviderConfig {
    /// Build from a JSON config document. A flat object of strings is read
    /// the same way as [`MockStageProviderConfig::from_map`].
    pub fn from_value(value: &serde_json::Value) -> Result<Self> {
        if value.is_null() {
            return Ok(Self::default());
        }
        if let Some(object) = value.as_object() {
            let flat: Option<BTreeMap<String, String>> = object
                .iter()
                .map(|(k, v)| v.as_str().map(|s| (k.clone(), s.to_string())))
                .collect();
            if let Some(map) = flat {
                return Ok(Self::from_map(&map));
            }
        }
        serde_json::from_value(value.clone())
            .map_err(|e| ProviderError::BadConfig(format!("mock stage provider: {}", e)))
    }

    /// Build from a flat string map; keys other than `name` and `failWith`
    /// become string outputs
    pub fn from_map(map: &BTreeMap<String, String>) -> Self {
        let mut config = Self::default();
        for (key, value) in map {
            match key.as_str() {
                "name" => config.name = value.clone(),
                "failWith" => config.fail_with = Some(value.clone()),
                _ => {
                    config
                        .outputs
                        .insert(key.clone(), serde_json::Value::String(value.clone()));
                }
            }
        }
        config
    }
}

/// Echoes its inputs, merged with the configured outputs
#[derive(Debug, Default)]
pub struct MockStageProvider {
    config: MockStageProviderConfig,
}

impl MockStageProvider {
    pub fn new(config: MockStageProviderConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl StageProvider for MockStageProvider {
    async fn process(&self, inputs: StageValues) -> Result<StageOutcome> {
        debug!(stage = %self.config.name, inputs = inputs.len(), "Processing mock stage");

        if let Some(message) = &self.config.fail_with {
            return Err(ProviderError::Stage(message.clone()));
        }

        let mut outputs = inputs;
        outputs.extend(self.config.outputs.clone());

        Ok(StageOutcome {
            outputs,
            more_work: false,
        })
    }
}
