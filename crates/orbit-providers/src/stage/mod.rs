//! Stage capability
//!
//! A stage takes named inputs and produces named outputs. `more_work` tells
//! the caller to invoke the stage again; its meaning is up to the stage.

mod mock;

pub use mock::{MockStageProvider, MockStageProviderConfig};

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Stage inputs and outputs
pub type StageValues = BTreeMap<String, serde_json::Value>;

/// Result of one stage invocation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StageOutcome {
    pub outputs: StageValues,

    #[serde(default)]
    pub more_work: bool,
}

/// A processing step driven by the surrounding orchestrator
#[async_trait]
pub trait StageProvider: Send + Sync {
    async fn process(&self, inputs: StageValues) -> Result<StageOutcome>;
}
