//! State storage capability
//!
//! The planner reads solutions, instances, targets and devices through this
//! trait. Bodies are opaque JSON documents; callers decode them into the
//! `orbit-types` model.

mod memory;

pub use memory::{MemoryStateProvider, MemoryStateProviderConfig};

use crate::error::{ProviderError, Result};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// One stored document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateEntry {
    pub id: String,

    pub body: serde_json::Value,

    /// Version tag assigned by the provider on upsert
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub etag: String,
}

impl StateEntry {
    pub fn new(id: impl Into<String>, body: serde_json::Value) -> Self {
        Self {
            id: id.into(),
            body,
            etag: String::new(),
        }
    }

    /// Build an entry from any serializable document
    pub fn from_document<T: Serialize>(id: impl Into<String>, document: &T) -> Result<Self> {
        Ok(Self::new(id, serde_json::to_value(document)?))
    }

    /// Decode the body into a typed document
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_value(self.body.clone()).map_err(ProviderError::from)
    }
}

/// Key/value store for state documents
#[async_trait]
pub trait StateProvider: Send + Sync {
    /// Get an entry by id
    async fn get(&self, id: &str) -> Result<StateEntry>;

    /// Insert or replace an entry, returning its new etag
    async fn upsert(&self, entry: StateEntry) -> Result<String>;

    /// Remove an entry
    async fn delete(&self, id: &str) -> Result<()>;

    /// All entries, ordered by id
    async fn list(&self) -> Result<Vec<StateEntry>>;
}
