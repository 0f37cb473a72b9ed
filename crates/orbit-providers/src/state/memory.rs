//! In-memory state provider
//!
//! Suitable for development, tests and the CLI. Entries live only as long as
//! the provider.

use super::{StateEntry, StateProvider};
use crate::error::{ProviderError, Result};
use async_trait::async_trait;
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::debug;

/// Configuration for [`MemoryStateProvider`]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MemoryStateProviderConfig {
    /// Name used in log output
    #[serde(default)]
    pub name: String,
}

impl MemoryStateProviderConfig {
    /// Build from a JSON config document; `null` yields the default
    pub fn from_value(value: &serde_json::Value) -> Result<Self> {
        if value.is_null() {
            return Ok(Self::default());
        }
        serde_json::from_value(value.clone())
            .map_err(|e| ProviderError::BadConfig(format!("memory state provider: {}", e)))
    }

    /// Build from a flat string map
    pub fn from_map(map: &BTreeMap<String, String>) -> Self {
        Self {
            name: map.get("name").cloned().unwrap_or_default(),
        }
    }
}

/// State provider backed by a concurrent map
pub struct MemoryStateProvider {
    config: MemoryStateProviderConfig,
    entries: DashMap<String, StateEntry>,
    version: AtomicU64,
}

impl MemoryStateProvider {
    pub fn new(config: MemoryStateProviderConfig) -> Self {
        Self {
            config,
            entries: DashMap::new(),
            version: AtomicU64::new(0),
        }
    }

    pub fn config(&self) -> &MemoryStateProviderConfig {
        &self.config
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for MemoryStateProvider {
    fn default() -> Self {
        Self::new(MemoryStateProviderConfig::default())
    }
}

#[async_trait]
impl StateProvider for MemoryStateProvider {
    async fn get(&self, id: &str) -> Result<StateEntry> {
        self.entries
            .get(id)
            .map(|e| e.clone())
            .ok_or_else(|| ProviderError::NotFound(id.to_string()))
    }

    async fn upsert(&self, mut entry: StateEntry) -> Result<String> {
        let etag = (self.version.fetch_add(1, Ordering::SeqCst) + 1).to_string();
        entry.etag = etag.clone();

        debug!(provider = %self.config.name, id = %entry.id, etag = %etag, "Upserted state entry");
        self.entries.insert(entry.id.clone(), entry);

        Ok(etag)
    }

    async fn delete(&self, id: &str) -> Result<()> {
        self.entries
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| ProviderError::NotFound(id.to_string()))
    }

    async fn list(&self) -> Result<Vec<StateEntry>> {
        let mut entries: Vec<StateEntry> = self.entries.iter().map(|e| e.value().clone()).collect();
        entries.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_upsert_and_get() {
        let provider = MemoryStateProvider::default();

        let etag = provider
            .upsert(StateEntry::new("sol", json!({"id": "sol"})))
            .await
            .unwrap();
        assert_eq!(etag, "1");

        let entry = provider.get("sol").await.unwrap();
        assert_eq!(entry.body["id"], "sol");
        assert_eq!(entry.etag, "1");
    }

    #[tokio::test]
    async fn test_upsert_replaces_and_bumps_etag() {
        let provider = MemoryStateProvider::default();
        provider
            .upsert(StateEntry::new("t1", json!({"v": 1})))
            .await
            .unwrap();
        let etag = provider
            .upsert(StateEntry::new("t1", json!({"v": 2})))
            .await
            .unwrap();

        assert_eq!(etag, "2");
        assert_eq!(provider.get("t1").await.unwrap().body["v"], 2);
        assert_eq!(provider.len(), 1);
    }

    #[tokio::test]
    async fn test_get_missing() {
        let provider = MemoryStateProvider::default();
        let err = provider.get("nope").await.unwrap_err();
        assert!(matches!(err, ProviderError::NotFound(id) if id == "nope"));
    }

    #[tokio::test]
    async fn test_delete() {
        let provider = MemoryStateProvider::default();
        provider
            .upsert(StateEntry::new("d1", json!({})))
            .await
            .unwrap();

        provider.delete("d1").await.unwrap();
        assert!(provider.is_empty());
        assert!(provider.delete("d1").await.is_err());
    }

    #[tokio::test]
    async fn test_list_is_ordered() {
        let provider = MemoryStateProvider::default();
        for id in ["c", "a", "b"] {
            provider
                .upsert(StateEntry::new(id, json!({})))
                .await
                .unwrap();
        }

        let ids: Vec<String> = provider
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|e| e.id)
            .collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_config_sources() {
        let from_json = MemoryStateProviderConfig::from_value(&json!({"name": "targets"})).unwrap();
        assert_eq!(from_json.name, "targets");

        let from_null = MemoryStateProviderConfig::from_value(&serde_json::Value::Null).unwrap();
        assert_eq!(from_null, MemoryStateProviderConfig::default());

        let mut map = BTreeMap::new();
        map.insert("name".to_string(), "devices".to_string());
        assert_eq!(MemoryStateProviderConfig::from_map(&map).name, "devices");

        assert!(MemoryStateProviderConfig::from_value(&json!({"name": 5})).is_err());
    }
}
