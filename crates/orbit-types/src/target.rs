//! Targets - placement-eligible endpoints

use crate::ComponentSpec;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Stored target document
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetState {
    /// Document id; may be left out of stored bodies
    #[serde(default)]
    pub id: String,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: BTreeMap<String, String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spec: Option<TargetSpec>,
}

impl TargetState {
    pub fn new(id: impl Into<String>, spec: TargetSpec) -> Self {
        Self {
            id: id.into(),
            metadata: BTreeMap::new(),
            spec: Some(spec),
        }
    }

    /// Property value, `None` when the key or the whole spec is absent
    pub fn property(&self, key: &str) -> Option<&str> {
        self.spec
            .as_ref()
            .and_then(|spec| spec.properties.get(key))
            .map(String::as_str)
    }
}

/// Target body
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetSpec {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub display_name: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub scope: String,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: BTreeMap<String, String>,

    /// Facts constraints are evaluated against (`OS`, `arch`, `site`, ...)
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: BTreeMap<String, String>,

    /// Runtime components the target itself hosts
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub components: Vec<ComponentSpec>,

    /// Which provider handles which component role on this target
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub topologies: Vec<TopologySpec>,

    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub force_redeploy: bool,
}

impl TargetSpec {
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    pub fn with_components(mut self, components: Vec<ComponentSpec>) -> Self {
        self.components = components;
        self
    }

    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = scope.into();
        self
    }

    /// First binding across all topologies that serves `role`
    pub fn binding_for(&self, role: &str) -> Option<&BindingSpec> {
        self.topologies
            .iter()
            .flat_map(|t| t.bindings.iter())
            .find(|b| b.role == role)
    }
}

/// Provider bindings for a target, optionally narrowed to one device
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopologySpec {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub device: String,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub selector: BTreeMap<String, String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub bindings: Vec<BindingSpec>,
}

/// Maps a component role (usually its type) to a provider
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BindingSpec {
    pub role: String,

    pub provider: String,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub config: BTreeMap<String, String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_property_lookup() {
        let target = TargetState::new("edge-1", TargetSpec::default().with_property("OS", "linux"));
        assert_eq!(target.property("OS"), Some("linux"));
        assert_eq!(target.property("arch"), None);

        let bare = TargetState {
            id: "bare".into(),
            ..Default::default()
        };
        assert_eq!(bare.property("OS"), None);
    }

    #[test]
    fn test_force_redeploy_omitted_when_false() {
        let spec = TargetSpec::default().with_scope("alice-springs");
        let value = serde_json::to_value(&spec).unwrap();
        assert_eq!(value, json!({"scope": "alice-springs"}));

        let spec = TargetSpec {
            force_redeploy: true,
            ..Default::default()
        };
        let value = serde_json::to_value(&spec).unwrap();
        assert_eq!(value, json!({"forceRedeploy": true}));
    }

    #[test]
    fn test_topology_bindings() {
        let raw = json!({
            "displayName": "int-virtual-02",
            "topologies": [{
                "bindings": [
                    {"role": "instance", "provider": "providers.target.k8s", "config": {"inCluster": "true"}},
                    {"role": "helm.v3", "provider": "providers.target.helm", "config": {"inCluster": "true"}}
                ]
            }]
        });
        let spec: TargetSpec = serde_json::from_value(raw).unwrap();
        let binding = spec.binding_for("helm.v3").unwrap();
        assert_eq!(binding.provider, "providers.target.helm");
        assert_eq!(binding.config["inCluster"], "true");
        assert!(spec.binding_for("yaml.k8s").is_none());
    }
}
