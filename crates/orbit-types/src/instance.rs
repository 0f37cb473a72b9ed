//! Instances - deployment intents

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Stored instance document
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstanceState {
    /// Document id; may be left out of stored bodies
    #[serde(default)]
    pub id: String,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: BTreeMap<String, String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spec: Option<InstanceSpec>,
}

impl InstanceState {
    pub fn new(id: impl Into<String>, spec: InstanceSpec) -> Self {
        Self {
            id: id.into(),
            metadata: BTreeMap::new(),
            spec: Some(spec),
        }
    }

    /// Target selector, or an empty one when the spec is missing
    pub fn selector(&self) -> TargetSelector {
        self.spec
            .as_ref()
            .map(|spec| spec.target.clone())
            .unwrap_or_default()
    }
}

/// Instance body
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstanceSpec {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub display_name: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub scope: String,

    /// Id of the solution this instance deploys
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub solution: String,

    #[serde(default)]
    pub target: TargetSelector,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: BTreeMap<String, String>,
}

impl InstanceSpec {
    pub fn new(solution: impl Into<String>, target: TargetSelector) -> Self {
        Self {
            solution: solution.into(),
            target,
            ..Default::default()
        }
    }
}

/// Which targets an instance lands on.
///
/// `name` is an exact target-id match and `selector` a conjunction of
/// property equalities; when both are set a target must satisfy both.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetSelector {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub selector: BTreeMap<String, String>,
}

impl TargetSelector {
    pub fn by_name(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            selector: BTreeMap::new(),
        }
    }

    pub fn by_properties<K, V>(properties: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            name: String::new(),
            selector: properties
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Add a property equality to the selector
    pub fn and_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.selector.insert(key.into(), value.into());
        self
    }

    /// Neither a name nor any property equality is set
    pub fn is_empty(&self) -> bool {
        self.name.is_empty() && self.selector.is_empty()
    }
}
