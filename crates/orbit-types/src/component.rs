//! Components - the deployable units of a solution

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// One deployable unit within a solution or target
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentSpec {
    /// Name, unique within its solution
    pub name: String,

    /// Component type (e.g. `helm.v3`, `yaml.k8s`)
    #[serde(rename = "type", default, skip_serializing_if = "String::is_empty")]
    pub component_type: String,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: BTreeMap<String, String>,

    /// Provider-specific settings; values may be nested documents
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: BTreeMap<String, serde_json::Value>,

    /// Placement constraint, `${{ ... }}`. Empty means eligible everywhere.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub constraints: String,
}

impl ComponentSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Set the component type
    pub fn with_type(mut self, component_type: impl Into<String>) -> Self {
        self.component_type = component_type.into();
        self
    }

    /// Set the placement constraint
    pub fn with_constraints(mut self, constraints: impl Into<String>) -> Self {
        self.constraints = constraints.into();
        self
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    pub fn with_property(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.properties.insert(key.into(), value);
        self
    }

    /// Whether the component carries a non-blank constraint
    pub fn is_constrained(&self) -> bool {
        !self.constraints.trim().is_empty()
    }
}

/// First component name that occurs more than once in `components`
pub fn first_duplicate_name(components: &[ComponentSpec]) -> Option<&str> {
    let mut seen = HashSet::with_capacity(components.len());
    components
        .iter()
        .map(|c| c.name.as_str())
        .find(|name| !seen.insert(*name))
}
