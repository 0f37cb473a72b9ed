//! Solutions - what to deploy

use crate::component::{first_duplicate_name, ComponentSpec};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Stored solution document
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SolutionState {
    /// Document id; may be left out of stored bodies
    #[serde(default)]
    pub id: String,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: BTreeMap<String, String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spec: Option<SolutionSpec>,
}

impl SolutionState {
    pub fn new(id: impl Into<String>, spec: SolutionSpec) -> Self {
        Self {
            id: id.into(),
            metadata: BTreeMap::new(),
            spec: Some(spec),
        }
    }
}

/// Solution body. Component order is significant: assignment strings
/// follow it.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SolutionSpec {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub display_name: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub scope: String,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: BTreeMap<String, String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub components: Vec<ComponentSpec>,
}

impl SolutionSpec {
    pub fn with_components(components: Vec<ComponentSpec>) -> Self {
        Self {
            components,
            ..Default::default()
        }
    }

    /// Look up a component by name
    pub fn component(&self, name: &str) -> Option<&ComponentSpec> {
        self.components.iter().find(|c| c.name == name)
    }

    /// First component name that appears more than once, if any
    pub fn duplicate_component(&self) -> Option<&str> {
        first_duplicate_name(&self.components)
    }
}
