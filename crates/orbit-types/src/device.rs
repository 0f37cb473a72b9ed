//! Devices - passthrough endpoints without placement logic

use crate::BindingSpec;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Stored device document
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceState {
    /// Document id; may be left out of stored bodies
    #[serde(default)]
    pub id: String,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: BTreeMap<String, String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spec: Option<DeviceSpec>,
}

impl DeviceState {
    pub fn new(id: impl Into<String>, spec: DeviceSpec) -> Self {
        Self {
            id: id.into(),
            metadata: BTreeMap::new(),
            spec: Some(spec),
        }
    }
}

/// Device body
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceSpec {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub display_name: String,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: BTreeMap<String, String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub bindings: Vec<BindingSpec>,
}
