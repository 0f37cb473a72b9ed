//! Deployment plans - the output of planning
//!
//! A plan is recomputed on every planning call and never mutated in place.
//! Downstream reconcilers rely on the JSON field names `solutionName`,
//! `solution`, `instance`, `targets` and `assignments`.

use crate::{DeviceSpec, InstanceSpec, SolutionSpec, TargetSpec};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Prefix of solutions synthesized for a standalone target
pub const TARGET_RUNTIME_PREFIX: &str = "target-runtime-";

/// Canonical deployment plan
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentPlan {
    /// Id of the planned solution
    pub solution_name: String,

    pub solution: SolutionSpec,

    pub instance: InstanceSpec,

    /// Selected targets, keyed by target id
    pub targets: BTreeMap<String, TargetSpec>,

    /// Assignment string per selected target, e.g. `{api}{db}`
    pub assignments: BTreeMap<String, String>,

    /// Devices carried through for device-aware consumers
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub devices: Vec<DeviceSpec>,
}

impl DeploymentPlan {
    /// Component names assigned to `target_id`, in solution order
    pub fn assigned_components(&self, target_id: &str) -> Vec<&str> {
        self.assignments
            .get(target_id)
            .map(|assignment| split_assignment(assignment))
            .unwrap_or_default()
    }

    /// Whether no component landed on any target
    pub fn is_empty(&self) -> bool {
        self.assignments.values().all(String::is_empty)
    }

    /// Whether this plan was synthesized from a single target
    pub fn is_target_runtime(&self) -> bool {
        self.solution_name.starts_with(TARGET_RUNTIME_PREFIX)
    }
}

/// Split an assignment string `{a}{b}` into `["a", "b"]`
pub fn split_assignment(assignment: &str) -> Vec<&str> {
    assignment
        .split('}')
        .filter_map(|token| token.strip_prefix('{'))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_plan_field_names() {
        let mut plan = DeploymentPlan {
            solution_name: "sol".into(),
            ..Default::default()
        };
        plan.targets.insert("t1".into(), TargetSpec::default());
        plan.assignments.insert("t1".into(), "{a}".into());

        let value = serde_json::to_value(&plan).unwrap();
        let object = value.as_object().unwrap();
        let mut keys: Vec<&str> = object.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(
            keys,
            vec!["assignments", "instance", "solution", "solutionName", "targets"]
        );
        assert_eq!(value["assignments"], json!({"t1": "{a}"}));
    }

    #[test]
    fn test_split_assignment() {
        assert_eq!(split_assignment("{a}{b}{c}"), vec!["a", "b", "c"]);
        assert!(split_assignment("").is_empty());
    }

    #[test]
    fn test_assigned_components() {
        let mut plan = DeploymentPlan::default();
        plan.assignments.insert("t1".into(), "{api}{db}".into());
        plan.assignments.insert("t2".into(), String::new());

        assert_eq!(plan.assigned_components("t1"), vec!["api", "db"]);
        assert!(plan.assigned_components("t2").is_empty());
        assert!(plan.assigned_components("t3").is_empty());
        assert!(!plan.is_empty());
    }

    #[test]
    fn test_target_runtime_marker() {
        let plan = DeploymentPlan {
            solution_name: format!("{}edge", TARGET_RUNTIME_PREFIX),
            ..Default::default()
        };
        assert!(plan.is_target_runtime());
        assert!(plan.is_empty());
    }
}
