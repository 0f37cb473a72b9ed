//! Target selection
//!
//! An instance names the targets it wants either directly by id, by a set of
//! required target properties, or both. When both are given a target has to
//! satisfy both.

use orbit_types::{InstanceState, TargetSelector, TargetState};
use std::collections::HashSet;
use tracing::debug;

/// Targets selected by `instance`, in input order, each id at most once
pub fn match_targets(instance: &InstanceState, targets: &[TargetState]) -> Vec<TargetState> {
    let selector = instance.selector();
    if selector.is_empty() {
        debug!(instance = %instance.id, "Instance has no target selector; nothing matches");
        return Vec::new();
    }

    let mut seen = HashSet::new();
    let mut matched = Vec::new();
    for target in targets {
        if selects(&selector, target) && seen.insert(target.id.as_str()) {
            matched.push(target.clone());
        }
    }

    debug!(
        instance = %instance.id,
        candidates = targets.len(),
        matched = matched.len(),
        "Matched targets"
    );
    matched
}

/// Whether `selector` picks `target`
pub fn selects(selector: &TargetSelector, target: &TargetState) -> bool {
    if selector.is_empty() {
        return false;
    }
    if !selector.name.is_empty() && selector.name != target.id {
        return false;
    }
    selector
        .selector
        .iter()
        .all(|(key, value)| target.property(key) == Some(value.as_str()))
}
