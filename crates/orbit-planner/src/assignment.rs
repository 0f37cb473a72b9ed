//! Component-to-target assignment
//!
//! Every component is considered for every selected target. A component
//! lands on a target when its constraint holds against that target's
//! properties. Targets receive an assignment string `{a}{b}...` listing the
//! components that landed on them, in solution order.

use crate::error::Result;
use orbit_expr::{Constraint, ExprError};
use orbit_types::{first_duplicate_name, ComponentSpec, TargetSpec};
use std::collections::BTreeMap;
use std::fmt;
use tracing::{debug, warn};

/// A constraint that could not be decided for one component on one target.
/// The component is left off that target.
#[derive(Debug, Clone, PartialEq)]
pub struct ConstraintDiagnostic {
    pub component: String,
    pub target: String,
    pub error: ExprError,
}

impl fmt::Display for ConstraintDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "component '{}' excluded from target '{}': {}",
            self.component, self.target, self.error
        )
    }
}

/// Assignments plus the diagnostics produced while computing them
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AssignmentReport {
    pub assignments: BTreeMap<String, String>,
    pub diagnostics: Vec<ConstraintDiagnostic>,
}

/// Assign `components` to `targets`, keeping diagnostics
pub fn plan_assignments(
    components: &[ComponentSpec],
    targets: &BTreeMap<String, TargetSpec>,
) -> Result<AssignmentReport> {
    if let Some(name) = first_duplicate_name(components) {
        warn!(component = %name, "Duplicate component name; it is assigned once per occurrence");
    }

    // Parse each constraint once; evaluate it per target
    let constraints: Vec<(&ComponentSpec, std::result::Result<Constraint, ExprError>)> =
        components
            .iter()
            .map(|component| (component, Constraint::parse(&component.constraints)))
            .collect();

    let mut report = AssignmentReport::default();

    for (target_id, target) in targets {
        let mut assignment = String::new();

        for (component, constraint) in &constraints {
            let eligible = constraint
                .as_ref()
                .map_err(Clone::clone)
                .and_then(|c| c.evaluate(&target.properties));

            match eligible {
                Ok(true) => {
                    assignment.push('{');
                    assignment.push_str(&component.name);
                    assignment.push('}');
                }
                Ok(false) => {
                    debug!(component = %component.name, target = %target_id, "Constraint not met");
                }
                Err(error) => {
                    warn!(
                        component = %component.name,
                        target = %target_id,
                        error = %error,
                        "Constraint failed; component excluded from target"
                    );
                    report.diagnostics.push(ConstraintDiagnostic {
                        component: component.name.clone(),
                        target: target_id.clone(),
                        error,
                    });
                }
            }
        }

        report.assignments.insert(target_id.clone(), assignment);
    }

    Ok(report)
}

/// Assign `components` to `targets`; diagnostics are logged and dropped
pub fn assign_components_to_targets(
    components: &[ComponentSpec],
    targets: &BTreeMap<String, TargetSpec>,
) -> Result<BTreeMap<String, String>> {
    plan_assignments(components, targets).map(|report| report.assignments)
}
