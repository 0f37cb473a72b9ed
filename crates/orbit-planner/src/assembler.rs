//! Deployment plan assembly
//!
//! Combines target selection and component assignment into one
//! [`DeploymentPlan`]. A standalone target is planned by synthesizing a
//! solution and an instance for it and running the same path.

use crate::assignment::{plan_assignments, ConstraintDiagnostic};
use crate::error::{PlanningError, Result};
use crate::selector::match_targets;
use orbit_types::{
    DeploymentPlan, DeviceState, InstanceSpec, InstanceState, SolutionSpec, SolutionState,
    TargetSelector, TargetSpec, TargetState, TARGET_RUNTIME_PREFIX,
};
use std::collections::BTreeMap;
use tracing::{info, instrument, warn};

/// A plan together with the constraint diagnostics raised while building it
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlannedDeployment {
    pub plan: DeploymentPlan,
    pub diagnostics: Vec<ConstraintDiagnostic>,
}

/// Build the plan for `instance` deploying `solution` onto the matching
/// subset of `targets`
#[instrument(skip_all, fields(instance = %instance.id, solution = %solution.id))]
pub fn assemble_deployment(
    instance: &InstanceState,
    solution: &SolutionState,
    targets: &[TargetState],
    devices: &[DeviceState],
) -> Result<PlannedDeployment> {
    let solution_spec = solution
        .spec
        .as_ref()
        .ok_or_else(|| PlanningError::invalid_spec("solution", &solution.id))?;

    let mut selected: BTreeMap<String, TargetSpec> = BTreeMap::new();
    for target in match_targets(instance, targets) {
        let spec = target
            .spec
            .ok_or_else(|| PlanningError::invalid_spec("target", &target.id))?;
        selected.insert(target.id, spec);
    }

    build_plan(instance, solution, solution_spec, selected, devices)
}

/// Build the plan for a standalone target
///
/// The target is placed directly rather than matched, so the plan always
/// carries exactly that one target.
#[instrument(skip_all, fields(target = %target.id))]
pub fn assemble_deployment_from_target(target: &TargetState) -> Result<PlannedDeployment> {
    let (solution, instance) = target_runtime(target)?;
    let spec = target
        .spec
        .clone()
        .ok_or_else(|| PlanningError::invalid_spec("target", &target.id))?;
    let solution_spec = solution
        .spec
        .as_ref()
        .ok_or_else(|| PlanningError::invalid_spec("solution", &solution.id))?;

    let selected = BTreeMap::from([(target.id.clone(), spec)]);
    build_plan(&instance, &solution, solution_spec, selected, &[])
}

fn build_plan(
    instance: &InstanceState,
    solution: &SolutionState,
    solution_spec: &SolutionSpec,
    selected: BTreeMap<String, TargetSpec>,
    devices: &[DeviceState],
) -> Result<PlannedDeployment> {
    let report = plan_assignments(&solution_spec.components, &selected)?;

    let mut instance_spec = instance.spec.clone().unwrap_or_default();
    instance_spec.name = instance.id.clone();

    let plan = DeploymentPlan {
        solution_name: solution.id.clone(),
        solution: solution_spec.clone(),
        instance: instance_spec,
        targets: selected,
        assignments: report.assignments,
        devices: device_specs(devices),
    };

    info!(
        targets = plan.targets.len(),
        assigned = plan
            .assignments
            .values()
            .filter(|assignment| !assignment.is_empty())
            .count(),
        diagnostics = report.diagnostics.len(),
        "Deployment planned"
    );

    Ok(PlannedDeployment {
        plan,
        diagnostics: report.diagnostics,
    })
}

/// Build the plan for `instance`; diagnostics are logged and dropped
pub fn create_deployment(
    instance: &InstanceState,
    solution: &SolutionState,
    targets: &[TargetState],
    devices: &[DeviceState],
) -> Result<DeploymentPlan> {
    assemble_deployment(instance, solution, targets, devices).map(|planned| planned.plan)
}

/// Build the plan for a standalone target; diagnostics are logged and dropped
pub fn create_deployment_from_target(target: &TargetState) -> Result<DeploymentPlan> {
    assemble_deployment_from_target(target).map(|planned| planned.plan)
}

/// Synthesize the solution and instance that deploy a target's own components
/// onto that target
pub fn target_runtime(target: &TargetState) -> Result<(SolutionState, InstanceState)> {
    let spec = target
        .spec
        .as_ref()
        .ok_or_else(|| PlanningError::invalid_spec("target", &target.id))?;

    let runtime_id = format!("{}{}", TARGET_RUNTIME_PREFIX, target.id);

    let solution = SolutionState {
        id: runtime_id.clone(),
        metadata: target.metadata.clone(),
        spec: Some(SolutionSpec {
            display_name: runtime_id.clone(),
            scope: spec.scope.clone(),
            metadata: spec.metadata.clone(),
            components: spec.components.clone(),
        }),
    };

    let instance = InstanceState {
        id: runtime_id.clone(),
        metadata: target.metadata.clone(),
        spec: Some(InstanceSpec {
            name: runtime_id.clone(),
            display_name: runtime_id.clone(),
            scope: spec.scope.clone(),
            solution: runtime_id,
            target: TargetSelector::by_name(target.id.clone()),
            metadata: BTreeMap::new(),
        }),
    };

    Ok((solution, instance))
}

fn device_specs(devices: &[DeviceState]) -> Vec<orbit_types::DeviceSpec> {
    devices
        .iter()
        .filter_map(|device| {
            if device.spec.is_none() {
                warn!(device = %device.id, "Skipping device without spec");
            }
            device.spec.clone()
        })
        .collect()
}
