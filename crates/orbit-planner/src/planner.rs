//! Deployment planner service
//!
//! Loads planning inputs from state providers and hands them to the
//! assembler. The full candidate set is fetched before planning starts.

use crate::assembler::{assemble_deployment, assemble_deployment_from_target, PlannedDeployment};
use crate::error::{PlanningError, Result};
use orbit_providers::{
    ProviderConfig, ProviderError, ProviderRegistry, StateEntry, StateProvider,
};
use orbit_types::{DeviceState, InstanceState, SolutionState, TargetState};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::{debug, instrument};

/// State providers holding each kind of planning input
#[derive(Clone)]
pub struct PlannerStores {
    pub solutions: Arc<dyn StateProvider>,
    pub instances: Arc<dyn StateProvider>,
    pub targets: Arc<dyn StateProvider>,
    pub devices: Arc<dyn StateProvider>,
}

impl PlannerStores {
    /// One fresh provider per kind, all built from `config`
    pub fn from_registry(registry: &ProviderRegistry, config: &ProviderConfig) -> Result<Self> {
        Ok(Self {
            solutions: registry.create_state(config)?,
            instances: registry.create_state(config)?,
            targets: registry.create_state(config)?,
            devices: registry.create_state(config)?,
        })
    }
}

/// Documents the planner reads from a state provider
trait StateDocument: DeserializeOwned {
    const KIND: &'static str;

    fn id_mut(&mut self) -> &mut String;
}

impl StateDocument for SolutionState {
    const KIND: &'static str = "solution";

    fn id_mut(&mut self) -> &mut String {
        &mut self.id
    }
}

impl StateDocument for InstanceState {
    const KIND: &'static str = "instance";

    fn id_mut(&mut self) -> &mut String {
        &mut self.id
    }
}

impl StateDocument for TargetState {
    const KIND: &'static str = "target";

    fn id_mut(&mut self) -> &mut String {
        &mut self.id
    }
}

impl StateDocument for DeviceState {
    const KIND: &'static str = "device";

    fn id_mut(&mut self) -> &mut String {
        &mut self.id
    }
}

/// Plans deployments from stored state
pub struct DeploymentPlanner {
    stores: PlannerStores,
}

impl DeploymentPlanner {
    pub fn new(stores: PlannerStores) -> Self {
        Self { stores }
    }

    pub fn stores(&self) -> &PlannerStores {
        &self.stores
    }

    /// Plan the stored instance `instance_id`
    #[instrument(skip(self))]
    pub async fn plan_instance(&self, instance_id: &str) -> Result<PlannedDeployment> {
        let instance: InstanceState = fetch(self.stores.instances.as_ref(), instance_id).await?;

        let solution_id = instance
            .spec
            .as_ref()
            .map(|spec| spec.solution.as_str())
            .filter(|solution| !solution.is_empty())
            .ok_or_else(|| PlanningError::invalid_spec("instance", instance_id))?;

        let solution: SolutionState = fetch(self.stores.solutions.as_ref(), solution_id).await?;
        let targets: Vec<TargetState> = fetch_all(self.stores.targets.as_ref()).await?;
        let devices: Vec<DeviceState> = fetch_all(self.stores.devices.as_ref()).await?;

        debug!(
            solution = %solution.id,
            targets = targets.len(),
            devices = devices.len(),
            "Loaded planning inputs"
        );

        assemble_deployment(&instance, &solution, &targets, &devices)
    }

    /// Plan the stored target `target_id` on its own
    #[instrument(skip(self))]
    pub async fn plan_target(&self, target_id: &str) -> Result<PlannedDeployment> {
        let target: TargetState = fetch(self.stores.targets.as_ref(), target_id).await?;
        assemble_deployment_from_target(&target)
    }
}

async fn fetch<T: StateDocument>(store: &dyn StateProvider, id: &str) -> Result<T> {
    let entry = store.get(id).await.map_err(|e| match e {
        ProviderError::NotFound(_) => PlanningError::NotFound {
            kind: T::KIND,
            id: id.to_string(),
        },
        other => PlanningError::Provider(other),
    })?;
    decode(&entry)
}

async fn fetch_all<T: StateDocument>(store: &dyn StateProvider) -> Result<Vec<T>> {
    store.list().await?.iter().map(decode::<T>).collect()
}

fn decode<T: StateDocument>(entry: &StateEntry) -> Result<T> {
    let mut document: T = entry.decode().map_err(|e| PlanningError::Decode {
        kind: T::KIND,
        id: entry.id.clone(),
        message: e.to_string(),
    })?;

    // Bodies may omit the id; the entry key is authoritative in that case
    let id = document.id_mut();
    if id.is_empty() {
        *id = entry.id.clone();
    }
    Ok(document)
}

#[cfg(test)]
mod tests {
    use super::*;
    use orbit_providers::MEMORY_STATE_PROVIDER;
    use serde_json::json;

    fn stores() -> PlannerStores {
        PlannerStores::from_registry(
            &ProviderRegistry::with_defaults(),
            &ProviderConfig::new(MEMORY_STATE_PROVIDER),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_plan_instance_end_to_end() {
        let stores = stores();
        stores
            .solutions
            .upsert(StateEntry::new(
                "sol",
                json!({"spec": {"components": [{"name": "api"}]}}),
            ))
            .await
            .unwrap();
        stores
            .instances
            .upsert(StateEntry::new(
                "inst",
                json!({"id": "inst", "spec": {"solution": "sol", "target": {"name": "t1"}}}),
            ))
            .await
            .unwrap();
        stores
            .targets
            .upsert(StateEntry::new("t1", json!({"id": "t1", "spec": {}})))
            .await
            .unwrap();

        let planned = DeploymentPlanner::new(stores)
            .plan_instance("inst")
            .await
            .unwrap();

        assert_eq!(planned.plan.solution_name, "sol");
        assert_eq!(planned.plan.assignments["t1"], "{api}");
        assert!(planned.diagnostics.is_empty());
    }

    #[tokio::test]
    async fn test_missing_instance() {
        let planner = DeploymentPlanner::new(stores());
        let err = planner.plan_instance("nope").await.unwrap_err();
        assert!(matches!(err, PlanningError::NotFound { kind: "instance", id } if id == "nope"));
    }

    #[tokio::test]
    async fn test_missing_solution() {
        let stores = stores();
        stores
            .instances
            .upsert(StateEntry::new(
                "inst",
                json!({"spec": {"solution": "gone", "target": {"name": "t1"}}}),
            ))
            .await
            .unwrap();

        let err = DeploymentPlanner::new(stores)
            .plan_instance("inst")
            .await
            .unwrap_err();
        assert!(matches!(err, PlanningError::NotFound { kind: "solution", .. }));
    }

    #[tokio::test]
    async fn test_instance_without_solution_reference() {
        let stores = stores();
        stores
            .instances
            .upsert(StateEntry::new("inst", json!({"id": "inst"})))
            .await
            .unwrap();

        let err = DeploymentPlanner::new(stores)
            .plan_instance("inst")
            .await
            .unwrap_err();
        assert!(matches!(err, PlanningError::InvalidSpec { kind: "instance", .. }));
    }

    #[tokio::test]
    async fn test_undecodable_target() {
        let stores = stores();
        stores
            .targets
            .upsert(StateEntry::new("t1", json!({"spec": {"properties": []}})))
            .await
            .unwrap();

        let err = DeploymentPlanner::new(stores)
            .plan_target("t1")
            .await
            .unwrap_err();
        assert!(matches!(err, PlanningError::Decode { kind: "target", .. }));
    }

    #[tokio::test]
    async fn test_plan_target() {
        let stores = stores();
        stores
            .targets
            .upsert(StateEntry::new(
                "edge",
                json!({"spec": {"components": [{"name": "agent"}]}}),
            ))
            .await
            .unwrap();

        let planned = DeploymentPlanner::new(stores)
            .plan_target("edge")
            .await
            .unwrap();
        assert_eq!(planned.plan.solution_name, "target-runtime-edge");
        assert_eq!(planned.plan.assignments["edge"], "{agent}");
    }
}
