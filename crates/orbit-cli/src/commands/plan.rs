//! Planning commands

use super::CommandContext;
use crate::documents::{load_many, load_one};
use crate::error::{CliError, CliResult};
use crate::output::{print_diagnostics, print_single};
use clap::Args;
use orbit_planner::{DeploymentPlanner, PlannedDeployment, PlannerStores};
use orbit_providers::{StateEntry, StateProvider};
use orbit_types::{DeviceState, InstanceState, SolutionState, TargetState};
use serde::Serialize;
use std::collections::HashSet;
use std::path::PathBuf;
use tracing::{info, warn};

/// Arguments for `orbit plan`
#[derive(Debug, Args)]
pub struct PlanArgs {
    /// Instance document (YAML or JSON)
    #[arg(short, long)]
    pub instance: PathBuf,

    /// Solution document (YAML or JSON)
    #[arg(short, long)]
    pub solution: PathBuf,

    /// Target documents (YAML or JSON list)
    #[arg(short, long)]
    pub targets: PathBuf,

    /// Device documents (YAML or JSON list)
    #[arg(short, long)]
    pub devices: Option<PathBuf>,
}

/// Arguments for `orbit plan-target`
#[derive(Debug, Args)]
pub struct PlanTargetArgs {
    /// Target document (YAML or JSON)
    #[arg(short, long)]
    pub target: PathBuf,
}

/// Plan an instance against a set of targets
pub async fn execute(args: PlanArgs, ctx: &CommandContext) -> CliResult<()> {
    let instance: InstanceState = load_one(&args.instance)?;
    let mut solution: SolutionState = load_one(&args.solution)?;
    let targets: Vec<TargetState> = load_many(&args.targets)?;
    let devices: Vec<DeviceState> = match &args.devices {
        Some(path) => load_many(path)?,
        None => Vec::new(),
    };

    require_id("instance", &instance.id)?;

    // A solution document without an id is the one the instance references
    if solution.id.is_empty() {
        if let Some(spec) = &instance.spec {
            solution.id = spec.solution.clone();
        }
    }
    require_id("solution", &solution.id)?;

    let planner = planner(ctx)?;
    let stores = planner.stores();

    store(stores.instances.as_ref(), &instance.id, &instance).await?;
    store(stores.solutions.as_ref(), &solution.id, &solution).await?;
    // Repeated ids keep the first document, as target matching does
    let mut seen = HashSet::new();
    for target in &targets {
        require_id("target", &target.id)?;
        if !seen.insert(target.id.as_str()) {
            warn!(target = %target.id, "Ignoring repeated target document");
            continue;
        }
        store(stores.targets.as_ref(), &target.id, target).await?;
    }
    let mut seen = HashSet::new();
    for device in &devices {
        require_id("device", &device.id)?;
        if !seen.insert(device.id.as_str()) {
            warn!(device = %device.id, "Ignoring repeated device document");
            continue;
        }
        store(stores.devices.as_ref(), &device.id, device).await?;
    }

    info!(
        instance = %instance.id,
        targets = targets.len(),
        devices = devices.len(),
        "Planning instance"
    );

    let planned = planner.plan_instance(&instance.id).await?;
    report(planned, ctx)
}

/// Plan a single target on its own
pub async fn execute_target(args: PlanTargetArgs, ctx: &CommandContext) -> CliResult<()> {
    let target: TargetState = load_one(&args.target)?;
    require_id("target", &target.id)?;

    let planner = planner(ctx)?;
    store(planner.stores().targets.as_ref(), &target.id, &target).await?;

    let planned = planner.plan_target(&target.id).await?;
    report(planned, ctx)
}

fn planner(ctx: &CommandContext) -> CliResult<DeploymentPlanner> {
    let stores =
        PlannerStores::from_registry(&ctx.registry, &ctx.config.state.provider_config())?;
    Ok(DeploymentPlanner::new(stores))
}

async fn store<T: Serialize>(provider: &dyn StateProvider, id: &str, document: &T) -> CliResult<()> {
    provider
        .upsert(StateEntry::from_document(id, document)?)
        .await?;
    Ok(())
}

fn require_id(kind: &str, id: &str) -> CliResult<()> {
    if id.is_empty() {
        return Err(CliError::InvalidInput(format!("{} document has no id", kind)));
    }
    Ok(())
}

fn report(planned: PlannedDeployment, ctx: &CommandContext) -> CliResult<()> {
    if ctx.show_diagnostics {
        print_diagnostics(&planned.diagnostics);
    }
    print_single(&planned.plan, ctx.format)
}
