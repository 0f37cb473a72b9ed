//! Target matching command

use super::CommandContext;
use crate::documents::{load_many, load_one};
use crate::error::CliResult;
use crate::output::print_single;
use clap::Args;
use orbit_planner::match_targets;
use orbit_types::{InstanceState, TargetState};
use std::path::PathBuf;

/// Arguments for `orbit match`
#[derive(Debug, Args)]
pub struct MatchArgs {
    /// Instance document (YAML or JSON)
    #[arg(short, long)]
    pub instance: PathBuf,

    /// Target documents (YAML or JSON list)
    #[arg(short, long)]
    pub targets: PathBuf,
}

/// Print the ids of the targets the instance selects
pub fn execute(args: MatchArgs, ctx: &CommandContext) -> CliResult<()> {
    let instance: InstanceState = load_one(&args.instance)?;
    let targets: Vec<TargetState> = load_many(&args.targets)?;

    let matched: Vec<String> = match_targets(&instance, &targets)
        .into_iter()
        .map(|target| target.id)
        .collect();

    print_single(&matched, ctx.format)
}
