//! Orbit Planner - deployment planning engine
//!
//! Decides which components of a solution run on which targets:
//!
//! 1. **Selection** ([`match_targets`]): narrow the candidate targets to those
//!    the instance asks for, by id and/or required properties.
//! 2. **Assignment** ([`plan_assignments`]): evaluate each component's
//!    placement constraint against every selected target.
//! 3. **Assembly** ([`create_deployment`]): produce one immutable
//!    [`DeploymentPlan`](orbit_types::DeploymentPlan).
//!
//! The planning functions are synchronous and pure. [`DeploymentPlanner`]
//! wraps them for callers whose inputs live in state providers.
//!
//! ## Usage
//!
//! ```rust
//! use orbit_planner::create_deployment;
//! use orbit_types::*;
//!
//! let solution = SolutionState::new(
//!     "shop",
//!     SolutionSpec::with_components(vec![
//!         ComponentSpec::new("web"),
//!         ComponentSpec::new("win-agent")
//!             .with_constraints("${{$equal($property(OS),windows)}}"),
//!     ]),
//! );
//! let instance = InstanceState::new(
//!     "shop-eu",
//!     InstanceSpec::new("shop", TargetSelector::by_properties([("zone", "eu")])),
//! );
//! let targets = vec![
//!     TargetState::new("eu-1", TargetSpec::default().with_property("zone", "eu").with_property("OS", "linux")),
//!     TargetState::new("us-1", TargetSpec::default().with_property("zone", "us")),
//! ];
//!
//! let plan = create_deployment(&instance, &solution, &targets, &[]).unwrap();
//! assert_eq!(plan.assignments["eu-1"], "{web}");
//! assert!(!plan.targets.contains_key("us-1"));
//! ```

#![deny(unsafe_code)]
#![cfg_attr(feature = "strict-docs", warn(missing_docs))]
#![cfg_attr(not(feature = "strict-docs"), allow(missing_docs))]

pub mod assembler;
pub mod assignment;
pub mod error;
pub mod planner;
pub mod selector;

// Re-exports
pub use assembler::{
    assemble_deployment, assemble_deployment_from_target, create_deployment,
    create_deployment_from_target, target_runtime, PlannedDeployment,
};
pub use assignment::{
    assign_components_to_targets, plan_assignments, AssignmentReport, ConstraintDiagnostic,
};
pub use error::{PlanningError, Result};
pub use planner::{DeploymentPlanner, PlannerStores};
pub use selector::{match_targets, selects};
