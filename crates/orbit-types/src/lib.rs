//! Orbit Types - Core data model for deployment planning
//!
//! Orbit decides which components of a workload run on which managed
//! endpoints. This crate holds the documents the planner consumes and the
//! plan it produces.
//!
//! ## Key Concepts
//!
//! - **Solution**: Ordered set of deployable components
//! - **Target**: A placement-eligible endpoint (node, cluster, device)
//! - **Device**: Auxiliary endpoint carried through planning untouched
//! - **Instance**: Deployment intent binding a Solution to a target selection
//! - **DeploymentPlan**: The immutable output of planning
//!
//! Every `*State` document wraps an optional `*Spec`. A missing spec is how a
//! half-written document shows up after decoding, and the planner decides per
//! document kind whether that is fatal.

#![deny(unsafe_code)]
#![cfg_attr(feature = "strict-docs", warn(missing_docs))]
#![cfg_attr(not(feature = "strict-docs"), allow(missing_docs))]

pub mod component;
pub mod deployment;
pub mod device;
pub mod instance;
pub mod solution;
pub mod target;

// Re-export main types
pub use component::{first_duplicate_name, ComponentSpec};
pub use deployment::{split_assignment, DeploymentPlan, TARGET_RUNTIME_PREFIX};
pub use device::{DeviceSpec, DeviceState};
pub use instance::{InstanceSpec, InstanceState, TargetSelector};
pub use solution::{SolutionSpec, SolutionState};
pub use target::{BindingSpec, TargetSpec, TargetState, TopologySpec};
