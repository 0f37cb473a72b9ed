//! Orbit Providers - collaborator interfaces for the planning core
//!
//! - **StateProvider**: get / upsert / delete / list of opaque JSON documents
//! - **StageProvider**: `process(inputs) -> outputs, more_work`
//! - **ProviderRegistry**: builds providers from a type name and JSON config
//!
//! ## Built-in providers
//!
//! | Type                     | Implementation          |
//! |--------------------------|-------------------------|
//! | `providers.state.memory` | [`MemoryStateProvider`] |
//! | `providers.stage.mock`   | [`MockStageProvider`]   |
//!
//! Persistent backends implement the same traits and register themselves
//! with a [`ProviderRegistry`].

#![deny(unsafe_code)]
#![cfg_attr(feature = "strict-docs", warn(missing_docs))]
#![cfg_attr(not(feature = "strict-docs"), allow(missing_docs))]

pub mod error;
pub mod registry;
pub mod stage;
pub mod state;

// Re-exports
pub use error::{ProviderError, Result};
pub use registry::{
    ProviderConfig, ProviderRegistry, StageFactory, StateFactory, MEMORY_STATE_PROVIDER,
    MOCK_STAGE_PROVIDER,
};
pub use stage::{
    MockStageProvider, MockStageProviderConfig, StageOutcome, StageProvider, StageValues,
};
pub use state::{MemoryStateProvider, MemoryStateProviderConfig, StateEntry, StateProvider};
