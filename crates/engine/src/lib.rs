// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! edgepub-engine: the provisioning bridge.
//!
//! [`LifecycleHandler`] fronts lifecycle events and only waits for a build
//! job to be accepted. The job itself runs a [`PipelineRunner`], which owns
//! the completion report for create and update events.

mod error;
mod handler;
pub mod pipeline;
mod policy;
mod reporter;
mod resolver;
pub mod template;
mod trigger;

pub use error::HandlerError;
pub use handler::{HandlerDeps, LifecycleHandler, Outcome};
pub use pipeline::{
    PipelineDefinition, PipelineError, PipelineRunner, PipelineSummary, Toolchain, ToolchainError,
};
pub use policy::{CleanupPolicy, HandlerPolicy, PolicyError, WatchPolicy};
pub use reporter::CallbackReporter;
pub use resolver::{resolve_version, ResolveError, VersionResolver};
pub use trigger::BuildTrigger;
