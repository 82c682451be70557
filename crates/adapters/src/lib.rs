// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Adapters for the external systems the provisioning bridge talks to:
//! the build job backend, the component registry, and the callback channel.

pub mod build;
pub mod callback;
pub mod registry;
pub mod subprocess;

pub use build::{BuildBackend, JobStart, KubeJobBackend, RunHandle, RunStatus, TriggerError};
pub use callback::{CallbackError, CallbackSink, HttpCallbackSink};
pub use registry::{AwsCliRegistry, ComponentRegistry, RegistryError};

#[cfg(any(test, feature = "test-support"))]
pub use build::FakeBuildBackend;
#[cfg(any(test, feature = "test-support"))]
pub use callback::{CallbackCall, FakeCallbackSink};
#[cfg(any(test, feature = "test-support"))]
pub use registry::FakeRegistry;
