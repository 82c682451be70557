// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! edgepub-core: data model for the edge component provisioning bridge

pub mod macros;

pub mod arn;
pub mod event;
pub mod gdk_config;
pub mod params;
pub mod report;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use arn::{component_arn, ArnError, ComponentVersionArn};
#[cfg(any(test, feature = "test-support"))]
pub use event::LifecycleEventBuilder;
pub use event::{LifecycleEvent, RequestKind};
pub use gdk_config::{GdkConfig, GdkConfigError};
pub use params::{ConfigurationError, JobContext, JobParameters, ProvisioningParameters};
pub use report::{CompletionReport, Correlation, ReportData, ReportStatus, WireReport};
