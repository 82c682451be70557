// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Build pipeline: what runs inside an accepted build job.
//!
//! The pipeline is the sole writer of the completion report for create and
//! update events, so its report phase runs no matter how earlier phases end.

mod definition;
mod runner;
mod toolchain;

pub use definition::{Phase, PipelineDefinition, ReportPhase, SetupPhase};
pub use runner::{PipelineRunner, PipelineSummary};
pub use toolchain::{python_for_image, Toolchain, ToolchainError, DEFAULT_BUILD_IMAGE};

use edgepub_adapters::CallbackError;
use edgepub_core::ConfigurationError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that prevent the pipeline from completing the protocol.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("failed to read pipeline definition {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid pipeline definition: {0}")]
    Parse(String),
    #[error("failed to render pipeline definition: {0}")]
    Render(String),
    #[error(transparent)]
    Toolchain(#[from] ToolchainError),
    /// The job lacks the parameters needed to address its report.
    #[error("cannot address completion report: {0}")]
    Correlation(#[from] ConfigurationError),
    #[error(transparent)]
    Callback(#[from] CallbackError),
}
