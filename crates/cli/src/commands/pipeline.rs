// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `edgepub pipeline`: the entry point of a build job's container.

use super::{callback_sink, registry};
use crate::env;
use crate::exit_error::{ExitError, FAILED, UNDELIVERED};
use anyhow::Result;
use clap::Args;
use edgepub_core::ReportStatus;
use edgepub_engine::PipelineRunner;
use std::collections::HashMap;
use std::path::PathBuf;

#[derive(Args)]
pub struct PipelineArgs {
    /// Pipeline definition TOML
    #[arg(long)]
    pub definition: PathBuf,

    /// Directory the phases run in
    #[arg(long, default_value = ".")]
    pub workdir: PathBuf,
}

pub async fn pipeline(args: PipelineArgs) -> Result<()> {
    // Job parameters arrive as environment variables
    let vars: HashMap<String, String> = std::env::vars().collect();

    // An unloadable definition is reported as FAILED by the runner
    let mut runner = PipelineRunner::load(&args.definition, registry(), callback_sink()?)
        .workdir(args.workdir)
        .log_location(env::log_location());
    if let Some(region) = env::aws_region() {
        runner = runner.region(region);
    }
    if let Some(account) = env::account_id() {
        runner = runner.account(account);
    }

    let summary = runner
        .run(&vars)
        .await
        .map_err(|e| ExitError::new(UNDELIVERED, e.to_string()))?;
    match summary.status {
        ReportStatus::Success => {
            println!("{} {}", summary.status, summary.physical_id);
            Ok(())
        }
        ReportStatus::Failed => Err(ExitError::new(
            FAILED,
            summary
                .reason
                .unwrap_or_else(|| "pipeline failed".to_string()),
        )
        .into()),
    }
}
