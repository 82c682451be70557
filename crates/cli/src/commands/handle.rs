// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `edgepub handle`

use super::{callback_sink, registry};
use crate::env;
use crate::exit_error::{ExitError, UNDELIVERED};
use anyhow::{Context, Result};
use clap::Args;
use edgepub_adapters::KubeJobBackend;
use edgepub_engine::{HandlerDeps, HandlerPolicy, LifecycleHandler, Outcome};
use std::io::Read;

#[derive(Args)]
pub struct HandleArgs {
    /// Event JSON file, or `-` for stdin
    #[arg(long, default_value = "-")]
    pub event: String,
}

pub async fn handle(args: HandleArgs) -> Result<()> {
    let input = read_event(&args.event)?;

    let deps = HandlerDeps {
        backend: KubeJobBackend::new(env::k8s_namespace()),
        registry: registry(),
        callback: callback_sink()?,
    };
    let policy = HandlerPolicy::default()
        .cleanup(env::cleanup_policy())
        .watch(env::watch_policy())
        .log_location(env::log_location());
    let handler = LifecycleHandler::new(deps, policy);

    let outcome = handler
        .handle_json(&input)
        .await
        .context("unreadable lifecycle event")?;
    match outcome {
        Outcome::Accepted(run) => println!("accepted {}", run),
        Outcome::Reported(status) => println!("reported {}", status),
        Outcome::Undelivered(reason) => {
            return Err(ExitError::new(
                UNDELIVERED,
                format!("completion report not delivered: {}", reason),
            )
            .into());
        }
    }
    Ok(())
}

fn read_event(source: &str) -> Result<String> {
    if source == "-" {
        let mut input = String::new();
        std::io::stdin()
            .read_to_string(&mut input)
            .context("failed to read event from stdin")?;
        return Ok(input);
    }
    std::fs::read_to_string(source)
        .with_context(|| format!("failed to read event file {}", source))
}
