// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `edgepub render`

use crate::env;
use anyhow::Result;
use clap::Args;
use edgepub_core::GdkConfig;
use edgepub_engine::{PipelineDefinition, Toolchain};
use std::path::PathBuf;

#[derive(Args)]
pub struct RenderArgs {
    /// Python version to build with (default 3.11)
    #[arg(long, conflicts_with = "java")]
    pub python: Option<String>,

    /// Java (Corretto) version to build with, e.g. corretto17
    #[arg(long)]
    pub java: Option<String>,

    /// gdk CLI tag to install; newest when omitted
    #[arg(long)]
    pub gdk_version: Option<String>,

    /// gdk-config.json describing the component
    #[arg(long)]
    pub gdk_config: Option<PathBuf>,
}

pub fn render(args: RenderArgs) -> Result<()> {
    print!(
        "{}",
        render_definition(&args, env::account_id().as_deref())?
    );
    Ok(())
}

/// `account` resolves the concrete artifact bucket name when known.
fn render_definition(args: &RenderArgs, account: Option<&str>) -> Result<String> {
    let toolchain = match (&args.python, &args.java) {
        (_, Some(java)) => Toolchain::java(java.as_str()),
        (Some(python), None) => Toolchain::python(python.as_str()),
        (None, None) => Toolchain::default(),
    };
    let definition = PipelineDefinition::gdk(&toolchain, args.gdk_version.as_deref())?;

    let mut out = String::new();
    if let Some(path) = &args.gdk_config {
        let config = GdkConfig::load(path)?;
        out.push_str(&format!("# component: {}\n", config.component_name()?));
        out.push_str(&format!(
            "# publish bucket: {} ({})\n",
            config.bucket()?,
            config.region()?
        ));
        if let Some(account) = account {
            out.push_str(&format!(
                "# artifact bucket: {}\n",
                config.bucket_name(account)?
            ));
        }
        out.push('\n');
    }
    out.push_str(&definition.to_toml()?);
    Ok(out)
}

#[cfg(test)]
#[path = "render_tests.rs"]
mod tests;
