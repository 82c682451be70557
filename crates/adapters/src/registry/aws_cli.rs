// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Greengrass component registry driven through the AWS CLI.

use super::{ComponentRegistry, RegistryError};
use crate::subprocess::{run_with_timeout, CLI_COMMAND_TIMEOUT};
use async_trait::async_trait;
use std::time::Duration;
use tokio::process::Command;

/// Registry backed by `aws greengrassv2`.
#[derive(Clone, Debug)]
pub struct AwsCliRegistry {
    program: String,
    region: Option<String>,
    timeout: Duration,
}

impl AwsCliRegistry {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            region: None,
            timeout: CLI_COMMAND_TIMEOUT,
        }
    }

    pub fn region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    async fn run(&self, args: &[&str]) -> Result<String, RegistryError> {
        let mut cmd = Command::new(&self.program);
        cmd.arg("greengrassv2").args(args);
        if let Some(region) = &self.region {
            cmd.arg("--region").arg(region);
        }
        let description = format!(
            "{} greengrassv2 {}",
            self.program,
            args.first().unwrap_or(&"")
        );
        let output = run_with_timeout(cmd, self.timeout, &description)
            .await
            .map_err(RegistryError::Command)?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(RegistryError::Command(format!(
                "{} exited with {}: {}",
                description,
                output.status.code().unwrap_or(-1),
                stderr.trim()
            )));
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

#[async_trait]
impl ComponentRegistry for AwsCliRegistry {
    async fn list_versions(&self, component_arn: &str) -> Result<Vec<String>, RegistryError> {
        let stdout = self
            .run(&[
                "list-component-versions",
                "--arn",
                component_arn,
                "--query",
                "componentVersions[].arn",
                "--output",
                "json",
            ])
            .await?;
        let versions = parse_version_list(&stdout)?;
        tracing::debug!(%component_arn, count = versions.len(), "listed component versions");
        Ok(versions)
    }

    async fn delete_version(&self, version_arn: &str) -> Result<(), RegistryError> {
        self.run(&["delete-component", "--arn", version_arn]).await?;
        tracing::info!(%version_arn, "deleted component version");
        Ok(())
    }
}

/// Parse the JSON array printed by `--query componentVersions[].arn`.
///
/// The CLI prints `null` when the component has no versions.
pub(crate) fn parse_version_list(stdout: &str) -> Result<Vec<String>, RegistryError> {
    let trimmed = stdout.trim();
    if trimmed.is_empty() {
        return Ok(Vec::new());
    }
    let parsed: Option<Vec<String>> = serde_json::from_str(trimmed)
        .map_err(|e| RegistryError::Output(format!("{}: {}", e, trimmed)))?;
    Ok(parsed.unwrap_or_default())
}

#[cfg(test)]
#[path = "aws_cli_tests.rs"]
mod tests;
