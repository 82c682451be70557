// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Runs a pipeline definition's phases and sends the job's completion report.

use super::{PipelineDefinition, PipelineError};
use crate::reporter::CallbackReporter;
use crate::resolver::VersionResolver;
use crate::template::{interpolate, interpolate_shell};
use edgepub_adapters::subprocess::{run_with_timeout, PHASE_COMMAND_TIMEOUT};
use edgepub_adapters::{CallbackSink, ComponentRegistry};
use edgepub_core::report::fallback_reason;
use edgepub_core::{component_arn, CompletionReport, Correlation, JobContext, ReportStatus};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tokio::process::Command;

/// Result of a pipeline run, after its report was delivered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineSummary {
    pub status: ReportStatus,
    pub physical_id: String,
    pub version: Option<String>,
    pub reason: Option<String>,
}

impl From<&CompletionReport> for PipelineSummary {
    fn from(report: &CompletionReport) -> Self {
        Self {
            status: report.status,
            physical_id: report.physical_id.clone(),
            version: report.data.component_version.clone(),
            reason: report.reason.clone(),
        }
    }
}

pub struct PipelineRunner<R: ComponentRegistry, S: CallbackSink> {
    /// A definition that failed to load is reported as FAILED by [`Self::run`].
    definition: Result<PipelineDefinition, PipelineError>,
    resolver: VersionResolver<R>,
    sink: S,
    workdir: PathBuf,
    region: String,
    account: String,
    log_location: String,
    phase_timeout: Duration,
}

impl<R: ComponentRegistry, S: CallbackSink> PipelineRunner<R, S> {
    pub fn new(definition: PipelineDefinition, registry: R, sink: S) -> Self {
        Self::with_definition(Ok(definition), registry, sink)
    }

    /// Runner for the definition at `path`.
    ///
    /// Load errors are deferred to [`Self::run`] so the job still reports.
    pub fn load(path: &Path, registry: R, sink: S) -> Self {
        Self::with_definition(PipelineDefinition::load(path), registry, sink)
    }

    pub fn with_definition(
        definition: Result<PipelineDefinition, PipelineError>,
        registry: R,
        sink: S,
    ) -> Self {
        Self {
            definition,
            resolver: VersionResolver::new(registry),
            sink,
            workdir: PathBuf::from("."),
            region: String::new(),
            account: String::new(),
            log_location: "job logs".to_string(),
            phase_timeout: PHASE_COMMAND_TIMEOUT,
        }
    }

    edgepub_core::setters! {
        into {
            workdir: PathBuf,
            region: String,
            account: String,
            log_location: String,
        }
        set { phase_timeout: Duration }
    }

    /// Run every phase and send exactly one completion report.
    ///
    /// `vars` holds the job parameters (normally the process environment).
    /// Phase failures and an unusable definition end up in the report; only
    /// a report that cannot be addressed or delivered is an error.
    pub async fn run(
        &self,
        vars: &HashMap<String, String>,
    ) -> Result<PipelineSummary, PipelineError> {
        let correlation = JobContext::correlation(vars)?;
        let definition = match &self.definition {
            Ok(definition) => definition,
            Err(e) => {
                tracing::error!(
                    request_id = %correlation.request_id,
                    error = %e,
                    "pipeline definition unusable"
                );
                let report = CompletionReport::failed(format!(
                    "{}. {}",
                    e,
                    fallback_reason(&self.log_location)
                ));
                return self
                    .deliver(&report, &correlation, &self.log_location)
                    .await;
            }
        };
        let log_location = match &definition.report.log_location {
            Some(template) => interpolate(template, vars),
            None => self.log_location.clone(),
        };
        tracing::info!(
            request_id = %correlation.request_id,
            image = definition.image.as_deref().unwrap_or("unspecified"),
            %log_location,
            "pipeline started"
        );

        let report = match JobContext::from_vars(vars) {
            Ok(context) => match self.run_phases(definition, vars).await {
                Ok(()) => self.resolve(&context).await,
                Err(failure) => CompletionReport::failed(format!(
                    "{}. {}",
                    failure,
                    fallback_reason(&log_location)
                )),
            },
            Err(e) => CompletionReport::failed(e.to_string()),
        };

        self.deliver(&report, &correlation, &log_location).await
    }

    async fn deliver(
        &self,
        report: &CompletionReport,
        correlation: &Correlation,
        log_location: &str,
    ) -> Result<PipelineSummary, PipelineError> {
        let reporter = CallbackReporter::new(self.sink.clone(), log_location);
        reporter.send(report, correlation).await?;
        tracing::info!(
            status = %report.status,
            physical_id = %report.physical_id,
            "pipeline finished"
        );
        Ok(PipelineSummary::from(report))
    }

    /// Setup then build. The error is a human-readable failure description.
    async fn run_phases(
        &self,
        definition: &PipelineDefinition,
        vars: &HashMap<String, String>,
    ) -> Result<(), String> {
        let setup = &definition.setup;
        if let Err(failure) = self.run_phase("setup", &setup.commands, vars).await {
            if !setup.continue_on_failure {
                return Err(failure);
            }
            tracing::warn!(%failure, "setup phase failed, continuing");
        }
        self
            .run_phase("build", &definition.build.commands, vars)
            .await
    }

    async fn resolve(&self, context: &JobContext) -> CompletionReport {
        if self.region.is_empty() || self.account.is_empty() {
            return CompletionReport::failed(
                "region and account are required to resolve the published component version",
            );
        }
        let arn = component_arn(&self.region, &self.account, &context.component_name);
        match self.resolver.resolve(&arn).await {
            Ok(version) => CompletionReport::success(&version),
            Err(e) => {
                tracing::error!(component_arn = %arn, error = %e, "version resolution failed");
                CompletionReport::failed(format!("component version resolution failed: {}", e))
            }
        }
    }

    async fn run_phase(
        &self,
        phase: &str,
        commands: &[String],
        vars: &HashMap<String, String>,
    ) -> Result<(), String> {
        if commands.is_empty() {
            tracing::debug!(phase, "phase has no commands");
            return Ok(());
        }
        tokio::fs::create_dir_all(&self.workdir).await.map_err(|e| {
            format!(
                "{} phase could not create {}: {}",
                phase,
                self.workdir.display(),
                e
            )
        })?;

        let body: Vec<String> = commands
            .iter()
            .map(|c| interpolate_shell(c, vars))
            .collect();
        let script = format!("set -euo pipefail\n{}", body.join("\n"));
        let mut cmd = Command::new("bash");
        cmd.arg("-c")
            .arg(&script)
            .current_dir(&self.workdir)
            .envs(vars);

        tracing::info!(phase, commands = commands.len(), "phase started");
        let started = Instant::now();
        let output = run_with_timeout(cmd, self.phase_timeout, &format!("{} phase", phase)).await?;
        let elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);
        if output.status.success() {
            tracing::info!(phase, elapsed_ms, stdout = %stdout.trim_end(), "phase succeeded");
            return Ok(());
        }

        let code = output.status.code().unwrap_or(-1);
        tracing::error!(
            phase,
            elapsed_ms,
            exit_code = code,
            stdout = %stdout.trim_end(),
            stderr = %stderr.trim_end(),
            "phase failed"
        );
        let detail = stderr
            .lines()
            .rev()
            .find(|l| !l.trim().is_empty())
            .unwrap_or("no output");
        Err(format!(
            "{} phase exited with code {}: {}",
            phase,
            code,
            detail.trim()
        ))
    }
}

#[cfg(test)]
#[path = "runner_tests.rs"]
mod tests;
