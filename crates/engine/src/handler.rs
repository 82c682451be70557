// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Lifecycle Handler: the entry point for control-plane events.
//!
//! Create and update events start a build job and return as soon as it is
//! accepted; the job reports on its own. Delete events are answered directly.
//! Every failure on the handler's side becomes exactly one FAILED report.

use crate::error::HandlerError;
use crate::policy::{CleanupPolicy, HandlerPolicy};
use crate::reporter::CallbackReporter;
use crate::resolver::VersionResolver;
use crate::trigger::BuildTrigger;
use edgepub_adapters::{BuildBackend, CallbackSink, ComponentRegistry, RunHandle, RunStatus};
use edgepub_core::{
    CompletionReport, ComponentVersionArn, ConfigurationError, Correlation, LifecycleEvent,
    ReportStatus, RequestKind,
};
use futures_util::FutureExt;
use std::any::Any;
use std::panic::AssertUnwindSafe;

/// External systems the handler talks to.
pub struct HandlerDeps<B, R, S> {
    pub backend: B,
    pub registry: R,
    pub callback: S,
}

/// What became of one lifecycle event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// A build job was accepted and owns the completion report.
    Accepted(RunHandle),
    /// The handler delivered the completion report itself.
    Reported(ReportStatus),
    /// The handler owed the report but could not deliver it.
    Undelivered(String),
}

enum Dispatch {
    Accepted(RunHandle),
    Report(CompletionReport),
}

pub struct LifecycleHandler<B: BuildBackend, R: ComponentRegistry, S: CallbackSink> {
    backend: B,
    registry: R,
    trigger: BuildTrigger<B>,
    resolver: VersionResolver<R>,
    reporter: CallbackReporter<S>,
    policy: HandlerPolicy,
}

impl<B, R, S> LifecycleHandler<B, R, S>
where
    B: BuildBackend,
    R: ComponentRegistry,
    S: CallbackSink,
{
    pub fn new(deps: HandlerDeps<B, R, S>, policy: HandlerPolicy) -> Self {
        Self {
            trigger: BuildTrigger::new(deps.backend.clone()),
            resolver: VersionResolver::new(deps.registry.clone()),
            reporter: CallbackReporter::new(deps.callback, policy.log_location.clone()),
            backend: deps.backend,
            registry: deps.registry,
            policy,
        }
    }

    /// Process one lifecycle event. Never fails: errors are reported to the
    /// issuer, and only an undeliverable report surfaces in the [`Outcome`].
    pub async fn handle(&self, event: &LifecycleEvent) -> Outcome {
        tracing::info!(
            kind = %event.kind,
            request_id = %event.request_id,
            stack_id = %event.stack_id,
            logical_resource_id = %event.logical_resource_id,
            physical_resource_id = event.physical_resource_id.as_deref().unwrap_or(""),
            properties = %event.properties.as_ref().map(|p| p.to_string()).unwrap_or_default(),
            "lifecycle event received"
        );
        let correlation = event.correlation();

        let dispatched = AssertUnwindSafe(self.dispatch(event))
            .catch_unwind()
            .await
            .unwrap_or_else(|panic| Err(HandlerError::Unhandled(panic_message(panic))));

        match dispatched {
            Ok(Dispatch::Accepted(run)) => self.watch(run, &correlation).await,
            Ok(Dispatch::Report(report)) => self.deliver(&report, &correlation).await,
            Err(e) => {
                tracing::error!(
                    request_id = %event.request_id,
                    error = %e,
                    "lifecycle event failed"
                );
                self.deliver(&CompletionReport::failed(e.to_string()), &correlation)
                    .await
            }
        }
    }

    /// Process one raw event.
    ///
    /// An event that fails to parse is still answered with a FAILED report
    /// when its addressing fields are readable. Otherwise nobody can be told,
    /// and the parse error is returned.
    pub async fn handle_json(&self, input: &str) -> Result<Outcome, ConfigurationError> {
        let error = match LifecycleEvent::from_json(input) {
            Ok(event) => return Ok(self.handle(&event).await),
            Err(e) => e,
        };
        let Some(correlation) = LifecycleEvent::correlation_from_json(input) else {
            return Err(error);
        };
        tracing::error!(
            request_id = %correlation.request_id,
            error = %error,
            "lifecycle event rejected"
        );
        Ok(self
            .deliver(&CompletionReport::failed(error.to_string()), &correlation)
            .await)
    }

    async fn dispatch(&self, event: &LifecycleEvent) -> Result<Dispatch, HandlerError> {
        match event.kind {
            RequestKind::Create | RequestKind::Update => {
                let params = event.parameters()?;
                let run = self.trigger.start(&params, event).await?;
                Ok(Dispatch::Accepted(run))
            }
            RequestKind::Delete => {
                let prior = event.prior_physical_id();
                if prior.is_none() {
                    tracing::warn!(
                        request_id = %event.request_id,
                        "delete without a physical resource id"
                    );
                }
                self.cleanup(prior).await?;
                Ok(Dispatch::Report(CompletionReport::deleted(
                    prior.unwrap_or_default(),
                )))
            }
        }
    }

    async fn cleanup(&self, prior: Option<&str>) -> Result<(), HandlerError> {
        match self.policy.cleanup {
            CleanupPolicy::Off => Ok(()),
            CleanupPolicy::BestEffort => {
                if let Err(e) = self.prune(prior).await {
                    tracing::warn!(error = %e, "version cleanup failed, continuing");
                }
                Ok(())
            }
            CleanupPolicy::Required => self.prune(prior).await,
        }
    }

    /// Delete every version of the prior component except the newest.
    async fn prune(&self, prior: Option<&str>) -> Result<(), HandlerError> {
        let Some(prior) = prior else {
            return Ok(());
        };
        let prior = ComponentVersionArn::parse(prior).map_err(crate::ResolveError::from)?;
        let stale = self
            .resolver
            .non_current_versions(prior.component_arn())
            .await?;
        for version in &stale {
            self.registry.delete_version(version.as_str()).await?;
        }
        tracing::info!(
            component = prior.component_name(),
            deleted = stale.len(),
            "pruned non-current component versions"
        );
        Ok(())
    }

    /// Poll an accepted run until it provably started or provably never will.
    async fn watch(&self, run: RunHandle, correlation: &Correlation) -> Outcome {
        let watch = self.policy.watch;
        for attempt in 1..=watch.attempts {
            tokio::time::sleep(watch.interval).await;
            match self.backend.status(&run).await {
                Ok(RunStatus::Pending) => {
                    tracing::debug!(run = %run, attempt, "build job still pending");
                }
                Ok(RunStatus::NeverStarted(reason)) => {
                    tracing::error!(run = %run, %reason, "build job never started");
                    let report = CompletionReport::failed(format!(
                        "build job {} never started: {}",
                        run.run_id, reason
                    ));
                    return self.deliver(&report, correlation).await;
                }
                Ok(status) => {
                    tracing::debug!(run = %run, %status, "build job owns the report");
                    break;
                }
                Err(e) => {
                    tracing::warn!(
                        run = %run,
                        error = %e,
                        "build job status unavailable, stop watching"
                    );
                    break;
                }
            }
        }
        Outcome::Accepted(run)
    }

    async fn deliver(&self, report: &CompletionReport, correlation: &Correlation) -> Outcome {
        match self.reporter.send(report, correlation).await {
            Ok(()) => Outcome::Reported(report.status),
            Err(e) => Outcome::Undelivered(e.to_string()),
        }
    }
}

fn panic_message(panic: Box<dyn Any + Send>) -> String {
    if let Some(message) = panic.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else {
        "panic during dispatch".to_string()
    }
}

#[cfg(test)]
#[path = "handler_tests.rs"]
mod tests;
