// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Build Trigger: starts one build job run with the fixed parameter contract.

use crate::error::HandlerError;
use edgepub_adapters::{BuildBackend, JobStart, RunHandle};
use edgepub_core::{JobParameters, LifecycleEvent, ProvisioningParameters};

#[derive(Clone)]
pub struct BuildTrigger<B: BuildBackend> {
    backend: B,
}

impl<B: BuildBackend> BuildTrigger<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// Start a run of `params.job_name`. Returns once the backend accepts it.
    ///
    /// Override collisions are rejected before the backend is contacted.
    pub async fn start(
        &self,
        params: &ProvisioningParameters,
        event: &LifecycleEvent,
    ) -> Result<RunHandle, HandlerError> {
        let parameters = JobParameters::build(params, &event.correlation())?;
        let start = JobStart {
            definition: params.job_name.clone(),
            request_id: event.request_id.clone(),
            parameters,
        };

        tracing::info!(
            definition = %start.definition,
            request_id = %start.request_id,
            parameter_count = start.parameters.len(),
            "starting build job"
        );
        let run = self.backend.start(&start).await?;
        tracing::info!(run = %run, request_id = %start.request_id, "build job accepted");
        Ok(run)
    }
}

#[cfg(test)]
#[path = "trigger_tests.rs"]
mod tests;
