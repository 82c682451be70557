// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Build job backend.
//!
//! A backend accepts a job run for a named, reusable job definition and
//! reports where the run is. It never waits for the run to finish: the run
//! itself owns the completion report.

mod kubernetes;

pub use kubernetes::KubeJobBackend;

use async_trait::async_trait;
use edgepub_core::JobParameters;
use std::fmt;
use thiserror::Error;

/// Errors from starting or inspecting a build job run
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TriggerError {
    #[error("job definition not found: {0}")]
    DefinitionNotFound(String),
    /// The backend refused the start request; carries the backend's message.
    #[error("{0}")]
    Rejected(String),
    #[error("job run not found: {0}")]
    RunNotFound(String),
    #[error("{0}")]
    Backend(String),
}

/// A request to start one run of a job definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobStart {
    pub definition: String,
    pub request_id: String,
    pub parameters: JobParameters,
}

/// Identifies an accepted run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunHandle {
    pub run_id: String,
    pub definition: String,
}

impl fmt::Display for RunHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.definition, self.run_id)
    }
}

/// Observed state of a run. The run is the authority; this is only a view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunStatus {
    Pending,
    Running,
    Succeeded,
    Failed,
    /// The run failed terminally without its script ever executing.
    NeverStarted(String),
}

edgepub_core::simple_display! {
    RunStatus {
        Pending => "pending",
        Running => "running",
        Succeeded => "succeeded",
        Failed => "failed",
        NeverStarted(..) => "never-started",
    }
}

/// Adapter for the compute service that runs build jobs
#[async_trait]
pub trait BuildBackend: Clone + Send + Sync + 'static {
    /// Start a run; returns once the backend has accepted it.
    async fn start(&self, start: &JobStart) -> Result<RunHandle, TriggerError>;

    async fn status(&self, run: &RunHandle) -> Result<RunStatus, TriggerError>;
}

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(coverage_nightly, coverage(off))]
mod fake {
    use super::{BuildBackend, JobStart, RunHandle, RunStatus, TriggerError};
    use async_trait::async_trait;
    use parking_lot::Mutex;
    use std::collections::VecDeque;
    use std::sync::Arc;

    #[derive(Default)]
    struct FakeBuildState {
        starts: Vec<JobStart>,
        start_error: Option<TriggerError>,
        statuses: VecDeque<RunStatus>,
        status_calls: usize,
    }

    /// Fake build backend for testing
    #[derive(Clone, Default)]
    pub struct FakeBuildBackend {
        inner: Arc<Mutex<FakeBuildState>>,
    }

    impl FakeBuildBackend {
        pub fn new() -> Self {
            Self::default()
        }

        /// Make every subsequent start fail with `error`.
        pub fn fail_start(&self, error: TriggerError) {
            self.inner.lock().start_error = Some(error);
        }

        /// Queue statuses returned by successive `status` calls. The last
        /// queued status repeats once the queue is drained.
        pub fn push_status(&self, status: RunStatus) {
            self.inner.lock().statuses.push_back(status);
        }

        pub fn starts(&self) -> Vec<JobStart> {
            self.inner.lock().starts.clone()
        }

        pub fn status_calls(&self) -> usize {
            self.inner.lock().status_calls
        }
    }

    #[async_trait]
    impl BuildBackend for FakeBuildBackend {
        async fn start(&self, start: &JobStart) -> Result<RunHandle, TriggerError> {
            let mut inner = self.inner.lock();
            if let Some(error) = &inner.start_error {
                return Err(error.clone());
            }
            inner.starts.push(start.clone());
            Ok(RunHandle {
                run_id: format!("{}-run{}", start.definition, inner.starts.len()),
                definition: start.definition.clone(),
            })
        }

        async fn status(&self, _run: &RunHandle) -> Result<RunStatus, TriggerError> {
            let mut inner = self.inner.lock();
            inner.status_calls += 1;
            let status = if inner.statuses.len() > 1 {
                inner.statuses.pop_front()
            } else {
                inner.statuses.front().cloned()
            };
            Ok(status.unwrap_or(RunStatus::Running))
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
pub use fake::FakeBuildBackend;
