// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Kubernetes job backend.
//!
//! A job definition is a suspended `CronJob` whose `jobTemplate` describes the
//! build job. Starting a run stamps a `Job` out of that template with every
//! job parameter injected as a container environment variable. The CronJob
//! itself is never scheduled.

use super::{BuildBackend, JobStart, RunHandle, RunStatus, TriggerError};
use async_trait::async_trait;
use k8s_openapi::api::batch::v1::{CronJob, Job};
use k8s_openapi::api::core::v1::{EnvVar, Pod};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use kube::api::{Api, ListParams, PostParams};
use kube::Client;
use std::sync::Arc;
use tokio::sync::OnceCell;

/// Label carrying the job definition name on every run.
pub(crate) const DEFINITION_LABEL: &str = "edgepub.io/definition";
/// Annotation carrying the control-plane request id on every run.
pub(crate) const REQUEST_ANNOTATION: &str = "edgepub.io/request-id";
/// Run name, injected so the pipeline can point at its own logs.
pub(crate) const RUN_ID_ENV: &str = "EDGEPUB_RUN_ID";
pub(crate) const NAMESPACE_ENV: &str = "EDGEPUB_NAMESPACE";

/// Kubernetes names are capped at 63 characters; leave room for `-` + suffix.
const MAX_DEFINITION_PREFIX: usize = 56;
const SUFFIX_ALPHABET: [char; 36] = [
    'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i', 'j', 'k', 'l', 'm', 'n', 'o', 'p', 'q', 'r', 's',
    't', 'u', 'v', 'w', 'x', 'y', 'z', '0', '1', '2', '3', '4', '5', '6', '7', '8', '9',
];

/// Waiting reasons that mean a container could not be started.
const FATAL_WAITING_REASONS: [&str; 5] = [
    "ErrImagePull",
    "ImagePullBackOff",
    "InvalidImageName",
    "CreateContainerConfigError",
    "CreateContainerError",
];

/// Build backend that runs jobs on a Kubernetes cluster.
///
/// The client is created on first use so that code paths which never touch
/// the cluster (delete handling, for one) work without cluster access.
#[derive(Clone)]
pub struct KubeJobBackend {
    client: Arc<OnceCell<Client>>,
    namespace: String,
}

impl KubeJobBackend {
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            client: Arc::new(OnceCell::new()),
            namespace: namespace.into(),
        }
    }

    /// Use an already constructed client.
    pub fn with_client(client: Client, namespace: impl Into<String>) -> Self {
        Self {
            client: Arc::new(OnceCell::new_with(Some(client))),
            namespace: namespace.into(),
        }
    }

    async fn client(&self) -> Result<Client, TriggerError> {
        self.client
            .get_or_try_init(|| async {
                Client::try_default().await.map_err(|e| {
                    TriggerError::Backend(format!("failed to create kube client: {}", e))
                })
            })
            .await
            .cloned()
    }
}

#[async_trait]
impl BuildBackend for KubeJobBackend {
    async fn start(&self, start: &JobStart) -> Result<RunHandle, TriggerError> {
        let client = self.client().await?;
        let definitions: Api<CronJob> = Api::namespaced(client.clone(), &self.namespace);
        let definition = definitions
            .get_opt(&start.definition)
            .await
            .map_err(|e| TriggerError::Backend(format!("failed to read job definition: {}", e)))?
            .ok_or_else(|| TriggerError::DefinitionNotFound(start.definition.clone()))?;

        let name = run_name(&start.definition, &nanoid::nanoid!(6, &SUFFIX_ALPHABET));
        let job = job_from_definition(&definition, &name, &self.namespace, start)?;

        let jobs: Api<Job> = Api::namespaced(client, &self.namespace);
        let created = jobs
            .create(&PostParams::default(), &job)
            .await
            .map_err(|e| TriggerError::Rejected(e.to_string()))?;

        let run_id = created.metadata.name.unwrap_or(name);
        tracing::info!(
            namespace = %self.namespace,
            definition = %start.definition,
            %run_id,
            request_id = %start.request_id,
            "created build job"
        );
        Ok(RunHandle {
            run_id,
            definition: start.definition.clone(),
        })
    }

    async fn status(&self, run: &RunHandle) -> Result<RunStatus, TriggerError> {
        let client = self.client().await?;
        let jobs: Api<Job> = Api::namespaced(client.clone(), &self.namespace);
        let job = jobs
            .get_opt(&run.run_id)
            .await
            .map_err(|e| TriggerError::Backend(format!("failed to read job: {}", e)))?
            .ok_or_else(|| TriggerError::RunNotFound(run.run_id.clone()))?;

        let pods: Api<Pod> = Api::namespaced(client, &self.namespace);
        let selector = format!("job-name={}", run.run_id);
        let pods = pods
            .list(&ListParams::default().labels(&selector))
            .await
            .map_err(|e| TriggerError::Backend(format!("failed to list job pods: {}", e)))?;

        Ok(classify(&job, &pods.items))
    }
}

/// Name for a new run of `definition`.
pub(crate) fn run_name(definition: &str, suffix: &str) -> String {
    let prefix: String = definition.chars().take(MAX_DEFINITION_PREFIX).collect();
    format!("{}-{}", prefix.trim_end_matches('-'), suffix)
}

/// Stamp a `Job` out of the definition's job template.
pub(crate) fn job_from_definition(
    definition: &CronJob,
    name: &str,
    namespace: &str,
    start: &JobStart,
) -> Result<Job, TriggerError> {
    let template = definition
        .spec
        .as_ref()
        .map(|spec| &spec.job_template)
        .ok_or_else(|| {
            TriggerError::Rejected(format!("job definition {} has no spec", start.definition))
        })?;
    let mut spec = template.spec.clone().ok_or_else(|| {
        TriggerError::Rejected(format!(
            "job definition {} has an empty job template",
            start.definition
        ))
    })?;
    spec.suspend = None;

    let mut env: Vec<EnvVar> = start
        .parameters
        .iter()
        .map(|(name, value)| env_var(name, value))
        .collect();
    env.push(env_var(RUN_ID_ENV, name));
    env.push(env_var(NAMESPACE_ENV, namespace));

    let pod_spec = spec.template.spec.as_mut().ok_or_else(|| {
        TriggerError::Rejected(format!(
            "job definition {} has no pod spec",
            start.definition
        ))
    })?;
    for container in pod_spec.containers.iter_mut() {
        let container_env = container.env.get_or_insert_with(Vec::new);
        container_env.retain(|existing| !env.iter().any(|e| e.name == existing.name));
        container_env.extend(env.iter().cloned());
    }

    let template_meta = template.metadata.clone().unwrap_or_default();
    let mut labels = template_meta.labels.unwrap_or_default();
    labels.insert(DEFINITION_LABEL.to_string(), start.definition.clone());
    let mut annotations = template_meta.annotations.unwrap_or_default();
    annotations.insert(REQUEST_ANNOTATION.to_string(), start.request_id.clone());

    Ok(Job {
        metadata: ObjectMeta {
            name: Some(name.to_string()),
            namespace: Some(namespace.to_string()),
            labels: Some(labels),
            annotations: Some(annotations),
            ..Default::default()
        },
        spec: Some(spec),
        ..Default::default()
    })
}

fn env_var(name: &str, value: &str) -> EnvVar {
    EnvVar {
        name: name.to_string(),
        value: Some(value.to_string()),
        ..Default::default()
    }
}

/// Map job and pod state to a [`RunStatus`].
///
/// `NeverStarted` is only reported for a terminally failed job whose pods
/// were observed and none of whose containers ever ran, since only then is it
/// certain that the pipeline could not have sent its own report.
pub(crate) fn classify(job: &Job, pods: &[Pod]) -> RunStatus {
    let status = job.status.clone().unwrap_or_default();
    if status.succeeded.unwrap_or(0) > 0 {
        return RunStatus::Succeeded;
    }

    let failed_condition = status
        .conditions
        .iter()
        .flatten()
        .find(|c| c.type_ == "Failed" && c.status == "True");
    let any_ran = pods.iter().any(pod_ran);

    if let Some(condition) = failed_condition {
        if pods.is_empty() || any_ran {
            return RunStatus::Failed;
        }
        let reason = fatal_waiting_reason(pods)
            .or_else(|| condition.message.clone())
            .or_else(|| condition.reason.clone())
            .unwrap_or_else(|| "job failed before any container started".to_string());
        return RunStatus::NeverStarted(reason);
    }

    if any_ran {
        RunStatus::Running
    } else {
        RunStatus::Pending
    }
}

fn pod_ran(pod: &Pod) -> bool {
    pod.status
        .as_ref()
        .and_then(|s| s.container_statuses.as_ref())
        .map(|statuses| {
            statuses.iter().any(|c| {
                let state = c.state.as_ref();
                c.restart_count > 0
                    || state.is_some_and(|s| s.running.is_some() || s.terminated.is_some())
                    || matches!(&c.last_state, Some(s) if s.terminated.is_some())
            })
        })
        .unwrap_or(false)
}

fn fatal_waiting_reason(pods: &[Pod]) -> Option<String> {
    pods.iter()
        .filter_map(|pod| pod.status.as_ref()?.container_statuses.as_ref())
        .flatten()
        .filter_map(|c| c.state.as_ref()?.waiting.as_ref())
        .find(|w| w.reason.as_deref().is_some_and(|r| FATAL_WAITING_REASONS.contains(&r)))
        .map(|w| match (&w.reason, &w.message) {
            (Some(reason), Some(message)) => format!("{}: {}", reason, message),
            (Some(reason), None) => reason.clone(),
            _ => "container failed to start".to_string(),
        })
}

#[cfg(test)]
#[path = "kubernetes_tests.rs"]
mod tests;
