// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Provisioning parameters and the build job parameter contract.
//!
//! Every build job receives the same eight named parameters plus the
//! resource's environment overrides. The names are the stable interface the
//! pipeline depends on, so overrides may not reuse them.

use crate::report::Correlation;
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use thiserror::Error;

/// Fixed job parameter names.
pub mod names {
    pub const ASSET_URL: &str = "assetUrl";
    pub const EXTRACT_PATH: &str = "extractPath";
    pub const PROJECT_NAME: &str = "projectName";
    pub const RESPONSE_URL: &str = "responseURL";
    pub const STACK_ID: &str = "stackId";
    pub const REQUEST_ID: &str = "requestId";
    pub const LOGICAL_RESOURCE_ID: &str = "logicalResourceId";
    pub const COMPONENT_NAME: &str = "componentName";
}

/// All reserved names, in the order they are passed to the job.
pub const RESERVED_PARAMETERS: [&str; 8] = [
    names::ASSET_URL,
    names::EXTRACT_PATH,
    names::PROJECT_NAME,
    names::RESPONSE_URL,
    names::STACK_ID,
    names::REQUEST_ID,
    names::LOGICAL_RESOURCE_ID,
    names::COMPONENT_NAME,
];

/// Errors in the provisioning input
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    #[error("missing required property: {0}")]
    MissingProperty(String),
    #[error("malformed resource properties: {0}")]
    MalformedProperties(String),
    #[error("environment override `{0}` collides with a reserved job parameter")]
    ParameterCollision(String),
    #[error("missing job parameter: {0}")]
    MissingParameter(String),
    #[error("invalid lifecycle event: {0}")]
    InvalidEvent(String),
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawProperties {
    source_bucket_name: Option<String>,
    source_object_key: Option<String>,
    extract_path: Option<String>,
    code_build_project_name: Option<String>,
    component_name: Option<String>,
    #[serde(default)]
    environment: Option<BTreeMap<String, String>>,
}

fn required(value: Option<String>, name: &str) -> Result<String, ConfigurationError> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| ConfigurationError::MissingProperty(name.to_string()))
}

/// What to build and publish, validated from the event's resource properties.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvisioningParameters {
    pub source_bucket: String,
    pub source_key: String,
    pub extract_path: String,
    /// Name of the reusable build job definition
    pub job_name: String,
    pub component_name: String,
    pub environment: BTreeMap<String, String>,
}

impl ProvisioningParameters {
    pub fn from_properties(value: &serde_json::Value) -> Result<Self, ConfigurationError> {
        let raw = RawProperties::deserialize(value)
            .map_err(|e| ConfigurationError::MalformedProperties(e.to_string()))?;
        Ok(Self {
            source_bucket: required(raw.source_bucket_name, "sourceBucketName")?,
            source_key: required(raw.source_object_key, "sourceObjectKey")?,
            extract_path: required(raw.extract_path, "extractPath")?,
            job_name: required(raw.code_build_project_name, "codeBuildProjectName")?,
            component_name: required(raw.component_name, "componentName")?,
            environment: raw.environment.unwrap_or_default(),
        })
    }

    /// `s3://bucket/key` location of the source archive.
    pub fn asset_url(&self) -> String {
        format!("s3://{}/{}", self.source_bucket, self.source_key)
    }
}

/// Flattened name/value list passed to a build job run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobParameters {
    entries: Vec<(String, String)>,
}

impl JobParameters {
    /// Assemble the contract for one run. Fails before anything is started if
    /// an override reuses a reserved name.
    pub fn build(
        params: &ProvisioningParameters,
        correlation: &Correlation,
    ) -> Result<Self, ConfigurationError> {
        if let Some(name) = params
            .environment
            .keys()
            .find(|k| RESERVED_PARAMETERS.contains(&k.as_str()))
        {
            return Err(ConfigurationError::ParameterCollision(name.clone()));
        }

        let fixed = [
            (names::ASSET_URL, params.asset_url()),
            (names::EXTRACT_PATH, params.extract_path.clone()),
            (names::PROJECT_NAME, params.job_name.clone()),
            (names::RESPONSE_URL, correlation.response_url.clone()),
            (names::STACK_ID, correlation.stack_id.clone()),
            (names::REQUEST_ID, correlation.request_id.clone()),
            (names::LOGICAL_RESOURCE_ID, correlation.logical_resource_id.clone()),
            (names::COMPONENT_NAME, params.component_name.clone()),
        ];
        let mut entries: Vec<(String, String)> = fixed
            .into_iter()
            .map(|(name, value)| (name.to_string(), value))
            .collect();
        entries.extend(
            params
                .environment
                .iter()
                .map(|(k, v)| (k.clone(), v.clone())),
        );
        Ok(Self { entries })
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self
            .entries
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// The parameter contract as seen from inside a running job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobContext {
    pub asset_url: String,
    pub extract_path: String,
    pub project_name: String,
    pub component_name: String,
}

impl JobContext {
    /// Where to report. Without these nothing can be reported at all.
    pub fn correlation(vars: &HashMap<String, String>) -> Result<Correlation, ConfigurationError> {
        Ok(Correlation {
            response_url: lookup(vars, names::RESPONSE_URL)?,
            stack_id: lookup(vars, names::STACK_ID)?,
            request_id: lookup(vars, names::REQUEST_ID)?,
            logical_resource_id: lookup(vars, names::LOGICAL_RESOURCE_ID)?,
        })
    }

    pub fn from_vars(vars: &HashMap<String, String>) -> Result<Self, ConfigurationError> {
        Ok(Self {
            asset_url: lookup(vars, names::ASSET_URL)?,
            extract_path: lookup(vars, names::EXTRACT_PATH)?,
            project_name: lookup(vars, names::PROJECT_NAME)?,
            component_name: lookup(vars, names::COMPONENT_NAME)?,
        })
    }
}

fn lookup(vars: &HashMap<String, String>, name: &str) -> Result<String, ConfigurationError> {
    vars.get(name)
        .filter(|v| !v.is_empty())
        .cloned()
        .ok_or_else(|| ConfigurationError::MissingParameter(name.to_string()))
}

#[cfg(test)]
#[path = "params_tests.rs"]
mod tests;
