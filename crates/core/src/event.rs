// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Lifecycle events issued by the control plane.

use crate::params::{ConfigurationError, ProvisioningParameters};
use crate::report::Correlation;
use serde::Deserialize;

/// Which lifecycle operation the control plane is requesting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum RequestKind {
    Create,
    Update,
    Delete,
}

crate::simple_display! {
    RequestKind {
        Create => "create",
        Update => "update",
        Delete => "delete",
    }
}

/// One control-plane operation on one managed resource.
///
/// Resource properties are kept as raw JSON so that a malformed property set
/// still produces a FAILED report rather than an unparseable event.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LifecycleEvent {
    #[serde(rename = "RequestType")]
    pub kind: RequestKind,
    #[serde(rename = "ResponseURL")]
    pub response_url: String,
    #[serde(rename = "StackId")]
    pub stack_id: String,
    #[serde(rename = "RequestId")]
    pub request_id: String,
    #[serde(rename = "LogicalResourceId")]
    pub logical_resource_id: String,
    /// Previously provisioned artifact (Update and Delete only)
    #[serde(rename = "PhysicalResourceId", default)]
    pub physical_resource_id: Option<String>,
    #[serde(rename = "ResourceProperties", default)]
    pub properties: Option<serde_json::Value>,
}

/// The addressing fields alone, read from an event that fails strict parsing.
#[derive(Deserialize)]
struct AddressingFields {
    #[serde(rename = "ResponseURL")]
    response_url: String,
    #[serde(rename = "StackId")]
    stack_id: String,
    #[serde(rename = "RequestId")]
    request_id: String,
    #[serde(rename = "LogicalResourceId")]
    logical_resource_id: String,
}

crate::builder! {
    pub struct LifecycleEventBuilder => LifecycleEvent {
        into {
            response_url: String = "https://callback.example/presigned?sig=abc",
            stack_id: String = "arn:aws:cloudformation:us-east-1:123456789012:stack/edge/1",
            request_id: String = "req-1",
            logical_resource_id: String = "ExporterPublish",
        }
        set {
            kind: RequestKind = RequestKind::Create,
            properties: Option<serde_json::Value> = Some(crate::test_support::sample_properties()),
        }
        option {
            physical_resource_id: String = None,
        }
    }
}

impl LifecycleEvent {
    pub fn from_json(input: &str) -> Result<Self, ConfigurationError> {
        serde_json::from_str(input).map_err(|e| ConfigurationError::InvalidEvent(e.to_string()))
    }

    /// Where to answer an event that [`Self::from_json`] rejects.
    ///
    /// `None` when the addressing fields themselves are unreadable.
    pub fn correlation_from_json(input: &str) -> Option<Correlation> {
        let fields: AddressingFields = serde_json::from_str(input).ok()?;
        if fields.response_url.is_empty() {
            return None;
        }
        Some(Correlation {
            response_url: fields.response_url,
            stack_id: fields.stack_id,
            request_id: fields.request_id,
            logical_resource_id: fields.logical_resource_id,
        })
    }

    /// Validate and extract the provisioning parameters.
    pub fn parameters(&self) -> Result<ProvisioningParameters, ConfigurationError> {
        let properties = self
            .properties
            .as_ref()
            .filter(|p| !p.is_null())
            .ok_or_else(|| ConfigurationError::MissingProperty("ResourceProperties".to_string()))?;
        ProvisioningParameters::from_properties(properties)
    }

    pub fn prior_physical_id(&self) -> Option<&str> {
        self
            .physical_resource_id
            .as_deref()
            .filter(|id| !id.is_empty())
    }

    pub fn correlation(&self) -> Correlation {
        Correlation {
            response_url: self.response_url.clone(),
            stack_id: self.stack_id.clone(),
            request_id: self.request_id.clone(),
            logical_resource_id: self.logical_resource_id.clone(),
        }
    }
}

#[cfg(test)]
#[path = "event_tests.rs"]
mod tests;
