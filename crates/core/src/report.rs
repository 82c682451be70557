// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Completion reports sent back to the issuing control plane.
//!
//! Exactly one report is sent per lifecycle event. The wire shape is fixed by
//! the callback contract; see [`WireReport`].

use crate::arn::ComponentVersionArn;
use serde::{Deserialize, Serialize};

/// Terminal status of a lifecycle operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ReportStatus {
    Success,
    Failed,
}

crate::simple_display! {
    ReportStatus {
        Success => "SUCCESS",
        Failed => "FAILED",
    }
}

/// Attributes returned to the issuer alongside the status.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportData {
    #[serde(rename = "componentVersion", default, skip_serializing_if = "Option::is_none")]
    pub component_version: Option<String>,
}

/// Where a report goes and which request it answers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Correlation {
    pub response_url: String,
    pub stack_id: String,
    pub request_id: String,
    pub logical_resource_id: String,
}

/// The single outbound message for a lifecycle event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionReport {
    pub status: ReportStatus,
    pub reason: Option<String>,
    pub physical_id: String,
    pub data: ReportData,
}

impl CompletionReport {
    /// A component version was published.
    pub fn success(arn: &ComponentVersionArn) -> Self {
        Self {
            status: ReportStatus::Success,
            reason: None,
            physical_id: arn.to_string(),
            data: ReportData {
                component_version: Some(arn.version().to_string()),
            },
        }
    }

    /// The resource was deleted; the prior physical id is echoed unchanged.
    pub fn deleted(prior_physical_id: impl Into<String>) -> Self {
        Self {
            status: ReportStatus::Success,
            reason: None,
            physical_id: prior_physical_id.into(),
            data: ReportData::default(),
        }
    }

    pub fn failed(reason: impl Into<String>) -> Self {
        Self {
            status: ReportStatus::Failed,
            reason: Some(reason.into()),
            physical_id: String::new(),
            data: ReportData::default(),
        }
    }

    /// Render the wire body. A missing or blank reason is replaced by a
    /// pointer to the execution logs at `log_location`.
    pub fn to_wire(&self, correlation: &Correlation, log_location: &str) -> WireReport {
        let reason = match &self.reason {
            Some(reason) if !reason.trim().is_empty() => reason.clone(),
            _ => fallback_reason(log_location),
        };
        WireReport {
            status: self.status,
            reason,
            physical_resource_id: self.physical_id.clone(),
            stack_id: correlation.stack_id.clone(),
            request_id: correlation.request_id.clone(),
            logical_resource_id: correlation.logical_resource_id.clone(),
            no_echo: false,
            data: self.data.clone(),
        }
    }
}

/// Reason used when no specific one is available.
pub fn fallback_reason(log_location: &str) -> String {
    format!("See the details in the execution logs: {}", log_location)
}

/// JSON body of the callback PUT.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct WireReport {
    pub status: ReportStatus,
    pub reason: String,
    pub physical_resource_id: String,
    pub stack_id: String,
    pub request_id: String,
    pub logical_resource_id: String,
    pub no_echo: bool,
    pub data: ReportData,
}

impl WireReport {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
#[path = "report_tests.rs"]
mod tests;
