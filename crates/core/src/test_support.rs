// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fixtures shared by tests across the workspace.

use serde_json::json;

/// Resource properties as the control plane sends them.
pub fn sample_properties() -> serde_json::Value {
    json!({
        "ServiceToken": "arn:aws:lambda:us-east-1:123456789012:function:handler",
        "sourceBucketName": "cdk-assets",
        "sourceObjectKey": "source.zip",
        "extractPath": "exporter",
        "codeBuildProjectName": "gdk-publish-exporter",
        "componentName": "com.example.Exporter",
        "environment": { "GDK_REGION": "us-east-1" },
    })
}

/// A published version of the sample component.
pub fn sample_version_arn(version: &str) -> String {
    format!(
        "arn:aws:greengrass:us-east-1:123456789012:components:com.example.Exporter:versions:{}",
        version
    )
}

/// Unversioned ARN of the sample component.
pub const SAMPLE_COMPONENT_ARN: &str =
    "arn:aws:greengrass:us-east-1:123456789012:components:com.example.Exporter";
