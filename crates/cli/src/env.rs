// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the CLI.

use edgepub_engine::{CleanupPolicy, WatchPolicy};
use std::time::Duration;

/// Version string shown by `--version`
pub const VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), "+", env!("BUILD_GIT_HASH"));

fn non_empty(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn millis(name: &str) -> Option<Duration> {
    non_empty(name)
        .and_then(|s| s.parse::<u64>().ok())
        .map(Duration::from_millis)
}

/// Log filter: EDGEPUB_LOG > RUST_LOG > info
pub fn log_filter() -> String {
    non_empty("EDGEPUB_LOG")
        .or_else(|| non_empty("RUST_LOG"))
        .unwrap_or_else(|| "info".to_string())
}

/// Namespace holding job definitions and their runs
pub fn k8s_namespace() -> String {
    non_empty("EDGEPUB_K8S_NAMESPACE").unwrap_or_else(|| "default".to_string())
}

/// Delete-time cleanup policy. Unrecognized values fall back to off.
pub fn cleanup_policy() -> CleanupPolicy {
    let Some(value) = non_empty("EDGEPUB_CLEANUP_ON_DELETE") else {
        return CleanupPolicy::Off;
    };
    value.parse().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "ignoring EDGEPUB_CLEANUP_ON_DELETE");
        CleanupPolicy::Off
    })
}

/// Watchdog for accepted runs (disabled unless EDGEPUB_WATCH_ATTEMPTS > 0)
pub fn watch_policy() -> WatchPolicy {
    let default = WatchPolicy::default();
    WatchPolicy {
        attempts: non_empty("EDGEPUB_WATCH_ATTEMPTS")
            .and_then(|s| s.parse::<u32>().ok())
            .unwrap_or(default.attempts),
        interval: millis("EDGEPUB_WATCH_INTERVAL_MS").unwrap_or(default.interval),
    }
}

/// Callback PUT timeout (default 30s)
pub fn callback_timeout() -> Duration {
    millis("EDGEPUB_CALLBACK_TIMEOUT_MS").unwrap_or(Duration::from_secs(30))
}

/// Where this process's logs can be found, for reports without a reason.
///
/// EDGEPUB_LOG_LOCATION > AWS_LAMBDA_LOG_STREAM_NAME > HOSTNAME (the pod name)
pub fn log_location() -> String {
    non_empty("EDGEPUB_LOG_LOCATION")
        .or_else(|| non_empty("AWS_LAMBDA_LOG_STREAM_NAME"))
        .or_else(|| non_empty("HOSTNAME"))
        .unwrap_or_else(|| "unknown".to_string())
}

pub fn aws_region() -> Option<String> {
    non_empty("AWS_REGION").or_else(|| non_empty("AWS_DEFAULT_REGION"))
}

/// Account owning the published components
pub fn account_id() -> Option<String> {
    non_empty("EDGEPUB_ACCOUNT_ID")
}

/// AWS CLI binary used for registry calls
pub fn aws_cli() -> String {
    non_empty("EDGEPUB_AWS_CLI").unwrap_or_else(|| "aws".to_string())
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
