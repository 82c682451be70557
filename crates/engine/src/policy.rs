// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Optional handler behaviors. Everything defaults to off.

use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PolicyError {
    #[error("unknown cleanup policy `{0}` (expected off, best-effort or required)")]
    UnknownCleanup(String),
}

/// Whether a delete event prunes stale component versions before reporting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CleanupPolicy {
    #[default]
    Off,
    /// Prune, but log failures and still report SUCCESS.
    BestEffort,
    /// Prune; any failure turns the delete report into FAILED.
    Required,
}

edgepub_core::simple_display! {
    CleanupPolicy {
        Off => "off",
        BestEffort => "best-effort",
        Required => "required",
    }
}

impl FromStr for CleanupPolicy {
    type Err = PolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "off" | "false" | "0" => Ok(Self::Off),
            "best-effort" | "besteffort" | "true" | "1" => Ok(Self::BestEffort),
            "required" => Ok(Self::Required),
            _ => Err(PolicyError::UnknownCleanup(s.to_string())),
        }
    }
}

/// Post-acceptance watchdog for runs that die before their script executes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WatchPolicy {
    /// Number of status polls; 0 disables the watchdog.
    pub attempts: u32,
    pub interval: Duration,
}

impl Default for WatchPolicy {
    fn default() -> Self {
        Self {
            attempts: 0,
            interval: Duration::from_secs(5),
        }
    }
}

impl WatchPolicy {
    pub fn enabled(&self) -> bool {
        self.attempts > 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerPolicy {
    pub cleanup: CleanupPolicy,
    pub watch: WatchPolicy,
    /// Where the handler's own logs live; cited by reports without a reason.
    pub log_location: String,
}

impl Default for HandlerPolicy {
    fn default() -> Self {
        Self {
            cleanup: CleanupPolicy::default(),
            watch: WatchPolicy::default(),
            log_location: "handler logs".to_string(),
        }
    }
}

impl HandlerPolicy {
    edgepub_core::setters! {
        into { log_location: String }
        set { cleanup: CleanupPolicy, watch: WatchPolicy }
    }
}

#[cfg(test)]
#[path = "policy_tests.rs"]
mod tests;
