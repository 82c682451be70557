// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Subprocess execution with a deadline.

use std::process::Output;
use std::time::Duration;
use tokio::process::Command;

/// Timeout for short CLI calls (registry queries and deletions).
pub const CLI_COMMAND_TIMEOUT: Duration = Duration::from_secs(60);

/// Timeout for a single pipeline phase.
pub const PHASE_COMMAND_TIMEOUT: Duration = Duration::from_secs(60 * 60);

/// Run `cmd` to completion, killing it if it outlives `timeout`.
///
/// `description` names the command in error messages.
pub async fn run_with_timeout(
    mut cmd: Command,
    timeout: Duration,
    description: &str,
) -> Result<Output, String> {
    cmd.kill_on_drop(true);
    match tokio::time::timeout(timeout, cmd.output()).await {
        Ok(Ok(output)) => Ok(output),
        Ok(Err(e)) => Err(format!("{} failed to start: {}", description, e)),
        Err(_) => Err(format!(
            "{} timed out after {}s",
            description,
            timeout.as_secs()
        )),
    }
}

#[cfg(test)]
#[path = "subprocess_tests.rs"]
mod tests;
