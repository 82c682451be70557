// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error type carrying a process exit code.
//!
//! - 1: the operation finished but failed (e.g. a FAILED report was sent)
//! - 2: the completion protocol itself broke (report undeliverable)

use std::fmt;

/// Exit code when a FAILED report was delivered.
pub const FAILED: i32 = 1;

/// Exit code when a report could not be addressed or delivered.
pub const UNDELIVERED: i32 = 2;

#[derive(Debug)]
pub struct ExitError {
    pub code: i32,
    pub message: String,
}

impl ExitError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl fmt::Display for ExitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ExitError {}
