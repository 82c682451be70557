// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Component version ARNs.
//!
//! A published component version is identified by a colon-delimited ARN with
//! a fixed layout:
//!
//! ```text
//! arn:aws:greengrass:<region>:<account>:components:<name>:versions:<version>
//!  0   1      2          3        4          5        6       7         8
//! ```
//!
//! The version is read positionally from field 8, so the field count is
//! validated before anything is indexed.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Number of `:`-delimited fields in a component version ARN.
pub const VERSION_ARN_FIELDS: usize = 9;

/// Errors from parsing a component version ARN
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArnError {
    #[error("malformed component version ARN `{arn}`: expected 9 fields, found {found}")]
    FieldCount { arn: String, found: usize },
    #[error("malformed component version ARN `{arn}`: version field is empty")]
    EmptyVersion { arn: String },
}

/// A parsed, fully-qualified component version ARN.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ComponentVersionArn {
    raw: String,
    /// Byte offset of the colon that ends the unversioned component ARN.
    component_end: usize,
}

impl ComponentVersionArn {
    pub fn parse(arn: &str) -> Result<Self, ArnError> {
        let arn = arn.trim();
        let found = arn.split(':').count();
        if found != VERSION_ARN_FIELDS {
            return Err(ArnError::FieldCount {
                arn: arn.to_string(),
                found,
            });
        }

        let colons: Vec<usize> = arn.match_indices(':').map(|(i, _)| i).collect();
        let version_start = colons[VERSION_ARN_FIELDS - 2] + 1;
        if version_start >= arn.len() {
            return Err(ArnError::EmptyVersion {
                arn: arn.to_string(),
            });
        }

        Ok(Self {
            raw: arn.to_string(),
            component_end: colons[VERSION_ARN_FIELDS - 3],
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// The human-readable version (field 8).
    pub fn version(&self) -> &str {
        self.raw.rsplit(':').next().unwrap_or_default()
    }

    /// The component name (field 6).
    pub fn component_name(&self) -> &str {
        self
            .raw[..self.component_end]
            .rsplit(':')
            .next()
            .unwrap_or_default()
    }

    /// The unversioned component ARN (fields 0 through 6).
    pub fn component_arn(&self) -> &str {
        &self.raw[..self.component_end]
    }
}

impl fmt::Display for ComponentVersionArn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl FromStr for ComponentVersionArn {
    type Err = ArnError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Unversioned ARN of a component owned by `account` in `region`.
pub fn component_arn(region: &str, account: &str, name: &str) -> String {
    format!(
        "arn:aws:greengrass:{}:{}:components:{}",
        region,
        account,
        name
    )
}

#[cfg(test)]
#[path = "arn_tests.rs"]
mod tests;
