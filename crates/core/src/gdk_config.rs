// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `gdk-config.json` reader.
//!
//! The Greengrass Development Kit configuration names the component being
//! published and the bucket/region its artifacts are uploaded to. Only the
//! first component entry is used.

use indexmap::IndexMap;
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

/// Errors from reading gdk-config.json
#[derive(Debug, Error)]
pub enum GdkConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("invalid gdk-config.json: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("no component found in gdk-config.json")]
    NoComponent,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GdkConfig {
    pub component: IndexMap<String, ComponentSection>,
    #[serde(default)]
    pub gdk_version: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ComponentSection {
    pub publish: PublishSection,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PublishSection {
    pub bucket: String,
    pub region: String,
}

impl GdkConfig {
    pub fn load(path: &Path) -> Result<Self, GdkConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| GdkConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self, GdkConfigError> {
        Ok(serde_json::from_str(content)?)
    }

    fn first(&self) -> Result<(&str, &PublishSection), GdkConfigError> {
        self.component
            .first()
            .map(|(name, section)| (name.as_str(), &section.publish))
            .ok_or(GdkConfigError::NoComponent)
    }

    pub fn component_name(&self) -> Result<&str, GdkConfigError> {
        Ok(self.first()?.0)
    }

    pub fn region(&self) -> Result<&str, GdkConfigError> {
        Ok(&self.first()?.1.region)
    }

    pub fn bucket(&self) -> Result<&str, GdkConfigError> {
        Ok(&self.first()?.1.bucket)
    }

    /// Name of the artifact bucket gdk publishes to: `{bucket}-{region}-{account}`, lowercased.
    pub fn bucket_name(&self, account: &str) -> Result<String, GdkConfigError> {
        let (_, publish) = self.first()?;
        let name = format!("{}-{}-{}", publish.bucket, publish.region, account);
        Ok(name.to_lowercase())
    }
}

#[cfg(test)]
#[path = "gdk_config_tests.rs"]
mod tests;
