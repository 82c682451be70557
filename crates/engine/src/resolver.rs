// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Version Resolver: finds the newest published version of a component.

use edgepub_adapters::{ComponentRegistry, RegistryError};
use edgepub_core::{ArnError, ComponentVersionArn};
use thiserror::Error;

/// Errors from version resolution
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error("no published versions found for {0}")]
    NotFound(String),
    #[error(transparent)]
    MalformedArn(#[from] ArnError),
    #[error(transparent)]
    Registry(#[from] RegistryError),
}

/// Extract the version field (9th `:`-delimited field) of a version ARN.
pub fn resolve_version(arn: &str) -> Result<String, ResolveError> {
    Ok(ComponentVersionArn::parse(arn)?.version().to_string())
}

/// Resolves component versions through a [`ComponentRegistry`].
#[derive(Clone)]
pub struct VersionResolver<R: ComponentRegistry> {
    registry: R,
}

impl<R: ComponentRegistry> VersionResolver<R> {
    pub fn new(registry: R) -> Self {
        Self { registry }
    }

    /// The most recently published version of `component_arn`.
    pub async fn resolve(&self, component_arn: &str) -> Result<ComponentVersionArn, ResolveError> {
        let versions = self.published(component_arn).await?;
        let newest = versions
            .into_iter()
            .next()
            .ok_or_else(|| ResolveError::NotFound(component_arn.to_string()))?;
        let arn = ComponentVersionArn::parse(&newest)?;
        tracing::info!(%component_arn, version = arn.version(), "resolved component version");
        Ok(arn)
    }

    /// Every published version except the newest, newest first.
    pub async fn non_current_versions(
        &self,
        component_arn: &str,
    ) -> Result<Vec<ComponentVersionArn>, ResolveError> {
        let versions = self.published(component_arn).await?;
        versions
            .iter()
            .skip(1)
            .map(|v| Ok(ComponentVersionArn::parse(v)?))
            .collect()
    }

    async fn published(&self, component_arn: &str) -> Result<Vec<String>, ResolveError> {
        let versions = self.registry.list_versions(component_arn).await?;
        // Text-mode CLI output prints `None` for an empty result
        Ok(versions
            .into_iter()
            .filter(|v| !v.is_empty() && v != "None")
            .collect())
    }
}

#[cfg(test)]
#[path = "resolver_tests.rs"]
mod tests;
