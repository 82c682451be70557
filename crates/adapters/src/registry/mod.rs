// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Component registry: the catalog of published component versions.

mod aws_cli;

pub use aws_cli::AwsCliRegistry;

use async_trait::async_trait;
use thiserror::Error;

/// Errors from registry operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("registry command failed: {0}")]
    Command(String),
    #[error("unexpected registry output: {0}")]
    Output(String),
}

/// Adapter for querying and pruning published component versions
#[async_trait]
pub trait ComponentRegistry: Clone + Send + Sync + 'static {
    /// Version ARNs of the component, most recently published first.
    async fn list_versions(&self, component_arn: &str) -> Result<Vec<String>, RegistryError>;

    async fn delete_version(&self, version_arn: &str) -> Result<(), RegistryError>;
}

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(coverage_nightly, coverage(off))]
mod fake {
    use super::{ComponentRegistry, RegistryError};
    use async_trait::async_trait;
    use parking_lot::Mutex;
    use std::collections::HashMap;
    use std::sync::Arc;

    #[derive(Default)]
    struct FakeRegistryState {
        versions: HashMap<String, Vec<String>>,
        deleted: Vec<String>,
        list_error: Option<RegistryError>,
        delete_error: Option<RegistryError>,
    }

    /// Fake component registry for testing
    #[derive(Clone, Default)]
    pub struct FakeRegistry {
        inner: Arc<Mutex<FakeRegistryState>>,
    }

    impl FakeRegistry {
        pub fn new() -> Self {
            Self::default()
        }

        /// Seed the versions of a component, newest first.
        pub fn set_versions(&self, component_arn: &str, versions: &[String]) {
            self.inner
                .lock()
                .versions
                .insert(component_arn.to_string(), versions.to_vec());
        }

        pub fn fail_list(&self, error: RegistryError) {
            self.inner.lock().list_error = Some(error);
        }

        pub fn fail_delete(&self, error: RegistryError) {
            self.inner.lock().delete_error = Some(error);
        }

        pub fn deleted(&self) -> Vec<String> {
            self.inner.lock().deleted.clone()
        }
    }

    #[async_trait]
    impl ComponentRegistry for FakeRegistry {
        async fn list_versions(&self, component_arn: &str) -> Result<Vec<String>, RegistryError> {
            let inner = self.inner.lock();
            if let Some(error) = &inner.list_error {
                return Err(error.clone());
            }
            Ok(inner
                .versions
                .get(component_arn)
                .cloned()
                .unwrap_or_default())
        }

        async fn delete_version(&self, version_arn: &str) -> Result<(), RegistryError> {
            let mut inner = self.inner.lock();
            if let Some(error) = &inner.delete_error {
                return Err(error.clone());
            }
            inner.deleted.push(version_arn.to_string());
            for versions in inner.versions.values_mut() {
                versions.retain(|v| v != version_arn);
            }
            Ok(())
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
pub use fake::FakeRegistry;
