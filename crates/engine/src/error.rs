// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use crate::resolver::ResolveError;
use edgepub_adapters::{RegistryError, TriggerError};
use edgepub_core::ConfigurationError;
use thiserror::Error;

/// Everything that can go wrong while dispatching a lifecycle event.
///
/// The handler never returns these to its caller; each one becomes the
/// reason of a FAILED completion report.
#[derive(Debug, Error)]
pub enum HandlerError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
    #[error(transparent)]
    Trigger(#[from] TriggerError),
    #[error(transparent)]
    Resolve(#[from] ResolveError),
    #[error(transparent)]
    Registry(#[from] RegistryError),
    #[error("unhandled error: {0}")]
    Unhandled(String),
}
