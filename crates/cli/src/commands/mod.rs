// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

pub mod handle;
pub mod pipeline;
pub mod render;

use crate::env;
use edgepub_adapters::{AwsCliRegistry, HttpCallbackSink};

fn registry() -> AwsCliRegistry {
    let registry = AwsCliRegistry::new(env::aws_cli());
    match env::aws_region() {
        Some(region) => registry.region(region),
        None => registry,
    }
}

fn callback_sink() -> anyhow::Result<HttpCallbackSink> {
    Ok(HttpCallbackSink::new(env::callback_timeout())?)
}
