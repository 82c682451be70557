// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Black-box specs for the `edgepub` binary.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

#[path = "specs/prelude.rs"]
mod prelude;

#[path = "specs/handle.rs"]
mod handle;
#[path = "specs/pipeline.rs"]
mod pipeline;
#[path = "specs/render.rs"]
mod render;
