// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Build image selection for a component's language toolchain.

use std::fmt;
use thiserror::Error;

pub const DEFAULT_BUILD_IMAGE: &str = "aws/codebuild/standard:7.0";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ToolchainError {
    #[error("unsupported Python version: {0}")]
    UnsupportedPython(String),
    #[error("unsupported Java version: {0}")]
    UnsupportedJava(String),
    #[error("unsupported build image: {0}")]
    UnsupportedImage(String),
}

/// Language runtime a component is built with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Toolchain {
    Python(String),
    Java(String),
}

impl Default for Toolchain {
    fn default() -> Self {
        Self::Python("3.11".to_string())
    }
}

impl fmt::Display for Toolchain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (name, version) = self.runtime();
        write!(f, "{} {}", name, version)
    }
}

impl Toolchain {
    pub fn python(version: impl Into<String>) -> Self {
        Self::Python(version.into())
    }

    pub fn java(version: impl Into<String>) -> Self {
        Self::Java(version.into())
    }

    /// Runtime name and version, as listed under `runtime_versions`.
    pub fn runtime(&self) -> (&'static str, &str) {
        match self {
            Self::Python(v) => ("python", v),
            Self::Java(v) => ("java", v),
        }
    }

    /// Oldest standard image that ships this runtime.
    pub fn build_image(&self) -> Result<&'static str, ToolchainError> {
        match self {
            Self::Python(v) => match v.as_str() {
                "3.7" | "3.8" | "3.9" => Ok("aws/codebuild/standard:5.0"),
                "3.10" => Ok("aws/codebuild/standard:6.0"),
                "3.11" => Ok("aws/codebuild/standard:7.0"),
                _ => Err(ToolchainError::UnsupportedPython(v.clone())),
            },
            Self::Java(v) => match v.as_str() {
                "corretto8" | "corretto11" => Ok("aws/codebuild/standard:5.0"),
                "corretto17" => Ok("aws/codebuild/standard:7.0"),
                _ => Err(ToolchainError::UnsupportedJava(v.clone())),
            },
        }
    }
}

/// Python version the build tooling runs on for a given image.
pub fn python_for_image(image: &str) -> Result<&'static str, ToolchainError> {
    match image {
        "aws/codebuild/standard:5.0"
        | "aws/codebuild/amazonlinux2-aarch64-standard:2.0"
        | "aws/codebuild/amazonlinux2-x86_64-standard:4.0" => Ok("3.9"),
        "aws/codebuild/standard:6.0" => Ok("3.10"),
        "aws/codebuild/standard:7.0"
        | "aws/codebuild/amazonlinux2-x86_64-standard:5.0"
        | "aws/codebuild/amazonlinux2-aarch64-standard:3.0" => Ok("3.11"),
        _ => Err(ToolchainError::UnsupportedImage(image.to_string())),
    }
}

#[cfg(test)]
#[path = "toolchain_tests.rs"]
mod tests;
