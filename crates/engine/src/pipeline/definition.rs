// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Pipeline definition: the phases a build job runs, stored as TOML.
//!
//! ```toml
//! image = "aws/codebuild/standard:7.0"
//!
//! [runtime_versions]
//! python = "3.11"
//!
//! [setup]
//! continue_on_failure = true
//! commands = ["python3 -m pip install -U gdk"]
//!
//! [build]
//! commands = ["aws s3 cp \"${assetUrl}\" temp.zip", "gdk component publish"]
//!
//! [report]
//! log_location = "pod ${EDGEPUB_NAMESPACE}/${HOSTNAME}"
//! ```
//!
//! Commands may reference job parameters as `${name}`; values are
//! substituted escaped for double-quoted shell strings.

use super::toolchain::{python_for_image, Toolchain, ToolchainError};
use super::PipelineError;
use crate::template::escape_for_shell;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::Path;

const GDK_TAGS_URL: &str =
    "https://api.github.com/repos/aws-greengrass/aws-greengrass-gdk-cli/tags";
const GDK_REPO: &str = "git+https://github.com/aws-greengrass/aws-greengrass-gdk-cli.git";
const PYTHON_BIN_ON_PATH: &str =
    r#"export PATH="$(python3 -c 'import os, sys; print(os.path.dirname(sys.executable))'):$PATH""#;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineDefinition {
    /// Build image the job definition is expected to run.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub runtime_versions: IndexMap<String, String>,
    #[serde(default)]
    pub setup: SetupPhase,
    #[serde(default)]
    pub build: Phase,
    #[serde(default)]
    pub report: ReportPhase,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Phase {
    #[serde(default)]
    pub commands: Vec<String>,
}

/// Toolchain installation. Failures here are tolerated by default: a
/// missing tool makes the build phase fail with a clearer message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetupPhase {
    #[serde(default = "default_continue_on_failure")]
    pub continue_on_failure: bool,
    #[serde(default)]
    pub commands: Vec<String>,
}

impl Default for SetupPhase {
    fn default() -> Self {
        Self {
            continue_on_failure: default_continue_on_failure(),
            commands: Vec::new(),
        }
    }
}

fn default_continue_on_failure() -> bool {
    true
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportPhase {
    /// Template naming where this job's logs can be found.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_location: Option<String>,
}

impl PipelineDefinition {
    pub fn load(path: &Path) -> Result<Self, PipelineError> {
        let content = std::fs::read_to_string(path).map_err(|source| PipelineError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self, PipelineError> {
        toml::from_str(content).map_err(|e| PipelineError::Parse(e.to_string()))
    }

    pub fn to_toml(&self) -> Result<String, PipelineError> {
        toml::to_string(self).map_err(|e| PipelineError::Render(e.to_string()))
    }

    /// The standard gdk build-and-publish pipeline for `toolchain`.
    ///
    /// `gdk_version` pins the gdk CLI to a tag; `None` installs the newest tag.
    pub fn gdk(toolchain: &Toolchain, gdk_version: Option<&str>) -> Result<Self, ToolchainError> {
        let image = toolchain.build_image()?;
        let mut runtime_versions = IndexMap::new();
        runtime_versions.insert("python".to_string(), python_for_image(image)?.to_string());
        let (runtime, version) = toolchain.runtime();
        runtime_versions.insert(runtime.to_string(), version.to_string());

        let tag = match gdk_version {
            Some(version) => format!("tag=\"{}\"", escape_for_shell(version)),
            None => format!(
                r#"tag=$(curl -s "{}" | sed -n 's/.*"name": "\(.*\)",.*/\1/p' | head -n1)"#,
                GDK_TAGS_URL
            ),
        };
        let setup = vec![
            tag,
            format!(r#"python3 -m pip install -U "{}@$tag""#, GDK_REPO),
            PYTHON_BIN_ON_PATH.to_string(),
            "gdk -v".to_string(),
        ];

        let build: Vec<String> = [
            PYTHON_BIN_ON_PATH,
            r#"aws s3 cp "${assetUrl}" temp.zip"#,
            r#"mkdir -p "${extractPath}""#,
            r#"unzip -o temp.zip -d "${extractPath}""#,
            "rm temp.zip",
            r#"cd "${extractPath}""#,
            "gdk component build",
            "gdk component publish",
        ]
        .map(String::from)
        .into();

        Ok(Self {
            image: Some(image.to_string()),
            runtime_versions,
            setup: SetupPhase {
                continue_on_failure: true,
                commands: setup,
            },
            build: Phase { commands: build },
            report: ReportPhase {
                log_location: Some("pod ${EDGEPUB_NAMESPACE}/${HOSTNAME}".to_string()),
            },
        })
    }
}

#[cfg(test)]
#[path = "definition_tests.rs"]
mod tests;
