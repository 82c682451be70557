// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `edgepub render` specs

use crate::prelude::*;

#[test]
fn renders_python_pipeline_by_default() {
    let temp = Project::empty();

    let stdout = temp.edgepub().args(&["render"]).passes().stdout();

    assert!(
        stdout.contains(r#"image = "aws/codebuild/standard:7.0""#),
        "{stdout}"
    );
    assert!(stdout.contains(r#"python = "3.11""#), "{stdout}");
    assert!(stdout.contains("[build]"), "{stdout}");
    assert!(stdout.contains("gdk component publish"), "{stdout}");
}

#[test]
fn renders_java_pipeline_with_pinned_gdk() {
    let temp = Project::empty();

    let stdout = temp
        .edgepub()
        .args(&[
            "render",
            "--java",
            "corretto8",
            "--gdk-version",
            "v1.6.2",
        ])
        .passes()
        .stdout();

    assert!(
        stdout.contains(r#"image = "aws/codebuild/standard:5.0""#),
        "{stdout}"
    );
    assert!(stdout.contains(r#"java = "corretto8""#), "{stdout}");
    assert!(stdout.contains("v1.6.2"), "{stdout}");
}

#[test]
fn names_component_from_gdk_config() {
    let temp = Project::empty();
    temp.file(
        "gdk-config.json",
        r#"{"component":{"com.example.Exporter":{"publish":{"bucket":"Edge-Components","region":"us-east-1"}}},"gdk_version":"1.0.0"}"#,
    );

    let stdout = temp
        .edgepub()
        .args(&["render", "--gdk-config", "gdk-config.json"])
        .env("EDGEPUB_ACCOUNT_ID", "123456789012")
        .passes()
        .stdout();

    assert!(
        stdout.starts_with("# component: com.example.Exporter\n"),
        "{stdout}"
    );
    assert!(
        stdout.contains("# artifact bucket: edge-components-us-east-1-123456789012\n"),
        "{stdout}"
    );
}

#[test]
fn rejects_unsupported_python() {
    let temp = Project::empty();

    let stderr = temp
        .edgepub()
        .args(&["render", "--python", "2.7"])
        .exits_with(1)
        .stderr();

    assert!(
        stderr.contains("unsupported Python version: 2.7"),
        "{stderr}"
    );
}

#[test]
fn python_and_java_conflict() {
    let temp = Project::empty();

    temp
        .edgepub()
        .args(&["render", "--python", "3.11", "--java", "corretto17"])
        .exits_with(2);
}
