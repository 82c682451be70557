// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `edgepub pipeline` specs: the build job side of the protocol.

use crate::prelude::*;

const DEFINITION: &str = r#"
[setup]
commands = ["echo installing"]

[build]
commands = [
    "mkdir -p \"${extractPath}\"",
    "cd \"${extractPath}\"",
    "echo \"$componentName\" > published.txt",
]

[report]
log_location = "pod ${projectName}"
"#;

const NEWEST: &str =
    "arn:aws:greengrass:us-east-1:123456789012:components:com.example.Exporter:versions:1.0.4";

#[test]
fn successful_build_reports_published_version() {
    let temp = Project::empty();
    let server = CallbackServer::start();
    temp.file("pipeline.toml", DEFINITION);
    let aws = temp.script(
        "bin/aws",
        &format!(r#"echo "$@" >> aws-calls.txt; echo '["{NEWEST}", "{NEWEST}-old"]'"#),
    );

    let mut cli = temp
        .edgepub()
        .args(&[
            "pipeline",
            "--definition",
            "pipeline.toml",
            "--workdir",
            "work",
        ])
        .env("EDGEPUB_AWS_CLI", &aws)
        .env("AWS_REGION", "us-east-1")
        .env("EDGEPUB_ACCOUNT_ID", "123456789012");
    for (key, value) in job_env(&server.url) {
        cli = cli.env(key, value);
    }
    let stdout = cli.passes().stdout();

    assert_eq!(stdout.trim(), format!("SUCCESS {NEWEST}"));
    let published =
        std::fs::read_to_string(temp.path().join("work/exporter/published.txt")).unwrap();
    assert_eq!(published.trim(), "com.example.Exporter");
    let calls = std::fs::read_to_string(temp.path().join("aws-calls.txt")).unwrap();
    assert!(
        calls.contains(
            "list-component-versions --arn \
             arn:aws:greengrass:us-east-1:123456789012:components:com.example.Exporter"
        ),
        "{calls}"
    );

    let report = server.request().json();
    assert_eq!(report["Status"], "SUCCESS");
    assert_eq!(report["PhysicalResourceId"], NEWEST);
    assert_eq!(report["Data"]["componentVersion"], "1.0.4");
    assert_eq!(report["RequestId"], "req-1");
}

#[test]
fn failed_build_reports_failed_and_exits_1() {
    let temp = Project::empty();
    let server = CallbackServer::start();
    temp.file(
        "pipeline.toml",
        r#"
[build]
commands = ["echo 'gdk: recipe not found' >&2", "exit 4"]

[report]
log_location = "pod ${projectName}"
"#,
    );

    let mut cli = temp
        .edgepub()
        .args(&["pipeline", "--definition", "pipeline.toml"]);
    for (key, value) in job_env(&server.url) {
        cli = cli.env(key, value);
    }
    let stderr = cli.exits_with(1).stderr();

    assert!(
        stderr.contains("build phase exited with code 4"),
        "{stderr}"
    );
    let report = server.request().json();
    assert_eq!(report["Status"], "FAILED");
    assert_eq!(report["PhysicalResourceId"], "");
    assert_eq!(
        report["Reason"],
        "build phase exited with code 4: gdk: recipe not found. \
         See the details in the execution logs: pod gdk-publish-exporter"
    );
}

#[test]
fn missing_callback_parameters_exit_2() {
    let temp = Project::empty();
    temp.file("pipeline.toml", DEFINITION);

    let stderr = temp
        .edgepub()
        .args(&["pipeline", "--definition", "pipeline.toml"])
        .exits_with(2)
        .stderr();

    assert!(
        stderr.contains("missing job parameter: responseURL"),
        "{stderr}"
    );
}

#[test]
fn invalid_definition_reports_failed_and_exits_1() {
    let temp = Project::empty();
    let server = CallbackServer::start();
    temp.file("pipeline.toml", "[build]\ncommands = \"not a list\"\n");

    let mut cli = temp
        .edgepub()
        .args(&["pipeline", "--definition", "pipeline.toml"])
        .env("EDGEPUB_LOG_LOCATION", "pod exporter-abc12");
    for (key, value) in job_env(&server.url) {
        cli = cli.env(key, value);
    }
    let stderr = cli.exits_with(1).stderr();

    assert!(stderr.contains("invalid pipeline definition"), "{stderr}");
    let request = server.request();
    assert!(
        request.request_line.starts_with("PUT "),
        "{}",
        request.request_line
    );
    let report = request.json();
    assert_eq!(report["Status"], "FAILED");
    assert_eq!(report["RequestId"], "req-1");
    assert_eq!(report["PhysicalResourceId"], "");
    let reason = report["Reason"].as_str().unwrap();
    assert!(
        reason.starts_with("invalid pipeline definition"),
        "{reason}"
    );
    assert!(
        reason.ends_with("See the details in the execution logs: pod exporter-abc12"),
        "{reason}"
    );
}

#[test]
fn missing_definition_file_reports_failed() {
    let temp = Project::empty();
    let server = CallbackServer::start();

    let mut cli = temp
        .edgepub()
        .args(&["pipeline", "--definition", "absent.toml"]);
    for (key, value) in job_env(&server.url) {
        cli = cli.env(key, value);
    }
    cli.exits_with(1);

    let report = server.request().json();
    assert_eq!(report["Status"], "FAILED");
    let reason = report["Reason"].as_str().unwrap();
    assert!(
        reason.starts_with("failed to read pipeline definition"),
        "{reason}"
    );
}
