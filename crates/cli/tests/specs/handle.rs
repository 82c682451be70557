// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `edgepub handle` specs
//!
//! Delete events are answered by the handler itself, so they run without a
//! cluster. Create events need a cluster and are covered by unit tests.

use crate::prelude::*;

const PRIOR_ARN: &str = "arn:aws:greengrass:us-east-1:123456789012:components:Foo:versions:1.0.0";

fn delete_event(response_url: &str) -> String {
    serde_json::json!({
        "RequestType": "Delete",
        "ResponseURL": response_url,
        "StackId": "arn:aws:cloudformation:us-east-1:123456789012:stack/edge/1",
        "RequestId": "req-delete",
        "ResourceType": "Custom::CDKGdkPublish",
        "LogicalResourceId": "ExporterPublish",
        "PhysicalResourceId": PRIOR_ARN,
        "ResourceProperties": {
            "ServiceToken": "arn:aws:lambda:us-east-1:123456789012:function:handler",
            "componentName": "Foo"
        }
    })
    .to_string()
}

#[test]
fn delete_reports_success_from_stdin() {
    let temp = Project::empty();
    let server = CallbackServer::start();

    let stdout = temp
        .edgepub()
        .args(&["handle"])
        .stdin(delete_event(&server.url))
        .passes()
        .stdout();

    assert_eq!(stdout.trim(), "reported SUCCESS");
    let request = server.request();
    assert!(
        request.request_line.starts_with("PUT /presigned?sig=abc "),
        "{}",
        request.request_line
    );
    assert_eq!(request.header("content-type"), Some(""));
    assert_eq!(
        request.header("content-length"),
        Some(request.body.len().to_string().as_str())
    );

    let report = request.json();
    assert_eq!(report["Status"], "SUCCESS");
    assert_eq!(report["PhysicalResourceId"], PRIOR_ARN);
    assert_eq!(report["RequestId"], "req-delete");
    assert_eq!(report["LogicalResourceId"], "ExporterPublish");
    assert_eq!(report["NoEcho"], false);
    assert!(report["Data"].get("componentVersion").is_none());
}

#[test]
fn delete_reads_event_file() {
    let temp = Project::empty();
    let server = CallbackServer::start();
    temp.file("event.json", &delete_event(&server.url));

    temp
        .edgepub()
        .args(&["handle", "--event", "event.json"])
        .passes();

    assert_eq!(server.request().json()["Status"], "SUCCESS");
}

#[test]
fn unreadable_event_fails_without_reporting() {
    let temp = Project::empty();

    let stderr = temp
        .edgepub()
        .args(&["handle"])
        .stdin("{not json")
        .exits_with(1)
        .stderr();

    assert!(stderr.contains("unreadable lifecycle event"), "{stderr}");
}

#[test]
fn undeliverable_report_exits_2() {
    let temp = Project::empty();
    let closed = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let url = format!("http://{}/presigned", closed.local_addr().unwrap());
    drop(closed);

    let stderr = temp
        .edgepub()
        .args(&["handle"])
        .env("EDGEPUB_CALLBACK_TIMEOUT_MS", "2000")
        .stdin(delete_event(&url))
        .exits_with(2)
        .stderr();

    assert!(
        stderr.contains("completion report not delivered"),
        "{stderr}"
    );
}

#[test]
fn unrecognized_request_type_reports_failed() {
    let temp = Project::empty();
    let server = CallbackServer::start();
    let event = delete_event(&server.url).replace("\"Delete\"", "\"Replace\"");

    let stdout = temp
        .edgepub()
        .args(&["handle"])
        .stdin(event)
        .passes()
        .stdout();

    assert_eq!(stdout.trim(), "reported FAILED");
    let report = server.request().json();
    assert_eq!(report["Status"], "FAILED");
    assert_eq!(report["RequestId"], "req-delete");
    let reason = report["Reason"].as_str().unwrap();
    assert!(reason.starts_with("invalid lifecycle event"), "{reason}");
}
