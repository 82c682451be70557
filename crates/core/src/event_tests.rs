// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

const CREATE_EVENT: &str = r#"{
    "RequestType": "Create",
    "ServiceToken": "arn:aws:lambda:us-east-1:123456789012:function:handler",
    "ResponseURL": "https://cloudformation-custom-resource-response-useast1.s3.amazonaws.com/x?sig=1",
    "StackId": "arn:aws:cloudformation:us-east-1:123456789012:stack/edge/1",
    "RequestId": "6f1c2b4e-0000-4000-8000-000000000001",
    "ResourceType": "Custom::CDKGdkPublish",
    "LogicalResourceId": "ExporterPublish",
    "ResourceProperties": {
        "ServiceToken": "arn:aws:lambda:us-east-1:123456789012:function:handler",
        "sourceBucketName": "cdk-assets",
        "sourceObjectKey": "source.zip",
        "extractPath": "exporter",
        "codeBuildProjectName": "gdk-publish-exporter",
        "componentName": "com.example.Exporter"
    }
}"#;

#[test]
fn parses_control_plane_event() {
    let event = LifecycleEvent::from_json(CREATE_EVENT).unwrap();
    assert_eq!(event.kind, RequestKind::Create);
    assert_eq!(event.request_id, "6f1c2b4e-0000-4000-8000-000000000001");
    assert_eq!(event.logical_resource_id, "ExporterPublish");
    assert_eq!(event.prior_physical_id(), None);

    let params = event.parameters().unwrap();
    assert_eq!(params.job_name, "gdk-publish-exporter");
    assert!(params.environment.is_empty());
}

#[yare::parameterized(
    create = { "Create", RequestKind::Create },
    update = { "Update", RequestKind::Update },
    delete = { "Delete", RequestKind::Delete },
)]
fn parses_request_kind(literal: &str, expected: RequestKind) {
    let input = CREATE_EVENT.replace(
        r#""RequestType": "Create""#,
        &format!(r#""RequestType": "{literal}""#),
    );
    assert_eq!(LifecycleEvent::from_json(&input).unwrap().kind, expected);
}

#[test]
fn unknown_request_kind_is_invalid() {
    let input =
        CREATE_EVENT.replace(r#""RequestType": "Create""#, r#""RequestType": "Rollback""#);
    assert!(matches!(
        LifecycleEvent::from_json(&input),
        Err(ConfigurationError::InvalidEvent(_))
    ));
}

#[test]
fn missing_properties_is_a_configuration_error() {
    let event = LifecycleEvent::builder().properties(None).build();
    assert_eq!(
        event.parameters(),
        Err(ConfigurationError::MissingProperty(
            "ResourceProperties".to_string()
        ))
    );
}

#[test]
fn empty_prior_physical_id_is_absent() {
    let event = LifecycleEvent::builder()
        .kind(RequestKind::Delete)
        .physical_resource_id("")
        .build();
    assert_eq!(event.prior_physical_id(), None);
}

#[test]
fn correlation_copies_reply_coordinates() {
    let event = LifecycleEvent::builder().request_id("req-9").build();
    let correlation = event.correlation();
    assert_eq!(correlation.request_id, "req-9");
    assert_eq!(correlation.response_url, event.response_url);
    assert_eq!(correlation.logical_resource_id, "ExporterPublish");
}

#[test]
fn rejected_event_keeps_its_addressing_fields() {
    let input = CREATE_EVENT.replace("\"Create\"", "\"Replace\"");
    assert!(LifecycleEvent::from_json(&input).is_err());

    let correlation = LifecycleEvent::correlation_from_json(&input).unwrap();
    assert_eq!(
        correlation.request_id,
        "6f1c2b4e-0000-4000-8000-000000000001"
    );
    assert_eq!(correlation.logical_resource_id, "ExporterPublish");
    assert!(correlation.response_url.ends_with("x?sig=1"));
}

#[yare::parameterized(
    not_json     = { "{not json" },
    no_url       = {
        r#"{"RequestType": "Create", "StackId": "s", "RequestId": "r", "LogicalResourceId": "l"}"#
    },
    empty_url    = {
        r#"{"ResponseURL": "", "StackId": "s", "RequestId": "r", "LogicalResourceId": "l"}"#
    },
    no_request   = { r#"{"ResponseURL": "https://cb", "StackId": "s", "LogicalResourceId": "l"}"# },
)]
fn unaddressable_event_has_no_correlation(input: &str) {
    assert_eq!(LifecycleEvent::correlation_from_json(input), None);
}
