// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use edgepub_adapters::FakeRegistry;
use edgepub_core::test_support::{sample_version_arn, SAMPLE_COMPONENT_ARN};

#[yare::parameterized(
    nine_fields      = { "arn:a:b:c:d:e:f:g:1.2.3", Some("1.2.3") },
    greengrass       = {
        "arn:aws:greengrass:us-east-1:123456789012:components:Foo:versions:1.0.0",
        Some("1.0.0")
    },
    eight_fields     = { "arn:a:b:c:d:e:f:1.2.3", None },
    ten_fields       = { "arn:a:b:c:d:e:f:g:h:1.2.3", None },
    empty_version    = { "arn:a:b:c:d:e:f:g:", None },
    not_an_arn       = { "None", None },
)]
fn extracts_version_positionally(arn: &str, expected: Option<&str>) {
    match expected {
        Some(version) => assert_eq!(resolve_version(arn).unwrap(), version),
        None => assert!(matches!(
            resolve_version(arn),
            Err(ResolveError::MalformedArn(_))
        )),
    }
}

fn resolver_with(versions: &[String]) -> VersionResolver<FakeRegistry> {
    let registry = FakeRegistry::new();
    registry.set_versions(SAMPLE_COMPONENT_ARN, versions);
    VersionResolver::new(registry)
}

#[tokio::test]
async fn resolves_newest_version() {
    let resolver = resolver_with(&[sample_version_arn("1.0.2"), sample_version_arn("1.0.1")]);

    let arn = resolver.resolve(SAMPLE_COMPONENT_ARN).await.unwrap();
    assert_eq!(arn.version(), "1.0.2");
    assert_eq!(arn.as_str(), sample_version_arn("1.0.2"));
}

#[yare::parameterized(
    no_versions = { &[] },
    text_none   = { &["None"] },
)]
fn unpublished_component_is_not_found(versions: &[&str]) {
    let versions: Vec<String> = versions.iter().map(|v| v.to_string()).collect();
    let resolver = resolver_with(&versions);
    let runtime = tokio::runtime::Builder::new_current_thread()
        .build()
        .unwrap();

    let err = runtime
        .block_on(resolver.resolve(SAMPLE_COMPONENT_ARN))
        .unwrap_err();
    assert_eq!(
        err,
        ResolveError::NotFound(SAMPLE_COMPONENT_ARN.to_string())
    );
}

#[tokio::test]
async fn malformed_newest_version_is_reported() {
    let resolver = resolver_with(&["arn:aws:greengrass:components:Foo".to_string()]);

    let err = resolver.resolve(SAMPLE_COMPONENT_ARN).await.unwrap_err();
    assert!(matches!(
        err,
        ResolveError::MalformedArn(ArnError::FieldCount { found: 5, .. })
    ));
}

#[tokio::test]
async fn registry_failure_propagates() {
    let registry = FakeRegistry::new();
    registry.fail_list(RegistryError::Command("throttled".to_string()));
    let resolver = VersionResolver::new(registry);

    let err = resolver.resolve(SAMPLE_COMPONENT_ARN).await.unwrap_err();
    assert_eq!(
        err,
        ResolveError::Registry(RegistryError::Command("throttled".to_string()))
    );
}

#[tokio::test]
async fn non_current_versions_skip_newest() {
    let resolver = resolver_with(&[
        sample_version_arn("1.0.2"),
        sample_version_arn("1.0.1"),
        sample_version_arn("1.0.0"),
    ]);

    let stale = resolver
        .non_current_versions(SAMPLE_COMPONENT_ARN)
        .await
        .unwrap();
    let versions: Vec<&str> = stale
        .iter()
        .map(|arn| arn.version())
        .collect();
    assert_eq!(versions, vec!["1.0.1", "1.0.0"]);
}
