// domain-scout-lib/tests/rdap_http.rs

//! RDAP lookups against a mock registry

#![cfg(feature = "rdap")]

use domain_scout_lib::protocols::EndpointTable;
use domain_scout_lib::{
    AvailabilityVerifier, CheckConfig, CheckResult, DomainScoutError, LookupStatus, RdapClient,
    RegistryLookup,
};
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn quick_config() -> CheckConfig {
    CheckConfig::default()
        .with_rate_limit(Duration::from_millis(5))
        .with_retry_delay(Duration::from_millis(20))
}

fn rdap_client_for(server: &MockServer, timeout: Duration) -> RdapClient {
    RdapClient::with_timeout(timeout)
        .unwrap()
        .with_endpoints(EndpointTable::routed_to(format!(
            "{}/domain/{{}}",
            server.uri()
        )))
}

#[tokio::test]
async fn test_rdap_not_found_is_available_and_ok_is_taken() {
    let server = MockServer::start().await;

    Mock::given(method("HEAD"))
        .and(path("/domain/synclink.com"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("HEAD"))
        .and(path("/domain/google.com"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let verifier = AvailabilityVerifier::new(
        rdap_client_for(&server, Duration::from_secs(2)),
        quick_config().with_concurrency(2),
    );
    let domains = vec!["synclink.com".to_string(), "google.com".to_string()];
    let mut results = verifier.check_domains(&domains).await.unwrap();
    results.sort_by(|a, b| a.domain.cmp(&b.domain));

    assert_eq!(
        results,
        vec![
            CheckResult::new("google.com", false),
            CheckResult::new("synclink.com", true),
        ]
    );
}

#[tokio::test]
async fn test_rdap_server_error_is_unavailable_without_retry() {
    let server = MockServer::start().await;

    Mock::given(method("HEAD"))
        .and(path("/domain/busy.com"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&server)
        .await;

    let verifier = AvailabilityVerifier::new(
        rdap_client_for(&server, Duration::from_secs(2)),
        quick_config().with_retry_count(3),
    );
    let result = verifier.check_domain("busy.com").await;
    assert!(!result.available);
}

#[tokio::test]
async fn test_rdap_timeout_is_retried_then_unavailable() {
    let server = MockServer::start().await;

    Mock::given(method("HEAD"))
        .and(path("/domain/slow.com"))
        .respond_with(ResponseTemplate::new(404).set_delay(Duration::from_secs(2)))
        .expect(2)
        .mount(&server)
        .await;

    let verifier = AvailabilityVerifier::new(
        rdap_client_for(&server, Duration::from_millis(200)),
        quick_config().with_retry_count(1),
    );
    let result = verifier.check_domain("slow.com").await;
    assert_eq!(result, CheckResult::new("slow.com", false));
}

#[tokio::test]
async fn test_rdap_lookup_status() {
    let server = MockServer::start().await;
    Mock::given(method("HEAD"))
        .and(path("/domain/taken.io"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let client = rdap_client_for(&server, Duration::from_secs(2));
    assert_eq!(
        client.lookup("taken.io").await.unwrap(),
        LookupStatus::Registered(200)
    );
    assert!(matches!(
        client.lookup("nolabel").await,
        Err(DomainScoutError::InvalidDomain { .. })
    ));
}
