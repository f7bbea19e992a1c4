//! Contract tests for GeoClient against the geolocation service.
//!
//! Classification is fail-open: every failure mode yields `Unknown`.

use cmp_client::{CmpApiConfig, CmpClient};
use cmp_core::Jurisdiction;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(mock_server: &MockServer) -> CmpClient {
    CmpClient::new(CmpApiConfig::local_mock(&mock_server.uri()).unwrap()).unwrap()
}

async fn mount_timezone(mock_server: &MockServer, ip: &str, timezone: &str) {
    Mock::given(method("GET"))
        .and(path(format!("/json/{ip}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "success",
            "timezone": timezone,
            "query": ip
        })))
        .mount(mock_server)
        .await;
}

#[tokio::test]
async fn berlin_address_is_gdpr() {
    let mock_server = MockServer::start().await;
    mount_timezone(&mock_server, "77.185.42.223", "Europe/Berlin").await;

    let client = test_client(&mock_server);
    assert_eq!(client.geo().classify("77.185.42.223").await, Jurisdiction::Gdpr);
}

#[tokio::test]
async fn los_angeles_address_is_ccpa() {
    let mock_server = MockServer::start().await;
    mount_timezone(&mock_server, "198.181.163.183", "America/Los_Angeles").await;

    let client = test_client(&mock_server);
    assert_eq!(client.geo().classify("198.181.163.183").await, Jurisdiction::Ccpa);
}

#[tokio::test]
async fn kolkata_address_is_unknown() {
    let mock_server = MockServer::start().await;
    mount_timezone(&mock_server, "103.221.233.53", "Asia/Kolkata").await;

    let client = test_client(&mock_server);
    assert_eq!(client.geo().classify("103.221.233.53").await, Jurisdiction::Unknown);
}

#[tokio::test]
async fn failed_lookup_is_unknown() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/json/foo"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "fail",
            "message": "invalid query",
            "query": "foo"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let lookup = client.geo().lookup("foo").await.unwrap();
    assert_eq!(lookup.status.as_deref(), Some("fail"));
    assert_eq!(lookup.jurisdiction(), Jurisdiction::Unknown);
}

#[tokio::test]
async fn error_status_is_unknown() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/json/1.2.3.4"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    assert!(client.geo().lookup("1.2.3.4").await.is_err());
    assert_eq!(client.geo().classify("1.2.3.4").await, Jurisdiction::Unknown);
}

#[tokio::test]
async fn garbage_body_is_unknown() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/json/1.2.3.4"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    assert_eq!(client.geo().classify("1.2.3.4").await, Jurisdiction::Unknown);
}

#[tokio::test]
async fn unreachable_service_is_unknown() {
    let client = CmpClient::new(CmpApiConfig::local_mock("http://127.0.0.1:1").unwrap()).unwrap();
    assert_eq!(client.geo().classify("77.185.42.223").await, Jurisdiction::Unknown);
}

#[tokio::test]
async fn classification_is_idempotent() {
    let mock_server = MockServer::start().await;
    mount_timezone(&mock_server, "77.185.42.223", "Europe/Berlin").await;

    let client = test_client(&mock_server);
    let first = client.geo().classify("77.185.42.223").await;
    let second = client.geo().classify("77.185.42.223").await;
    assert_eq!(first, second);
}

#[tokio::test]
async fn ip_is_sent_as_one_encoded_segment() {
    let mock_server = MockServer::start().await;

    // Paths a mangled address would reach.
    Mock::given(method("GET"))
        .and(path("/json/1.2.3.4"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"timezone": "Europe/Berlin"})))
        .expect(0)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/evil"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"timezone": "America/New_York"})),
        )
        .expect(0)
        .mount(&mock_server)
        .await;

    for encoded in ["/json/1.2.3.4%23x", "/json/1.2.3.4%3Fx=1", "/json/..%2Fevil"] {
        Mock::given(method("GET"))
            .and(path(encoded))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": "fail",
                "message": "invalid query"
            })))
            .expect(1)
            .mount(&mock_server)
            .await;
    }

    let client = test_client(&mock_server);
    for ip in ["1.2.3.4#x", "1.2.3.4?x=1", "../evil"] {
        assert_eq!(client.geo().classify(ip).await, Jurisdiction::Unknown, "{ip}");
    }
}
