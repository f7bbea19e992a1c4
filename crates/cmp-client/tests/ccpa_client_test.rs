//! Contract tests for CcpaClient against the wrapper API.
//!
//! ## Endpoints Tested
//!
//! | Method | Path | Test |
//! |--------|------|------|
//! | GET    | `/ccpa/message-url` | `message_url_*` |
//! | POST   | `/ccpa/consent/{actionType}` | `consent_*` |

use cmp_client::{CmpApiConfig, CmpApiError, CmpClient};
use cmp_core::Payload;
use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(mock_server: &MockServer) -> CmpClient {
    CmpClient::new(CmpApiConfig::local_mock(&mock_server.uri()).unwrap()).unwrap()
}

fn payload(value: serde_json::Value) -> Payload {
    cmp_core::payload::from_json(value).unwrap()
}

// ── GET /ccpa/message-url ────────────────────────────────────────────

#[tokio::test]
async fn message_url_flattens_payload_into_query() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/ccpa/message-url"))
        .and(query_param("accountId", "22"))
        .and(query_param("propertyHref", "https://a.com"))
        .and(query_param("alwaysDisplayDNS", "false"))
        .and(query_param("targetingParams", r#"{"location":"CCPA"}"#))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "url": "https://notice.example/ccpa/1",
            "ccpaApplies": true
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let params = payload(json!({
        "accountId": 22,
        "propertyHref": "https://a.com",
        "alwaysDisplayDNS": false,
        "targetingParams": r#"{"location":"CCPA"}"#
    }));

    let resp = client.ccpa().message_url(&params).await.unwrap();
    assert_eq!(resp["url"], "https://notice.example/ccpa/1");
}

#[tokio::test]
async fn message_url_surfaces_err_envelope() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/ccpa/message-url"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"err": {"code": "NO_PROPERTY"}})),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let err = client.ccpa().message_url(&Payload::new()).await.unwrap_err();
    assert!(matches!(err, CmpApiError::Rejected { .. }));
    assert_eq!(err.detail(), json!({"code": "NO_PROPERTY"}));
}

// ── POST /ccpa/consent/{actionType} ──────────────────────────────────

#[tokio::test]
async fn consent_posts_to_action_type_path() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/ccpa/consent/11"))
        .and(body_json(json!({"actionType": "11", "uuid": "u-9"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "uuid": "u-9",
            "ccpaConsent": "1YNN"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let body = payload(json!({"actionType": "11", "uuid": "u-9"}));
    let resp = client.ccpa().consent(&body).await.unwrap();
    assert_eq!(resp["ccpaConsent"], "1YNN");
}

#[tokio::test]
async fn consent_accepts_numeric_action_type() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/ccpa/consent/13"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let body = payload(json!({"actionType": 13}));
    let resp = client.ccpa().consent(&body).await.unwrap();
    assert_eq!(resp["ok"], true);
}

#[tokio::test]
async fn consent_without_action_type_is_invalid_request() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let err = client.ccpa().consent(&payload(json!({"uuid": "u"}))).await.unwrap_err();
    assert!(matches!(err, CmpApiError::InvalidRequest { .. }));
}

#[tokio::test]
async fn consent_handles_api_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/ccpa/consent/11"))
        .respond_with(ResponseTemplate::new(503).set_body_string("upstream down"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let err = client
        .ccpa()
        .consent(&payload(json!({"actionType": "11"})))
        .await
        .unwrap_err();
    assert_eq!(err.upstream_status(), Some(503));
    assert_eq!(err.detail(), json!("upstream down"));
}
