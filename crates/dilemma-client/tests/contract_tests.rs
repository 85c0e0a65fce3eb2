//! Contract tests for DilemmaClient against a mock server.
//!
//! | Method | Path | Test |
//! |--------|------|------|
//! | POST   | `/v1/decisions/submit` | `submit_*` |
//! | POST   | `/v1/decisions/sentence` | `sentence_*` |
//! | POST   | `/v1/appeals` | `appeal_*` |
//! | POST   | `/v1/decisions/poll` | `slow_poll_*` |
//! | GET    | `/v1/cases` | `list_cases_*` |

use std::time::Duration;

use dilemma_client::{ClientConfig, ClientError, DilemmaClient};
use dilemma_core::{Decision, Identity};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_with_timeout(mock_server: &MockServer, timeout_secs: u64) -> DilemmaClient {
    let mut config = ClientConfig::new(&mock_server.uri()).unwrap();
    config.timeout_secs = timeout_secs;
    DilemmaClient::new(config).unwrap()
}

fn test_client(mock_server: &MockServer) -> DilemmaClient {
    client_with_timeout(mock_server, 5)
}

#[tokio::test]
async fn submit_sends_screaming_case_decision() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/decisions/submit"))
        .and(body_json(serde_json::json!({
            "case_id": 2,
            "party_index": 1,
            "decision": "BETRAY"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "processed": false,
            "reason": "already_decided"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let result = test_client(&mock_server)
        .submit_decision(Identity::new(2, 1), Decision::Betray)
        .await
        .unwrap();
    assert!(!result.processed);
    assert!(result.already_decided());
}

#[tokio::test]
async fn submit_without_reason_field() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/decisions/submit"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"processed": true})),
        )
        .mount(&mock_server)
        .await;

    let result = test_client(&mock_server)
        .submit_decision(Identity::new(0, 0), Decision::Cooperate)
        .await
        .unwrap();
    assert!(result.processed);
    assert_eq!(result.reason, None);
}

#[tokio::test]
async fn sentence_maps_error_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/decisions/sentence"))
        .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
            "error": {"code": "UNAUTHORIZED", "message": "unauthorized: authentication failed for case:99/party:0"}
        })))
        .mount(&mock_server)
        .await;

    let err = test_client(&mock_server)
        .fetch_sentence(Identity::new(99, 0))
        .await
        .unwrap_err();
    match err {
        ClientError::ApiError {
            status,
            code,
            message,
            ..
        } => {
            assert_eq!(status, 401);
            assert_eq!(code, "UNAUTHORIZED");
            assert!(message.contains("case:99/party:0"));
        }
        other => panic!("expected ApiError, got {other:?}"),
    }
}

#[tokio::test]
async fn sentence_with_non_json_error_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/decisions/sentence"))
        .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
        .mount(&mock_server)
        .await;

    let err = test_client(&mock_server)
        .fetch_sentence(Identity::new(0, 0))
        .await
        .unwrap_err();
    match err {
        ClientError::ApiError { status, code, message, .. } => {
            assert_eq!(status, 502);
            assert_eq!(code, "UNKNOWN");
            assert_eq!(message, "bad gateway");
        }
        other => panic!("expected ApiError, got {other:?}"),
    }
}

#[tokio::test]
async fn appeal_denied_has_no_sentence() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/appeals"))
        .and(body_json(serde_json::json!({"case_id": 0, "party_index": 0})))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "accepted": false,
            "message": "Appeal request failed."
        })))
        .mount(&mock_server)
        .await;

    let result = test_client(&mock_server)
        .request_appeal(Identity::new(0, 0))
        .await
        .unwrap();
    assert!(!result.accepted);
    assert_eq!(result.sentence_years, None);
}

#[tokio::test]
async fn list_cases_rejects_malformed_payload() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/cases"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"cases": 3})))
        .mount(&mock_server)
        .await;

    let err = test_client(&mock_server).list_cases().await.unwrap_err();
    assert!(matches!(err, ClientError::Deserialization { .. }), "{err:?}");
}

#[tokio::test]
async fn error_responses_are_not_retried() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/appeals"))
        .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
            "error": {"code": "NOT_FOUND", "message": "not found: case:12 does not exist"}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let err = test_client(&mock_server)
        .request_appeal(Identity::new(12, 0))
        .await
        .unwrap_err();
    assert!(err.is_unknown_case());
}

#[tokio::test]
async fn slow_submit_is_sent_once() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/decisions/submit"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"processed": true}))
                .set_delay(Duration::from_millis(1500)),
        )
        .mount(&mock_server)
        .await;

    let err = client_with_timeout(&mock_server, 1)
        .submit_decision(Identity::new(0, 0), Decision::Betray)
        .await
        .unwrap_err();
    assert!(err.is_transport(), "{err:?}");

    let received = mock_server.received_requests().await.unwrap();
    assert_eq!(received.len(), 1);
}

#[tokio::test]
async fn slow_appeal_is_sent_once() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/appeals"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({
                    "accepted": false,
                    "message": "Appeal request failed."
                }))
                .set_delay(Duration::from_millis(1500)),
        )
        .mount(&mock_server)
        .await;

    let err = client_with_timeout(&mock_server, 1)
        .request_appeal(Identity::new(0, 0))
        .await
        .unwrap_err();
    assert!(err.is_transport(), "{err:?}");
    assert_eq!(mock_server.received_requests().await.unwrap().len(), 1);
}

#[tokio::test]
async fn slow_poll_is_retried() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/decisions/poll"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"resolved": false}))
                .set_delay(Duration::from_millis(1500)),
        )
        .mount(&mock_server)
        .await;

    let err = client_with_timeout(&mock_server, 1)
        .poll_resolved(Identity::new(0, 0))
        .await
        .unwrap_err();
    assert!(err.is_transport(), "{err:?}");
    assert_eq!(mock_server.received_requests().await.unwrap().len(), 4);
}

#[test]
fn bad_base_url_is_a_config_error() {
    let err = DilemmaClient::connect("::not a url::").unwrap_err();
    assert!(matches!(err, ClientError::Config(_)), "{err:?}");
}
