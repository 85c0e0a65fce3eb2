//! Client tests against an in-process dilemma server on an ephemeral port.

use std::sync::Arc;
use std::time::Duration;

use dilemma_api::state::{AppConfig, AppState};
use dilemma_client::{ClientConfig, ClientError, DilemmaClient};
use dilemma_core::{Decision, Identity};
use dilemma_state::{FixedRandom, RandomSource};

/// Serve a fresh app whose draws come from `random` and return a client for it.
async fn spawn_server(random: Arc<dyn RandomSource>) -> DilemmaClient {
    let state = AppState::with_random(AppConfig::default(), random);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    tokio::spawn(async move {
        axum::serve(listener, dilemma_api::app(state)).await.unwrap();
    });
    DilemmaClient::new(ClientConfig::local(port).unwrap()).unwrap()
}

#[tokio::test]
async fn full_flow_against_live_server() {
    let client = spawn_server(Arc::new(FixedRandom::new(9, true))).await;
    let p0 = Identity::new(0, 0);
    let p1 = Identity::new(0, 1);

    assert_eq!(client.ping().await.unwrap(), "Hello from server!");
    assert!(client.authenticate(p0).await.unwrap());
    assert!(!client.authenticate(Identity::new(10, 0)).await.unwrap());

    let first = client.submit_decision(p0, Decision::Cooperate).await.unwrap();
    assert!(first.processed);
    assert!(!client.poll_resolved(p0).await.unwrap());

    let again = client.submit_decision(p0, Decision::Betray).await.unwrap();
    assert!(!again.processed);
    assert!(again.already_decided());

    assert!(client.submit_decision(p1, Decision::Betray).await.unwrap().processed);
    assert!(client.poll_resolved(p1).await.unwrap());

    assert_eq!(client.fetch_sentence(p0).await.unwrap(), 7);
    assert_eq!(client.fetch_sentence(p1).await.unwrap(), 6);

    let appeal = client.request_appeal(p1).await.unwrap();
    assert!(appeal.accepted);
    assert_eq!(appeal.sentence_years, Some(5));
    assert_eq!(appeal.message, "Appeal passed! You have to serve 5 years.");

    let cases = client.list_cases().await.unwrap();
    assert_eq!(cases.len(), 10);
    assert_eq!(cases[0].status, "RESOLVED");
    assert!(cases[0].resolved_at.is_some());
    assert_eq!(cases[1].status, "OPEN");
}

#[tokio::test]
async fn error_statuses_surface_as_api_errors() {
    let client = spawn_server(Arc::new(FixedRandom::new(9, true))).await;

    let err = client.fetch_sentence(Identity::new(42, 0)).await.unwrap_err();
    assert!(err.is_unauthorized(), "{err}");

    let err = client.fetch_sentence(Identity::new(1, 0)).await.unwrap_err();
    assert!(err.is_not_decided(), "{err}");

    let err = client.request_appeal(Identity::new(42, 0)).await.unwrap_err();
    assert!(err.is_unknown_case(), "{err}");
    match err {
        ClientError::ApiError { code, .. } => assert_eq!(code, "NOT_FOUND"),
        other => panic!("expected ApiError, got {other:?}"),
    }

    let err = client.request_appeal(Identity::new(1, 7)).await.unwrap_err();
    assert_eq!(err.status(), Some(422));
}

#[tokio::test]
async fn wait_returns_once_the_other_party_decides() {
    let client = spawn_server(Arc::new(FixedRandom::new(9, true))).await;
    let p0 = Identity::new(3, 0);
    let p1 = Identity::new(3, 1);
    client.submit_decision(p0, Decision::Betray).await.unwrap();

    let other = client.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(150)).await;
        other.submit_decision(p1, Decision::Betray).await.unwrap();
    });

    client
        .wait_for_resolution(p0, Duration::from_millis(25), Some(Duration::from_secs(10)))
        .await
        .unwrap();
    assert!(client.poll_resolved(p0).await.unwrap());
}

#[tokio::test]
async fn wait_times_out_when_nobody_else_decides() {
    let client = spawn_server(Arc::new(FixedRandom::new(9, true))).await;
    let p0 = Identity::new(4, 0);
    client.submit_decision(p0, Decision::Cooperate).await.unwrap();

    let err = client
        .wait_for_resolution(p0, Duration::from_millis(20), Some(Duration::from_millis(100)))
        .await
        .unwrap_err();
    match err {
        ClientError::PollTimeout { identity, waited } => {
            assert_eq!(identity, p0);
            assert!(waited >= Duration::from_millis(100));
        }
        other => panic!("expected PollTimeout, got {other:?}"),
    }
}

#[tokio::test]
async fn wait_timeout_cuts_the_last_interval_short() {
    let client = spawn_server(Arc::new(FixedRandom::new(9, true))).await;
    let p0 = Identity::new(5, 0);
    client.submit_decision(p0, Decision::Betray).await.unwrap();

    let started = std::time::Instant::now();
    let err = client
        .wait_for_resolution(p0, Duration::from_secs(60), Some(Duration::from_millis(200)))
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::PollTimeout { .. }), "{err:?}");
    assert!(started.elapsed() < Duration::from_secs(5));
}
