//! End-to-end CLI flows against an in-process server.

use std::sync::Arc;

use dilemma_api::state::{AppConfig, AppState};
use dilemma_cli::commands::{
    run_appeal, run_cases, run_decide, run_login, run_sentence, run_status, DecideArgs,
    IdentityArgs, PollArgs,
};
use dilemma_cli::play::{run_play, PlayArgs};
use dilemma_cli::EXIT_REJECTED;
use dilemma_client::DilemmaClient;
use dilemma_core::{Decision, Identity};
use dilemma_state::FixedRandom;

async fn spawn_server(base: u32, grant: bool) -> DilemmaClient {
    let state = AppState::with_random(
        AppConfig::default(),
        Arc::new(FixedRandom::new(base, grant)),
    );
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    tokio::spawn(async move {
        axum::serve(listener, dilemma_api::app(state)).await.unwrap();
    });
    dilemma_cli::connect(Some(&format!("http://127.0.0.1:{port}"))).unwrap()
}

fn play_args(case_id: i64, party_index: i64, decision: Decision, appeal: bool) -> PlayArgs {
    PlayArgs {
        identity: IdentityArgs {
            case_id,
            party_index,
        },
        decision,
        appeal,
        poll: PollArgs {
            poll_interval: 1,
            timeout: Some(10),
        },
    }
}

fn text(buf: Vec<u8>) -> String {
    String::from_utf8(buf).unwrap()
}

#[tokio::test]
async fn two_players_mutual_cooperation() {
    let client = spawn_server(5, true).await;

    let first = {
        let client = client.clone();
        tokio::spawn(async move {
            let mut out = Vec::new();
            let code = run_play(&client, &play_args(0, 0, Decision::Cooperate, true), &mut out)
                .await
                .unwrap();
            (code, text(out))
        })
    };
    let mut out = Vec::new();
    let code = run_play(&client, &play_args(0, 1, Decision::Cooperate, false), &mut out)
        .await
        .unwrap();
    assert_eq!(code, 0);
    let second_out = text(out);
    assert!(second_out.contains("Connected: Hello from server!"));
    assert!(second_out.contains("You are free to go!"));

    let (code, first_out) = first.await.unwrap();
    assert_eq!(code, 0);
    assert!(first_out.contains("Decision COOPERATE recorded."));
    assert!(first_out.contains("You are free to go!"));
    assert!(first_out.contains("Appeal passed! You are free to go!"));
}

#[tokio::test]
async fn play_with_invalid_login_is_rejected() {
    let client = spawn_server(10, true).await;
    let mut out = Vec::new();
    let code = run_play(&client, &play_args(10, 0, Decision::Betray, false), &mut out)
        .await
        .unwrap();
    assert_eq!(code, EXIT_REJECTED);
    assert!(text(out).contains("Invalid login: case:10/party:0."));
}

#[tokio::test]
async fn play_after_deciding_resumes_waiting() {
    let client = spawn_server(10, false).await;
    client
        .submit_decision(Identity::new(2, 0), Decision::Betray)
        .await
        .unwrap();
    client
        .submit_decision(Identity::new(2, 1), Decision::Cooperate)
        .await
        .unwrap();

    let mut out = Vec::new();
    let code = run_play(&client, &play_args(2, 0, Decision::Cooperate, true), &mut out)
        .await
        .unwrap();
    assert_eq!(code, 0);
    let out = text(out);
    assert!(out.contains("Your decision was already on record."));
    assert!(out.contains("Your sentence is 7 years."));
    assert!(out.contains("Appeal request failed."));
}

#[tokio::test]
async fn single_commands() {
    let client = spawn_server(12, true).await;
    let p0 = Identity::new(1, 0);

    let mut out = Vec::new();
    assert_eq!(run_login(&client, p0, &mut out).await.unwrap(), 0);
    assert_eq!(
        run_login(&client, Identity::new(1, 5), &mut out).await.unwrap(),
        EXIT_REJECTED
    );

    let decide = DecideArgs {
        identity: IdentityArgs {
            case_id: 1,
            party_index: 0,
        },
        decision: Decision::Betray,
    };
    assert_eq!(run_decide(&client, &decide, &mut out).await.unwrap(), 0);
    assert_eq!(run_decide(&client, &decide, &mut out).await.unwrap(), EXIT_REJECTED);

    assert_eq!(run_status(&client, p0, &mut out).await.unwrap(), 0);
    assert_eq!(run_sentence(&client, p0, &mut out).await.unwrap(), 0);
    assert_eq!(
        run_sentence(&client, Identity::new(77, 0), &mut out).await.unwrap(),
        EXIT_REJECTED
    );
    assert_eq!(run_appeal(&client, p0, &mut out).await.unwrap(), 0);
    assert_eq!(run_cases(&client, &mut out).await.unwrap(), 0);

    let out = text(out);
    assert!(out.contains("Logged in as case:1/party:0."));
    assert!(out.contains("Decision BETRAY recorded."));
    assert!(out.contains("Decision not processed: already_decided."));
    assert!(out.contains("Waiting for the other party."));
    assert!(out.contains("Your sentence is 12 years."));
    assert!(out.contains("Appeal passed! You have to serve 11 years."));
    assert!(out.contains("case 1\tAWAITING_SECOND_PARTY\t1/2 decided"));
}

#[tokio::test]
async fn appeal_for_unknown_case_is_an_error() {
    let client = spawn_server(12, true).await;
    let mut out = Vec::new();
    let err = run_appeal(&client, Identity::new(30, 0), &mut out)
        .await
        .unwrap_err();
    assert!(format!("{err:#}").contains("404"), "{err:#}");
}
