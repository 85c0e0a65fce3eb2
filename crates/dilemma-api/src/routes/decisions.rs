//! # Decision API
//!
//! HTTP surface of [`DecisionService`](crate::services::DecisionService).
//! Identity problems on `authenticate`, `submit` and `poll` are answered with
//! `false` in a 200 body; only `sentence` reports them as an error status.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use dilemma_core::{Decision, Identity};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::AppError;
use crate::extractors::extract_json;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / Response types
// ---------------------------------------------------------------------------

/// The `(case_id, party_index)` pair a caller presents.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema)]
pub struct IdentityRequest {
    pub case_id: i64,
    pub party_index: i64,
}

impl From<IdentityRequest> for Identity {
    fn from(req: IdentityRequest) -> Self {
        Identity::new(req.case_id, req.party_index)
    }
}

/// Decision submission.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SubmitDecisionRequest {
    pub case_id: i64,
    pub party_index: i64,
    /// `BETRAY` or `COOPERATE`.
    #[schema(value_type = String, example = "COOPERATE")]
    pub decision: Decision,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PingResponse {
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AuthenticateResponse {
    pub authenticated: bool,
}

/// Outcome of a submission. `reason` is present only when `processed` is
/// false: `invalid_identity` or `already_decided`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SubmitDecisionResponse {
    pub processed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PollResponse {
    pub resolved: bool,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SentenceResponse {
    pub case_id: i64,
    pub party_index: i64,
    pub sentence_years: u32,
}

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

/// Build the decisions router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/v1/decisions/ping", get(ping))
        .route("/v1/decisions/authenticate", post(authenticate))
        .route("/v1/decisions/submit", post(submit_decision))
        .route("/v1/decisions/poll", post(poll_resolved))
        .route("/v1/decisions/sentence", post(fetch_sentence))
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /v1/decisions/ping - Liveness check for the decision contract.
#[utoipa::path(
    get,
    path = "/v1/decisions/ping",
    responses((status = 200, description = "Server is reachable", body = PingResponse)),
    tag = "decisions"
)]
async fn ping(State(state): State<AppState>) -> Json<PingResponse> {
    Json(PingResponse {
        message: state.decisions.ping().to_string(),
    })
}

/// POST /v1/decisions/authenticate - Check a case/party pair.
#[utoipa::path(
    post,
    path = "/v1/decisions/authenticate",
    request_body = IdentityRequest,
    responses(
        (status = 200, description = "Whether the identity is valid", body = AuthenticateResponse),
        (status = 400, description = "Malformed body", body = crate::error::ErrorBody),
    ),
    tag = "decisions"
)]
async fn authenticate(
    State(state): State<AppState>,
    body: Result<Json<IdentityRequest>, JsonRejection>,
) -> Result<Json<AuthenticateResponse>, AppError> {
    let req = extract_json(body)?;
    Ok(Json(AuthenticateResponse {
        authenticated: state.decisions.authenticate(req.case_id, req.party_index),
    }))
}

/// POST /v1/decisions/submit - Record a party's one decision.
#[utoipa::path(
    post,
    path = "/v1/decisions/submit",
    request_body = SubmitDecisionRequest,
    responses(
        (status = 200, description = "Submission outcome", body = SubmitDecisionResponse),
        (status = 400, description = "Malformed body or unknown decision", body = crate::error::ErrorBody),
    ),
    tag = "decisions"
)]
async fn submit_decision(
    State(state): State<AppState>,
    body: Result<Json<SubmitDecisionRequest>, JsonRejection>,
) -> Result<Json<SubmitDecisionResponse>, AppError> {
    let req = extract_json(body)?;
    let identity = Identity::new(req.case_id, req.party_index);
    let outcome = state.decisions.submit_decision(identity, req.decision);
    Ok(Json(SubmitDecisionResponse {
        processed: outcome.is_processed(),
        reason: outcome.reason().map(|r| r.as_str().to_string()),
    }))
}

/// POST /v1/decisions/poll - Whether both parties have decided.
#[utoipa::path(
    post,
    path = "/v1/decisions/poll",
    request_body = IdentityRequest,
    responses(
        (status = 200, description = "Resolution state", body = PollResponse),
        (status = 400, description = "Malformed body", body = crate::error::ErrorBody),
    ),
    tag = "decisions"
)]
async fn poll_resolved(
    State(state): State<AppState>,
    body: Result<Json<IdentityRequest>, JsonRejection>,
) -> Result<Json<PollResponse>, AppError> {
    let req = extract_json(body)?;
    Ok(Json(PollResponse {
        resolved: state.decisions.poll_resolved(req.into()),
    }))
}

/// POST /v1/decisions/sentence - Current sentence of the caller's party.
#[utoipa::path(
    post,
    path = "/v1/decisions/sentence",
    request_body = IdentityRequest,
    responses(
        (status = 200, description = "Current sentence", body = SentenceResponse),
        (status = 401, description = "Invalid identity", body = crate::error::ErrorBody),
        (status = 409, description = "Party has not decided", body = crate::error::ErrorBody),
    ),
    tag = "decisions"
)]
async fn fetch_sentence(
    State(state): State<AppState>,
    body: Result<Json<IdentityRequest>, JsonRejection>,
) -> Result<Json<SentenceResponse>, AppError> {
    let req = extract_json(body)?;
    let sentence_years = state.decisions.fetch_sentence(req.into())?;
    Ok(Json(SentenceResponse {
        case_id: req.case_id,
        party_index: req.party_index,
        sentence_years,
    }))
}
