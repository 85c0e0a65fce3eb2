//! # Appeal API
//!
//! HTTP surface of [`AppealService`](crate::services::AppealService).

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::AppError;
use crate::extractors::extract_json;
use crate::state::AppState;

/// Appeal request for one party of one case.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema)]
pub struct AppealRequest {
    pub case_id: i64,
    pub party_index: i64,
}

/// Appeal outcome. `sentence_years` is present only when accepted.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AppealResponse {
    pub accepted: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sentence_years: Option<u32>,
}

/// Build the appeals router.
pub fn router() -> Router<AppState> {
    Router::new().route("/v1/appeals", post(request_appeal))
}

/// POST /v1/appeals - Run one appeal trial.
#[utoipa::path(
    post,
    path = "/v1/appeals",
    request_body = AppealRequest,
    responses(
        (status = 200, description = "Appeal decided", body = AppealResponse),
        (status = 400, description = "Malformed body", body = crate::error::ErrorBody),
        (status = 404, description = "Case does not exist", body = crate::error::ErrorBody),
        (status = 409, description = "Party has not decided", body = crate::error::ErrorBody),
        (status = 422, description = "Party index out of range", body = crate::error::ErrorBody),
    ),
    tag = "appeals"
)]
async fn request_appeal(
    State(state): State<AppState>,
    body: Result<Json<AppealRequest>, JsonRejection>,
) -> Result<Json<AppealResponse>, AppError> {
    let req = extract_json(body)?;
    let outcome = state.appeals.request_appeal(req.case_id, req.party_index)?;
    Ok(Json(AppealResponse {
        accepted: outcome.accepted,
        message: outcome.message,
        sentence_years: outcome.sentence_years,
    }))
}
