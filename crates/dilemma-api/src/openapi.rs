//! # OpenAPI Specification Assembly
//!
//! Collects every utoipa-documented route into one document served at
//! `/openapi.json`.

use axum::routing::get;
use axum::{Json, Router};
use utoipa::OpenApi;

use crate::state::AppState;

/// Assembled OpenAPI spec for the entire API surface.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Dilemma API",
        version = "0.1.0",
        description = "Two-party prisoner's dilemma case service: decision submission, resolution polling, sentence retrieval and probabilistic appeals.",
        license(name = "AGPL-3.0-or-later")
    ),
    paths(
        // Decisions
        crate::routes::decisions::ping,
        crate::routes::decisions::authenticate,
        crate::routes::decisions::submit_decision,
        crate::routes::decisions::poll_resolved,
        crate::routes::decisions::fetch_sentence,
        // Appeals
        crate::routes::appeals::request_appeal,
        // Cases
        crate::routes::cases::list_cases,
    ),
    components(schemas(
        crate::error::ErrorBody,
        crate::error::ErrorDetail,
        crate::routes::decisions::IdentityRequest,
        crate::routes::decisions::SubmitDecisionRequest,
        crate::routes::decisions::PingResponse,
        crate::routes::decisions::AuthenticateResponse,
        crate::routes::decisions::SubmitDecisionResponse,
        crate::routes::decisions::PollResponse,
        crate::routes::decisions::SentenceResponse,
        crate::routes::appeals::AppealRequest,
        crate::routes::appeals::AppealResponse,
        crate::routes::cases::CaseSummaryResponse,
        crate::middleware::metrics::MetricsSnapshot,
    )),
    tags(
        (name = "decisions", description = "Decision contract: authenticate, submit, poll, sentence"),
        (name = "appeals", description = "Appeal contract"),
        (name = "cases", description = "Registry listing"),
    )
)]
pub struct ApiDoc;

/// Build the OpenAPI router.
pub fn router() -> Router<AppState> {
    Router::new().route("/openapi.json", get(openapi_json))
}

/// GET /openapi.json - Return the generated OpenAPI specification.
async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
