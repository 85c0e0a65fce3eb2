//! # Case Listing
//!
//! Read-only view of the registry. Summaries never reveal decisions or
//! sentences.

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use dilemma_state::CaseSummary;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::state::AppState;

/// One case in the listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CaseSummaryResponse {
    pub case_id: i64,
    /// `OPEN`, `AWAITING_SECOND_PARTY` or `RESOLVED`.
    pub status: String,
    pub decided_parties: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolved_at: Option<DateTime<Utc>>,
}

impl From<CaseSummary> for CaseSummaryResponse {
    fn from(summary: CaseSummary) -> Self {
        Self {
            case_id: summary.case_id.get(),
            status: summary.status.as_str().to_string(),
            decided_parties: summary.decided_parties,
            resolved_at: summary.resolved_at,
        }
    }
}

/// Build the cases router.
pub fn router() -> Router<AppState> {
    Router::new().route("/v1/cases", get(list_cases))
}

/// GET /v1/cases - All seeded cases in id order.
#[utoipa::path(
    get,
    path = "/v1/cases",
    responses((status = 200, description = "Seeded cases", body = Vec<CaseSummaryResponse>)),
    tag = "cases"
)]
async fn list_cases(State(state): State<AppState>) -> Json<Vec<CaseSummaryResponse>> {
    Json(
        state
            .registry
            .summaries()
            .into_iter()
            .map(CaseSummaryResponse::from)
            .collect(),
    )
}
