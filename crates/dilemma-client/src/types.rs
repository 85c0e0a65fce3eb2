//! Wire types for the dilemma HTTP contract.

use chrono::{DateTime, Utc};
use dilemma_core::Decision;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct PingResponse {
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct AuthenticateResponse {
    pub authenticated: bool,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct SubmitDecisionRequest {
    pub case_id: i64,
    pub party_index: i64,
    pub decision: Decision,
}

/// Server's answer to a decision submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionResult {
    /// Whether the decision is now on record.
    pub processed: bool,
    /// `invalid_identity` or `already_decided` when not processed.
    #[serde(default)]
    pub reason: Option<String>,
}

impl SubmissionResult {
    /// The party had already decided.
    pub fn already_decided(&self) -> bool {
        self.reason.as_deref() == Some("already_decided")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct PollResponse {
    pub resolved: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct SentenceResponse {
    pub case_id: i64,
    pub party_index: i64,
    pub sentence_years: u32,
}

/// Outcome of one appeal trial.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppealResult {
    pub accepted: bool,
    pub message: String,
    /// Sentence after a granted appeal.
    #[serde(default)]
    pub sentence_years: Option<u32>,
}

/// One case in the server's listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseListing {
    pub case_id: i64,
    pub status: String,
    pub decided_parties: usize,
    #[serde(default)]
    pub resolved_at: Option<DateTime<Utc>>,
}

/// Error body shape shared by every endpoint.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ErrorDetail {
    pub code: String,
    pub message: String,
}
