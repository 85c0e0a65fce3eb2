//! # Decision Service
//!
//! Every operation re-authenticates the identity it is given; nothing about
//! a caller is remembered between calls.
//!
//! ## Rejected submissions
//!
//! A rejected submission is not an error. The caller learns it was not
//! processed, plus a [`RejectionReason`] telling a bad identity apart from a
//! party that already decided.

use std::sync::Arc;

use dilemma_core::{CaseId, Decision, Identity, PartyIndex};
use dilemma_state::{Case, CaseError, CaseRegistry, CaseStatus};
use serde::{Deserialize, Serialize};

use super::ServiceError;

/// Constant liveness reply.
pub const PING_MESSAGE: &str = "Hello from server!";

/// Why a submission was not processed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectionReason {
    /// Unknown case or party index outside `{0, 1}`.
    InvalidIdentity,
    /// The party's decision is already on record.
    AlreadyDecided,
}

impl RejectionReason {
    /// Wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidIdentity => "invalid_identity",
            Self::AlreadyDecided => "already_decided",
        }
    }
}

impl std::fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of [`DecisionService::submit_decision`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionOutcome {
    /// The decision is now on record.
    Recorded,
    /// Nothing changed.
    Rejected(RejectionReason),
}

impl SubmissionOutcome {
    /// Whether the decision was recorded.
    pub fn is_processed(&self) -> bool {
        matches!(self, Self::Recorded)
    }

    /// The rejection reason, if any.
    pub fn reason(&self) -> Option<RejectionReason> {
        match self {
            Self::Recorded => None,
            Self::Rejected(reason) => Some(*reason),
        }
    }
}

/// Facade for authentication, decision submission, polling and sentence
/// retrieval.
#[derive(Debug, Clone)]
pub struct DecisionService {
    registry: Arc<CaseRegistry>,
}

impl DecisionService {
    /// Create a service over `registry`.
    pub fn new(registry: Arc<CaseRegistry>) -> Self {
        Self { registry }
    }

    /// Liveness probe. Touches no state.
    pub fn ping(&self) -> &'static str {
        PING_MESSAGE
    }

    /// True iff `case_id` is seeded and `party_index` is 0 or 1.
    pub fn authenticate(&self, case_id: i64, party_index: i64) -> bool {
        self.registry.exists(CaseId::new(case_id)) && PartyIndex::new(party_index).is_ok()
    }

    fn authorized(&self, identity: &Identity) -> Option<&Case> {
        if !self.authenticate(identity.case_id, identity.party_index) {
            return None;
        }
        self.registry.lookup(identity.case()).ok()
    }

    /// Record `decision` for `identity`.
    pub fn submit_decision(&self, identity: Identity, decision: Decision) -> SubmissionOutcome {
        let Some(case) = self.authorized(&identity) else {
            tracing::warn!(%identity, "submission rejected: invalid identity");
            return SubmissionOutcome::Rejected(RejectionReason::InvalidIdentity);
        };

        match case.record_decision(identity.party_index, decision) {
            Ok(status) => {
                tracing::info!(%identity, %decision, %status, "decision recorded");
                if status == CaseStatus::Resolved {
                    tracing::info!(case = %case.id(), "case resolved");
                }
                SubmissionOutcome::Recorded
            }
            Err(CaseError::AlreadyDecided { .. }) => {
                tracing::debug!(%identity, "submission rejected: already decided");
                SubmissionOutcome::Rejected(RejectionReason::AlreadyDecided)
            }
            Err(err) => {
                tracing::warn!(%identity, error = %err, "submission rejected");
                SubmissionOutcome::Rejected(RejectionReason::InvalidIdentity)
            }
        }
    }

    /// Whether both parties of the identity's case have decided. False for an
    /// invalid identity.
    pub fn poll_resolved(&self, identity: Identity) -> bool {
        self.authorized(&identity)
            .map(Case::is_resolved)
            .unwrap_or(false)
    }

    /// Current sentence of the identity's party.
    ///
    /// # Errors
    ///
    /// - [`ServiceError::Authentication`] for an invalid identity.
    /// - [`ServiceError::Case`] with [`CaseError::PartyNotDecided`] if the
    ///   party has no decision on record.
    pub fn fetch_sentence(&self, identity: Identity) -> Result<u32, ServiceError> {
        let case = self
            .authorized(&identity)
            .ok_or(ServiceError::Authentication(identity))?;
        Ok(case.get_sentence(identity.party_index)?)
    }
}
