//! # Case Error Types
//!
//! Every variant carries the case and party it concerns so a rejection can be
//! logged or surfaced without re-deriving context.

use dilemma_core::{CaseId, PartyIndex};
use thiserror::Error;

/// Errors arising from case operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CaseError {
    /// Party index outside `{0, 1}`.
    #[error("{case_id}: invalid party index {party_index}")]
    InvalidParty {
        /// The case that was addressed.
        case_id: CaseId,
        /// The raw index supplied.
        party_index: i64,
    },

    /// The party already has a recorded decision. Re-submission is an error,
    /// never a no-op.
    #[error("{case_id}: {party} has already decided")]
    AlreadyDecided {
        /// The case that was addressed.
        case_id: CaseId,
        /// The party whose slot is already filled.
        party: PartyIndex,
    },

    /// The party has no recorded decision, so it has no sentence yet.
    #[error("{case_id}: {party} has not decided yet")]
    PartyNotDecided {
        /// The case that was addressed.
        case_id: CaseId,
        /// The party whose slot is still empty.
        party: PartyIndex,
    },

    /// No case with this identifier exists in the registry.
    #[error("{0} does not exist")]
    UnknownCase(CaseId),
}

impl CaseError {
    /// The case the error concerns.
    pub fn case_id(&self) -> CaseId {
        match self {
            Self::InvalidParty { case_id, .. }
            | Self::AlreadyDecided { case_id, .. }
            | Self::PartyNotDecided { case_id, .. } => *case_id,
            Self::UnknownCase(case_id) => *case_id,
        }
    }
}
