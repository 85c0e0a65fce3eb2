//! # Service Facades
//!
//! The two remote contracts, independent of transport:
//!
//! - [`DecisionService`] - authenticate, submit, poll, fetch the sentence.
//! - [`AppealService`] - one probabilistic sentence reduction per call.
//!
//! Both hold the registry as an explicit `Arc` dependency. Route handlers
//! translate HTTP bodies into calls here and map [`ServiceError`] onto
//! [`crate::AppError`]; no business rule lives in a handler.

pub mod appeal;
pub mod decision;

use dilemma_core::Identity;
use dilemma_state::CaseError;
use thiserror::Error;

pub use appeal::{AppealOutcome, AppealService, APPEAL_REDUCTION_YEARS};
pub use decision::{DecisionService, RejectionReason, SubmissionOutcome, PING_MESSAGE};

/// Failures surfaced explicitly to a remote caller.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    /// The identity does not address a seeded case and a valid party.
    #[error("authentication failed for {0}")]
    Authentication(Identity),

    /// A case-level rejection.
    #[error(transparent)]
    Case(#[from] CaseError),
}
