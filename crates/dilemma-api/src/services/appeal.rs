//! # Appeal Service
//!
//! One call is one independent trial. The case and party are validated before
//! the draw, so an invalid appeal never consumes randomness and never
//! changes state. A denied appeal changes nothing either.
//!
//! Appeals are accepted before resolution too; a granted appeal then lowers
//! the base draw, and the payoff reduction is applied on top later.

use std::sync::Arc;

use dilemma_core::CaseId;
use dilemma_state::{CaseError, CaseRegistry, RandomSource};

/// Years removed by a granted appeal.
pub const APPEAL_REDUCTION_YEARS: u32 = 1;

/// Result of a single appeal trial.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppealOutcome {
    /// Whether the appeal was granted.
    pub accepted: bool,
    /// Message for the appellant.
    pub message: String,
    /// Sentence after the reduction. `None` when denied.
    pub sentence_years: Option<u32>,
}

impl AppealOutcome {
    fn granted(sentence_years: u32) -> Self {
        let message = if sentence_years == 0 {
            "Appeal passed! You are free to go!".to_string()
        } else {
            format!("Appeal passed! You have to serve {sentence_years} years.")
        };
        Self {
            accepted: true,
            message,
            sentence_years: Some(sentence_years),
        }
    }

    fn denied() -> Self {
        Self {
            accepted: false,
            message: "Appeal request failed.".to_string(),
            sentence_years: None,
        }
    }
}

/// Facade for appeal requests.
#[derive(Clone)]
pub struct AppealService {
    registry: Arc<CaseRegistry>,
    random: Arc<dyn RandomSource>,
}

impl std::fmt::Debug for AppealService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppealService")
            .field("cases", &self.registry.len())
            .finish_non_exhaustive()
    }
}

impl AppealService {
    /// Create a service over `registry`, drawing trials from `random`.
    pub fn new(registry: Arc<CaseRegistry>, random: Arc<dyn RandomSource>) -> Self {
        Self { registry, random }
    }

    /// Run one appeal for party `party_index` of case `case_id`.
    ///
    /// # Errors
    ///
    /// - [`CaseError::UnknownCase`] if the case is not seeded.
    /// - [`CaseError::InvalidParty`] if `party_index` is not 0 or 1.
    /// - [`CaseError::PartyNotDecided`] if the party has nothing to appeal.
    pub fn request_appeal(
        &self,
        case_id: i64,
        party_index: i64,
    ) -> Result<AppealOutcome, CaseError> {
        let case = self.registry.lookup(CaseId::new(case_id))?;
        case.ensure_decided(party_index)?;

        if !self.random.grant_appeal() {
            tracing::info!(case = %case.id(), party_index, "appeal denied");
            return Ok(AppealOutcome::denied());
        }

        let remaining = case.apply_sentence_reduction(party_index, APPEAL_REDUCTION_YEARS)?;
        tracing::info!(case = %case.id(), party_index, remaining, "appeal granted");
        Ok(AppealOutcome::granted(remaining))
    }
}
