//! # Case Registry
//!
//! Fixed mapping from [`CaseId`] to [`Case`], seeded once at startup with
//! the contiguous range `0..count` and never mutated afterwards. Lookups need
//! no synchronization; only the returned case locks.

use std::sync::Arc;

use dilemma_core::CaseId;

use crate::case::{Case, CaseSummary};
use crate::error::CaseError;
use crate::random::RandomSource;

/// Number of cases seeded in the reference deployment.
pub const DEFAULT_CASE_COUNT: u32 = 10;

/// Immutable owner of every case for the process lifetime.
#[derive(Debug)]
pub struct CaseRegistry {
    /// Position `i` holds the case with id `i`.
    cases: Vec<Case>,
}

impl CaseRegistry {
    /// Build a registry with cases `0..count`, all open. Every case draws
    /// from the shared `random` source.
    pub fn seeded(count: u32, random: Arc<dyn RandomSource>) -> Self {
        let cases = (0..i64::from(count))
            .map(|id| Case::new(CaseId::new(id), Arc::clone(&random)))
            .collect();
        Self { cases }
    }

    /// The case with identifier `id`.
    ///
    /// # Errors
    ///
    /// [`CaseError::UnknownCase`] if `id` is outside the seeded range.
    pub fn lookup(&self, id: CaseId) -> Result<&Case, CaseError> {
        usize::try_from(id.get())
            .ok()
            .and_then(|index| self.cases.get(index))
            .ok_or(CaseError::UnknownCase(id))
    }

    /// Whether a case with identifier `id` exists.
    pub fn exists(&self, id: CaseId) -> bool {
        self.lookup(id).is_ok()
    }

    /// Number of cases.
    pub fn len(&self) -> usize {
        self.cases.len()
    }

    /// Whether the registry holds no cases.
    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }

    /// All cases in id order.
    pub fn iter(&self) -> impl Iterator<Item = &Case> {
        self.cases.iter()
    }

    /// Public summaries of every case, in id order.
    pub fn summaries(&self) -> Vec<CaseSummary> {
        self.cases.iter().map(Case::summary).collect()
    }
}
