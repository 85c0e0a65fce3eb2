//! # Case Lifecycle
//!
//! One two-party negotiation. Holds two party slots that each fill exactly
//! once; when the second slot fills, the payoff table is applied to both
//! parties in the same critical section and the case becomes `RESOLVED`.
//!
//! ## Design Choice: Validated Enum over Typestate
//!
//! A case is shared between two independently-connecting parties and is
//! mutated through a shared reference, so its state cannot be carried in the
//! type. Instead every operation validates the party index and slot
//! occupancy at runtime under the case lock and returns a [`CaseError`] on
//! violation.
//!
//! ## Locking
//!
//! Each case owns a `parking_lot::Mutex`. All operations, reads included,
//! take it for their full duration. The lock is never held across an
//! `.await` and never nests with another case's lock.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use dilemma_core::{CaseId, Decision, PartyIndex, PARTIES_PER_CASE};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::error::CaseError;
use crate::payoff::payoff;
use crate::random::RandomSource;

// ── Case Status ────────────────────────────────────────────────────────

/// Resolution status of a case, derived from slot occupancy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CaseStatus {
    /// Neither party has decided.
    Open,
    /// Exactly one party has decided.
    AwaitingSecondParty,
    /// Both parties have decided and payoffs are applied. Terminal state.
    Resolved,
}

impl CaseStatus {
    /// Status for a given number of filled slots.
    pub fn from_occupancy(filled: usize) -> Self {
        match filled {
            0 => Self::Open,
            n if n < PARTIES_PER_CASE => Self::AwaitingSecondParty,
            _ => Self::Resolved,
        }
    }

    /// The canonical string name of this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "OPEN",
            Self::AwaitingSecondParty => "AWAITING_SECOND_PARTY",
            Self::Resolved => "RESOLVED",
        }
    }

    /// Whether this status is terminal.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Resolved)
    }

    /// Valid target statuses from this status.
    pub fn valid_transitions(&self) -> &'static [CaseStatus] {
        match self {
            Self::Open => &[Self::AwaitingSecondParty],
            Self::AwaitingSecondParty => &[Self::Resolved],
            Self::Resolved => &[],
        }
    }
}

impl std::fmt::Display for CaseStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Party Record ───────────────────────────────────────────────────────

/// State of one party that has decided.
///
/// Created the instant the decision is recorded. `decision` and
/// `base_sentence` never change; `sentence_years` only ever decreases.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartyRecord {
    /// The recorded decision.
    pub decision: Decision,
    /// Sentence drawn at decision time, before any reduction.
    pub base_sentence: u32,
    /// Current sentence in years.
    pub sentence_years: u32,
    /// When the decision was recorded.
    pub decided_at: DateTime<Utc>,
}

impl PartyRecord {
    fn new(decision: Decision, base_sentence: u32) -> Self {
        Self {
            decision,
            base_sentence,
            sentence_years: base_sentence,
            decided_at: Utc::now(),
        }
    }

    /// Whether this party betrayed the other.
    pub fn betrayed(&self) -> bool {
        self.decision.betrayed()
    }

    /// Subtract `years`, flooring at zero. Returns the new sentence.
    fn reduce(&mut self, years: u32) -> u32 {
        self.sentence_years = self.sentence_years.saturating_sub(years);
        self.sentence_years
    }
}

// ── Case Summary ───────────────────────────────────────────────────────

/// Public view of a case. Never reveals decisions or sentences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseSummary {
    /// The case identifier.
    pub case_id: CaseId,
    /// Current status.
    pub status: CaseStatus,
    /// Number of parties that have decided (0, 1 or 2).
    pub decided_parties: usize,
    /// When the case resolved, if it has.
    pub resolved_at: Option<DateTime<Utc>>,
}

// ── Case ───────────────────────────────────────────────────────────────

#[derive(Debug)]
struct CaseInner {
    parties: [Option<PartyRecord>; PARTIES_PER_CASE],
    status: CaseStatus,
    resolved_at: Option<DateTime<Utc>>,
}

impl CaseInner {
    fn filled(&self) -> usize {
        self.parties.iter().filter(|slot| slot.is_some()).count()
    }
}

/// One two-party negotiation.
pub struct Case {
    id: CaseId,
    random: Arc<dyn RandomSource>,
    inner: Mutex<CaseInner>,
}

impl std::fmt::Debug for Case {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Case")
            .field("id", &self.id)
            .field("status", &self.inner.try_lock().map(|inner| inner.status))
            .finish_non_exhaustive()
    }
}

impl Case {
    /// Create an open case with both slots empty.
    pub fn new(id: CaseId, random: Arc<dyn RandomSource>) -> Self {
        Self {
            id,
            random,
            inner: Mutex::new(CaseInner {
                parties: [None, None],
                status: CaseStatus::Open,
                resolved_at: None,
            }),
        }
    }

    /// The case identifier. Immutable.
    pub fn id(&self) -> CaseId {
        self.id
    }

    fn party(&self, raw: i64) -> Result<PartyIndex, CaseError> {
        PartyIndex::new(raw).map_err(|_| CaseError::InvalidParty {
            case_id: self.id,
            party_index: raw,
        })
    }

    /// Record `decision` for party `party_index` and return the resulting
    /// status.
    ///
    /// The party's slot is filled with a fresh [`PartyRecord`] carrying a
    /// base sentence drawn from the case's [`RandomSource`]. If this fills
    /// the second slot, the payoff table is applied to both parties before
    /// the lock is released, so resolution happens exactly once.
    ///
    /// # Errors
    ///
    /// - [`CaseError::InvalidParty`] if `party_index` is not 0 or 1.
    /// - [`CaseError::AlreadyDecided`] if the slot is already filled. The
    ///   case is left untouched.
    pub fn record_decision(
        &self,
        party_index: i64,
        decision: Decision,
    ) -> Result<CaseStatus, CaseError> {
        let party = self.party(party_index)?;
        let mut inner = self.inner.lock();

        if inner.parties[party.slot()].is_some() {
            return Err(CaseError::AlreadyDecided {
                case_id: self.id,
                party,
            });
        }

        let base = self.random.draw_base_sentence();
        inner.parties[party.slot()] = Some(PartyRecord::new(decision, base));
        inner.status = CaseStatus::from_occupancy(inner.filled());

        if inner.status == CaseStatus::Resolved {
            Self::resolve(&mut inner);
        }
        Ok(inner.status)
    }

    /// Apply the payoff table. Caller holds the lock and has just filled the
    /// second slot.
    fn resolve(inner: &mut CaseInner) {
        let [Some(first), Some(second)] = &mut inner.parties else {
            return;
        };
        let reductions = payoff(first.decision, second.decision);
        first.reduce(reductions.first);
        second.reduce(reductions.second);
        inner.resolved_at = Some(Utc::now());
    }

    /// Whether both parties have decided.
    pub fn is_resolved(&self) -> bool {
        self.inner.lock().status == CaseStatus::Resolved
    }

    /// Current status.
    pub fn status(&self) -> CaseStatus {
        self.inner.lock().status
    }

    /// Reduce the sentence of party `party_index` by `years`, flooring at
    /// zero, and return the new sentence.
    ///
    /// The returned value is read under the same lock as the reduction.
    ///
    /// # Errors
    ///
    /// - [`CaseError::InvalidParty`] if `party_index` is not 0 or 1.
    /// - [`CaseError::PartyNotDecided`] if the party has no record yet.
    pub fn apply_sentence_reduction(&self, party_index: i64, years: u32) -> Result<u32, CaseError> {
        let party = self.party(party_index)?;
        let mut inner = self.inner.lock();
        match inner.parties[party.slot()].as_mut() {
            Some(record) => Ok(record.reduce(years)),
            None => Err(CaseError::PartyNotDecided {
                case_id: self.id,
                party,
            }),
        }
    }

    /// Current sentence of party `party_index`.
    ///
    /// # Errors
    ///
    /// - [`CaseError::InvalidParty`] if `party_index` is not 0 or 1.
    /// - [`CaseError::PartyNotDecided`] if the party has no record yet.
    pub fn get_sentence(&self, party_index: i64) -> Result<u32, CaseError> {
        self.party_record(party_index)
            .map(|record| record.sentence_years)
    }

    /// Snapshot of party `party_index`'s record.
    ///
    /// # Errors
    ///
    /// Same as [`Case::get_sentence`].
    pub fn party_record(&self, party_index: i64) -> Result<PartyRecord, CaseError> {
        let party = self.party(party_index)?;
        let inner = self.inner.lock();
        inner.parties[party.slot()]
            .clone()
            .ok_or(CaseError::PartyNotDecided {
                case_id: self.id,
                party,
            })
    }

    /// Whether party `party_index` has decided.
    ///
    /// # Errors
    ///
    /// [`CaseError::InvalidParty`] if `party_index` is not 0 or 1.
    pub fn has_decided(&self, party_index: i64) -> Result<bool, CaseError> {
        let party = self.party(party_index)?;
        Ok(self.inner.lock().parties[party.slot()].is_some())
    }

    /// Validate that party `party_index` has a recorded decision.
    ///
    /// # Errors
    ///
    /// Same as [`Case::get_sentence`].
    pub fn ensure_decided(&self, party_index: i64) -> Result<PartyIndex, CaseError> {
        let party = self.party(party_index)?;
        if self.inner.lock().parties[party.slot()].is_some() {
            Ok(party)
        } else {
            Err(CaseError::PartyNotDecided {
                case_id: self.id,
                party,
            })
        }
    }

    /// Public view of the case.
    pub fn summary(&self) -> CaseSummary {
        let inner = self.inner.lock();
        CaseSummary {
            case_id: self.id,
            status: inner.status,
            decided_parties: inner.filled(),
            resolved_at: inner.resolved_at,
        }
    }
}
