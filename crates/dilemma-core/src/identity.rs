//! # Identity Newtypes
//!
//! Identifiers for cases and the parties within them.
//!
//! ## Validation
//!
//! [`CaseId`] accepts any integer: whether a case exists is a registry
//! question, not a syntactic one. [`PartyIndex`] validates at construction
//! time and is always 0 or 1 afterwards.
//!
//! [`Identity`] is the capability pair a remote caller presents. It is never
//! stored server-side beyond the call that carries it.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Number of parties in every case.
pub const PARTIES_PER_CASE: usize = 2;

// ---------------------------------------------------------------------------
// CaseId
// ---------------------------------------------------------------------------

/// Identifier of one two-party negotiation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CaseId(i64);

impl CaseId {
    /// Wrap a raw case number.
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// The raw case number.
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl From<i64> for CaseId {
    fn from(raw: i64) -> Self {
        Self(raw)
    }
}

impl std::fmt::Display for CaseId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "case:{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// PartyIndex
// ---------------------------------------------------------------------------

/// One of the two participants in a case.
///
/// Serializes as the bare integer `0` or `1`. Deserializing any other
/// integer fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct PartyIndex(u8);

impl PartyIndex {
    /// The party in slot 0.
    pub const FIRST: PartyIndex = PartyIndex(0);
    /// The party in slot 1.
    pub const SECOND: PartyIndex = PartyIndex(1);

    /// Validate a raw index.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidPartyIndex`] unless `raw` is 0 or 1.
    pub fn new(raw: i64) -> Result<Self, ValidationError> {
        match raw {
            0 => Ok(Self::FIRST),
            1 => Ok(Self::SECOND),
            other => Err(ValidationError::InvalidPartyIndex(other)),
        }
    }

    /// Both parties in slot order.
    pub const fn both() -> [PartyIndex; PARTIES_PER_CASE] {
        [Self::FIRST, Self::SECOND]
    }

    /// The opposing party.
    pub const fn other(self) -> Self {
        PartyIndex(1 - self.0)
    }

    /// Slot position, usable as an array index.
    pub const fn slot(self) -> usize {
        self.0 as usize
    }
}

impl TryFrom<i64> for PartyIndex {
    type Error = ValidationError;

    fn try_from(raw: i64) -> Result<Self, Self::Error> {
        Self::new(raw)
    }
}

impl From<PartyIndex> for i64 {
    fn from(p: PartyIndex) -> Self {
        i64::from(p.0)
    }
}

impl std::fmt::Display for PartyIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "party:{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Identity
// ---------------------------------------------------------------------------

/// The `(case_id, party_index)` pair a caller presents to address its own
/// party state. Fields are raw integers so the service can answer
/// structurally-invalid identities with `false` rather than a parse failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Identity {
    /// Case the caller claims to belong to.
    pub case_id: i64,
    /// Slot the caller claims within that case.
    pub party_index: i64,
}

impl Identity {
    /// Build an identity from raw wire values.
    pub const fn new(case_id: i64, party_index: i64) -> Self {
        Self {
            case_id,
            party_index,
        }
    }

    /// The case identifier.
    pub const fn case(&self) -> CaseId {
        CaseId::new(self.case_id)
    }

    /// The validated party index.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidPartyIndex`] when the raw index is
    /// outside `{0, 1}`.
    pub fn party(&self) -> Result<PartyIndex, ValidationError> {
        PartyIndex::new(self.party_index)
    }
}

impl std::fmt::Display for Identity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "case:{}/party:{}", self.case_id, self.party_index)
    }
}
