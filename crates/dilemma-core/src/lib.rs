#![deny(missing_docs)]

//! # dilemma-core - Foundational Types for the Dilemma Stack
//!
//! This crate defines the types every other crate in the workspace speaks.
//! It has no internal crate dependencies - only `serde` and `thiserror`
//! from the external ecosystem.
//!
//! ## Design Principles
//!
//! 1. **Newtype wrappers for domain primitives.** A [`CaseId`] is not a
//!    [`PartyIndex`]. The party index is a closed two-value type: once a
//!    `PartyIndex` exists it is 0 or 1, and nothing downstream re-checks it.
//!
//! 2. **Raw integers only at the wire boundary.** [`Identity`] carries the
//!    `(case_id, party_index)` pair exactly as a remote caller sent it, so
//!    out-of-range values can be rejected with a structured error instead of
//!    failing deserialization.
//!
//! 3. **Closed decision vocabulary.** [`Decision`] has two variants. Any other
//!    token is a [`ValidationError`] raised before a request is ever sent.

pub mod decision;
pub mod error;
pub mod identity;

pub use decision::Decision;
pub use error::ValidationError;
pub use identity::{CaseId, Identity, PartyIndex, PARTIES_PER_CASE};
