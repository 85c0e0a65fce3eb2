//! # dilemma-state - Case State Machine
//!
//! Owns the only mutable state in the stack:
//!
//! - **Case** ([`case`]): per-negotiation state machine. Accepts one decision
//!   per party exactly once, resolves payoffs when both are present, and
//!   applies floor-at-zero sentence reductions. Every mutation runs under the
//!   case's own lock; distinct cases never contend.
//!
//! - **Payoff** ([`payoff`]): the fixed reduction table.
//!
//! - **Registry** ([`registry`]): immutable mapping from case id to case,
//!   built once at startup.
//!
//! - **Randomness** ([`random`]): the injectable source for base-sentence
//!   draws and appeal coin flips.
//!
//! - **Error** ([`error`]): the case error hierarchy.
//!
//! ## Transition Graph
//!
//! ```text
//! OPEN ──record_decision()──▶ AWAITING_SECOND_PARTY ──record_decision()──▶ RESOLVED
//! ```
//!
//! The status is a function of slot occupancy and is recomputed after every
//! slot fill. `RESOLVED` is terminal.

pub mod case;
pub mod error;
pub mod payoff;
pub mod random;
pub mod registry;

pub use case::{Case, CaseStatus, CaseSummary, PartyRecord};
pub use error::CaseError;
pub use payoff::{payoff, Payoff};
pub use random::{
    FixedRandom, RandomSource, SeededRandom, ThreadRandom, APPEAL_ACCEPT_PROBABILITY,
    MAX_BASE_SENTENCE, MIN_BASE_SENTENCE,
};
pub use registry::{CaseRegistry, DEFAULT_CASE_COUNT};
