//! # Validation Errors
//!
//! Structured errors raised when a domain primitive is constructed from
//! untrusted input. Built with `thiserror`; no `Box<dyn Error>`.

use thiserror::Error;

/// Errors during domain-primitive validation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Party index outside `{0, 1}`.
    #[error("invalid party index {0}: expected 0 or 1")]
    InvalidPartyIndex(i64),

    /// Decision token is neither `BETRAY` nor `COOPERATE`.
    #[error("unknown decision \"{0}\": expected BETRAY or COOPERATE")]
    UnknownDecision(String),
}
