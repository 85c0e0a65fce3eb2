//! Client error types.

use std::time::Duration;

use dilemma_core::Identity;

/// Errors from dilemma API calls.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// HTTP transport error, after retries.
    #[error("HTTP error calling {endpoint}: {source}")]
    Http {
        endpoint: String,
        source: reqwest::Error,
    },
    /// The server answered with a non-2xx status.
    #[error("{endpoint} returned {status} {code}: {message}")]
    ApiError {
        endpoint: String,
        status: u16,
        /// Machine-readable code from the error body, e.g. `NOT_FOUND`.
        code: String,
        message: String,
    },
    /// Response deserialization failed.
    #[error("failed to deserialize response from {endpoint}: {source}")]
    Deserialization {
        endpoint: String,
        source: reqwest::Error,
    },
    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(#[from] super::config::ConfigError),
    /// The case did not resolve within the caller's bound.
    #[error("{identity} not resolved after {waited:?}")]
    PollTimeout { identity: Identity, waited: Duration },
}

impl ClientError {
    /// HTTP status of an [`ClientError::ApiError`].
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::ApiError { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// The identity was rejected (401).
    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }

    /// The case does not exist (404).
    pub fn is_unknown_case(&self) -> bool {
        self.status() == Some(404)
    }

    /// The party has not decided yet (409).
    pub fn is_not_decided(&self) -> bool {
        self.status() == Some(409)
    }

    /// The server could not be reached.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Http { .. })
    }
}
