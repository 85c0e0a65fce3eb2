//! Client configuration.
//!
//! One base URL for the server plus a per-request timeout. Override via
//! environment variables or explicit construction.

use url::Url;

/// Default server location.
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8080";

/// Default per-request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for connecting to a dilemma server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Server base URL.
    pub base_url: Url,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl ClientConfig {
    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `DILEMMA_API_URL` (default: `http://127.0.0.1:8080`)
    /// - `DILEMMA_TIMEOUT_SECS` (default: 30)
    pub fn from_env() -> Result<Self, ConfigError> {
        let raw = std::env::var("DILEMMA_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        let mut config = Self::new(&raw)?;
        if let Ok(secs) = std::env::var("DILEMMA_TIMEOUT_SECS") {
            config.timeout_secs = secs
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidTimeout(secs))?;
        }
        Ok(config)
    }

    /// Configuration for `base_url` with the default timeout.
    pub fn new(base_url: &str) -> Result<Self, ConfigError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| ConfigError::InvalidUrl(base_url.to_string(), e.to_string()))?;
        Ok(Self {
            base_url,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        })
    }

    /// Configuration for a server on localhost (for testing).
    pub fn local(port: u16) -> Result<Self, ConfigError> {
        let mut config = Self::new(&format!("http://127.0.0.1:{port}"))?;
        config.timeout_secs = 5;
        Ok(config)
    }

    /// Full URL for `path`, which must start with `/`.
    pub(crate) fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url.as_str().trim_end_matches('/'), path)
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid URL {0}: {1}")]
    InvalidUrl(String, String),
    #[error("invalid timeout {0:?}: expected whole seconds")]
    InvalidTimeout(String),
}
