//! # dilemma-client - Typed client for the dilemma server
//!
//! Async access to both remote contracts:
//!
//! - **Decisions**: ping, authenticate, submit, poll, sentence.
//! - **Appeals**: one probabilistic trial per call.
//!
//! Transport failures are retried a bounded number of times
//! (200ms, 400ms, 800ms) and then surfaced as [`ClientError::Http`]. Error
//! responses are never retried. Submissions and appeals are re-sent only
//! when the connection could not be opened, since a second delivery would be
//! rejected as already decided or count as a second trial.
//!
//! ## Waiting for resolution
//!
//! [`DilemmaClient::wait_for_resolution`] polls at a fixed interval until the
//! case resolves. Without a timeout it waits indefinitely.

pub mod config;
pub mod error;
pub(crate) mod retry;
pub mod types;

pub use config::ClientConfig;
pub use error::ClientError;
pub use types::{AppealResult, CaseListing, SubmissionResult};

use std::time::Duration;

use dilemma_core::{Decision, Identity};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::retry::Retry;
use crate::types::{
    AuthenticateResponse, ErrorBody, PingResponse, PollResponse, SentenceResponse,
    SubmitDecisionRequest,
};

/// Reference polling interval.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(10);

/// Client for one dilemma server.
#[derive(Debug, Clone)]
pub struct DilemmaClient {
    http: reqwest::Client,
    config: ClientConfig,
}

impl DilemmaClient {
    /// Create a client from configuration.
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ClientError::Http {
                endpoint: "client_init".into(),
                source: e,
            })?;
        Ok(Self { http, config })
    }

    /// Client for the server at `base_url`.
    pub fn connect(base_url: &str) -> Result<Self, ClientError> {
        Self::new(ClientConfig::new(base_url)?)
    }

    /// Client configured from `DILEMMA_API_URL` and `DILEMMA_TIMEOUT_SECS`.
    pub fn from_env() -> Result<Self, ClientError> {
        Self::new(ClientConfig::from_env()?)
    }

    /// The server this client talks to.
    pub fn base_url(&self) -> &url::Url {
        &self.config.base_url
    }

    /// Connection check. Returns the server's greeting.
    pub async fn ping(&self) -> Result<String, ClientError> {
        let resp: PingResponse = self.get("/v1/decisions/ping").await?;
        Ok(resp.message)
    }

    /// Whether `identity` addresses a seeded case and a valid party.
    pub async fn authenticate(&self, identity: Identity) -> Result<bool, ClientError> {
        let resp: AuthenticateResponse = self
            .post("/v1/decisions/authenticate", &identity, Retry::AnyTransport)
            .await?;
        Ok(resp.authenticated)
    }

    /// Submit the party's one decision.
    pub async fn submit_decision(
        &self,
        identity: Identity,
        decision: Decision,
    ) -> Result<SubmissionResult, ClientError> {
        let req = SubmitDecisionRequest {
            case_id: identity.case_id,
            party_index: identity.party_index,
            decision,
        };
        self.post("/v1/decisions/submit", &req, Retry::ConnectOnly).await
    }

    /// Whether both parties of the identity's case have decided.
    pub async fn poll_resolved(&self, identity: Identity) -> Result<bool, ClientError> {
        let resp: PollResponse = self
            .post("/v1/decisions/poll", &identity, Retry::AnyTransport)
            .await?;
        Ok(resp.resolved)
    }

    /// Current sentence in years.
    ///
    /// # Errors
    ///
    /// [`ClientError::ApiError`] with status 401 for an invalid identity and
    /// 409 if the party has not decided.
    pub async fn fetch_sentence(&self, identity: Identity) -> Result<u32, ClientError> {
        let resp: SentenceResponse = self
            .post("/v1/decisions/sentence", &identity, Retry::AnyTransport)
            .await?;
        Ok(resp.sentence_years)
    }

    /// Run one appeal trial.
    ///
    /// # Errors
    ///
    /// [`ClientError::ApiError`] with status 404 for an unknown case, 422 for
    /// a party index out of range and 409 if the party has not decided.
    pub async fn request_appeal(&self, identity: Identity) -> Result<AppealResult, ClientError> {
        self.post("/v1/appeals", &identity, Retry::ConnectOnly).await
    }

    /// All cases on the server.
    pub async fn list_cases(&self) -> Result<Vec<CaseListing>, ClientError> {
        self.get("/v1/cases").await
    }

    /// Poll every `interval` until the case resolves. The last sleep is cut
    /// short so the wait never runs past `timeout`.
    ///
    /// # Errors
    ///
    /// [`ClientError::PollTimeout`] once `timeout` has elapsed without
    /// resolution, or any error from [`DilemmaClient::poll_resolved`].
    pub async fn wait_for_resolution(
        &self,
        identity: Identity,
        interval: Duration,
        timeout: Option<Duration>,
    ) -> Result<(), ClientError> {
        let started = tokio::time::Instant::now();
        loop {
            if self.poll_resolved(identity).await? {
                return Ok(());
            }
            let waited = started.elapsed();
            let pause = match timeout {
                Some(limit) if waited >= limit => {
                    return Err(ClientError::PollTimeout { identity, waited });
                }
                Some(limit) => interval.min(limit - waited),
                None => interval,
            };
            tracing::debug!(%identity, ?waited, "case not resolved yet");
            tokio::time::sleep(pause).await;
        }
    }

    async fn get<R: DeserializeOwned>(&self, path: &str) -> Result<R, ClientError> {
        let endpoint = format!("GET {path}");
        let url = self.config.endpoint(path);
        let resp = retry::retry_send(Retry::AnyTransport, || self.http.get(&url).send())
            .await
            .map_err(|e| ClientError::Http {
                endpoint: endpoint.clone(),
                source: e,
            })?;
        decode(endpoint, resp).await
    }

    async fn post<B, R>(&self, path: &str, body: &B, policy: Retry) -> Result<R, ClientError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let endpoint = format!("POST {path}");
        let url = self.config.endpoint(path);
        let resp = retry::retry_send(policy, || self.http.post(&url).json(body).send())
            .await
            .map_err(|e| ClientError::Http {
                endpoint: endpoint.clone(),
                source: e,
            })?;
        decode(endpoint, resp).await
    }
}

async fn decode<R: DeserializeOwned>(
    endpoint: String,
    resp: reqwest::Response,
) -> Result<R, ClientError> {
    if !resp.status().is_success() {
        let status = resp.status().as_u16();
        let body = resp.text().await.unwrap_or_default();
        let (code, message) = match serde_json::from_str::<ErrorBody>(&body) {
            Ok(parsed) => (parsed.error.code, parsed.error.message),
            Err(_) => ("UNKNOWN".to_string(), body),
        };
        return Err(ClientError::ApiError {
            endpoint,
            status,
            code,
            message,
        });
    }

    resp.json().await.map_err(|e| ClientError::Deserialization {
        endpoint,
        source: e,
    })
}
