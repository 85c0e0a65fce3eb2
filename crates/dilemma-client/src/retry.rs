//! Bounded retry for HTTP calls.
//!
//! Error responses (4xx, 5xx) are never retried. Transport failures are
//! retried up to three times with doubling delays (200ms, 400ms, 800ms),
//! subject to the call's [`Retry`] policy.

use std::future::Future;
use std::time::Duration;

/// Retry attempts after the initial request.
const MAX_RETRIES: u32 = 3;

/// First backoff delay. Doubles on each attempt.
const BASE_DELAY_MS: u64 = 200;

/// Which transport failures a call may be re-sent after.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Retry {
    /// Reads. Any transport failure, including timeouts after the request
    /// was sent.
    AnyTransport,
    /// Writes such as a decision submission or an appeal trial. Only
    /// failures to open the connection, where the server cannot have seen
    /// the request.
    ConnectOnly,
}

impl Retry {
    fn allows(self, err: &reqwest::Error) -> bool {
        match self {
            Self::AnyTransport => true,
            Self::ConnectOnly => err.is_connect(),
        }
    }
}

fn backoff(attempt: u32) -> Duration {
    Duration::from_millis(BASE_DELAY_MS << attempt)
}

/// Send a request built by `send`, re-sending as `policy` allows.
pub(crate) async fn retry_send<F, Fut>(
    policy: Retry,
    send: F,
) -> Result<reqwest::Response, reqwest::Error>
where
    F: Fn() -> Fut,
    Fut: Future<Output = Result<reqwest::Response, reqwest::Error>>,
{
    let mut attempt = 0;
    loop {
        let err = match send().await {
            Ok(resp) => return Ok(resp),
            Err(e) => e,
        };
        if attempt == MAX_RETRIES || !policy.allows(&err) {
            return Err(err);
        }
        let delay = backoff(attempt);
        attempt += 1;
        tracing::warn!(attempt, ?policy, ?delay, error = %err, "transport failure, re-sending");
        tokio::time::sleep(delay).await;
    }
}
