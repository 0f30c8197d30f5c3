use reqwest::Client;
use serde::de::DeserializeOwned;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;
use thiserror::Error;
use tokio_retry::RetryIf;

use crate::config::FetchConfig;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP {status} from {url}")]
    Status { status: u16, url: String },

    #[error("request timed out after {after_secs}s")]
    Timeout { after_secs: u64 },

    #[error("connection failed: {0}")]
    Connect(String),

    #[error("request failed: {0}")]
    Request(String),

    #[error("malformed response body: {0}")]
    Decode(String),

    #[error("gave up after {attempts} attempt(s): {last}")]
    Exhausted { attempts: u32, last: Box<FetchError> },
}

impl FetchError {
    /// Outcomes worth another attempt: 429, any 5xx, timeouts and refused connections.
    pub fn is_transient(&self) -> bool {
        match self {
            FetchError::Status { status, .. } => *status == 429 || (500..600).contains(status),
            FetchError::Timeout { .. } | FetchError::Connect(_) => true,
            FetchError::Request(_) | FetchError::Decode(_) | FetchError::Exhausted { .. } => false,
        }
    }

    pub fn attempts(&self) -> u32 {
        match self {
            FetchError::Exhausted { attempts, .. } => *attempts,
            _ => 1,
        }
    }

    fn from_reqwest(err: reqwest::Error, timeout: Duration) -> Self {
        if err.is_timeout() {
            FetchError::Timeout { after_secs: timeout.as_secs() }
        } else if err.is_connect() {
            FetchError::Connect(err.to_string())
        } else {
            FetchError::Request(err.to_string())
        }
    }
}

#[derive(Debug, Clone)]
pub struct FetchOptions {
    /// Pause applied before every attempt, independent of retry backoff.
    pub politeness_delay: Duration,
}

impl FetchOptions {
    pub fn with_delay(politeness_delay: Duration) -> Self {
        Self { politeness_delay }
    }
}

#[derive(Debug, Clone)]
pub struct FetchResponse {
    pub status: u16,
    pub url: String,
    pub body: String,
}

impl FetchResponse {
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, FetchError> {
        serde_json::from_str(&self.body).map_err(|e| FetchError::Decode(e.to_string()))
    }
}

/// Delays before each retry: `base`, `base * factor`, `base * factor^2`, ...
pub fn backoff_schedule(base: Duration, factor: u32) -> impl Iterator<Item = Duration> {
    std::iter::successors(Some(base), move |delay| Some(delay.saturating_mul(factor)))
}

/// Bounded-retry HTTP client shared by the network-backed store adapters.
#[derive(Clone)]
pub struct FetchClient {
    client: Client,
    config: FetchConfig,
}

impl FetchClient {
    pub fn new(config: FetchConfig) -> Result<Self, FetchError> {
        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .build()
            .map_err(|e| FetchError::Request(e.to_string()))?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &FetchConfig {
        &self.config
    }

    /// GET `url`, retrying transient failures up to `max_attempts` in total.
    pub async fn fetch(&self, url: &str, options: &FetchOptions) -> Result<FetchResponse, FetchError> {
        let attempts = AtomicU32::new(0);
        let retries = self.config.max_attempts.saturating_sub(1) as usize;
        let strategy = backoff_schedule(self.config.backoff_base(), self.config.backoff_factor).take(retries);

        let result = RetryIf::start(
            strategy,
            || self.attempt(url, options, &attempts),
            |err: &FetchError| {
                let transient = err.is_transient();
                if transient {
                    tracing::warn!(
                        url = %url,
                        attempt = attempts.load(Ordering::SeqCst),
                        error = %err,
                        "Transient fetch failure"
                    );
                }
                transient
            },
        )
        .await;

        result.map_err(|last| {
            let attempts = attempts.load(Ordering::SeqCst);
            metrics::counter!("fetch_failures_total").increment(1);
            tracing::error!(url = %url, attempts, error = %last, "Fetch failed");
            FetchError::Exhausted {
                attempts,
                last: Box::new(last),
            }
        })
    }

    pub async fn fetch_json<T: DeserializeOwned>(&self, url: &str, options: &FetchOptions) -> Result<T, FetchError> {
        self.fetch(url, options).await?.json()
    }

    async fn attempt(&self, url: &str, options: &FetchOptions, attempts: &AtomicU32) -> Result<FetchResponse, FetchError> {
        let attempt = attempts.fetch_add(1, Ordering::SeqCst) + 1;

        if !options.politeness_delay.is_zero() {
            tokio::time::sleep(options.politeness_delay).await;
        }

        metrics::counter!("fetch_attempts_total").increment(1);
        tracing::debug!(url = %url, attempt, "Fetching");

        let timeout = self.config.request_timeout();
        let request = async {
            let response = self
                .client
                .get(url)
                .send()
                .await
                .map_err(|e| FetchError::from_reqwest(e, timeout))?;

            let status = response.status();
            if !status.is_success() {
                return Err(FetchError::Status {
                    status: status.as_u16(),
                    url: url.to_string(),
                });
            }

            let final_url = response.url().to_string();
            let body = response
                .text()
                .await
                .map_err(|e| FetchError::from_reqwest(e, timeout))?;

            Ok(FetchResponse {
                status: status.as_u16(),
                url: final_url,
                body,
            })
        };

        match tokio::time::timeout(timeout, request).await {
            Ok(result) => result,
            Err(_) => Err(FetchError::Timeout { after_secs: timeout.as_secs() }),
        }
    }
}
