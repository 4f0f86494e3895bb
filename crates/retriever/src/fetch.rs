//! Document fetching.
//!
//! The retriever never talks to the network directly; it goes through a
//! [`DocumentFetcher`] so tests can serve canned markup.

use async_trait::async_trait;
use driversfriend_core::error::RetrievalError;
use std::time::Duration;
use tracing::debug;

#[async_trait]
pub trait DocumentFetcher: Send + Sync {
    /// Fetch the raw markup at `url`.
    async fn fetch(&self, url: &str) -> Result<String, RetrievalError>;
}

/// reqwest-backed fetcher with a fixed per-request timeout.
pub struct HttpFetcher {
    client: reqwest::Client,
    timeout_secs: u64,
}

impl HttpFetcher {
    pub fn new(timeout_secs: u64, user_agent: &str) -> Result<Self, RetrievalError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent(user_agent)
            .build()
            .map_err(|e| RetrievalError::NotConfigured(format!("HTTP client: {e}")))?;
        Ok(Self {
            client,
            timeout_secs,
        })
    }
}

#[async_trait]
impl DocumentFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String, RetrievalError> {
        debug!(url, "Fetching document");
        let response = self.client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                RetrievalError::Timeout {
                    url: url.to_string(),
                    timeout_secs: self.timeout_secs,
                }
            } else {
                RetrievalError::Network {
                    url: url.to_string(),
                    reason: e.to_string(),
                }
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(RetrievalError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response.text().await.map_err(|e| RetrievalError::Network {
            url: url.to_string(),
            reason: format!("reading body: {e}"),
        })
    }
}
