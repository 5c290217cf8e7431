//! Upstream feed fetching.

use std::time::Duration;

use crate::error::{RefreshError, ServerError};

/// HTTP client for the upstream XML feed.
///
/// Every request carries a bounded timeout; a hung upstream can only
/// delay a cycle, never wedge the scheduler.
#[derive(Debug, Clone)]
pub struct FeedFetcher {
    client: reqwest::Client,
    url: String,
}

impl FeedFetcher {
    /// Build a fetcher for `url` with the given per-request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, ServerError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ServerError::Internal(format!("failed to build http client: {e}")))?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }

    /// The configured feed URL.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Fetch the raw feed body.
    ///
    /// # Errors
    ///
    /// Returns [`RefreshError::Transport`] on network failure, timeout, or
    /// a non-success status.
    pub async fn fetch_body(&self) -> Result<String, RefreshError> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await?
            .error_for_status()?;
        Ok(response.text().await?)
    }
}
