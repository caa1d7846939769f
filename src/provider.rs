//! Weatherstack current-conditions client.
//!
//! One GET per submission, no retries. Anything that means "the provider could
//! not give us conditions for this place" collapses into
//! [`ProviderError::LocationNotFound`]; a success payload that does not match
//! the expected shape is a [`ProviderError::Schema`].

use std::time::Duration;

use anyhow::Result;
use thiserror::Error;
use tracing::debug;

use crate::{Config, CurrentConditionsResponse, GeoInfo, WeatherSnapshot};

// ---

#[derive(Debug, Error)]
pub enum ProviderError {
    // ---
    /// Transport failure, non-success status, or no `current` section.
    #[error("location lookup failed: {0}")]
    LocationNotFound(String),

    /// Success payload missing a required field.
    #[error("unexpected provider response: {0}")]
    Schema(String),
}

/// Thin wrapper over a shared `reqwest::Client`; cheap to clone.
#[derive(Debug, Clone)]
pub struct WeatherstackClient {
    // ---
    client: reqwest::Client,
    api_url: String,
    access_key: String,
}

impl WeatherstackClient {
    // ---
    pub fn new(api_url: &str, access_key: &str, timeout: Option<Duration>) -> Result<Self> {
        // ---
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to build provider HTTP client: {}", e))?;

        Ok(Self {
            client,
            api_url: api_url.to_string(),
            access_key: access_key.to_string(),
        })
    }

    pub fn from_config(cfg: &Config) -> Result<Self> {
        // ---
        let timeout = cfg.provider_timeout_secs.map(Duration::from_secs);
        Self::new(&cfg.api_url, &cfg.api_key, timeout)
    }

    /// Fetch current conditions for `query`, passed to the provider verbatim.
    pub async fn fetch_current(
        &self,
        query: &str,
    ) -> Result<(WeatherSnapshot, GeoInfo), ProviderError> {
        // ---
        debug!("Fetching current conditions for {:?} from {}", query, self.api_url);

        let response = self
            .client
            .get(&self.api_url)
            .query(&[("access_key", self.access_key.as_str()), ("query", query)])
            .send()
            .await
            .map_err(|e| ProviderError::LocationNotFound(format!("transport error: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::LocationNotFound(format!(
                "provider returned status {status}"
            )));
        }

        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| ProviderError::LocationNotFound(format!("unreadable body: {e}")))?;

        if !body.get("current").is_some_and(|c| c.is_object()) {
            // Weatherstack reports errors with HTTP 200 and an `error` object.
            let info = body
                .pointer("/error/info")
                .and_then(|i| i.as_str())
                .unwrap_or("response has no current conditions");
            return Err(ProviderError::LocationNotFound(info.to_string()));
        }

        debug!("Provider response for {:?}: {}", query, body);

        let parsed: CurrentConditionsResponse =
            serde_json::from_value(body).map_err(|e| ProviderError::Schema(e.to_string()))?;
        parsed.into_parts()
    }
}
