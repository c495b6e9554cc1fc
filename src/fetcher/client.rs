//! HTTP client for fetching the page under analysis

use crate::fetcher::config::FetcherConfig;
use crate::fetcher::error::FetchError;
use crate::fetcher::FetchedPage;
use reqwest::{Client as ReqwestClient, redirect::Policy};
use std::time::Instant;
use tracing::{debug, instrument, warn};
use url::Url;

/// Fetches single pages over HTTP(S)
#[derive(Debug, Clone)]
pub struct PageFetcher {
    /// The underlying reqwest client
    client: ReqwestClient,

    /// Fetcher configuration
    config: FetcherConfig,
}

impl PageFetcher {
    /// Create a new fetcher with the given configuration
    pub fn new(config: FetcherConfig) -> Result<Self, FetchError> {
        let client = ReqwestClient::builder()
            .user_agent(config.user_agent.clone())
            .timeout(config.timeout())
            .redirect(Policy::limited(config.max_redirects))
            .build()?;

        Ok(Self { client, config })
    }

    /// Create a new fetcher with the default configuration
    pub fn with_defaults() -> Result<Self, FetchError> {
        Self::new(FetcherConfig::default())
    }

    /// Fetch a page and return its HTML
    #[instrument(skip(self), level = "debug")]
    pub async fn fetch(&self, url: &str) -> Result<FetchedPage, FetchError> {
        let parsed = Url::parse(url)?;
        match parsed.scheme() {
            "http" | "https" => {}
            other => return Err(FetchError::UnsupportedScheme(other.to_string())),
        }

        let started = Instant::now();
        debug!("Sending GET request to {}", parsed);
        let mut response = self.client.get(parsed).send().await?;

        let status = response.status();
        let final_url = response.url().to_string();

        if !status.is_success() {
            let reason = status
                .canonical_reason()
                .unwrap_or("Unknown status")
                .to_string();
            warn!("Page returned {} for {}", status, url);
            return Err(FetchError::Status {
                status_code: status.as_u16(),
                reason,
            });
        }

        let limit = self.config.max_body_bytes;
        if response.content_length().is_some_and(|len| len > limit as u64) {
            return Err(FetchError::BodyTooLarge { limit });
        }

        let mut body = Vec::new();
        while let Some(chunk) = response.chunk().await? {
            if body.len() + chunk.len() > limit {
                return Err(FetchError::BodyTooLarge { limit });
            }
            body.extend_from_slice(&chunk);
        }

        let elapsed = started.elapsed();
        debug!(
            bytes = body.len(),
            elapsed_ms = elapsed.as_millis() as u64,
            "Fetched {}",
            final_url
        );

        Ok(FetchedPage {
            url: url.to_string(),
            final_url,
            status: status.as_u16(),
            html: String::from_utf8_lossy(&body).into_owned(),
            elapsed,
        })
    }
}
