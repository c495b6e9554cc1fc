//! # Page Fetcher Module
//!
//! This module retrieves the single page an analysis runs on. It owns the
//! only outbound network call in the crate.
//!
//! ## Key Components
//!
//! - `FetcherConfig`: user agent, timeout, redirect and body size limits
//! - `PageFetcher`: the HTTP client wrapper
//! - `FetchedPage`: the downloaded HTML and response metadata
//! - `normalize_url`: turns user input such as `example.com` into a URL
//! - `fetch_and_analyze`: fetch followed by [`crate::analyzer::analyze`]

mod client;
mod config;
mod error;

pub use client::PageFetcher;
pub use config::{FetcherConfig, FetcherConfigBuilder, DEFAULT_USER_AGENT};
pub use error::FetchError;

use crate::analyzer::{self, AnalysisResult};
use crate::error::{Error, Result};
use std::time::Duration;
use tracing::{info, instrument};
use url::Url;

/// A fetched page
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// URL as requested
    pub url: String,

    /// URL after following redirects
    pub final_url: String,

    /// HTTP status code of the final response
    pub status: u16,

    /// Response body
    pub html: String,

    /// Time spent fetching
    pub elapsed: Duration,
}

/// Normalize user input into an absolute http(s) URL
///
/// Input without an `http://` or `https://` prefix is assumed to be https.
pub fn normalize_url(input: &str) -> Result<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(Error::InvalidUrl("Please enter a URL".to_string()));
    }

    let candidate = if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("https://{}", trimmed)
    };

    match Url::parse(&candidate) {
        Ok(url) if url.host_str().is_some() => Ok(candidate),
        _ => Err(Error::InvalidUrl("Please enter a valid URL".to_string())),
    }
}

/// Fetch a page and analyze it
///
/// The analysis reports the URL as requested, not the post-redirect URL.
#[instrument(skip(fetcher))]
pub async fn fetch_and_analyze(fetcher: &PageFetcher, url: &str) -> Result<AnalysisResult> {
    let page = fetcher.fetch(url).await?;
    let result = analyzer::analyze(&page.url, &page.html)?;

    info!(
        url = %page.url,
        final_url = %page.final_url,
        overall = result.score.overall,
        elapsed_ms = page.elapsed.as_millis() as u64,
        "Analysis complete"
    );

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Server;

    #[test]
    fn test_normalize_url_adds_scheme() {
        assert_eq!(normalize_url("example.com").unwrap(), "https://example.com");
        assert_eq!(
            normalize_url("  http://example.com/a  ").unwrap(),
            "http://example.com/a"
        );
        assert_eq!(
            normalize_url("https://example.com").unwrap(),
            "https://example.com"
        );
    }

    #[test]
    fn test_normalize_url_rejects_garbage() {
        assert!(normalize_url("http://").is_err());
        assert!(normalize_url("not a url at all").is_err());
        assert!(matches!(
            normalize_url("not a url at all"),
            Err(Error::InvalidUrl(ref m)) if m == "Please enter a valid URL"
        ));
    }

    #[test]
    fn test_normalize_url_empty_input() {
        for input in ["", "   "] {
            assert!(matches!(
                normalize_url(input),
                Err(Error::InvalidUrl(ref m)) if m == "Please enter a URL"
            ));
        }
    }

    #[tokio::test]
    async fn test_fetch_and_analyze() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/")
            .with_status(200)
            .with_header("content-type", "text/html")
            .with_body(
                r#"<html><head><title>Short</title>
                <meta name="twitter:card" content="summary"></head></html>"#,
            )
            .create_async()
            .await;

        let fetcher = PageFetcher::with_defaults().unwrap();
        let url = format!("{}/", server.url());
        let result = fetch_and_analyze(&fetcher, &url).await.unwrap();

        assert_eq!(result.url, url);
        assert_eq!(result.title.as_deref(), Some("Short"));
        assert_eq!(result.score.social, 0.5 + 2.0);
    }

    #[tokio::test]
    async fn test_fetch_and_analyze_reports_requested_url() {
        let mut server = Server::new_async().await;
        let _old = server
            .mock("GET", "/old")
            .with_status(301)
            .with_header("location", "/new")
            .create_async()
            .await;
        let _new = server
            .mock("GET", "/new")
            .with_status(200)
            .with_header("content-type", "text/html")
            .with_body("<html><head><title>Moved</title></head></html>")
            .create_async()
            .await;

        let fetcher = PageFetcher::with_defaults().unwrap();
        let url = format!("{}/old", server.url());

        let page = fetcher.fetch(&url).await.unwrap();
        assert_eq!(page.url, url);
        assert!(page.final_url.ends_with("/new"));

        let result = fetch_and_analyze(&fetcher, &url).await.unwrap();
        assert_eq!(result.url, url);
        assert_eq!(result.title.as_deref(), Some("Moved"));
    }

    #[tokio::test]
    async fn test_fetch_and_analyze_upstream_failure() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/")
            .with_status(503)
            .create_async()
            .await;

        let fetcher = PageFetcher::with_defaults().unwrap();
        let err = fetch_and_analyze(&fetcher, &format!("{}/", server.url()))
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Failed to fetch website: Service Unavailable");
    }
}
