//! Error types for the fetcher module

use crate::error::Error as CrateError;
use thiserror::Error;

/// Error type for page fetching
#[derive(Debug, Error)]
pub enum FetchError {
    /// HTTP client error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// URL parsing error
    #[error("URL parsing error: {0}")]
    UrlParse(#[from] url::ParseError),

    /// Only http and https pages can be fetched
    #[error("Unsupported URL scheme: {0}")]
    UnsupportedScheme(String),

    /// The page answered with a non-success status
    #[error("Failed to fetch website: {reason}")]
    Status {
        /// HTTP status code
        status_code: u16,
        /// Reason phrase for the status
        reason: String,
    },

    /// The response body exceeded the configured limit
    #[error("Response body exceeds {limit} bytes")]
    BodyTooLarge {
        /// Configured limit in bytes
        limit: usize,
    },
}

impl From<FetchError> for CrateError {
    fn from(err: FetchError) -> Self {
        match err {
            FetchError::Http(e) => CrateError::Http(e),
            FetchError::UrlParse(e) => CrateError::InvalidUrl(e.to_string()),
            FetchError::UnsupportedScheme(scheme) => {
                CrateError::InvalidUrl(format!("unsupported scheme '{}'", scheme))
            }
            FetchError::Status {
                status_code,
                reason,
            } => CrateError::FetchStatus {
                status_code,
                reason,
            },
            FetchError::BodyTooLarge { .. } => CrateError::Fetch(err.to_string()),
        }
    }
}
