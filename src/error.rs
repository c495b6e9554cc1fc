//! Error types for the metainspector crate

use thiserror::Error;

/// Result type for metainspector operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for metainspector operations
#[derive(Debug, Error)]
pub enum Error {
    /// HTTP client error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The target URL is malformed or uses an unsupported scheme
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The page was reached but did not answer with a success status
    #[error("Failed to fetch website: {reason}")]
    FetchStatus {
        /// HTTP status code returned by the page
        status_code: u16,
        /// Canonical reason phrase for the status
        reason: String,
    },

    /// Page fetching error other than a bad status
    #[error("Fetch error: {0}")]
    Fetch(String),

    /// HTML parsing or selector error
    #[error("HTML parsing error: {0}")]
    HtmlParse(String),

    /// Terminal or file I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Error::InvalidUrl(err.to_string())
    }
}
