//! # metainspector - SEO Meta Tag Inspection for Rust
//!
//! This crate fetches a web page, extracts the meta tags that matter for
//! search and social sharing, and scores them against fixed heuristics. The
//! result is a flat record of tag classifications, category scores and
//! recommendations that can be printed, served as JSON, or shown in the
//! terminal dashboard.
//!
//! ## Features
//!
//! - Extraction of title, description, canonical, robots, Open Graph and
//!   Twitter Card tags
//! - Deterministic scoring into essential, social, structure and performance
//!   categories plus an overall percentage
//! - Human-readable recommendations for every tag that is not in good shape
//! - A REST endpoint (`POST /api/analyze`) built on axum
//! - Async fetching with Tokio and reqwest
//!
//! ## Example
//!
//! ```rust,no_run
//! use metainspector::fetcher::{fetch_and_analyze, PageFetcher};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let fetcher = PageFetcher::with_defaults()?;
//!     let result = fetch_and_analyze(&fetcher, "https://example.com").await?;
//!
//!     println!("{}: {}%", result.url, result.score.overall);
//!     for rec in &result.recommendations {
//!         println!("- {}", rec.title);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! Analysis without the network:
//!
//! ```rust
//! let html = "<html><head><title>Hello</title></head></html>";
//! let result = metainspector::analyzer::analyze("https://example.com", html).unwrap();
//! assert_eq!(result.title.as_deref(), Some("Hello"));
//! ```

mod error;
mod render;

pub mod analyzer;
pub mod fetcher;
pub mod report;
pub mod server;

pub use error::Error;
pub use render::{print_report, write_report};

/// Re-export of commonly used types
pub mod prelude {
    pub use crate::analyzer::{AnalysisResult, MetaTag, Recommendation, Score, TagStatus};
    pub use crate::error::Error;
    pub use crate::error::Result;
}
