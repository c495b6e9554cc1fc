//! # SEO Meta Tag Analyzer
//!
//! This module turns an HTML document into an [`AnalysisResult`]: the
//! inspected meta tags with their classification, category scores, and a
//! list of recommendations. It performs no I/O; fetching lives in
//! [`crate::fetcher`].
//!
//! ## Key Components
//!
//! - `extract_tags`: reads the raw tag values out of the document
//! - `rules`: per-tag classification and recommendation texts
//! - `scoring`: category scores and the weighted overall percentage
//! - `analyze`: the whole pipeline for one page
//!
//! ## Inspected Tags
//!
//! Title, meta description, canonical link, robots, Open Graph title,
//! description and image, and the Twitter card type.

mod extraction;
pub mod rules;
pub mod scoring;
mod types;

pub use extraction::{extract_tags, ExtractedTags};
pub use types::{AnalysisResult, MetaTag, Recommendation, RecommendationKind, Score, TagStatus};

use crate::error::{Error, Result};
use tracing::debug;
use url::Url;

/// Analyze the meta tags of a page
///
/// # Arguments
///
/// * `url` - The absolute URL the HTML was served from
/// * `html` - The HTML of the page
///
/// # Returns
///
/// The analysis result, or an error if `url` is not an absolute URL
pub fn analyze(url: &str, html: &str) -> Result<AnalysisResult> {
    Url::parse(url).map_err(|e| Error::InvalidUrl(format!("{}: {}", url, e)))?;

    let tags = extract_tags(html)?;
    let (meta_tags, recommendations) = rules::classify_all(&tags);
    let score = scoring::score(&tags);

    debug!(
        url,
        overall = score.overall,
        recommendations = recommendations.len(),
        "Analyzed page"
    );

    Ok(AnalysisResult {
        url: url.to_string(),
        title: tags.title,
        description: tags.description,
        canonical: tags.canonical,
        meta_tags,
        score,
        recommendations,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analyze_well_tagged_page() {
        let title = "A well sized page title for search engine results";
        let description = "d".repeat(130);
        let html = format!(
            r#"<html><head>
            <title>{title}</title>
            <meta name="description" content="{description}">
            <link rel="canonical" href="https://example.com/page">
            <meta name="robots" content="index, follow">
            <meta property="og:title" content="Page">
            <meta property="og:description" content="About the page">
            <meta property="og:image" content="https://example.com/og.png">
            <meta name="twitter:card" content="summary_large_image">
            </head><body></body></html>"#
        );

        let result = analyze("https://example.com/page", &html).unwrap();

        assert_eq!(result.url, "https://example.com/page");
        assert_eq!(result.title.as_deref(), Some(title));
        assert_eq!(result.canonical.as_deref(), Some("https://example.com/page"));
        assert_eq!(result.meta_tags.len(), 8);
        assert!(result.meta_tags.iter().all(|t| t.status == TagStatus::Good));
        assert!(result.recommendations.is_empty());
        assert_eq!(result.score.overall, 90);
    }

    #[test]
    fn test_analyze_bare_page() {
        let result = analyze("http://example.com", "<html><body>hi</body></html>").unwrap();

        assert!(result.title.is_none());
        assert!(result.description.is_none());
        assert!(result.canonical.is_none());
        assert_eq!(result.tag("title").unwrap().status, TagStatus::Error);
        assert_eq!(result.tag("meta[robots]").unwrap().status, TagStatus::Info);
        assert_eq!(result.recommendations.len(), 7);
        assert_eq!(result.score.overall, 26);
    }

    #[test]
    fn test_analyze_noindex_is_case_sensitive() {
        let upper = analyze(
            "https://example.com",
            r#"<html><head><meta name="robots" content="NOINDEX"></head></html>"#,
        )
        .unwrap();
        assert_eq!(upper.tag("meta[robots]").unwrap().status, TagStatus::Good);
        assert_eq!(upper.score.essential, 2.0);

        let lower = analyze(
            "https://example.com",
            r#"<html><head><meta name="robots" content="noindex"></head></html>"#,
        )
        .unwrap();
        assert_eq!(lower.tag("meta[robots]").unwrap().status, TagStatus::Warning);
        assert_eq!(lower.score.essential, 0.5);
    }

    #[test]
    fn test_analyze_rejects_relative_url() {
        let err = analyze("/just/a/path", "<html></html>").unwrap_err();
        assert!(matches!(err, Error::InvalidUrl(_)));
    }

    #[test]
    fn test_analyze_is_deterministic() {
        let html = "<html><head><title>Same input</title></head></html>";
        let first = analyze("https://example.com", html).unwrap();
        let second = analyze("https://example.com", html).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_result_json_keys() {
        let result = analyze("https://example.com", "<html></html>").unwrap();
        let json = serde_json::to_value(&result).unwrap();

        assert!(json["metaTags"].is_array());
        assert!(json["recommendations"].is_array());
        assert_eq!(json["score"]["performance"], 7.0);
        assert!(json["title"].is_null());
    }
}
