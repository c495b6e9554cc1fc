//! Data model for analysis results
//!
//! The serialized form of these types is the JSON contract of the
//! `POST /api/analyze` endpoint, so field names are camelCase on the wire.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Classification of a single meta tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TagStatus {
    /// Present and within the recommended bounds
    Good,
    /// Present but suboptimal, or missing and recommended
    Warning,
    /// Missing and important
    Error,
    /// Informational only, no action needed
    Info,
}

impl TagStatus {
    /// Whether the tag needs the user's attention
    pub fn needs_attention(self) -> bool {
        matches!(self, TagStatus::Warning | TagStatus::Error)
    }

    /// Lowercase label, as used on the wire
    pub fn as_str(self) -> &'static str {
        match self {
            TagStatus::Good => "good",
            TagStatus::Warning => "warning",
            TagStatus::Error => "error",
            TagStatus::Info => "info",
        }
    }
}

impl fmt::Display for TagStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A meta tag as found on the page, with its classification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetaTag {
    /// Tag identifier, e.g. `title` or `meta[og:image]`
    pub name: String,

    /// Extracted value, `None` when absent
    pub content: Option<String>,

    /// Classification of the tag
    pub status: TagStatus,

    /// Human-readable explanation of the status
    pub status_message: String,
}

/// Severity of a recommendation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecommendationKind {
    Warning,
    Error,
    Info,
}

/// Suggested fix for a tag that is not in a good state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    /// Severity
    #[serde(rename = "type")]
    pub kind: RecommendationKind,

    /// Short headline
    pub title: String,

    /// Longer explanation
    pub description: String,
}

/// Category scores and the weighted overall percentage
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Score {
    /// Weighted overall score, 0 to 100
    pub overall: u8,

    /// Title, description, canonical and robots, 0 to 10
    pub essential: f64,

    /// Open Graph and Twitter Card tags, 0 to 10
    pub social: f64,

    /// Document structure, 0 to 10
    pub structure: f64,

    /// Performance, 0 to 10
    pub performance: f64,
}

/// Complete result of analyzing one page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    /// URL that was analyzed
    pub url: String,

    /// Contents of the `<title>` element
    pub title: Option<String>,

    /// Contents of the meta description
    pub description: Option<String>,

    /// Canonical link target
    pub canonical: Option<String>,

    /// All inspected tags, in a fixed order
    pub meta_tags: Vec<MetaTag>,

    /// Scores
    pub score: Score,

    /// Recommendations for every tag that is not good
    pub recommendations: Vec<Recommendation>,
}

impl AnalysisResult {
    /// Look up an inspected tag by name
    pub fn tag(&self, name: &str) -> Option<&MetaTag> {
        self.meta_tags.iter().find(|tag| tag.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_meta_tag_wire_format() {
        let tag = MetaTag {
            name: "meta[robots]".to_string(),
            content: None,
            status: TagStatus::Info,
            status_message: "Not specified (defaults to index, follow)".to_string(),
        };

        let json = serde_json::to_value(&tag).unwrap();
        assert_eq!(json["name"], "meta[robots]");
        assert!(json["content"].is_null());
        assert_eq!(json["status"], "info");
        assert_eq!(
            json["statusMessage"],
            "Not specified (defaults to index, follow)"
        );
    }

    #[test]
    fn test_recommendation_kind_serializes_as_type() {
        let rec = Recommendation {
            kind: RecommendationKind::Error,
            title: "Missing title tag".to_string(),
            description: "x".to_string(),
        };

        let json = serde_json::to_value(&rec).unwrap();
        assert_eq!(json["type"], "error");
        assert!(json.get("kind").is_none());
    }

    #[test]
    fn test_needs_attention() {
        assert!(TagStatus::Error.needs_attention());
        assert!(TagStatus::Warning.needs_attention());
        assert!(!TagStatus::Good.needs_attention());
        assert!(!TagStatus::Info.needs_attention());
    }
}
