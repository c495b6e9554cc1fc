//! Classification rules for the inspected tags
//!
//! Each rule maps the extracted value of one tag to a [`MetaTag`] and, for
//! anything that is not in a good state, a [`Recommendation`].

use super::extraction::ExtractedTags;
use super::types::{MetaTag, Recommendation, RecommendationKind, TagStatus};

pub const TITLE_MIN_CHARS: usize = 30;
pub const TITLE_MAX_CHARS: usize = 60;
pub const DESCRIPTION_MIN_CHARS: usize = 120;
pub const DESCRIPTION_MAX_CHARS: usize = 155;

pub const TAG_TITLE: &str = "title";
pub const TAG_DESCRIPTION: &str = "meta[description]";
pub const TAG_CANONICAL: &str = "link[canonical]";
pub const TAG_ROBOTS: &str = "meta[robots]";
pub const TAG_OG_TITLE: &str = "meta[og:title]";
pub const TAG_OG_DESCRIPTION: &str = "meta[og:description]";
pub const TAG_OG_IMAGE: &str = "meta[og:image]";
pub const TAG_TWITTER_CARD: &str = "meta[twitter:card]";

/// Outcome of classifying a single tag
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub tag: MetaTag,
    pub recommendation: Option<Recommendation>,
}

impl Classification {
    fn new(name: &str, content: Option<&str>, status: TagStatus, message: &str) -> Self {
        Self {
            tag: MetaTag {
                name: name.to_string(),
                content: content.map(str::to_string),
                status,
                status_message: message.to_string(),
            },
            recommendation: None,
        }
    }

    fn recommend(mut self, kind: RecommendationKind, title: &str, description: &str) -> Self {
        self.recommendation = Some(Recommendation {
            kind,
            title: title.to_string(),
            description: description.to_string(),
        });
        self
    }
}

/// Character count, used for every length rule
pub fn char_len(value: &str) -> usize {
    value.chars().count()
}

/// Whether a robots directive list blocks indexing
///
/// Matches the lowercase directive only; `NOINDEX` is treated as an ordinary value.
pub fn is_noindex(robots: &str) -> bool {
    robots.contains("noindex")
}

/// Classify every inspected tag, in the fixed reporting order
pub fn classify_all(tags: &ExtractedTags) -> (Vec<MetaTag>, Vec<Recommendation>) {
    let classifications = [
        classify_title(tags.title.as_deref()),
        classify_description(tags.description.as_deref()),
        classify_canonical(tags.canonical.as_deref()),
        classify_robots(tags.robots.as_deref()),
        classify_og_title(tags.og_title.as_deref()),
        classify_og_description(tags.og_description.as_deref()),
        classify_og_image(tags.og_image.as_deref()),
        classify_twitter_card(tags.twitter_card.as_deref()),
    ];

    let mut meta_tags = Vec::with_capacity(classifications.len());
    let mut recommendations = Vec::new();
    for classification in classifications {
        meta_tags.push(classification.tag);
        recommendations.extend(classification.recommendation);
    }

    (meta_tags, recommendations)
}

pub fn classify_title(title: Option<&str>) -> Classification {
    let Some(title) = title else {
        return Classification::new(TAG_TITLE, None, TagStatus::Error, "Missing title tag")
            .recommend(
                RecommendationKind::Error,
                "Missing title tag",
                "Your page doesn't have a title tag. This is critical for SEO.",
            );
    };

    let len = char_len(title);
    if len < TITLE_MIN_CHARS {
        Classification::new(
            TAG_TITLE,
            Some(title),
            TagStatus::Warning,
            "Too short (under 30 characters)",
        )
        .recommend(
            RecommendationKind::Warning,
            "Title tag is too short",
            "Your title tag is under 30 characters. For better SEO, aim for 50-60 characters.",
        )
    } else if len > TITLE_MAX_CHARS {
        Classification::new(
            TAG_TITLE,
            Some(title),
            TagStatus::Warning,
            "Too long (over 60 characters)",
        )
        .recommend(
            RecommendationKind::Warning,
            "Title tag is too long",
            "Your title tag exceeds 60 characters. It may be truncated in search results.",
        )
    } else {
        Classification::new(TAG_TITLE, Some(title), TagStatus::Good, "Good length and format")
    }
}

pub fn classify_description(description: Option<&str>) -> Classification {
    let Some(description) = description else {
        return Classification::new(
            TAG_DESCRIPTION,
            None,
            TagStatus::Error,
            "Missing meta description",
        )
        .recommend(
            RecommendationKind::Error,
            "Missing meta description",
            "Your page doesn't have a meta description. This is important for CTR in search results.",
        );
    };

    let len = char_len(description);
    if len < DESCRIPTION_MIN_CHARS {
        Classification::new(
            TAG_DESCRIPTION,
            Some(description),
            TagStatus::Warning,
            "Too short (under 120 characters)",
        )
        .recommend(
            RecommendationKind::Warning,
            "Meta description is too short",
            "Your meta description is under 120 characters. Aim for 120-155 characters.",
        )
    } else if len > DESCRIPTION_MAX_CHARS {
        Classification::new(
            TAG_DESCRIPTION,
            Some(description),
            TagStatus::Warning,
            "Too long (over 155 characters)",
        )
        .recommend(
            RecommendationKind::Warning,
            "Meta description is too long",
            "Your meta description exceeds 155 characters. It may be truncated in search results.",
        )
    } else {
        Classification::new(
            TAG_DESCRIPTION,
            Some(description),
            TagStatus::Good,
            "Good length and format",
        )
    }
}

pub fn classify_canonical(canonical: Option<&str>) -> Classification {
    match canonical {
        Some(href) => Classification::new(
            TAG_CANONICAL,
            Some(href),
            TagStatus::Good,
            "Canonical URL is properly set",
        ),
        None => Classification::new(
            TAG_CANONICAL,
            None,
            TagStatus::Warning,
            "Missing canonical URL",
        )
        .recommend(
            RecommendationKind::Warning,
            "Missing canonical URL",
            "Your page doesn't have a canonical URL. This helps prevent duplicate content issues.",
        ),
    }
}

/// A missing robots tag is informational: crawlers default to index, follow
pub fn classify_robots(robots: Option<&str>) -> Classification {
    match robots {
        Some(directives) if is_noindex(directives) => Classification::new(
            TAG_ROBOTS,
            Some(directives),
            TagStatus::Warning,
            "Contains noindex directive",
        )
        .recommend(
            RecommendationKind::Warning,
            "Page is set to noindex",
            "Your page is set to not be indexed by search engines. If this is intentional, you can ignore this warning.",
        ),
        Some(directives) => {
            Classification::new(TAG_ROBOTS, Some(directives), TagStatus::Good, "Properly set")
        }
        None => Classification::new(
            TAG_ROBOTS,
            None,
            TagStatus::Info,
            "Not specified (defaults to index, follow)",
        ),
    }
}

pub fn classify_og_title(og_title: Option<&str>) -> Classification {
    match og_title {
        Some(value) => {
            Classification::new(TAG_OG_TITLE, Some(value), TagStatus::Good, "OG title is set")
        }
        None => Classification::new(TAG_OG_TITLE, None, TagStatus::Warning, "Missing OG title")
            .recommend(
                RecommendationKind::Warning,
                "Missing Open Graph title",
                "Add og:title meta tag for better social media sharing.",
            ),
    }
}

pub fn classify_og_description(og_description: Option<&str>) -> Classification {
    match og_description {
        Some(value) => Classification::new(
            TAG_OG_DESCRIPTION,
            Some(value),
            TagStatus::Good,
            "OG description is set",
        ),
        None => Classification::new(
            TAG_OG_DESCRIPTION,
            None,
            TagStatus::Warning,
            "Missing OG description",
        )
        .recommend(
            RecommendationKind::Warning,
            "Missing Open Graph description",
            "Add og:description meta tag for better social media sharing.",
        ),
    }
}

pub fn classify_og_image(og_image: Option<&str>) -> Classification {
    match og_image {
        Some(value) => {
            Classification::new(TAG_OG_IMAGE, Some(value), TagStatus::Good, "OG image is set")
        }
        None => Classification::new(TAG_OG_IMAGE, None, TagStatus::Error, "Missing OG image")
            .recommend(
                RecommendationKind::Error,
                "Missing Open Graph image",
                "Add og:image meta tag for better social media sharing. Without an image, your content will be less engaging on social platforms.",
            ),
    }
}

pub fn classify_twitter_card(twitter_card: Option<&str>) -> Classification {
    match twitter_card {
        Some(value) => Classification::new(
            TAG_TWITTER_CARD,
            Some(value),
            TagStatus::Good,
            "Twitter card is set",
        ),
        None => Classification::new(
            TAG_TWITTER_CARD,
            None,
            TagStatus::Warning,
            "Missing Twitter card",
        )
        .recommend(
            RecommendationKind::Warning,
            "Missing Twitter card",
            "Add twitter:card meta tag (recommended: summary_large_image) for better Twitter sharing.",
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_bounds() {
        let short = "a".repeat(29);
        let min = "a".repeat(30);
        let max = "a".repeat(60);
        let long = "a".repeat(61);

        assert_eq!(classify_title(Some(&short)).tag.status, TagStatus::Warning);
        assert_eq!(classify_title(Some(&min)).tag.status, TagStatus::Good);
        assert_eq!(classify_title(Some(&max)).tag.status, TagStatus::Good);

        let too_long = classify_title(Some(&long));
        assert_eq!(too_long.tag.status, TagStatus::Warning);
        assert_eq!(too_long.tag.status_message, "Too long (over 60 characters)");
        assert_eq!(
            too_long.recommendation.unwrap().title,
            "Title tag is too long"
        );
    }

    #[test]
    fn test_title_length_counts_characters() {
        // 30 characters, 60 bytes
        let title = "é".repeat(30);
        assert_eq!(classify_title(Some(&title)).tag.status, TagStatus::Good);
    }

    #[test]
    fn test_missing_title_is_error() {
        let c = classify_title(None);
        assert_eq!(c.tag.status, TagStatus::Error);
        assert!(c.tag.content.is_none());
        let rec = c.recommendation.unwrap();
        assert_eq!(rec.kind, RecommendationKind::Error);
        assert_eq!(rec.title, "Missing title tag");
    }

    #[test]
    fn test_description_bounds() {
        assert_eq!(
            classify_description(Some(&"d".repeat(119))).tag.status_message,
            "Too short (under 120 characters)"
        );
        assert_eq!(
            classify_description(Some(&"d".repeat(120))).tag.status,
            TagStatus::Good
        );
        assert_eq!(
            classify_description(Some(&"d".repeat(155))).tag.status,
            TagStatus::Good
        );
        assert_eq!(
            classify_description(Some(&"d".repeat(156))).tag.status_message,
            "Too long (over 155 characters)"
        );
        assert_eq!(classify_description(None).tag.status, TagStatus::Error);
    }

    #[test]
    fn test_robots() {
        let missing = classify_robots(None);
        assert_eq!(missing.tag.status, TagStatus::Info);
        assert!(missing.recommendation.is_none());

        let fine = classify_robots(Some("index, follow"));
        assert_eq!(fine.tag.status, TagStatus::Good);
        assert!(fine.recommendation.is_none());

        let upper = classify_robots(Some("NOINDEX, nofollow"));
        assert_eq!(upper.tag.status, TagStatus::Good);
        assert!(upper.recommendation.is_none());

        let blocked = classify_robots(Some("noindex, nofollow"));
        assert_eq!(blocked.tag.status, TagStatus::Warning);
        assert_eq!(
            blocked.recommendation.unwrap().title,
            "Page is set to noindex"
        );
    }

    #[test]
    fn test_missing_og_image_is_error() {
        let c = classify_og_image(None);
        assert_eq!(c.tag.status, TagStatus::Error);
        assert_eq!(c.recommendation.unwrap().kind, RecommendationKind::Error);
    }

    #[test]
    fn test_classify_all_order_and_recommendations() {
        let (tags, recs) = classify_all(&ExtractedTags::default());

        let names: Vec<&str> = tags.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                TAG_TITLE,
                TAG_DESCRIPTION,
                TAG_CANONICAL,
                TAG_ROBOTS,
                TAG_OG_TITLE,
                TAG_OG_DESCRIPTION,
                TAG_OG_IMAGE,
                TAG_TWITTER_CARD,
            ]
        );

        // Robots is the only tag without a recommendation when missing
        assert_eq!(recs.len(), 7);
        assert_eq!(recs[0].title, "Missing title tag");
        assert_eq!(recs[6].title, "Missing Twitter card");
    }
}
