//! Category and overall scoring
//!
//! Category scores are out of 10 and move in half-point steps. The overall
//! score is a weighted percentage of the four categories.

use super::extraction::ExtractedTags;
use super::rules::{
    char_len, is_noindex, DESCRIPTION_MAX_CHARS, DESCRIPTION_MIN_CHARS, TITLE_MAX_CHARS,
    TITLE_MIN_CHARS,
};
use super::types::Score;

const ESSENTIAL_WEIGHT: f64 = 0.35;
const SOCIAL_WEIGHT: f64 = 0.25;
const STRUCTURE_WEIGHT: f64 = 0.20;
const PERFORMANCE_WEIGHT: f64 = 0.20;

const STRUCTURE_BASE: f64 = 6.0;
const STRUCTURE_ESSENTIALS_BONUS: f64 = 2.0;

/// Without page-weight measurements every page gets the same performance score
pub const PERFORMANCE_SCORE: f64 = 7.0;

pub const TWITTER_CARD_LARGE_IMAGE: &str = "summary_large_image";

/// Compute all category scores and the weighted overall score
pub fn score(tags: &ExtractedTags) -> Score {
    let essential = essential_score(tags);
    let social = social_score(tags);
    let structure = structure_score(tags);
    let performance = PERFORMANCE_SCORE;

    Score {
        overall: overall_score(essential, social, structure, performance),
        essential,
        social,
        structure,
        performance,
    }
}

pub fn essential_score(tags: &ExtractedTags) -> f64 {
    let mut score = 0.0;

    if let Some(title) = &tags.title {
        score += if (TITLE_MIN_CHARS..=TITLE_MAX_CHARS).contains(&char_len(title)) {
            3.0
        } else {
            1.5
        };
    }

    if let Some(description) = &tags.description {
        score += if (DESCRIPTION_MIN_CHARS..=DESCRIPTION_MAX_CHARS).contains(&char_len(description)) {
            3.0
        } else {
            1.5
        };
    }

    // A relative canonical is allowed but often a mistake
    if let Some(canonical) = &tags.canonical {
        score += if canonical.starts_with("http") { 2.0 } else { 1.0 };
    }

    if let Some(robots) = &tags.robots {
        score += if is_noindex(robots) { 0.5 } else { 2.0 };
    }

    score
}

pub fn social_score(tags: &ExtractedTags) -> f64 {
    let mut score = 0.0;

    // Sharing platforms fall back to the plain title and description
    if tags.og_title.is_some() {
        score += 2.0;
    } else if tags.title.is_some() {
        score += 0.5;
    }

    if tags.og_description.is_some() {
        score += 2.0;
    } else if tags.description.is_some() {
        score += 0.5;
    }

    if let Some(image) = &tags.og_image {
        score += if image.starts_with("http") { 3.0 } else { 1.5 };
    }

    if let Some(card) = &tags.twitter_card {
        score += if card == TWITTER_CARD_LARGE_IMAGE { 3.0 } else { 2.0 };
    }

    score
}

pub fn structure_score(tags: &ExtractedTags) -> f64 {
    if tags.title.is_some() && tags.description.is_some() {
        STRUCTURE_BASE + STRUCTURE_ESSENTIALS_BONUS
    } else {
        STRUCTURE_BASE
    }
}

/// Weighted overall percentage, rounded to the nearest integer
pub fn overall_score(essential: f64, social: f64, structure: f64, performance: f64) -> u8 {
    let weighted = (essential / 10.0) * ESSENTIAL_WEIGHT
        + (social / 10.0) * SOCIAL_WEIGHT
        + (structure / 10.0) * STRUCTURE_WEIGHT
        + (performance / 10.0) * PERFORMANCE_WEIGHT;

    (weighted * 100.0).round().clamp(0.0, 100.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    fn perfect_tags() -> ExtractedTags {
        ExtractedTags {
            title: Some("t".repeat(45)),
            description: Some("d".repeat(140)),
            canonical: Some("https://example.com/".to_string()),
            robots: Some("index, follow".to_string()),
            og_title: Some("OG".to_string()),
            og_description: Some("OG description".to_string()),
            og_image: Some("https://example.com/og.png".to_string()),
            twitter_card: Some("summary_large_image".to_string()),
        }
    }

    #[test]
    fn test_perfect_page() {
        let score = score(&perfect_tags());
        assert_eq!(score.essential, 10.0);
        assert_eq!(score.social, 10.0);
        assert_eq!(score.structure, 8.0);
        assert_eq!(score.performance, 7.0);
        // 35 + 25 + 16 + 14
        assert_eq!(score.overall, 90);
    }

    #[test]
    fn test_empty_page() {
        let score = score(&ExtractedTags::default());
        assert_eq!(score.essential, 0.0);
        assert_eq!(score.social, 0.0);
        assert_eq!(score.structure, 6.0);
        assert_eq!(score.performance, 7.0);
        // 12 + 14
        assert_eq!(score.overall, 26);
    }

    #[test]
    fn test_partial_credit() {
        let tags = ExtractedTags {
            title: Some("short".to_string()),
            description: Some("also short".to_string()),
            canonical: Some("/relative".to_string()),
            robots: Some("noindex".to_string()),
            og_image: Some("/og.png".to_string()),
            twitter_card: Some("summary".to_string()),
            ..Default::default()
        };

        assert_eq!(essential_score(&tags), 1.5 + 1.5 + 1.0 + 0.5);
        // fallbacks for og:title and og:description
        assert_eq!(social_score(&tags), 0.5 + 0.5 + 1.5 + 2.0);
        assert_eq!(structure_score(&tags), 8.0);
    }

    #[test]
    fn test_structure_needs_both_essentials() {
        let tags = ExtractedTags {
            title: Some("only a title".to_string()),
            ..Default::default()
        };
        assert_eq!(structure_score(&tags), 6.0);
    }

    #[test]
    fn test_overall_rounding() {
        // 0.35 * 0.5 + 0.25 * 0.3 + 0.2 * 0.6 + 0.2 * 0.7 = 0.51
        assert_eq!(overall_score(5.0, 3.0, 6.0, 7.0), 51);
        assert_eq!(overall_score(10.0, 10.0, 10.0, 10.0), 100);
        assert_eq!(overall_score(0.0, 0.0, 0.0, 0.0), 0);
    }
}
