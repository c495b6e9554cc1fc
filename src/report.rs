//! Presentation helpers shared by the terminal report and the dashboard
//!
//! Ratings, verdict texts, tag statistics, and the search and social previews
//! derived from an [`AnalysisResult`].

use crate::analyzer::rules::{
    TAG_CANONICAL, TAG_DESCRIPTION, TAG_OG_DESCRIPTION, TAG_OG_IMAGE, TAG_OG_TITLE, TAG_ROBOTS,
    TAG_TITLE,
};
use crate::analyzer::{AnalysisResult, MetaTag, Score, TagStatus};
use url::Url;

const NO_TITLE: &str = "No Title";
const NO_DESCRIPTION: &str = "No description available.";

/// Three-level rating used for both category and overall scores
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rating {
    Good,
    NeedsImprovement,
    Poor,
}

impl Rating {
    /// Rate a category score out of 10
    pub fn from_category(score: f64) -> Self {
        if score >= 8.0 {
            Rating::Good
        } else if score >= 6.0 {
            Rating::NeedsImprovement
        } else {
            Rating::Poor
        }
    }

    /// Rate an overall percentage
    pub fn from_overall(overall: u8) -> Self {
        if overall >= 80 {
            Rating::Good
        } else if overall >= 60 {
            Rating::NeedsImprovement
        } else {
            Rating::Poor
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Rating::Good => "Good",
            Rating::NeedsImprovement => "Needs Improvement",
            Rating::Poor => "Poor",
        }
    }
}

/// One sentence summarizing the overall score
pub fn overall_verdict(overall: u8) -> &'static str {
    match Rating::from_overall(overall) {
        Rating::Good => "Great work! Your site has strong SEO fundamentals.",
        Rating::NeedsImprovement => "Good start, but improvements needed for optimal SEO.",
        Rating::Poor => "Significant SEO improvements needed for better visibility.",
    }
}

/// Score categories, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Essential,
    Social,
    Structure,
    Performance,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Essential,
        Category::Social,
        Category::Structure,
        Category::Performance,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Category::Essential => "Essential Tags",
            Category::Social => "Social Media",
            Category::Structure => "Page Structure",
            Category::Performance => "Performance",
        }
    }

    /// This category's value in a score
    pub fn score(self, score: &Score) -> f64 {
        match self {
            Category::Essential => score.essential,
            Category::Social => score.social,
            Category::Structure => score.structure,
            Category::Performance => score.performance,
        }
    }

    /// Summary text for the category at the given rating
    pub fn summary(self, rating: Rating) -> &'static str {
        use Category::*;
        use Rating::*;

        match (self, rating) {
            (Essential, Good) => "Essential tags are well-optimized. Your title, description, and canonical tags meet best practices.",
            (Essential, NeedsImprovement) => "Your essential tags need some improvement. Check the recommendations for details.",
            (Essential, Poor) => "Several essential tags are missing or poorly optimized. These are critical for SEO success.",
            (Social, Good) => "Social sharing tags are properly set up, ensuring good visibility on social platforms.",
            (Social, NeedsImprovement) => "Your social tags need some improvement to maximize engagement on social platforms.",
            (Social, Poor) => "Social sharing tags are missing or incomplete, reducing visibility on social media.",
            (Structure, Good) => "Your page structure is well-optimized for search engines and users.",
            (Structure, NeedsImprovement) => "Page structure has some issues that could be improved for better SEO.",
            (Structure, Poor) => "Page structure needs significant improvement for better search engine visibility.",
            (Performance, Good) => "Performance metrics look good, which positively impacts your SEO.",
            (Performance, NeedsImprovement) => "Some performance improvements could help boost your SEO rankings.",
            (Performance, Poor) => "Poor performance metrics may be hurting your SEO rankings.",
        }
    }
}

/// A rated category ready for display
#[derive(Debug, Clone, PartialEq)]
pub struct CategorySummary {
    pub category: Category,
    pub score: f64,
    pub rating: Rating,
    pub summary: &'static str,
}

/// Rate every category of a score
pub fn category_summaries(score: &Score) -> Vec<CategorySummary> {
    Category::ALL
        .iter()
        .map(|&category| {
            let value = category.score(score);
            let rating = Rating::from_category(value);
            CategorySummary {
                category,
                score: value,
                rating,
                summary: category.summary(rating),
            }
        })
        .collect()
}

/// Up to three tags that need attention, errors before warnings
pub fn priority_tags(result: &AnalysisResult) -> Vec<&MetaTag> {
    let mut tags: Vec<&MetaTag> = result
        .meta_tags
        .iter()
        .filter(|tag| tag.status.needs_attention())
        .collect();

    // stable, so tag order is kept within each status
    tags.sort_by_key(|tag| tag.status != TagStatus::Error);
    tags.truncate(3);
    tags
}

/// Grouping of inspected tags for the insight statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagGroup {
    Essential,
    Social,
    Other,
}

impl TagGroup {
    pub const ALL: [TagGroup; 3] = [TagGroup::Essential, TagGroup::Social, TagGroup::Other];

    pub fn name(self) -> &'static str {
        match self {
            TagGroup::Essential => "Essential Tags",
            TagGroup::Social => "Social Media Tags",
            TagGroup::Other => "Technical Tags",
        }
    }

    /// Group a tag by its display name
    pub fn of(name: &str) -> Self {
        if [TAG_TITLE, TAG_DESCRIPTION, TAG_CANONICAL, TAG_ROBOTS].contains(&name) {
            TagGroup::Essential
        } else if name.contains("og:") || name.contains("twitter:") {
            TagGroup::Social
        } else {
            TagGroup::Other
        }
    }
}

/// Per-status tag counts for one group
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusCounts {
    pub good: usize,
    pub warning: usize,
    pub error: usize,
    pub info: usize,
    pub total: usize,
}

impl StatusCounts {
    fn add(&mut self, status: TagStatus) {
        match status {
            TagStatus::Good => self.good += 1,
            TagStatus::Warning => self.warning += 1,
            TagStatus::Error => self.error += 1,
            TagStatus::Info => self.info += 1,
        }
        self.total += 1;
    }

    pub fn count(&self, status: TagStatus) -> usize {
        match status {
            TagStatus::Good => self.good,
            TagStatus::Warning => self.warning,
            TagStatus::Error => self.error,
            TagStatus::Info => self.info,
        }
    }

    /// Share of the group with the given status, as a rounded percentage
    pub fn percentage(&self, status: TagStatus) -> u8 {
        percentage(self.count(status), self.total)
    }

    /// A non-empty group where every tag is good
    pub fn all_good(&self) -> bool {
        self.total > 0 && self.good == self.total
    }
}

/// Status counts per tag group, plus the totals across all tags
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TagStats {
    pub essential: StatusCounts,
    pub social: StatusCounts,
    pub other: StatusCounts,
    pub all: StatusCounts,
}

impl TagStats {
    pub fn group(&self, group: TagGroup) -> &StatusCounts {
        match group {
            TagGroup::Essential => &self.essential,
            TagGroup::Social => &self.social,
            TagGroup::Other => &self.other,
        }
    }
}

/// Count tag statuses per group
pub fn tag_stats(tags: &[MetaTag]) -> TagStats {
    let mut stats = TagStats::default();
    for tag in tags {
        let group = match TagGroup::of(&tag.name) {
            TagGroup::Essential => &mut stats.essential,
            TagGroup::Social => &mut stats.social,
            TagGroup::Other => &mut stats.other,
        };
        group.add(tag.status);
        stats.all.add(tag.status);
    }
    stats
}

/// `count` out of `total` as a rounded percentage; 0 when `total` is 0
pub fn percentage(count: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    ((count as f64 / total as f64) * 100.0).round().clamp(0.0, 100.0) as u8
}

/// How the page would look in a search result listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchPreview {
    pub title: String,
    pub url: String,
    pub description: String,
}

impl SearchPreview {
    pub fn from_result(result: &AnalysisResult) -> Self {
        Self {
            title: result.title.clone().unwrap_or_else(|| NO_TITLE.to_string()),
            url: result.url.clone(),
            description: result
                .description
                .clone()
                .unwrap_or_else(|| NO_DESCRIPTION.to_string()),
        }
    }
}

/// How the page would look when shared on a social platform
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SocialPreview {
    pub hostname: String,
    pub title: String,
    pub description: String,
    pub image: Option<String>,
}

impl SocialPreview {
    /// Open Graph values take precedence over the plain title and description
    pub fn from_result(result: &AnalysisResult) -> Self {
        let content = |name: &str| result.tag(name).and_then(|tag| tag.content.clone());

        Self {
            hostname: hostname(&result.url),
            title: content(TAG_OG_TITLE)
                .or_else(|| content(TAG_TITLE))
                .unwrap_or_else(|| NO_TITLE.to_string()),
            description: content(TAG_OG_DESCRIPTION)
                .or_else(|| content(TAG_DESCRIPTION))
                .unwrap_or_else(|| NO_DESCRIPTION.to_string()),
            image: content(TAG_OG_IMAGE),
        }
    }
}

/// Host part of a URL, or the input unchanged when it does not parse
pub fn hostname(url: &str) -> String {
    Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_string))
        .unwrap_or_else(|| url.to_string())
}

/// Truncate to `max_chars` characters, appending "..." when cut
pub fn truncate_text(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut truncated: String = text.chars().take(max_chars).collect();
    truncated.push_str("...");
    truncated
}
