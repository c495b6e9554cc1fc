//! Meta tag extraction from raw HTML

use crate::error::{Error, Result};
use scraper::{Html, Selector};

/// The raw tag values found on a page
///
/// Empty values are treated as absent. Everything else is kept verbatim,
/// including surrounding whitespace.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedTags {
    pub title: Option<String>,
    pub description: Option<String>,
    pub canonical: Option<String>,
    pub robots: Option<String>,
    pub og_title: Option<String>,
    pub og_description: Option<String>,
    pub og_image: Option<String>,
    pub twitter_card: Option<String>,
}

/// Extract the inspected tags from an HTML document
///
/// # Arguments
///
/// * `html` - The HTML of the page
///
/// # Returns
///
/// The extracted tag values
pub fn extract_tags(html: &str) -> Result<ExtractedTags> {
    let document = Html::parse_document(html);

    let title_selector = parse_selector("title")?;
    let title = document
        .select(&title_selector)
        .next()
        .map(|element| element.text().collect::<String>())
        .and_then(non_empty);

    Ok(ExtractedTags {
        title,
        description: first_attr(&document, r#"meta[name="description"]"#, "content")?,
        canonical: first_attr(&document, r#"link[rel="canonical"]"#, "href")?,
        robots: first_attr(&document, r#"meta[name="robots"]"#, "content")?,
        og_title: first_attr(&document, r#"meta[property="og:title"]"#, "content")?,
        og_description: first_attr(&document, r#"meta[property="og:description"]"#, "content")?,
        og_image: first_attr(&document, r#"meta[property="og:image"]"#, "content")?,
        twitter_card: first_attr(&document, r#"meta[name="twitter:card"]"#, "content")?,
    })
}

fn parse_selector(selector: &str) -> Result<Selector> {
    Selector::parse(selector)
        .map_err(|e| Error::HtmlParse(format!("Failed to parse selector '{}': {}", selector, e)))
}

/// Value of `attr` on the first element matching `selector`
fn first_attr(document: &Html, selector: &str, attr: &str) -> Result<Option<String>> {
    let selector = parse_selector(selector)?;

    Ok(document
        .select(&selector)
        .next()
        .and_then(|element| element.value().attr(attr))
        .map(str::to_string)
        .and_then(non_empty))
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() { None } else { Some(value) }
}
