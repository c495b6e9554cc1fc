use crate::analyzer::{AnalysisResult, RecommendationKind, TagStatus};
use crate::error::Result;
use crate::report::{
    category_summaries, overall_verdict, tag_stats, Rating, SearchPreview, SocialPreview, TagGroup,
};
use std::io::Write;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

/// Prints an analysis report to stdout with colors and styling
pub fn print_report(result: &AnalysisResult) -> Result<()> {
    let mut stdout = StandardStream::stdout(ColorChoice::Auto);
    write_report(&mut stdout, result)
}

/// Writes an analysis report to any color-capable writer
pub fn write_report<W: WriteColor>(out: &mut W, result: &AnalysisResult) -> Result<()> {
    heading(out, &format!("SEO report for {}", result.url))?;

    let overall = result.score.overall;
    write!(out, "Overall score: ")?;
    with_color(out, rating_color(Rating::from_overall(overall)), true, |out| {
        write!(out, "{}%", overall)
    })?;
    writeln!(out)?;
    writeln!(out, "{}", overall_verdict(overall))?;

    heading(out, "Categories")?;
    for summary in category_summaries(&result.score) {
        write!(out, "  {:<16}", summary.category.name())?;
        with_color(out, rating_color(summary.rating), true, |out| {
            write!(out, "{:>4.1}/10  {}", summary.score, summary.rating.label())
        })?;
        writeln!(out)?;
        writeln!(out, "  {}", summary.summary)?;
    }

    heading(out, "Meta tags")?;
    for tag in &result.meta_tags {
        with_color(out, status_color(tag.status), true, |out| {
            write!(out, "  [{:<7}]", tag.status.as_str())
        })?;
        writeln!(out, " {:<22} {}", tag.name, tag.status_message)?;
        if let Some(content) = &tag.content {
            writeln!(out, "            {}", content)?;
        }
    }

    let stats = tag_stats(&result.meta_tags);
    heading(out, &format!("Tag insights ({} total tags)", stats.all.total))?;
    for group in TagGroup::ALL {
        let counts = stats.group(group);
        write!(out, "  {:<18} {} tags", group.name(), counts.total)?;
        for status in [TagStatus::Good, TagStatus::Warning, TagStatus::Error] {
            write!(out, "  ")?;
            with_color(out, status_color(status), false, |out| {
                write!(out, "{} {}", counts.count(status), status.as_str())
            })?;
        }
        if counts.all_good() {
            write!(out, "  ")?;
            with_color(out, Color::Green, true, |out| write!(out, "All Good"))?;
        }
        writeln!(out)?;
    }

    heading(out, "Recommendations")?;
    if result.recommendations.is_empty() {
        writeln!(out, "  No recommendations. All inspected tags look good.")?;
    }
    for (i, rec) in result.recommendations.iter().enumerate() {
        let color = match rec.kind {
            RecommendationKind::Error => Color::Red,
            RecommendationKind::Warning => Color::Yellow,
            RecommendationKind::Info => Color::Blue,
        };
        write!(out, "  {}. ", i + 1)?;
        with_color(out, color, true, |out| write!(out, "{}", rec.title))?;
        writeln!(out)?;
        writeln!(out, "     {}", rec.description)?;
    }

    let search = SearchPreview::from_result(result);
    heading(out, "Search preview")?;
    with_color(out, Color::Blue, true, |out| writeln!(out, "  {}", search.title))?;
    with_color(out, Color::Green, false, |out| writeln!(out, "  {}", search.url))?;
    writeln!(out, "  {}", search.description)?;

    let social = SocialPreview::from_result(result);
    heading(out, "Social preview")?;
    writeln!(out, "  {}", social.hostname)?;
    with_color(out, Color::White, true, |out| writeln!(out, "  {}", social.title))?;
    writeln!(out, "  {}", social.description)?;
    writeln!(
        out,
        "  image: {}",
        social.image.as_deref().unwrap_or("No Image Available")
    )?;

    out.flush()?;
    Ok(())
}

fn heading<W: WriteColor>(out: &mut W, text: &str) -> Result<()> {
    writeln!(out)?;
    with_color(out, Color::Cyan, true, |out| writeln!(out, "{}", text))
}

fn with_color<W, F>(out: &mut W, color: Color, bold: bool, body: F) -> Result<()>
where
    W: WriteColor,
    F: FnOnce(&mut W) -> std::io::Result<()>,
{
    let mut spec = ColorSpec::new();
    spec.set_fg(Some(color)).set_bold(bold);
    out.set_color(&spec)?;
    body(out)?;
    out.reset()?;
    Ok(())
}

fn rating_color(rating: Rating) -> Color {
    match rating {
        Rating::Good => Color::Green,
        Rating::NeedsImprovement => Color::Yellow,
        Rating::Poor => Color::Red,
    }
}

fn status_color(status: TagStatus) -> Color {
    match status {
        TagStatus::Good => Color::Green,
        TagStatus::Warning => Color::Yellow,
        TagStatus::Error => Color::Red,
        TagStatus::Info => Color::Blue,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::analyze;
    use termcolor::Buffer;

    #[test]
    fn test_report_contents() {
        let html = r#"<html><head><title>Tiny</title>
            <meta name="robots" content="noindex"></head></html>"#;
        let result = analyze("https://example.com/", html).unwrap();

        let mut buffer = Buffer::no_color();
        write_report(&mut buffer, &result).unwrap();
        let text = String::from_utf8(buffer.into_inner()).unwrap();

        assert!(text.contains("SEO report for https://example.com/"));
        assert!(text.contains(&format!("Overall score: {}%", result.score.overall)));
        assert!(text.contains("Essential Tags"));
        assert!(text.contains("[warning] title"));
        assert!(text.contains("Page is set to noindex"));
        assert!(text.contains("Tag insights (8 total tags)"));
        assert!(text.contains("Technical Tags"));
        assert!(text.contains("image: No Image Available"));
    }

    #[test]
    fn test_report_without_recommendations() {
        let description = "d".repeat(130);
        let html = format!(
            r#"<html><head><title>A title that is comfortably long enough</title>
            <meta name="description" content="{description}">
            <link rel="canonical" href="https://example.com/">
            <meta name="robots" content="index">
            <meta property="og:title" content="t">
            <meta property="og:description" content="d">
            <meta property="og:image" content="https://example.com/i.png">
            <meta name="twitter:card" content="summary">
            </head></html>"#
        );
        let result = analyze("https://example.com/", &html).unwrap();

        let mut buffer = Buffer::no_color();
        write_report(&mut buffer, &result).unwrap();
        let text = String::from_utf8(buffer.into_inner()).unwrap();

        assert!(text.contains("No recommendations."));
        assert_eq!(text.matches("All Good").count(), 2);
    }
}
