use metainspector::analyzer::{AnalysisResult, RecommendationKind, TagStatus};
use metainspector::report::{
    category_summaries, overall_verdict, priority_tags, tag_stats, truncate_text, Category,
    Rating, SearchPreview, SocialPreview, TagGroup,
};
use ratatui::{
    layout::{Constraint, Direction, Layout, Margin, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{
        Block, Borders, Cell, Gauge, Paragraph, Row, Scrollbar, ScrollbarOrientation,
        ScrollbarState, Table, Wrap,
    },
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::tui::app::App;

const SPINNER_FRAMES: [&str; 8] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧"];

/// Draw the UI
pub fn draw(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // URL input
            Constraint::Min(1),    // Results
            Constraint::Length(1), // Status line
        ])
        .split(f.area());

    render_input(f, app, chunks[0]);

    let scroll_length = match &app.result {
        Some(result) => render_result(f, app, result, chunks[1]),
        None => {
            render_initial(f, app, chunks[1]);
            0
        }
    };
    app.set_scroll_length(scroll_length);

    render_status(f, app, chunks[2]);
}

fn title_style() -> Style {
    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
}

fn titled_block(title: &str) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(title.to_string(), title_style()))
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

/// Render the URL input field
fn render_input(f: &mut Frame, app: &App, area: Rect) {
    let input_block = titled_block("URL  (Enter: analyze, Ctrl+R: re-analyze, Esc: quit)");
    let inner_area = input_block.inner(area);

    let input = Paragraph::new(app.input.as_str()).block(input_block);
    f.render_widget(input, area);

    let cursor_x = app.input_before_cursor().width() as u16;
    f.set_cursor_position((inner_area.x + cursor_x, inner_area.y));
}

/// Render the screen shown before the first analysis completes
fn render_initial(f: &mut Frame, app: &App, area: Rect) {
    let mut lines = vec![
        Line::from(Span::styled("SEO Meta Tag Inspector", title_style())),
        Line::from(""),
        Line::from("Type a website address above and press Enter."),
        Line::from("The page is fetched once and its title, description, canonical,"),
        Line::from("robots, Open Graph and Twitter Card tags are scored."),
        Line::from(""),
        Line::from(Span::styled(
            "Try: example.com, github.com, rust-lang.org",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    if app.is_loading {
        lines.push(Line::from(""));
        lines.push(spinner_line(app));
    }
    if let Some(error) = &app.error {
        lines.push(Line::from(""));
        lines.push(error_line(error));
    }

    let paragraph = Paragraph::new(lines)
        .block(titled_block("Welcome"))
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, area);
}

fn spinner_line(app: &App) -> Line<'static> {
    Line::from(Span::styled(
        format!("{} Analyzing...", SPINNER_FRAMES[app.spinner_frame]),
        Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
    ))
}

fn error_line(error: &str) -> Line<'static> {
    Line::from(Span::styled(
        format!("Error: {}", error),
        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
    ))
}

/// Render a completed analysis, returning the recommendations panel's line count
fn render_result(f: &mut Frame, app: &App, result: &AnalysisResult, area: Rect) -> usize {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(5), Constraint::Min(1)])
        .split(area);

    render_score_overview(f, result, rows[0]);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(rows[1]);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(11),
            Constraint::Length(5),
            Constraint::Min(3),
        ])
        .split(columns[0]);

    render_meta_tags(f, result, left[0]);
    render_tag_insights(f, result, left[1]);
    let scroll_length = render_recommendations(f, app, result, left[2]);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(6),
            Constraint::Length(6),
            Constraint::Length(7),
        ])
        .split(columns[1]);

    render_categories(f, result, right[0]);
    render_search_preview(f, result, right[1]);
    render_social_preview(f, result, right[2]);

    scroll_length
}

/// Overall gauge with verdict, then one gauge per category
fn render_score_overview(f: &mut Frame, result: &AnalysisResult, area: Rect) {
    let cells = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(32),
            Constraint::Percentage(17),
            Constraint::Percentage(17),
            Constraint::Percentage(17),
            Constraint::Percentage(17),
        ])
        .split(area);

    let overall = result.score.overall;
    let overall_block = titled_block("Overall Score");
    let overall_inner = overall_block.inner(cells[0]);
    f.render_widget(overall_block, cells[0]);

    let overall_rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(1)])
        .split(overall_inner);
    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(rating_color(Rating::from_overall(overall))))
        .percent(u16::from(overall))
        .label(format!("{}%", overall));
    f.render_widget(gauge, overall_rows[0]);
    f.render_widget(
        Paragraph::new(overall_verdict(overall)).wrap(Wrap { trim: true }),
        overall_rows[1],
    );

    for (cell, category) in cells[1..].iter().zip(Category::ALL) {
        let value = category.score(&result.score);
        let ratio = (value / 10.0).clamp(0.0, 1.0);
        let gauge = Gauge::default()
            .block(titled_block(category.name()))
            .gauge_style(Style::default().fg(rating_color(Rating::from_category(value))))
            .ratio(ratio)
            .label(format!("{:.1}/10", value));
        f.render_widget(gauge, *cell);
    }
}

/// Table of every inspected tag
fn render_meta_tags(f: &mut Frame, result: &AnalysisResult, area: Rect) {
    let header = Row::new(vec!["Tag", "Status", "Content"])
        .style(Style::default().add_modifier(Modifier::BOLD));

    let rows = result.meta_tags.iter().map(|tag| {
        let content = tag
            .content
            .as_deref()
            .map(|c| truncate_text(c, 60))
            .unwrap_or_else(|| "-".to_string());
        Row::new(vec![
            Cell::from(tag.name.clone()),
            Cell::from(tag.status.as_str()).style(Style::default().fg(status_color(tag.status))),
            Cell::from(content),
        ])
    });

    let title = format!("Meta Tags ({} inspected)", result.meta_tags.len());
    let table = Table::new(
        rows,
        [
            Constraint::Length(21),
            Constraint::Length(8),
            Constraint::Min(10),
        ],
    )
    .header(header)
    .block(titled_block(&title));

    f.render_widget(table, area);
}

/// Status counts per tag group
fn render_tag_insights(f: &mut Frame, result: &AnalysisResult, area: Rect) {
    let stats = tag_stats(&result.meta_tags);

    let lines: Vec<Line> = TagGroup::ALL
        .iter()
        .map(|&group| {
            let counts = stats.group(group);
            let mut spans = vec![
                Span::styled(
                    format!("{:<18}", group.name()),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::raw(format!("{:>2} tags ", counts.total)),
            ];
            for status in [TagStatus::Good, TagStatus::Warning, TagStatus::Error] {
                spans.push(Span::styled(
                    format!(
                        " {} {} ({}%)",
                        counts.count(status),
                        status.as_str(),
                        counts.percentage(status)
                    ),
                    Style::default().fg(status_color(status)),
                ));
            }
            if counts.all_good() {
                spans.push(Span::styled(
                    "  All Good",
                    Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
                ));
            }
            Line::from(spans)
        })
        .collect();

    let title = format!("Tag Insights ({} total tags)", stats.all.total);
    f.render_widget(Paragraph::new(lines).block(titled_block(&title)), area);
}

/// Lines of the recommendations panel, before wrapping
fn recommendation_lines(result: &AnalysisResult) -> Vec<Line<'static>> {
    let mut lines: Vec<Line<'static>> = Vec::new();

    if result.recommendations.is_empty() {
        lines.push(Line::from(Span::styled(
            "No recommendations. All inspected tags look good.",
            Style::default().fg(Color::Green),
        )));
    } else {
        let priority: Vec<String> = priority_tags(result)
            .iter()
            .map(|tag| tag.name.clone())
            .collect();
        lines.push(Line::from(vec![
            Span::styled("Fix first: ", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(priority.join(", ")),
        ]));
    }

    for rec in &result.recommendations {
        let (marker, color) = match rec.kind {
            RecommendationKind::Error => ("✗", Color::Red),
            RecommendationKind::Warning => ("!", Color::Yellow),
            RecommendationKind::Info => ("i", Color::Blue),
        };
        lines.push(Line::from(vec![
            Span::styled(
                format!("{} ", marker),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                rec.title.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
        ]));
        lines.push(Line::from(Span::raw(format!("  {}", rec.description))));
        lines.push(Line::from(""));
    }

    lines
}

/// Scrollable list of recommendations, with the top priority tags first.
///
/// Returns the wrapped line count, which bounds scrolling.
fn render_recommendations(
    f: &mut Frame,
    app: &App,
    result: &AnalysisResult,
    area: Rect,
) -> usize {
    let block = titled_block(&format!(
        "Recommendations ({})",
        result.recommendations.len()
    ));
    let inner_width = block.inner(area).width;

    let paragraph = Paragraph::new(recommendation_lines(result)).wrap(Wrap { trim: true });
    let scroll_length = paragraph.line_count(inner_width);
    let position = app.scroll_position.min(scroll_length.saturating_sub(1));
    let paragraph = paragraph.block(block).scroll((position as u16, 0));

    let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
        .begin_symbol(Some("↑"))
        .end_symbol(Some("↓"));
    let mut scrollbar_state = ScrollbarState::default()
        .content_length(scroll_length)
        .position(position);

    f.render_widget(paragraph, area);
    f.render_stateful_widget(
        scrollbar,
        area.inner(Margin {
            vertical: 1,
            horizontal: 0,
        }),
        &mut scrollbar_state,
    );

    scroll_length
}

/// Rating and summary per category
fn render_categories(f: &mut Frame, result: &AnalysisResult, area: Rect) {
    let mut lines = Vec::new();
    for summary in category_summaries(&result.score) {
        lines.push(Line::from(vec![
            Span::styled(
                format!("{:<15}", summary.category.name()),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("{:>4.1}/10 {}", summary.score, summary.rating.label()),
                Style::default().fg(rating_color(summary.rating)),
            ),
        ]));
        lines.push(Line::from(Span::styled(
            summary.summary,
            Style::default().fg(Color::Gray),
        )));
    }

    let paragraph = Paragraph::new(lines)
        .block(titled_block("Category Breakdown"))
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, area);
}

fn render_search_preview(f: &mut Frame, result: &AnalysisResult, area: Rect) {
    let preview = SearchPreview::from_result(result);
    let lines = vec![
        Line::from(Span::styled(
            truncate_text(&preview.title, 60),
            Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(preview.url, Style::default().fg(Color::Green))),
        Line::from(truncate_text(&preview.description, 160)),
    ];

    let paragraph = Paragraph::new(lines)
        .block(titled_block("Search Preview"))
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, area);
}

fn render_social_preview(f: &mut Frame, result: &AnalysisResult, area: Rect) {
    let preview = SocialPreview::from_result(result);
    let image = preview
        .image
        .unwrap_or_else(|| "No Image Available".to_string());
    let lines = vec![
        Line::from(Span::styled(
            preview.hostname,
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(Span::styled(
            preview.title,
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(truncate_text(&preview.description, 160)),
        Line::from(Span::styled(
            format!("image: {}", image),
            Style::default().fg(Color::Gray),
        )),
    ];

    let paragraph = Paragraph::new(lines)
        .block(titled_block("Social Preview"))
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, area);
}

/// One-line status bar at the bottom
fn render_status(f: &mut Frame, app: &App, area: Rect) {
    let line = if app.is_loading {
        spinner_line(app)
    } else if let (Some(error), Some(_)) = (&app.error, &app.result) {
        error_line(error)
    } else if let (Some(result), Some(at)) = (&app.result, &app.analyzed_at) {
        Line::from(Span::styled(
            format!("Analyzed {} at {}", result.url, at.format("%Y-%m-%d %H:%M:%S")),
            Style::default().fg(Color::DarkGray),
        ))
    } else {
        Line::from("")
    };

    f.render_widget(Paragraph::new(line), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::event::EventHandler;
    use metainspector::analyzer::analyze;
    use ratatui::{backend::TestBackend, Terminal};

    fn rendered(app: &mut App) -> String {
        let backend = TestBackend::new(140, 45);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| draw(f, app)).unwrap();

        let buffer = terminal.backend().buffer();
        let width = buffer.area.width as usize;
        let mut text = String::new();
        for row in buffer.content().chunks(width) {
            for cell in row {
                text.push_str(cell.symbol());
            }
            text.push('\n');
        }
        text
    }

    #[tokio::test]
    async fn test_draw_initial_screen() {
        let mut app = App::with_event_handler(EventHandler::detached());
        app.error = Some("Please enter a valid URL".to_string());

        let text = rendered(&mut app);
        assert!(text.contains("SEO Meta Tag Inspector"));
        assert!(text.contains("Error: Please enter a valid URL"));
    }

    #[tokio::test]
    async fn test_draw_result() {
        let mut app = App::with_event_handler(EventHandler::detached());
        app.result = Some(
            analyze(
                "https://example.com/",
                "<html><head><title>Example</title></head></html>",
            )
            .unwrap(),
        );

        let text = rendered(&mut app);
        assert!(text.contains("Overall Score"));
        assert!(text.contains("Meta Tags (8 inspected)"));
        assert!(text.contains("Tag Insights (8 total tags)"));
        assert!(text.contains("Social Media Tags"));
        assert!(text.contains("meta[og:image]"));
        assert!(text.contains("Search Preview"));
        assert!(text.contains("example.com"));
    }

    #[tokio::test]
    async fn test_scroll_length_follows_wrapped_lines() {
        let mut app = App::with_event_handler(EventHandler::detached());
        let result = analyze("https://example.com/", "<html></html>").unwrap();
        let unwrapped = recommendation_lines(&result).len();
        app.result = Some(result);

        rendered(&mut app);
        let length = app.scroll_length();
        // long descriptions wrap in the narrow panel
        assert!(length > unwrapped);

        app.scroll_by(1000);
        assert_eq!(app.scroll_position, length - 1);

        // the clamped position survives a redraw
        rendered(&mut app);
        assert_eq!(app.scroll_position, length - 1);
    }
}
