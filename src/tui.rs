//! # Terminal Dashboard Module
//!
//! A terminal rendition of the analysis dashboard: URL input, score overview,
//! category breakdown, meta tag table, recommendations, and search and social
//! previews.
//!
//! ## Key Components
//!
//! - `app`: dashboard state and key handling
//! - `event`: terminal, tick and analysis events on one channel
//! - `logging`: file-based tracing while the terminal is in raw mode
//! - `ui`: layout and rendering
//!
//! Analyses run on a background task so the interface keeps redrawing while
//! a page is fetched.

pub mod app;
pub mod event;
pub mod logging;
pub mod ui;

use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use metainspector::fetcher::{fetch_and_analyze, PageFetcher};
use metainspector::prelude::Result;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{error, info};

use crate::tui::app::App;
use crate::tui::event::{AppEvent, Event};
use crate::tui::ui::draw;

/// Run the dashboard, optionally analyzing `initial_url` right away
pub async fn run(fetcher: PageFetcher, initial_url: Option<String>) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new();

    // Analysis worker
    let (analyze_tx, mut analyze_rx) = mpsc::unbounded_channel::<String>();
    let event_sender = app.event_sender();
    let fetcher = Arc::new(fetcher);
    tokio::spawn(async move {
        while let Some(url) = analyze_rx.recv().await {
            let event = match fetch_and_analyze(&fetcher, &url).await {
                Ok(result) => AppEvent::AnalysisComplete(Box::new(result)),
                Err(e) => {
                    error!("Analysis of {} failed: {}", url, e);
                    AppEvent::AnalysisFailed(e.to_string())
                }
            };
            let _ = event_sender.send(Event::App(event));
        }
    });

    if let Some(url) = initial_url {
        app.submit(&url);
    }

    terminal.clear()?;
    info!("Dashboard started");

    while !app.should_quit {
        terminal.draw(|f| draw(f, &mut app))?;

        match app.next_event().await {
            Some(Event::App(AppEvent::Submit(url))) => {
                let _ = analyze_tx.send(url);
            }
            Some(_) => {}
            None => break,
        }
    }

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    Ok(())
}
