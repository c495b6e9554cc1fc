use chrono::{DateTime, Local};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEventKind};
use metainspector::analyzer::AnalysisResult;
use metainspector::fetcher::normalize_url;
use metainspector::Error;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::tui::event::{AppEvent, Event, EventHandler};

/// Dashboard state
pub struct App {
    /// Current input text
    pub input: String,
    /// Cursor position in the input field, in characters
    pub cursor_position: usize,
    /// Flag to indicate if the application should quit
    pub should_quit: bool,
    /// Flag to indicate if an analysis is running
    pub is_loading: bool,
    /// Counter for spinner animation frames
    pub spinner_frame: usize,
    /// URL of the most recent submission
    pub last_url: Option<String>,
    /// Most recent successful analysis
    pub result: Option<AnalysisResult>,
    /// When `result` was produced
    pub analyzed_at: Option<DateTime<Local>>,
    /// Most recent error, cleared on the next submission
    pub error: Option<String>,
    /// Current scroll position of the recommendations panel
    pub scroll_position: usize,
    /// Wrapped line count of the recommendations panel, as last drawn
    scroll_length: usize,
    /// Event handler
    event_handler: EventHandler,
}

impl App {
    /// Create a new dashboard reading events from the terminal
    pub fn new() -> Self {
        Self::with_event_handler(EventHandler::new())
    }

    pub fn with_event_handler(event_handler: EventHandler) -> Self {
        Self {
            input: String::new(),
            cursor_position: 0,
            should_quit: false,
            is_loading: false,
            spinner_frame: 0,
            last_url: None,
            result: None,
            analyzed_at: None,
            error: None,
            scroll_position: 0,
            scroll_length: 0,
            event_handler,
        }
    }

    /// Get the next event
    pub async fn next_event(&mut self) -> Option<Event> {
        let event = self.event_handler.next().await?;
        match &event {
            Event::Terminal(term_event) => self.handle_terminal_event(term_event),
            Event::Tick => self.tick_spinner(),
            Event::App(app_event) => self.handle_app_event(app_event),
        }
        Some(event)
    }

    /// Get the event sender
    pub fn event_sender(&self) -> mpsc::UnboundedSender<Event> {
        self.event_handler.sender()
    }

    /// Queue an analysis of raw user input
    pub fn submit(&mut self, raw: &str) {
        match normalize_url(raw) {
            Ok(url) => self.send(AppEvent::Submit(url)),
            Err(Error::InvalidUrl(message)) => self.error = Some(message),
            Err(e) => self.error = Some(e.to_string()),
        }
    }

    /// Queue a new analysis of the last submitted URL
    pub fn reanalyze(&mut self) {
        if self.is_loading {
            return;
        }
        if let Some(url) = self.last_url.clone() {
            self.send(AppEvent::Submit(url));
        }
    }

    fn send(&self, event: AppEvent) {
        if let Err(e) = self.event_handler.sender().send(Event::App(event)) {
            warn!("Failed to queue event: {}", e);
        }
    }

    /// Handle terminal events
    fn handle_terminal_event(&mut self, event: &crossterm::event::Event) {
        match event {
            crossterm::event::Event::Key(key) => self.handle_key_event(*key),
            crossterm::event::Event::Mouse(mouse) => match mouse.kind {
                MouseEventKind::ScrollUp => self.scroll_by(-3),
                MouseEventKind::ScrollDown => self.scroll_by(3),
                _ => {}
            },
            _ => {}
        }
    }

    /// Handle application events
    fn handle_app_event(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Submit(url) => {
                debug!("Submitting {}", url);
                self.is_loading = true;
                self.error = None;
                self.last_url = Some(url.clone());
                self.input = url.clone();
                self.cursor_position = self.input.chars().count();
            }
            AppEvent::AnalysisComplete(result) => {
                self.is_loading = false;
                self.result = Some(result.as_ref().clone());
                self.analyzed_at = Some(Local::now());
                self.scroll_position = 0;
            }
            AppEvent::AnalysisFailed(error) => {
                self.is_loading = false;
                self.error = Some(error.clone());
            }
            AppEvent::Quit => {
                self.should_quit = true;
            }
        }
    }

    /// Handle key events
    fn handle_key_event(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => self.send(AppEvent::Quit),
            KeyCode::Char('c') if ctrl => self.send(AppEvent::Quit),
            KeyCode::Char('r') if ctrl => self.reanalyze(),
            KeyCode::F(5) => self.reanalyze(),
            KeyCode::Enter => {
                if !self.is_loading {
                    let input = self.input.clone();
                    self.submit(&input);
                }
            }
            KeyCode::Char(c) => self.insert_char(c),
            KeyCode::Backspace => self.backspace(),
            KeyCode::Delete => self.delete_char(),
            KeyCode::Left => self.move_cursor_left(),
            KeyCode::Right => self.move_cursor_right(),
            KeyCode::Home => self.cursor_position = 0,
            KeyCode::End => self.cursor_position = self.input.chars().count(),
            KeyCode::Up => self.scroll_by(-1),
            KeyCode::Down => self.scroll_by(1),
            KeyCode::PageUp => self.scroll_by(-10),
            KeyCode::PageDown => self.scroll_by(10),
            _ => {}
        }
    }

    /// Byte offset of the cursor in `input`
    fn byte_index(&self) -> usize {
        self.input
            .char_indices()
            .nth(self.cursor_position)
            .map(|(i, _)| i)
            .unwrap_or(self.input.len())
    }

    /// Input text left of the cursor
    pub fn input_before_cursor(&self) -> &str {
        &self.input[..self.byte_index()]
    }

    pub fn move_cursor_left(&mut self) {
        self.cursor_position = self.cursor_position.saturating_sub(1);
    }

    pub fn move_cursor_right(&mut self) {
        if self.cursor_position < self.input.chars().count() {
            self.cursor_position += 1;
        }
    }

    pub fn insert_char(&mut self, c: char) {
        let index = self.byte_index();
        self.input.insert(index, c);
        self.cursor_position += 1;
    }

    pub fn delete_char(&mut self) {
        if self.cursor_position < self.input.chars().count() {
            let index = self.byte_index();
            self.input.remove(index);
        }
    }

    pub fn backspace(&mut self) {
        if self.cursor_position > 0 {
            self.cursor_position -= 1;
            let index = self.byte_index();
            self.input.remove(index);
        }
    }

    pub fn scroll_length(&self) -> usize {
        self.scroll_length
    }

    /// Record the drawn height of the recommendations panel and keep the
    /// scroll position inside it
    pub fn set_scroll_length(&mut self, length: usize) {
        self.scroll_length = length;
        self.scroll_position = self.scroll_position.min(length.saturating_sub(1));
    }

    /// Scroll by a number of lines (positive = down, negative = up)
    pub fn scroll_by(&mut self, delta: i32) {
        let max_pos = self.scroll_length.saturating_sub(1);
        self.scroll_position = if delta < 0 {
            self.scroll_position
                .saturating_sub(delta.unsigned_abs() as usize)
        } else {
            self.scroll_position
                .saturating_add(delta as usize)
                .min(max_pos)
        };
    }

    /// Update spinner frame
    pub fn tick_spinner(&mut self) {
        if self.is_loading {
            self.spinner_frame = (self.spinner_frame + 1) % 8;
        }
    }
}
