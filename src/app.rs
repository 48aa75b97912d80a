//! Application state and event handling.
//!
//! A centralized App struct holds all mutable state: the navigation
//! state, the scroll state and the measured document. Key and mouse
//! input is translated here into the three navigation requests (jump
//! to event, advance slide, select slide) plus plain viewport
//! scrolling; every mutation funnels through the nav/scroll modules.

use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;

use crate::catalog::Catalog;
use crate::layout::{self, Document, RailMark};
use crate::nav::{self, NavState};
use crate::scroll::ScrollState;

/// Rows scrolled per mouse wheel notch.
const WHEEL_STEP: f32 = 3.0;

/// Log entry for the message ribbon
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub timestamp: Instant,
    pub message: String,
    pub level: LogLevel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Success,
    Warning,
}

impl LogEntry {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            timestamp: Instant::now(),
            message: message.into(),
            level: LogLevel::Info,
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self {
            timestamp: Instant::now(),
            message: message.into(),
            level: LogLevel::Success,
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            timestamp: Instant::now(),
            message: message.into(),
            level: LogLevel::Warning,
        }
    }
}

/// Main application state
#[derive(Debug)]
pub struct App {
    /// Whether the application should quit
    pub should_quit: bool,

    /// The immutable chronicle
    pub catalog: Catalog,

    /// Navigation state: active event, active date, slide per event
    pub nav: NavState,

    /// Viewport scroll state
    pub scroll: ScrollState,

    /// Measured document, refreshed on resize
    pub doc: Option<Document>,

    /// Terminal area the document was measured against
    measured_area: Option<Rect>,

    /// Date count per event, in catalog order
    date_counts: Vec<usize>,

    /// Slide count per event, in catalog order
    slide_counts: Vec<usize>,

    /// Log messages
    pub logs: Vec<LogEntry>,
    /// Maximum number of log entries to keep
    max_logs: usize,

    /// Show help overlay
    pub show_help: bool,
}

impl App {
    /// Create a new application instance around a validated catalog.
    pub fn new(catalog: Catalog) -> Self {
        let date_counts = catalog.date_counts();
        let slide_counts = catalog.slide_counts();
        let nav = NavState::new(catalog.len());

        let mut app = Self {
            should_quit: false,
            catalog,
            nav,
            scroll: ScrollState::default(),
            doc: None,
            measured_area: None,
            date_counts,
            slide_counts,
            logs: Vec::new(),
            max_logs: 100,
            show_help: false,
        };

        app.log(LogEntry::success(format!(
            "Chronicle loaded: {} events",
            app.catalog.len()
        )));
        app
    }

    /// Add a log entry
    pub fn log(&mut self, entry: LogEntry) {
        self.logs.push(entry);
        if self.logs.len() > self.max_logs {
            self.logs.remove(0);
        }
    }

    /// Advance one frame: re-measure if the terminal changed, step the
    /// scroll easing, and re-run the resolver against the new offset.
    pub fn tick(&mut self, area: Rect) {
        self.ensure_measured(area);
        self.scroll.tick();
        self.resolve_nav();
    }

    /// (Re)measure the document when the terminal area changes.
    fn ensure_measured(&mut self, area: Rect) {
        if self.measured_area == Some(area) && self.doc.is_some() {
            return;
        }
        let (_, main, _) = layout::chrome(area);
        let doc = layout::measure(&self.catalog, main);
        self.scroll.set_bounds(doc.total_height, main.height as f32);
        self.doc = Some(doc);
        self.measured_area = Some(area);
        self.resolve_nav();
    }

    /// Run the scroll resolver; commits only actual transitions.
    fn resolve_nav(&mut self) {
        let Some(doc) = &self.doc else {
            return;
        };
        let viewport = doc.canvas.height as f32;
        if let Some((event, date)) = nav::resolve(
            self.scroll.offset(),
            viewport,
            &doc.sections,
            &self.date_counts,
            (self.nav.active_event, self.nav.active_date),
        ) {
            self.nav.set_active(event, date);
        }
    }

    /// Jump the viewport to an event's section. The index is clamped
    /// here, at the request boundary.
    pub fn jump_to_event(&mut self, event: usize) {
        let count = self.catalog.len();
        if count == 0 {
            return;
        }
        let event = event.min(count - 1);
        let Some(doc) = &self.doc else {
            return;
        };
        if let Some(target) = nav::scroll_target(&doc.sections, event) {
            self.scroll.jump_to(target);
            let heading = self.catalog.events[event].heading();
            self.log(LogEntry::info(format!("Jump to {}", heading)));
        }
    }

    /// Step a carousel, honoring the disabled-arrow boundaries: the
    /// previous arrow is inert on the first slide and the next arrow on
    /// the last. Dot selection bypasses this.
    fn arrow_advance(&mut self, event: usize, direction: i64) {
        let Some(&count) = self.slide_counts.get(event) else {
            return;
        };
        let current = self.nav.slide(event);
        if direction < 0 && current == 0 {
            return;
        }
        if direction > 0 && current + 1 >= count {
            return;
        }
        self.nav.advance_slide(event, count, direction);
    }

    /// Select a slide directly (dot click).
    fn select_slide(&mut self, event: usize, target: usize) {
        let Some(&count) = self.slide_counts.get(event) else {
            return;
        };
        self.nav.set_slide(event, count, target);
    }

    /// Handle key events
    pub fn handle_key(&mut self, key: KeyEvent) {
        if self.show_help {
            if matches!(
                key.code,
                KeyCode::Esc | KeyCode::Char('?') | KeyCode::Enter | KeyCode::Char('q')
            ) {
                self.show_help = false;
            }
            return;
        }

        let half_page = self
            .doc
            .as_ref()
            .map(|d| (d.canvas.height / 2).max(1) as f32)
            .unwrap_or(10.0);

        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.should_quit = true;
            }
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
            }
            KeyCode::Char('?') => {
                self.show_help = true;
            }

            // Viewport scrolling
            KeyCode::Char('j') | KeyCode::Down => self.scroll.scroll_by(1.0),
            KeyCode::Char('k') | KeyCode::Up => self.scroll.scroll_by(-1.0),
            KeyCode::Char('d') | KeyCode::PageDown | KeyCode::Char(' ') => {
                self.scroll.scroll_by(half_page)
            }
            KeyCode::Char('u') | KeyCode::PageUp => self.scroll.scroll_by(-half_page),
            KeyCode::Char('g') | KeyCode::Home => self.scroll.to_top(),
            KeyCode::Char('G') | KeyCode::End => self.scroll.to_bottom(),

            // Event jumps (rail)
            KeyCode::Char('n') => {
                let next = self.nav.active_event.saturating_add(1);
                self.jump_to_event(next);
            }
            KeyCode::Char('p') => {
                let prev = self.nav.active_event.saturating_sub(1);
                self.jump_to_event(prev);
            }
            KeyCode::Char(c @ '1'..='9') => {
                let index = c as usize - '1' as usize;
                if index < self.catalog.len() {
                    self.jump_to_event(index);
                } else {
                    self.log(LogEntry::warning(format!("No event {}", index + 1)));
                }
            }

            // Carousel in the active event
            KeyCode::Char('h') | KeyCode::Left => {
                self.arrow_advance(self.nav.active_event, -1);
            }
            KeyCode::Char('l') | KeyCode::Right => {
                self.arrow_advance(self.nav.active_event, 1);
            }
            _ => {}
        }

        self.resolve_nav();
    }

    /// Handle mouse events: wheel scrolling plus clicks on rail event
    /// markers, carousel arrows and dots.
    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        if self.show_help {
            return;
        }
        match mouse.kind {
            MouseEventKind::ScrollDown => self.scroll.scroll_by(WHEEL_STEP),
            MouseEventKind::ScrollUp => self.scroll.scroll_by(-WHEEL_STEP),
            MouseEventKind::Down(MouseButton::Left) => {
                self.handle_click(mouse.column, mouse.row);
            }
            _ => {}
        }
        self.resolve_nav();
    }

    fn handle_click(&mut self, x: u16, y: u16) {
        let Some(doc) = self.doc.clone() else {
            return;
        };

        if doc.rail.contains(ratatui::layout::Position::new(x, y)) {
            let rel = y - doc.rail.y;
            // Only event markers are click targets on the rail.
            let hit = doc.rail_marks.iter().find_map(|mark| match *mark {
                RailMark::Event(i, row) if row.abs_diff(rel) <= 1 => Some(i),
                _ => None,
            });
            if let Some(event) = hit {
                self.jump_to_event(event);
            }
            return;
        }

        if !doc.canvas.contains(ratatui::layout::Position::new(x, y)) {
            return;
        }

        let doc_row = self.scroll.offset() + (y - doc.canvas.y) as f32;
        let Some(event) = doc.section_at(doc_row) else {
            return;
        };
        let section = doc.sections[event];
        let section_layout = doc.layouts[event];
        let rel_row = (doc_row - section.top) as u16;

        let (left_col, right_col) = doc.arrow_columns();
        if rel_row == section_layout.arrow_row {
            if x.abs_diff(left_col) <= 1 {
                self.arrow_advance(event, -1);
            } else if x.abs_diff(right_col) <= 1 {
                self.arrow_advance(event, 1);
            }
        } else if rel_row == section_layout.dots_row {
            if let Some(dot) = doc.dot_at(section_layout.slide_count, x) {
                self.select_slide(event, dot);
            }
        }
    }

    /// Get the status bar text
    pub fn status_text(&self) -> String {
        let event = self.catalog.events.get(self.nav.active_event);
        let heading = event.map(|e| e.heading()).unwrap_or_default();
        let date = event
            .and_then(|e| e.dates.get(self.nav.active_date))
            .map(|d| format!(" · {} {}", d.year, d.label))
            .unwrap_or_default();
        let slide = event
            .map(|e| {
                format!(
                    " · slide {}/{}",
                    self.nav.slide(self.nav.active_event) + 1,
                    e.slides.len()
                )
            })
            .unwrap_or_default();

        format!(
            "{}/{} {}{}{} | ?: help | q: quit",
            self.nav.active_event + 1,
            self.catalog.len(),
            heading,
            date,
            slide
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::empty(),
            kind: crossterm::event::KeyEventKind::Press,
            state: KeyEventState::empty(),
        }
    }

    fn app() -> App {
        let mut app = App::new(Catalog::default_catalog().unwrap());
        app.tick(Rect::new(0, 0, 100, 40));
        app
    }

    #[test]
    fn test_starts_at_first_event() {
        let app = app();
        assert_eq!(app.nav.active_event, 0);
        assert_eq!(app.scroll.offset(), 0.0);
    }

    #[test]
    fn test_jump_then_resolve_activates_target() {
        let mut app = app();
        app.jump_to_event(2);
        for _ in 0..300 {
            app.tick(Rect::new(0, 0, 100, 40));
            if !app.scroll.is_animating() {
                break;
            }
        }
        assert!(!app.scroll.is_animating());
        assert_eq!(app.nav.active_event, 2);
    }

    #[test]
    fn test_jump_index_clamped_at_boundary() {
        let mut app = app();
        app.jump_to_event(999);
        while app.scroll.is_animating() {
            app.tick(Rect::new(0, 0, 100, 40));
        }
        assert_eq!(app.nav.active_event, app.catalog.len() - 1);
    }

    #[test]
    fn test_digit_beyond_catalog_is_ignored() {
        let mut app = app();
        app.handle_key(key(KeyCode::Char('9')));
        assert!(!app.scroll.is_animating());
        assert_eq!(app.nav.active_event, 0);
    }

    #[test]
    fn test_scroll_keys_move_viewport() {
        let mut app = app();
        app.handle_key(key(KeyCode::Char('j')));
        assert_eq!(app.scroll.offset(), 1.0);
        app.handle_key(key(KeyCode::Char('k')));
        assert_eq!(app.scroll.offset(), 0.0);
    }

    #[test]
    fn test_arrow_disabled_at_first_and_last_slide() {
        let mut app = app();
        // Event 0 has two slides.
        app.handle_key(key(KeyCode::Char('h')));
        assert_eq!(app.nav.slide(0), 0);
        app.handle_key(key(KeyCode::Char('l')));
        assert_eq!(app.nav.slide(0), 1);
        app.handle_key(key(KeyCode::Char('l')));
        assert_eq!(app.nav.slide(0), 1);
    }

    #[test]
    fn test_help_overlay_swallows_input() {
        let mut app = app();
        app.handle_key(key(KeyCode::Char('?')));
        assert!(app.show_help);
        app.handle_key(key(KeyCode::Char('j')));
        assert_eq!(app.scroll.offset(), 0.0);
        app.handle_key(key(KeyCode::Esc));
        assert!(!app.show_help);
    }

    #[test]
    fn test_wheel_scrolls_three_rows() {
        let mut app = app();
        app.handle_mouse(MouseEvent {
            kind: MouseEventKind::ScrollDown,
            column: 50,
            row: 20,
            modifiers: KeyModifiers::empty(),
        });
        assert_eq!(app.scroll.offset(), 3.0);
    }

    #[test]
    fn test_status_text_names_active_event() {
        let app = app();
        assert!(app.status_text().contains("1960"));
    }
}
