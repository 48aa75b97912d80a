//! Virtual document layout.
//!
//! Measures the scrollable document from the catalog and the terminal
//! size: stacked section geometry for the resolver, intra-section rows
//! for the renderer, and rail marker rows. Mouse hit-testing reads the
//! same measurements, so clicks and pixels cannot drift apart.
//!
//! All vertical measurements are in terminal rows. Sections are stacked
//! from row 0 with no gaps; each is at least one viewport tall, with
//! its content centered in the leftover space.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

use crate::catalog::{Catalog, Event};
use crate::nav::SectionGeometry;

/// Width of the rail column (spine, markers and labels).
pub const RAIL_WIDTH: u16 = 32;
/// Height of the framed image placeholder, borders included.
pub const IMAGE_FRAME_ROWS: u16 = 8;
/// Blank rows above and below a section's content block.
const SECTION_PADDING: u16 = 1;
/// Horizontal inset of section text inside the canvas column.
const TEXT_INSET: u16 = 2;
/// Horizontal spacing between carousel dots.
const DOT_SPACING: u16 = 2;

/// Event marker glyph on the rail.
pub const MARK_EVENT: &str = "●";
/// Date marker glyph on the rail.
pub const MARK_DATE: &str = "○";
/// Carousel arrow glyphs.
pub const ARROW_PREV: &str = "◀";
pub const ARROW_NEXT: &str = "▶";

/// A marker row on the rail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RailMark {
    /// Event marker: (event index, rail row).
    Event(usize, u16),
    /// Date marker: (event index, date index, rail row).
    Date(usize, usize, u16),
}

impl RailMark {
    pub fn row(&self) -> u16 {
        match *self {
            RailMark::Event(_, row) => row,
            RailMark::Date(_, _, row) => row,
        }
    }
}

/// Row offsets of one section's content, relative to the section top.
#[derive(Debug, Clone, Copy)]
pub struct SectionLayout {
    pub heading_row: u16,
    pub slide_title_row: u16,
    pub frame_top: u16,
    pub frame_height: u16,
    pub desc_top: u16,
    pub dots_row: u16,
    /// Row of the carousel arrows, vertically centered on the frame.
    pub arrow_row: u16,
    pub slide_count: usize,
}

/// The measured document for one terminal size.
#[derive(Debug, Clone)]
pub struct Document {
    /// Rail column on screen.
    pub rail: Rect,
    /// Content column on screen, to the right of the rail.
    pub canvas: Rect,
    pub sections: Vec<SectionGeometry>,
    pub layouts: Vec<SectionLayout>,
    pub rail_marks: Vec<RailMark>,
    pub total_height: f32,
}

impl Document {
    /// Which section contains a document row, if any.
    pub fn section_at(&self, doc_row: f32) -> Option<usize> {
        self.sections.iter().position(|g| g.contains(doc_row))
    }

    /// Width available for wrapped section text.
    pub fn text_width(&self) -> u16 {
        self.canvas.width.saturating_sub(TEXT_INSET * 2)
    }

    /// Screen columns of the previous/next arrow cells.
    pub fn arrow_columns(&self) -> (u16, u16) {
        let left = self.canvas.x + 1;
        let right = self.canvas.right().saturating_sub(2);
        (left, right)
    }

    /// Leftmost screen column of an event's dot strip.
    pub fn dots_origin(&self, slide_count: usize) -> u16 {
        let strip = (slide_count.max(1) as u16 - 1) * DOT_SPACING + 1;
        let center = self.canvas.x + self.canvas.width / 2;
        center.saturating_sub(strip / 2)
    }

    /// Map a screen column on the dots row to a dot index.
    pub fn dot_at(&self, slide_count: usize, x: u16) -> Option<usize> {
        let origin = self.dots_origin(slide_count);
        if x < origin {
            return None;
        }
        let offset = x - origin;
        if offset % DOT_SPACING != 0 {
            return None;
        }
        let index = (offset / DOT_SPACING) as usize;
        (index < slide_count).then_some(index)
    }
}

/// Split the terminal into header, main content and log ribbon rows.
pub fn chrome(area: Rect) -> (Rect, Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Header / status bar
            Constraint::Min(3),    // Main content
            Constraint::Length(1), // Log ribbon
        ])
        .split(area);
    (chunks[0], chunks[1], chunks[2])
}

/// Measure the whole document against the main content area.
pub fn measure(catalog: &Catalog, main: Rect) -> Document {
    let rail_width = RAIL_WIDTH.min(main.width / 2);
    let rail = Rect::new(main.x, main.y, rail_width, main.height);
    let canvas = Rect::new(
        main.x + rail_width,
        main.y,
        main.width.saturating_sub(rail_width),
        main.height,
    );

    let text_width = canvas.width.saturating_sub(TEXT_INSET * 2).max(1);
    let viewport_rows = main.height;

    let mut sections = Vec::with_capacity(catalog.len());
    let mut layouts = Vec::with_capacity(catalog.len());
    let mut top = 0.0f32;

    for event in &catalog.events {
        let (layout, height) = measure_section(event, text_width, viewport_rows);
        sections.push(SectionGeometry::new(top, height as f32));
        layouts.push(layout);
        top += height as f32;
    }

    let rail_marks = rail_marks(catalog, main.height);

    Document {
        rail,
        canvas,
        sections,
        layouts,
        rail_marks,
        total_height: top,
    }
}

/// Measure one section: content rows, padded to at least one viewport
/// and centered in any leftover space.
fn measure_section(event: &Event, text_width: u16, viewport_rows: u16) -> (SectionLayout, u16) {
    // The carousel body must fit every slide, so geometry does not move
    // when the user flips slides.
    let body_rows = event
        .slides
        .iter()
        .map(|slide| {
            let desc = wrapped_line_count(&slide.description, text_width);
            let note = slide
                .note
                .as_deref()
                .map(|n| 1 + wrapped_line_count(n, text_width))
                .unwrap_or(0);
            desc + note
        })
        .max()
        .unwrap_or(1);

    // heading, blank, slide title, frame, blank, description block,
    // blank, dots.
    let content_rows = 1 + 1 + 1 + IMAGE_FRAME_ROWS + 1 + body_rows + 1 + 1;
    let height = (content_rows + SECTION_PADDING * 2).max(viewport_rows);
    let pad = (height - content_rows) / 2;

    let heading_row = pad;
    let slide_title_row = heading_row + 2;
    let frame_top = slide_title_row + 1;
    let desc_top = frame_top + IMAGE_FRAME_ROWS + 1;
    let dots_row = desc_top + body_rows + 1;

    let layout = SectionLayout {
        heading_row,
        slide_title_row,
        frame_top,
        frame_height: IMAGE_FRAME_ROWS,
        desc_top,
        dots_row,
        arrow_row: frame_top + IMAGE_FRAME_ROWS / 2,
        slide_count: event.slides.len(),
    };
    (layout, height)
}

/// Rail marker rows: the event marker for event `i` sits at fraction
/// `i / (N - 1)` of the rail height, and date `j` of that event at
/// `(i + (j + 1) / (d + 1)) / (N - 1)`, interleaving the dates between
/// consecutive event markers.
fn rail_marks(catalog: &Catalog, rail_height: u16) -> Vec<RailMark> {
    let count = catalog.len();
    if count == 0 || rail_height == 0 {
        return Vec::new();
    }
    let span = (rail_height - 1) as f32;
    let divisor = (count.saturating_sub(1)).max(1) as f32;

    let mut marks = Vec::new();
    for (i, event) in catalog.events.iter().enumerate() {
        let frac = i as f32 / divisor;
        marks.push(RailMark::Event(i, (frac * span).round() as u16));

        let dates = event.dates.len();
        for j in 0..dates {
            let offset = (j + 1) as f32 / (dates + 1) as f32;
            let frac = (i as f32 + offset) / divisor;
            let row = (frac * span).round() as u16;
            if row <= rail_height - 1 {
                marks.push(RailMark::Date(i, j, row));
            }
        }
    }
    marks
}

/// Greedy word wrap. The renderer draws exactly these lines, and the
/// measuring pass counts them, so sizes and pixels always agree.
pub fn wrap_text(text: &str, width: u16) -> Vec<String> {
    let width = width.max(1) as usize;
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let mut word = word.to_string();
        // Overlong word: consumed in full-width chunks.
        while word.chars().count() > width {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            let chunk: String = word.chars().take(width).collect();
            word = word.chars().skip(width).collect();
            lines.push(chunk);
        }
        if word.is_empty() {
            continue;
        }
        if current.is_empty() {
            current = word;
        } else if current.chars().count() + 1 + word.chars().count() <= width {
            current.push(' ');
            current.push_str(&word);
        } else {
            lines.push(std::mem::take(&mut current));
            current = word;
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

/// Line count of [`wrap_text`], used to size section bodies.
pub fn wrapped_line_count(text: &str, width: u16) -> u16 {
    wrap_text(text, width).len() as u16
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    fn area(width: u16, height: u16) -> Rect {
        Rect::new(0, 0, width, height)
    }

    #[test]
    fn test_sections_are_contiguous_from_zero() {
        let catalog = Catalog::default_catalog().unwrap();
        let doc = measure(&catalog, area(100, 30));

        assert_eq!(doc.sections[0].top, 0.0);
        for pair in doc.sections.windows(2) {
            assert_eq!(pair[0].bottom(), pair[1].top);
        }
        assert_eq!(doc.sections.last().unwrap().bottom(), doc.total_height);
    }

    #[test]
    fn test_sections_fill_at_least_one_viewport() {
        let catalog = Catalog::default_catalog().unwrap();
        let doc = measure(&catalog, area(120, 45));
        for g in &doc.sections {
            assert!(g.height >= 45.0);
        }
    }

    #[test]
    fn test_section_rows_are_ordered() {
        let catalog = Catalog::default_catalog().unwrap();
        let doc = measure(&catalog, area(100, 30));
        for (layout, g) in doc.layouts.iter().zip(&doc.sections) {
            assert!(layout.heading_row < layout.slide_title_row);
            assert!(layout.slide_title_row < layout.frame_top);
            assert!(layout.frame_top < layout.desc_top);
            assert!(layout.desc_top < layout.dots_row);
            assert!((layout.dots_row as f32) < g.height);
        }
    }

    #[test]
    fn test_rail_marks_inside_rail() {
        let catalog = Catalog::default_catalog().unwrap();
        let doc = measure(&catalog, area(100, 24));
        assert!(!doc.rail_marks.is_empty());
        for mark in &doc.rail_marks {
            assert!(mark.row() < 24);
        }
    }

    #[test]
    fn test_single_event_rail_has_marks_at_top() {
        let text = r#"{
            "events": [{
                "year": 1990,
                "title": "Solo",
                "dates": [{ "year": 1991, "label": "Only" }],
                "slides": [{
                    "title": "S", "image": "i", "description": "d"
                }]
            }]
        }"#;
        let catalog: Catalog = serde_json::from_str(text).unwrap();
        let doc = measure(&catalog, area(80, 20));
        let events: Vec<_> = doc
            .rail_marks
            .iter()
            .filter(|m| matches!(m, RailMark::Event(..)))
            .collect();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].row(), 0);
    }

    #[test]
    fn test_dot_hit_testing() {
        let catalog = Catalog::default_catalog().unwrap();
        let doc = measure(&catalog, area(100, 30));
        let origin = doc.dots_origin(3);
        assert_eq!(doc.dot_at(3, origin), Some(0));
        assert_eq!(doc.dot_at(3, origin + 2), Some(1));
        assert_eq!(doc.dot_at(3, origin + 4), Some(2));
        assert_eq!(doc.dot_at(3, origin + 6), None);
        assert_eq!(doc.dot_at(3, origin + 1), None);
    }

    #[test]
    fn test_wrap_text() {
        assert_eq!(wrap_text("one two", 10), vec!["one two"]);
        assert_eq!(wrap_text("one two three", 7), vec!["one two", "three"]);
        assert_eq!(wrap_text("aaaa bbbb", 4), vec!["aaaa", "bbbb"]);
        // Overlong word consumed in chunks.
        assert_eq!(wrap_text("abcdefghij", 4), vec!["abcd", "efgh", "ij"]);
        assert_eq!(wrap_text("", 10), vec![""]);
    }

    #[test]
    fn test_wrapped_line_count_matches_wrap() {
        for text in ["", "one two three four five", "abcdefghijklmno p"] {
            for width in [3u16, 8, 20] {
                assert_eq!(
                    wrapped_line_count(text, width) as usize,
                    wrap_text(text, width).len()
                );
            }
        }
    }

    #[test]
    fn test_chrome_rows() {
        let (header, main, ribbon) = chrome(area(80, 24));
        assert_eq!(header.height, 1);
        assert_eq!(main.height, 22);
        assert_eq!(ribbon.height, 1);
        assert_eq!(header.bottom(), main.y);
        assert_eq!(main.bottom(), ribbon.y);
    }

    #[test]
    fn test_taller_viewport_grows_sections() {
        let catalog = Catalog::default_catalog().unwrap();
        let small = measure(&catalog, area(100, 20));
        let tall = measure(&catalog, area(100, 60));
        assert!(tall.total_height > small.total_height);
    }
}
