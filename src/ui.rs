//! UI rendering module.
//!
//! Draws the header, the rail, the visible slice of the virtual
//! document, the log ribbon and the help overlay. Everything is
//! positioned from the measured [`Document`], the same measurements
//! the mouse hit-testing reads.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::app::{App, LogLevel};
use crate::catalog::{Event, Slide};
use crate::layout::{
    self, Document, RailMark, SectionLayout, ARROW_NEXT, ARROW_PREV, MARK_DATE, MARK_EVENT,
};
use crate::theme::{colors, styles};

/// Render the entire UI
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    // Fill background with theme color
    let bg_block = Block::default().style(Style::default().bg(colors::BG_DARK));
    frame.render_widget(bg_block, area);

    let (header, _main, ribbon) = layout::chrome(area);

    render_header(frame, app, header);
    if let Some(doc) = &app.doc {
        render_rail(frame, app, doc);
        render_sections(frame, app, doc);
    }
    render_ribbon(frame, app, ribbon);

    if app.show_help {
        render_help_overlay(frame, area);
    }
}

/// Render the one-row header: app name plus navigation status.
fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let line = Line::from(vec![
        Span::styled(" chronica ", styles::heading()),
        Span::styled("· ", styles::border_dim()),
        Span::styled(app.status_text(), styles::text_dim()),
    ]);
    frame.render_widget(
        Paragraph::new(line).style(Style::default().bg(colors::BG_MEDIUM)),
        area,
    );
}

/// Render the rail: spine, event markers with year labels, and date
/// markers with their labels. Active markers glow amber.
fn render_rail(frame: &mut Frame, app: &App, doc: &Document) {
    let rail = doc.rail;
    if rail.width < 4 {
        return;
    }
    let buf = frame.buffer_mut();
    let spine_x = rail.x + 2;

    for row in 0..rail.height {
        buf.set_string(
            spine_x,
            rail.y + row,
            "│",
            Style::default().fg(colors::RAIL_LINE),
        );
    }

    let label_width = rail.width.saturating_sub(5) as usize;
    for mark in &doc.rail_marks {
        match *mark {
            RailMark::Event(event, row) => {
                let active = event == app.nav.active_event;
                let style = if active {
                    Style::default()
                        .fg(colors::RAIL_ACTIVE)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(colors::RAIL_IDLE)
                };
                buf.set_string(spine_x, rail.y + row, MARK_EVENT, style);
                if let Some(e) = app.catalog.events.get(event) {
                    let label = truncate(&e.year.to_string(), label_width);
                    buf.set_string(spine_x + 2, rail.y + row, &label, style);
                }
            }
            RailMark::Date(event, date, row) => {
                let in_active_event = event == app.nav.active_event;
                let is_active = in_active_event && date == app.nav.active_date;
                let style = if is_active {
                    Style::default()
                        .fg(colors::RAIL_DATE_ACTIVE)
                        .add_modifier(Modifier::BOLD)
                } else if in_active_event {
                    Style::default().fg(colors::RAIL_DATE_ACTIVE)
                } else {
                    Style::default().fg(colors::RAIL_LINE)
                };
                buf.set_string(spine_x, rail.y + row, MARK_DATE, style);

                if in_active_event {
                    if let Some(d) = app
                        .catalog
                        .events
                        .get(event)
                        .and_then(|e| e.dates.get(date))
                    {
                        let text = truncate(&format!("{} {}", d.year, d.label), label_width);
                        let label_style = if is_active { style } else { styles::text_hint() };
                        buf.set_string(spine_x + 2, rail.y + row, &text, label_style);
                    }
                }
            }
        }
    }
}

/// Render every section that intersects the viewport.
fn render_sections(frame: &mut Frame, app: &App, doc: &Document) {
    let offset = app.scroll.offset();
    let viewport_bottom = offset + doc.canvas.height as f32;

    for (index, geometry) in doc.sections.iter().enumerate() {
        if geometry.bottom() <= offset || geometry.top >= viewport_bottom {
            continue;
        }
        let Some(event) = app.catalog.events.get(index) else {
            continue;
        };
        render_section(frame, app, doc, offset, index, event, &doc.layouts[index]);
    }
}

/// Paint one section's content rows at their on-screen positions.
fn render_section(
    frame: &mut Frame,
    app: &App,
    doc: &Document,
    offset: f32,
    index: usize,
    event: &Event,
    section: &SectionLayout,
) {
    let top = doc.sections[index].top;
    let active = index == app.nav.active_event;
    let slide_index = app.nav.slide(index);
    let slide = &event.slides[slide_index.min(event.slides.len() - 1)];
    let text_x = doc.canvas.x + 2;
    let text_width = doc.text_width();

    // Heading
    let heading_style = if active {
        styles::heading()
    } else {
        styles::text_dim().add_modifier(Modifier::BOLD)
    };
    put_line(
        frame,
        doc.canvas,
        offset,
        top + section.heading_row as f32,
        text_x,
        &event.heading(),
        heading_style,
    );

    // Slide title
    put_line(
        frame,
        doc.canvas,
        offset,
        top + section.slide_title_row as f32,
        text_x,
        &slide.title,
        styles::slide_title(),
    );

    render_image_frame(frame, doc, offset, top, section, slide);
    render_arrows(frame, doc, offset, top, section, slide_index);

    // Description and note
    let mut row = top + section.desc_top as f32;
    for line in layout::wrap_text(&slide.description, text_width) {
        put_line(frame, doc.canvas, offset, row, text_x, &line, styles::text());
        row += 1.0;
    }
    if let Some(note) = &slide.note {
        row += 1.0;
        for line in layout::wrap_text(note, text_width) {
            put_line(frame, doc.canvas, offset, row, text_x, &line, styles::note());
            row += 1.0;
        }
    }

    render_dots(frame, doc, offset, top, section, slide_index);
}

/// Framed placeholder standing in for the slide's picture.
fn render_image_frame(
    frame: &mut Frame,
    doc: &Document,
    offset: f32,
    top: f32,
    section: &SectionLayout,
    slide: &Slide,
) {
    let x = doc.canvas.x + 2;
    let width = doc.canvas.width.saturating_sub(4);
    if width < 4 {
        return;
    }
    let inner = width as usize - 2;
    let top_border = format!("╭{}╮", "─".repeat(inner));
    let bottom_border = format!("╰{}╯", "─".repeat(inner));
    let blank = format!("│{}│", " ".repeat(inner));

    let frame_top = top + section.frame_top as f32;
    let last = section.frame_height.saturating_sub(1);
    for r in 0..section.frame_height {
        let line = if r == 0 {
            &top_border
        } else if r == last {
            &bottom_border
        } else {
            &blank
        };
        put_line(frame, doc.canvas, offset, frame_top + r as f32, x, line, styles::border_dim());
    }

    // Centered image reference inside the frame.
    let caption = truncate(&format!("▦ {}", slide.image), inner);
    let caption_x = x + 1 + ((inner.saturating_sub(caption.chars().count())) / 2) as u16;
    put_line(
        frame,
        doc.canvas,
        offset,
        frame_top + (section.frame_height / 2) as f32,
        caption_x,
        &caption,
        styles::text_hint(),
    );
}

/// Carousel arrows beside the frame; dimmed when inert at a boundary.
fn render_arrows(
    frame: &mut Frame,
    doc: &Document,
    offset: f32,
    top: f32,
    section: &SectionLayout,
    slide_index: usize,
) {
    if section.slide_count < 2 {
        return;
    }
    let (left_x, right_x) = doc.arrow_columns();
    let row = top + section.arrow_row as f32;

    let prev_style = if slide_index == 0 {
        styles::control_disabled()
    } else {
        styles::control()
    };
    let next_style = if slide_index + 1 >= section.slide_count {
        styles::control_disabled()
    } else {
        styles::control()
    };
    put_line(frame, doc.canvas, offset, row, left_x, ARROW_PREV, prev_style);
    put_line(frame, doc.canvas, offset, row, right_x, ARROW_NEXT, next_style);
}

/// One dot per slide, the current one filled.
fn render_dots(
    frame: &mut Frame,
    doc: &Document,
    offset: f32,
    top: f32,
    section: &SectionLayout,
    slide_index: usize,
) {
    if section.slide_count < 2 {
        return;
    }
    let row = top + section.dots_row as f32;
    let origin = doc.dots_origin(section.slide_count);
    for dot in 0..section.slide_count {
        let (glyph, style) = if dot == slide_index {
            (MARK_EVENT, styles::dot_active())
        } else {
            (MARK_DATE, styles::dot_idle())
        };
        put_line(frame, doc.canvas, offset, row, origin + (dot as u16) * 2, glyph, style);
    }
}

/// Render the latest log entry in the bottom ribbon.
fn render_ribbon(frame: &mut Frame, app: &App, area: Rect) {
    let Some(entry) = app.logs.last() else {
        return;
    };
    let style = match entry.level {
        LogLevel::Info => styles::info(),
        LogLevel::Success => styles::success(),
        LogLevel::Warning => styles::error(),
    };
    let age = entry.timestamp.elapsed().as_secs();
    let line = Line::from(vec![
        Span::styled(format!(" {} ", entry.message), style),
        Span::styled(format!("({}s ago)", age), styles::text_hint()),
    ]);
    frame.render_widget(
        Paragraph::new(line).style(Style::default().bg(colors::BG_MEDIUM)),
        area,
    );
}

/// Paint a single line of a document row, clipped to the canvas.
fn put_line(
    frame: &mut Frame,
    canvas: Rect,
    offset: f32,
    doc_row: f32,
    x: u16,
    text: &str,
    style: Style,
) {
    let y = canvas.y as f32 + (doc_row - offset).round();
    if y < canvas.y as f32 || y >= canvas.bottom() as f32 {
        return;
    }
    if x >= canvas.right() {
        return;
    }
    let max = (canvas.right() - x) as usize;
    frame.buffer_mut().set_stringn(x, y as u16, text, max, style);
}

/// Centered help overlay listing the key bindings.
fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let width = 46.min(area.width.saturating_sub(4));
    let height = 14.min(area.height.saturating_sub(2));
    let popup = Rect::new(
        area.x + (area.width.saturating_sub(width)) / 2,
        area.y + (area.height.saturating_sub(height)) / 2,
        width,
        height,
    );

    frame.render_widget(Clear, popup);

    let rows = [
        ("j/k, ↓/↑", "scroll"),
        ("d/u, PgDn/PgUp", "scroll half a page"),
        ("g/G", "top / bottom"),
        ("1-9", "jump to an event"),
        ("n/p", "next / previous event"),
        ("h/l, ←/→", "slide carousel"),
        ("wheel / click", "scroll, markers, arrows, dots"),
        ("?", "toggle this help"),
        ("q", "quit"),
    ];
    let lines: Vec<Line> = rows
        .iter()
        .map(|(keys, what)| {
            Line::from(vec![
                Span::styled(format!(" {:<16}", keys), styles::control()),
                Span::styled(*what, styles::text()),
            ])
        })
        .collect();

    let block = Block::default()
        .title(" Keys ")
        .title_style(styles::heading())
        .borders(Borders::ALL)
        .border_style(styles::border())
        .style(Style::default().bg(colors::BG_MEDIUM));
    frame.render_widget(Paragraph::new(lines).block(block), popup);
}

/// Truncate a string to a column limit, appending an ellipsis if cut.
fn truncate(text: &str, max: usize) -> String {
    if max == 0 {
        return String::new();
    }
    let count = text.chars().count();
    if count <= max {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max.saturating_sub(1)).collect();
        format!("{}…", cut)
    }
}
