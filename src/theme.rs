//! Amber archive theme module.
//!
//! A warm, dark palette: amber accents on layered stone backgrounds,
//! in the spirit of old paper and museum lighting.

#![allow(dead_code)]

use ratatui::style::Color;

/// Amber-on-stone color palette
pub mod colors {
    use super::Color;

    // === Background Colors ===
    /// Deep stone - primary background
    pub const BG_DARK: Color = Color::Rgb(0x1C, 0x19, 0x17);
    /// Slightly lifted background for panels
    pub const BG_MEDIUM: Color = Color::Rgb(0x29, 0x25, 0x24);
    /// Background for highlighted/selected areas
    pub const BG_HIGHLIGHT: Color = Color::Rgb(0x44, 0x40, 0x3C);

    // === Foreground Colors ===
    /// Warm off-white - primary text
    pub const FG_PRIMARY: Color = Color::Rgb(0xE7, 0xE5, 0xE4);
    /// Dimmed text for secondary information
    pub const FG_DIM: Color = Color::Rgb(0xA8, 0xA2, 0x9E);
    /// Very dim text for hints
    pub const FG_HINT: Color = Color::Rgb(0x78, 0x71, 0x6C);

    // === Accent Colors ===
    /// Amber - the active marker and heading color
    pub const AMBER: Color = Color::Rgb(0xF5, 0x9E, 0x0B);
    /// Lighter amber for fine (date) markers
    pub const AMBER_LIGHT: Color = Color::Rgb(0xFB, 0xBF, 0x24);
    /// Ember red for errors
    pub const RED: Color = Color::Rgb(0xC4, 0x5A, 0x52);
    /// Moss green for success messages
    pub const GREEN: Color = Color::Rgb(0x8A, 0x9A, 0x7B);
    /// Dusty blue for informational text
    pub const BLUE: Color = Color::Rgb(0x8B, 0xA4, 0xB0);

    // === UI Element Colors ===
    /// Border gray
    pub const BORDER: Color = Color::Rgb(0x57, 0x53, 0x4E);
    /// Dim border for inactive separators
    pub const BORDER_DIM: Color = Color::Rgb(0x3A, 0x37, 0x35);

    // === Rail Colors ===
    /// The rail spine line
    pub const RAIL_LINE: Color = Color::Rgb(0x44, 0x40, 0x3C);
    /// Inactive event marker on the rail
    pub const RAIL_IDLE: Color = Color::Rgb(0x78, 0x71, 0x6C);
    /// Active event marker
    pub const RAIL_ACTIVE: Color = AMBER;
    /// Date marker inside the active event
    pub const RAIL_DATE_ACTIVE: Color = AMBER_LIGHT;
}

/// Semantic styling helpers
pub mod styles {
    use super::colors;
    use ratatui::style::{Modifier, Style};

    /// Style for primary text
    pub fn text() -> Style {
        Style::default().fg(colors::FG_PRIMARY)
    }

    /// Style for dimmed/secondary text
    pub fn text_dim() -> Style {
        Style::default().fg(colors::FG_DIM)
    }

    /// Style for hint text
    pub fn text_hint() -> Style {
        Style::default().fg(colors::FG_HINT)
    }

    /// Style for success messages
    pub fn success() -> Style {
        Style::default().fg(colors::GREEN)
    }

    /// Style for error messages
    pub fn error() -> Style {
        Style::default().fg(colors::RED)
    }

    /// Style for info messages
    pub fn info() -> Style {
        Style::default().fg(colors::BLUE)
    }

    /// Style for section headings (year + title)
    pub fn heading() -> Style {
        Style::default()
            .fg(colors::AMBER)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for slide titles
    pub fn slide_title() -> Style {
        Style::default()
            .fg(colors::FG_PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for borders
    pub fn border() -> Style {
        Style::default().fg(colors::BORDER)
    }

    /// Style for dim borders
    pub fn border_dim() -> Style {
        Style::default().fg(colors::BORDER_DIM)
    }

    /// Style for enabled carousel controls
    pub fn control() -> Style {
        Style::default()
            .fg(colors::AMBER)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for disabled carousel controls
    pub fn control_disabled() -> Style {
        Style::default().fg(colors::BORDER_DIM)
    }

    /// Style for the active carousel dot
    pub fn dot_active() -> Style {
        Style::default().fg(colors::AMBER)
    }

    /// Style for inactive carousel dots
    pub fn dot_idle() -> Style {
        Style::default().fg(colors::FG_HINT)
    }

    /// Style for the annotation line under a slide
    pub fn note() -> Style {
        Style::default().fg(colors::AMBER_LIGHT)
    }
}
