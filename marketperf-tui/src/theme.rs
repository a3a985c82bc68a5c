//! Parrot/neon theme tokens.
//!
//! # Color Palette
//! - **Background**: Near-black / deep charcoal (base layer)
//! - **Accent**: Electric cyan (focus, selection)
//! - **Positive**: Neon green (gains)
//! - **Negative**: Hot pink (losses, errors)
//! - **Warning**: Neon orange (skipped pairs)
//! - **Muted**: Steel blue (hints, axis labels)

use ratatui::style::{Color, Modifier, Style};

#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub background: Color,
    pub accent: Color,
    pub positive: Color,
    pub negative: Color,
    pub warning: Color,
    pub muted: Color,
    pub text_primary: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::parrot_neon()
    }
}

impl Theme {
    pub fn parrot_neon() -> Self {
        Self {
            background: Color::Rgb(18, 18, 20),
            accent: Color::Rgb(0, 255, 255),
            positive: Color::Rgb(0, 255, 128),
            negative: Color::Rgb(255, 20, 147),
            warning: Color::Rgb(255, 140, 0),
            muted: Color::Rgb(100, 149, 237),
            text_primary: Color::White,
        }
    }

    /// Gains green, losses pink.
    pub fn pct_color(&self, value: f64) -> Color {
        if value >= 0.0 {
            self.positive
        } else {
            self.negative
        }
    }
}

/// Line colors, cycled by trace index.
pub const SERIES: [Color; 8] = [
    Color::Rgb(0, 255, 255),
    Color::Rgb(255, 140, 0),
    Color::Rgb(0, 255, 128),
    Color::Rgb(255, 20, 147),
    Color::Rgb(147, 112, 219),
    Color::Rgb(255, 255, 102),
    Color::Rgb(100, 149, 237),
    Color::Rgb(255, 160, 122),
];

pub fn series_color(index: usize) -> Color {
    SERIES[index % SERIES.len()]
}

pub fn accent() -> Style {
    Style::default().fg(Theme::default().accent)
}

pub fn muted() -> Style {
    Style::default().fg(Theme::default().muted)
}

pub fn warning() -> Style {
    Style::default().fg(Theme::default().warning)
}

pub fn negative() -> Style {
    Style::default().fg(Theme::default().negative)
}

pub fn text() -> Style {
    Style::default().fg(Theme::default().text_primary)
}

pub fn panel_border(active: bool) -> Style {
    if active {
        accent()
    } else {
        muted()
    }
}

pub fn panel_title(active: bool) -> Style {
    if active {
        accent().add_modifier(Modifier::BOLD)
    } else {
        muted()
    }
}

/// Row under the list cursor.
pub fn highlight(active: bool) -> Style {
    if active {
        Style::default()
            .fg(Theme::default().background)
            .bg(Theme::default().accent)
    } else {
        Style::default().add_modifier(Modifier::REVERSED)
    }
}
