//! Colour palette and text styles used across the UI.

use ratatui::style::{Color, Modifier, Style};

/// Central theme — change colours here and they propagate everywhere.
pub struct Theme;

impl Theme {
    // ── board ──────────────────────────────────────────────────
    pub fn portal_border_style() -> Style {
        Style::default().fg(Color::Gray)
    }

    pub fn portal_title_style() -> Style {
        Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD)
    }

    pub fn column_style() -> Style {
        Style::default().fg(Color::DarkGray)
    }

    /// Column that is the current valid drop target.
    pub fn active_column_style() -> Style {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    }

    pub fn portlet_style() -> Style {
        Style::default().fg(Color::Cyan)
    }

    /// The card currently being dragged (shown dimmed at its source).
    pub fn dragged_portlet_style() -> Style {
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::ITALIC)
    }

    pub fn portlet_body_style() -> Style {
        Style::default().fg(Color::White)
    }

    // ── chrome ─────────────────────────────────────────────────
    pub fn status_bar_style() -> Style {
        Style::default().bg(Color::DarkGray).fg(Color::White)
    }
}
