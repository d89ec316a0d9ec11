//! Colour palette and text styles used across the UI.

use ratatui::style::{Color, Modifier, Style};

/// Central theme; change colours here and they propagate everywhere.
pub struct Theme;

impl Theme {
    // ── page ───────────────────────────────────────────────────
    pub fn header_style() -> Style {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    }

    pub fn button_style() -> Style {
        Style::default().fg(Color::Black).bg(Color::Cyan)
    }

    /// Fade-in sections render dim until revealed.
    pub fn section_style(visible: bool) -> Style {
        if visible {
            Style::default().fg(Color::White)
        } else {
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::DIM)
        }
    }

    pub fn card_style() -> Style {
        Style::default().fg(Color::Yellow)
    }

    pub fn dot_style(active: bool) -> Style {
        if active {
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        }
    }

    // ── overlays ───────────────────────────────────────────────
    pub fn backdrop_style() -> Style {
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::DIM)
    }

    pub fn link_style() -> Style {
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::UNDERLINED)
    }

    // ── chrome ─────────────────────────────────────────────────
    pub fn border_style() -> Style {
        Style::default().fg(Color::Gray)
    }

    pub fn title_style() -> Style {
        Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD)
    }

    pub fn status_bar_style() -> Style {
        Style::default().bg(Color::DarkGray).fg(Color::White)
    }

    pub fn status_message_style() -> Style {
        Style::default().fg(Color::Yellow)
    }
}
