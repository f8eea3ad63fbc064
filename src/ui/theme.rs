//! Colour palette and text styles: orange on black, with an orange-red
//! highlight for selection and lit keys.

use ratatui::style::{Color, Modifier, Style};

pub const ORANGE: Color = Color::Rgb(0xff, 0xa5, 0x00);
pub const HIGHLIGHT: Color = Color::Rgb(0xff, 0x6a, 0x00);
pub const KEY_BG: Color = Color::Rgb(0x33, 0x33, 0x33);
pub const BG: Color = Color::Black;

pub struct Theme;

impl Theme {
    pub fn base_style() -> Style {
        Style::default().fg(ORANGE).bg(BG)
    }

    // ── output pane ────────────────────────────────────────────
    pub fn echo_style() -> Style {
        Self::base_style().add_modifier(Modifier::BOLD)
    }

    pub fn output_style() -> Style {
        Self::base_style()
    }

    pub fn error_style() -> Style {
        Style::default().fg(HIGHLIGHT).bg(BG)
    }

    pub fn timestamp_style() -> Style {
        Self::base_style().add_modifier(Modifier::DIM)
    }

    pub fn monitor_style() -> Style {
        Self::base_style().add_modifier(Modifier::BOLD)
    }

    // ── tree view ──────────────────────────────────────────────
    pub fn dir_style() -> Style {
        Self::base_style().add_modifier(Modifier::BOLD)
    }

    pub fn file_style() -> Style {
        Self::base_style()
    }

    pub fn size_style() -> Style {
        Self::base_style().add_modifier(Modifier::DIM)
    }

    pub fn selected_style(focused: bool) -> Style {
        if focused {
            Style::default().bg(HIGHLIGHT).fg(Color::Black)
        } else {
            Style::default().bg(KEY_BG).fg(ORANGE)
        }
    }

    // ── virtual keyboard ───────────────────────────────────────
    pub fn key_style() -> Style {
        Style::default()
            .fg(ORANGE)
            .bg(KEY_BG)
            .add_modifier(Modifier::BOLD)
    }

    pub fn key_lit_style() -> Style {
        Style::default()
            .fg(Color::Black)
            .bg(HIGHLIGHT)
            .add_modifier(Modifier::BOLD)
    }

    // ── chrome ─────────────────────────────────────────────────
    pub fn border_style(focused: bool) -> Style {
        let style = Style::default().fg(ORANGE).bg(BG);
        if focused {
            style.add_modifier(Modifier::BOLD)
        } else {
            style.add_modifier(Modifier::DIM)
        }
    }

    pub fn title_style() -> Style {
        Self::base_style().add_modifier(Modifier::BOLD)
    }

    pub fn status_bar_style() -> Style {
        Style::default().bg(KEY_BG).fg(ORANGE)
    }
}
