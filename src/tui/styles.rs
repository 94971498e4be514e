//! Shared colors and styles for the widgets and the frame chrome.

use ratatui::style::{Color, Modifier, Style};

const PRIMARY_FG: Color = Color::Indexed(15);
const PRIMARY_BG: Color = Color::Indexed(56);
const ACTIVE_FG: Color = Color::Indexed(12);
const ACTIVE_BG: Color = Color::Indexed(200);
const ERROR: Color = Color::Indexed(9);

pub fn header() -> Style {
    Style::default().fg(PRIMARY_FG).bg(PRIMARY_BG)
}

pub fn button() -> Style {
    Style::default().fg(PRIMARY_FG).bg(PRIMARY_BG)
}

pub fn button_active() -> Style {
    Style::default()
        .fg(ACTIVE_FG)
        .bg(ACTIVE_BG)
        .add_modifier(Modifier::BOLD)
}

/// Left edge marker of the focused text area.
pub fn focus_bar() -> Style {
    Style::default().fg(ACTIVE_BG)
}

pub fn placeholder() -> Style {
    Style::default().fg(Color::DarkGray)
}

pub fn cursor() -> Style {
    Style::default().add_modifier(Modifier::REVERSED)
}

pub fn delimiter() -> Style {
    Style::default().fg(Color::DarkGray)
}

pub fn list_title() -> Style {
    Style::default().fg(PRIMARY_FG).bg(PRIMARY_BG)
}

pub fn list_selected() -> Style {
    Style::default().fg(ACTIVE_BG)
}

pub fn error() -> Style {
    Style::default().fg(ERROR)
}

pub fn muted() -> Style {
    Style::default().fg(Color::DarkGray)
}
