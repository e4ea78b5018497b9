//! Theme and styling constants for the TUI.

use ratatui::style::{Color, Modifier, Style};

/// Primary foreground color.
pub const FG_PRIMARY: Color = Color::White;

/// Secondary foreground color (dimmed text).
pub const FG_SECONDARY: Color = Color::Gray;

/// Highlight color for focused elements.
pub const HIGHLIGHT: Color = Color::Cyan;

/// Success indicator color.
pub const SUCCESS: Color = Color::Green;

/// Error indicator color.
pub const ERROR: Color = Color::Red;

/// Panel title color for the task list.
pub const LIST_TITLE: Color = Color::Green;

/// Panel title color for the form.
pub const FORM_TITLE: Color = Color::Blue;

/// Normal text style.
#[must_use]
pub fn normal() -> Style {
    Style::default().fg(FG_PRIMARY)
}

/// Dimmed text style (completed tasks, metadata).
#[must_use]
pub fn dimmed() -> Style {
    Style::default().fg(FG_SECONDARY)
}

/// Bold text style.
#[must_use]
pub fn bold() -> Style {
    Style::default().fg(FG_PRIMARY).add_modifier(Modifier::BOLD)
}

/// Highlighted text style (focused panel borders, field labels).
#[must_use]
pub fn highlighted() -> Style {
    Style::default().fg(HIGHLIGHT).add_modifier(Modifier::BOLD)
}

/// Selected item style (in the task list).
#[must_use]
pub fn selected() -> Style {
    Style::default()
        .fg(Color::Black)
        .bg(HIGHLIGHT)
        .add_modifier(Modifier::BOLD)
}

/// Style for the error banner (bold white on red).
#[must_use]
pub fn error_banner() -> Style {
    Style::default()
        .fg(Color::White)
        .bg(ERROR)
        .add_modifier(Modifier::BOLD)
}

/// Style for the input cursor (bright white, bold).
#[must_use]
pub fn input_cursor() -> Style {
    Style::default()
        .fg(Color::White)
        .add_modifier(Modifier::BOLD | Modifier::SLOW_BLINK)
}

/// Style for the status bar background.
#[must_use]
pub fn status_bar_bg() -> Style {
    Style::default().fg(Color::White).bg(Color::Rgb(30, 30, 50))
}

/// Style for panel titles with a given color (bold).
#[must_use]
pub fn panel_title(color: Color) -> Style {
    Style::default().fg(color).add_modifier(Modifier::BOLD)
}

/// Style for priority markers, hotter colors for higher priorities.
#[must_use]
pub const fn priority(priority: u8) -> Style {
    let color = match priority {
        8.. => Color::Red,
        6 | 7 => Color::Yellow,
        _ => Color::Gray,
    };
    Style::new().fg(color)
}
