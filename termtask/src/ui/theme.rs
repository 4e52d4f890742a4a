//! Theme and styling constants for the TUI.

use ratatui::style::{Color, Modifier, Style};

use termtask_proto::task::{Priority, Status};

/// Primary foreground color.
pub const FG_PRIMARY: Color = Color::White;

/// Secondary foreground color (dimmed text).
pub const FG_SECONDARY: Color = Color::Gray;

/// Highlight color for focused elements.
pub const HIGHLIGHT: Color = Color::Cyan;

/// High priority marker color.
pub const PRIORITY_HIGH: Color = Color::Red;

/// Medium priority marker color.
pub const PRIORITY_MEDIUM: Color = Color::Yellow;

/// Low priority marker color.
pub const PRIORITY_LOW: Color = Color::Green;

/// Marker color for tasks being worked on.
pub const IN_PROGRESS: Color = Color::Yellow;

/// Marker color for finished tasks.
pub const DONE: Color = Color::Green;

/// Normal text style.
#[must_use]
pub fn normal() -> Style {
    Style::default().fg(FG_PRIMARY)
}

/// Dimmed text style (metadata, hints).
#[must_use]
pub fn dimmed() -> Style {
    Style::default().fg(FG_SECONDARY)
}

/// Bold text style.
#[must_use]
pub fn bold() -> Style {
    Style::default().fg(FG_PRIMARY).add_modifier(Modifier::BOLD)
}

/// Highlighted text style (focused panel borders, active fields).
#[must_use]
pub fn highlighted() -> Style {
    Style::default().fg(HIGHLIGHT).add_modifier(Modifier::BOLD)
}

/// Selected item style (in lists).
#[must_use]
pub fn selected() -> Style {
    Style::default()
        .fg(Color::Black)
        .bg(HIGHLIGHT)
        .add_modifier(Modifier::BOLD)
}

/// Style for finished tasks (dimmed and struck through).
#[must_use]
pub fn completed() -> Style {
    Style::default()
        .fg(FG_SECONDARY)
        .add_modifier(Modifier::CROSSED_OUT)
}

/// Style for a task's priority marker.
#[must_use]
pub fn priority(priority: Priority) -> Style {
    let color = match priority {
        Priority::High => PRIORITY_HIGH,
        Priority::Medium => PRIORITY_MEDIUM,
        Priority::Low => PRIORITY_LOW,
    };
    Style::default().fg(color)
}

/// Style for a task's status marker.
#[must_use]
pub fn status(status: Status) -> Style {
    let color = match status {
        Status::Todo => FG_SECONDARY,
        Status::InProgress => IN_PROGRESS,
        Status::Done => DONE,
    };
    Style::default().fg(color)
}

/// Style for the input cursor (bright white, bold).
#[must_use]
pub fn input_cursor() -> Style {
    Style::default()
        .fg(Color::White)
        .add_modifier(Modifier::BOLD)
}

/// Style for the status bar background (dark background with white foreground).
#[must_use]
pub fn status_bar_bg() -> Style {
    Style::default().fg(Color::White).bg(Color::Rgb(30, 30, 50))
}
