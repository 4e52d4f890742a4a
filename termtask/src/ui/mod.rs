//! Terminal UI rendering.

pub mod detail;
pub mod form;
pub mod status_bar;
pub mod task_list;
pub mod theme;

use std::fmt::Write as _;

use chrono::NaiveDate;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
};

use termtask_proto::date;

use crate::app::{App, Screen};

/// Main draw function for the entire UI.
pub fn draw(frame: &mut Frame, app: &App) {
    // Status bar pinned to the bottom row
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(frame.area());

    let content_area = main_chunks[0];
    let status_area = main_chunks[1];

    let content_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(60), // Task list
            Constraint::Percentage(40), // Detail
        ])
        .split(content_area);

    task_list::render(frame, content_chunks[0], app);
    detail::render(frame, content_chunks[1], app);
    status_bar::render(frame, status_area, app);

    // Forms float over the list content; the status bar stays visible
    if app.screen() != Screen::List {
        form::render(frame, content_area, app);
    }
}

/// Format a due date with the configured pattern.
///
/// An invalid pattern falls back to the wire format instead of
/// propagating a formatting error into the render pass.
#[must_use]
pub fn format_date(date: NaiveDate, pattern: &str) -> String {
    let mut out = String::new();
    if write!(out, "{}", date.format(pattern)).is_err() {
        out.clear();
        let _ = write!(out, "{}", date.format(date::WIRE_FORMAT));
    }
    out
}
