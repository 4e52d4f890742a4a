//! Task form rendering (creation and edit overlay).

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use super::theme;
use crate::app::{App, FormField, InputState, Screen};

/// Render the form overlay on top of the list screen.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let Some(draft) = app.active_draft() else {
        return;
    };
    let editing = app.screen() == Screen::Edit;
    let title = if editing { "Edit Task" } else { "New Task" };

    let mut lines = vec![
        field_line("Title", &app.form.title, app.form.field == FormField::Title),
        field_line(
            "Description",
            &app.form.description,
            app.form.field == FormField::Description,
        ),
        field_line(
            "Due date",
            &app.form.due_date,
            app.form.field == FormField::DueDate,
        ),
        selector_line(
            "Priority",
            &draft.priority.to_string(),
            app.form.field == FormField::Priority,
        ),
    ];
    if editing {
        lines.push(selector_line(
            "Status",
            &draft.status.to_string(),
            app.form.field == FormField::Status,
        ));
    }
    lines.push(Line::from(""));

    let on_subtasks = app.form.field == FormField::Subtasks;
    lines.push(Line::from(Span::styled(
        "Subtasks",
        if on_subtasks {
            theme::highlighted()
        } else {
            theme::dimmed()
        },
    )));
    for (idx, subtask) in draft.subtasks.iter().enumerate() {
        let checkbox = if subtask.done { "[x]" } else { "[ ]" };
        let row_style = if on_subtasks && app.form.subtask_selected == Some(idx) {
            theme::selected()
        } else if subtask.done {
            theme::completed()
        } else {
            theme::normal()
        };
        lines.push(Line::from(vec![
            Span::raw("  "),
            Span::styled(format!("{checkbox} "), row_style),
            Span::styled(subtask.title.as_str(), row_style),
        ]));
    }
    let entry_label = if app.form.subtask_selected.is_some() {
        "  rename:"
    } else {
        "  add:"
    };
    lines.push(entry_line(
        entry_label,
        &app.form.subtask_entry,
        on_subtasks,
    ));

    lines.push(Line::from(""));
    let submit_hint = if editing {
        "Ctrl+S: save | Tab: next field | Esc: cancel"
    } else {
        "Enter/Ctrl+S: create | Tab: next field | Esc: discard"
    };
    lines.push(Line::from(Span::styled(submit_hint, theme::dimmed())));

    let overlay = overlay_area(area);
    frame.render_widget(Clear, overlay);

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(theme::highlighted());

    let paragraph = Paragraph::new(lines).block(block);

    frame.render_widget(paragraph, overlay);
}

/// Centered region the form floats in.
fn overlay_area(area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(10),
            Constraint::Percentage(80),
            Constraint::Percentage(10),
        ])
        .split(area);
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(15),
            Constraint::Percentage(70),
            Constraint::Percentage(15),
        ])
        .split(vertical[1]);
    horizontal[1]
}

fn label_span(label: &str, active: bool) -> Span<'static> {
    let style = if active {
        theme::highlighted()
    } else {
        theme::dimmed()
    };
    Span::styled(format!("{label:<13}"), style)
}

/// A labelled text input row. The active row shows a block cursor
/// between the characters on either side of it.
fn field_line<'a>(label: &str, input: &'a InputState, active: bool) -> Line<'a> {
    let mut spans = vec![label_span(label, active)];
    if active {
        let (before, after) = input.split_at_cursor();
        spans.push(Span::styled(before, theme::normal()));
        spans.push(Span::styled("█", theme::input_cursor()));
        spans.push(Span::styled(after, theme::normal()));
    } else {
        spans.push(Span::styled(input.value.as_str(), theme::normal()));
    }
    Line::from(spans)
}

/// A labelled value cycled with the arrow keys rather than typed.
fn selector_line(label: &str, value: &str, active: bool) -> Line<'static> {
    let value_span = if active {
        Span::styled(format!("< {value} >"), theme::highlighted())
    } else {
        Span::styled(value.to_string(), theme::normal())
    };
    Line::from(vec![label_span(label, active), value_span])
}

/// The subtask entry row, labelled by what Enter will do.
fn entry_line<'a>(label: &str, input: &'a InputState, active: bool) -> Line<'a> {
    let mut spans = vec![label_span(label, active), Span::raw(" ")];
    if active {
        let (before, after) = input.split_at_cursor();
        spans.push(Span::styled(before, theme::normal()));
        spans.push(Span::styled("█", theme::input_cursor()));
        spans.push(Span::styled(after, theme::normal()));
    } else {
        spans.push(Span::styled(input.value.as_str(), theme::dimmed()));
    }
    Line::from(spans)
}
