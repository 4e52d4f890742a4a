//! Task list panel rendering.

use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
};

use termtask_proto::task::Status;

use super::theme;
use crate::app::{App, PanelFocus};

/// Checkbox glyph for a task's workflow state.
const fn checkbox(status: Status) -> &'static str {
    match status {
        Status::Todo => "[ ]",
        Status::InProgress => "[>]",
        Status::Done => "[x]",
    }
}

/// Render the task list panel.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let is_focused = app.focus == PanelFocus::List;
    let visible = app.manager.visible();

    let items: Vec<ListItem> = if visible.is_empty() {
        vec![ListItem::new(Line::from(Span::styled(
            "No tasks. Press n to create one.",
            theme::dimmed(),
        )))]
    } else {
        visible
            .iter()
            .enumerate()
            .map(|(idx, task)| {
                let is_selected = idx == app.selected;
                let title_style = if task.status == Status::Done {
                    theme::completed()
                } else {
                    theme::normal()
                };

                let mut spans = vec![
                    Span::styled(checkbox(task.status), theme::status(task.status)),
                    Span::raw(" "),
                    Span::styled(task.title.as_str(), title_style),
                    Span::raw(" "),
                    Span::styled(
                        format!("({})", task.priority),
                        theme::priority(task.priority),
                    ),
                ];
                if let Some(due) = task.due_date {
                    spans.push(Span::raw(" "));
                    spans.push(Span::styled(
                        format!("due {}", super::format_date(due, &app.date_format)),
                        theme::dimmed(),
                    ));
                }
                if !task.subtasks.is_empty() {
                    let done = task.subtasks.iter().filter(|s| s.done).count();
                    spans.push(Span::raw(" "));
                    spans.push(Span::styled(
                        format!("{done}/{}", task.subtasks.len()),
                        theme::dimmed(),
                    ));
                }

                let line = Line::from(spans);
                let style = if is_selected && is_focused {
                    theme::selected()
                } else if is_selected {
                    theme::highlighted()
                } else {
                    theme::normal()
                };

                ListItem::new(line).style(style)
            })
            .collect()
    };

    let block = Block::default()
        .title(format!("Tasks ({})", visible.len()))
        .borders(Borders::ALL)
        .border_style(if is_focused {
            theme::highlighted()
        } else {
            theme::normal()
        });

    let list = List::new(items).block(block);

    frame.render_widget(list, area);
}
