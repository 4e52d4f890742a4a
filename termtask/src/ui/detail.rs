//! Detail panel rendering for the selected task.

use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use super::theme;
use crate::app::{App, PanelFocus};

/// Render the detail panel for the selected task.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let is_focused = app.focus == PanelFocus::Detail;

    let block = Block::default()
        .title("Detail")
        .borders(Borders::ALL)
        .border_style(if is_focused {
            theme::highlighted()
        } else {
            theme::normal()
        });

    let Some(task) = app.selected_task() else {
        let placeholder = Paragraph::new(Line::from(Span::styled(
            "Nothing selected",
            theme::dimmed(),
        )))
        .block(block);
        frame.render_widget(placeholder, area);
        return;
    };

    let mut lines = vec![
        Line::from(Span::styled(task.title.as_str(), theme::bold())),
        Line::from(vec![
            Span::styled(task.status.to_string(), theme::status(task.status)),
            Span::raw("  "),
            Span::styled(
                format!("{} priority", task.priority),
                theme::priority(task.priority),
            ),
        ]),
    ];
    if let Some(due) = task.due_date {
        lines.push(Line::from(Span::styled(
            format!("due {}", super::format_date(due, &app.date_format)),
            theme::dimmed(),
        )));
    }
    lines.push(Line::from(""));

    if !task.description.is_empty() {
        lines.push(Line::from(Span::styled(
            task.description.as_str(),
            theme::normal(),
        )));
        lines.push(Line::from(""));
    }

    if !task.subtasks.is_empty() {
        let done = task.subtasks.iter().filter(|s| s.done).count();
        lines.push(Line::from(Span::styled(
            format!("Subtasks {done}/{}", task.subtasks.len()),
            theme::bold(),
        )));
        for (idx, subtask) in task.subtasks.iter().enumerate() {
            let checkbox = if subtask.done { "[x]" } else { "[ ]" };
            let row_style = if is_focused && idx == app.detail_selected {
                theme::selected()
            } else if subtask.done {
                theme::completed()
            } else {
                theme::normal()
            };
            lines.push(Line::from(vec![
                Span::styled(format!("{checkbox} "), row_style),
                Span::styled(subtask.title.as_str(), row_style),
            ]));
        }
    }

    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false }).block(block);

    frame.render_widget(paragraph, area);
}
