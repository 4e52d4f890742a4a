//! Status bar rendering.

use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
};

use super::theme;
use crate::app::{App, PanelFocus, Screen};

/// Render the status bar at the bottom of the screen.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let help_text = match app.screen() {
        Screen::List => match app.focus {
            PanelFocus::List => {
                "n: new | e: edit | d: delete | Space: done | s: status | f: filter | o: sort | r: reload | Tab: detail | q: quit"
            }
            PanelFocus::Detail => "↑↓/jk: navigate | Space: toggle subtask | Tab/Esc: back",
        },
        Screen::Create => "Enter/Ctrl+S: create | Tab: next field | Esc: discard",
        Screen::Edit => "Ctrl+S: save | Tab: next field | Esc: cancel",
    };

    let status_line = Line::from(vec![
        Span::styled("TermTask v0.1.0", theme::bold()),
        Span::raw(" | "),
        Span::raw(format!("filter: {}", app.manager.filter())),
        Span::raw(" | "),
        Span::raw(format!("sort: {}", app.manager.sort())),
        Span::raw(" | "),
        Span::styled(help_text, theme::dimmed()),
    ]);

    let paragraph = Paragraph::new(status_line).style(theme::status_bar_bg());
    frame.render_widget(paragraph, area);
}
