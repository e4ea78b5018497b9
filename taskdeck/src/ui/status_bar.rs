//! Status bar rendering.

use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
};

use super::theme;
use crate::app::{App, Focus};

/// Render the status bar at the bottom of the screen.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let help_text = match app.focus {
        Focus::List => {
            "n: new | e: edit | space: toggle | d: delete | r: refresh | ↑↓/jk: move | Esc: quit"
        }
        Focus::TaskField | Focus::DescriptionField | Focus::PriorityField => {
            "Enter: save | Tab: next field | Esc: cancel | ←→: move cursor"
        }
    };

    let open = app.state.tasks.iter().filter(|t| !t.completed).count();
    let summary = if app.state.loading {
        "loading…".to_string()
    } else {
        format!("{open} open / {} total", app.state.tasks.len())
    };

    let status_line = Line::from(vec![
        Span::styled("Taskdeck v0.1.0", theme::bold()),
        Span::raw(" | "),
        Span::styled("●", theme::normal().fg(theme::SUCCESS)),
        Span::raw(format!(" {summary}")),
        Span::raw(" | "),
        Span::styled(help_text, theme::dimmed()),
    ]);

    let paragraph = Paragraph::new(status_line).style(theme::status_bar_bg());
    frame.render_widget(paragraph, area);
}
