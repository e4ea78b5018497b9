//! Task list rendering.

use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
};

use super::theme;
use crate::app::{App, Focus};

/// Render the task list panel.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let is_focused = app.focus == Focus::List;

    let block = Block::default()
        .title(Span::styled(
            format!("Tasks ({})", app.state.tasks.len()),
            theme::panel_title(theme::LIST_TITLE),
        ))
        .borders(Borders::ALL)
        .border_style(if is_focused {
            theme::highlighted()
        } else {
            theme::normal()
        });

    if app.state.loading {
        let loading = Paragraph::new(Line::styled("Loading tasks…", theme::dimmed())).block(block);
        frame.render_widget(loading, area);
        return;
    }

    let items: Vec<ListItem> = app
        .state
        .tasks
        .iter()
        .enumerate()
        .map(|(idx, task)| {
            let checkbox = if task.completed { "[✓]" } else { "[ ]" };
            let text_style = if task.completed {
                theme::dimmed()
            } else {
                theme::normal()
            };

            let mut spans = vec![
                Span::styled(checkbox, text_style),
                Span::raw(" "),
                Span::styled(format!("p{}", task.priority), theme::priority(task.priority)),
                Span::raw(" "),
                Span::styled(task.task.clone(), text_style),
            ];
            if !task.description.is_empty() {
                spans.push(Span::styled(
                    format!(" — {}", task.description),
                    theme::dimmed(),
                ));
            }

            let style = if idx == app.selected && is_focused {
                theme::selected()
            } else if idx == app.selected {
                theme::highlighted()
            } else {
                theme::normal()
            };
            ListItem::new(Line::from(spans)).style(style)
        })
        .collect();

    let list = List::new(items).block(block);
    frame.render_widget(list, area);
}
