//! Create/edit form rendering.

use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use super::theme;
use crate::app::{App, Focus};

/// Render the create/edit form panel.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let form_focused = matches!(
        app.focus,
        Focus::TaskField | Focus::DescriptionField | Focus::PriorityField
    );

    let title = if app.form.edit_index.is_some() {
        "Edit task"
    } else {
        "New task"
    };

    let lines = vec![
        field_line("Task", &app.form.task, app.focus == Focus::TaskField),
        field_line(
            "Description",
            &app.form.description,
            app.focus == Focus::DescriptionField,
        ),
        field_line(
            "Priority",
            &app.form.priority,
            app.focus == Focus::PriorityField,
        ),
        Line::raw(""),
        Line::styled("Enter: save   Tab: next field   Esc: cancel", theme::dimmed()),
    ];

    let block = Block::default()
        .title(Span::styled(title, theme::panel_title(theme::FORM_TITLE)))
        .borders(Borders::ALL)
        .border_style(if form_focused {
            theme::highlighted()
        } else {
            theme::normal()
        });

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// One labeled input line, with a cursor marker on the focused field.
fn field_line<'a>(label: &'a str, value: &'a str, focused: bool) -> Line<'a> {
    let label_style = if focused {
        theme::highlighted()
    } else {
        theme::dimmed()
    };

    let mut spans = vec![
        Span::styled(format!("{label:>11}: "), label_style),
        Span::styled(value, theme::normal()),
    ];
    if focused {
        spans.push(Span::styled("▏", theme::input_cursor()));
    }
    Line::from(spans)
}
