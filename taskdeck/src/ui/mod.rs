//! Terminal UI rendering.

pub mod form;
pub mod status_bar;
pub mod task_list;
pub mod theme;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
    text::Line,
    widgets::Paragraph,
};

use crate::app::App;

/// Main draw function for the entire UI.
pub fn draw(frame: &mut Frame, app: &App) {
    // Reserve a banner row only while an error message is showing.
    let constraints: Vec<Constraint> = if app.state.error.is_some() {
        vec![
            Constraint::Min(3),
            Constraint::Length(1),
            Constraint::Length(1),
        ]
    } else {
        vec![Constraint::Min(3), Constraint::Length(1)]
    };

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(frame.area());

    let content_area = main_chunks[0];
    if let Some(error) = &app.state.error {
        let banner = Paragraph::new(Line::raw(format!(" {error}"))).style(theme::error_banner());
        frame.render_widget(banner, main_chunks[1]);
    }
    let status_area = main_chunks[main_chunks.len() - 1];

    // Two-column layout: the list mirror and the create/edit form.
    let content_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(content_area);

    task_list::render(frame, content_chunks[0], app);
    form::render(frame, content_chunks[1], app);
    status_bar::render(frame, status_area, app);
}
