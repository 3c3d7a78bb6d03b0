//! Terminal UI rendering.

pub mod chat_panel;
pub mod status_bar;
pub mod theme;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
};

use crate::app::App;

/// Main draw function for the entire UI.
pub fn draw(frame: &mut Frame, app: &App) {
    let view = app.view();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Length(4), // Safety notice
            Constraint::Min(3),    // Chat
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    chat_panel::render_header(frame, chunks[0], &view);
    chat_panel::render_notice(frame, chunks[1]);
    chat_panel::render(frame, chunks[2], app, &view);
    status_bar::render(frame, chunks[3], app);
}
