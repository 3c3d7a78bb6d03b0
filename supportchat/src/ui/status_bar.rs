//! Status bar rendering.

use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
};

use super::theme;
use crate::app::App;

/// Render the status bar at the bottom of the screen.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let help_text = "Enter: send | \u{2191}\u{2193}: select | Ctrl+R: report | Esc: quit";

    let mut spans = vec![
        Span::styled("SupportChat v0.1.0", theme::bold()),
        Span::raw(" | "),
        Span::raw(format!("You are {}", app.session().context().handle())),
        Span::raw(" | "),
    ];
    match &app.notice {
        Some(notice) => spans.push(Span::styled(notice.as_str(), theme::normal().fg(theme::WARNING))),
        None => spans.push(Span::styled(help_text, theme::dimmed())),
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(theme::status_bar_bg());
    frame.render_widget(paragraph, area);
}
