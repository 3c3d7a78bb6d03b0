//! Chat screen rendering (header, safety notice, messages, input).

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span, Text},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
};

use super::theme;
use crate::app::App;
use crate::display::{ChatView, DisplayMessage};

/// Render the header: title, topic, online count and anonymity badge.
pub fn render_header(frame: &mut Frame, area: Rect, view: &ChatView) {
    let line = Line::from(vec![
        Span::styled("Anonymous Support Chat", theme::highlighted()),
        Span::raw("  "),
        Span::styled(&view.topic_title, theme::dimmed()),
        Span::raw("  |  "),
        Span::styled("\u{25cf} ", theme::normal().fg(theme::SUCCESS)),
        Span::raw(format!("{} online", view.presence_count)),
        Span::raw("  |  "),
        Span::styled("Anonymous", theme::bold()),
    ]);
    let block = Block::default().borders(Borders::ALL);
    frame.render_widget(Paragraph::new(line).block(block), area);
}

/// Render the safety guidelines notice.
pub fn render_notice(frame: &mut Frame, area: Rect) {
    let text = Text::from(vec![
        Line::from(Span::styled("Safe Space Guidelines", theme::bold())),
        Line::from(Span::styled(
            "This chat is moderated for safety. Be respectful, supportive, and remember \
             all conversations are anonymous.",
            theme::dimmed(),
        )),
    ]);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::highlighted());
    frame.render_widget(
        Paragraph::new(text).block(block).wrap(Wrap { trim: true }),
        area,
    );
}

/// Render the chat panel (messages, typing line, input box, footer).
pub fn render(frame: &mut Frame, area: Rect, app: &App, view: &ChatView) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(1),
        ])
        .split(area);

    render_messages(frame, chunks[0], app, view);
    render_typing(frame, chunks[1], view);
    render_input(frame, chunks[2], app);
    render_footer(frame, chunks[3]);
}

/// Render the message list, keeping the selected (or newest) message in view.
fn render_messages(frame: &mut Frame, area: Rect, app: &App, view: &ChatView) {
    let items: Vec<ListItem> = view.messages.iter().map(message_item).collect();

    let block = Block::default()
        .title(Line::from(vec![
            Span::styled("\u{25cf} ", theme::normal().fg(theme::SUCCESS)),
            Span::styled("Connected to anonymous support chat", theme::dimmed()),
        ]))
        .borders(Borders::ALL);

    let list = List::new(items)
        .block(block)
        .highlight_style(theme::selected());

    let mut state = ListState::default();
    if app.selected.is_some() {
        state.select(app.selected);
    } else if !view.messages.is_empty() {
        // Follow the newest message without highlighting it.
        *state.offset_mut() = view.messages.len().saturating_sub(visible_items(area));
    }

    frame.render_stateful_widget(list, area, &mut state);
}

/// Roughly how many two-line messages fit inside a bordered area.
const fn visible_items(area: Rect) -> usize {
    (area.height.saturating_sub(2) / 3) as usize
}

fn message_item(msg: &DisplayMessage) -> ListItem<'_> {
    let alignment = if msg.is_mine {
        Alignment::Right
    } else {
        Alignment::Left
    };
    let body_style = if msg.is_mine {
        theme::own_message()
    } else {
        theme::normal()
    };

    let meta = Line::from(vec![
        Span::styled(
            format!("[{}]", msg.sender),
            theme::normal().fg(theme::sender_color(&msg.sender)),
        ),
        Span::raw(" "),
        Span::styled(
            msg.mood_icon.symbol(),
            theme::normal().fg(theme::mood_color(msg.mood_icon)),
        ),
        Span::raw(" "),
        Span::styled(&msg.clock_time, theme::dimmed()),
        Span::styled(format!(" ({})", msg.relative_time), theme::dimmed()),
    ])
    .alignment(alignment);

    let body = Line::from(Span::styled(&msg.content, body_style)).alignment(alignment);

    ListItem::new(Text::from(vec![meta, body, Line::raw("")]))
}

/// Render the typing indicator line.
fn render_typing(frame: &mut Frame, area: Rect, view: &ChatView) {
    let line = if view.is_typing {
        Line::from(Span::styled(
            " \u{2022}\u{2022}\u{2022} Someone is typing...",
            theme::italic_dimmed(),
        ))
    } else {
        Line::raw("")
    };
    frame.render_widget(Paragraph::new(line), area);
}

/// Render the input box.
fn render_input(frame: &mut Frame, area: Rect, app: &App) {
    let mut display_text = app.input.clone();
    let cursor_byte = display_text
        .char_indices()
        .nth(app.cursor_position)
        .map_or(display_text.len(), |(i, _)| i);
    display_text.insert(cursor_byte, '\u{2588}');

    let input_line = if app.input.is_empty() {
        Line::from(vec![
            Span::styled("\u{2588}", theme::normal()),
            Span::styled("Share what's on your mind...", theme::dimmed()),
        ])
    } else {
        Line::from(Span::styled(display_text, theme::normal()))
    };

    let counter = format!(
        " {}/{} ",
        app.input.chars().count(),
        supportchat_proto::message::MAX_CONTENT_CHARS
    );
    let block = Block::default()
        .title("Message")
        .title_bottom(Line::from(counter).alignment(Alignment::Right))
        .borders(Borders::ALL)
        .border_style(theme::highlighted());

    frame.render_widget(Paragraph::new(input_line).block(block), area);
}

/// Render the policy footer and report hint.
fn render_footer(frame: &mut Frame, area: Rect) {
    let line = Line::from(vec![
        Span::styled(
            "Messages are encrypted and auto-delete after 30 days",
            theme::italic_dimmed(),
        ),
        Span::raw("   "),
        Span::styled(
            "Ctrl+R: Report inappropriate content",
            theme::normal().fg(theme::DESTRUCTIVE),
        ),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}
