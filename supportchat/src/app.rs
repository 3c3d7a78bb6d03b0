//! Application state and event handling.

use std::collections::HashMap;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use supportchat_proto::message::{MAX_CONTENT_CHARS, Timestamp, ValidationError};

use crate::display::ChatView;
use crate::session::{ChatSession, SendError};

/// Main application state.
pub struct App {
    /// Current text input.
    pub input: String,
    /// Cursor position in input (character index).
    pub cursor_position: usize,
    /// Highlighted message index. `None` follows the newest message.
    pub selected: Option<usize>,
    /// One-line feedback shown in the status bar.
    pub notice: Option<String>,
    /// Whether the app should quit.
    pub should_quit: bool,
    session: ChatSession,
    topics: HashMap<String, String>,
    timestamp_format: String,
    /// Log length at the last tick, for scroll-into-view.
    seen_len: usize,
}

impl App {
    /// Create the app around an open session.
    #[must_use]
    pub fn new(session: ChatSession) -> Self {
        let seen_len = session.store().len();
        Self {
            input: String::new(),
            cursor_position: 0,
            selected: None,
            notice: None,
            should_quit: false,
            session,
            topics: HashMap::new(),
            timestamp_format: "%H:%M".to_string(),
            seen_len,
        }
    }

    /// Set the topic titles used for the header.
    #[must_use]
    pub fn with_topics(mut self, topics: HashMap<String, String>) -> Self {
        self.topics = topics;
        self
    }

    /// Set the clock format for message timestamps.
    #[must_use]
    pub fn with_timestamp_format(mut self, format: impl Into<String>) -> Self {
        self.timestamp_format = format.into();
        self
    }

    /// The underlying session.
    #[must_use]
    pub const fn session(&self) -> &ChatSession {
        &self.session
    }

    /// Build the view for the current frame.
    #[must_use]
    pub fn view(&self) -> ChatView {
        ChatView::build(
            &self.session,
            &self.topics,
            Timestamp::now(),
            &self.timestamp_format,
        )
    }

    /// Handle a key event.
    pub fn handle_key_event(&mut self, key: KeyEvent) {
        match (key.code, key.modifiers) {
            (KeyCode::Char('c'), KeyModifiers::CONTROL) | (KeyCode::Esc, _) => {
                self.should_quit = true;
            }
            (KeyCode::Char('r'), KeyModifiers::CONTROL) => self.report_selected(),
            (KeyCode::Enter, m) if m.contains(KeyModifiers::SHIFT) => {}
            (KeyCode::Enter, _) => self.submit_message(),
            (KeyCode::Char(c), KeyModifiers::NONE | KeyModifiers::SHIFT) => self.enter_char(c),
            (KeyCode::Backspace, _) => self.delete_char(),
            (KeyCode::Left, _) => self.move_cursor_left(),
            (KeyCode::Right, _) => self.move_cursor_right(),
            (KeyCode::Home, _) => self.cursor_position = 0,
            (KeyCode::End, _) => self.cursor_position = self.input_len(),
            (KeyCode::Up, _) => self.select_previous(),
            (KeyCode::Down, _) => self.select_next(),
            _ => {}
        }
    }

    /// React to store changes since the last tick.
    ///
    /// Any growth of the log scrolls the newest message into view.
    pub fn tick(&mut self) {
        let len = self.session.store().len();
        if len != self.seen_len {
            self.seen_len = len;
            self.selected = None;
        }
    }

    /// End the session.
    pub fn shutdown(&mut self) {
        self.session.shutdown();
    }

    /// Submit the current input as a message.
    ///
    /// Blank input is ignored and left in place.
    fn submit_message(&mut self) {
        match self.session.send(&self.input) {
            Ok(_) => {
                self.input.clear();
                self.cursor_position = 0;
                self.notice = None;
                self.tick();
            }
            Err(SendError::Validation(ValidationError::Empty)) => {}
            Err(e) => {
                tracing::warn!(error = %e, "message not sent");
                self.notice = Some(e.to_string());
            }
        }
    }

    /// Report the highlighted message, or the newest one from someone else.
    fn report_selected(&mut self) {
        let log = self.session.store().snapshot();
        let target = match self.selected {
            Some(i) => log.get(i),
            None => log
                .iter()
                .rev()
                .find(|m| !self.session.context().is_local(m)),
        };
        let Some(target) = target else {
            self.notice = Some("Nothing to report".to_string());
            return;
        };
        self.notice = Some(match self.session.report(&target.id) {
            Ok(_) => format!("Reported message from {}", target.sender),
            Err(e) => e.to_string(),
        });
    }

    fn input_len(&self) -> usize {
        self.input.chars().count()
    }

    /// Byte offset of the cursor.
    fn cursor_byte(&self) -> usize {
        self.input
            .char_indices()
            .nth(self.cursor_position)
            .map_or(self.input.len(), |(i, _)| i)
    }

    /// Insert a character at the cursor position, up to the length cap.
    fn enter_char(&mut self, c: char) {
        if self.input_len() >= MAX_CONTENT_CHARS {
            return;
        }
        let at = self.cursor_byte();
        self.input.insert(at, c);
        self.cursor_position += 1;
    }

    /// Delete the character before the cursor.
    fn delete_char(&mut self) {
        if self.cursor_position > 0 {
            self.cursor_position -= 1;
            let at = self.cursor_byte();
            self.input.remove(at);
        }
    }

    /// Move cursor left.
    const fn move_cursor_left(&mut self) {
        if self.cursor_position > 0 {
            self.cursor_position -= 1;
        }
    }

    /// Move cursor right.
    fn move_cursor_right(&mut self) {
        if self.cursor_position < self.input_len() {
            self.cursor_position += 1;
        }
    }

    fn select_previous(&mut self) {
        let len = self.session.store().len();
        if len == 0 {
            return;
        }
        self.selected = Some(match self.selected {
            Some(i) => i.saturating_sub(1),
            None => len - 1,
        });
    }

    fn select_next(&mut self) {
        let len = self.session.store().len();
        self.selected = match self.selected {
            Some(i) if i + 1 < len => Some(i + 1),
            _ => None,
        };
    }
}
