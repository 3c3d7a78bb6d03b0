//! Render-ready view of a session.
//!
//! Everything here is derived from the store on demand; nothing is cached
//! between frames.

use std::fmt::Write as _;

use chrono::{Local, TimeZone};

use supportchat_proto::message::{Message, MessageId, Mood, Timestamp};

use crate::session::{ChatSession, SessionContext, TopicCatalog};

/// Icon shown next to a message's sender.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoodIcon {
    /// Positive mood.
    Heart,
    /// Concerned mood.
    Alert,
    /// Neutral or untagged.
    Smile,
}

impl MoodIcon {
    /// Icon for an optional mood.
    #[must_use]
    pub const fn for_mood(mood: Option<Mood>) -> Self {
        match mood {
            Some(Mood::Positive) => Self::Heart,
            Some(Mood::Concerned) => Self::Alert,
            Some(Mood::Neutral) | None => Self::Smile,
        }
    }

    /// Terminal glyph for this icon.
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::Heart => "\u{2665}",
            Self::Alert => "\u{26a0}",
            Self::Smile => "\u{263a}",
        }
    }
}

/// A message prepared for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayMessage {
    /// Message id (for reporting).
    pub id: MessageId,
    /// Sender's display handle.
    pub sender: String,
    /// Message content.
    pub content: String,
    /// Wall-clock time, e.g. "14:23".
    pub clock_time: String,
    /// Age relative to render time, e.g. "5m ago".
    pub relative_time: String,
    /// Icon derived from the mood.
    pub mood_icon: MoodIcon,
    /// Authored by the local participant.
    pub is_mine: bool,
}

impl DisplayMessage {
    /// Derives display fields for `message`.
    #[must_use]
    pub fn from_message(
        message: &Message,
        context: &SessionContext,
        now: Timestamp,
        clock_format: &str,
    ) -> Self {
        Self {
            id: message.id.clone(),
            sender: message.sender.clone(),
            content: message.content.clone(),
            clock_time: format_clock(message.timestamp, clock_format),
            relative_time: format_relative(message.timestamp, now),
            mood_icon: MoodIcon::for_mood(message.mood),
            is_mine: context.is_local(message),
        }
    }
}

/// Everything the renderer needs for one frame.
#[derive(Debug, Clone)]
pub struct ChatView {
    /// Messages in display order.
    pub messages: Vec<DisplayMessage>,
    /// A counterpart is composing.
    pub is_typing: bool,
    /// Participants shown as online.
    pub presence_count: u32,
    /// Topic title for the header.
    pub topic_title: String,
    /// The local participant's handle.
    pub handle: String,
}

impl ChatView {
    /// Builds a view of `session` as of `now`.
    #[must_use]
    pub fn build(
        session: &ChatSession,
        catalog: &dyn TopicCatalog,
        now: Timestamp,
        clock_format: &str,
    ) -> Self {
        let context = session.context();
        let store = session.store();
        let messages = store
            .snapshot()
            .iter()
            .map(|m| DisplayMessage::from_message(m, context, now, clock_format))
            .collect();
        Self {
            messages,
            is_typing: store.is_typing(),
            presence_count: store.presence_count(),
            topic_title: context.topic_title(catalog),
            handle: context.handle().to_string(),
        }
    }
}

const UNKNOWN_CLOCK: &str = "??:??";

/// Formats `ts` in local time using a chrono format string.
///
/// An unrepresentable time or an invalid format gives `"??:??"`.
#[must_use]
pub fn format_clock(ts: Timestamp, format: &str) -> String {
    let Ok(millis) = i64::try_from(ts.as_millis()) else {
        return UNKNOWN_CLOCK.to_string();
    };
    let chrono::LocalResult::Single(dt) = Local.timestamp_millis_opt(millis) else {
        return UNKNOWN_CLOCK.to_string();
    };
    let mut out = String::new();
    if write!(out, "{}", dt.format(format)).is_err() {
        return UNKNOWN_CLOCK.to_string();
    }
    out
}

/// Formats the age of `ts` relative to `now`.
///
/// Timestamps in the future read as "just now".
#[must_use]
pub fn format_relative(ts: Timestamp, now: Timestamp) -> String {
    let secs = now.as_millis().saturating_sub(ts.as_millis()) / 1000;
    match secs {
        0..60 => "just now".to_string(),
        60..3600 => format!("{}m ago", secs / 60),
        3600..86_400 => format!("{}h ago", secs / 3600),
        _ => format!("{}d ago", secs / 86_400),
    }
}
