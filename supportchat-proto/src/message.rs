//! Message model for the `SupportChat` conversation log.
//!
//! Every entry shown in the thread is a [`Message`]. Messages are created
//! either from local user input (see [`normalize_input`]) or synthetically by
//! a presence source, and are never edited after they enter the log.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Maximum number of characters accepted from the local input surface.
pub const MAX_CONTENT_CHARS: usize = 500;

/// Unique identifier for a message (UUID v7).
///
/// Only identity matters: display order is the log's insertion order, not
/// the ordering of ids.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MessageId(Uuid);

impl MessageId {
    /// Creates a new message identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Creates a `MessageId` from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the inner UUID value.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for MessageId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for MessageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Millisecond-precision UTC timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Timestamp(u64);

impl Timestamp {
    /// Creates a timestamp for the current instant.
    #[must_use]
    pub fn now() -> Self {
        let millis = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis();
        Self(u64::try_from(millis).unwrap_or(u64::MAX))
    }

    /// Creates a timestamp from milliseconds since the UNIX epoch.
    #[must_use]
    pub const fn from_millis(millis: u64) -> Self {
        Self(millis)
    }

    /// Returns the timestamp as milliseconds since the UNIX epoch.
    #[must_use]
    pub const fn as_millis(&self) -> u64 {
        self.0
    }

    /// Returns a timestamp `millis` earlier, saturating at the epoch.
    #[must_use]
    pub const fn minus_millis(&self, millis: u64) -> Self {
        Self(self.0.saturating_sub(millis))
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}ms", self.0)
    }
}

/// Informational mood tag attached to a message.
///
/// Mood never affects ordering or delivery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mood {
    /// Encouraging or upbeat.
    Positive,
    /// No particular tone. Every locally authored message gets this.
    Neutral,
    /// The author is struggling.
    Concerned,
}

impl std::fmt::Display for Mood {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Positive => write!(f, "positive"),
            Self::Neutral => write!(f, "neutral"),
            Self::Concerned => write!(f, "concerned"),
        }
    }
}

/// A single entry in the conversation log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Unique identifier for this message.
    pub id: MessageId,
    /// Display handle of the author.
    pub sender: String,
    /// Message text.
    pub content: String,
    /// When the message was created.
    pub timestamp: Timestamp,
    /// Optional mood tag.
    pub mood: Option<Mood>,
}

impl Message {
    /// Builds a message authored by the local participant.
    ///
    /// The raw input is normalized with [`normalize_input`] and the mood is
    /// always [`Mood::Neutral`]; no tone is inferred from the text.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] if the input is blank or too long.
    pub fn local(sender: impl Into<String>, raw: &str) -> Result<Self, ValidationError> {
        let content = normalize_input(raw)?;
        Ok(Self {
            id: MessageId::new(),
            sender: sender.into(),
            content,
            timestamp: Timestamp::now(),
            mood: Some(Mood::Neutral),
        })
    }

    /// Builds a message from a counterpart or seed source.
    ///
    /// No length rule is applied here; synthetic content is trusted.
    #[must_use]
    pub fn synthetic(
        sender: impl Into<String>,
        content: impl Into<String>,
        timestamp: Timestamp,
        mood: Option<Mood>,
    ) -> Self {
        Self {
            id: MessageId::new(),
            sender: sender.into(),
            content: content.into(),
            timestamp,
            mood,
        }
    }

    /// Returns `true` if the content is blank after trimming.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.content.trim().is_empty()
    }
}

/// Error returned when local input fails validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// Input is empty or whitespace only.
    #[error("message content is empty")]
    Empty,
    /// Input exceeds [`MAX_CONTENT_CHARS`].
    #[error("message too long ({chars} characters, max {max})")]
    TooLong {
        /// Character count after trimming.
        chars: usize,
        /// Maximum allowed characters.
        max: usize,
    },
}

/// Trims surrounding whitespace and checks the result against the input rules.
///
/// # Errors
///
/// Returns [`ValidationError::Empty`] for blank input, or
/// [`ValidationError::TooLong`] if the trimmed text is over
/// [`MAX_CONTENT_CHARS`] characters.
pub fn normalize_input(raw: &str) -> Result<String, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Empty);
    }
    let chars = trimmed.chars().count();
    if chars > MAX_CONTENT_CHARS {
        return Err(ValidationError::TooLong {
            chars,
            max: MAX_CONTENT_CHARS,
        });
    }
    Ok(trimmed.to_string())
}
