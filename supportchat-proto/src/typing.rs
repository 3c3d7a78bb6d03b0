//! Typing indicator notices.

use serde::{Deserialize, Serialize};

/// Announces that a counterpart started or stopped composing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypingNotice {
    /// Display handle of the counterpart.
    pub handle: String,
    /// Whether the counterpart is currently typing (`true`) or stopped (`false`).
    pub is_typing: bool,
}

impl TypingNotice {
    /// A notice that `handle` started typing.
    #[must_use]
    pub fn started(handle: impl Into<String>) -> Self {
        Self {
            handle: handle.into(),
            is_typing: true,
        }
    }

    /// A notice that `handle` stopped typing.
    #[must_use]
    pub fn stopped(handle: impl Into<String>) -> Self {
        Self {
            handle: handle.into(),
            is_typing: false,
        }
    }
}
