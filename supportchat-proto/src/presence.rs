//! Inbound counterpart events.
//!
//! [`InboundEvent`] is everything a counterpart source can do to a
//! conversation: toggle its typing indicator or deliver a message. The
//! simulated presence engine produces these today; a real transport would
//! feed the same type.

use serde::{Deserialize, Serialize};

use crate::message::Message;
use crate::typing::TypingNotice;

/// An event arriving from a counterpart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum InboundEvent {
    /// A counterpart started or stopped composing.
    Typing(TypingNotice),
    /// A counterpart message was delivered.
    MessageArrived(Message),
}

impl InboundEvent {
    /// Handle of the counterpart responsible for this event.
    #[must_use]
    pub fn handle(&self) -> &str {
        match self {
            Self::Typing(notice) => &notice.handle,
            Self::MessageArrived(message) => &message.sender,
        }
    }
}
