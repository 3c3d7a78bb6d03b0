//! Conversation state for a single chat session.
//!
//! [`ConversationStore`] owns the append-only message log together with the
//! typing indicator and presence count. All of it sits behind one mutex so a
//! renderer never sees a log and a typing flag from different moments.
//!
//! Length changes are published on a [`watch`] channel; the presence engine
//! and the renderer's scroll handling both key off it.

pub mod seed;

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::watch;

use supportchat_proto::message::{Message, MessageId};
use supportchat_proto::presence::InboundEvent;

/// Errors returned when a mutation is refused.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AppendError {
    /// The message content is blank.
    #[error("message content is empty")]
    EmptyContent,

    /// The session owning this store has ended.
    #[error("conversation is closed")]
    Closed,
}

/// Mutable conversation state guarded by the store's mutex.
#[derive(Debug, Default)]
struct ConversationState {
    log: Vec<Message>,
    /// Handle of the counterpart currently composing, if any.
    typing: Option<String>,
    presence_count: u32,
    closed: bool,
}

struct Inner {
    state: Mutex<ConversationState>,
    /// Current log length, republished on every append.
    changes: watch::Sender<usize>,
}

/// Shared handle to a conversation's message log.
///
/// Cloning is cheap; all clones see the same state.
#[derive(Clone)]
pub struct ConversationStore {
    inner: Arc<Inner>,
}

impl ConversationStore {
    /// Creates a store seeded with `seed` and the given presence count.
    ///
    /// Seed messages are taken as-is, in order.
    #[must_use]
    pub fn new(seed: Vec<Message>, presence_count: u32) -> Self {
        let (changes, _) = watch::channel(seed.len());
        let state = ConversationState {
            log: seed,
            typing: None,
            presence_count,
            closed: false,
        };
        Self {
            inner: Arc::new(Inner {
                state: Mutex::new(state),
                changes,
            }),
        }
    }

    /// Appends a message to the end of the log and returns the new length.
    ///
    /// # Errors
    ///
    /// Returns [`AppendError::EmptyContent`] for blank content and
    /// [`AppendError::Closed`] once the store has been closed. In both cases
    /// the log is left untouched.
    pub fn append(&self, message: Message) -> Result<usize, AppendError> {
        if message.is_blank() {
            return Err(AppendError::EmptyContent);
        }

        let mut state = self.inner.state.lock();
        if state.closed {
            return Err(AppendError::Closed);
        }
        tracing::debug!(message_id = %message.id, sender = %message.sender, "append");
        state.log.push(message);
        let len = state.log.len();
        self.inner.changes.send_replace(len);
        Ok(len)
    }

    /// Returns a copy of the log in display order.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Message> {
        self.inner.state.lock().log.clone()
    }

    /// Number of messages in the log.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.state.lock().log.len()
    }

    /// Returns `true` if the log has no messages.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns `true` if a message with `id` is in the log.
    #[must_use]
    pub fn contains(&self, id: &MessageId) -> bool {
        self.inner.state.lock().log.iter().any(|m| &m.id == id)
    }

    /// Looks up a message by id.
    #[must_use]
    pub fn get(&self, id: &MessageId) -> Option<Message> {
        self.inner
            .state
            .lock()
            .log
            .iter()
            .find(|m| &m.id == id)
            .cloned()
    }

    /// Whether a counterpart is currently composing.
    #[must_use]
    pub fn is_typing(&self) -> bool {
        self.inner.state.lock().typing.is_some()
    }

    /// Handle of the counterpart currently composing, if any.
    #[must_use]
    pub fn typing_handle(&self) -> Option<String> {
        self.inner.state.lock().typing.clone()
    }

    /// Sets or clears the composing counterpart.
    ///
    /// Only one counterpart can be typing at a time; setting a new handle
    /// replaces the previous one.
    ///
    /// # Errors
    ///
    /// Returns [`AppendError::Closed`] once the store has been closed.
    pub fn set_typing(&self, handle: Option<String>) -> Result<(), AppendError> {
        let mut state = self.inner.state.lock();
        if state.closed {
            return Err(AppendError::Closed);
        }
        tracing::debug!(typing = ?handle, "typing changed");
        state.typing = handle;
        Ok(())
    }

    /// Number of participants shown as online.
    #[must_use]
    pub fn presence_count(&self) -> u32 {
        self.inner.state.lock().presence_count
    }

    /// Replaces the online participant count.
    ///
    /// Ignored once the store has been closed.
    pub fn set_presence_count(&self, count: u32) {
        let mut state = self.inner.state.lock();
        if !state.closed {
            state.presence_count = count;
        }
    }

    /// Applies a counterpart event.
    ///
    /// A stop notice only clears the indicator if it comes from the handle
    /// that is currently typing.
    ///
    /// # Errors
    ///
    /// Returns [`AppendError`] if the underlying mutation is refused.
    pub fn apply(&self, event: InboundEvent) -> Result<(), AppendError> {
        match event {
            InboundEvent::Typing(notice) if notice.is_typing => {
                self.set_typing(Some(notice.handle))
            }
            InboundEvent::Typing(notice) => {
                let mut state = self.inner.state.lock();
                if state.closed {
                    return Err(AppendError::Closed);
                }
                if state.typing.as_deref() == Some(notice.handle.as_str()) {
                    tracing::debug!(handle = %notice.handle, "typing stopped");
                    state.typing = None;
                }
                Ok(())
            }
            InboundEvent::MessageArrived(message) => self.append(message).map(|_| ()),
        }
    }

    /// Subscribes to log length changes.
    ///
    /// The receiver's current value is the length at subscription time.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<usize> {
        self.inner.changes.subscribe()
    }

    /// Closes the store. Every later mutation is refused.
    pub fn close(&self) {
        let mut state = self.inner.state.lock();
        if !state.closed {
            tracing::debug!(len = state.log.len(), "conversation closed");
            state.closed = true;
        }
    }

    /// Whether [`close`](Self::close) has been called.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.inner.state.lock().closed
    }
}

impl std::fmt::Debug for ConversationStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.inner.state.lock();
        f.debug_struct("ConversationStore")
            .field("len", &state.log.len())
            .field("typing", &state.typing)
            .field("presence_count", &state.presence_count)
            .field("closed", &state.closed)
            .finish()
    }
}
