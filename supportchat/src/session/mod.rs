//! Chat session lifecycle.
//!
//! A [`ChatSession`] ties together the local participant's
//! [`SessionContext`], the [`ConversationStore`] and the simulated presence
//! engine task. It is the only owner of the engine: shutting the session
//! down (explicitly or on drop) aborts the task and closes the store, so no
//! timer can fire into a discarded conversation.

pub mod identity;
pub mod report;

use std::sync::Arc;

use tokio::task::JoinHandle;

use supportchat_proto::message::{Message, MessageId, Timestamp, ValidationError};
use supportchat_proto::report::ReportRequest;

use crate::chat::{AppendError, ConversationStore, seed};
use crate::presence::{EngineConfig, PresenceEngine};

pub use identity::{IdentityProvider, SessionContext, StaticIdentity, TopicCatalog};
pub use report::{LoggingModerationSink, ModerationSink};

/// Errors from sending local input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SendError {
    /// The input failed validation (blank or too long).
    #[error("invalid input: {0}")]
    Validation(#[from] ValidationError),

    /// The store refused the message.
    #[error(transparent)]
    Append(#[from] AppendError),
}

/// Errors from filing a report.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReportError {
    /// No message with this id is in the conversation.
    #[error("unknown message: {0}")]
    UnknownMessage(MessageId),
}

/// Settings for starting a session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Participants shown as online.
    pub presence_count: u32,
    /// Seed the log with the welcome messages.
    pub seed_welcome: bool,
    /// Simulated counterpart settings.
    pub engine: EngineConfig,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            presence_count: 3,
            seed_welcome: true,
            engine: EngineConfig::default(),
        }
    }
}

/// One open chat session.
pub struct ChatSession {
    context: SessionContext,
    store: ConversationStore,
    engine: Option<JoinHandle<()>>,
    moderation: Arc<dyn ModerationSink>,
}

impl ChatSession {
    /// Opens a session and starts its presence engine.
    ///
    /// Must be called from within a tokio runtime.
    #[must_use]
    pub fn start(context: SessionContext, config: &SessionConfig) -> Self {
        let initial = if config.seed_welcome {
            seed::welcome_messages(Timestamp::now())
        } else {
            Vec::new()
        };
        Self::start_with_seed(context, config, initial)
    }

    /// Opens a session whose log starts with `seed`.
    ///
    /// `config.seed_welcome` is ignored.
    #[must_use]
    pub fn start_with_seed(
        context: SessionContext,
        config: &SessionConfig,
        seed: Vec<Message>,
    ) -> Self {
        let store = ConversationStore::new(seed, config.presence_count);
        let engine = PresenceEngine::new(config.engine.clone(), store.clone()).spawn();

        tracing::info!(
            handle = %context.handle(),
            topic = ?context.topic_id(),
            seeded = store.len(),
            "chat session started"
        );

        Self {
            context,
            store,
            engine: Some(engine),
            moderation: Arc::new(LoggingModerationSink),
        }
    }

    /// Replaces the moderation sink that receives reports.
    #[must_use]
    pub fn with_moderation(mut self, sink: Arc<dyn ModerationSink>) -> Self {
        self.moderation = sink;
        self
    }

    /// The local participant's identity.
    #[must_use]
    pub const fn context(&self) -> &SessionContext {
        &self.context
    }

    /// The conversation store.
    #[must_use]
    pub const fn store(&self) -> &ConversationStore {
        &self.store
    }

    /// Sends local input as a message from this participant.
    ///
    /// Surrounding whitespace is trimmed and the mood is always neutral.
    ///
    /// # Errors
    ///
    /// Returns [`SendError::Validation`] for blank or over-long input and
    /// [`SendError::Append`] if the session has ended. The log is unchanged
    /// on error.
    pub fn send(&self, raw: &str) -> Result<MessageId, SendError> {
        let message = Message::local(self.context.handle(), raw)?;
        let id = message.id.clone();
        let len = self.store.append(message)?;
        tracing::debug!(message_id = %id, len, "local message sent");
        Ok(id)
    }

    /// Files a report about message `id` with the moderation sink.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::UnknownMessage`] if `id` is not in the log.
    pub fn report(&self, id: &MessageId) -> Result<ReportRequest, ReportError> {
        let message = self
            .store
            .get(id)
            .ok_or_else(|| ReportError::UnknownMessage(id.clone()))?;
        let request = ReportRequest {
            message_id: message.id,
            reported_sender: message.sender,
            reporter: self.context.handle().to_string(),
            topic_id: self.context.topic_id().map(str::to_string),
            timestamp: Timestamp::now(),
        };
        self.moderation.report(&request);
        Ok(request)
    }

    /// Whether the session is still open.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.engine.is_some() && !self.store.is_closed()
    }

    /// Ends the session: stops the presence engine and closes the store.
    ///
    /// The store keeps its last state for reading. Calling this twice is a
    /// no-op.
    pub fn shutdown(&mut self) {
        if let Some(engine) = self.engine.take() {
            self.store.close();
            engine.abort();
            tracing::info!(len = self.store.len(), "chat session ended");
        }
    }
}

impl Drop for ChatSession {
    fn drop(&mut self) {
        self.shutdown();
    }
}
