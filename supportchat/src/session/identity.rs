//! Session identity and topic lookup.

use std::collections::HashMap;
use std::sync::Arc;

use supportchat_proto::message::Message;

/// Handle used when the identity provider has none.
pub const ANONYMOUS_HANDLE: &str = "Anonymous-User";

/// Title shown when the session has no topic.
pub const GENERAL_TOPIC_TITLE: &str = "General Support";

/// Source of the local participant's identity.
pub trait IdentityProvider {
    /// The participant's ephemeral display handle, if one was assigned.
    fn ephemeral_handle(&self) -> Option<String>;

    /// The topic the participant opened the chat from, if any.
    fn current_topic_id(&self) -> Option<String>;
}

/// An [`IdentityProvider`] with fixed values (from config or CLI).
#[derive(Debug, Clone, Default)]
pub struct StaticIdentity {
    /// Display handle.
    pub handle: Option<String>,
    /// Topic identifier.
    pub topic_id: Option<String>,
}

impl IdentityProvider for StaticIdentity {
    fn ephemeral_handle(&self) -> Option<String> {
        self.handle.clone()
    }

    fn current_topic_id(&self) -> Option<String> {
        self.topic_id.clone()
    }
}

/// Resolves topic ids to display titles.
pub trait TopicCatalog: Send + Sync {
    /// Title for `topic_id`, if known.
    fn title(&self, topic_id: &str) -> Option<String>;
}

impl TopicCatalog for HashMap<String, String> {
    fn title(&self, topic_id: &str) -> Option<String> {
        self.get(topic_id).cloned()
    }
}

/// Immutable identity of the local participant for one session.
///
/// Captured once when the session starts; the handle it holds is the only
/// thing used to tell "mine" from "theirs".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionContext {
    handle: Arc<str>,
    topic_id: Option<Arc<str>>,
}

impl SessionContext {
    /// Builds a context, falling back to [`ANONYMOUS_HANDLE`] when `handle`
    /// is missing or blank. A non-blank handle is kept verbatim.
    #[must_use]
    pub fn new(handle: Option<String>, topic_id: Option<String>) -> Self {
        let handle = match handle {
            Some(h) if !h.trim().is_empty() => h,
            _ => {
                tracing::info!("no ephemeral handle available, using anonymous label");
                ANONYMOUS_HANDLE.to_string()
            }
        };
        let topic_id = topic_id.filter(|t| !t.trim().is_empty());
        Self {
            handle: handle.into(),
            topic_id: topic_id.map(Into::into),
        }
    }

    /// Reads identity once from `provider`.
    #[must_use]
    pub fn from_provider(provider: &dyn IdentityProvider) -> Self {
        Self::new(provider.ephemeral_handle(), provider.current_topic_id())
    }

    /// The local participant's display handle.
    #[must_use]
    pub fn handle(&self) -> &str {
        &self.handle
    }

    /// The session's topic id, if any.
    #[must_use]
    pub fn topic_id(&self) -> Option<&str> {
        self.topic_id.as_deref()
    }

    /// Whether `message` was authored by the local participant.
    #[must_use]
    pub fn is_local(&self, message: &Message) -> bool {
        message.sender == *self.handle
    }

    /// Display title for the session's topic.
    ///
    /// No topic gives [`GENERAL_TOPIC_TITLE`]; a topic the catalog doesn't
    /// know is shown by its id.
    #[must_use]
    pub fn topic_title(&self, catalog: &dyn TopicCatalog) -> String {
        match self.topic_id() {
            None => GENERAL_TOPIC_TITLE.to_string(),
            Some(id) => catalog.title(id).unwrap_or_else(|| id.to_string()),
        }
    }
}
