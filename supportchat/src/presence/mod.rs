//! Simulated counterpart activity.
//!
//! [`PresenceEngine`] watches the conversation length and, once it passes a
//! threshold, plays out one counterpart turn: wait, show a typing indicator,
//! wait again, then deliver a supportive reply. It stands in for the inbound
//! side of a real transport and only talks to the store through
//! [`InboundEvent`]s.
//!
//! The engine is a single tokio task with at most one pending timer chain:
//!
//! ```text
//! Idle --(len > threshold)--> Armed --(arm_delay)--> Typing --(typing_delay)--> Idle + reply
//!            ^                  |
//!            +--(len changed)---+  restart arm_delay
//! ```
//!
//! Length changes while `Typing` are absorbed; the reply that ends the
//! typing phase is itself a length change and re-arms the engine.

use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{Instant, sleep_until};

use supportchat_proto::message::{Message, Mood, Timestamp};
use supportchat_proto::presence::InboundEvent;
use supportchat_proto::typing::TypingNotice;

use crate::chat::{AppendError, ConversationStore};

/// Handle used for the simulated counterpart.
pub const DEFAULT_REPLY_HANDLE: &str = "Support-Friend-K3L8";

/// Text of the simulated reply.
pub const DEFAULT_REPLY_CONTENT: &str = "I appreciate everyone sharing here. It really helps to know we're not going through this alone. \u{1f499}";

/// Timing and content of the simulated counterpart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// The engine arms once the log holds more than this many messages.
    pub threshold: usize,
    /// Delay between arming and the typing indicator.
    pub arm_delay: Duration,
    /// How long the typing indicator shows before the reply lands.
    pub typing_delay: Duration,
    /// Sender handle of the reply.
    pub reply_handle: String,
    /// Content of the reply.
    pub reply_content: String,
    /// Stop after this many replies. `None` replies indefinitely.
    pub max_replies: Option<u32>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            threshold: 3,
            arm_delay: Duration::from_secs(3),
            typing_delay: Duration::from_secs(2),
            reply_handle: DEFAULT_REPLY_HANDLE.to_string(),
            reply_content: DEFAULT_REPLY_CONTENT.to_string(),
            max_replies: None,
        }
    }
}

/// Where the engine is in its cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Nothing pending.
    Idle,
    /// Waiting to start typing.
    Armed {
        /// When typing starts.
        deadline: Instant,
    },
    /// Typing indicator is showing.
    Typing {
        /// When the reply lands.
        deadline: Instant,
    },
}

/// Drives simulated counterpart turns against a [`ConversationStore`].
pub struct PresenceEngine {
    config: EngineConfig,
    store: ConversationStore,
    replies: u32,
}

impl PresenceEngine {
    /// Creates an engine for `store`. Nothing runs until [`spawn`](Self::spawn).
    #[must_use]
    pub const fn new(config: EngineConfig, store: ConversationStore) -> Self {
        Self {
            config,
            store,
            replies: 0,
        }
    }

    /// Spawns the engine on the current tokio runtime.
    ///
    /// The task runs until the returned handle is aborted, the store is
    /// closed, or the reply limit is reached.
    #[must_use]
    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(self.run())
    }

    /// Runs the engine loop to completion.
    pub async fn run(mut self) {
        if self.limit_reached() {
            tracing::debug!("reply limit is zero, presence engine idle");
            return;
        }

        let mut changes = self.store.subscribe();
        let initial = *changes.borrow_and_update();
        let mut phase = self.on_length_change(Phase::Idle, initial);

        tracing::debug!(len = initial, ?phase, "presence engine started");

        loop {
            let next = match phase {
                Phase::Idle => match wait_for_change(&mut changes).await {
                    Some(len) => Ok(self.on_length_change(phase, len)),
                    None => break,
                },
                Phase::Armed { deadline } => {
                    tokio::select! {
                        changed = wait_for_change(&mut changes) => match changed {
                            Some(len) => Ok(self.on_length_change(phase, len)),
                            None => break,
                        },
                        () = sleep_until(deadline) => self.start_typing(),
                    }
                }
                Phase::Typing { deadline } => {
                    tokio::select! {
                        changed = wait_for_change(&mut changes) => match changed {
                            Some(_) => Ok(phase),
                            None => break,
                        },
                        () = sleep_until(deadline) => self.deliver_reply(),
                    }
                }
            };

            match next {
                Ok(p) => phase = p,
                Err(AppendError::Closed) => {
                    tracing::debug!("conversation closed, presence engine stopping");
                    break;
                }
                Err(e) => {
                    tracing::warn!(error = %e, "simulated reply rejected");
                    phase = Phase::Idle;
                }
            }

            if self.limit_reached() {
                tracing::debug!(replies = self.replies, "reply limit reached");
                break;
            }
        }
    }

    /// Number of replies delivered so far.
    #[must_use]
    pub const fn replies(&self) -> u32 {
        self.replies
    }

    /// Computes the phase after the log reached `len` messages.
    fn on_length_change(&self, phase: Phase, len: usize) -> Phase {
        match phase {
            Phase::Typing { .. } => phase,
            Phase::Idle | Phase::Armed { .. } if len > self.config.threshold => {
                if matches!(phase, Phase::Armed { .. }) {
                    tracing::trace!(len, "length changed while armed, restarting delay");
                } else {
                    tracing::debug!(len, "presence engine armed");
                }
                Phase::Armed {
                    deadline: Instant::now() + self.config.arm_delay,
                }
            }
            Phase::Idle | Phase::Armed { .. } => phase,
        }
    }

    fn start_typing(&self) -> Result<Phase, AppendError> {
        self.store.apply(InboundEvent::Typing(TypingNotice::started(
            self.config.reply_handle.clone(),
        )))?;
        tracing::debug!(handle = %self.config.reply_handle, "counterpart typing");
        Ok(Phase::Typing {
            deadline: Instant::now() + self.config.typing_delay,
        })
    }

    fn deliver_reply(&mut self) -> Result<Phase, AppendError> {
        self.store.apply(InboundEvent::Typing(TypingNotice::stopped(
            self.config.reply_handle.clone(),
        )))?;
        let reply = Message::synthetic(
            self.config.reply_handle.clone(),
            self.config.reply_content.clone(),
            Timestamp::now(),
            Some(Mood::Positive),
        );
        let message_id = reply.id.clone();
        self.store.apply(InboundEvent::MessageArrived(reply))?;
        self.replies += 1;
        tracing::info!(%message_id, replies = self.replies, "simulated reply delivered");
        Ok(Phase::Idle)
    }

    fn limit_reached(&self) -> bool {
        self.config
            .max_replies
            .is_some_and(|max| self.replies >= max)
    }
}

/// Waits for the next length change. `None` once the store is gone.
async fn wait_for_change(changes: &mut watch::Receiver<usize>) -> Option<usize> {
    changes.changed().await.ok()?;
    Some(*changes.borrow_and_update())
}
