//! `SupportChat`: anonymous peer-support chat library.
//!
//! The core is [`chat::ConversationStore`] (the message log) and
//! [`presence::PresenceEngine`] (simulated counterpart activity), wired
//! together per session by [`session::ChatSession`].

pub mod app;
pub mod chat;
pub mod config;
pub mod display;
pub mod presence;
pub mod session;
pub mod ui;
