//! Integration tests for the simulated counterpart.
//!
//! All tests run on a paused clock, so delays are exact:
//! arm delay 3s, typing delay 2s, threshold "more than 3 messages".

use std::time::Duration;

use tokio::time::sleep;

use supportchat::presence::{DEFAULT_REPLY_HANDLE, EngineConfig};
use supportchat::session::{ChatSession, SessionConfig, SessionContext};

use supportchat_proto::message::{Message, Mood, Timestamp};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn seed(n: usize) -> Vec<Message> {
    (0..n)
        .map(|i| {
            Message::synthetic(
                format!("Guest-{i}"),
                format!("message {i}"),
                Timestamp::now(),
                Some(Mood::Neutral),
            )
        })
        .collect()
}

fn start(n: usize) -> ChatSession {
    ChatSession::start_with_seed(
        SessionContext::new(Some("X".into()), None),
        &SessionConfig::default(),
        seed(n),
    )
}

fn replies(session: &ChatSession) -> usize {
    session
        .store()
        .snapshot()
        .iter()
        .filter(|m| m.sender == DEFAULT_REPLY_HANDLE)
        .count()
}

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

// ---------------------------------------------------------------------------
// Scenarios
// ---------------------------------------------------------------------------

#[tokio::test(start_paused = true)]
async fn four_messages_produce_typing_then_reply() {
    let session = start(4);
    let store = session.store();

    sleep(ms(2_900)).await;
    assert!(!store.is_typing());

    sleep(ms(200)).await; // t = 3.1s
    assert!(store.is_typing());
    assert_eq!(store.typing_handle().as_deref(), Some(DEFAULT_REPLY_HANDLE));
    assert_eq!(store.len(), 4);

    sleep(ms(1_800)).await; // t = 4.9s
    assert!(store.is_typing());
    assert_eq!(store.len(), 4);

    sleep(ms(200)).await; // t = 5.1s
    assert!(!store.is_typing());
    assert_eq!(store.len(), 5);

    let reply = &store.snapshot()[4];
    assert_eq!(reply.sender, DEFAULT_REPLY_HANDLE);
    assert_eq!(reply.mood, Some(Mood::Positive));
    assert!(reply.content.starts_with("I appreciate everyone sharing here."));
}

#[tokio::test(start_paused = true)]
async fn three_messages_never_arm() {
    let session = start(3);
    sleep(Duration::from_secs(60)).await;
    assert_eq!(session.store().len(), 3);
    assert!(!session.store().is_typing());
}

#[tokio::test(start_paused = true)]
async fn crossing_the_threshold_by_sending_arms() {
    let session = start(3);
    sleep(Duration::from_secs(10)).await;

    session.send("is anyone here?").unwrap();
    sleep(ms(3_100)).await;
    assert!(session.store().is_typing());

    sleep(ms(2_000)).await;
    assert!(!session.store().is_typing());
    assert_eq!(session.store().len(), 5);
    assert_eq!(replies(&session), 1);
}

#[tokio::test(start_paused = true)]
async fn exactly_one_reply_per_cycle() {
    let session = start(4);
    sleep(ms(5_100)).await;
    assert_eq!(replies(&session), 1);
    assert_eq!(session.store().len(), 5);
}

#[tokio::test(start_paused = true)]
async fn send_while_armed_restarts_the_delay() {
    let session = start(4);

    sleep(ms(2_000)).await;
    session.send("still here").unwrap();

    sleep(ms(1_100)).await; // t = 3.1s, first deadline passed
    assert!(!session.store().is_typing());

    sleep(ms(2_000)).await; // t = 5.1s, restarted deadline passed
    assert!(session.store().is_typing());

    sleep(ms(2_000)).await; // t = 7.1s
    assert!(!session.store().is_typing());
    assert_eq!(replies(&session), 1);
    assert_eq!(session.store().len(), 6);
}

#[tokio::test(start_paused = true)]
async fn send_while_typing_does_not_duplicate() {
    let session = start(4);

    sleep(ms(3_500)).await;
    assert!(session.store().is_typing());
    session.send("thank you all").unwrap();

    sleep(ms(1_600)).await; // t = 5.1s
    assert!(!session.store().is_typing());
    assert_eq!(replies(&session), 1);
    assert_eq!(session.store().len(), 6);

    sleep(ms(1_000)).await; // t = 6.1s, re-armed by the reply but not typing yet
    assert!(!session.store().is_typing());
    assert_eq!(replies(&session), 1);
}

#[tokio::test(start_paused = true)]
async fn own_reply_rearms_the_engine() {
    let session = start(4);

    sleep(ms(5_100)).await;
    assert_eq!(replies(&session), 1);

    sleep(ms(3_000)).await; // t = 8.1s
    assert!(session.store().is_typing());

    sleep(ms(2_000)).await; // t = 10.1s
    assert_eq!(replies(&session), 2);
    assert_eq!(session.store().len(), 6);
}

#[tokio::test(start_paused = true)]
async fn reply_limit_caps_the_conversation() {
    let config = SessionConfig {
        engine: EngineConfig {
            max_replies: Some(2),
            ..EngineConfig::default()
        },
        ..SessionConfig::default()
    };
    let session = ChatSession::start_with_seed(SessionContext::new(None, None), &config, seed(4));

    sleep(Duration::from_secs(60)).await;
    assert_eq!(replies(&session), 2);
    assert!(!session.store().is_typing());
}

#[tokio::test(start_paused = true)]
async fn zero_reply_limit_keeps_counterpart_silent() {
    let config = SessionConfig {
        engine: EngineConfig {
            max_replies: Some(0),
            ..EngineConfig::default()
        },
        ..SessionConfig::default()
    };
    let session = ChatSession::start_with_seed(SessionContext::new(None, None), &config, seed(4));

    sleep(ms(3_100)).await;
    assert!(!session.store().is_typing());

    sleep(Duration::from_secs(60)).await;
    assert_eq!(replies(&session), 0);
    assert_eq!(session.store().len(), 4);
    assert!(!session.store().is_typing());
}

#[tokio::test(start_paused = true)]
async fn custom_timing_and_content() {
    let config = SessionConfig {
        engine: EngineConfig {
            threshold: 0,
            arm_delay: ms(100),
            typing_delay: ms(50),
            reply_handle: "Peer-Listener-Z0Z0".to_string(),
            reply_content: "We hear you.".to_string(),
            max_replies: Some(1),
        },
        ..SessionConfig::default()
    };
    let session = ChatSession::start_with_seed(SessionContext::new(None, None), &config, seed(1));

    sleep(ms(120)).await;
    assert!(session.store().is_typing());

    sleep(ms(50)).await;
    let log = session.store().snapshot();
    assert_eq!(log.len(), 2);
    assert_eq!(log[1].sender, "Peer-Listener-Z0Z0");
    assert_eq!(log[1].content, "We hear you.");
}
