//! Integration tests for the terminal front end's input handling.
//!
//! Drives [`App`] with synthetic key events and checks the resulting
//! session state. No terminal is involved.

use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use supportchat::app::App;
use supportchat::presence::{DEFAULT_REPLY_HANDLE, EngineConfig};
use supportchat::session::report::RecordingModerationSink;
use supportchat::session::{ChatSession, SessionConfig, SessionContext};

use supportchat_proto::message::MAX_CONTENT_CHARS;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn type_text(app: &mut App, text: &str) {
    for c in text.chars() {
        app.handle_key_event(key(KeyCode::Char(c)));
    }
}

/// App over a welcome-seeded session whose engine stays idle.
fn quiet_app() -> App {
    let config = SessionConfig {
        engine: EngineConfig {
            threshold: usize::MAX,
            ..EngineConfig::default()
        },
        ..SessionConfig::default()
    };
    App::new(ChatSession::start(
        SessionContext::new(Some("X".into()), None),
        &config,
    ))
}

// ---------------------------------------------------------------------------
// Sending
// ---------------------------------------------------------------------------

#[tokio::test]
async fn enter_sends_and_clears_input() {
    let mut app = quiet_app();
    type_text(&mut app, "hello there");
    app.handle_key_event(key(KeyCode::Enter));

    let log = app.session().store().snapshot();
    assert_eq!(log.len(), 4);
    assert_eq!(log[3].content, "hello there");
    assert_eq!(log[3].sender, "X");
    assert!(app.input.is_empty());
    assert_eq!(app.cursor_position, 0);
}

#[tokio::test]
async fn blank_input_is_kept_and_not_sent() {
    let mut app = quiet_app();
    type_text(&mut app, "   ");
    app.handle_key_event(key(KeyCode::Enter));

    assert_eq!(app.session().store().len(), 3);
    assert_eq!(app.input, "   ");
    assert!(app.notice.is_none());
}

#[tokio::test]
async fn empty_input_enter_changes_nothing() {
    let mut app = quiet_app();
    app.handle_key_event(key(KeyCode::Enter));
    assert_eq!(app.session().store().len(), 3);
    assert!(app.input.is_empty());
}

#[tokio::test]
async fn shift_enter_does_not_send() {
    let mut app = quiet_app();
    type_text(&mut app, "draft");
    app.handle_key_event(KeyEvent::new(KeyCode::Enter, KeyModifiers::SHIFT));
    assert_eq!(app.session().store().len(), 3);
    assert_eq!(app.input, "draft");
}

#[tokio::test]
async fn input_is_capped_at_limit() {
    let mut app = quiet_app();
    type_text(&mut app, &"a".repeat(MAX_CONTENT_CHARS + 20));
    assert_eq!(app.input.chars().count(), MAX_CONTENT_CHARS);

    app.handle_key_event(key(KeyCode::Enter));
    assert_eq!(app.session().store().len(), 4);
}

// ---------------------------------------------------------------------------
// Editing
// ---------------------------------------------------------------------------

#[tokio::test]
async fn cursor_editing_handles_multibyte_text() {
    let mut app = quiet_app();
    type_text(&mut app, "h\u{e9}llo");
    app.handle_key_event(key(KeyCode::Home));
    app.handle_key_event(key(KeyCode::Right));
    app.handle_key_event(key(KeyCode::Right));
    app.handle_key_event(key(KeyCode::Backspace));
    assert_eq!(app.input, "hllo");
    assert_eq!(app.cursor_position, 1);

    type_text(&mut app, "\u{1f499}");
    assert_eq!(app.input, "h\u{1f499}llo");
    app.handle_key_event(key(KeyCode::End));
    assert_eq!(app.cursor_position, 5);
}

#[tokio::test]
async fn control_chords_do_not_insert_text() {
    let mut app = quiet_app();
    app.handle_key_event(KeyEvent::new(KeyCode::Char('a'), KeyModifiers::CONTROL));
    app.handle_key_event(KeyEvent::new(KeyCode::Char('x'), KeyModifiers::ALT));
    assert!(app.input.is_empty());
    assert_eq!(app.cursor_position, 0);

    app.handle_key_event(KeyEvent::new(KeyCode::Char('H'), KeyModifiers::SHIFT));
    app.handle_key_event(key(KeyCode::Char('i')));
    assert_eq!(app.input, "Hi");
}

// ---------------------------------------------------------------------------
// Reporting
// ---------------------------------------------------------------------------

#[tokio::test]
async fn ctrl_r_reports_newest_counterpart_message() {
    let sink = Arc::new(RecordingModerationSink::new());
    let config = SessionConfig {
        engine: EngineConfig {
            threshold: usize::MAX,
            ..EngineConfig::default()
        },
        ..SessionConfig::default()
    };
    let session = ChatSession::start(SessionContext::new(Some("X".into()), None), &config)
        .with_moderation(sink.clone());
    let mut app = App::new(session);

    type_text(&mut app, "my own message");
    app.handle_key_event(key(KeyCode::Enter));
    app.handle_key_event(KeyEvent::new(KeyCode::Char('r'), KeyModifiers::CONTROL));

    let reports = sink.reports();
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].reported_sender, "Guest-Support-M7N4");
    assert_eq!(reports[0].reporter, "X");
    assert!(app.notice.as_deref().unwrap_or_default().contains("Guest-Support-M7N4"));
}

#[tokio::test]
async fn selection_picks_report_target() {
    let sink = Arc::new(RecordingModerationSink::new());
    let session = ChatSession::start(SessionContext::new(None, None), &SessionConfig::default())
        .with_moderation(sink.clone());
    let mut app = App::new(session);

    app.handle_key_event(key(KeyCode::Up)); // newest
    app.handle_key_event(key(KeyCode::Up));
    app.handle_key_event(key(KeyCode::Up)); // oldest
    app.handle_key_event(key(KeyCode::Up)); // stays at oldest
    assert_eq!(app.selected, Some(0));

    app.handle_key_event(KeyEvent::new(KeyCode::Char('r'), KeyModifiers::CONTROL));
    assert_eq!(sink.reports()[0].reported_sender, "Kash-Guest-A12B");

    app.handle_key_event(key(KeyCode::Down));
    app.handle_key_event(key(KeyCode::Down));
    app.handle_key_event(key(KeyCode::Down));
    assert_eq!(app.selected, None);
}

// ---------------------------------------------------------------------------
// Scroll into view / quit
// ---------------------------------------------------------------------------

#[tokio::test(start_paused = true)]
async fn new_reply_scrolls_into_view() {
    let mut app = App::new(ChatSession::start(
        SessionContext::new(Some("X".into()), None),
        &SessionConfig::default(),
    ));
    type_text(&mut app, "hi all");
    app.handle_key_event(key(KeyCode::Enter));
    app.handle_key_event(key(KeyCode::Up));
    assert!(app.selected.is_some());

    tokio::time::sleep(Duration::from_millis(5_100)).await;
    app.tick();

    assert_eq!(app.selected, None);
    let view = app.view();
    assert_eq!(view.messages.last().map(|m| m.sender.as_str()), Some(DEFAULT_REPLY_HANDLE));
    assert!(!view.messages.last().is_some_and(|m| m.is_mine));
}

#[tokio::test]
async fn escape_quits_and_shutdown_closes_session() {
    let mut app = quiet_app();
    app.handle_key_event(key(KeyCode::Esc));
    assert!(app.should_quit);

    app.shutdown();
    assert!(!app.session().is_active());
}
