//! `SupportChat`: anonymous peer-support chat in the terminal.
//!
//! Opens a chat session and renders it with ratatui. Configuration via CLI
//! flags, environment variables, or config file
//! (`~/.config/supportchat/config.toml`).
//!
//! ```bash
//! cargo run --bin supportchat -- --handle Kash-Guest-Q1W2 --topic career_anxiety
//!
//! # Or via environment variables
//! SUPPORTCHAT_HANDLE=Kash-Guest-Q1W2 cargo run
//! ```

use std::io;
use std::path::Path;

use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing_appender::non_blocking::WorkerGuard;

use supportchat::app::App;
use supportchat::config::{CliArgs, ClientConfig};
use supportchat::session::{ChatSession, SessionContext};
use supportchat::ui;

#[tokio::main]
async fn main() -> io::Result<()> {
    let cli = CliArgs::parse();

    // Load and resolve configuration (CLI args > env > config file > defaults).
    let config = match ClientConfig::load(&cli) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Warning: failed to load config file: {e}");
            ClientConfig::default()
        }
    };

    // Initialize logging before terminal setup (logs go to file, not stdout).
    let _log_guard = init_logging(&cli.log_level, cli.log_file.as_deref());

    tracing::info!("supportchat starting");

    let context = SessionContext::from_provider(&config.identity());
    let session = ChatSession::start(context, &config.session_config());

    // Set up terminal.
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(session)
        .with_topics(config.topics.clone())
        .with_timestamp_format(config.timestamp_format.clone());

    // Run the app.
    let result = run_app(&mut terminal, &mut app, &config).await;
    app.shutdown();

    // Restore terminal.
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    tracing::info!("supportchat exiting");
    result
}

/// Initialize file-based logging.
///
/// Logs are written to a file (never stdout, since ratatui owns the terminal).
/// Returns a [`WorkerGuard`] that must be held until shutdown to ensure all
/// buffered log entries are flushed.
fn init_logging(level: &str, file_path: Option<&Path>) -> Option<WorkerGuard> {
    let default_path = std::env::temp_dir().join("supportchat.log");
    let log_path = file_path.unwrap_or(&default_path);

    let log_dir = log_path.parent()?;
    let file_name = log_path.file_name()?.to_str()?;

    let file_appender = tracing_appender::rolling::never(log_dir, file_name);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_env_filter(env_filter)
        .with_ansi(false)
        .init();

    Some(guard)
}

/// Main application loop.
///
/// Terminal polling blocks for at most `poll_timeout`; yielding to the
/// runtime between frames lets the presence engine's timers fire.
async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    config: &ClientConfig,
) -> io::Result<()> {
    loop {
        // Step 1: Pick up store changes (scroll newest message into view).
        app.tick();

        // Step 2: Draw the UI frame.
        terminal.draw(|frame| ui::draw(frame, app))?;

        // Step 3: Poll for terminal input events.
        if event::poll(config.poll_timeout)?
            && let Event::Key(key) = event::read()?
        {
            if key.kind == KeyEventKind::Press {
                app.handle_key_event(key);
            }
        }

        if app.should_quit {
            return Ok(());
        }

        tokio::task::yield_now().await;
    }
}
