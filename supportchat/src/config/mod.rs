//! Configuration system for the `SupportChat` client.
//!
//! Supports layered configuration with the following priority (highest first):
//! 1. CLI arguments
//! 2. Environment variables (via clap `env` attribute)
//! 3. TOML config file (`~/.config/supportchat/config.toml`)
//! 4. Compiled defaults
//!
//! Missing config file is not an error (defaults are used). An explicit
//! `--config` path that doesn't exist is an error.

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use crate::presence::EngineConfig;
use crate::session::{SessionConfig, StaticIdentity};

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    #[error("failed to read config file {path}: {source}")]
    ReadFile {
        /// Path that was attempted.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Failed to parse the TOML configuration.
    #[error("failed to parse config file: {0}")]
    ParseToml(#[from] toml::de::Error),
}

// ---------------------------------------------------------------------------
// TOML file structs (all fields Option for partial overrides)
// ---------------------------------------------------------------------------

/// Top-level TOML config file structure.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct ConfigFile {
    session: SessionFileConfig,
    presence: PresenceFileConfig,
    ui: UiFileConfig,
    topics: HashMap<String, String>,
}

/// `[session]` section of the config file.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct SessionFileConfig {
    handle: Option<String>,
    topic_id: Option<String>,
    presence_count: Option<u32>,
    seed_welcome: Option<bool>,
}

/// `[presence]` section of the config file.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct PresenceFileConfig {
    threshold: Option<usize>,
    arm_delay_ms: Option<u64>,
    typing_delay_ms: Option<u64>,
    reply_handle: Option<String>,
    reply_content: Option<String>,
    max_replies: Option<u32>,
}

/// `[ui]` section of the config file.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct UiFileConfig {
    poll_timeout_ms: Option<u64>,
    timestamp_format: Option<String>,
}

// ---------------------------------------------------------------------------
// Resolved configuration (concrete types, all fields populated)
// ---------------------------------------------------------------------------

/// Fully resolved client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    // -- Session --
    /// Ephemeral display handle of the local participant.
    pub handle: Option<String>,
    /// Topic the chat was opened from.
    pub topic_id: Option<String>,
    /// Participants shown as online.
    pub presence_count: u32,
    /// Seed the log with welcome messages.
    pub seed_welcome: bool,

    // -- Presence --
    /// Simulated counterpart settings.
    pub engine: EngineConfig,

    // -- UI --
    /// Poll timeout for the TUI event loop.
    pub poll_timeout: Duration,
    /// Timestamp display format string (chrono).
    pub timestamp_format: String,

    // -- Topics --
    /// Topic id to display title.
    pub topics: HashMap<String, String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            handle: None,
            topic_id: None,
            presence_count: 3,
            seed_welcome: true,
            engine: EngineConfig::default(),
            poll_timeout: Duration::from_millis(50),
            timestamp_format: "%H:%M".to_string(),
            topics: HashMap::new(),
        }
    }
}

impl ClientConfig {
    /// Load configuration by merging CLI args, env vars, and a TOML file.
    ///
    /// CLI args and env vars are parsed via `clap`. If `--config` is given
    /// and the file does not exist, returns an error. If no `--config` is
    /// given, the default path (`~/.config/supportchat/config.toml`) is tried
    /// and silently ignored if missing.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the config file cannot be read or parsed.
    pub fn load(cli: &CliArgs) -> Result<Self, ConfigError> {
        let file = load_config_file(cli.config.as_deref())?;
        Ok(Self::resolve(cli, &file))
    }

    /// Resolve a `ClientConfig` from CLI args and a parsed config file.
    ///
    /// Priority: CLI > file > default. This is separated from `load()` to
    /// enable unit testing without CLI parsing.
    #[must_use]
    fn resolve(cli: &CliArgs, file: &ConfigFile) -> Self {
        let defaults = Self::default();
        let engine_defaults = defaults.engine;

        Self {
            handle: cli.handle.clone().or_else(|| file.session.handle.clone()),
            topic_id: cli.topic.clone().or_else(|| file.session.topic_id.clone()),
            presence_count: file
                .session
                .presence_count
                .unwrap_or(defaults.presence_count),
            seed_welcome: file.session.seed_welcome.unwrap_or(defaults.seed_welcome),
            engine: EngineConfig {
                threshold: file
                    .presence
                    .threshold
                    .unwrap_or(engine_defaults.threshold),
                arm_delay: file
                    .presence
                    .arm_delay_ms
                    .map_or(engine_defaults.arm_delay, Duration::from_millis),
                typing_delay: file
                    .presence
                    .typing_delay_ms
                    .map_or(engine_defaults.typing_delay, Duration::from_millis),
                reply_handle: file
                    .presence
                    .reply_handle
                    .clone()
                    .unwrap_or(engine_defaults.reply_handle),
                reply_content: file
                    .presence
                    .reply_content
                    .clone()
                    .unwrap_or(engine_defaults.reply_content),
                max_replies: file.presence.max_replies.or(engine_defaults.max_replies),
            },
            poll_timeout: file
                .ui
                .poll_timeout_ms
                .map_or(defaults.poll_timeout, Duration::from_millis),
            timestamp_format: cli
                .timestamp_format
                .clone()
                .or_else(|| file.ui.timestamp_format.clone())
                .unwrap_or(defaults.timestamp_format),
            topics: file.topics.clone(),
        }
    }

    /// Identity of the local participant as configured.
    #[must_use]
    pub fn identity(&self) -> StaticIdentity {
        StaticIdentity {
            handle: self.handle.clone(),
            topic_id: self.topic_id.clone(),
        }
    }

    /// Settings for opening a chat session.
    #[must_use]
    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            presence_count: self.presence_count,
            seed_welcome: self.seed_welcome,
            engine: self.engine.clone(),
        }
    }
}

/// CLI arguments parsed by clap.
#[derive(clap::Parser, Debug, Default)]
#[command(version, about = "Anonymous peer-support chat")]
pub struct CliArgs {
    /// Your ephemeral display handle.
    #[arg(long, env = "SUPPORTCHAT_HANDLE")]
    pub handle: Option<String>,

    /// Topic id the chat is about.
    #[arg(long, env = "SUPPORTCHAT_TOPIC")]
    pub topic: Option<String>,

    /// Path to config file (default: `~/.config/supportchat/config.toml`).
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Timestamp display format (chrono format string).
    #[arg(long)]
    pub timestamp_format: Option<String>,

    /// Log level filter (trace, debug, info, warn, error).
    #[arg(long, default_value = "info", env = "SUPPORTCHAT_LOG")]
    pub log_level: String,

    /// Path to log file (default: `$TMPDIR/supportchat.log`).
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

/// Load and parse a TOML config file.
///
/// If `explicit_path` is `Some`, the file must exist (error if not).
/// If `explicit_path` is `None`, the default path is tried and missing file
/// is treated as empty config.
fn load_config_file(explicit_path: Option<&std::path::Path>) -> Result<ConfigFile, ConfigError> {
    let path = if let Some(p) = explicit_path {
        let contents = std::fs::read_to_string(p).map_err(|e| ConfigError::ReadFile {
            path: p.to_path_buf(),
            source: e,
        })?;
        return Ok(toml::from_str(&contents)?);
    } else {
        let Some(config_dir) = dirs::config_dir() else {
            // No config dir available, use defaults.
            return Ok(ConfigFile::default());
        };
        config_dir.join("supportchat").join("config.toml")
    };

    match std::fs::read_to_string(&path) {
        Ok(contents) => Ok(toml::from_str(&contents)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(ConfigFile::default()),
        Err(e) => Err(ConfigError::ReadFile { path, source: e }),
    }
}
