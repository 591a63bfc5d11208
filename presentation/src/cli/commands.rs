//! CLI command definitions

use clap::Parser;
use std::path::PathBuf;

/// CLI arguments for session-chat
#[derive(Parser, Debug)]
#[command(name = "session-chat")]
#[command(author, version, about = "Terminal client for session-based chat backends")]
#[command(long_about = r#"
session-chat opens a conversation session with a chat backend and lets you
talk to it from the terminal.

On startup a session is requested from the backend and its greeting is shown.
Every line you type is sent within that session; type /help for commands.

Configuration files are loaded from (in priority order):
1. SESSION_CHAT_* environment variables (e.g. SESSION_CHAT_BACKEND__BASE_URL)
2. --config <path>                        Explicit config file
3. ./session-chat.toml                    Project-level config
4. ~/.config/session-chat/config.toml     Global config

Example:
  session-chat
  session-chat --base-url https://kyc.example.com
  session-chat --message "I have my PAN card ready"
"#)]
pub struct Cli {
    /// Send a single message, print the reply and exit
    #[arg(short, long, value_name = "TEXT")]
    pub message: Option<String>,

    /// Backend base URL (overrides config)
    #[arg(long, value_name = "URL")]
    pub base_url: Option<String>,

    /// API key sent as X-API-Key (overrides config)
    #[arg(long, value_name = "KEY", env = "SESSION_CHAT_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Write a JSONL conversation log to this file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress the typing indicator
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Skip discovered config files and environment overrides
    /// (an explicit --config file is still read)
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and the effective config, then exit
    #[arg(long)]
    pub show_config: bool,
}
