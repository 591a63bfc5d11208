//! CLI entrypoint for session-chat
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result};
use chat_application::{ChatBackend, ConversationLogger, SessionController};
use chat_infrastructure::{ConfigLoader, FileConfig, HttpChatBackend, JsonlConversationLogger};
use chat_presentation::{ChatRepl, Cli, ConsoleFormatter, ReplPresenter};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    // === Configuration ===
    let mut config = ConfigLoader::resolve(cli.config.as_deref(), cli.no_config)
        .context("Failed to load configuration")?;
    apply_cli_overrides(&mut config, &cli);

    if cli.show_config {
        print!("{}", config_report(&cli, &config));
        return Ok(());
    }

    config.validate().context("Invalid configuration")?;

    if !config.output.color {
        colored::control::set_override(false);
    }

    info!("Starting session-chat against {}", config.backend.base_url);

    // === Dependency Injection ===
    let backend: Arc<dyn ChatBackend> = Arc::new(
        HttpChatBackend::from_config(&config.backend)
            .context("Failed to create HTTP client")?,
    );

    let (tx, rx) = mpsc::unbounded_channel();
    let mut controller = SessionController::new(backend, config.chat_behavior(), tx);

    if let Some(path) = conversation_log_path(&cli, &config) {
        match JsonlConversationLogger::new(&path) {
            Some(logger) => {
                info!("Writing conversation log to {}", path.display());
                let logger: Arc<dyn ConversationLogger> = Arc::new(logger);
                controller = controller.with_conversation_logger(logger);
            }
            None => warn!("Conversation log disabled: cannot open {}", path.display()),
        }
    }

    let formatter = ConsoleFormatter::new(config.chat.bot_name.clone())
        .with_color(config.output.color)
        .with_timestamps(config.output.show_timestamps);

    // One-shot mode
    if let Some(message) = cli.message.as_deref() {
        let presenter = ReplPresenter::new(formatter)
            .with_progress(false)
            .with_echo_user(true);
        let mut repl = ChatRepl::new(controller, rx, presenter);
        repl.run_once(message).await;
        return Ok(());
    }

    // Interactive mode
    let presenter = ReplPresenter::new(formatter)
        .with_progress(config.repl.show_progress && !cli.quiet);
    let mut repl = ChatRepl::new(controller, rx, presenter)
        .with_history_path(config.repl.history_file.as_deref().map(expand_home));
    repl.run().await?;

    Ok(())
}

/// CLI flags win over every configuration source
fn apply_cli_overrides(config: &mut FileConfig, cli: &Cli) {
    if let Some(url) = &cli.base_url {
        config.backend.base_url = url.clone();
    }
    if let Some(key) = &cli.api_key {
        config.backend.api_key = Some(key.clone());
    }
    if cli.no_color {
        config.output.color = false;
    }
}

/// Sources, effective config and validation result for `--show-config`
fn config_report(cli: &Cli, config: &FileConfig) -> String {
    let mut report =
        ConfigLoader::describe_sources(cli.config.as_deref(), cli.no_config).join("\n");
    report.push_str("\n\n");
    report.push_str(&ConfigLoader::render(config));
    if let Err(e) = config.validate() {
        report.push_str(&format!("\nInvalid configuration: {}\n", e));
    }
    report
}

fn conversation_log_path(cli: &Cli, config: &FileConfig) -> Option<PathBuf> {
    cli.log_file.clone().or_else(|| {
        config
            .logging
            .conversation_log
            .as_deref()
            .map(expand_home)
    })
}

/// Expand a leading `~/` to the home directory
fn expand_home(path: &str) -> PathBuf {
    match path.strip_prefix("~/") {
        Some(rest) => dirs::home_dir()
            .map(|home| home.join(rest))
            .unwrap_or_else(|| PathBuf::from(path)),
        None => PathBuf::from(path),
    }
}
