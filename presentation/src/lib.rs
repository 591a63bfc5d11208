//! Presentation layer for session-chat
//!
//! This crate contains the CLI definition, console formatting, the typing
//! indicator, and the interactive chat REPL.

pub mod chat;
pub mod cli;
pub mod output;
pub mod progress;

// Re-export commonly used types
pub use chat::{ChatRepl, ReplPresenter};
pub use cli::commands::Cli;
pub use output::console::ConsoleFormatter;
pub use progress::typing::TypingIndicator;
