//! Infrastructure layer for session-chat
//!
//! This crate contains adapters that implement the ports defined in the
//! application layer: the HTTP chat backend, configuration file loading and
//! the JSONL conversation logger.

pub mod config;
pub mod http;
pub mod logging;

// Re-export commonly used types
pub use config::{
    ConfigLoader, ConfigValidationError, FileBackendConfig, FileChatConfig, FileConfig,
    FileLoggingConfig, FileOutputConfig, FileReplConfig,
};
pub use http::HttpChatBackend;
pub use logging::JsonlConversationLogger;
