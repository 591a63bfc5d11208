//! Configuration file loading for session-chat
//!
//! This module handles file I/O and merging of configuration from multiple
//! sources. The priority order (highest to lowest):
//!
//! 1. Environment variables `SESSION_CHAT_<SECTION>__<KEY>`
//! 2. `--config <path>` specified file
//! 3. Project root: `./session-chat.toml` or `./.session-chat.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/session-chat/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, DEFAULT_BASE_URL, FileBackendConfig, FileChatConfig, FileConfig,
    FileLoggingConfig, FileOutputConfig, FileReplConfig,
};
pub use loader::ConfigLoader;
