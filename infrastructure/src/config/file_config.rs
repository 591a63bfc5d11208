//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and converted into application types.

use chat_application::ChatBehavior;
use chat_application::config::DEFAULT_BOT_NAME;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Backend URL used when nothing else is configured
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Configuration validation errors
#[derive(Debug, Error)]
pub enum ConfigValidationError {
    #[error("backend.base_url cannot be empty")]
    EmptyBaseUrl,

    #[error("backend.base_url is not a valid http(s) URL: {0}")]
    InvalidBaseUrl(String),

    #[error("timeout_seconds cannot be 0")]
    InvalidTimeout,
}

/// Raw backend configuration from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileBackendConfig {
    /// Base URL of the chat backend (without the `/api/v1` prefix)
    pub base_url: String,
    /// Optional API key, sent as `X-API-Key`
    pub api_key: Option<String>,
    /// Request timeout in seconds. Unset means wait indefinitely.
    pub timeout_seconds: Option<u64>,
}

impl Default for FileBackendConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: None,
            timeout_seconds: None,
        }
    }
}

impl FileBackendConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_seconds.map(Duration::from_secs)
    }
}

/// Raw chat configuration from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileChatConfig {
    /// Label for bot messages
    pub bot_name: String,
    /// Quick questions offered through `/faq`
    pub faqs: Vec<String>,
}

impl Default for FileChatConfig {
    fn default() -> Self {
        Self {
            bot_name: DEFAULT_BOT_NAME.to_string(),
            faqs: vec![
                "What documents do I need for KYC?".to_string(),
                "Can I use Aadhaar instead of PAN?".to_string(),
                "What is Form 60?".to_string(),
            ],
        }
    }
}

/// Raw output configuration from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOutputConfig {
    /// Enable colored terminal output
    pub color: bool,
    /// Show `HH:MM` next to each message
    pub show_timestamps: bool,
}

impl Default for FileOutputConfig {
    fn default() -> Self {
        Self {
            color: true,
            show_timestamps: true,
        }
    }
}

/// Raw REPL configuration from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileReplConfig {
    /// Show the typing indicator while a request is in flight
    pub show_progress: bool,
    /// Path to history file
    pub history_file: Option<String>,
}

impl Default for FileReplConfig {
    fn default() -> Self {
        Self {
            show_progress: true,
            history_file: None,
        }
    }
}

/// Raw logging configuration from TOML
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    /// Write a JSONL conversation log to this path
    pub conversation_log: Option<String>,
}

/// Complete configuration file structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Backend connection settings
    pub backend: FileBackendConfig,
    /// Chat settings
    pub chat: FileChatConfig,
    /// Output settings
    pub output: FileOutputConfig,
    /// REPL settings
    pub repl: FileReplConfig,
    /// Logging settings
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        let base_url = self.backend.base_url.trim();
        if base_url.is_empty() {
            return Err(ConfigValidationError::EmptyBaseUrl);
        }

        match reqwest::Url::parse(base_url) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => {}
            _ => return Err(ConfigValidationError::InvalidBaseUrl(base_url.to_string())),
        }

        if let Some(0) = self.backend.timeout_seconds {
            return Err(ConfigValidationError::InvalidTimeout);
        }

        Ok(())
    }

    /// Application-level chat behavior from the `[chat]` section
    pub fn chat_behavior(&self) -> ChatBehavior {
        ChatBehavior::default()
            .with_bot_name(self.chat.bot_name.clone())
            .with_faqs(self.chat.faqs.clone())
    }
}
