//! Application-level configuration.
//!
//! Controls how the session controller presents itself, independent of
//! where the configuration was loaded from.

/// Default name shown for bot messages.
pub const DEFAULT_BOT_NAME: &str = "RIA";

/// Chat behavior configuration.
#[derive(Debug, Clone)]
pub struct ChatBehavior {
    /// Label used when rendering bot messages.
    pub bot_name: String,
    /// Canned questions offered through `/faq`.
    pub faqs: Vec<String>,
}

impl Default for ChatBehavior {
    fn default() -> Self {
        Self {
            bot_name: DEFAULT_BOT_NAME.to_string(),
            faqs: Vec::new(),
        }
    }
}

impl ChatBehavior {
    pub fn with_bot_name(mut self, name: impl Into<String>) -> Self {
        self.bot_name = name.into();
        self
    }

    pub fn with_faqs(mut self, faqs: Vec<String>) -> Self {
        self.faqs = faqs;
        self
    }

    /// Look up a FAQ by zero-based index.
    pub fn faq(&self, index: usize) -> Option<&str> {
        self.faqs.get(index).map(String::as_str)
    }
}
