//! Typing indicator shown while a request is in flight

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Spinner standing in for the "bot is typing" bubble.
///
/// Disabled indicators ignore `start`/`stop`, which keeps quiet mode and
/// non-interactive output free of spinner frames.
pub struct TypingIndicator {
    enabled: bool,
    label: String,
    bar: Option<ProgressBar>,
}

impl TypingIndicator {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            enabled: true,
            label: label.into(),
            bar: None,
        }
    }

    pub fn disabled() -> Self {
        Self {
            enabled: false,
            label: String::new(),
            bar: None,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn is_active(&self) -> bool {
        self.bar.is_some()
    }

    fn style() -> ProgressStyle {
        ProgressStyle::with_template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ ")
    }

    pub fn start(&mut self) {
        if !self.enabled || self.bar.is_some() {
            return;
        }
        let bar = ProgressBar::new_spinner();
        bar.set_style(Self::style());
        bar.set_message(format!("{} is typing...", self.label));
        bar.enable_steady_tick(Duration::from_millis(100));
        self.bar = Some(bar);
    }

    /// Print a line without tearing the spinner, which keeps running below.
    pub fn print(&self, line: &str) {
        match &self.bar {
            Some(bar) => bar.suspend(|| println!("{}", line)),
            None => println!("{}", line),
        }
    }

    pub fn stop(&mut self) {
        if let Some(bar) = self.bar.take() {
            bar.finish_and_clear();
        }
    }
}

impl Drop for TypingIndicator {
    fn drop(&mut self) {
        self.stop();
    }
}
