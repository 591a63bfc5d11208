//! REPL Presenter - Renders UiEvents to the terminal
//!
//! All terminal output for the chat session is concentrated here, separating
//! display from session logic (which lives in SessionController in the
//! application layer).

use crate::output::console::ConsoleFormatter;
use crate::progress::typing::TypingIndicator;
use chat_application::{UiEvent, WelcomeInfo};
use colored::Colorize;

/// Renders UiEvents to the terminal for the REPL
pub struct ReplPresenter {
    formatter: ConsoleFormatter,
    typing: TypingIndicator,
    /// Print the user's own messages. Off in the interactive REPL, where the
    /// terminal already shows what was typed.
    echo_user: bool,
}

impl ReplPresenter {
    pub fn new(formatter: ConsoleFormatter) -> Self {
        let typing = TypingIndicator::new(formatter.bot_name());
        Self {
            formatter,
            typing,
            echo_user: false,
        }
    }

    pub fn with_progress(mut self, show: bool) -> Self {
        if !show {
            self.typing = TypingIndicator::disabled();
        }
        self
    }

    pub fn with_echo_user(mut self, echo: bool) -> Self {
        self.echo_user = echo;
        self
    }

    /// Render a single UiEvent to the terminal
    pub fn render(&mut self, event: &UiEvent) {
        if let Some(output) = self.render_to_string(event) {
            self.typing.print(&output);
        }
    }

    /// Produce the text for an event, handling the typing indicator as a
    /// side effect. Returns `None` for events with no printed output.
    pub fn render_to_string(&mut self, event: &UiEvent) -> Option<String> {
        match event {
            UiEvent::Welcome(info) => Some(self.welcome(info)),
            UiEvent::Help => Some(help_text()),
            UiEvent::MessageAppended(message) => {
                if message.is_from_user() && !self.echo_user {
                    None
                } else {
                    Some(self.formatter.format_message(message))
                }
            }
            UiEvent::BusyChanged(true) => {
                self.typing.start();
                None
            }
            UiEvent::BusyChanged(false) => {
                self.typing.stop();
                None
            }
            UiEvent::SessionStarted { session_id } => {
                Some(format!("Session started ({})", session_id).dimmed().to_string())
            }
            UiEvent::SessionEnded { session_id } => Some(format!(
                "{} Session {} ended. Use {} to begin a new one.",
                "✓".green(),
                session_id,
                "/start".cyan()
            )),
            UiEvent::Status(status) => Some(self.formatter.format_status(status)),
            UiEvent::Health(report) => Some(self.formatter.format_health(report)),
            UiEvent::SessionList { listing, current } => {
                Some(self.formatter.format_sessions(listing, current.as_ref()))
            }
            UiEvent::FaqList { faqs } => Some(self.formatter.format_faqs(faqs)),
            UiEvent::History { messages } => {
                if messages.is_empty() {
                    return Some("No messages yet.".to_string());
                }
                let lines: Vec<String> = messages
                    .iter()
                    .map(|m| self.formatter.format_message(m))
                    .collect();
                Some(lines.join("\n"))
            }
            UiEvent::CommandError { message } => {
                Some(format!("{} {}", "Error:".red().bold(), message))
            }
            UiEvent::UnknownCommand { command } => Some(format!(
                "{} Unknown command: {}\nType {} for available commands",
                "?".yellow(),
                command,
                "/help".cyan()
            )),
            UiEvent::Exit => Some("Bye!".to_string()),
        }
    }

    fn welcome(&self, info: &WelcomeInfo) -> String {
        let mut output = String::new();
        output.push('\n');
        output.push_str(&format!(
            "{}\n",
            "╭─────────────────────────────────────────────╮".cyan()
        ));
        output.push_str(&format!(
            "{}\n",
            format!("│ {:^43} │", format!("Chat with {}", info.bot_name)).cyan()
        ));
        output.push_str(&format!(
            "{}\n",
            "╰─────────────────────────────────────────────╯".cyan()
        ));
        if info.faq_count > 0 {
            output.push_str(&format!(
                "{} quick questions available, see {}\n",
                info.faq_count,
                "/faq".cyan()
            ));
        }
        output.push_str(&format!("Type {} for commands.\n", "/help".cyan()));
        output
    }
}

fn help_text() -> String {
    [
        "",
        "Commands:",
        "  /help, /h, /?      - Show this help",
        "  /start             - Start a new session",
        "  /status            - Show session progress",
        "  /reset             - Restart the conversation in this session",
        "  /end               - End the session",
        "  /faq               - List quick questions",
        "  /faq <number>      - Send a quick question",
        "  /history           - Show the conversation so far",
        "  /health            - Check the backend",
        "  /sessions          - List sessions held by the backend",
        "  /quit, /exit, /q   - Exit chat",
        "",
    ]
    .join("\n")
}
