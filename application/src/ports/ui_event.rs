//! UI event types emitted by SessionController for presentation layer rendering
//!
//! These events form the output port from the application layer to the
//! presentation layer. The presentation layer receives them and renders them
//! (e.g., the terminal REPL presenter).

use super::chat_backend::{HealthReport, SessionListing, SessionStatus};
use chat_domain::{Message, SessionId};

/// Events emitted by SessionController for the presentation layer to render
#[derive(Debug, Clone)]
pub enum UiEvent {
    // === Welcome & Info ===
    /// Display welcome banner
    Welcome(WelcomeInfo),
    /// Display help text for all available commands
    Help,

    // === Conversation ===
    /// A message was appended to the transcript
    MessageAppended(Message),
    /// A request started (`true`) or finished (`false`)
    BusyChanged(bool),

    // === Session Lifecycle ===
    /// Backend issued a session id
    SessionStarted { session_id: SessionId },
    /// Session was ended on request
    SessionEnded { session_id: SessionId },
    /// Server-side session status
    Status(SessionStatus),
    /// Backend health report
    Health(HealthReport),
    /// Sessions held by the backend, with the client's own session if any
    SessionList {
        listing: SessionListing,
        current: Option<SessionId>,
    },

    // === Quick Questions & History ===
    /// Configured FAQ questions
    FaqList { faqs: Vec<String> },
    /// Snapshot of the transcript
    History { messages: Vec<Message> },

    // === Errors & Control ===
    /// Command usage/validation error
    CommandError { message: String },
    /// Unknown command entered
    UnknownCommand { command: String },
    /// Exit message
    Exit,
}

/// Information for rendering the welcome banner
#[derive(Debug, Clone)]
pub struct WelcomeInfo {
    pub bot_name: String,
    pub faq_count: usize,
}
