//! Application layer for session-chat
//!
//! This crate contains the session controller, port definitions, and
//! application configuration. It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::ChatBehavior;
pub use ports::{
    chat_backend::{
        BackendError, ChatBackend, ChatReply, HealthReport, SessionGreeting, SessionListing,
        SessionStatus,
    },
    conversation_logger::{ConversationEvent, ConversationLogger, NoConversationLogger},
    ui_event::{UiEvent, WelcomeInfo},
};
pub use use_cases::busy_guard::BusyGuard;
pub use use_cases::session_controller::{CommandAction, SessionController};
