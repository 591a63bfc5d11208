//! Domain layer for session-chat
//!
//! This crate contains the entities and value objects of a chat session.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! - **Session**: an opaque id issued by the backend; without it nothing can
//!   be sent.
//! - **Transcript**: the append-only list of user and bot messages.
//! - **Busy flag**: set while a request is in flight, gating further input.

pub mod core;
pub mod session;
pub mod util;

// Re-export commonly used types
pub use core::error::DomainError;
pub use session::{
    entities::{Message, Sender, SessionId},
    notices,
    state::{BusyFlag, SessionPhase, SessionState},
    transcript::Transcript,
};
