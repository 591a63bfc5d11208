//! Chat session domain.
//!
//! - [`entities::Message`] - a single message shown in the conversation
//! - [`entities::SessionId`] - the backend-issued session identifier
//! - [`transcript::Transcript`] - append-only message list
//! - [`state::SessionState`] - session id, transcript and busy flag
//! - [`notices`] - locally generated bot messages

pub mod entities;
pub mod notices;
pub mod state;
pub mod transcript;
