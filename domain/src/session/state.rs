//! Client-side session state

use super::entities::{Message, SessionId};
use super::transcript::Transcript;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Whether the client currently holds a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// No session id; messages cannot be sent
    NoSession,
    /// Session id held; messages go to the backend
    Active,
}

impl SessionPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionPhase::NoSession => "no-session",
            SessionPhase::Active => "active",
        }
    }
}

/// Shared "request in flight" flag.
///
/// Cloning shares the underlying flag, so the presentation layer can gate
/// input on the same value the controller toggles.
#[derive(Debug, Clone, Default)]
pub struct BusyFlag(Arc<AtomicBool>);

impl BusyFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_busy(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    pub fn set(&self, busy: bool) {
        self.0.store(busy, Ordering::SeqCst);
    }
}

/// Everything the session client owns: the session id, the transcript and
/// the busy flag.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    session_id: Option<SessionId>,
    transcript: Transcript,
    busy: BusyFlag,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> SessionPhase {
        match self.session_id {
            Some(_) => SessionPhase::Active,
            None => SessionPhase::NoSession,
        }
    }

    pub fn session_id(&self) -> Option<&SessionId> {
        self.session_id.as_ref()
    }

    pub fn activate(&mut self, id: SessionId) {
        self.session_id = Some(id);
    }

    /// Drop the session id. Only an explicit end request does this.
    pub fn deactivate(&mut self) -> Option<SessionId> {
        self.session_id.take()
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// Append a message and return a copy for rendering.
    pub fn append(&mut self, message: Message) -> Message {
        self.transcript.push(message.clone());
        message
    }

    pub fn busy(&self) -> &BusyFlag {
        &self.busy
    }

    pub fn is_busy(&self) -> bool {
        self.busy.is_busy()
    }
}
