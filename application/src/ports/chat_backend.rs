//! Chat backend port
//!
//! Defines the interface for talking to the session-based chat backend.

use async_trait::async_trait;
use chat_domain::SessionId;
use thiserror::Error;

/// Errors that can occur while talking to the backend.
///
/// Every variant is treated the same way by the controller: the request
/// failed and a fixed notice is shown instead.
#[derive(Error, Debug)]
pub enum BackendError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("HTTP error: status {status}")]
    Http { status: u16 },

    #[error("Could not decode response: {0}")]
    Decode(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Invalid request URL: {0}")]
    InvalidUrl(String),
}

/// Reply to a session start or reset request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionGreeting {
    pub session_id: SessionId,
    pub response_to_user: String,
}

/// Reply to a chat message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatReply {
    pub response_to_user: String,
}

/// Server-side progress of a session
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionStatus {
    pub session_id: String,
    pub active_workflow: Option<String>,
    pub kyc_step: Option<String>,
    pub completed_workflows: Vec<String>,
    pub is_active: bool,
    pub created_at: Option<String>,
    pub last_activity: Option<String>,
}

/// Every session the backend currently holds
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionListing {
    pub active_sessions: u64,
    pub sessions: Vec<SessionStatus>,
}

/// Backend health report
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HealthReport {
    pub status: String,
    pub active_sessions: u64,
    pub registered_webhooks: Option<u64>,
    pub service: String,
}

/// Session-based chat backend
///
/// Implementations (adapters) live in the infrastructure layer. Each method
/// performs exactly one request; retries are never attempted.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Open a new session. The request carries an empty payload.
    async fn start_session(&self) -> Result<SessionGreeting, BackendError>;

    /// Send one user message within a session
    async fn send_message(
        &self,
        session_id: &SessionId,
        message: &str,
    ) -> Result<ChatReply, BackendError>;

    /// Reset the server-side conversation state of a session
    async fn reset_session(&self, session_id: &SessionId) -> Result<SessionGreeting, BackendError>;

    /// Fetch the server-side status of a session
    async fn session_status(&self, session_id: &SessionId) -> Result<SessionStatus, BackendError>;

    /// End a session on the server
    async fn end_session(&self, session_id: &SessionId) -> Result<(), BackendError>;

    /// List the sessions the backend holds (admin endpoint)
    async fn list_sessions(&self) -> Result<SessionListing, BackendError>;

    /// Check backend health
    async fn health(&self) -> Result<HealthReport, BackendError>;
}
