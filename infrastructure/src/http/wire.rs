//! JSON bodies exchanged with the chat backend.
//!
//! Unknown response fields are ignored, so backends may return more than the
//! client reads.

use chat_application::{HealthReport, SessionListing, SessionStatus};
use serde::{Deserialize, Serialize};

/// Body of `POST /session/start`: always `{}`
#[derive(Debug, Default, Serialize)]
pub struct StartSessionRequest {}

/// Body of `POST /chat`
#[derive(Debug, Serialize)]
pub struct ChatRequest<'a> {
    pub message: &'a str,
    pub session_id: &'a str,
}

/// Response of `POST /session/start` and `POST /session/{id}/reset`
#[derive(Debug, Deserialize)]
pub struct GreetingResponse {
    pub session_id: String,
    pub response_to_user: String,
}

/// Response of `POST /chat`
#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    pub response_to_user: String,
}

/// Response of `GET /session/{id}/status`
#[derive(Debug, Deserialize)]
pub struct StatusResponse {
    pub session_id: String,
    #[serde(default)]
    pub active_workflow: Option<String>,
    #[serde(default)]
    pub kyc_step: Option<String>,
    #[serde(default)]
    pub completed_workflows: Vec<String>,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub last_activity: Option<String>,
}

impl From<StatusResponse> for SessionStatus {
    fn from(r: StatusResponse) -> Self {
        Self {
            session_id: r.session_id,
            active_workflow: r.active_workflow,
            kyc_step: r.kyc_step,
            completed_workflows: r.completed_workflows,
            is_active: r.is_active,
            created_at: r.created_at,
            last_activity: r.last_activity,
        }
    }
}

/// Response of `GET /sessions`
#[derive(Debug, Deserialize)]
pub struct SessionListResponse {
    #[serde(default)]
    pub active_sessions: u64,
    #[serde(default)]
    pub sessions: Vec<StatusResponse>,
}

impl From<SessionListResponse> for SessionListing {
    fn from(r: SessionListResponse) -> Self {
        Self {
            active_sessions: r.active_sessions,
            sessions: r.sessions.into_iter().map(SessionStatus::from).collect(),
        }
    }
}

/// Response of `GET /health`
#[derive(Debug, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    #[serde(default)]
    pub active_sessions: u64,
    #[serde(default)]
    pub registered_webhooks: Option<u64>,
    #[serde(default)]
    pub service: String,
}

impl From<HealthResponse> for HealthReport {
    fn from(r: HealthResponse) -> Self {
        Self {
            status: r.status,
            active_sessions: r.active_sessions,
            registered_webhooks: r.registered_webhooks,
            service: r.service,
        }
    }
}
