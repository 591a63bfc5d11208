//! Session Controller
//!
//! Owns the chat session state and runs every user action against the
//! backend: request, await, render. Emits UiEvent messages to a channel for
//! the presentation layer to render.
//!
//! Failures never propagate out of the controller. Each one is logged with
//! `tracing` and turned into a locally rendered bot message or a
//! [`UiEvent::CommandError`].

use crate::config::ChatBehavior;
use crate::ports::chat_backend::ChatBackend;
use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger,
};
use crate::ports::ui_event::{UiEvent, WelcomeInfo};
use crate::use_cases::busy_guard::BusyGuard;
use chat_domain::util::{normalize_input, truncate_str};
use chat_domain::{BusyFlag, Message, SessionId, SessionPhase, SessionState, notices};
use serde_json::json;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Result of handling a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandAction {
    /// Continue the REPL loop
    Continue,
    /// Exit the REPL
    Exit,
}

/// Controller for a single chat session
///
/// The presentation layer calls the handler methods (`start_session`,
/// `submit`, `select_faq`, `handle_command`) and renders the [`UiEvent`]s
/// that come back over the channel.
pub struct SessionController {
    backend: Arc<dyn ChatBackend>,
    behavior: ChatBehavior,
    state: SessionState,
    /// Channel sender for UI events
    tx: mpsc::UnboundedSender<UiEvent>,
    /// Conversation logger for structured event logging
    conversation_logger: Arc<dyn ConversationLogger>,
}

impl SessionController {
    pub fn new(
        backend: Arc<dyn ChatBackend>,
        behavior: ChatBehavior,
        tx: mpsc::UnboundedSender<UiEvent>,
    ) -> Self {
        Self {
            backend,
            behavior,
            state: SessionState::new(),
            tx,
            conversation_logger: Arc::new(NoConversationLogger),
        }
    }

    /// Create with a conversation logger.
    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.conversation_logger = logger;
        self
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn behavior(&self) -> &ChatBehavior {
        &self.behavior
    }

    /// Shared handle on the busy flag, for gating input.
    pub fn busy_flag(&self) -> BusyFlag {
        self.state.busy().clone()
    }

    /// Emit the welcome banner.
    pub fn send_welcome(&self) {
        let _ = self.tx.send(UiEvent::Welcome(WelcomeInfo {
            bot_name: self.behavior.bot_name.clone(),
            faq_count: self.behavior.faqs.len(),
        }));
    }

    // ==================== Session Lifecycle ====================

    /// Open a session with the backend.
    ///
    /// On success the session id is stored and the greeting is shown as a
    /// bot message. On failure the apology notice is shown and the session
    /// id stays unset.
    pub async fn start_session(&mut self) {
        if let Some(existing) = self.state.session_id() {
            info!("Starting a new session, replacing {}", existing);
        }

        let _busy = self.engage_busy();
        let result = self.backend.start_session().await;

        match result {
            Ok(greeting) => {
                info!("Session started: {}", greeting.session_id);
                self.conversation_logger.log(ConversationEvent::new(
                    "session_started",
                    json!({ "session_id": greeting.session_id.as_str() }),
                ));
                self.state.activate(greeting.session_id.clone());
                let _ = self.tx.send(UiEvent::SessionStarted {
                    session_id: greeting.session_id,
                });
                self.append(Message::bot(greeting.response_to_user));
            }
            Err(e) => {
                warn!("Error starting session: {}", e);
                self.conversation_logger.log(ConversationEvent::new(
                    "session_start_failed",
                    json!({ "error": e.to_string() }),
                ));
                self.append(Message::bot(notices::CONNECT_FAILURE));
            }
        }
    }

    /// Send a message within the current session and render the reply.
    ///
    /// Without a session this shows the inactive notice and makes no
    /// request. Any request failure shows the generic error notice; the
    /// session stays active either way.
    pub async fn send_message(&mut self, text: &str) {
        let Some(session_id) = self.state.session_id().cloned() else {
            debug!("send_message without an active session");
            self.append(Message::bot(notices::SESSION_INACTIVE));
            return;
        };

        self.conversation_logger.log(ConversationEvent::new(
            "message_sent",
            json!({ "session_id": session_id.as_str(), "text": text }),
        ));

        let _busy = self.engage_busy();
        let result = self.backend.send_message(&session_id, text).await;

        match result {
            Ok(reply) => {
                debug!(
                    "Reply received: {}",
                    truncate_str(&reply.response_to_user, 100)
                );
                self.conversation_logger.log(ConversationEvent::new(
                    "response_received",
                    json!({
                        "session_id": session_id.as_str(),
                        "text": reply.response_to_user,
                    }),
                ));
                self.append(Message::bot(reply.response_to_user));
            }
            Err(e) => {
                warn!("Error sending message: {}", e);
                self.conversation_logger.log(ConversationEvent::new(
                    "send_failed",
                    json!({ "session_id": session_id.as_str(), "error": e.to_string() }),
                ));
                self.append(Message::bot(notices::SEND_FAILURE));
            }
        }
    }

    /// Chat form submit: show the user's message, then send it.
    ///
    /// Blank input is ignored.
    pub async fn submit(&mut self, raw: &str) {
        let Some(text) = normalize_input(raw) else {
            return;
        };
        let text = text.to_string();
        self.append(Message::user(text.clone()));
        self.send_message(&text).await;
    }

    /// Send the FAQ question at `index` as if the user typed it.
    pub async fn select_faq(&mut self, index: usize) {
        let Some(question) = self.behavior.faq(index).map(str::to_string) else {
            let _ = self.tx.send(UiEvent::CommandError {
                message: format!(
                    "No FAQ #{} (there are {})",
                    index + 1,
                    self.behavior.faqs.len()
                ),
            });
            return;
        };
        self.submit(&question).await;
    }

    /// Reset the server-side conversation and show the fresh greeting.
    pub async fn reset_session(&mut self) {
        let Some(session_id) = self.state.session_id().cloned() else {
            self.append(Message::bot(notices::SESSION_INACTIVE));
            return;
        };

        let _busy = self.engage_busy();
        let result = self.backend.reset_session(&session_id).await;

        match result {
            Ok(greeting) => {
                info!("Session reset: {}", session_id);
                self.conversation_logger.log(ConversationEvent::new(
                    "session_reset",
                    json!({ "session_id": session_id.as_str() }),
                ));
                self.append(Message::bot(greeting.response_to_user));
            }
            Err(e) => {
                warn!("Error resetting session: {}", e);
                self.append(Message::bot(notices::SEND_FAILURE));
            }
        }
    }

    /// Fetch and display the server-side session status.
    pub async fn session_status(&mut self) {
        let Some(session_id) = self.state.session_id().cloned() else {
            self.command_error("No active session");
            return;
        };

        let _busy = self.engage_busy();
        let result = self.backend.session_status(&session_id).await;

        match result {
            Ok(status) => {
                let _ = self.tx.send(UiEvent::Status(status));
            }
            Err(e) => {
                warn!("Error fetching session status: {}", e);
                self.command_error(&format!("Could not fetch session status: {}", e));
            }
        }
    }

    /// End the session on the server and forget its id.
    ///
    /// If the request fails the session is kept.
    pub async fn end_session(&mut self) {
        let Some(session_id) = self.state.session_id().cloned() else {
            self.command_error("No active session to end");
            return;
        };

        let _busy = self.engage_busy();
        let result = self.backend.end_session(&session_id).await;

        match result {
            Ok(()) => {
                info!("Session ended: {}", session_id);
                self.state.deactivate();
                self.conversation_logger.log(ConversationEvent::new(
                    "session_ended",
                    json!({ "session_id": session_id.as_str() }),
                ));
                let _ = self.tx.send(UiEvent::SessionEnded { session_id });
            }
            Err(e) => {
                warn!("Error ending session: {}", e);
                self.command_error(&format!("Could not end session: {}", e));
            }
        }
    }

    /// List every session the backend holds.
    pub async fn list_sessions(&mut self) {
        let _busy = self.engage_busy();
        let result = self.backend.list_sessions().await;

        match result {
            Ok(listing) => {
                debug!("Backend holds {} session(s)", listing.active_sessions);
                let _ = self.tx.send(UiEvent::SessionList {
                    listing,
                    current: self.state.session_id().cloned(),
                });
            }
            Err(e) => {
                warn!("Error listing sessions: {}", e);
                self.command_error(&format!("Could not list sessions: {}", e));
            }
        }
    }

    /// Check backend health.
    pub async fn health(&mut self) {
        let _busy = self.engage_busy();
        let result = self.backend.health().await;

        match result {
            Ok(report) => {
                let _ = self.tx.send(UiEvent::Health(report));
            }
            Err(e) => {
                warn!("Health check failed: {}", e);
                self.command_error(&format!("Health check failed: {}", e));
            }
        }
    }

    // ==================== Commands ====================

    /// Handle a `/command` line.
    pub async fn handle_command(&mut self, line: &str) -> CommandAction {
        let mut parts = line.trim().splitn(2, char::is_whitespace);
        let command = parts.next().unwrap_or_default();
        let arg = parts.next().map(str::trim).filter(|a| !a.is_empty());

        match command {
            "/quit" | "/exit" | "/q" => {
                let _ = self.tx.send(UiEvent::Exit);
                return CommandAction::Exit;
            }
            "/help" | "/h" | "/?" => {
                let _ = self.tx.send(UiEvent::Help);
            }
            "/start" => self.start_session().await,
            "/status" => self.session_status().await,
            "/reset" => self.reset_session().await,
            "/end" => self.end_session().await,
            "/health" => self.health().await,
            "/sessions" => self.list_sessions().await,
            "/history" => {
                let _ = self.tx.send(UiEvent::History {
                    messages: self.state.transcript().messages().to_vec(),
                });
            }
            "/faq" => match arg {
                None => {
                    let _ = self.tx.send(UiEvent::FaqList {
                        faqs: self.behavior.faqs.clone(),
                    });
                }
                Some(n) => match n.parse::<usize>() {
                    Ok(n) if n >= 1 => self.select_faq(n - 1).await,
                    _ => self.command_error("Usage: /faq [number]"),
                },
            },
            _ => {
                let _ = self.tx.send(UiEvent::UnknownCommand {
                    command: command.to_string(),
                });
            }
        }

        CommandAction::Continue
    }

    // ==================== Helpers ====================

    fn engage_busy(&self) -> BusyGuard {
        BusyGuard::engage(self.state.busy().clone(), self.tx.clone())
    }

    fn append(&mut self, message: Message) {
        let rendered = self.state.append(message);
        let _ = self.tx.send(UiEvent::MessageAppended(rendered));
    }

    fn command_error(&self, message: &str) {
        let _ = self.tx.send(UiEvent::CommandError {
            message: message.to_string(),
        });
    }

    /// Current session phase.
    pub fn phase(&self) -> SessionPhase {
        self.state.phase()
    }

    /// Current session id, if any.
    pub fn session_id(&self) -> Option<&SessionId> {
        self.state.session_id()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::chat_backend::{
        BackendError, ChatReply, HealthReport, SessionGreeting, SessionListing, SessionStatus,
    };
    use async_trait::async_trait;
    use chat_domain::Sender;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    // ==================== Test Mocks ====================

    /// Scripted backend: each call pops the next canned reply and records
    /// whether the busy flag was set while it ran.
    #[derive(Default)]
    struct MockBackend {
        start_replies: Mutex<VecDeque<Result<SessionGreeting, BackendError>>>,
        chat_replies: Mutex<VecDeque<Result<ChatReply, BackendError>>>,
        end_replies: Mutex<VecDeque<Result<(), BackendError>>>,
        calls: Mutex<Vec<String>>,
        busy: Mutex<Option<BusyFlag>>,
        busy_during_calls: Mutex<Vec<bool>>,
    }

    impl MockBackend {
        fn with_start(self, reply: Result<SessionGreeting, BackendError>) -> Self {
            self.start_replies.lock().unwrap().push_back(reply);
            self
        }

        fn with_chat(self, reply: Result<ChatReply, BackendError>) -> Self {
            self.chat_replies.lock().unwrap().push_back(reply);
            self
        }

        fn with_end(self, reply: Result<(), BackendError>) -> Self {
            self.end_replies.lock().unwrap().push_back(reply);
            self
        }

        fn observe(&self, flag: BusyFlag) {
            *self.busy.lock().unwrap() = Some(flag);
        }

        fn record(&self, call: String) {
            if let Some(flag) = self.busy.lock().unwrap().as_ref() {
                self.busy_during_calls.lock().unwrap().push(flag.is_busy());
            }
            self.calls.lock().unwrap().push(call);
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ChatBackend for MockBackend {
        async fn start_session(&self) -> Result<SessionGreeting, BackendError> {
            self.record("start".to_string());
            self.start_replies
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(BackendError::Connection("no reply".to_string())))
        }

        async fn send_message(
            &self,
            session_id: &SessionId,
            message: &str,
        ) -> Result<ChatReply, BackendError> {
            self.record(format!("chat:{}:{}", session_id, message));
            self.chat_replies
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(BackendError::Connection("no reply".to_string())))
        }

        async fn reset_session(
            &self,
            session_id: &SessionId,
        ) -> Result<SessionGreeting, BackendError> {
            self.record(format!("reset:{}", session_id));
            Ok(greeting(session_id.as_str(), "Fresh start"))
        }

        async fn session_status(
            &self,
            session_id: &SessionId,
        ) -> Result<SessionStatus, BackendError> {
            self.record(format!("status:{}", session_id));
            Ok(SessionStatus {
                session_id: session_id.to_string(),
                active_workflow: Some("pan".to_string()),
                is_active: true,
                ..Default::default()
            })
        }

        async fn end_session(&self, session_id: &SessionId) -> Result<(), BackendError> {
            self.record(format!("end:{}", session_id));
            self.end_replies.lock().unwrap().pop_front().unwrap_or(Ok(()))
        }

        async fn list_sessions(&self) -> Result<SessionListing, BackendError> {
            self.record("sessions".to_string());
            Ok(SessionListing {
                active_sessions: 2,
                sessions: vec![
                    SessionStatus {
                        session_id: "abc".to_string(),
                        is_active: true,
                        ..Default::default()
                    },
                    SessionStatus {
                        session_id: "other".to_string(),
                        is_active: true,
                        ..Default::default()
                    },
                ],
            })
        }

        async fn health(&self) -> Result<HealthReport, BackendError> {
            self.record("health".to_string());
            Ok(HealthReport {
                status: "healthy".to_string(),
                active_sessions: 2,
                registered_webhooks: None,
                service: "test".to_string(),
            })
        }
    }

    fn greeting(id: &str, text: &str) -> SessionGreeting {
        SessionGreeting {
            session_id: SessionId::new(id).unwrap(),
            response_to_user: text.to_string(),
        }
    }

    fn reply(text: &str) -> ChatReply {
        ChatReply {
            response_to_user: text.to_string(),
        }
    }

    fn setup(
        backend: MockBackend,
    ) -> (
        SessionController,
        Arc<MockBackend>,
        mpsc::UnboundedReceiver<UiEvent>,
    ) {
        let backend = Arc::new(backend);
        let (tx, rx) = mpsc::unbounded_channel();
        let controller = SessionController::new(backend.clone(), ChatBehavior::default(), tx);
        backend.observe(controller.busy_flag());
        (controller, backend, rx)
    }

    fn transcript(controller: &SessionController) -> Vec<(Sender, String)> {
        controller
            .state()
            .transcript()
            .iter()
            .map(|m| (m.sender(), m.text().to_string()))
            .collect()
    }

    fn drain(rx: &mut mpsc::UnboundedReceiver<UiEvent>) -> Vec<UiEvent> {
        let mut events = Vec::new();
        while let Ok(event) = rx.try_recv() {
            events.push(event);
        }
        events
    }

    // ==================== start_session ====================

    #[tokio::test]
    async fn test_start_session_stores_id_and_greeting() {
        let (mut controller, _backend, mut rx) =
            setup(MockBackend::default().with_start(Ok(greeting("abc", "Hi!"))));

        controller.start_session().await;

        assert_eq!(controller.session_id().unwrap().as_str(), "abc");
        assert_eq!(controller.phase(), SessionPhase::Active);
        assert_eq!(transcript(&controller), vec![(Sender::Bot, "Hi!".to_string())]);

        let events = drain(&mut rx);
        assert_eq!(events.len(), 4);
        assert!(matches!(events[0], UiEvent::BusyChanged(true)));
        assert!(
            matches!(&events[1], UiEvent::SessionStarted { session_id } if session_id.as_str() == "abc")
        );
        assert!(matches!(&events[2], UiEvent::MessageAppended(m) if m.text() == "Hi!"));
        assert!(matches!(events[3], UiEvent::BusyChanged(false)));
    }

    #[tokio::test]
    async fn test_start_session_failure_shows_apology() {
        let (mut controller, _backend, _rx) = setup(
            MockBackend::default().with_start(Err(BackendError::Http { status: 503 })),
        );

        controller.start_session().await;

        assert!(controller.session_id().is_none());
        assert_eq!(controller.phase(), SessionPhase::NoSession);
        assert_eq!(
            transcript(&controller),
            vec![(Sender::Bot, notices::CONNECT_FAILURE.to_string())]
        );
        assert!(!controller.state().is_busy());
    }

    // ==================== send_message ====================

    #[tokio::test]
    async fn test_send_without_session_makes_no_request() {
        let (mut controller, backend, _rx) = setup(MockBackend::default());

        controller.send_message("hello").await;

        assert!(backend.calls().is_empty());
        assert_eq!(
            transcript(&controller),
            vec![(Sender::Bot, notices::SESSION_INACTIVE.to_string())]
        );
    }

    #[tokio::test]
    async fn test_submit_renders_user_then_bot() {
        let (mut controller, backend, _rx) = setup(
            MockBackend::default()
                .with_start(Ok(greeting("abc", "Hi!")))
                .with_chat(Ok(reply("Hello back"))),
        );

        controller.start_session().await;
        controller.submit("hello").await;

        assert_eq!(
            transcript(&controller),
            vec![
                (Sender::Bot, "Hi!".to_string()),
                (Sender::User, "hello".to_string()),
                (Sender::Bot, "Hello back".to_string()),
            ]
        );
        assert_eq!(backend.calls(), vec!["start", "chat:abc:hello"]);
    }

    /// Compact trace of rendered events: busy toggles and message text.
    fn event_trace(events: Vec<UiEvent>) -> Vec<String> {
        events
            .into_iter()
            .filter_map(|e| match e {
                UiEvent::BusyChanged(b) => Some(format!("busy={}", b)),
                UiEvent::MessageAppended(m) => Some(format!("{}:{}", m.sender(), m.text())),
                _ => None,
            })
            .collect()
    }

    #[tokio::test]
    async fn test_reply_is_rendered_before_busy_clears() {
        let (mut controller, _backend, mut rx) = setup(
            MockBackend::default()
                .with_start(Ok(greeting("abc", "Hi!")))
                .with_chat(Ok(reply("Hello back")))
                .with_chat(Err(BackendError::Http { status: 500 })),
        );

        controller.start_session().await;
        controller.submit("hello").await;
        controller.submit("again").await;

        let failure = format!("bot:{}", notices::SEND_FAILURE);
        assert_eq!(
            event_trace(drain(&mut rx)),
            vec![
                "busy=true",
                "bot:Hi!",
                "busy=false",
                "user:hello",
                "busy=true",
                "bot:Hello back",
                "busy=false",
                "user:again",
                "busy=true",
                failure.as_str(),
                "busy=false",
            ]
        );
    }

    #[tokio::test]
    async fn test_http_500_on_chat_shows_generic_error() {
        let (mut controller, _backend, _rx) = setup(
            MockBackend::default()
                .with_start(Ok(greeting("abc", "Hi!")))
                .with_chat(Err(BackendError::Http { status: 500 })),
        );

        controller.start_session().await;
        controller.submit("x").await;

        let messages = transcript(&controller);
        assert_eq!(
            &messages[1..],
            &[
                (Sender::User, "x".to_string()),
                (Sender::Bot, notices::SEND_FAILURE.to_string()),
            ]
        );
        // A failed send keeps the session
        assert_eq!(controller.phase(), SessionPhase::Active);
    }

    #[tokio::test]
    async fn test_busy_flag_spans_request_on_both_paths() {
        let (mut controller, backend, mut rx) = setup(
            MockBackend::default()
                .with_start(Ok(greeting("abc", "Hi!")))
                .with_chat(Ok(reply("ok")))
                .with_chat(Err(BackendError::Connection("refused".to_string()))),
        );

        controller.start_session().await;
        controller.send_message("one").await;
        assert!(!controller.state().is_busy());
        controller.send_message("two").await;
        assert!(!controller.state().is_busy());

        assert_eq!(
            *backend.busy_during_calls.lock().unwrap(),
            vec![true, true, true]
        );

        let busy_events: Vec<bool> = drain(&mut rx)
            .into_iter()
            .filter_map(|e| match e {
                UiEvent::BusyChanged(b) => Some(b),
                _ => None,
            })
            .collect();
        assert_eq!(busy_events, vec![true, false, true, false, true, false]);
    }

    #[tokio::test]
    async fn test_submit_ignores_blank_input() {
        let (mut controller, backend, _rx) = setup(MockBackend::default());

        controller.submit("   ").await;

        assert!(backend.calls().is_empty());
        assert!(controller.state().transcript().is_empty());
    }

    #[tokio::test]
    async fn test_submit_trims_input() {
        let (mut controller, backend, _rx) = setup(
            MockBackend::default()
                .with_start(Ok(greeting("abc", "Hi!")))
                .with_chat(Ok(reply("PAN noted"))),
        );

        controller.start_session().await;
        controller.submit("  PAN \n").await;

        assert_eq!(backend.calls()[1], "chat:abc:PAN");
    }

    // ==================== Supplementary operations ====================

    #[tokio::test]
    async fn test_select_faq_submits_question() {
        let backend = Arc::new(
            MockBackend::default()
                .with_start(Ok(greeting("abc", "Hi!")))
                .with_chat(Ok(reply("You need a PAN card"))),
        );
        let (tx, mut rx) = mpsc::unbounded_channel();
        let behavior =
            ChatBehavior::default().with_faqs(vec!["What documents do I need?".to_string()]);
        let mut controller = SessionController::new(backend.clone(), behavior, tx);

        controller.start_session().await;
        controller.select_faq(0).await;
        controller.select_faq(5).await;

        assert_eq!(
            backend.calls(),
            vec!["start", "chat:abc:What documents do I need?"]
        );
        let events = drain(&mut rx);
        assert!(events.iter().any(|e| matches!(
            e,
            UiEvent::CommandError { message } if message.contains("No FAQ #6")
        )));
    }

    #[tokio::test]
    async fn test_reset_appends_greeting() {
        let (mut controller, backend, _rx) =
            setup(MockBackend::default().with_start(Ok(greeting("abc", "Hi!"))));

        controller.start_session().await;
        controller.reset_session().await;

        assert_eq!(backend.calls(), vec!["start", "reset:abc"]);
        assert_eq!(
            controller.state().transcript().last().unwrap().text(),
            "Fresh start"
        );
    }

    #[tokio::test]
    async fn test_end_session_clears_id() {
        let (mut controller, _backend, mut rx) =
            setup(MockBackend::default().with_start(Ok(greeting("abc", "Hi!"))));

        controller.start_session().await;
        controller.end_session().await;

        assert_eq!(controller.phase(), SessionPhase::NoSession);
        assert!(drain(&mut rx)
            .iter()
            .any(|e| matches!(e, UiEvent::SessionEnded { .. })));
    }

    #[tokio::test]
    async fn test_failed_end_keeps_session() {
        let (mut controller, _backend, _rx) = setup(
            MockBackend::default()
                .with_start(Ok(greeting("abc", "Hi!")))
                .with_end(Err(BackendError::Http { status: 404 })),
        );

        controller.start_session().await;
        controller.end_session().await;

        assert_eq!(controller.phase(), SessionPhase::Active);
    }

    #[tokio::test]
    async fn test_status_without_session_is_command_error() {
        let (mut controller, backend, mut rx) = setup(MockBackend::default());

        controller.session_status().await;

        assert!(backend.calls().is_empty());
        assert!(matches!(
            drain(&mut rx).as_slice(),
            [UiEvent::CommandError { .. }]
        ));
    }

    // ==================== handle_command ====================

    #[tokio::test]
    async fn test_handle_command_routing() {
        let (mut controller, backend, mut rx) =
            setup(MockBackend::default().with_start(Ok(greeting("abc", "Hi!"))));

        assert_eq!(controller.handle_command("/help").await, CommandAction::Continue);
        assert_eq!(controller.handle_command("/start").await, CommandAction::Continue);
        assert_eq!(controller.handle_command("/status").await, CommandAction::Continue);
        assert_eq!(controller.handle_command("/health").await, CommandAction::Continue);
        assert_eq!(controller.handle_command("/bogus").await, CommandAction::Continue);
        assert_eq!(controller.handle_command("/faq x").await, CommandAction::Continue);
        assert_eq!(controller.handle_command("/quit").await, CommandAction::Exit);

        assert_eq!(backend.calls(), vec!["start", "status:abc", "health"]);

        let events = drain(&mut rx);
        assert!(events.iter().any(|e| matches!(e, UiEvent::Help)));
        assert!(events.iter().any(|e| matches!(e, UiEvent::Status(s) if s.session_id == "abc")));
        assert!(events.iter().any(|e| matches!(e, UiEvent::Health(h) if h.status == "healthy")));
        assert!(events.iter().any(
            |e| matches!(e, UiEvent::UnknownCommand { command } if command == "/bogus")
        ));
        assert!(events.iter().any(
            |e| matches!(e, UiEvent::CommandError { message } if message.starts_with("Usage"))
        ));
        assert!(matches!(events.last(), Some(UiEvent::Exit)));
    }

    #[tokio::test]
    async fn test_sessions_command_marks_current_session() {
        let (mut controller, backend, mut rx) =
            setup(MockBackend::default().with_start(Ok(greeting("abc", "Hi!"))));

        controller.start_session().await;
        drain(&mut rx);
        assert_eq!(controller.handle_command("/sessions").await, CommandAction::Continue);

        assert_eq!(backend.calls(), vec!["start", "sessions"]);
        let events = drain(&mut rx);
        assert!(matches!(events.first(), Some(UiEvent::BusyChanged(true))));
        assert!(matches!(events.last(), Some(UiEvent::BusyChanged(false))));
        assert!(events.iter().any(|e| matches!(
            e,
            UiEvent::SessionList { listing, current: Some(id) }
                if listing.sessions.len() == 2 && id.as_str() == "abc"
        )));
    }

    #[tokio::test]
    async fn test_history_command_snapshots_transcript() {
        let (mut controller, _backend, mut rx) =
            setup(MockBackend::default().with_start(Ok(greeting("abc", "Hi!"))));

        controller.start_session().await;
        drain(&mut rx);
        controller.handle_command("/history").await;

        match drain(&mut rx).as_slice() {
            [UiEvent::History { messages }] => {
                assert_eq!(messages.len(), 1);
                assert_eq!(messages[0].text(), "Hi!");
            }
            other => panic!("unexpected events: {:?}", other),
        }
    }
}
