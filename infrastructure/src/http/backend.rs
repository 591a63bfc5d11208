//! reqwest-based [`ChatBackend`] adapter

use super::wire::{
    ChatRequest, ChatResponse, GreetingResponse, HealthResponse, SessionListResponse,
    StartSessionRequest, StatusResponse,
};
use crate::config::FileBackendConfig;
use async_trait::async_trait;
use chat_application::{
    BackendError, ChatBackend, ChatReply, HealthReport, SessionGreeting, SessionListing,
    SessionStatus,
};
use chat_domain::SessionId;
use reqwest::{Client, IntoUrl, Method, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use std::fmt::Display;
use std::time::Duration;
use tracing::debug;

/// Path prefix of the versioned API
const API_PREFIX: &str = "/api/v1";

/// Header carrying the optional API key
const API_KEY_HEADER: &str = "X-API-Key";

/// Chat backend reached over HTTP.
///
/// Every method is a single request. Non-2xx statuses are reported as
/// [`BackendError::Http`] without looking at the body.
pub struct HttpChatBackend {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl HttpChatBackend {
    pub fn new(
        base_url: impl Into<String>,
        api_key: Option<String>,
        timeout: Option<Duration>,
    ) -> Result<Self, BackendError> {
        let mut builder = Client::builder().user_agent(concat!(
            "session-chat/",
            env!("CARGO_PKG_VERSION")
        ));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| BackendError::Connection(e.to_string()))?;

        let base_url = base_url.into().trim_end_matches('/').to_string();

        Ok(Self {
            client,
            base_url,
            api_key,
        })
    }

    /// Build from the `[backend]` config section
    pub fn from_config(config: &FileBackendConfig) -> Result<Self, BackendError> {
        Self::new(
            config.base_url.clone(),
            config.api_key.clone(),
            config.timeout(),
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn api_url(&self, path: &str) -> String {
        format!("{}{}{}", self.base_url, API_PREFIX, path)
    }

    /// `/api/v1/session/{id}[/{action}]` with the id as one encoded segment.
    ///
    /// Session ids are opaque, so `/`, `?` and `#` in an id must not change
    /// which resource is addressed.
    fn session_url(
        &self,
        session_id: &SessionId,
        action: Option<&str>,
    ) -> Result<Url, BackendError> {
        let mut url = Url::parse(&self.api_url("/session"))
            .map_err(|e| BackendError::InvalidUrl(e.to_string()))?;
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| BackendError::InvalidUrl(self.base_url.clone()))?;
            segments.push(session_id.as_str());
            if let Some(action) = action {
                segments.push(action);
            }
        }
        Ok(url)
    }

    fn request<U: IntoUrl + Display>(&self, method: Method, url: U) -> RequestBuilder {
        debug!("{} {}", method, url);
        let builder = self.client.request(method, url);
        match &self.api_key {
            Some(key) => builder.header(API_KEY_HEADER, key),
            None => builder,
        }
    }

    async fn execute(builder: RequestBuilder) -> Result<Response, BackendError> {
        let response = builder
            .send()
            .await
            .map_err(|e| BackendError::Connection(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(BackendError::Http {
                status: status.as_u16(),
            });
        }
        Ok(response)
    }

    async fn fetch_json<T: DeserializeOwned>(builder: RequestBuilder) -> Result<T, BackendError> {
        Self::execute(builder)
            .await?
            .json::<T>()
            .await
            .map_err(|e| BackendError::Decode(e.to_string()))
    }

    fn into_greeting(response: GreetingResponse) -> Result<SessionGreeting, BackendError> {
        let session_id = SessionId::new(response.session_id)
            .map_err(|e| BackendError::InvalidResponse(e.to_string()))?;
        Ok(SessionGreeting {
            session_id,
            response_to_user: response.response_to_user,
        })
    }
}

#[async_trait]
impl ChatBackend for HttpChatBackend {
    async fn start_session(&self) -> Result<SessionGreeting, BackendError> {
        let builder = self
            .request(Method::POST, self.api_url("/session/start"))
            .json(&StartSessionRequest::default());
        let response: GreetingResponse = Self::fetch_json(builder).await?;
        Self::into_greeting(response)
    }

    async fn send_message(
        &self,
        session_id: &SessionId,
        message: &str,
    ) -> Result<ChatReply, BackendError> {
        let builder = self
            .request(Method::POST, self.api_url("/chat"))
            .json(&ChatRequest {
                message,
                session_id: session_id.as_str(),
            });
        let response: ChatResponse = Self::fetch_json(builder).await?;
        Ok(ChatReply {
            response_to_user: response.response_to_user,
        })
    }

    async fn reset_session(&self, session_id: &SessionId) -> Result<SessionGreeting, BackendError> {
        let url = self.session_url(session_id, Some("reset"))?;
        let response: GreetingResponse =
            Self::fetch_json(self.request(Method::POST, url)).await?;
        Self::into_greeting(response)
    }

    async fn session_status(&self, session_id: &SessionId) -> Result<SessionStatus, BackendError> {
        let url = self.session_url(session_id, Some("status"))?;
        let response: StatusResponse = Self::fetch_json(self.request(Method::GET, url)).await?;
        Ok(response.into())
    }

    async fn end_session(&self, session_id: &SessionId) -> Result<(), BackendError> {
        let url = self.session_url(session_id, None)?;
        Self::execute(self.request(Method::DELETE, url)).await?;
        Ok(())
    }

    async fn list_sessions(&self) -> Result<SessionListing, BackendError> {
        let url = self.api_url("/sessions");
        let response: SessionListResponse =
            Self::fetch_json(self.request(Method::GET, url)).await?;
        Ok(response.into())
    }

    async fn health(&self) -> Result<HealthReport, BackendError> {
        let url = format!("{}/health", self.base_url);
        let response: HealthResponse = Self::fetch_json(self.request(Method::GET, url)).await?;
        Ok(response.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    // ==================== HTTP stub ====================

    /// Serve exactly one canned response on a local port.
    ///
    /// Returns the base URL and a handle resolving to the raw request text.
    async fn serve_once(status: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let request = read_request(&mut socket).await;

            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
            request
        });

        (format!("http://{}", addr), handle)
    }

    async fn read_request(socket: &mut tokio::net::TcpStream) -> String {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 1024];
        loop {
            let n = socket.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);

            let text = String::from_utf8_lossy(&buf);
            if let Some(header_end) = text.find("\r\n\r\n") {
                let content_length = text[..header_end]
                    .lines()
                    .find_map(|line| {
                        let (name, value) = line.split_once(':')?;
                        name.eq_ignore_ascii_case("content-length")
                            .then(|| value.trim().parse::<usize>().ok())
                            .flatten()
                    })
                    .unwrap_or(0);
                if buf.len() >= header_end + 4 + content_length {
                    break;
                }
            }
        }
        String::from_utf8_lossy(&buf).into_owned()
    }

    fn session(id: &str) -> SessionId {
        SessionId::new(id).unwrap()
    }

    // ==================== Tests ====================

    #[tokio::test]
    async fn test_start_session_posts_empty_body() {
        let (url, server) =
            serve_once("200 OK", r#"{"session_id":"abc","response_to_user":"Hi!"}"#).await;
        let backend = HttpChatBackend::new(url, None, None).unwrap();

        let greeting = backend.start_session().await.unwrap();
        assert_eq!(greeting.session_id.as_str(), "abc");
        assert_eq!(greeting.response_to_user, "Hi!");

        let request = server.await.unwrap();
        assert!(request.starts_with("POST /api/v1/session/start HTTP/1.1"));
        assert!(request.ends_with("{}"));
        assert!(!request.to_lowercase().contains("x-api-key"));
    }

    #[tokio::test]
    async fn test_send_message_body_and_api_key() {
        let (url, server) = serve_once("200 OK", r#"{"response_to_user":"Hello back"}"#).await;
        let backend = HttpChatBackend::new(format!("{}/", url), Some("k-123".to_string()), None)
            .unwrap();

        let reply = backend
            .send_message(&session("abc"), "hello")
            .await
            .unwrap();
        assert_eq!(reply.response_to_user, "Hello back");

        let request = server.await.unwrap();
        assert!(request.starts_with("POST /api/v1/chat HTTP/1.1"));
        assert!(request.to_lowercase().contains("x-api-key: k-123"));
        assert!(request.contains(r#""message":"hello""#));
        assert!(request.contains(r#""session_id":"abc""#));
    }

    #[tokio::test]
    async fn test_non_2xx_is_http_error() {
        let (url, _server) =
            serve_once("500 Internal Server Error", r#"{"detail":"boom"}"#).await;
        let backend = HttpChatBackend::new(url, None, None).unwrap();

        let err = backend
            .send_message(&session("abc"), "x")
            .await
            .unwrap_err();
        assert!(matches!(err, BackendError::Http { status: 500 }));
    }

    #[tokio::test]
    async fn test_malformed_body_is_decode_error() {
        let (url, _server) = serve_once("200 OK", r#"{"unexpected":true}"#).await;
        let backend = HttpChatBackend::new(url, None, None).unwrap();

        let err = backend
            .send_message(&session("abc"), "x")
            .await
            .unwrap_err();
        assert!(matches!(err, BackendError::Decode(_)));
    }

    #[tokio::test]
    async fn test_empty_session_id_is_invalid_response() {
        let (url, _server) =
            serve_once("200 OK", r#"{"session_id":"","response_to_user":"Hi!"}"#).await;
        let backend = HttpChatBackend::new(url, None, None).unwrap();

        let err = backend.start_session().await.unwrap_err();
        assert!(matches!(err, BackendError::InvalidResponse(_)));
    }

    #[tokio::test]
    async fn test_refused_connection_is_connection_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let backend = HttpChatBackend::new(format!("http://{}", addr), None, None).unwrap();
        let err = backend.start_session().await.unwrap_err();
        assert!(matches!(err, BackendError::Connection(_)));
    }

    #[tokio::test]
    async fn test_session_status_and_end_paths() {
        let (url, server) = serve_once(
            "200 OK",
            r#"{"session_id":"abc","active_workflow":"pan","kyc_step":"verify","completed_workflows":["aadhaar"],"is_active":true}"#,
        )
        .await;
        let backend = HttpChatBackend::new(url, None, None).unwrap();
        let status = backend.session_status(&session("abc")).await.unwrap();
        assert_eq!(status.active_workflow.as_deref(), Some("pan"));
        assert_eq!(status.completed_workflows, vec!["aadhaar".to_string()]);
        assert!(server
            .await
            .unwrap()
            .starts_with("GET /api/v1/session/abc/status HTTP/1.1"));

        let (url, server) = serve_once(
            "200 OK",
            r#"{"message":"Session ended successfully","session_id":"abc"}"#,
        )
        .await;
        let backend = HttpChatBackend::new(url, None, None).unwrap();
        backend.end_session(&session("abc")).await.unwrap();
        assert!(server
            .await
            .unwrap()
            .starts_with("DELETE /api/v1/session/abc HTTP/1.1"));
    }

    #[tokio::test]
    async fn test_list_sessions() {
        let (url, server) = serve_once(
            "200 OK",
            r#"{"active_sessions":2,"sessions":[{"session_id":"abc","is_active":true},{"session_id":"def","active_workflow":"pan","is_active":true}]}"#,
        )
        .await;
        let backend = HttpChatBackend::new(url, Some("k-1".to_string()), None).unwrap();

        let listing = backend.list_sessions().await.unwrap();
        assert_eq!(listing.active_sessions, 2);
        assert_eq!(listing.sessions[1].active_workflow.as_deref(), Some("pan"));

        let request = server.await.unwrap();
        assert!(request.starts_with("GET /api/v1/sessions HTTP/1.1"));
        assert!(request.to_lowercase().contains("x-api-key: k-1"));
    }

    #[tokio::test]
    async fn test_health_uses_root_path() {
        let (url, server) = serve_once(
            "200 OK",
            r#"{"status":"healthy","active_sessions":3,"service":"KYC"}"#,
        )
        .await;
        let backend = HttpChatBackend::new(url, None, None).unwrap();

        let report = backend.health().await.unwrap();
        assert_eq!(report.status, "healthy");
        assert_eq!(report.active_sessions, 3);
        assert!(report.registered_webhooks.is_none());
        assert!(server.await.unwrap().starts_with("GET /health HTTP/1.1"));
    }

    #[tokio::test]
    async fn test_session_id_is_one_encoded_path_segment() {
        let (url, server) = serve_once(
            "200 OK",
            r#"{"session_id":"a/b?c#d","is_active":true}"#,
        )
        .await;
        let backend = HttpChatBackend::new(url, None, None).unwrap();

        let status = backend.session_status(&session("a/b?c#d")).await.unwrap();
        assert_eq!(status.session_id, "a/b?c#d");
        assert!(server
            .await
            .unwrap()
            .starts_with("GET /api/v1/session/a%2Fb%3Fc%23d/status HTTP/1.1"));
    }

    #[test]
    fn test_session_url_keeps_query_and_fragment_empty() {
        let backend = HttpChatBackend::new("http://localhost:8000/", None, None).unwrap();

        let url = backend
            .session_url(&session("a/b?c#d"), Some("reset"))
            .unwrap();
        assert_eq!(url.path(), "/api/v1/session/a%2Fb%3Fc%23d/reset");
        assert!(url.query().is_none());
        assert!(url.fragment().is_none());

        let url = backend.session_url(&session("abc"), None).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/api/v1/session/abc");
    }

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let backend = HttpChatBackend::new("http://localhost:8000/", None, None).unwrap();
        assert_eq!(backend.base_url(), "http://localhost:8000");
        assert_eq!(
            backend.api_url("/chat"),
            "http://localhost:8000/api/v1/chat"
        );
    }
}
