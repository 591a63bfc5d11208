//! HTTP adapter for the chat backend.
//!
//! - [`backend::HttpChatBackend`] - implements the
//!   [`ChatBackend`](chat_application::ChatBackend) port with `reqwest`
//! - [`wire`] - JSON request/response bodies

pub mod backend;
pub mod wire;

pub use backend::HttpChatBackend;
