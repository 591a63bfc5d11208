//! Fixed bot messages generated locally instead of by the backend.

/// Shown when the session could not be started.
pub const CONNECT_FAILURE: &str = "Sorry, I am having trouble connecting. Please try again later.";

/// Shown when the user sends a message without an active session.
pub const SESSION_INACTIVE: &str =
    "The session is not active. Please restart the session with /start.";

/// Shown when a chat request fails for any reason.
pub const SEND_FAILURE: &str = "An error occurred. Please try again.";
