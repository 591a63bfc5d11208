//! Use cases (application services)
//!
//! - [`session_controller::SessionController`] - runs every chat action
//!   against the backend and emits UI events
//! - [`busy_guard::BusyGuard`] - scoped busy indicator

pub mod busy_guard;
pub mod session_controller;
