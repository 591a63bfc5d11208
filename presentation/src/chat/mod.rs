//! Interactive chat module
//!
//! Provides a readline-based chat interface and the presenter that renders
//! session events to the terminal.

mod presenter;
mod repl;

pub use presenter::ReplPresenter;
pub use repl::ChatRepl;
