//! REPL (Read-Eval-Print Loop) for interactive chat

use super::presenter::ReplPresenter;
use chat_application::{CommandAction, SessionController, UiEvent};
use rustyline::error::ReadlineError;
use rustyline::{DefaultEditor, Result as RlResult};
use std::future::Future;
use std::path::PathBuf;
use tokio::sync::mpsc;
use tracing::debug;

/// Interactive chat REPL
///
/// Reads a line, hands it to the [`SessionController`] and renders the
/// resulting events while the request runs. The next prompt only appears
/// once the previous action has finished, so input stays disabled while
/// the session is busy.
pub struct ChatRepl {
    controller: SessionController,
    rx: mpsc::UnboundedReceiver<UiEvent>,
    presenter: ReplPresenter,
    history_path: Option<PathBuf>,
}

impl ChatRepl {
    pub fn new(
        controller: SessionController,
        rx: mpsc::UnboundedReceiver<UiEvent>,
        presenter: ReplPresenter,
    ) -> Self {
        Self {
            controller,
            rx,
            presenter,
            history_path: default_history_path(),
        }
    }

    /// Override where input history is persisted
    pub fn with_history_path(mut self, path: Option<PathBuf>) -> Self {
        if path.is_some() {
            self.history_path = path;
        }
        self
    }

    /// Start a session, send one message, render everything and return.
    pub async fn run_once(&mut self, message: &str) {
        pump(&mut self.rx, &mut self.presenter, self.controller.start_session()).await;
        if self.controller.session_id().is_some() {
            pump(
                &mut self.rx,
                &mut self.presenter,
                self.controller.submit(message),
            )
            .await;
        }
    }

    /// Run the interactive REPL
    pub async fn run(&mut self) -> RlResult<()> {
        let mut rl = DefaultEditor::new()?;

        if let Some(ref path) = self.history_path {
            if let Some(parent) = path.parent() {
                let _ = std::fs::create_dir_all(parent);
            }
            let _ = rl.load_history(path);
        }

        self.controller.send_welcome();
        pump(&mut self.rx, &mut self.presenter, self.controller.start_session()).await;

        loop {
            let readline = rl.readline("> ");

            match readline {
                Ok(line) => {
                    let line = line.trim();

                    if line.is_empty() {
                        continue;
                    }

                    let _ = rl.add_history_entry(line);

                    if line.starts_with('/') {
                        let action = pump(
                            &mut self.rx,
                            &mut self.presenter,
                            self.controller.handle_command(line),
                        )
                        .await;
                        if action == CommandAction::Exit {
                            break;
                        }
                        continue;
                    }

                    debug_assert!(!self.controller.busy_flag().is_busy());
                    pump(
                        &mut self.rx,
                        &mut self.presenter,
                        self.controller.submit(line),
                    )
                    .await;
                }
                Err(ReadlineError::Interrupted) => {
                    println!("^C");
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    println!("Bye!");
                    break;
                }
                Err(err) => {
                    eprintln!("Error: {:?}", err);
                    break;
                }
            }
        }

        if let Some(ref path) = self.history_path {
            let _ = rl.save_history(path);
        }

        Ok(())
    }
}

/// Drive `op` to completion while rendering the events it emits, then
/// render whatever is still queued.
async fn pump<F: Future>(
    rx: &mut mpsc::UnboundedReceiver<UiEvent>,
    presenter: &mut ReplPresenter,
    op: F,
) -> F::Output {
    tokio::pin!(op);
    let output = loop {
        tokio::select! {
            output = &mut op => break output,
            Some(event) = rx.recv() => presenter.render(&event),
        }
    };

    while let Ok(event) = rx.try_recv() {
        presenter.render(&event);
    }
    debug!("Action finished");
    output
}

fn default_history_path() -> Option<PathBuf> {
    dirs::data_dir().map(|p| p.join("session-chat").join("history.txt"))
}
