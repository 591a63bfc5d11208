//! Scoped busy indicator.

use crate::ports::ui_event::UiEvent;
use chat_domain::BusyFlag;
use tokio::sync::mpsc;

/// Holds the busy flag set for as long as it lives.
///
/// Dropping the guard clears the flag and tells the presenter, so the flag
/// is cleared on success, on error, and when the request future is dropped.
pub struct BusyGuard {
    flag: BusyFlag,
    tx: mpsc::UnboundedSender<UiEvent>,
}

impl BusyGuard {
    pub fn engage(flag: BusyFlag, tx: mpsc::UnboundedSender<UiEvent>) -> Self {
        flag.set(true);
        let _ = tx.send(UiEvent::BusyChanged(true));
        Self { flag, tx }
    }
}

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.flag.set(false);
        let _ = self.tx.send(UiEvent::BusyChanged(false));
    }
}
