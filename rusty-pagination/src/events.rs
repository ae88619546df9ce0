//! Lifecycle notifications emitted by a session.
//!
//! Order per session: `Start`, any number of `PageChange`, then `Timeout`
//! (only on expiry) and exactly one `End`. `Error` may appear anywhere.

use tokio::sync::mpsc;

use crate::error::PaginationError;
use crate::session::EndReason;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    Start { page: usize },
    PageChange { new: usize, old: usize },
    Timeout { last_page: usize },
    End { reason: EndReason, last_page: usize },
    Error(PaginationError),
}

/// Receiving half of a session's event channel.
#[derive(Debug)]
pub struct SessionEvents {
    receiver: mpsc::UnboundedReceiver<SessionEvent>,
}

impl SessionEvents {
    pub(crate) fn channel() -> (mpsc::UnboundedSender<SessionEvent>, Self) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (sender, Self { receiver })
    }

    /// Wait for the next event. Returns `None` once the session is gone.
    pub async fn recv(&mut self) -> Option<SessionEvent> {
        self.receiver.recv().await
    }

    pub fn try_recv(&mut self) -> Option<SessionEvent> {
        self.receiver.try_recv().ok()
    }

    /// Drain whatever is already queued.
    pub fn drain(&mut self) -> Vec<SessionEvent> {
        std::iter::from_fn(|| self.try_recv()).collect()
    }
}
