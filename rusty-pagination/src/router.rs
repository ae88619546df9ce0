//! Routes control activations to the session that owns the message.

use serde::Serialize;
use tracing::{debug, error, warn};

use crate::controls::NavAction;
use crate::error::PaginationError;
use crate::events::SessionEvent;
use crate::session::PaginationSession;
use crate::transport::ControlEvent;

pub const WRONG_USER_MESSAGE: &str = "Only the person who ran this command can use these controls.";
pub const NAVIGATION_FAILED_MESSAGE: &str = "Could not switch pages. Please try again.";
pub const SESSION_ENDED_MESSAGE: &str = "This pagination session is no longer active.";

/// What happened to one routed activation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteOutcome {
    /// Activation belongs to another message.
    Ignored,
    /// Someone other than the invoker pressed a control.
    Rejected,
    /// Known control without an action, e.g. the page counter.
    Inert,
    Navigated,
    /// Control id or selection not understood; the session keeps running.
    Unrecognized,
    Failed,
}

impl<T> PaginationSession<T>
where
    T: Serialize + Send + Sync + 'static,
{
    /// Handle one control activation end to end.
    ///
    /// Foreign activations are rejected before anything is acknowledged;
    /// everything else is acknowledged first and then dispatched.
    pub async fn handle_event(&self, event: ControlEvent) -> RouteOutcome {
        if !self.owns_message(event.message_id).await {
            return RouteOutcome::Ignored;
        }

        let transport = self.transport();
        if event.actor_id != self.invoker_id() {
            debug!(
                session = self.id(),
                actor_id = event.actor_id,
                "rejected control activation from another user"
            );
            if let Err(source) = transport.reply_ephemeral(&event, WRONG_USER_MESSAGE).await {
                warn!(?source, session = self.id(), "failed to answer foreign activation");
            }
            return RouteOutcome::Rejected;
        }

        if let Err(source) = transport.acknowledge(&event).await {
            error!(?source, session = self.id(), "failed to acknowledge control activation");
            self.emit(SessionEvent::Error(source.into()));
            return RouteOutcome::Failed;
        }

        let total_pages = self.state().await.total_pages;
        let action = match self.surface().route(
            self.control_ids(),
            &event.control_id,
            &event.values,
            total_pages,
        ) {
            Ok(action) => action,
            Err(err) => {
                warn!(%err, session = self.id(), "ignoring control activation");
                self.emit(SessionEvent::Error(err.into()));
                return RouteOutcome::Unrecognized;
            }
        };

        if action == NavAction::Inert {
            return RouteOutcome::Inert;
        }

        match self.navigate(action).await {
            Ok(()) => RouteOutcome::Navigated,
            Err(err) => {
                let notice = match err {
                    PaginationError::State(_) => SESSION_ENDED_MESSAGE,
                    _ => NAVIGATION_FAILED_MESSAGE,
                };
                if let Err(source) = transport.follow_up_ephemeral(&event, notice).await {
                    warn!(?source, session = self.id(), "failed to send navigation failure notice");
                }
                RouteOutcome::Failed
            }
        }
    }
}
