//! Pagination session state machine.
//!
//! A session moves `Pending -> Active -> Ended` and never leaves `Ended`.
//! All state sits behind one async mutex that is held across render and
//! transport delivery, so page transitions are serialized per session and the
//! recorded page never diverges from the page actually shown.

use std::fmt;
use std::sync::Arc;
use std::time::SystemTime;

use serde::Serialize;
use tokio::sync::{Mutex, mpsc};
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::config::{AfterTimeout, SessionConfig};
use crate::controls::{
    ControlIds, ControlSurface, NavAction, PageView, RenderWarning, disable_all,
};
use crate::error::{PaginationError, RenderError, Result, StateError};
use crate::events::{SessionEvent, SessionEvents};
use crate::render::{PageRenderer, default_renderer, page_body};
use crate::timer::{ScopedTask, SessionTimer};
use crate::transport::{
    ControlSubscription, MessageHandle, MessagePayload, PageContent, Transport,
};
use crate::validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndReason {
    User,
    Timeout,
    Error,
}

impl fmt::Display for EndReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EndReason::User => f.write_str("user"),
            EndReason::Timeout => f.write_str("timeout"),
            EndReason::Error => f.write_str("error"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Pending,
    Active,
    Ended(EndReason),
}

impl fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionPhase::Pending => f.write_str("pending"),
            SessionPhase::Active => f.write_str("active"),
            SessionPhase::Ended(reason) => write!(f, "ended ({reason})"),
        }
    }
}

/// Point-in-time view of a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub phase: SessionPhase,
    pub current_page: usize,
    pub total_pages: usize,
    pub started_at: Option<SystemTime>,
}

impl SessionSnapshot {
    pub fn is_active(&self) -> bool {
        self.phase == SessionPhase::Active
    }
}

struct SessionState<T> {
    data: Vec<T>,
    current_page: usize,
    phase: SessionPhase,
    started_at: Option<SystemTime>,
    handle: Option<MessageHandle>,
    timer: Option<SessionTimer>,
    listener: Option<ScopedTask>,
}

impl<T> SessionState<T> {
    fn ensure_active(&self, operation: &'static str) -> Result<(), StateError> {
        if self.phase != SessionPhase::Active {
            return Err(StateError {
                operation,
                phase: self.phase,
            });
        }
        Ok(())
    }

    fn active_handle(&self, operation: &'static str) -> Result<&MessageHandle, StateError> {
        self.ensure_active(operation)?;
        self.handle.as_ref().ok_or(StateError {
            operation,
            phase: self.phase,
        })
    }
}

struct SessionInner<T> {
    state: Mutex<SessionState<T>>,
    surface: ControlSurface<T>,
    renderer: PageRenderer<T>,
    config: SessionConfig,
    ids: ControlIds,
    invoker_id: u64,
    transport: Arc<dyn Transport>,
    events: mpsc::UnboundedSender<SessionEvent>,
}

/// One paginated message, from `start` to `stop`.
///
/// Cheap to clone; clones share the same session.
pub struct PaginationSession<T> {
    inner: Arc<SessionInner<T>>,
}

impl<T> Clone for PaginationSession<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

/// Collects everything a session needs before it is validated and built.
pub struct SessionBuilder<T> {
    data: Vec<T>,
    invoker_id: u64,
    surface: ControlSurface<T>,
    config: SessionConfig,
    renderer: Option<PageRenderer<T>>,
}

impl<T> SessionBuilder<T>
where
    T: Serialize + Send + Sync + 'static,
{
    pub fn surface(mut self, surface: ControlSurface<T>) -> Self {
        self.surface = surface;
        self
    }

    pub fn config(mut self, config: SessionConfig) -> Self {
        self.config = config;
        self
    }

    pub fn renderer<F>(mut self, render: F) -> Self
    where
        F: Fn(&T, usize, &[T]) -> PageContent + Send + Sync + 'static,
    {
        self.renderer = Some(Arc::new(render));
        self
    }

    /// Validate the inputs and create a pending session plus its event stream.
    pub fn build(
        self,
        transport: Arc<dyn Transport>,
    ) -> Result<(PaginationSession<T>, SessionEvents)> {
        validate::non_empty_data(self.data.len())?;
        self.config.validate()?;
        self.surface.validate()?;

        let prefix = self
            .config
            .custom_id
            .clone()
            .unwrap_or_else(|| format!("pg-{}", Uuid::new_v4().simple()));
        let current_page = self.config.start_page.min(self.data.len() - 1);
        let (events, receiver) = SessionEvents::channel();

        let inner = SessionInner {
            state: Mutex::new(SessionState {
                data: self.data,
                current_page,
                phase: SessionPhase::Pending,
                started_at: None,
                handle: None,
                timer: None,
                listener: None,
            }),
            surface: self.surface,
            renderer: self.renderer.unwrap_or_else(default_renderer),
            config: self.config,
            ids: ControlIds::new(prefix),
            invoker_id: self.invoker_id,
            transport,
            events,
        };

        let session = PaginationSession {
            inner: Arc::new(inner),
        };
        Ok((session, receiver))
    }
}

impl<T> PaginationSession<T>
where
    T: Serialize + Send + Sync + 'static,
{
    pub fn builder(data: Vec<T>, invoker_id: u64) -> SessionBuilder<T> {
        SessionBuilder {
            data,
            invoker_id,
            surface: ControlSurface::default(),
            config: SessionConfig::default(),
            renderer: None,
        }
    }

    /// Control id prefix shared by every control of this session.
    pub fn id(&self) -> &str {
        self.inner.ids.prefix()
    }

    pub fn control_ids(&self) -> &ControlIds {
        &self.inner.ids
    }

    pub fn invoker_id(&self) -> u64 {
        self.inner.invoker_id
    }

    pub fn config(&self) -> &SessionConfig {
        &self.inner.config
    }

    pub(crate) fn surface(&self) -> &ControlSurface<T> {
        &self.inner.surface
    }

    pub(crate) fn transport(&self) -> &dyn Transport {
        self.inner.transport.as_ref()
    }

    pub async fn state(&self) -> SessionSnapshot {
        let state = self.inner.state.lock().await;
        SessionSnapshot {
            phase: state.phase,
            current_page: state.current_page,
            total_pages: state.data.len(),
            started_at: state.started_at,
        }
    }

    pub async fn accessible_page_count(&self) -> usize {
        let total = self.inner.state.lock().await.data.len();
        self.inner.surface.accessible_page_count(total)
    }

    pub async fn are_all_pages_accessible(&self) -> bool {
        let total = self.inner.state.lock().await.data.len();
        self.inner.surface.accessible_page_count(total) == total
    }

    pub(crate) async fn owns_message(&self, message_id: u64) -> bool {
        let state = self.inner.state.lock().await;
        state
            .handle
            .as_ref()
            .is_some_and(|handle| handle.message_id == message_id)
    }

    /// Render the first page, deliver it, attach the listener and arm the timer.
    pub async fn start(&self) -> Result<()> {
        let mut state = self.inner.state.lock().await;
        if state.phase != SessionPhase::Pending {
            return Err(StateError {
                operation: "start",
                phase: state.phase,
            }
            .into());
        }

        let (payload, warnings) = match self.build_payload(&state, false) {
            Ok(rendered) => rendered,
            Err(err) => return Err(self.fail_start(&mut state, err)),
        };
        for warning in &warnings {
            warn!(session = self.id(), %warning, "pagination render warning");
        }

        let transport = self.transport();
        let handle = match transport.send(&payload).await {
            Ok(handle) => handle,
            Err(source) => return Err(self.fail_start(&mut state, source.into())),
        };

        let subscription = match transport.subscribe(&handle).await {
            Ok(subscription) => subscription,
            Err(source) => {
                if let Err(cleanup) = transport.delete(&handle).await {
                    error!(
                        ?cleanup,
                        session = self.id(),
                        "failed to remove message after subscription failure"
                    );
                }
                return Err(self.fail_start(&mut state, source.into()));
            }
        };

        info!(
            session = self.id(),
            channel_id = handle.channel_id,
            message_id = handle.message_id,
            page = state.current_page,
            total_pages = state.data.len(),
            "pagination session started"
        );

        state.handle = Some(handle);
        state.phase = SessionPhase::Active;
        state.started_at = Some(SystemTime::now());
        state.listener = Some(self.spawn_listener(subscription));

        let timeout = self.inner.config.timeout;
        if !timeout.is_zero() {
            let session = self.clone();
            state.timer = Some(SessionTimer::arm(timeout, move || async move {
                session.stop(EndReason::Timeout).await;
            }));
        }

        self.emit(SessionEvent::Start {
            page: state.current_page,
        });
        Ok(())
    }

    pub async fn go_to_page(&self, page: usize) -> Result<()> {
        self.navigate(NavAction::GoTo(page)).await
    }

    pub async fn next(&self) -> Result<()> {
        self.navigate(NavAction::Next).await
    }

    pub async fn previous(&self) -> Result<()> {
        self.navigate(NavAction::Previous).await
    }

    pub async fn first(&self) -> Result<()> {
        self.navigate(NavAction::First).await
    }

    pub async fn last(&self) -> Result<()> {
        self.navigate(NavAction::Last).await
    }

    /// Apply a navigation action. Edge moves at the edge are silent no-ops.
    pub(crate) async fn navigate(&self, action: NavAction) -> Result<()> {
        let mut state = self.inner.state.lock().await;
        state.ensure_active("navigate")?;

        let current = state.current_page;
        let last = state.data.len() - 1;
        let target = match action {
            NavAction::First => 0,
            NavAction::Previous => current.saturating_sub(1),
            NavAction::Next => (current + 1).min(last),
            NavAction::Last => last,
            NavAction::GoTo(page) => {
                validate::page_index(page, state.data.len())?;
                page
            }
            NavAction::Inert => return Ok(()),
        };

        if target == current {
            return Ok(());
        }

        state.current_page = target;
        if let Err(err) = self.redeliver(&state).await {
            state.current_page = current;
            warn!(session = self.id(), %err, page = target, "page transition rolled back");
            self.emit(SessionEvent::Error(err.clone()));
            return Err(err);
        }

        debug!(session = self.id(), from = current, to = target, "page changed");
        self.emit(SessionEvent::PageChange {
            new: target,
            old: current,
        });
        Ok(())
    }

    /// Replace the backing data, clamping the page into the new range.
    pub async fn update_data(&self, data: Vec<T>) -> Result<()> {
        validate::non_empty_data(data.len())?;

        let mut state = self.inner.state.lock().await;
        if let SessionPhase::Ended(_) = state.phase {
            return Err(StateError {
                operation: "update data",
                phase: state.phase,
            }
            .into());
        }

        let old_page = state.current_page;
        let old_data = std::mem::replace(&mut state.data, data);
        state.current_page = old_page.min(state.data.len() - 1);

        if state.phase != SessionPhase::Active {
            return Ok(());
        }

        if let Err(err) = self.redeliver(&state).await {
            state.data = old_data;
            state.current_page = old_page;
            warn!(session = self.id(), %err, "data update rolled back");
            self.emit(SessionEvent::Error(err.clone()));
            return Err(err);
        }

        debug!(
            session = self.id(),
            total_pages = state.data.len(),
            "pagination data replaced"
        );
        if state.current_page != old_page {
            self.emit(SessionEvent::PageChange {
                new: state.current_page,
                old: old_page,
            });
        }
        Ok(())
    }

    /// End the session. Safe to call any number of times from any path.
    pub async fn stop(&self, reason: EndReason) {
        let mut state = self.inner.state.lock().await;
        match state.phase {
            SessionPhase::Ended(_) => return,
            SessionPhase::Pending => {
                state.phase = SessionPhase::Ended(reason);
                debug!(session = self.id(), %reason, "pending pagination session discarded");
                return;
            }
            SessionPhase::Active => {}
        }

        state.phase = SessionPhase::Ended(reason);
        if let Some(timer) = state.timer.take() {
            timer.cancel();
        }
        if let Some(listener) = state.listener.take() {
            listener.cancel();
        }

        let last_page = state.current_page;
        if let Some(handle) = state.handle.as_ref() {
            self.transport().unsubscribe(handle).await;

            if reason == EndReason::Timeout {
                self.emit(SessionEvent::Timeout { last_page });
                if let Err(err) = self.apply_timeout_policy(&state, handle).await {
                    error!(
                        session = self.id(),
                        %err,
                        policy = %self.inner.config.after_timeout,
                        "failed to finalize expired pagination message"
                    );
                    self.emit(SessionEvent::Error(err));
                }
            }
        }

        info!(session = self.id(), %reason, last_page, "pagination session ended");
        self.emit(SessionEvent::End { reason, last_page });
    }

    async fn apply_timeout_policy(
        &self,
        state: &SessionState<T>,
        handle: &MessageHandle,
    ) -> Result<()> {
        match self.inner.config.after_timeout {
            AfterTimeout::Delete => self.transport().delete(handle).await?,
            AfterTimeout::Disable => {
                let (payload, _) = self.build_payload(state, true)?;
                self.transport().edit(handle, &payload).await?;
            }
        }
        Ok(())
    }

    fn fail_start(&self, state: &mut SessionState<T>, err: PaginationError) -> PaginationError {
        state.phase = SessionPhase::Ended(EndReason::Error);
        error!(session = self.id(), %err, "pagination session failed to start");
        self.emit(SessionEvent::Error(err.clone()));
        err
    }

    async fn redeliver(&self, state: &SessionState<T>) -> Result<()> {
        let handle = state.active_handle("edit the message")?;
        let (payload, warnings) = self.build_payload(state, false)?;
        for warning in &warnings {
            debug!(session = self.id(), %warning, "pagination render warning");
        }
        self.transport().edit(handle, &payload).await?;
        Ok(())
    }

    /// Render the current page and its controls from one consistent view.
    fn build_payload(
        &self,
        state: &SessionState<T>,
        expired: bool,
    ) -> Result<(MessagePayload, Vec<RenderWarning>)> {
        let view = PageView::new(&state.data, state.current_page);
        let item = view.item().ok_or_else(|| RenderError::Page {
            page: view.current_page,
            reason: "no item at this index".to_owned(),
        })?;

        let rendered = (self.inner.renderer)(item, view.current_page, view.data);
        let notice = expired.then_some(self.inner.config.timeout_notice.as_str());
        let (content, embeds) = page_body(rendered, view.current_page, notice)?;

        let mut controls = self.inner.surface.render(view, &self.inner.ids)?;
        if expired {
            disable_all(&mut controls.rows);
        }

        let payload = MessagePayload {
            content,
            embeds,
            rows: controls.rows,
            ephemeral: self.inner.config.ephemeral,
        };
        Ok((payload, controls.warnings))
    }

    fn spawn_listener(&self, mut subscription: ControlSubscription) -> ScopedTask {
        let session = self.clone();
        ScopedTask::spawn(move |token| async move {
            loop {
                tokio::select! {
                    _ = token.cancelled() => break,
                    event = subscription.recv() => match event {
                        Some(event) => {
                            session.handle_event(event).await;
                        }
                        None => break,
                    },
                }
            }
        })
    }

    pub(crate) fn emit(&self, event: SessionEvent) {
        // The caller may have dropped its receiver; the session keeps going regardless.
        let _ = self.inner.events.send(event);
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::controls::{ButtonKind, Control, HybridConfig, SelectConfig};
    use crate::error::{TransportError, TransportOp};
    use crate::testing::RecordingTransport;

    fn five_strings() -> Vec<String> {
        ["one", "two", "three", "four", "five"]
            .into_iter()
            .map(ToOwned::to_owned)
            .collect()
    }

    async fn started(
        data: Vec<String>,
        config: SessionConfig,
    ) -> (PaginationSession<String>, SessionEvents, Arc<RecordingTransport>) {
        let transport = Arc::new(RecordingTransport::default());
        let (session, events) = PaginationSession::builder(data, 7)
            .config(config)
            .build(transport.clone())
            .expect("valid session");
        session.start().await.expect("session starts");
        (session, events, transport)
    }

    fn button(payload: &MessagePayload, kind: ButtonKind) -> Option<bool> {
        payload
            .rows
            .iter()
            .flat_map(|row| row.buttons())
            .find(|button| button.kind == kind)
            .map(|button| button.disabled)
    }

    #[tokio::test]
    async fn start_renders_first_page_with_edge_controls() {
        let (session, mut events, transport) =
            started(five_strings(), SessionConfig::default()).await;

        let state = session.state().await;
        assert!(state.is_active());
        assert_eq!(state.current_page, 0);
        assert!(state.started_at.is_some());

        let sent = transport.last_sent().expect("message sent");
        assert_eq!(sent.content.as_deref(), Some("one"));
        assert_eq!(button(&sent, ButtonKind::First), Some(true));
        assert_eq!(button(&sent, ButtonKind::Previous), Some(true));
        assert_eq!(button(&sent, ButtonKind::Next), Some(false));
        assert_eq!(button(&sent, ButtonKind::Last), Some(false));

        assert_eq!(events.drain(), vec![SessionEvent::Start { page: 0 }]);
    }

    #[tokio::test]
    async fn go_to_page_lands_on_every_valid_page() {
        let (session, _events, transport) = started(five_strings(), SessionConfig::default()).await;

        for page in [3, 0, 4, 1, 2] {
            session.go_to_page(page).await.unwrap();
            assert_eq!(session.state().await.current_page, page);
        }
        assert_eq!(transport.edits().len(), 5);
    }

    #[tokio::test]
    async fn out_of_range_page_is_rejected_without_edit() {
        let (session, _events, transport) = started(five_strings(), SessionConfig::default()).await;

        let err = session.go_to_page(5).await.unwrap_err();
        assert!(matches!(err, PaginationError::Validation(ref v) if v.field == "page"));
        assert!(transport.edits().is_empty());
    }

    #[tokio::test]
    async fn edge_moves_are_silent_no_ops() {
        let (session, mut events, transport) =
            started(five_strings(), SessionConfig::default()).await;
        events.drain();

        session.previous().await.unwrap();
        session.first().await.unwrap();
        assert_eq!(session.state().await.current_page, 0);

        session.last().await.unwrap();
        session.next().await.unwrap();
        assert_eq!(session.state().await.current_page, 4);

        assert_eq!(transport.edits().len(), 1);
        assert_eq!(
            events.drain(),
            vec![SessionEvent::PageChange { new: 4, old: 0 }]
        );
    }

    #[tokio::test]
    async fn failed_edit_rolls_back_the_page() {
        let (session, mut events, transport) =
            started(five_strings(), SessionConfig::default()).await;
        events.drain();
        transport.fail_edits(true);

        let err = session.next().await.unwrap_err();
        assert!(matches!(err, PaginationError::Transport(_)));
        let state = session.state().await;
        assert_eq!(state.current_page, 0);
        assert!(state.is_active());
        assert!(matches!(events.drain().as_slice(), [SessionEvent::Error(_)]));
    }

    #[tokio::test]
    async fn navigation_requires_an_active_session() {
        let transport = Arc::new(RecordingTransport::default());
        let (session, _events) = PaginationSession::builder(five_strings(), 7)
            .build(transport.clone())
            .unwrap();

        let err = session.next().await.unwrap_err();
        assert!(matches!(
            err,
            PaginationError::State(StateError {
                phase: SessionPhase::Pending,
                ..
            })
        ));

        session.start().await.unwrap();
        session.stop(EndReason::User).await;
        assert!(matches!(
            session.go_to_page(1).await,
            Err(PaginationError::State(_))
        ));
    }

    #[tokio::test]
    async fn double_start_is_a_state_error() {
        let (session, _events, transport) = started(five_strings(), SessionConfig::default()).await;

        let err = session.start().await.unwrap_err();
        assert!(matches!(
            err,
            PaginationError::State(StateError {
                operation: "start",
                phase: SessionPhase::Active,
            })
        ));
        assert_eq!(transport.sent().len(), 1);
    }

    #[tokio::test]
    async fn stop_twice_emits_one_end() {
        let (session, mut events, transport) =
            started(five_strings(), SessionConfig::default()).await;

        session.stop(EndReason::User).await;
        session.stop(EndReason::User).await;

        let ends = events
            .drain()
            .into_iter()
            .filter(|event| matches!(event, SessionEvent::End { .. }))
            .count();
        assert_eq!(ends, 1);
        assert_eq!(
            session.state().await.phase,
            SessionPhase::Ended(EndReason::User)
        );
        assert_eq!(transport.unsubscribed(), 1);
        assert!(transport.deleted().is_empty());
    }

    #[tokio::test]
    async fn empty_data_is_rejected_at_construction() {
        let transport = Arc::new(RecordingTransport::default());
        let err = PaginationSession::<String>::builder(Vec::new(), 7)
            .build(transport)
            .err()
            .expect("empty data rejected");
        assert!(matches!(err, PaginationError::Validation(ref v) if v.field == "data"));
    }

    #[tokio::test]
    async fn start_page_is_clamped() {
        let (session, _events, transport) =
            started(five_strings(), SessionConfig::default().with_start_page(40)).await;
        assert_eq!(session.state().await.current_page, 4);
        assert_eq!(transport.last_sent().unwrap().content.as_deref(), Some("five"));
    }

    #[tokio::test]
    async fn update_data_clamps_to_the_new_last_page() {
        let (session, mut events, transport) =
            started(five_strings(), SessionConfig::default().with_start_page(4)).await;
        events.drain();

        session
            .update_data(vec!["a".to_owned(), "b".to_owned()])
            .await
            .unwrap();

        let state = session.state().await;
        assert_eq!(state.total_pages, 2);
        assert_eq!(state.current_page, 1);
        assert_eq!(transport.last_edit().unwrap().content.as_deref(), Some("b"));
        assert_eq!(
            events.drain(),
            vec![SessionEvent::PageChange { new: 1, old: 4 }]
        );
    }

    #[tokio::test]
    async fn update_data_rolls_back_on_failed_edit() {
        let (session, _events, transport) =
            started(five_strings(), SessionConfig::default().with_start_page(3)).await;
        transport.fail_edits(true);

        assert!(session.update_data(vec!["only".to_owned()]).await.is_err());
        let state = session.state().await;
        assert_eq!(state.total_pages, 5);
        assert_eq!(state.current_page, 3);
    }

    #[tokio::test]
    async fn failed_send_ends_the_session() {
        let transport = Arc::new(RecordingTransport::default());
        transport.fail_sends(true);
        let (session, mut events) = PaginationSession::builder(five_strings(), 7)
            .build(transport.clone())
            .unwrap();

        let err = session.start().await.unwrap_err();
        assert_eq!(
            err,
            PaginationError::Transport(TransportError::new(TransportOp::Send, "send refused"))
        );
        assert_eq!(
            session.state().await.phase,
            SessionPhase::Ended(EndReason::Error)
        );
        assert!(matches!(events.drain().as_slice(), [SessionEvent::Error(_)]));
    }

    #[tokio::test]
    async fn render_failure_ends_the_session_before_sending() {
        let transport = Arc::new(RecordingTransport::default());
        let (session, mut events) = PaginationSession::builder(five_strings(), 7)
            .renderer(|_: &String, _, _| PageContent::Plain(String::new()))
            .build(transport.clone())
            .unwrap();

        let err = session.start().await.unwrap_err();
        assert!(matches!(err, PaginationError::Render(RenderError::Page { page: 0, .. })));
        assert_eq!(
            session.state().await.phase,
            SessionPhase::Ended(EndReason::Error)
        );
        assert!(transport.sent().is_empty());
        assert!(matches!(
            events.drain().as_slice(),
            [SessionEvent::Error(PaginationError::Render(_))]
        ));
        assert!(session.start().await.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn concurrent_navigation_is_serialized() {
        let (session, mut events, transport) =
            started(five_strings(), SessionConfig::default()).await;
        events.drain();
        transport.delay_edits(Duration::from_millis(50));

        let (a, b, c) = (session.clone(), session.clone(), session.clone());
        let (ra, rb, rc) = tokio::join!(a.next(), b.next(), c.next());
        assert!(ra.is_ok() && rb.is_ok() && rc.is_ok());

        assert_eq!(session.state().await.current_page, 3);
        assert_eq!(transport.max_edits_in_flight(), 1);
        assert_eq!(
            events.drain(),
            vec![
                SessionEvent::PageChange { new: 1, old: 0 },
                SessionEvent::PageChange { new: 2, old: 1 },
                SessionEvent::PageChange { new: 3, old: 2 },
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn timeout_waits_for_an_edit_in_flight() {
        let config = SessionConfig::default()
            .with_timeout(Duration::from_secs(10))
            .with_after_timeout(AfterTimeout::Disable);
        let (session, mut events, transport) = started(five_strings(), config).await;
        events.drain();
        transport.delay_edits(Duration::from_secs(5));

        tokio::time::sleep(Duration::from_secs(8)).await;
        let navigating = session.clone();
        let navigation = tokio::spawn(async move { navigating.next().await });

        tokio::time::sleep(Duration::from_secs(20)).await;
        assert!(navigation.await.unwrap().is_ok());

        assert_eq!(transport.max_edits_in_flight(), 1);
        assert_eq!(
            session.state().await.phase,
            SessionPhase::Ended(EndReason::Timeout)
        );
        let expired = transport.last_edit().expect("expiry edit");
        assert!(expired.content.unwrap().starts_with("two"));
        assert_eq!(
            events.drain(),
            vec![
                SessionEvent::PageChange { new: 1, old: 0 },
                SessionEvent::Timeout { last_page: 1 },
                SessionEvent::End {
                    reason: EndReason::Timeout,
                    last_page: 1,
                },
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn hybrid_timeout_disables_the_menu_too() {
        let transport = Arc::new(RecordingTransport::default());
        let config = SessionConfig::default()
            .with_timeout(Duration::from_secs(10))
            .with_after_timeout(AfterTimeout::Disable);
        let (session, _events) = PaginationSession::builder(five_strings(), 7)
            .surface(ControlSurface::Hybrid(HybridConfig::default()))
            .config(config)
            .build(transport.clone())
            .unwrap();
        session.start().await.unwrap();

        let sent = transport.last_sent().unwrap();
        assert!(sent.rows.iter().any(|row| row.select().is_some_and(|menu| !menu.disabled)));

        tokio::time::sleep(Duration::from_secs(11)).await;

        let expired = transport.last_edit().expect("expiry edit");
        let menu = expired.rows.iter().find_map(|row| row.select()).expect("menu row");
        assert!(menu.disabled);
        assert!(
            expired
                .rows
                .iter()
                .flat_map(|row| row.buttons())
                .all(|button| button.disabled)
        );
        assert_eq!(transport.unsubscribed(), 1);
    }

    #[tokio::test]
    async fn failed_subscription_removes_the_sent_message() {
        let transport = Arc::new(RecordingTransport::default());
        transport.fail_subscriptions(true);
        let (session, _events) = PaginationSession::builder(five_strings(), 7)
            .build(transport.clone())
            .unwrap();

        assert!(session.start().await.is_err());
        assert_eq!(transport.deleted().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn timeout_disables_controls_and_appends_notice() {
        let config = SessionConfig::default()
            .with_timeout(Duration::from_secs(30))
            .with_after_timeout(AfterTimeout::Disable);
        let (session, mut events, transport) = started(five_strings(), config).await;
        session.next().await.unwrap();
        events.drain();

        tokio::time::sleep(Duration::from_secs(31)).await;

        let state = session.state().await;
        assert_eq!(state.phase, SessionPhase::Ended(EndReason::Timeout));

        let edited = transport.last_edit().expect("expiry edit");
        assert!(
            edited
                .rows
                .iter()
                .flat_map(|row| row.controls.iter())
                .all(Control::is_disabled)
        );
        let content = edited.content.unwrap();
        assert!(content.starts_with("two"));
        assert!(content.ends_with(crate::config::DEFAULT_TIMEOUT_NOTICE));
        assert!(transport.deleted().is_empty());

        assert_eq!(
            events.drain(),
            vec![
                SessionEvent::Timeout { last_page: 1 },
                SessionEvent::End {
                    reason: EndReason::Timeout,
                    last_page: 1,
                },
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn timeout_can_delete_the_message() {
        let config = SessionConfig::default()
            .with_timeout(Duration::from_secs(10))
            .with_after_timeout(AfterTimeout::Delete);
        let (_session, _events, transport) = started(five_strings(), config).await;

        tokio::time::sleep(Duration::from_secs(11)).await;
        assert_eq!(transport.deleted().len(), 1);
        assert!(transport.edits().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn explicit_stop_cancels_the_timer() {
        let config = SessionConfig::default().with_timeout(Duration::from_secs(10));
        let (session, mut events, transport) = started(five_strings(), config).await;

        session.stop(EndReason::User).await;
        tokio::time::sleep(Duration::from_secs(20)).await;

        assert!(transport.edits().is_empty());
        assert!(
            !events
                .drain()
                .iter()
                .any(|event| matches!(event, SessionEvent::Timeout { .. }))
        );
    }

    #[tokio::test(start_paused = true)]
    async fn zero_timeout_never_expires() {
        let config = SessionConfig::default().with_timeout(Duration::ZERO);
        let (session, _events, _transport) = started(five_strings(), config).await;

        tokio::time::sleep(Duration::from_secs(3600)).await;
        assert!(session.state().await.is_active());
    }

    #[tokio::test]
    async fn selector_cap_limits_accessible_pages() {
        let transport = Arc::new(RecordingTransport::default());
        let data: Vec<String> = (1..=6).map(|n| format!("page {n}")).collect();
        let selector = SelectConfig {
            max_options: 3,
            ..SelectConfig::default()
        };
        let (session, _events) = PaginationSession::builder(data, 7)
            .surface(ControlSurface::Selector(selector))
            .build(transport.clone())
            .unwrap();
        session.start().await.unwrap();

        let sent = transport.last_sent().unwrap();
        let menu = sent.rows[0].select().expect("select menu");
        assert_eq!(menu.options.len(), 3);
        assert!(!session.are_all_pages_accessible().await);
        assert_eq!(session.accessible_page_count().await, 3);
    }

    #[tokio::test]
    async fn custom_renderer_produces_rich_pages() {
        use twilight_util::builder::embed::EmbedBuilder;

        let transport = Arc::new(RecordingTransport::default());
        let (session, _events) = PaginationSession::builder(five_strings(), 7)
            .renderer(|item: &String, index, all| {
                EmbedBuilder::new()
                    .title(format!("{} of {}", index + 1, all.len()))
                    .description(item.as_str())
                    .build()
                    .into()
            })
            .build(transport.clone())
            .unwrap();
        session.start().await.unwrap();

        let sent = transport.last_sent().unwrap();
        assert_eq!(sent.content, None);
        assert_eq!(sent.embeds[0].title.as_deref(), Some("1 of 5"));
    }
}
