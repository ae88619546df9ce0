//! Launching pagination sessions from command handlers.

use serde::Serialize;
use tracing::{debug, info, warn};
use twilight_model::id::{
    Id,
    marker::{ChannelMarker, UserMarker},
};

use rusty_core::Context;
use rusty_pagination::{
    ControlSurface, PageContent, PaginationSession, SessionEvent, SessionEvents,
};

/// Post a paginated message in `channel_id` that only `invoker` can drive.
pub async fn launch<T, F>(
    ctx: &Context,
    channel_id: Id<ChannelMarker>,
    invoker: Id<UserMarker>,
    data: Vec<T>,
    surface: ControlSurface<T>,
    start_page: usize,
    render: F,
) -> anyhow::Result<PaginationSession<T>>
where
    T: Serialize + Send + Sync + 'static,
    F: Fn(&T, usize, &[T]) -> PageContent + Send + Sync + 'static,
{
    let config = ctx.config.session_config().with_start_page(start_page);
    let (session, events) = PaginationSession::builder(data, invoker.get())
        .surface(surface)
        .config(config)
        .renderer(render)
        .build(ctx.transport(channel_id))?;

    tokio::spawn(log_events(session.id().to_owned(), events));
    session.start().await?;

    Ok(session)
}

async fn log_events(session: String, mut events: SessionEvents) {
    while let Some(event) = events.recv().await {
        match event {
            SessionEvent::Start { page } => debug!(%session, page, "pagination started"),
            SessionEvent::PageChange { new, old } => {
                debug!(%session, from = old, to = new, "pagination page changed");
            }
            SessionEvent::Timeout { last_page } => {
                debug!(%session, last_page, "pagination timed out");
            }
            SessionEvent::End { reason, last_page } => {
                info!(%session, %reason, last_page, "pagination finished");
                break;
            }
            SessionEvent::Error(err) => warn!(%session, %err, "pagination error"),
        }
    }
}
