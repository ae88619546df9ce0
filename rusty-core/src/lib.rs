use std::sync::Arc;

use rusty_pagination::discord::{ChannelTransport, InteractionHub};
use rusty_pagination::transport::Transport;
use twilight_http::Client;
use twilight_model::id::{Id, marker::ChannelMarker};

pub mod config;

pub use config::BotConfig;

/// Shared application context passed into command handlers.
///
/// Cheap to clone because it only stores reference-counted shared state.
#[derive(Clone)]
pub struct Context {
    pub http: Arc<Client>,
    pub hub: InteractionHub,
    pub config: Arc<BotConfig>,
}

impl Context {
    /// Create a new application context.
    pub fn new(http: Arc<Client>, config: BotConfig) -> Self {
        Self {
            http,
            hub: InteractionHub::new(),
            config: Arc::new(config),
        }
    }

    /// Transport that posts paginated messages into `channel_id`.
    pub fn transport(&self, channel_id: Id<ChannelMarker>) -> Arc<dyn Transport> {
        Arc::new(ChannelTransport::new(
            Arc::clone(&self.http),
            channel_id,
            self.hub.clone(),
        ))
    }
}
