//! Contract between a pagination session and the host transport.

use async_trait::async_trait;
use tokio::sync::mpsc;
use twilight_model::channel::message::embed::Embed;

use crate::controls::ControlRow;
use crate::error::TransportError;

/// Rendered page body.
#[derive(Debug, Clone, PartialEq)]
pub enum PageContent {
    Rich(Embed),
    Plain(String),
}

impl From<Embed> for PageContent {
    fn from(embed: Embed) -> Self {
        PageContent::Rich(embed)
    }
}

impl From<String> for PageContent {
    fn from(text: String) -> Self {
        PageContent::Plain(text)
    }
}

impl From<&str> for PageContent {
    fn from(text: &str) -> Self {
        PageContent::Plain(text.to_owned())
    }
}

/// Everything the transport needs to send or edit one paginated message.
#[derive(Debug, Clone, PartialEq)]
pub struct MessagePayload {
    pub content: Option<String>,
    pub embeds: Vec<Embed>,
    pub rows: Vec<ControlRow>,
    pub ephemeral: bool,
}

/// Delivered message. Owned by exactly one session, hence not `Clone`.
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct MessageHandle {
    pub channel_id: u64,
    pub message_id: u64,
}

/// A control activation on a delivered message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlEvent {
    pub application_id: u64,
    pub interaction_id: u64,
    pub token: String,
    pub message_id: u64,
    pub actor_id: u64,
    pub control_id: String,
    /// Chosen values, for select menus.
    pub values: Vec<String>,
}

/// Stream of control events for one message. Dropping it detaches the listener.
#[derive(Debug)]
pub struct ControlSubscription {
    events: mpsc::UnboundedReceiver<ControlEvent>,
}

impl ControlSubscription {
    /// Create a subscription together with the sender the host feeds events into.
    pub fn channel() -> (mpsc::UnboundedSender<ControlEvent>, Self) {
        let (sender, events) = mpsc::unbounded_channel();
        (sender, Self { events })
    }

    pub async fn recv(&mut self) -> Option<ControlEvent> {
        self.events.recv().await
    }
}

#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, payload: &MessagePayload) -> Result<MessageHandle, TransportError>;

    async fn edit(
        &self,
        handle: &MessageHandle,
        payload: &MessagePayload,
    ) -> Result<(), TransportError>;

    async fn delete(&self, handle: &MessageHandle) -> Result<(), TransportError>;

    /// Start receiving control events for a delivered message.
    async fn subscribe(&self, handle: &MessageHandle) -> Result<ControlSubscription, TransportError>;

    async fn unsubscribe(&self, handle: &MessageHandle);

    /// Acknowledge an activation without changing the message yet.
    async fn acknowledge(&self, event: &ControlEvent) -> Result<(), TransportError>;

    /// Answer an unacknowledged activation with a message only the actor sees.
    async fn reply_ephemeral(&self, event: &ControlEvent, content: &str)
    -> Result<(), TransportError>;

    /// Ephemeral notice after the activation was already acknowledged.
    async fn follow_up_ephemeral(
        &self,
        event: &ControlEvent,
        content: &str,
    ) -> Result<(), TransportError>;
}
