//! Channel-message transport backed by the Discord HTTP API.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::warn;
use twilight_http::Client;
use twilight_model::id::{
    Id,
    marker::{ChannelMarker, MessageMarker},
};

use super::components::to_components;
use super::hub::InteractionHub;
use super::respond::{defer_update, follow_up_ephemeral, respond_ephemeral};
use crate::error::{TransportError, TransportOp};
use crate::transport::{ControlEvent, ControlSubscription, MessageHandle, MessagePayload, Transport};

/// Sends paginated messages into one channel and listens through the hub.
#[derive(Clone)]
pub struct ChannelTransport {
    http: Arc<Client>,
    channel_id: Id<ChannelMarker>,
    hub: InteractionHub,
}

impl ChannelTransport {
    pub fn new(http: Arc<Client>, channel_id: Id<ChannelMarker>, hub: InteractionHub) -> Self {
        Self {
            http,
            channel_id,
            hub,
        }
    }
}

fn message_ids(
    handle: &MessageHandle,
    operation: TransportOp,
) -> Result<(Id<ChannelMarker>, Id<MessageMarker>), TransportError> {
    let channel_id = Id::new_checked(handle.channel_id)
        .ok_or_else(|| TransportError::new(operation, "channel id is zero"))?;
    let message_id = Id::new_checked(handle.message_id)
        .ok_or_else(|| TransportError::new(operation, "message id is zero"))?;
    Ok((channel_id, message_id))
}

#[async_trait]
impl Transport for ChannelTransport {
    async fn send(&self, payload: &MessagePayload) -> Result<MessageHandle, TransportError> {
        if payload.ephemeral {
            warn!(
                channel_id = self.channel_id.get(),
                "ephemeral pagination requested for a channel message; sending publicly"
            );
        }

        let components = to_components(&payload.rows);
        let mut request = self
            .http
            .create_message(self.channel_id)
            .embeds(&payload.embeds)
            .components(&components);
        if let Some(content) = payload.content.as_deref() {
            request = request.content(content);
        }

        let message = request
            .await
            .map_err(|source| TransportError::new(TransportOp::Send, source))?
            .model()
            .await
            .map_err(|source| TransportError::new(TransportOp::Send, source))?;

        Ok(MessageHandle {
            channel_id: message.channel_id.get(),
            message_id: message.id.get(),
        })
    }

    async fn edit(
        &self,
        handle: &MessageHandle,
        payload: &MessagePayload,
    ) -> Result<(), TransportError> {
        let (channel_id, message_id) = message_ids(handle, TransportOp::Edit)?;
        let components = to_components(&payload.rows);

        self.http
            .update_message(channel_id, message_id)
            .content(payload.content.as_deref())
            .embeds(Some(payload.embeds.as_slice()))
            .components(Some(components.as_slice()))
            .await
            .map_err(|source| TransportError::new(TransportOp::Edit, source))?;
        Ok(())
    }

    async fn delete(&self, handle: &MessageHandle) -> Result<(), TransportError> {
        let (channel_id, message_id) = message_ids(handle, TransportOp::Delete)?;
        self.http
            .delete_message(channel_id, message_id)
            .await
            .map_err(|source| TransportError::new(TransportOp::Delete, source))?;
        Ok(())
    }

    async fn subscribe(&self, handle: &MessageHandle) -> Result<ControlSubscription, TransportError> {
        self.hub.register(handle.message_id).await
    }

    async fn unsubscribe(&self, handle: &MessageHandle) {
        self.hub.unregister(handle.message_id).await;
    }

    async fn acknowledge(&self, event: &ControlEvent) -> Result<(), TransportError> {
        defer_update(&self.http, event).await
    }

    async fn reply_ephemeral(&self, event: &ControlEvent, content: &str) -> Result<(), TransportError> {
        respond_ephemeral(&self.http, event, content).await
    }

    async fn follow_up_ephemeral(
        &self,
        event: &ControlEvent,
        content: &str,
    ) -> Result<(), TransportError> {
        follow_up_ephemeral(&self.http, event, content).await
    }
}
