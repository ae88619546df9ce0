//! Fan-out of gateway component interactions to live pagination sessions.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, mpsc};
use tracing::debug;
use twilight_http::Client;
use twilight_model::{
    application::interaction::InteractionData, gateway::payload::incoming::InteractionCreate,
};

use super::respond::respond_expired;
use crate::error::{TransportError, TransportOp};
use crate::transport::{ControlEvent, ControlSubscription};

type RouteMap = HashMap<u64, mpsc::UnboundedSender<ControlEvent>>;

/// Message id to subscription table shared by the gateway loop and transports.
#[derive(Clone, Default)]
pub struct InteractionHub {
    routes: Arc<Mutex<RouteMap>>,
}

impl InteractionHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start collecting control events for `message_id`.
    ///
    /// A message serves at most one live session; a closed leftover
    /// subscription is replaced.
    pub async fn register(&self, message_id: u64) -> Result<ControlSubscription, TransportError> {
        let mut routes = self.routes.lock().await;
        if routes.get(&message_id).is_some_and(|sender| !sender.is_closed()) {
            return Err(TransportError::new(
                TransportOp::Subscribe,
                format!("message {message_id} already has a live pagination session"),
            ));
        }

        let (sender, subscription) = ControlSubscription::channel();
        routes.insert(message_id, sender);
        Ok(subscription)
    }

    pub async fn unregister(&self, message_id: u64) {
        self.routes.lock().await.remove(&message_id);
    }

    pub async fn live_sessions(&self) -> usize {
        self.routes.lock().await.len()
    }

    /// Forward an event to the subscription of its message.
    ///
    /// Returns `false` when no live subscription accepted it; closed
    /// subscriptions are dropped on the way.
    pub async fn route(&self, event: ControlEvent) -> bool {
        let mut routes = self.routes.lock().await;
        let message_id = event.message_id;
        let Some(sender) = routes.get(&message_id) else {
            return false;
        };

        if sender.send(event).is_ok() {
            return true;
        }

        routes.remove(&message_id);
        false
    }

    /// Handle a gateway interaction if it is a component on a message.
    ///
    /// Components on messages without a live session are answered with the
    /// expired notice. Returns whether the interaction was consumed.
    pub async fn dispatch(
        &self,
        http: &Client,
        interaction: &InteractionCreate,
    ) -> anyhow::Result<bool> {
        let Some(event) = control_event(interaction) else {
            return Ok(false);
        };

        let message_id = event.message_id;
        if self.route(event.clone()).await {
            return Ok(true);
        }

        debug!(message_id, control_id = %event.control_id, "component on expired pagination message");
        respond_expired(http, &event).await?;
        Ok(true)
    }
}

/// Extract a control event from a component interaction.
pub fn control_event(interaction: &InteractionCreate) -> Option<ControlEvent> {
    let Some(InteractionData::MessageComponent(data)) = interaction.data.as_ref() else {
        return None;
    };
    let message = interaction.message.as_ref()?;
    let actor_id = interaction.author_id()?;

    Some(ControlEvent {
        application_id: interaction.application_id.get(),
        interaction_id: interaction.id.get(),
        token: interaction.token.clone(),
        message_id: message.id.get(),
        actor_id: actor_id.get(),
        control_id: data.custom_id.clone(),
        values: data.values.clone(),
    })
}
