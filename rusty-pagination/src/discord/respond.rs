//! Interaction responses used by the pagination adapter.

use twilight_http::Client;
use twilight_model::{
    channel::message::MessageFlags,
    http::interaction::{InteractionResponse, InteractionResponseType},
    id::{
        Id,
        marker::{ApplicationMarker, InteractionMarker},
    },
};
use twilight_util::builder::InteractionResponseDataBuilder;

use crate::error::{TransportError, TransportOp};
use crate::transport::ControlEvent;

/// Generic message shown when a control belongs to a session that no longer exists.
pub const PAGINATION_EXPIRED_MESSAGE: &str =
    "This pagination session expired. Run the command again.";

fn interaction_ids(
    event: &ControlEvent,
    operation: TransportOp,
) -> Result<(Id<ApplicationMarker>, Id<InteractionMarker>), TransportError> {
    let application_id = Id::new_checked(event.application_id)
        .ok_or_else(|| TransportError::new(operation, "application id is zero"))?;
    let interaction_id = Id::new_checked(event.interaction_id)
        .ok_or_else(|| TransportError::new(operation, "interaction id is zero"))?;
    Ok((application_id, interaction_id))
}

async fn create_response(
    http: &Client,
    event: &ControlEvent,
    response: &InteractionResponse,
    operation: TransportOp,
) -> Result<(), TransportError> {
    let (application_id, interaction_id) = interaction_ids(event, operation)?;
    http.interaction(application_id)
        .create_response(interaction_id, &event.token, response)
        .await
        .map_err(|source| TransportError::new(operation, source))?;
    Ok(())
}

/// Acknowledge a component interaction; the message is edited separately.
pub async fn defer_update(http: &Client, event: &ControlEvent) -> Result<(), TransportError> {
    let response = InteractionResponse {
        kind: InteractionResponseType::DeferredUpdateMessage,
        data: None,
    };
    create_response(http, event, &response, TransportOp::Acknowledge).await
}

/// Respond to a component interaction with an ephemeral message.
pub async fn respond_ephemeral(
    http: &Client,
    event: &ControlEvent,
    content: &str,
) -> Result<(), TransportError> {
    let response = InteractionResponse {
        kind: InteractionResponseType::ChannelMessageWithSource,
        data: Some(
            InteractionResponseDataBuilder::new()
                .content(content)
                .flags(MessageFlags::EPHEMERAL)
                .build(),
        ),
    };
    create_response(http, event, &response, TransportOp::Reply).await
}

/// Ephemeral follow-up for an interaction that was already acknowledged.
pub async fn follow_up_ephemeral(
    http: &Client,
    event: &ControlEvent,
    content: &str,
) -> Result<(), TransportError> {
    let (application_id, _) = interaction_ids(event, TransportOp::Reply)?;
    http.interaction(application_id)
        .create_followup(&event.token)
        .content(content)
        .flags(MessageFlags::EPHEMERAL)
        .await
        .map_err(|source| TransportError::new(TransportOp::Reply, source))?;
    Ok(())
}

/// Respond with the standard expired pagination message.
pub async fn respond_expired(http: &Client, event: &ControlEvent) -> Result<(), TransportError> {
    respond_ephemeral(http, event, PAGINATION_EXPIRED_MESSAGE).await
}
