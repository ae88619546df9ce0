//! Discord-backed implementation of the pagination transport.

mod components;
pub mod hub;
pub mod respond;
mod transport;

pub use components::to_components;
pub use hub::{InteractionHub, control_event};
pub use respond::PAGINATION_EXPIRED_MESSAGE;
pub use transport::ChannelTransport;
