//! Interactive paginated messages: sessions, navigation controls and the
//! Discord adapter that delivers them.

/// Per-session configuration values.
pub mod config;
/// Button, selector and hybrid control surfaces.
pub mod controls;
/// Discord-backed transport and interaction fan-out.
pub mod discord;
/// Generic embed builders shared across commands.
pub mod embed;
pub mod error;
pub mod events;
pub mod icon;
/// Pure paging math.
pub mod page;
/// Pure parser helpers.
pub mod parse;
pub mod render;
pub mod router;
pub mod session;
pub mod transport;
pub mod validate;

mod timer;

#[cfg(test)]
mod testing;

/// Single source of truth for the message-command prefix.
pub const COMMAND_PREFIX: char = '!';

pub use config::{AfterTimeout, SessionConfig};
pub use controls::{
    ButtonConfig, ButtonStyle, ControlLabel, ControlSurface, CustomNumbering, HybridConfig,
    HybridLayout, OptionLabel, SelectConfig,
};
pub use error::{
    ComponentError, PaginationError, RenderError, StateError, TransportError, ValidationError,
};
pub use events::{SessionEvent, SessionEvents};
pub use router::RouteOutcome;
pub use session::{EndReason, PaginationSession, SessionBuilder, SessionPhase, SessionSnapshot};
pub use transport::{
    ControlEvent, ControlSubscription, MessageHandle, MessagePayload, PageContent, Transport,
};
