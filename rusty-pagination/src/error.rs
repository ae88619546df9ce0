//! Error taxonomy for pagination sessions.

use std::fmt;

use thiserror::Error;

use crate::session::SessionPhase;

/// Bad caller input. Raised before any state is touched.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid `{field}`: got {value}, expected {expected}")]
pub struct ValidationError {
    pub field: &'static str,
    pub value: String,
    pub expected: String,
}

impl ValidationError {
    pub fn new(field: &'static str, value: impl fmt::Display, expected: impl Into<String>) -> Self {
        Self {
            field,
            value: value.to_string(),
            expected: expected.into(),
        }
    }
}

/// Operation not allowed in the session's current lifecycle phase.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("cannot {operation} while the session is {phase}")]
pub struct StateError {
    pub operation: &'static str,
    pub phase: SessionPhase,
}

/// A page or a selector option failed to materialize.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RenderError {
    #[error("page {page} failed to render: {reason}")]
    Page { page: usize, reason: String },
    #[error("selector option for page {page} failed to render: {reason}")]
    Option { page: usize, reason: String },
    #[error("rendered controls need {rows} rows, the platform allows {max}")]
    TooManyRows { rows: usize, max: usize },
}

/// Unrecognized or malformed control interaction.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ComponentError {
    #[error("unrecognized control `{control_id}`")]
    Unrecognized { control_id: String },
    #[error("selector `{control_id}` sent an invalid choice {value:?}")]
    InvalidSelection { control_id: String, value: String },
}

/// Transport operation that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportOp {
    Send,
    Edit,
    Delete,
    Subscribe,
    Acknowledge,
    Reply,
}

impl fmt::Display for TransportOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TransportOp::Send => "send",
            TransportOp::Edit => "edit",
            TransportOp::Delete => "delete",
            TransportOp::Subscribe => "subscribe",
            TransportOp::Acknowledge => "acknowledge",
            TransportOp::Reply => "reply",
        };
        f.write_str(name)
    }
}

/// Send/edit/delete (or interaction response) failure reported by the host transport.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("transport {operation} failed: {message}")]
pub struct TransportError {
    pub operation: TransportOp,
    pub message: String,
}

impl TransportError {
    pub fn new(operation: TransportOp, source: impl fmt::Display) -> Self {
        Self {
            operation,
            message: source.to_string(),
        }
    }
}

/// Any failure surfaced by the pagination engine.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PaginationError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    State(#[from] StateError),
    #[error(transparent)]
    Render(#[from] RenderError),
    #[error(transparent)]
    Component(#[from] ComponentError),
    #[error(transparent)]
    Transport(#[from] TransportError),
}

pub type Result<T, E = PaginationError> = std::result::Result<T, E>;
