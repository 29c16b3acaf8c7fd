//! Error taxonomy for the dispatch core.
//!
//! Every stage converts its own plugin-level failures into a stage-local
//! result; none of these errors escapes the controller's public entry point.

use crate::contracts::CapabilityKind;
use thiserror::Error;

pub type DispatchResult<T> = Result<T, DispatchError>;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DispatchError {
    /// Identifier has no registered factory. Fatal while building the
    /// registry, a classification error at dispatch time.
    #[error("no registered {kind} plugin named '{name}'")]
    UnknownPlugin { kind: CapabilityKind, name: String },

    /// A beacon or responder invocation failed to reach its endpoint.
    #[error("error connecting to {endpoint}: {message}")]
    Connectivity { endpoint: String, message: String },

    /// A codec stage failed on some node of the value tree.
    #[error("codec '{codec}' failed: {message}")]
    Codec { codec: String, message: String },

    /// Data was not shaped as scalar, sequence, or mapping.
    #[error("malformed value: {0}")]
    MalformedValue(String),

    /// A decoded node was neither a leaf nor a chain.
    #[error("improperly formatted command: {0}")]
    MalformedCommand(String),

    /// A leaf named a command with no registered factory.
    #[error("no such command: {0}")]
    UnknownCommand(String),
}
