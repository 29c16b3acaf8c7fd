//! Capability contracts implemented by out-of-tree plugins.
//!
//! The core never touches a wire or runs a command itself; it instantiates
//! plugins through these factories and talks to them through trait objects.
//! `Ok`/`Err` on each call carries what the reference protocol expressed as a
//! `(success, …)` pair.

use crate::error::DispatchResult;
use crate::value::Value;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// The five kinds of plugin the registry can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CapabilityKind {
    Beacon,
    Command,
    Decoder,
    Encoder,
    Responder,
}

impl fmt::Display for CapabilityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CapabilityKind::Beacon => "beacon",
            CapabilityKind::Command => "command",
            CapabilityKind::Decoder => "decoder",
            CapabilityKind::Encoder => "encoder",
            CapabilityKind::Responder => "responder",
        };
        write!(f, "{}", name)
    }
}

/// Establishes contact with one rendezvous endpoint and returns the raw
/// instruction payload. An `Err` is a failed contact; the dispatcher moves on
/// to the next candidate endpoint.
pub trait Beacon {
    fn beacon(&self, params: &HashMap<String, String>) -> DispatchResult<Value>;
}

/// A symmetric transform over value trees. `whole_input_only` forces the
/// chain engine to hand the codec the entire tree as one unit instead of
/// visiting it node by node.
pub trait Codec {
    fn name(&self) -> &str;
    fn decode(&self, input: &Value) -> DispatchResult<Value>;
    fn encode(&self, input: &Value) -> DispatchResult<Value>;
    fn whole_input_only(&self) -> bool {
        false
    }
}

/// One executable instruction. `Ok`/`Err` is the leaf's reported success.
pub trait Command {
    fn name(&self) -> &str;
    fn execute(&self, params: &Value) -> DispatchResult<Value>;
}

/// Delivers the encoded results back to the endpoint that issued the order.
pub trait Responder {
    fn send_response(
        &self,
        params: &HashMap<String, String>,
        payload: &Value,
    ) -> DispatchResult<()>;
}

pub type BeaconFactory = Arc<dyn Fn() -> Box<dyn Beacon> + Send + Sync>;
pub type CodecFactory = Arc<dyn Fn() -> Box<dyn Codec> + Send + Sync>;
pub type CommandFactory = Arc<dyn Fn() -> Box<dyn Command> + Send + Sync>;
pub type ResponderFactory = Arc<dyn Fn() -> Box<dyn Responder> + Send + Sync>;
