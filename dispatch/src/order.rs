//! Per-iteration session record.
//!
//! An `Order` correlates the endpoint that answered a beacon with everything
//! the iteration derives from its response: the raw payload, the decoded
//! command tree, the executed results, and the re-encoded response. Exactly
//! one order exists per iteration, owned by the controller and dropped when
//! the iteration ends; nothing is persisted.

use crate::endpoint::Endpoint;
use payload::{ResultTree, Value};
use std::collections::HashMap;
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct Order {
    pub uuid: Uuid,
    pub endpoint: Endpoint,
    // Denormalized from the endpoint for handler convenience.
    pub ip: Option<String>,
    pub port: Option<String>,
    pub kind: String,
    pub params: HashMap<String, String>,
    /// Raw payload as returned by the beacon plugin.
    pub raw_response: Value,
    /// Decoded command tree, set by the decode stage.
    pub commands: Option<Value>,
    /// Executed results, set by the command stage.
    pub results: Option<ResultTree>,
    /// Encoded response, set by the encode stage and delivered by the
    /// responder.
    pub response: Option<Value>,
}

impl Order {
    pub fn new(endpoint: Endpoint, raw_response: Value) -> Self {
        Order {
            uuid: Uuid::new_v4(),
            ip: endpoint.ip().map(str::to_string),
            port: endpoint.port().map(str::to_string),
            kind: endpoint.kind.clone(),
            params: endpoint.params.clone(),
            endpoint,
            raw_response,
            commands: None,
            results: None,
            response: None,
        }
    }
}
