//! Candidate rendezvous endpoints.
//!
//! An endpoint is a type tag plus an opaque parameter map; the order of the
//! endpoint slice handed to the controller defines failover priority. The
//! core only reads the well-known keys below for diagnostics — everything
//! else, timeouts included, is interpreted by the beacon plugin itself.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub const IP_KEY: &str = "ip";
pub const PORT_KEY: &str = "port";
pub const TIMEOUT_KEY: &str = "timeout";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endpoint {
    #[serde(rename = "type")]
    pub kind: String,
    pub params: HashMap<String, String>,
}

impl Endpoint {
    pub fn new(kind: impl Into<String>, params: HashMap<String, String>) -> Self {
        Endpoint {
            kind: kind.into(),
            params,
        }
    }

    pub fn ip(&self) -> Option<&str> {
        self.params.get(IP_KEY).map(String::as_str)
    }

    pub fn port(&self) -> Option<&str> {
        self.params.get(PORT_KEY).map(String::as_str)
    }

    /// `ip:port` for log lines, with `?` standing in for missing parts.
    pub fn address(&self) -> String {
        format!("{}:{}", self.ip().unwrap_or("?"), self.port().unwrap_or("?"))
    }
}
