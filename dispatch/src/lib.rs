//! Dispatch core of a beaconing agent.
//!
//! Given an ordered list of candidate rendezvous endpoints, a [`Controller`]
//! runs one iteration of the pipeline
//! `Beacon → Decode → Execute → Encode → Respond`, short-circuiting on the
//! first stage failure and reporting a single boolean. Concrete transports,
//! codec algorithms, and command implementations are plugins registered in a
//! [`PluginCatalog`] and selected per controller through a
//! [`PluginManifest`]; the core is transport- and codec-agnostic.
//!
//! Execution is single-threaded and sequential per iteration. The registry is
//! built once at construction and never mutated afterwards, so a future
//! parallel scheduler can share it across threads without locking.

pub mod beacon;
pub mod codec;
pub mod command;
pub mod endpoint;
pub mod order;
pub mod orchestrator;
pub mod registry;
pub mod respond;

pub use endpoint::Endpoint;
pub use orchestrator::{Controller, Phase};
pub use order::Order;
pub use registry::{CapabilityRegistry, PluginCatalog, PluginManifest};
