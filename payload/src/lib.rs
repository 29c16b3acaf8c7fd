//! Payload substrate for the beacon dispatch core.
//!
//! Everything that flows between plugins lives here: the recursive [`Value`]
//! tree that codec and command stages operate on, the command tree decoded
//! from an inbound payload, the error taxonomy, and the capability contracts
//! that concrete beacon/codec/command/responder plugins implement.
//!
//! This crate performs no I/O and holds no state; the `dispatch` crate wires
//! these pieces into the orchestration engine.

pub mod command;
pub mod contracts;
pub mod error;
pub mod value;

pub use command::{CommandNode, CommandResult, ResultTree};
pub use contracts::{
    Beacon, BeaconFactory, CapabilityKind, Codec, CodecFactory, Command, CommandFactory,
    Responder, ResponderFactory,
};
pub use error::{DispatchError, DispatchResult};
pub use value::Value;
