//! Plugin catalog and the per-controller capability registry.
//!
//! The catalog is the universe of plugins the embedding binary has compiled
//! in, keyed by identifier within each capability kind. A controller selects
//! from it at construction through a [`PluginManifest`]: name-keyed maps for
//! beacons, commands, and responders, ordered factory lists for decoders and
//! encoders. Resolution failures abort construction — a controller is never
//! half-built. After `build` the registry is read-only; factories are
//! `Send + Sync`, so unsynchronized concurrent reads are safe.

use payload::{
    Beacon, BeaconFactory, CapabilityKind, Codec, CodecFactory, Command, CommandFactory,
    DispatchError, DispatchResult, Responder, ResponderFactory,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

/// Everything the embedding binary makes available to controllers. Codecs
/// are registered once and may serve in both decoder and encoder roles.
#[derive(Default)]
pub struct PluginCatalog {
    beacons: HashMap<String, BeaconFactory>,
    codecs: HashMap<String, CodecFactory>,
    commands: HashMap<String, CommandFactory>,
    responders: HashMap<String, ResponderFactory>,
}

impl PluginCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_beacon<F>(&mut self, name: impl Into<String>, factory: F)
    where
        F: Fn() -> Box<dyn Beacon> + Send + Sync + 'static,
    {
        self.beacons.insert(name.into(), Arc::new(factory));
    }

    pub fn register_codec<F>(&mut self, name: impl Into<String>, factory: F)
    where
        F: Fn() -> Box<dyn Codec> + Send + Sync + 'static,
    {
        self.codecs.insert(name.into(), Arc::new(factory));
    }

    pub fn register_command<F>(&mut self, name: impl Into<String>, factory: F)
    where
        F: Fn() -> Box<dyn Command> + Send + Sync + 'static,
    {
        self.commands.insert(name.into(), Arc::new(factory));
    }

    pub fn register_responder<F>(&mut self, name: impl Into<String>, factory: F)
    where
        F: Fn() -> Box<dyn Responder> + Send + Sync + 'static,
    {
        self.responders.insert(name.into(), Arc::new(factory));
    }

    fn resolve_beacon(&self, name: &str) -> DispatchResult<BeaconFactory> {
        self.beacons
            .get(name)
            .cloned()
            .ok_or_else(|| unknown(CapabilityKind::Beacon, name))
    }

    fn resolve_codec(&self, kind: CapabilityKind, name: &str) -> DispatchResult<CodecFactory> {
        self.codecs
            .get(name)
            .cloned()
            .ok_or_else(|| unknown(kind, name))
    }

    fn resolve_command(&self, name: &str) -> DispatchResult<CommandFactory> {
        self.commands
            .get(name)
            .cloned()
            .ok_or_else(|| unknown(CapabilityKind::Command, name))
    }

    fn resolve_responder(&self, name: &str) -> DispatchResult<ResponderFactory> {
        self.responders
            .get(name)
            .cloned()
            .ok_or_else(|| unknown(CapabilityKind::Responder, name))
    }
}

fn unknown(kind: CapabilityKind, name: &str) -> DispatchError {
    DispatchError::UnknownPlugin {
        kind,
        name: name.to_string(),
    }
}

/// The five ordered identifier lists a controller is built from. Decoder and
/// encoder lists may differ in content and order; list order is chain order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginManifest {
    pub beacons: Vec<String>,
    pub commands: Vec<String>,
    pub decoders: Vec<String>,
    pub encoders: Vec<String>,
    pub responders: Vec<String>,
}

/// Read-only plugin lookup for one controller, populated once at build time.
pub struct CapabilityRegistry {
    beacons: HashMap<String, BeaconFactory>,
    commands: HashMap<String, CommandFactory>,
    decoders: Vec<CodecFactory>,
    encoders: Vec<CodecFactory>,
    responders: HashMap<String, ResponderFactory>,
}

impl CapabilityRegistry {
    /// Resolves every manifest identifier against the catalog. The first
    /// unknown identifier aborts the build.
    pub fn build(catalog: &PluginCatalog, manifest: &PluginManifest) -> DispatchResult<Self> {
        let mut beacons = HashMap::new();
        for name in &manifest.beacons {
            beacons.insert(name.clone(), catalog.resolve_beacon(name)?);
        }
        let mut commands = HashMap::new();
        for name in &manifest.commands {
            commands.insert(name.clone(), catalog.resolve_command(name)?);
        }
        let mut decoders = Vec::with_capacity(manifest.decoders.len());
        for name in &manifest.decoders {
            decoders.push(catalog.resolve_codec(CapabilityKind::Decoder, name)?);
        }
        let mut encoders = Vec::with_capacity(manifest.encoders.len());
        for name in &manifest.encoders {
            encoders.push(catalog.resolve_codec(CapabilityKind::Encoder, name)?);
        }
        let mut responders = HashMap::new();
        for name in &manifest.responders {
            responders.insert(name.clone(), catalog.resolve_responder(name)?);
        }
        Ok(CapabilityRegistry {
            beacons,
            commands,
            decoders,
            encoders,
            responders,
        })
    }

    pub fn beacon(&self, kind: &str) -> DispatchResult<&BeaconFactory> {
        self.beacons
            .get(kind)
            .ok_or_else(|| unknown(CapabilityKind::Beacon, kind))
    }

    pub fn command(&self, name: &str) -> DispatchResult<&CommandFactory> {
        self.commands
            .get(name)
            .ok_or_else(|| unknown(CapabilityKind::Command, name))
    }

    pub fn responder(&self, kind: &str) -> DispatchResult<&ResponderFactory> {
        self.responders
            .get(kind)
            .ok_or_else(|| unknown(CapabilityKind::Responder, kind))
    }

    pub fn decoders(&self) -> &[CodecFactory] {
        &self.decoders
    }

    pub fn encoders(&self) -> &[CodecFactory] {
        &self.encoders
    }
}
