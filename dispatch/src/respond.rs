//! Response dispatcher.
//!
//! Delivers an order's encoded response back through the responder plugin
//! matching the originating endpoint type. Every failure mode — unknown
//! responder kind, missing payload, connectivity error — is converted to
//! `false`; no retry is attempted here.

use crate::order::Order;
use crate::registry::CapabilityRegistry;

pub fn deliver(registry: &CapabilityRegistry, order: &Order) -> bool {
    log::info!("sending results of order {}...", order.uuid);
    let payload = match order.response.as_ref() {
        Some(payload) => payload,
        None => {
            log::error!("order {} has no encoded response to deliver", order.uuid);
            return false;
        }
    };
    let factory = match registry.responder(&order.kind) {
        Ok(factory) => factory,
        Err(err) => {
            log::error!("{}", err);
            return false;
        }
    };
    let responder = factory();
    match responder.send_response(&order.params, payload) {
        Ok(()) => true,
        Err(err) => {
            log::error!(
                "error connecting to {} ({})",
                order.endpoint.address(),
                err
            );
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::endpoint::Endpoint;
    use crate::registry::{PluginCatalog, PluginManifest};
    use payload::{DispatchError, DispatchResult, Responder, Value};
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    struct RecordingResponder {
        sent: Arc<Mutex<Option<Value>>>,
        fail: bool,
    }

    impl Responder for RecordingResponder {
        fn send_response(
            &self,
            _params: &HashMap<String, String>,
            payload: &Value,
        ) -> DispatchResult<()> {
            if self.fail {
                return Err(DispatchError::Connectivity {
                    endpoint: "10.0.0.2:80".to_string(),
                    message: "broken pipe".to_string(),
                });
            }
            *self.sent.lock().unwrap() = Some(payload.clone());
            Ok(())
        }
    }

    fn registry(sent: Arc<Mutex<Option<Value>>>, fail: bool) -> CapabilityRegistry {
        let mut catalog = PluginCatalog::new();
        catalog.register_responder("fake", move || {
            Box::new(RecordingResponder {
                sent: sent.clone(),
                fail,
            })
        });
        let manifest = PluginManifest {
            responders: vec!["fake".to_string()],
            ..Default::default()
        };
        CapabilityRegistry::build(&catalog, &manifest).unwrap()
    }

    fn order_with_response(kind: &str) -> Order {
        let mut order = Order::new(
            Endpoint::new(kind, HashMap::new()),
            Value::scalar("raw"),
        );
        order.response = Some(Value::scalar("hi"));
        order
    }

    #[test]
    fn delivers_the_encoded_response() {
        let sent = Arc::new(Mutex::new(None));
        let registry = registry(sent.clone(), false);
        assert!(deliver(&registry, &order_with_response("fake")));
        assert_eq!(*sent.lock().unwrap(), Some(Value::scalar("hi")));
    }

    #[test]
    fn connectivity_failure_becomes_false() {
        let registry = registry(Arc::new(Mutex::new(None)), true);
        assert!(!deliver(&registry, &order_with_response("fake")));
    }

    #[test]
    fn unknown_responder_kind_becomes_false() {
        let registry = registry(Arc::new(Mutex::new(None)), false);
        assert!(!deliver(&registry, &order_with_response("carrier_pigeon")));
    }

    #[test]
    fn missing_payload_becomes_false() {
        let registry = registry(Arc::new(Mutex::new(None)), false);
        let order = Order::new(Endpoint::new("fake", HashMap::new()), Value::scalar("raw"));
        assert!(!deliver(&registry, &order));
    }
}
