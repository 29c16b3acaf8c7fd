//! Endpoint-failover beacon dispatcher.
//!
//! Tries candidate endpoints in the given order and returns the first
//! successful contact as an [`Order`]. First success wins; later endpoints
//! are never tried. A connectivity failure moves on to the next candidate,
//! but an endpoint whose type has no registered beacon plugin is a
//! classification error surfaced to the caller instead of being skipped.

use crate::endpoint::Endpoint;
use crate::order::Order;
use crate::registry::CapabilityRegistry;
use payload::DispatchResult;

/// `Ok(Some(order))` on the first successful contact, `Ok(None)` when the
/// sequence is empty or every endpoint failed.
pub fn try_endpoints(
    registry: &CapabilityRegistry,
    endpoints: &[Endpoint],
) -> DispatchResult<Option<Order>> {
    log::info!("beaconing...");
    for endpoint in endpoints {
        let factory = registry.beacon(&endpoint.kind)?;
        let beacon = factory();
        match beacon.beacon(&endpoint.params) {
            Ok(raw_response) => {
                log::info!("retrieved data from {}", endpoint.address());
                return Ok(Some(Order::new(endpoint.clone(), raw_response)));
            }
            Err(err) => {
                log::warn!("failed to reach {}: {}", endpoint.address(), err);
            }
        }
    }
    Ok(None)
}
