//! Response shaping: local→global unification and type-filter application.
//!
//! Clients always receive the *global* result shapes. When a handler used
//! a node-scoped remote call, the functions here lift the local result
//! into a one-entry global form keyed by the responding peer. Filtering
//! and lifting run only on the success path; errors pass through the
//! status policy untouched.

use pinmesh_types::{GlobalPinInfo, GlobalRepoGC, Pin, PinInfo, PinType, RepoGC};

/// Lift a sequence of node-scoped status records into the global shape,
/// preserving input order. Each record is keyed by its own carried peer.
pub fn pin_infos_to_global(infos: Vec<PinInfo>) -> Vec<GlobalPinInfo> {
    infos.into_iter().map(PinInfo::into_global).collect()
}

/// Lift a node-scoped GC result into the global shape.
pub fn repo_gc_to_global(gc: RepoGC) -> GlobalRepoGC {
    GlobalRepoGC {
        peer_map: std::collections::BTreeMap::from([(gc.peer.to_string(), gc)]),
    }
}

/// Apply a type-filter mask to a pin list.
///
/// The `ALL` mask is the identity. Otherwise keeps, in original order,
/// exactly the pins whose own category bit intersects the mask.
pub fn filter_pins(pins: Vec<Pin>, filter: PinType) -> Vec<Pin> {
    if filter == PinType::ALL {
        return pins;
    }
    pins.into_iter()
        .filter(|pin| pin.pin_type.intersects(filter))
        .collect()
}
