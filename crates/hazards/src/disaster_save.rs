//! Saveable implementation for `DisasterRegistry` so in-progress disasters
//! persist across save/load cycles.

use bevy::prelude::*;
use bitcode::{Decode, Encode};

use crate::disasters::DisasterRegistry;
use crate::hazards::HazardEvent;
use crate::Saveable;

#[derive(Encode, Decode)]
struct RegistrySnapshot {
    events: Vec<HazardEvent>,
}

impl Saveable for DisasterRegistry {
    const SAVE_KEY: &'static str = "disaster_registry";

    fn save_to_bytes(&self) -> Option<Vec<u8>> {
        // Skip saving if nothing is active (default state).
        if self.is_empty() {
            return None;
        }
        Some(bitcode::encode(&RegistrySnapshot {
            events: self.active_events().to_vec(),
        }))
    }

    fn load_from_bytes(bytes: &[u8]) -> Self {
        match bitcode::decode::<RegistrySnapshot>(bytes) {
            Ok(snapshot) => {
                let events = snapshot
                    .events
                    .into_iter()
                    .map(HazardEvent::sanitized)
                    .filter(HazardEvent::is_active)
                    .collect();
                Self::from_events(events)
            }
            Err(e) => {
                warn!(
                    "Saveable disaster_registry: failed to decode {} bytes, \
                     falling back to no active disasters: {}",
                    bytes.len(),
                    e
                );
                Self::default()
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Plugin
// ---------------------------------------------------------------------------

pub struct DisasterSavePlugin;

impl Plugin for DisasterSavePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<crate::SaveableRegistry>();
        let mut registry = app.world_mut().resource_mut::<crate::SaveableRegistry>();
        registry.register::<DisasterRegistry>();
        registry.register::<crate::hazard_params::HazardParams>();
        registry.register::<crate::sim_rng::SimRng>();
    }
}
