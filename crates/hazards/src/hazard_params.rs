//! Data-driven hazard parameters.
//!
//! Every tunable used by the hazard effects lives in the [`HazardParams`]
//! resource. Effects read it by reference, so tests and mods can override
//! individual knobs without touching the effect code. The resource is
//! `Saveable` so overrides persist across save/load cycles.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::grid::ZoneType;

// ---------------------------------------------------------------------------
// Fire
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, bitcode::Encode, bitcode::Decode)]
pub struct FireParams {
    /// Spread probability per flammable neighbor per tick at intensity 1.0.
    pub spread_chance: f32,
    /// Condition lost per tick by a building inside the fire, at intensity 1.0.
    pub building_damage: f32,
    /// Child fire intensity relative to its parent.
    pub child_intensity_factor: f32,
}

impl Default for FireParams {
    fn default() -> Self {
        Self {
            spread_chance: 0.35,
            building_damage: 2.0,
            child_intensity_factor: 0.8,
        }
    }
}

// ---------------------------------------------------------------------------
// Earthquake
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, bitcode::Encode, bitcode::Decode)]
pub struct EarthquakeParams {
    /// Condition lost per tick at the epicenter at intensity 1.0.
    pub base_damage: f32,
}

impl Default for EarthquakeParams {
    fn default() -> Self {
        Self { base_damage: 30.0 }
    }
}

// ---------------------------------------------------------------------------
// Gas leak
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, bitcode::Encode, bitcode::Decode)]
pub struct GasLeakParams {
    /// Ignition probability per gas-connected building per tick at intensity 1.0.
    pub explosion_chance: f32,
    /// Duration in ticks of the fire an explosion starts.
    pub fire_duration: u32,
}

impl Default for GasLeakParams {
    fn default() -> Self {
        Self {
            explosion_chance: 0.15,
            fire_duration: 10,
        }
    }
}

// ---------------------------------------------------------------------------
// Industrial accident
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, bitcode::Encode, bitcode::Decode)]
pub struct IndustrialParams {
    /// Condition lost per tick by a residential building at the epicenter at intensity 1.0.
    pub base_damage: f32,
    pub industrial_multiplier: f32,
    pub commercial_multiplier: f32,
}

impl Default for IndustrialParams {
    fn default() -> Self {
        Self {
            base_damage: 12.0,
            industrial_multiplier: 3.0,
            commercial_multiplier: 1.5,
        }
    }
}

// ---------------------------------------------------------------------------
// Random disasters
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, bitcode::Encode, bitcode::Decode)]
pub struct RandomDisasterParams {
    pub enabled: bool,
    /// Ticks between random disaster rolls.
    pub check_interval: u64,
    /// Probability per roll that a disaster starts.
    pub chance: f32,
    pub intensity: f32,
    pub duration_ticks: u32,
    pub radius: f32,
}

impl Default for RandomDisasterParams {
    fn default() -> Self {
        Self {
            enabled: false,
            check_interval: 100,
            chance: 0.0005,
            intensity: 0.6,
            duration_ticks: 20,
            radius: 5.0,
        }
    }
}

// ---------------------------------------------------------------------------
// Top-level HazardParams resource
// ---------------------------------------------------------------------------

#[derive(
    Resource, Debug, Clone, Serialize, Deserialize, bitcode::Encode, bitcode::Decode,
)]
pub struct HazardParams {
    pub fire: FireParams,
    pub earthquake: EarthquakeParams,
    pub gas_leak: GasLeakParams,
    pub industrial: IndustrialParams,
    pub random: RandomDisasterParams,
    /// Damage is scaled by a factor drawn from `1 ± damage_jitter`.
    pub damage_jitter: f32,
}

impl Default for HazardParams {
    fn default() -> Self {
        Self {
            fire: FireParams::default(),
            earthquake: EarthquakeParams::default(),
            gas_leak: GasLeakParams::default(),
            industrial: IndustrialParams::default(),
            random: RandomDisasterParams::default(),
            damage_jitter: 0.2,
        }
    }
}

impl HazardParams {
    /// Industrial-accident damage multiplier for a building category.
    pub fn industrial_multiplier(&self, zone: ZoneType) -> f32 {
        match zone {
            ZoneType::Industrial => self.industrial.industrial_multiplier,
            ZoneType::CommercialLow | ZoneType::CommercialHigh | ZoneType::Office => {
                self.industrial.commercial_multiplier
            }
            ZoneType::ResidentialLow | ZoneType::ResidentialHigh | ZoneType::None => 1.0,
        }
    }
}

impl crate::Saveable for HazardParams {
    const SAVE_KEY: &'static str = "hazard_params";

    fn save_to_bytes(&self) -> Option<Vec<u8>> {
        Some(bitcode::encode(self))
    }

    fn load_from_bytes(bytes: &[u8]) -> Self {
        crate::decode_or_warn(Self::SAVE_KEY, bytes)
    }
}
