use std::fmt;

use bitcode::{Decode, Encode};
use serde::{Deserialize, Serialize};

use crate::grid::DistanceMetric;

use super::event::HazardEvent;

// =============================================================================
// Hazard types
// =============================================================================

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Encode, Decode,
)]
pub enum HazardType {
    Fire,
    Earthquake,
    GasLeak,
    PowerGridFailure,
    IndustrialAccident,
}

impl HazardType {
    pub const ALL: [HazardType; 5] = [
        HazardType::Fire,
        HazardType::Earthquake,
        HazardType::GasLeak,
        HazardType::PowerGridFailure,
        HazardType::IndustrialAccident,
    ];

    /// Stable identifier, used in reports and logs.
    pub fn name(self) -> &'static str {
        match self {
            HazardType::Fire => "Fire",
            HazardType::Earthquake => "Earthquake",
            HazardType::GasLeak => "GasLeak",
            HazardType::PowerGridFailure => "PowerGridFailure",
            HazardType::IndustrialAccident => "IndustrialAccident",
        }
    }

    /// Power outages knock out whole feeder blocks, so they cover a square.
    /// Everything else radiates out in a disc.
    pub fn distance_metric(self) -> DistanceMetric {
        match self {
            HazardType::PowerGridFailure => DistanceMetric::Chebyshev,
            HazardType::Fire
            | HazardType::Earthquake
            | HazardType::GasLeak
            | HazardType::IndustrialAccident => DistanceMetric::Euclidean,
        }
    }
}

impl fmt::Display for HazardType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Per-type state carried by a live hazard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Encode, Decode)]
pub enum HazardKind {
    /// Bit `i` of `spread_mask` is set once the fire has ignited orthogonal
    /// neighbor `i` (west, east, north, south).
    Fire { spread_mask: u8 },
    Earthquake,
    GasLeak { exploded: bool },
    PowerGridFailure,
    IndustrialAccident,
}

impl HazardKind {
    pub fn new(hazard_type: HazardType) -> Self {
        match hazard_type {
            HazardType::Fire => HazardKind::Fire { spread_mask: 0 },
            HazardType::Earthquake => HazardKind::Earthquake,
            HazardType::GasLeak => HazardKind::GasLeak { exploded: false },
            HazardType::PowerGridFailure => HazardKind::PowerGridFailure,
            HazardType::IndustrialAccident => HazardKind::IndustrialAccident,
        }
    }

    pub fn hazard_type(&self) -> HazardType {
        match self {
            HazardKind::Fire { .. } => HazardType::Fire,
            HazardKind::Earthquake => HazardType::Earthquake,
            HazardKind::GasLeak { .. } => HazardType::GasLeak,
            HazardKind::PowerGridFailure => HazardType::PowerGridFailure,
            HazardKind::IndustrialAccident => HazardType::IndustrialAccident,
        }
    }
}

// =============================================================================
// Cascading
// =============================================================================

/// Why a hazard created another one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpawnCause {
    /// A fire jumped to an orthogonal neighbor.
    FireSpread,
    /// A gas leak ignited.
    GasExplosion,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SpawnedHazard {
    pub cause: SpawnCause,
    pub event: HazardEvent,
}

/// The only thing a hazard may do to the registry that owns it: ask for a new
/// hazard to be started.
pub trait HazardSpawner {
    fn spawn(&mut self, cause: SpawnCause, event: HazardEvent);
}

impl HazardSpawner for Vec<SpawnedHazard> {
    fn spawn(&mut self, cause: SpawnCause, event: HazardEvent) {
        self.push(SpawnedHazard { cause, event });
    }
}
