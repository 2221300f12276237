use bitcode::{Decode, Encode};
use rand::Rng;

use crate::grid::WorldGrid;
use crate::hazard_params::HazardParams;

use super::effects::{self, Area};
use super::types::{HazardKind, HazardSpawner, HazardType};

/// One live disaster: what it is, where it is centered, how strong it is and
/// how many ticks it has left.
///
/// The event is active while `current_tick < duration_ticks`. Each call to
/// [`HazardEvent::update`] on an active event applies one tick of effects and
/// advances `current_tick` by one, so the event deactivates exactly once and
/// never comes back.
#[derive(Debug, Clone, PartialEq, Encode, Decode)]
pub struct HazardEvent {
    kind: HazardKind,
    intensity: f32,
    duration_ticks: u32,
    current_tick: u32,
    epicenter_x: i32,
    epicenter_y: i32,
    radius: f32,
}

impl HazardEvent {
    /// Creates a hazard at tick 0.
    ///
    /// Intensity is clamped into `[0, 1]` and radius to `>= 0`; NaN becomes 0.
    /// The epicenter may lie outside the grid, in which case only the part of
    /// the area overlapping the grid is affected.
    pub fn new(
        hazard_type: HazardType,
        intensity: f32,
        duration_ticks: u32,
        epicenter_x: i32,
        epicenter_y: i32,
        radius: f32,
    ) -> Self {
        Self {
            kind: HazardKind::new(hazard_type),
            intensity: sanitize(intensity).min(1.0),
            duration_ticks,
            current_tick: 0,
            epicenter_x,
            epicenter_y,
            radius: sanitize(radius),
        }
    }

    /// Restores the tick invariants on an event read back from save data.
    pub(crate) fn sanitized(mut self) -> Self {
        self.intensity = sanitize(self.intensity).min(1.0);
        self.radius = sanitize(self.radius);
        self.current_tick = self.current_tick.min(self.duration_ticks);
        self
    }

    pub fn hazard_type(&self) -> HazardType {
        self.kind.hazard_type()
    }

    pub fn kind(&self) -> &HazardKind {
        &self.kind
    }

    pub fn intensity(&self) -> f32 {
        self.intensity
    }

    pub fn duration_ticks(&self) -> u32 {
        self.duration_ticks
    }

    pub fn current_tick(&self) -> u32 {
        self.current_tick
    }

    pub fn remaining_ticks(&self) -> u32 {
        self.duration_ticks - self.current_tick
    }

    pub fn epicenter(&self) -> (i32, i32) {
        (self.epicenter_x, self.epicenter_y)
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn is_active(&self) -> bool {
        self.current_tick < self.duration_ticks
    }

    /// Advances the hazard by one tick.
    ///
    /// Applies the type-specific effect to every in-bounds cell within
    /// `radius` of the epicenter, then increments `current_tick`. Hazards
    /// created as a side effect are handed to `spawner`. Does nothing once the
    /// event is inactive.
    pub fn update<R: Rng + ?Sized>(
        &mut self,
        grid: &mut WorldGrid,
        rng: &mut R,
        params: &HazardParams,
        spawner: &mut dyn HazardSpawner,
    ) {
        if !self.is_active() {
            return;
        }

        let area = Area {
            x: self.epicenter_x,
            y: self.epicenter_y,
            radius: self.radius,
            intensity: self.intensity,
            duration_ticks: self.duration_ticks,
            metric: self.hazard_type().distance_metric(),
        };

        match &mut self.kind {
            HazardKind::Fire { spread_mask } => {
                effects::burn(&area, spread_mask, grid, rng, params, spawner)
            }
            HazardKind::Earthquake => effects::shake(&area, grid, rng, params),
            HazardKind::GasLeak { exploded } => {
                effects::leak_gas(&area, exploded, grid, rng, params, spawner)
            }
            HazardKind::PowerGridFailure => effects::cut_power(&area, grid),
            HazardKind::IndustrialAccident => effects::industrial_damage(&area, grid, rng, params),
        }

        self.current_tick += 1;
    }
}

fn sanitize(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.max(0.0)
    }
}
