use bevy::prelude::*;
use rand::Rng;

use crate::grid::{DistanceMetric, WorldGrid};
use crate::hazard_params::HazardParams;

use super::event::HazardEvent;
use super::types::{HazardSpawner, HazardType, SpawnCause};

/// Orthogonal neighbor offsets, indexed by the bits of a fire's spread mask.
pub(crate) const ORTHOGONAL: [(i32, i32); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// Jitter never scales damage below this fraction, so damage stays positive.
const MAX_JITTER: f32 = 0.9;

/// Snapshot of the event fields an effect needs.
pub(crate) struct Area {
    pub x: i32,
    pub y: i32,
    pub radius: f32,
    pub intensity: f32,
    pub duration_ticks: u32,
    pub metric: DistanceMetric,
}

impl Area {
    /// 1.0 at the epicenter, falling toward (but never reaching) 0 at the rim.
    fn falloff(&self, distance: f32) -> f32 {
        1.0 - distance / (self.radius + 1.0)
    }
}

pub(crate) fn roll<R: Rng + ?Sized>(rng: &mut R, chance: f32) -> bool {
    chance > 0.0 && rng.gen::<f32>() < chance
}

fn jitter<R: Rng + ?Sized>(rng: &mut R, spread: f32) -> f32 {
    if spread.is_nan() || spread <= 0.0 {
        return 1.0;
    }
    let spread = spread.min(MAX_JITTER);
    rng.gen_range((1.0 - spread)..=(1.0 + spread))
}

// =============================================================================
// Fire
// =============================================================================

/// Spreads to flammable neighbors, then consumes vegetation and parks and
/// scorches buildings across the area.
///
/// Spread is checked first so that a neighbor's trees can still carry the fire
/// on the tick they burn. Each neighbor is ignited at most once per fire, and
/// children last half as long as their parent, so cascades die out.
pub(crate) fn burn<R: Rng + ?Sized>(
    area: &Area,
    spread_mask: &mut u8,
    grid: &mut WorldGrid,
    rng: &mut R,
    params: &HazardParams,
    spawner: &mut dyn HazardSpawner,
) {
    let child_duration = area.duration_ticks / 2;
    if child_duration > 0 {
        let chance = area.intensity * params.fire.spread_chance;
        for (bit, &(dx, dy)) in ORTHOGONAL.iter().enumerate() {
            let mask = 1u8 << bit;
            if *spread_mask & mask != 0 {
                continue;
            }
            let (Some(nx), Some(ny)) = (area.x.checked_add(dx), area.y.checked_add(dy)) else {
                continue;
            };
            let flammable = grid.get_checked(nx, ny).is_some_and(|c| c.is_flammable());
            if !flammable || !roll(rng, chance) {
                continue;
            }

            *spread_mask |= mask;
            debug!(
                "Fire at ({}, {}) spread to ({}, {})",
                area.x, area.y, nx, ny
            );
            spawner.spawn(
                SpawnCause::FireSpread,
                HazardEvent::new(
                    HazardType::Fire,
                    area.intensity * params.fire.child_intensity_factor,
                    child_duration,
                    nx,
                    ny,
                    area.radius,
                ),
            );
        }
    }

    let scorch = params.fire.building_damage * area.intensity;
    for cell in grid.cells_within(area.x, area.y, area.radius, area.metric) {
        let target = grid.get_mut(cell.x, cell.y);
        target.clear_vegetation();
        if let Some(building) = target.building.as_mut() {
            building.apply_damage(scorch);
        }
    }
}

// =============================================================================
// Earthquake
// =============================================================================

/// Damages every building in the area, hardest at the epicenter.
pub(crate) fn shake<R: Rng + ?Sized>(
    area: &Area,
    grid: &mut WorldGrid,
    rng: &mut R,
    params: &HazardParams,
) {
    let base = params.earthquake.base_damage * area.intensity;
    for cell in grid.cells_within(area.x, area.y, area.radius, area.metric) {
        if let Some(building) = grid.building_at_mut(cell.x, cell.y) {
            let damage = base * area.falloff(cell.distance) * jitter(rng, params.damage_jitter);
            building.apply_damage(damage);
        }
    }
}

// =============================================================================
// Gas leak
// =============================================================================

/// Rolls for ignition at each gas-connected building. The first success
/// explodes the leak: a fire starts at the leak's epicenter and gas service in
/// the area is cut. A leak explodes at most once.
pub(crate) fn leak_gas<R: Rng + ?Sized>(
    area: &Area,
    exploded: &mut bool,
    grid: &mut WorldGrid,
    rng: &mut R,
    params: &HazardParams,
    spawner: &mut dyn HazardSpawner,
) {
    if *exploded {
        return;
    }

    let cells = grid.cells_within(area.x, area.y, area.radius, area.metric);
    let chance = area.intensity * params.gas_leak.explosion_chance;
    let ignited = cells.iter().any(|cell| {
        grid.building_at(cell.x, cell.y).is_some_and(|b| b.has_gas) && roll(rng, chance)
    });
    if !ignited {
        return;
    }

    *exploded = true;
    for cell in &cells {
        if let Some(building) = grid.building_at_mut(cell.x, cell.y) {
            building.has_gas = false;
        }
    }

    info!("Gas leak at ({}, {}) exploded", area.x, area.y);
    spawner.spawn(
        SpawnCause::GasExplosion,
        HazardEvent::new(
            HazardType::Fire,
            area.intensity,
            params.gas_leak.fire_duration,
            area.x,
            area.y,
            area.radius,
        ),
    );
}

// =============================================================================
// Power grid failure
// =============================================================================

pub(crate) fn cut_power(area: &Area, grid: &mut WorldGrid) {
    for cell in grid.cells_within(area.x, area.y, area.radius, area.metric) {
        let target = grid.get_mut(cell.x, cell.y);
        target.has_power = false;
        if let Some(building) = target.building.as_mut() {
            building.has_electricity = false;
        }
    }
}

// =============================================================================
// Industrial accident
// =============================================================================

/// Like an earthquake, but scaled by building category: industrial sites take
/// the brunt, homes the least.
pub(crate) fn industrial_damage<R: Rng + ?Sized>(
    area: &Area,
    grid: &mut WorldGrid,
    rng: &mut R,
    params: &HazardParams,
) {
    let base = params.industrial.base_damage * area.intensity;
    for cell in grid.cells_within(area.x, area.y, area.radius, area.metric) {
        if let Some(building) = grid.building_at_mut(cell.x, cell.y) {
            let multiplier = params.industrial_multiplier(building.zone_type);
            let damage = base
                * multiplier
                * area.falloff(cell.distance)
                * jitter(rng, params.damage_jitter);
            building.apply_damage(damage);
        }
    }
}
