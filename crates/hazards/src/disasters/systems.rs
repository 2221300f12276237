use bevy::prelude::*;
use rand::Rng;

use crate::grid::{CellType, WorldGrid};
use crate::hazard_params::HazardParams;
use crate::hazards::{roll, HazardEvent, HazardType};
use crate::sim_rng::SimRng;
use crate::TickCounter;

use super::registry::{DisasterNotification, DisasterRegistry};

/// Attempts at finding a land cell before a random disaster is abandoned.
const LOCATION_ATTEMPTS: u32 = 20;

// =============================================================================
// Events
// =============================================================================

/// Ask the registry to start a hazard on the next fixed tick.
#[derive(Event, Debug, Clone)]
pub struct TriggerDisasterRequest {
    pub hazard_type: HazardType,
    pub intensity: f32,
    pub duration_ticks: u32,
    pub x: i32,
    pub y: i32,
    pub radius: f32,
}

#[derive(Event, Debug, Clone)]
pub struct DisasterStarted(pub HazardEvent);

#[derive(Event, Debug, Clone)]
pub struct FireSpread {
    pub source: HazardEvent,
    pub spawned: HazardEvent,
}

#[derive(Event, Debug, Clone)]
pub struct DisasterEnded(pub HazardEvent);

// =============================================================================
// Systems
// =============================================================================

/// Occasionally strikes a random land cell with a random hazard.
/// Only runs when random disasters are enabled in [`HazardParams`].
pub fn trigger_random_disaster(
    tick: Res<TickCounter>,
    params: Res<HazardParams>,
    grid: Option<Res<WorldGrid>>,
    mut rng: ResMut<SimRng>,
    mut registry: ResMut<DisasterRegistry>,
) {
    let random = &params.random;
    if !random.enabled || random.check_interval == 0 || tick.0 % random.check_interval != 0 {
        return;
    }
    let Some(grid) = grid else {
        return;
    };
    if grid.width == 0 || grid.height == 0 || !roll(&mut rng.0, random.chance) {
        return;
    }

    let hazard_type = HazardType::ALL[rng.0.gen_range(0..HazardType::ALL.len())];
    for _ in 0..LOCATION_ATTEMPTS {
        let x = rng.0.gen_range(0..grid.width);
        let y = rng.0.gen_range(0..grid.height);
        if grid.get(x, y).cell_type != CellType::Water {
            registry.trigger_disaster(
                hazard_type,
                random.intensity,
                random.duration_ticks,
                x as i32,
                y as i32,
                random.radius,
            );
            return;
        }
    }
}

pub fn handle_trigger_requests(
    mut requests: EventReader<TriggerDisasterRequest>,
    mut registry: ResMut<DisasterRegistry>,
) {
    for request in requests.read() {
        registry.trigger_disaster(
            request.hazard_type,
            request.intensity,
            request.duration_ticks,
            request.x,
            request.y,
            request.radius,
        );
    }
}

/// Advances every active hazard once. Skips while no grid is loaded.
pub fn tick_disasters(
    mut registry: ResMut<DisasterRegistry>,
    grid: Option<ResMut<WorldGrid>>,
    mut rng: ResMut<SimRng>,
    params: Res<HazardParams>,
) {
    let Some(mut grid) = grid else {
        return;
    };
    if registry.is_empty() {
        return;
    }
    let summary = registry.update(&mut grid, &mut rng.0, &params);
    if summary.spawned > 0 || summary.ended > 0 {
        debug!(
            "Disaster tick: {} updated, {} spawned, {} ended",
            summary.ticked, summary.spawned, summary.ended
        );
    }
}

/// Re-publishes queued registry notifications as Bevy events.
pub fn forward_disaster_notifications(
    mut registry: ResMut<DisasterRegistry>,
    mut started: EventWriter<DisasterStarted>,
    mut spread: EventWriter<FireSpread>,
    mut ended: EventWriter<DisasterEnded>,
) {
    if registry.pending_notifications().is_empty() {
        return;
    }
    for notification in registry.drain_notifications() {
        match notification {
            DisasterNotification::Started(event) => {
                started.send(DisasterStarted(event));
            }
            DisasterNotification::FireSpread { source, spawned } => {
                spread.send(FireSpread { source, spawned });
            }
            DisasterNotification::Ended(event) => {
                ended.send(DisasterEnded(event));
            }
        }
    }
}

// =============================================================================
// Plugin
// =============================================================================

pub struct DisastersPlugin;

impl Plugin for DisastersPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DisasterRegistry>()
            .init_resource::<HazardParams>()
            .init_resource::<SimRng>()
            .init_resource::<TickCounter>()
            .add_event::<TriggerDisasterRequest>()
            .add_event::<DisasterStarted>()
            .add_event::<FireSpread>()
            .add_event::<DisasterEnded>()
            .add_systems(
                FixedUpdate,
                (
                    trigger_random_disaster,
                    handle_trigger_requests,
                    tick_disasters,
                    forward_disaster_notifications,
                )
                    .chain()
                    .after(crate::advance_tick_counter),
            );
    }
}
