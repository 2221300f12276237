//! # TestCity: headless integration test harness
//!
//! Wraps `bevy::app::App` + `HazardSimulationPlugin` so disasters can be driven
//! tick by tick without a window or renderer.

use bevy::app::App;
use bevy::prelude::*;
use std::collections::BTreeMap;

use crate::buildings::Building;
use crate::config::{GRID_HEIGHT, GRID_WIDTH};
use crate::disasters::{
    DisasterEnded, DisasterRegistry, DisasterStarted, FireSpread, TriggerDisasterRequest,
};
use crate::grid::{TreeType, WorldGrid};
use crate::hazard_params::HazardParams;
use crate::hazards::{HazardEvent, HazardType};
use crate::sim_rng::SimRng;
use crate::{HazardSimulationPlugin, SaveableRegistry};

/// A headless Bevy App wrapping `HazardSimulationPlugin` for integration testing.
pub struct TestCity {
    app: App,
}

impl TestCity {
    // -----------------------------------------------------------------------
    // Constructors
    // -----------------------------------------------------------------------

    /// Create an empty 256x256 grass grid with every resource at its default.
    pub fn new() -> Self {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.add_plugins(HazardSimulationPlugin);
        app.insert_resource(WorldGrid::new(GRID_WIDTH, GRID_HEIGHT));

        // Run one update so Startup systems execute.
        app.update();

        Self { app }
    }

    // -----------------------------------------------------------------------
    // World Setup (builder pattern, consumes and returns Self)
    // -----------------------------------------------------------------------

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.app
            .world_mut()
            .insert_resource(SimRng::from_seed_u64(seed));
        self
    }

    pub fn with_params(mut self, params: HazardParams) -> Self {
        self.app.world_mut().insert_resource(params);
        self
    }

    pub fn with_building(mut self, x: usize, y: usize, building: Building) -> Self {
        self.app
            .world_mut()
            .resource_mut::<WorldGrid>()
            .place_building(x, y, building);
        self
    }

    pub fn with_trees(mut self, x: usize, y: usize, count: u8) -> Self {
        {
            let mut grid = self.app.world_mut().resource_mut::<WorldGrid>();
            let cell = grid.get_mut(x, y);
            cell.tree_count = count;
            cell.tree_type = TreeType::Oak;
        }
        self
    }

    pub fn with_park(mut self, x: usize, y: usize) -> Self {
        self.app
            .world_mut()
            .resource_mut::<WorldGrid>()
            .get_mut(x, y)
            .has_park = true;
        self
    }

    // -----------------------------------------------------------------------
    // Actions
    // -----------------------------------------------------------------------

    /// Queue a trigger request; it is handled on the next tick.
    pub fn trigger(
        &mut self,
        hazard_type: HazardType,
        intensity: f32,
        duration_ticks: u32,
        x: i32,
        y: i32,
        radius: f32,
    ) {
        self.app.world_mut().send_event(TriggerDisasterRequest {
            hazard_type,
            intensity,
            duration_ticks,
            x,
            y,
            radius,
        });
    }

    /// Run the fixed-timestep schedule `n` times. Driving `FixedUpdate`
    /// directly keeps the number of simulation ticks independent of wall time.
    pub fn tick(&mut self, n: u32) {
        for _ in 0..n {
            self.app.world_mut().run_schedule(FixedUpdate);
        }
    }

    pub fn save(&self) -> BTreeMap<String, Vec<u8>> {
        let world = self.app.world();
        world.resource::<SaveableRegistry>().save_all(world)
    }

    pub fn load(&mut self, extensions: &BTreeMap<String, Vec<u8>>) {
        self.app
            .world_mut()
            .resource_scope(|world, registry: Mut<SaveableRegistry>| {
                registry.load_all(world, extensions);
            });
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    pub fn world_mut(&mut self) -> &mut World {
        self.app.world_mut()
    }

    pub fn resource<T: Resource>(&self) -> &T {
        self.app.world().resource::<T>()
    }

    pub fn grid(&self) -> &WorldGrid {
        self.resource::<WorldGrid>()
    }

    pub fn registry(&self) -> &DisasterRegistry {
        self.resource::<DisasterRegistry>()
    }

    pub fn building(&self, x: usize, y: usize) -> Option<&Building> {
        self.grid().building_at(x, y)
    }

    fn events<E: Event + Clone>(&self) -> Vec<E> {
        self.app
            .world()
            .resource::<Events<E>>()
            .iter_current_update_events()
            .cloned()
            .collect()
    }

    /// Every hazard started since the harness was built.
    pub fn started(&self) -> Vec<HazardEvent> {
        self.events::<DisasterStarted>()
            .into_iter()
            .map(|e| e.0)
            .collect()
    }

    pub fn fire_spreads(&self) -> Vec<FireSpread> {
        self.events::<FireSpread>()
    }

    pub fn ended(&self) -> Vec<HazardEvent> {
        self.events::<DisasterEnded>()
            .into_iter()
            .map(|e| e.0)
            .collect()
    }
}

impl Default for TestCity {
    fn default() -> Self {
        Self::new()
    }
}
