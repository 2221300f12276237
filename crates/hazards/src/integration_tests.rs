//! Integration tests for the hazard simulation using the `TestCity` harness.
//!
//! These tests spin up a headless Bevy App with `HazardSimulationPlugin` and
//! verify disasters end to end: requests, ticking, cascades and save/load.


use crate::config::{GRID_HEIGHT, GRID_WIDTH};
use crate::disasters::DisasterRegistry;
use crate::test_harness::TestCity;
use crate::TickCounter;

// ===========================================================================
// Harness bootstrap tests
// ===========================================================================

#[test]
fn empty_city_has_no_disasters() {
    let city = TestCity::new();
    assert!(city.registry().is_empty());
    assert_eq!(
        city.resource::<DisasterRegistry>().disaster_report(),
        "No active disasters."
    );
}

#[test]
fn empty_city_has_full_size_grid() {
    let city = TestCity::new();
    assert_eq!(city.grid().width, GRID_WIDTH);
    assert_eq!(city.grid().height, GRID_HEIGHT);
}

#[test]
fn tick_advances_tick_counter() {
    let mut city = TestCity::new();
    let before = city.resource::<TickCounter>().0;
    city.tick(5);
    assert_eq!(city.resource::<TickCounter>().0, before + 5);
}

#[test]
fn idle_city_raises_no_events() {
    let mut city = TestCity::new();
    city.tick(200);
    assert!(city.registry().is_empty(), "random disasters are off by default");
    assert!(city.started().is_empty());
    assert!(city.ended().is_empty());
}
