use std::fmt::Write;

use bevy::prelude::*;
use rand::Rng;

use crate::grid::WorldGrid;
use crate::hazard_params::HazardParams;
use crate::hazards::{HazardEvent, HazardType, SpawnCause, SpawnedHazard};

/// Something that happened to the registry since the last drain.
#[derive(Debug, Clone, PartialEq)]
pub enum DisasterNotification {
    /// A hazard became active, whether triggered externally or spawned by another hazard.
    Started(HazardEvent),
    /// `source` ignited `spawned` on an orthogonal neighbor.
    FireSpread {
        source: HazardEvent,
        spawned: HazardEvent,
    },
    /// A hazard ran out its duration and was removed.
    Ended(HazardEvent),
}

/// What one call to [`DisasterRegistry::update`] did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DisasterTickSummary {
    pub ticked: usize,
    pub spawned: usize,
    pub ended: usize,
}

/// Owns every active hazard, in creation order.
///
/// Nothing is tracked besides the active list; counts and reports are computed
/// on demand. Notifications queue up until [`DisasterRegistry::drain_notifications`]
/// is called (the plugin does so every tick and forwards them as Bevy events).
#[derive(Resource, Default, Debug)]
pub struct DisasterRegistry {
    active_events: Vec<HazardEvent>,
    notifications: Vec<DisasterNotification>,
}

impl DisasterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a registry around already-running events, e.g. after a load.
    /// No `Started` notifications are raised for them.
    pub fn from_events(active_events: Vec<HazardEvent>) -> Self {
        Self {
            active_events,
            notifications: Vec::new(),
        }
    }

    /// Starts a new hazard and raises `Started` for it.
    pub fn trigger_disaster(
        &mut self,
        hazard_type: HazardType,
        intensity: f32,
        duration_ticks: u32,
        x: i32,
        y: i32,
        radius: f32,
    ) -> &HazardEvent {
        let event = HazardEvent::new(hazard_type, intensity, duration_ticks, x, y, radius);
        info!(
            "DISASTER: {} struck at ({}, {}) with radius {:.1}, intensity {:.2}, for {} ticks",
            hazard_type.name(),
            x,
            y,
            event.radius(),
            event.intensity(),
            duration_ticks,
        );
        self.activate(event)
    }

    fn activate(&mut self, event: HazardEvent) -> &HazardEvent {
        self.notifications
            .push(DisasterNotification::Started(event.clone()));
        let idx = self.active_events.len();
        self.active_events.push(event);
        &self.active_events[idx]
    }

    /// Advances every active hazard by one tick.
    ///
    /// Runs in two phases. First every event present when the call starts is
    /// updated in creation order, with any hazards it spawns collected on the
    /// side. Then finished events are removed and the spawned ones appended,
    /// so a hazard created during this tick is first updated on the next call.
    pub fn update<R: Rng + ?Sized>(
        &mut self,
        grid: &mut WorldGrid,
        rng: &mut R,
        params: &HazardParams,
    ) -> DisasterTickSummary {
        let mut summary = DisasterTickSummary::default();
        let mut pending: Vec<(HazardEvent, SpawnedHazard)> = Vec::new();
        let mut spawned: Vec<SpawnedHazard> = Vec::new();

        for event in self.active_events.iter_mut() {
            if !event.is_active() {
                continue;
            }
            event.update(grid, rng, params, &mut spawned);
            summary.ticked += 1;
            for child in spawned.drain(..) {
                pending.push((event.clone(), child));
            }
        }

        let notifications = &mut self.notifications;
        self.active_events.retain(|event| {
            if event.is_active() {
                return true;
            }
            let (x, y) = event.epicenter();
            info!(
                "DISASTER ENDED: {} at ({}, {}) has subsided.",
                event.hazard_type().name(),
                x,
                y,
            );
            notifications.push(DisasterNotification::Ended(event.clone()));
            summary.ended += 1;
            false
        });

        summary.spawned = pending.len();
        for (source, child) in pending {
            let (x, y) = child.event.epicenter();
            debug!(
                "{} at {:?} started {} at ({}, {})",
                source.hazard_type().name(),
                source.epicenter(),
                child.event.hazard_type().name(),
                x,
                y,
            );
            if child.cause == SpawnCause::FireSpread {
                self.notifications.push(DisasterNotification::FireSpread {
                    source,
                    spawned: child.event.clone(),
                });
            }
            self.activate(child.event);
        }

        summary
    }

    /// Drops every active hazard. Damage already dealt stays.
    ///
    /// Queued `Started` and `FireSpread` notifications are withdrawn, since
    /// the hazards they announce no longer exist. No `Ended` is raised for the
    /// dropped hazards; `Ended` notifications already queued are kept.
    pub fn stop_all_disasters(&mut self) {
        if !self.active_events.is_empty() {
            info!("Stopping {} active disasters", self.active_events.len());
        }
        self.active_events.clear();
        self.notifications
            .retain(|n| matches!(n, DisasterNotification::Ended(_)));
    }

    pub fn active_events(&self) -> &[HazardEvent] {
        &self.active_events
    }

    pub fn len(&self) -> usize {
        self.active_events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active_events.is_empty()
    }

    pub fn events_of_type(&self, hazard_type: HazardType) -> impl Iterator<Item = &HazardEvent> {
        self.active_events
            .iter()
            .filter(move |e| e.hazard_type() == hazard_type)
    }

    /// Active count per hazard type, omitting types with no active events.
    pub fn counts_by_type(&self) -> Vec<(HazardType, usize)> {
        HazardType::ALL
            .iter()
            .map(|&t| (t, self.events_of_type(t).count()))
            .filter(|&(_, count)| count > 0)
            .collect()
    }

    /// `"No active disasters."`, or the active count followed by one line per
    /// active hazard type.
    pub fn disaster_report(&self) -> String {
        if self.active_events.is_empty() {
            return "No active disasters.".to_string();
        }
        let mut report = format!("Active Disasters: {}", self.active_events.len());
        for (hazard_type, count) in self.counts_by_type() {
            let _ = write!(report, "\n{}: {}", hazard_type.name(), count);
        }
        report
    }

    pub fn pending_notifications(&self) -> &[DisasterNotification] {
        &self.notifications
    }

    pub fn drain_notifications(&mut self) -> Vec<DisasterNotification> {
        std::mem::take(&mut self.notifications)
    }
}
