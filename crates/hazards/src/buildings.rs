use serde::{Deserialize, Serialize};

use crate::config::MAX_CONDITION;
use crate::grid::ZoneType;

/// A building standing on a grid cell.
///
/// `condition` is structural health in `0.0..=MAX_CONDITION`. Hazards only ever
/// lower it, through [`Building::apply_damage`], which floors it at zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Building {
    pub zone_type: ZoneType,
    pub condition: f32,
    pub has_electricity: bool,
    pub has_gas: bool,
    pub has_water: bool,
    pub has_sewage: bool,
}

impl Building {
    /// A fully serviced building in perfect condition.
    pub fn new(zone_type: ZoneType) -> Self {
        Self {
            zone_type,
            condition: MAX_CONDITION,
            has_electricity: true,
            has_gas: true,
            has_water: true,
            has_sewage: true,
        }
    }

    pub fn with_gas(mut self, has_gas: bool) -> Self {
        self.has_gas = has_gas;
        self
    }

    pub fn with_condition(mut self, condition: f32) -> Self {
        self.condition = condition.clamp(0.0, MAX_CONDITION);
        self
    }

    /// Lowers condition by `amount`, never below zero. Returns the damage actually dealt.
    pub fn apply_damage(&mut self, amount: f32) -> f32 {
        if amount.is_nan() || amount <= 0.0 {
            return 0.0;
        }
        let before = self.condition;
        self.condition = (self.condition - amount).max(0.0);
        before - self.condition
    }

    pub fn is_destroyed(&self) -> bool {
        self.condition <= 0.0
    }
}
