use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::buildings::Building;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CellType {
    #[default]
    Grass,
    Water,
    Road,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ZoneType {
    #[default]
    None,
    ResidentialLow,
    ResidentialHigh,
    CommercialLow,
    CommercialHigh,
    Industrial,
    Office,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum TreeType {
    #[default]
    None,
    Oak,
    Pine,
    Palm,
}

/// How distance from an epicenter is measured when selecting affected cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DistanceMetric {
    /// Straight-line distance; produces a disc.
    Euclidean,
    /// max(|dx|, |dy|); produces a square.
    Chebyshev,
}

impl DistanceMetric {
    pub fn distance(self, dx: i64, dy: i64) -> f32 {
        match self {
            DistanceMetric::Euclidean => (dx as f64).hypot(dy as f64) as f32,
            DistanceMetric::Chebyshev => dx.abs().max(dy.abs()) as f32,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Cell {
    pub cell_type: CellType,
    pub zone: ZoneType,
    pub tree_count: u8,
    pub tree_type: TreeType,
    pub has_park: bool,
    pub has_power: bool,
    pub has_water: bool,
    pub building: Option<Building>,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            cell_type: CellType::Grass,
            zone: ZoneType::None,
            tree_count: 0,
            tree_type: TreeType::None,
            has_park: false,
            has_power: false,
            has_water: false,
            building: None,
        }
    }
}

impl Cell {
    /// A cell can burn if it holds a building or any trees.
    pub fn is_flammable(&self) -> bool {
        self.building.is_some() || self.tree_count > 0
    }

    pub fn clear_vegetation(&mut self) {
        self.tree_count = 0;
        self.tree_type = TreeType::None;
        self.has_park = false;
    }
}

/// A cell selected by [`WorldGrid::cells_within`], with its distance from the center.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AffectedCell {
    pub x: usize,
    pub y: usize,
    pub distance: f32,
}

#[derive(Resource, Clone, Serialize, Deserialize)]
pub struct WorldGrid {
    pub cells: Vec<Cell>,
    pub width: usize,
    pub height: usize,
}

impl WorldGrid {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            cells: vec![Cell::default(); width * height],
            width,
            height,
        }
    }

    #[inline]
    pub fn index(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    #[inline]
    pub fn in_bounds(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height
    }

    /// Converts signed coordinates to grid coordinates, or `None` when off the map.
    #[inline]
    pub fn checked_coords(&self, x: i32, y: i32) -> Option<(usize, usize)> {
        if x < 0 || y < 0 {
            return None;
        }
        let (ux, uy) = (x as usize, y as usize);
        self.in_bounds(ux, uy).then_some((ux, uy))
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> &Cell {
        &self.cells[self.index(x, y)]
    }

    #[inline]
    pub fn get_mut(&mut self, x: usize, y: usize) -> &mut Cell {
        let idx = self.index(x, y);
        &mut self.cells[idx]
    }

    pub fn get_checked(&self, x: i32, y: i32) -> Option<&Cell> {
        let (ux, uy) = self.checked_coords(x, y)?;
        Some(self.get(ux, uy))
    }

    pub fn building_at(&self, x: usize, y: usize) -> Option<&Building> {
        self.get(x, y).building.as_ref()
    }

    pub fn building_at_mut(&mut self, x: usize, y: usize) -> Option<&mut Building> {
        self.get_mut(x, y).building.as_mut()
    }

    /// Places a building and marks the cell with its zone.
    pub fn place_building(&mut self, x: usize, y: usize, building: Building) {
        if !self.in_bounds(x, y) {
            return;
        }
        let cell = self.get_mut(x, y);
        cell.zone = building.zone_type;
        cell.has_power = building.has_electricity;
        cell.has_water = building.has_water;
        cell.building = Some(building);
    }

    /// All in-bounds cells whose distance from `(cx, cy)` is at most `radius`.
    ///
    /// The center may lie off the map; only the part of the area that overlaps
    /// the grid is returned, in row-major order.
    pub fn cells_within(
        &self,
        cx: i32,
        cy: i32,
        radius: f32,
        metric: DistanceMetric,
    ) -> Vec<AffectedCell> {
        let mut result = Vec::new();
        if self.width == 0 || self.height == 0 || radius.is_nan() || radius < 0.0 {
            return result;
        }

        let reach = radius.floor() as i64;
        let (cx, cy) = (cx as i64, cy as i64);
        let x0 = cx.saturating_sub(reach).max(0);
        let y0 = cy.saturating_sub(reach).max(0);
        let x1 = cx.saturating_add(reach).min(self.width as i64 - 1);
        let y1 = cy.saturating_add(reach).min(self.height as i64 - 1);

        for y in y0..=y1 {
            for x in x0..=x1 {
                let distance = metric.distance(x - cx, y - cy);
                if distance <= radius {
                    result.push(AffectedCell {
                        x: x as usize,
                        y: y as usize,
                        distance,
                    });
                }
            }
        }
        result
    }
}
