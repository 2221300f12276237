pub const GRID_WIDTH: usize = 256;
pub const GRID_HEIGHT: usize = 256;

/// Structural condition of a freshly built, undamaged building.
pub const MAX_CONDITION: f32 = 100.0;
