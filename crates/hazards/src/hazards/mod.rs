mod effects;
mod event;
mod types;

pub(crate) use effects::roll;
pub use event::HazardEvent;
pub use types::{HazardKind, HazardSpawner, HazardType, SpawnCause, SpawnedHazard};
