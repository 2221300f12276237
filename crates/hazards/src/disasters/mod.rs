//! Active disaster bookkeeping and the Bevy systems that drive it.

mod registry;
mod systems;

pub use registry::{DisasterNotification, DisasterRegistry, DisasterTickSummary};
pub use systems::{
    forward_disaster_notifications, handle_trigger_requests, tick_disasters,
    trigger_random_disaster, DisasterEnded, DisasterStarted, DisastersPlugin, FireSpread,
    TriggerDisasterRequest,
};
