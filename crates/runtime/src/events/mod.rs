//! Topic-based event bus for runtime events.
//!
//! The match worker republishes everything the orchestrator reports, split by
//! topic so a HUD can follow hits without parsing phase changes.

mod bus;
mod types;

pub use bus::{Event, EventBus, Topic};
pub use types::StateEvent;
