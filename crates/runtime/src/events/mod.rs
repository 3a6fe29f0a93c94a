//! Topic-based event bus for runtime events.
//!
//! Game events and the directives they produce are published to topics, and
//! observers (loggers, HUDs, tests) subscribe only to the topics they need.

mod bus;

pub use bus::{Event, EventBus, Topic};
