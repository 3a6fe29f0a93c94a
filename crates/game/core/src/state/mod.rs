//! Canonical progression state.
//!
//! [`GameState`] pairs the session-scoped [`CollectionRegistry`] with the
//! scene-scoped [`WorldState`]. Mutations go through
//! [`GameEngine`](crate::engine::GameEngine).

mod error;
mod registry;
mod types;
mod world;

pub use error::WorldError;
pub use registry::CollectionRegistry;
pub use types::{EntityFlags, EntityId, Item, ItemId};
pub use world::{WorldBuilder, WorldState};

use crate::config::GameConfig;

/// Complete progression state of one game session.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameState {
    pub registry: CollectionRegistry,
    pub world: WorldState,
}

impl GameState {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            registry: CollectionRegistry::new(config.required_count),
            world: WorldState::default(),
        }
    }

    /// Interaction prompt for `entity`, or `None` when it is unknown, hidden,
    /// or has nothing left to offer.
    pub fn prompt_for(&self, entity: &EntityId) -> Option<String> {
        self.world.entity(entity)?.prompt(&self.registry)
    }
}
