//! World construction errors.
//!
//! Raised while assembling a [`WorldState`](super::WorldState) or validating
//! coordinator relays against it. Runtime progression never produces these.

use crate::error::{ErrorSeverity, GameError};
use crate::state::{EntityId, ItemId};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WorldError {
    /// Two entities share the same id.
    #[error("entity {entity} is defined more than once")]
    DuplicateEntity { entity: EntityId },

    /// Two pickups grant the same item.
    #[error("item {item} is granted by both {first} and {second}")]
    DuplicateItem {
        item: ItemId,
        first: EntityId,
        second: EntityId,
    },

    /// Two watchers share the same name.
    #[error("progress watcher {watcher} is defined more than once")]
    DuplicateWatcher { watcher: String },

    /// An effect or relay points at an entity that does not exist.
    #[error("{source_name} references unknown entity {target}")]
    UnknownTarget {
        source_name: String,
        target: EntityId,
    },

    /// A credential-gated container has an empty secret.
    #[error("container {container} has an empty secret")]
    EmptySecret { container: EntityId },
}

impl GameError for WorldError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::DuplicateEntity { .. } => "WORLD_DUPLICATE_ENTITY",
            Self::DuplicateItem { .. } => "WORLD_DUPLICATE_ITEM",
            Self::DuplicateWatcher { .. } => "WORLD_DUPLICATE_WATCHER",
            Self::UnknownTarget { .. } => "WORLD_UNKNOWN_TARGET",
            Self::EmptySecret { .. } => "WORLD_EMPTY_SECRET",
        }
    }
}
