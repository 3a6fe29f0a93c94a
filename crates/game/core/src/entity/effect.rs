use crate::state::EntityId;

/// Side effect applied to the world when a container unlocks or a watcher
/// completes. Effects run exactly once, on the edge that produced them.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UnlockEffect {
    /// Make an inert entity visible and interactable.
    Reveal(EntityId),
    /// Remove an entity from the world.
    Hide(EntityId),
    /// Show a timed notice.
    Notice { text: String, duration_ms: u32 },
}

impl UnlockEffect {
    /// Entity the effect acts on, if any.
    pub fn target(&self) -> Option<&EntityId> {
        match self {
            Self::Reveal(entity) | Self::Hide(entity) => Some(entity),
            Self::Notice { .. } => None,
        }
    }
}
