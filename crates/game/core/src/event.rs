//! Events emitted by progression state transitions.
//!
//! Every successful (or rejected-but-user-visible) transition produces one or
//! more [`GameEvent`]s. Silent no-ops such as re-collecting an item emit
//! nothing. The runtime relays these events through the
//! [`ProgressCoordinator`](crate::ProgressCoordinator) and publishes them to
//! observers.

use crate::state::{EntityId, ItemId};

/// Observable outcome of a state transition.
#[derive(Clone, Debug, PartialEq, Eq, strum::IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GameEvent {
    /// An item was recorded in the registry. `count` is the collected total.
    ItemCollected { item: ItemId, count: u32 },

    /// The configured number of items has been collected. Latched: fires once
    /// per session (until progress is reset).
    SetComplete { count: u32 },

    /// A pickup started its pre-collection narrative beat.
    InspectionStarted { entity: EntityId, lines: Vec<String> },

    /// A pickup's pre-collection beat finished; the next interaction collects.
    InspectionFinished { entity: EntityId },

    /// A pickup's beat was interrupted; the pickup is available again.
    InspectionCancelled { entity: EntityId },

    /// A pickup reached its terminal state.
    PickupCollected {
        entity: EntityId,
        item: ItemId,
        after_lines: Vec<String>,
    },

    /// A look-only object started showing its thoughts.
    ObjectInspected { entity: EntityId, lines: Vec<String> },

    /// A look-only object finished showing its thoughts.
    ObjectInspectionFinished { entity: EntityId },

    /// A once-only object was inspected again.
    InspectionRefused { entity: EntityId },

    /// The player engaged a credential-gated container.
    CredentialRequested { container: EntityId },

    /// A submitted credential did not match.
    CredentialRejected { container: EntityId },

    /// A prerequisite-gated container was opened without its item.
    PrerequisiteMissing {
        container: EntityId,
        needs: ItemId,
        prompt: String,
    },

    /// A container took its `Locked -> Unlocked` edge.
    ContainerUnlocked { container: EntityId },

    /// A container was removed from the world after unlocking.
    ContainerConsumed { container: EntityId },

    /// An entity became visible and interactable.
    EntityRevealed { entity: EntityId },

    /// An entity left the world (hidden and no longer interactable).
    EntityHidden { entity: EntityId },

    /// A short timed message should be displayed.
    NoticeRequested { text: String, duration_ms: u32 },

    /// A keyed door was used without its key.
    DoorLocked { door: EntityId, needs: ItemId },

    /// A door changed between open and closed.
    DoorToggled { door: EntityId, open: bool },

    /// An exit asked for the next scene. Fires once per exit.
    ExitRequested { exit: EntityId, scene: String },

    /// A progress watcher saw all of its items collected.
    WatcherCompleted { watcher: String },

    /// All progression was cleared (new game boundary).
    ProgressReset,
}

impl GameEvent {
    /// Returns the variant name, useful for logs and metrics.
    pub fn kind(&self) -> &'static str {
        self.into()
    }

    /// Returns true for events that belong to the collection/completion flow.
    pub fn is_progress(&self) -> bool {
        matches!(
            self,
            Self::ItemCollected { .. }
                | Self::SetComplete { .. }
                | Self::PickupCollected { .. }
                | Self::WatcherCompleted { .. }
                | Self::ProgressReset
        )
    }

    /// Returns true for container, door and exit events.
    pub fn is_puzzle(&self) -> bool {
        matches!(
            self,
            Self::CredentialRequested { .. }
                | Self::CredentialRejected { .. }
                | Self::PrerequisiteMissing { .. }
                | Self::ContainerUnlocked { .. }
                | Self::ContainerConsumed { .. }
                | Self::DoorLocked { .. }
                | Self::DoorToggled { .. }
                | Self::ExitRequested { .. }
        )
    }
}
