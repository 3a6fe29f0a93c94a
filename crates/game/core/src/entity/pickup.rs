//! Collectible world objects.
//!
//! A pickup walks `Available -> PendingInspection -> Collected` when it has a
//! pre-collection beat, or `Available -> Collected` otherwise. `Collected` is
//! terminal and reached at most once.

use crate::event::GameEvent;
use crate::state::{CollectionRegistry, EntityId, ItemId};

/// Lifecycle phase of a [`Pickup`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PickupPhase {
    Available,
    /// The pre-collection beat was started. `beat_finished` flips when the
    /// narrative display reports completion; only then does the next
    /// interaction collect.
    PendingInspection { beat_finished: bool },
    Collected,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Pickup {
    pub item: ItemId,
    pub display_name: String,
    /// Lines shown on the first interaction, before anything is collected.
    pub before_lines: Vec<String>,
    /// Lines shown right after collection.
    pub after_lines: Vec<String>,
    phase: PickupPhase,
}

impl Pickup {
    pub fn new(item: ItemId, display_name: impl Into<String>) -> Self {
        Self {
            item,
            display_name: display_name.into(),
            before_lines: Vec::new(),
            after_lines: Vec::new(),
            phase: PickupPhase::Available,
        }
    }

    /// Configures a pre-collection beat.
    #[must_use]
    pub fn with_before_lines(mut self, lines: Vec<String>) -> Self {
        self.before_lines = lines;
        self
    }

    /// Configures a post-collection beat.
    #[must_use]
    pub fn with_after_lines(mut self, lines: Vec<String>) -> Self {
        self.after_lines = lines;
        self
    }

    pub fn phase(&self) -> PickupPhase {
        self.phase
    }

    pub fn is_collected(&self) -> bool {
        matches!(self.phase, PickupPhase::Collected)
    }

    /// Handles an interaction aimed at this pickup.
    #[must_use]
    pub fn request_interact(
        &mut self,
        entity: &EntityId,
        registry: &mut CollectionRegistry,
    ) -> Vec<GameEvent> {
        match self.phase {
            PickupPhase::Collected => {
                tracing::trace!(%entity, "pickup already collected");
                Vec::new()
            }
            PickupPhase::PendingInspection {
                beat_finished: false,
            } => {
                tracing::trace!(%entity, "inspection beat still running");
                Vec::new()
            }
            PickupPhase::Available if !self.before_lines.is_empty() => {
                self.phase = PickupPhase::PendingInspection {
                    beat_finished: false,
                };
                vec![GameEvent::InspectionStarted {
                    entity: entity.clone(),
                    lines: self.before_lines.clone(),
                }]
            }
            PickupPhase::Available
            | PickupPhase::PendingInspection {
                beat_finished: true,
            } => self.collect(entity, registry),
        }
    }

    /// Marks the pre-collection beat as shown.
    #[must_use]
    pub fn finish_inspection(&mut self, entity: &EntityId) -> Vec<GameEvent> {
        match self.phase {
            PickupPhase::PendingInspection {
                beat_finished: false,
            } => {
                self.phase = PickupPhase::PendingInspection {
                    beat_finished: true,
                };
                vec![GameEvent::InspectionFinished {
                    entity: entity.clone(),
                }]
            }
            _ => Vec::new(),
        }
    }

    /// Abandons a running pre-collection beat.
    ///
    /// The pickup returns to `Available` with its beat unshown; it is never
    /// collected by an interruption.
    #[must_use]
    pub fn cancel_inspection(&mut self, entity: &EntityId) -> Vec<GameEvent> {
        match self.phase {
            PickupPhase::PendingInspection {
                beat_finished: false,
            } => {
                self.phase = PickupPhase::Available;
                vec![GameEvent::InspectionCancelled {
                    entity: entity.clone(),
                }]
            }
            _ => Vec::new(),
        }
    }

    /// Returns the pickup to `Available` (new game).
    pub fn reset(&mut self) {
        self.phase = PickupPhase::Available;
    }

    /// Puts the pickup straight into its terminal state without touching the
    /// registry. Used when a world is loaded after its item was collected.
    pub(crate) fn restore_collected(&mut self) {
        self.phase = PickupPhase::Collected;
    }

    pub fn prompt(&self) -> Option<String> {
        match self.phase {
            PickupPhase::Collected
            | PickupPhase::PendingInspection {
                beat_finished: false,
            } => None,
            _ => Some(format!("[E] Pick up {}", self.display_name)),
        }
    }

    fn collect(&mut self, entity: &EntityId, registry: &mut CollectionRegistry) -> Vec<GameEvent> {
        self.phase = PickupPhase::Collected;
        tracing::debug!(%entity, item = %self.item, "pickup collected");

        let mut events = registry.collect_item(&self.item);
        events.push(GameEvent::PickupCollected {
            entity: entity.clone(),
            item: self.item.clone(),
            after_lines: self.after_lines.clone(),
        });
        events
    }
}
