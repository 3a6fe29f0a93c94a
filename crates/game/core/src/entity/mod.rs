//! World entities and their interaction state machines.
//!
//! Each entity kind owns its own transition rules; [`Entity`] pairs a kind
//! with its presence flags so hit-testing can exclude hidden or spent
//! objects without knowing the kind.

mod container;
mod door;
mod effect;
mod exit;
mod inspectable;
mod pickup;

pub use container::{ContainerOutcome, ContainerState, GatedContainer, Gate};
pub use door::Door;
pub use effect::UnlockEffect;
pub use exit::Exit;
pub use inspectable::Inspectable;
pub use pickup::{Pickup, PickupPhase};

use crate::state::{CollectionRegistry, EntityFlags, EntityId};

/// Behavior attached to an entity.
#[derive(Clone, Debug, PartialEq, Eq, strum::IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EntityKind {
    Pickup(Pickup),
    Inspectable(Inspectable),
    Container(GatedContainer),
    Door(Door),
    Exit(Exit),
    /// Inert scenery that effects may reveal or hide (models, props).
    Prop { name: String },
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Entity {
    pub id: EntityId,
    pub flags: EntityFlags,
    pub kind: EntityKind,
    /// Authored presence, restored by [`reset`](Self::reset).
    #[cfg_attr(feature = "serde", serde(default))]
    starts_hidden: bool,
}

impl Entity {
    pub fn new(id: impl Into<EntityId>, kind: EntityKind) -> Self {
        Self {
            id: id.into(),
            flags: EntityFlags::ACTIVE,
            kind,
            starts_hidden: false,
        }
    }

    /// Starts the entity outside the world until an effect reveals it.
    #[must_use]
    pub fn hidden(mut self) -> Self {
        self.flags = EntityFlags::empty();
        self.starts_hidden = true;
        self
    }

    /// Returns the entity to its authored state: presence as built, every
    /// kind back in its initial phase.
    pub fn reset(&mut self) {
        self.flags = if self.starts_hidden {
            EntityFlags::empty()
        } else {
            EntityFlags::ACTIVE
        };
        match &mut self.kind {
            EntityKind::Pickup(pickup) => pickup.reset(),
            EntityKind::Inspectable(inspectable) => inspectable.reset(),
            EntityKind::Container(container) => container.reset(),
            EntityKind::Door(door) => door.reset(),
            EntityKind::Exit(exit) => exit.reset(),
            EntityKind::Prop { .. } => {}
        }
    }

    pub fn is_interactable(&self) -> bool {
        self.flags.contains(EntityFlags::ACTIVE)
    }

    pub fn is_visible(&self) -> bool {
        self.flags.contains(EntityFlags::VISIBLE)
    }

    pub fn kind_name(&self) -> &'static str {
        (&self.kind).into()
    }

    /// Interaction prompt for this entity, or `None` when it cannot be used.
    pub fn prompt(&self, registry: &CollectionRegistry) -> Option<String> {
        if !self.is_interactable() {
            return None;
        }
        match &self.kind {
            EntityKind::Pickup(pickup) => pickup.prompt(),
            EntityKind::Inspectable(inspectable) => inspectable.prompt(),
            EntityKind::Container(container) => container.prompt(),
            EntityKind::Door(door) => Some(door.prompt(registry)),
            EntityKind::Exit(exit) => exit.prompt(),
            EntityKind::Prop { .. } => None,
        }
    }
}
