//! Identifier and flag types shared across the progression state.

use core::fmt;

/// Unique identifier of a collectible item (e.g. `"P1"`, `"SafeKey"`).
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ItemId(pub String);

impl ItemId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for ItemId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for ItemId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Unique key of an entity placed in the world (pickup, container, door...).
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct EntityId(pub String);

impl EntityId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for EntityId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for EntityId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

bitflags::bitflags! {
    /// Presence of an entity in the world.
    ///
    /// An entity must be both visible and interactable to be a valid
    /// interaction target. Collected pickups drop both flags at once, while
    /// the host may keep the underlying object alive until feedback finishes.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct EntityFlags: u8 {
        const VISIBLE = 0b0000_0001;
        const INTERACTABLE = 0b0000_0010;
        const ACTIVE = Self::VISIBLE.bits() | Self::INTERACTABLE.bits();
    }
}

impl Default for EntityFlags {
    fn default() -> Self {
        Self::ACTIVE
    }
}

/// A collectible tracked by the [`CollectionRegistry`](super::CollectionRegistry).
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Item {
    pub id: ItemId,
    pub display_name: String,
    pub collected: bool,
}

impl Item {
    pub fn new(id: ItemId, display_name: impl Into<String>) -> Self {
        Self {
            id,
            display_name: display_name.into(),
            collected: false,
        }
    }
}
