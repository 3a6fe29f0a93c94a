use crate::event::GameEvent;
use crate::state::{CollectionRegistry, EntityId, ItemId};

/// A door that toggles open and closed, optionally requiring a key item.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Door {
    pub name: String,
    pub requires: Option<ItemId>,
    open: bool,
}

impl Door {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            requires: None,
            open: false,
        }
    }

    #[must_use]
    pub fn with_key(mut self, key: ItemId) -> Self {
        self.requires = Some(key);
        self
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Returns the key this door is still waiting for.
    pub fn missing_key<'a>(&'a self, registry: &CollectionRegistry) -> Option<&'a ItemId> {
        self.requires
            .as_ref()
            .filter(|key| !registry.is_collected(key))
    }

    #[must_use]
    pub fn interact(&mut self, door: &EntityId, registry: &CollectionRegistry) -> Vec<GameEvent> {
        if let Some(key) = self.missing_key(registry) {
            return vec![GameEvent::DoorLocked {
                door: door.clone(),
                needs: key.clone(),
            }];
        }

        self.open = !self.open;
        vec![GameEvent::DoorToggled {
            door: door.clone(),
            open: self.open,
        }]
    }

    pub fn prompt(&self, registry: &CollectionRegistry) -> String {
        match self.missing_key(registry) {
            Some(key) => format!("Locked! Requires {key}"),
            None if self.open => "[E] Close door".to_string(),
            None => "[E] Open door".to_string(),
        }
    }

    pub fn reset(&mut self) {
        self.open = false;
    }
}
