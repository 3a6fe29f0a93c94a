use crate::event::GameEvent;
use crate::state::EntityId;

/// Interactable that sends the player to the next scene.
///
/// Latched: only the first interaction requests the transition.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Exit {
    pub name: String,
    pub scene: String,
    loading: bool,
}

impl Exit {
    pub fn new(name: impl Into<String>, scene: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            scene: scene.into(),
            loading: false,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    #[must_use]
    pub fn interact(&mut self, exit: &EntityId) -> Vec<GameEvent> {
        if self.loading {
            return Vec::new();
        }
        self.loading = true;
        vec![GameEvent::ExitRequested {
            exit: exit.clone(),
            scene: self.scene.clone(),
        }]
    }

    pub fn prompt(&self) -> Option<String> {
        (!self.loading).then(|| format!("[E] {}", self.name))
    }

    pub fn reset(&mut self) {
        self.loading = false;
    }
}
