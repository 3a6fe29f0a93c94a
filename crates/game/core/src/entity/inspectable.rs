//! Look-only objects: interacting shows the character's thoughts but never
//! collects anything.

use crate::event::GameEvent;
use crate::state::EntityId;

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Inspectable {
    pub name: String,
    pub thoughts: Vec<String>,
    /// Shown instead of `thoughts` from the second inspection on, when set.
    pub revisit_thoughts: Vec<String>,
    /// Whether the object may be inspected more than once.
    pub repeatable: bool,
    inspected: bool,
    inspecting: bool,
}

impl Inspectable {
    pub fn new(name: impl Into<String>, thoughts: Vec<String>) -> Self {
        Self {
            name: name.into(),
            thoughts,
            revisit_thoughts: Vec::new(),
            repeatable: true,
            inspected: false,
            inspecting: false,
        }
    }

    #[must_use]
    pub fn once(mut self) -> Self {
        self.repeatable = false;
        self
    }

    #[must_use]
    pub fn with_revisit_thoughts(mut self, lines: Vec<String>) -> Self {
        self.revisit_thoughts = lines;
        self
    }

    pub fn can_inspect(&self) -> bool {
        !self.inspecting && (self.repeatable || !self.inspected)
    }

    pub fn has_been_inspected(&self) -> bool {
        self.inspected
    }

    pub fn is_inspecting(&self) -> bool {
        self.inspecting
    }

    #[must_use]
    pub fn inspect(&mut self, entity: &EntityId) -> Vec<GameEvent> {
        if self.inspecting {
            return Vec::new();
        }
        if self.inspected && !self.repeatable {
            return vec![GameEvent::InspectionRefused {
                entity: entity.clone(),
            }];
        }

        self.inspecting = true;
        let lines = if self.inspected && !self.revisit_thoughts.is_empty() {
            self.revisit_thoughts.clone()
        } else {
            self.thoughts.clone()
        };
        vec![GameEvent::ObjectInspected {
            entity: entity.clone(),
            lines,
        }]
    }

    #[must_use]
    pub fn finish(&mut self, entity: &EntityId) -> Vec<GameEvent> {
        if !self.inspecting {
            return Vec::new();
        }
        self.inspecting = false;
        self.inspected = true;
        vec![GameEvent::ObjectInspectionFinished {
            entity: entity.clone(),
        }]
    }

    /// Stops a running inspection without counting it as seen.
    pub fn cancel(&mut self) {
        self.inspecting = false;
    }

    pub fn reset(&mut self) {
        self.inspected = false;
        self.inspecting = false;
    }

    pub fn prompt(&self) -> Option<String> {
        self.can_inspect()
            .then(|| format!("[E] Inspect {}", self.name))
    }
}
