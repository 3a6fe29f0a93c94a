//! Watchers that react once a specific subset of items has been collected.
//!
//! Unlike the registry's global threshold, a watcher names the exact items it
//! needs (for example the pieces of one painting) and completes once.

use crate::entity::UnlockEffect;
use crate::event::GameEvent;
use crate::state::{CollectionRegistry, ItemId};

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProgressWatcher {
    pub name: String,
    pub required: Vec<ItemId>,
    pub on_complete: Vec<UnlockEffect>,
    complete: bool,
}

impl ProgressWatcher {
    pub fn new(name: impl Into<String>, required: Vec<ItemId>) -> Self {
        Self {
            name: name.into(),
            required,
            on_complete: Vec::new(),
            complete: false,
        }
    }

    #[must_use]
    pub fn with_on_complete(mut self, effects: Vec<UnlockEffect>) -> Self {
        self.on_complete = effects;
        self
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }

    /// Completes the watcher if every required item is collected.
    ///
    /// Returns the completion event and effects the first time only. A
    /// watcher with no required items never completes on its own.
    pub fn check(&mut self, registry: &CollectionRegistry) -> Option<(GameEvent, Vec<UnlockEffect>)> {
        if self.complete || !registry.all_collected(&self.required) {
            return None;
        }
        Some(self.complete_now())
    }

    /// Completes the watcher regardless of the registry. No-op when already
    /// complete.
    pub fn force_complete(&mut self) -> Option<(GameEvent, Vec<UnlockEffect>)> {
        (!self.complete).then(|| self.complete_now())
    }

    pub fn reset(&mut self) {
        self.complete = false;
    }

    fn complete_now(&mut self) -> (GameEvent, Vec<UnlockEffect>) {
        self.complete = true;
        tracing::info!(watcher = %self.name, "progress watcher complete");
        (
            GameEvent::WatcherCompleted {
                watcher: self.name.clone(),
            },
            self.on_complete.clone(),
        )
    }
}
