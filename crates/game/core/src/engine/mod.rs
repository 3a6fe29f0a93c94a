//! Command execution for progression state.
//!
//! The [`GameEngine`] is the authoritative reducer for [`GameState`]. It
//! routes each [`Command`] to the entity that owns the transition, applies
//! the resulting world effects, re-evaluates progress watchers and returns
//! every emitted [`GameEvent`] in order.
//!
//! Unknown targets, hidden entities and redundant transitions are absorbed
//! here as silent no-ops; the engine has no error path.

mod command;

pub use command::Command;

use crate::entity::{EntityKind, UnlockEffect};
use crate::event::GameEvent;
use crate::state::{EntityFlags, EntityId, GameState, WorldState};

/// Game engine that applies commands to a borrowed [`GameState`].
pub struct GameEngine<'a> {
    state: &'a mut GameState,
}

impl<'a> GameEngine<'a> {
    /// Creates a new game engine with the given state.
    pub fn new(state: &'a mut GameState) -> Self {
        Self { state }
    }

    /// Executes a command and returns the events it produced.
    pub fn execute(&mut self, command: &Command) -> Vec<GameEvent> {
        tracing::trace!(command = command.name(), "executing command");

        match command {
            Command::Interact { target } => self.interact(target),
            Command::SubmitCredential { target, value } => self.submit_credential(target, value),
            Command::FinishInspection { target } => self.finish_inspection(target),
            Command::CancelInspection { target } => self.cancel_inspection(target),
            Command::Reveal { target } => {
                let mut events = Vec::new();
                self.apply_effects(vec![UnlockEffect::Reveal(target.clone())], &mut events);
                events
            }
            Command::Hide { target } => {
                let mut events = Vec::new();
                self.apply_effects(vec![UnlockEffect::Hide(target.clone())], &mut events);
                events
            }
            Command::ForceCompleteWatcher { watcher } => {
                let mut events = Vec::new();
                let completed = self
                    .state
                    .world
                    .watcher_mut(watcher)
                    .and_then(|w| w.force_complete());
                if let Some((event, effects)) = completed {
                    events.push(event);
                    self.apply_effects(effects, &mut events);
                }
                events
            }
            Command::ResetProgress => self.reset_progress(),
        }
    }

    /// Replaces the current world.
    ///
    /// Registers every pickup's item with the registry, restores pickups whose
    /// item was collected earlier in the session, and evaluates watchers
    /// against the carried-over progress.
    pub fn load_world(&mut self, world: WorldState) -> Vec<GameEvent> {
        self.state.world = world;
        self.register_pickups();

        let mut events = Vec::new();
        self.check_watchers(&mut events);
        events
    }

    /// Clears the registry and returns every entity and watcher of the loaded
    /// world to its authored state, so the same world can be played again.
    fn reset_progress(&mut self) -> Vec<GameEvent> {
        self.state.registry.reset_progress();
        for entity in self.state.world.entities_mut() {
            entity.reset();
        }
        for watcher in self.state.world.watchers_mut() {
            watcher.reset();
        }
        self.register_pickups();

        tracing::info!(entities = self.state.world.len(), "progress reset");
        vec![GameEvent::ProgressReset]
    }

    fn register_pickups(&mut self) {
        let GameState { registry, world } = &mut *self.state;
        for entity in world.entities_mut() {
            if let EntityKind::Pickup(pickup) = &mut entity.kind {
                registry.register_known_item(pickup.item.clone(), pickup.display_name.clone());
                if registry.is_collected(&pickup.item) {
                    pickup.restore_collected();
                    entity.flags = EntityFlags::empty();
                }
            }
        }
    }

    fn interact(&mut self, target: &EntityId) -> Vec<GameEvent> {
        let GameState { registry, world } = &mut *self.state;
        let Some(entity) = world.entity_mut(target) else {
            tracing::debug!(%target, "interaction with unknown entity");
            return Vec::new();
        };
        if !entity.is_interactable() {
            tracing::trace!(%target, "entity is not interactable");
            return Vec::new();
        }

        let mut effects = Vec::new();
        let mut events = match &mut entity.kind {
            EntityKind::Pickup(pickup) => pickup.request_interact(target, registry),
            EntityKind::Inspectable(inspectable) => inspectable.inspect(target),
            EntityKind::Container(container) => {
                let outcome = container.interact(target, registry);
                effects = outcome.effects;
                outcome.events
            }
            EntityKind::Door(door) => door.interact(target, registry),
            EntityKind::Exit(exit) => exit.interact(target),
            EntityKind::Prop { .. } => Vec::new(),
        };

        let collected = events
            .iter()
            .any(|e| matches!(e, GameEvent::PickupCollected { .. }));
        if collected {
            // The interaction surface goes away immediately; the host decides
            // when the object itself is removed.
            entity.flags = EntityFlags::empty();
            events.push(GameEvent::EntityHidden {
                entity: target.clone(),
            });
        }

        self.apply_effects(effects, &mut events);
        if collected {
            self.check_watchers(&mut events);
        }
        events
    }

    fn submit_credential(&mut self, target: &EntityId, value: &str) -> Vec<GameEvent> {
        let Some(entity) = self.state.world.entity_mut(target) else {
            tracing::debug!(%target, "credential for unknown entity");
            return Vec::new();
        };
        if !entity.is_interactable() {
            return Vec::new();
        }
        let EntityKind::Container(container) = &mut entity.kind else {
            tracing::debug!(%target, kind = entity.kind_name(), "credential for non-container");
            return Vec::new();
        };

        let outcome = container.submit_credential(target, value);
        let mut events = outcome.events;
        self.apply_effects(outcome.effects, &mut events);
        events
    }

    fn finish_inspection(&mut self, target: &EntityId) -> Vec<GameEvent> {
        match self.state.world.entity_mut(target).map(|e| &mut e.kind) {
            Some(EntityKind::Pickup(pickup)) => pickup.finish_inspection(target),
            Some(EntityKind::Inspectable(inspectable)) => inspectable.finish(target),
            _ => Vec::new(),
        }
    }

    fn cancel_inspection(&mut self, target: &EntityId) -> Vec<GameEvent> {
        match self.state.world.entity_mut(target).map(|e| &mut e.kind) {
            Some(EntityKind::Pickup(pickup)) => pickup.cancel_inspection(target),
            Some(EntityKind::Inspectable(inspectable)) if inspectable.is_inspecting() => {
                inspectable.cancel();
                vec![GameEvent::InspectionCancelled {
                    entity: target.clone(),
                }]
            }
            _ => Vec::new(),
        }
    }

    fn apply_effects(&mut self, effects: Vec<UnlockEffect>, events: &mut Vec<GameEvent>) {
        for effect in effects {
            match effect {
                UnlockEffect::Reveal(id) => {
                    let Some(entity) = self.state.world.entity_mut(&id) else {
                        tracing::debug!(entity = %id, "reveal of unknown entity");
                        continue;
                    };
                    let spent = matches!(&entity.kind, EntityKind::Pickup(p) if p.is_collected());
                    if spent || entity.is_interactable() {
                        continue;
                    }
                    entity.flags = EntityFlags::ACTIVE;
                    events.push(GameEvent::EntityRevealed { entity: id });
                }
                UnlockEffect::Hide(id) => {
                    let Some(entity) = self.state.world.entity_mut(&id) else {
                        tracing::debug!(entity = %id, "hide of unknown entity");
                        continue;
                    };
                    if entity.flags.is_empty() {
                        continue;
                    }
                    entity.flags = EntityFlags::empty();
                    events.push(GameEvent::EntityHidden { entity: id });
                }
                UnlockEffect::Notice { text, duration_ms } => {
                    events.push(GameEvent::NoticeRequested { text, duration_ms });
                }
            }
        }
    }

    fn check_watchers(&mut self, events: &mut Vec<GameEvent>) {
        let GameState { registry, world } = &mut *self.state;
        let completed: Vec<_> = world
            .watchers_mut()
            .iter_mut()
            .filter_map(|watcher| watcher.check(registry))
            .collect();

        for (event, effects) in completed {
            events.push(event);
            self.apply_effects(effects, events);
        }
    }
}
