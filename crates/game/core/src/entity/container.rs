//! Containers that reveal their contents once a gate is satisfied.
//!
//! State machine: `Locked -> Unlocked -> (optional) Consumed`. The unlock
//! side effects are returned exactly once, from the call that takes the
//! `Locked -> Unlocked` edge; every later call is a no-op.

use crate::entity::UnlockEffect;
use crate::event::GameEvent;
use crate::state::{CollectionRegistry, EntityId, ItemId};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ContainerState {
    Locked,
    Unlocked,
    /// Removed from the world after unlocking. Terminal.
    Consumed,
}

/// What a container requires before it opens.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Gate {
    /// Opens when the submitted value equals `secret` exactly.
    Credential { secret: String },
    /// Opens when `item` is in the registry. `prompt` is exposed while it is
    /// missing.
    Prerequisite { item: ItemId, prompt: String },
}

/// Events and world effects produced by one container call.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[must_use]
pub struct ContainerOutcome {
    pub events: Vec<GameEvent>,
    pub effects: Vec<UnlockEffect>,
}

impl ContainerOutcome {
    fn event(event: GameEvent) -> Self {
        Self {
            events: vec![event],
            effects: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty() && self.effects.is_empty()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GatedContainer {
    pub name: String,
    pub gate: Gate,
    pub on_unlock: Vec<UnlockEffect>,
    /// Remove the container from the world right after it unlocks.
    pub consume_on_unlock: bool,
    state: ContainerState,
}

impl GatedContainer {
    pub fn credential(name: impl Into<String>, secret: impl Into<String>) -> Self {
        Self::new(
            name,
            Gate::Credential {
                secret: secret.into(),
            },
        )
    }

    pub fn prerequisite(name: impl Into<String>, item: ItemId) -> Self {
        let name = name.into();
        let prompt = format!("Need the {item} to open the {name}!");
        Self::new(name, Gate::Prerequisite { item, prompt })
    }

    pub fn new(name: impl Into<String>, gate: Gate) -> Self {
        Self {
            name: name.into(),
            gate,
            on_unlock: Vec::new(),
            consume_on_unlock: false,
            state: ContainerState::Locked,
        }
    }

    #[must_use]
    pub fn with_on_unlock(mut self, effects: Vec<UnlockEffect>) -> Self {
        self.on_unlock = effects;
        self
    }

    #[must_use]
    pub fn consumed_on_unlock(mut self) -> Self {
        self.consume_on_unlock = true;
        self
    }

    pub fn state(&self) -> ContainerState {
        self.state
    }

    pub fn is_locked(&self) -> bool {
        matches!(self.state, ContainerState::Locked)
    }

    /// Routes a generic interaction: credential containers ask for the code,
    /// prerequisite containers attempt to open.
    pub fn interact(
        &mut self,
        container: &EntityId,
        registry: &CollectionRegistry,
    ) -> ContainerOutcome {
        if !self.is_locked() {
            return ContainerOutcome::default();
        }
        match self.gate {
            Gate::Credential { .. } => ContainerOutcome::event(GameEvent::CredentialRequested {
                container: container.clone(),
            }),
            Gate::Prerequisite { .. } => self.try_open(container, registry),
        }
    }

    /// Compares `value` against the configured secret.
    ///
    /// A mismatch keeps the container locked and emits failure feedback on
    /// every attempt. The first match unlocks it regardless of earlier misses.
    pub fn submit_credential(&mut self, container: &EntityId, value: &str) -> ContainerOutcome {
        if !self.is_locked() {
            tracing::trace!(%container, state = ?self.state, "credential ignored");
            return ContainerOutcome::default();
        }
        let Gate::Credential { secret } = &self.gate else {
            tracing::debug!(%container, "credential submitted to a prerequisite gate");
            return ContainerOutcome::default();
        };

        if value != secret {
            tracing::debug!(%container, "credential rejected");
            return ContainerOutcome::event(GameEvent::CredentialRejected {
                container: container.clone(),
            });
        }

        self.unlock(container)
    }

    /// Opens the container when its prerequisite item has been collected.
    pub fn try_open(
        &mut self,
        container: &EntityId,
        registry: &CollectionRegistry,
    ) -> ContainerOutcome {
        if !self.is_locked() {
            tracing::trace!(%container, state = ?self.state, "already opened");
            return ContainerOutcome::default();
        }
        let Gate::Prerequisite { item, prompt } = &self.gate else {
            tracing::debug!(%container, "try_open on a credential gate");
            return ContainerOutcome::default();
        };

        if !registry.is_collected(item) {
            return ContainerOutcome::event(GameEvent::PrerequisiteMissing {
                container: container.clone(),
                needs: item.clone(),
                prompt: prompt.clone(),
            });
        }

        self.unlock(container)
    }

    pub fn prompt(&self) -> Option<String> {
        if !self.is_locked() {
            return None;
        }
        Some(match self.gate {
            Gate::Credential { .. } => format!("[E] Enter the code for the {}", self.name),
            Gate::Prerequisite { .. } => format!("[E] Open the {}", self.name),
        })
    }

    pub fn reset(&mut self) {
        self.state = ContainerState::Locked;
    }

    fn unlock(&mut self, container: &EntityId) -> ContainerOutcome {
        self.state = ContainerState::Unlocked;
        tracing::info!(%container, "container unlocked");

        let mut outcome = ContainerOutcome {
            events: vec![GameEvent::ContainerUnlocked {
                container: container.clone(),
            }],
            effects: self.on_unlock.clone(),
        };

        if self.consume_on_unlock {
            self.state = ContainerState::Consumed;
            outcome.events.push(GameEvent::ContainerConsumed {
                container: container.clone(),
            });
            outcome.effects.push(UnlockEffect::Hide(container.clone()));
        }

        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn safe() -> (EntityId, GatedContainer) {
        let container = GatedContainer::credential("safe", "18082")
            .with_on_unlock(vec![
                UnlockEffect::Reveal("safe_key".into()),
                UnlockEffect::Reveal("mystery_box".into()),
            ])
            .consumed_on_unlock();
        (EntityId::from("safe"), container)
    }

    #[test]
    fn wrong_code_keeps_safe_locked_and_shakes() {
        let (id, mut safe) = safe();

        let outcome = safe.submit_credential(&id, "12345");

        assert_eq!(safe.state(), ContainerState::Locked);
        assert_eq!(
            outcome.events,
            vec![GameEvent::CredentialRejected { container: id.clone() }]
        );
        assert!(outcome.effects.is_empty());

        // Every wrong attempt gives feedback again.
        let again = safe.submit_credential(&id, "12345");
        assert_eq!(again.events.len(), 1);
    }

    #[test]
    fn right_code_unlocks_once_after_failures() {
        let (id, mut safe) = safe();

        for wrong in ["", "1808", "18083", " 18082"] {
            let _ = safe.submit_credential(&id, wrong);
            assert!(safe.is_locked(), "{wrong:?} must not unlock");
        }

        let outcome = safe.submit_credential(&id, "18082");
        assert_eq!(safe.state(), ContainerState::Consumed);
        assert_eq!(
            outcome.events,
            vec![
                GameEvent::ContainerUnlocked { container: id.clone() },
                GameEvent::ContainerConsumed { container: id.clone() },
            ]
        );
        assert_eq!(
            outcome.effects,
            vec![
                UnlockEffect::Reveal("safe_key".into()),
                UnlockEffect::Reveal("mystery_box".into()),
                UnlockEffect::Hide(id.clone()),
            ]
        );

        // Consumed containers never transition again.
        assert!(safe.submit_credential(&id, "18082").is_empty());
        assert!(safe.submit_credential(&id, "00000").is_empty());
    }

    #[test]
    fn interact_requests_credential_while_locked() {
        let (id, mut safe) = safe();
        let registry = CollectionRegistry::new(5);

        let outcome = safe.interact(&id, &registry);
        assert_eq!(
            outcome.events,
            vec![GameEvent::CredentialRequested { container: id }]
        );
    }

    #[test]
    fn box_needs_key_before_opening() {
        let id = EntityId::from("mystery_box");
        let mut mystery = GatedContainer::prerequisite("mystery box", "SafeKey".into());
        let mut registry = CollectionRegistry::new(5);
        registry.register_known_item("SafeKey".into(), "Safe key");

        let outcome = mystery.try_open(&id, &registry);
        assert!(mystery.is_locked());
        let GameEvent::PrerequisiteMissing { needs, prompt, .. } = &outcome.events[0] else {
            panic!("expected PrerequisiteMissing, got {:?}", outcome.events);
        };
        assert_eq!(needs.as_str(), "SafeKey");
        assert_eq!(prompt, "Need the SafeKey to open the mystery box!");

        let _ = registry.collect_item(&"SafeKey".into());
        let outcome = mystery.try_open(&id, &registry);
        assert_eq!(mystery.state(), ContainerState::Unlocked);
        assert_eq!(
            outcome.events,
            vec![GameEvent::ContainerUnlocked { container: id.clone() }]
        );

        // Repeated attempts after unlocking are no-ops.
        assert!(mystery.try_open(&id, &registry).is_empty());
        assert!(mystery.interact(&id, &registry).is_empty());
    }

    #[test]
    fn gates_ignore_the_other_variant_operation() {
        let id = EntityId::from("box");
        let mut mystery = GatedContainer::prerequisite("box", "SafeKey".into());
        assert!(mystery.submit_credential(&id, "SafeKey").is_empty());

        let (safe_id, mut safe) = safe();
        let registry = CollectionRegistry::new(5);
        assert!(safe.try_open(&safe_id, &registry).is_empty());
        assert!(safe.is_locked());
    }
}
