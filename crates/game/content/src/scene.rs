//! Authored scene definitions.
//!
//! A [`SceneSpec`] is the on-disk shape of one scene: its entities, progress
//! watchers and the coordinator reactions that belong to it. [`SceneSpec::build`]
//! resolves defaults from [`GameConfig`] and validates the result into a
//! [`SceneContent`] ready for the runtime.

use game_core::{
    CompletionReaction, Door, Entity, EntityId, EntityKind, Exit, Gate, GameConfig,
    GatedContainer, Inspectable, ItemId, Pickup, ProgressCoordinator, ProgressWatcher,
    UnlockEffect, UnlockRelay, WorldError, WorldState,
};

/// One scene as written in `scenes/{name}.ron`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SceneSpec {
    #[cfg_attr(feature = "serde", serde(default))]
    pub entities: Vec<EntitySpec>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub watchers: Vec<WatcherSpec>,
    /// Letter presented when the collection set completes in this scene.
    #[cfg_attr(feature = "serde", serde(default))]
    pub completion: Option<CompletionReaction>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub relays: Vec<UnlockRelay>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntitySpec {
    pub id: EntityId,
    /// Starts hidden until an effect reveals it.
    #[cfg_attr(feature = "serde", serde(default))]
    pub hidden: bool,
    pub kind: EntityKindSpec,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EntityKindSpec {
    Pickup {
        item: ItemId,
        name: String,
        #[cfg_attr(feature = "serde", serde(default))]
        before: Vec<String>,
        #[cfg_attr(feature = "serde", serde(default))]
        after: Vec<String>,
    },
    Inspectable {
        name: String,
        thoughts: Vec<String>,
        #[cfg_attr(feature = "serde", serde(default))]
        revisit: Vec<String>,
        #[cfg_attr(feature = "serde", serde(default))]
        once: bool,
    },
    /// Container opened by entering a code.
    CodeLock {
        name: String,
        secret: String,
        #[cfg_attr(feature = "serde", serde(default))]
        on_unlock: Vec<EffectSpec>,
        #[cfg_attr(feature = "serde", serde(default))]
        consume: bool,
    },
    /// Container opened by holding an item.
    KeyLock {
        name: String,
        requires: ItemId,
        /// Overrides the generated "need key" prompt.
        #[cfg_attr(feature = "serde", serde(default))]
        prompt: Option<String>,
        #[cfg_attr(feature = "serde", serde(default))]
        on_unlock: Vec<EffectSpec>,
        #[cfg_attr(feature = "serde", serde(default))]
        consume: bool,
    },
    Door {
        name: String,
        #[cfg_attr(feature = "serde", serde(default))]
        requires: Option<ItemId>,
    },
    Exit {
        name: String,
        scene: String,
    },
    Prop {
        name: String,
    },
}

/// Authored form of [`UnlockEffect`]; notices may omit their duration.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EffectSpec {
    Reveal(EntityId),
    Hide(EntityId),
    Notice {
        text: String,
        #[cfg_attr(feature = "serde", serde(default))]
        duration_ms: Option<u32>,
    },
}

impl EffectSpec {
    pub fn resolve(self, config: &GameConfig) -> UnlockEffect {
        match self {
            Self::Reveal(entity) => UnlockEffect::Reveal(entity),
            Self::Hide(entity) => UnlockEffect::Hide(entity),
            Self::Notice { text, duration_ms } => UnlockEffect::Notice {
                text,
                duration_ms: duration_ms.unwrap_or(config.notice_ms),
            },
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WatcherSpec {
    pub name: String,
    pub required: Vec<ItemId>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub on_complete: Vec<EffectSpec>,
}

/// A validated scene: the world to load and the coordinator that reacts to it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SceneContent {
    pub world: WorldState,
    pub coordinator: ProgressCoordinator,
}

impl SceneSpec {
    /// Resolves defaults and validates the scene.
    pub fn build(self, config: &GameConfig) -> Result<SceneContent, WorldError> {
        let resolve = |effects: Vec<EffectSpec>| -> Vec<UnlockEffect> {
            effects.into_iter().map(|e| e.resolve(config)).collect()
        };

        let entities = self.entities.into_iter().map(|spec| {
            let kind = match spec.kind {
                EntityKindSpec::Pickup {
                    item,
                    name,
                    before,
                    after,
                } => EntityKind::Pickup(
                    Pickup::new(item, name)
                        .with_before_lines(before)
                        .with_after_lines(after),
                ),
                EntityKindSpec::Inspectable {
                    name,
                    thoughts,
                    revisit,
                    once,
                } => {
                    let inspectable =
                        Inspectable::new(name, thoughts).with_revisit_thoughts(revisit);
                    EntityKind::Inspectable(if once { inspectable.once() } else { inspectable })
                }
                EntityKindSpec::CodeLock {
                    name,
                    secret,
                    on_unlock,
                    consume,
                } => {
                    let container =
                        GatedContainer::credential(name, secret).with_on_unlock(resolve(on_unlock));
                    EntityKind::Container(if consume {
                        container.consumed_on_unlock()
                    } else {
                        container
                    })
                }
                EntityKindSpec::KeyLock {
                    name,
                    requires,
                    prompt,
                    on_unlock,
                    consume,
                } => {
                    let mut container = match prompt {
                        Some(prompt) => GatedContainer::new(
                            name,
                            Gate::Prerequisite {
                                item: requires,
                                prompt,
                            },
                        ),
                        None => GatedContainer::prerequisite(name, requires),
                    }
                    .with_on_unlock(resolve(on_unlock));
                    if consume {
                        container = container.consumed_on_unlock();
                    }
                    EntityKind::Container(container)
                }
                EntityKindSpec::Door { name, requires } => {
                    let door = Door::new(name);
                    EntityKind::Door(match requires {
                        Some(key) => door.with_key(key),
                        None => door,
                    })
                }
                EntityKindSpec::Exit { name, scene } => EntityKind::Exit(Exit::new(name, scene)),
                EntityKindSpec::Prop { name } => EntityKind::Prop { name },
            };
            let entity = Entity::new(spec.id, kind);
            if spec.hidden { entity.hidden() } else { entity }
        });

        let watchers = self.watchers.into_iter().map(|spec| {
            ProgressWatcher::new(spec.name, spec.required).with_on_complete(resolve(spec.on_complete))
        });

        let world = WorldState::builder()
            .entities(entities.collect::<Vec<_>>())
            .watchers(watchers.collect::<Vec<_>>())
            .build()?;

        let mut coordinator = ProgressCoordinator::new().with_relays(self.relays);
        if let Some(completion) = self.completion {
            coordinator = coordinator.with_completion(completion);
        }
        coordinator.validate(&world)?;

        tracing::debug!(
            entities = world.len(),
            watchers = world.watchers().len(),
            "scene built"
        );
        Ok(SceneContent { world, coordinator })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::Directive;

    fn safe_room() -> SceneSpec {
        SceneSpec {
            entities: vec![
                EntitySpec {
                    id: "safe".into(),
                    hidden: false,
                    kind: EntityKindSpec::CodeLock {
                        name: "safe".into(),
                        secret: "18082".into(),
                        on_unlock: vec![
                            EffectSpec::Reveal("safe_key".into()),
                            EffectSpec::Notice {
                                text: "Mystery box appeared!".into(),
                                duration_ms: None,
                            },
                        ],
                        consume: true,
                    },
                },
                EntitySpec {
                    id: "safe_key".into(),
                    hidden: true,
                    kind: EntityKindSpec::Pickup {
                        item: "SafeKey".into(),
                        name: "Safe key".into(),
                        before: Vec::new(),
                        after: Vec::new(),
                    },
                },
            ],
            ..SceneSpec::default()
        }
    }

    #[test]
    fn builds_world_with_hidden_entities() {
        let scene = safe_room().build(&GameConfig::default()).unwrap();

        let key = scene.world.entity(&"safe_key".into()).unwrap();
        assert!(!key.is_visible());
        assert!(scene.world.entity(&"safe".into()).unwrap().is_interactable());
    }

    #[test]
    fn notice_duration_defaults_from_config() {
        let config = GameConfig {
            notice_ms: 1234,
            ..GameConfig::default()
        };
        let scene = safe_room().build(&config).unwrap();

        let EntityKind::Container(safe) = &scene.world.entity(&"safe".into()).unwrap().kind else {
            panic!("safe should be a container");
        };
        assert!(safe.on_unlock.contains(&UnlockEffect::Notice {
            text: "Mystery box appeared!".into(),
            duration_ms: 1234
        }));
    }

    #[test]
    fn relay_to_unknown_entity_fails() {
        let mut spec = safe_room();
        spec.relays.push(UnlockRelay {
            container: "safe".into(),
            directives: vec![Directive::Reveal {
                entity: "ghost".into(),
            }],
        });

        let err = spec.build(&GameConfig::default()).unwrap_err();
        assert!(matches!(err, WorldError::UnknownTarget { .. }));
    }
}
