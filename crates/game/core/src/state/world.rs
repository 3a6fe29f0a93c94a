//! Entities and watchers of the currently loaded scene.

use std::collections::{BTreeMap, BTreeSet};

use crate::entity::{Entity, EntityKind, Gate, UnlockEffect};
use crate::progress::ProgressWatcher;
use crate::state::{EntityId, ItemId, WorldError};

/// Scene-scoped state. Replaced wholesale on scene transitions, unlike the
/// session-scoped [`CollectionRegistry`](super::CollectionRegistry).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WorldState {
    entities: BTreeMap<EntityId, Entity>,
    watchers: Vec<ProgressWatcher>,
}

impl WorldState {
    pub fn builder() -> WorldBuilder {
        WorldBuilder::default()
    }

    pub fn entity(&self, id: &EntityId) -> Option<&Entity> {
        self.entities.get(id)
    }

    pub fn entity_mut(&mut self, id: &EntityId) -> Option<&mut Entity> {
        self.entities.get_mut(id)
    }

    pub fn contains(&self, id: &EntityId) -> bool {
        self.entities.contains_key(id)
    }

    pub fn entities(&self) -> impl Iterator<Item = &Entity> {
        self.entities.values()
    }

    pub fn entities_mut(&mut self) -> impl Iterator<Item = &mut Entity> {
        self.entities.values_mut()
    }

    pub fn watchers(&self) -> &[ProgressWatcher] {
        &self.watchers
    }

    pub fn watchers_mut(&mut self) -> &mut [ProgressWatcher] {
        &mut self.watchers
    }

    pub fn watcher_mut(&mut self, name: &str) -> Option<&mut ProgressWatcher> {
        self.watchers.iter_mut().find(|w| w.name == name)
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

/// Validating builder for [`WorldState`].
#[derive(Debug, Default)]
pub struct WorldBuilder {
    entities: Vec<Entity>,
    watchers: Vec<ProgressWatcher>,
}

impl WorldBuilder {
    #[must_use]
    pub fn entity(mut self, entity: Entity) -> Self {
        self.entities.push(entity);
        self
    }

    #[must_use]
    pub fn entities(mut self, entities: impl IntoIterator<Item = Entity>) -> Self {
        self.entities.extend(entities);
        self
    }

    #[must_use]
    pub fn watcher(mut self, watcher: ProgressWatcher) -> Self {
        self.watchers.push(watcher);
        self
    }

    #[must_use]
    pub fn watchers(mut self, watchers: impl IntoIterator<Item = ProgressWatcher>) -> Self {
        self.watchers.extend(watchers);
        self
    }

    /// Validates and assembles the world.
    ///
    /// Fails on duplicate entity ids, items granted by two pickups, duplicate
    /// watcher names, empty secrets, and effects aimed at unknown entities.
    pub fn build(self) -> Result<WorldState, WorldError> {
        let mut entities = BTreeMap::new();
        let mut granted: BTreeMap<ItemId, EntityId> = BTreeMap::new();

        for entity in self.entities {
            match &entity.kind {
                EntityKind::Pickup(pickup) => {
                    if let Some(first) = granted.insert(pickup.item.clone(), entity.id.clone()) {
                        return Err(WorldError::DuplicateItem {
                            item: pickup.item.clone(),
                            first,
                            second: entity.id.clone(),
                        });
                    }
                }
                EntityKind::Container(container) => {
                    if let Gate::Credential { secret } = &container.gate
                        && secret.is_empty()
                    {
                        return Err(WorldError::EmptySecret {
                            container: entity.id.clone(),
                        });
                    }
                }
                _ => {}
            }

            let id = entity.id.clone();
            if entities.insert(id.clone(), entity).is_some() {
                return Err(WorldError::DuplicateEntity { entity: id });
            }
        }

        let mut names = BTreeSet::new();
        for watcher in &self.watchers {
            if !names.insert(watcher.name.as_str()) {
                return Err(WorldError::DuplicateWatcher {
                    watcher: watcher.name.clone(),
                });
            }
            check_targets(&entities, &watcher.name, &watcher.on_complete)?;
        }

        for entity in entities.values() {
            if let EntityKind::Container(container) = &entity.kind {
                check_targets(&entities, entity.id.as_str(), &container.on_unlock)?;
            }
        }

        Ok(WorldState {
            entities,
            watchers: self.watchers,
        })
    }
}

fn check_targets(
    entities: &BTreeMap<EntityId, Entity>,
    source: &str,
    effects: &[UnlockEffect],
) -> Result<(), WorldError> {
    for target in effects.iter().filter_map(UnlockEffect::target) {
        if !entities.contains_key(target) {
            return Err(WorldError::UnknownTarget {
                source_name: source.to_string(),
                target: target.clone(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{GatedContainer, Pickup};

    fn pickup(id: &str, item: &str) -> Entity {
        Entity::new(id, EntityKind::Pickup(Pickup::new(item.into(), item)))
    }

    #[test]
    fn rejects_duplicate_entities() {
        let err = WorldState::builder()
            .entity(pickup("piece", "P1"))
            .entity(Entity::new("piece", EntityKind::Prop { name: "x".into() }))
            .build()
            .unwrap_err();
        assert_eq!(err, WorldError::DuplicateEntity { entity: "piece".into() });
    }

    #[test]
    fn rejects_item_granted_twice() {
        let err = WorldState::builder()
            .entity(pickup("a", "P1"))
            .entity(pickup("b", "P1"))
            .build()
            .unwrap_err();
        assert!(matches!(err, WorldError::DuplicateItem { .. }));
    }

    #[test]
    fn rejects_unlock_effect_on_missing_entity() {
        let safe = GatedContainer::credential("safe", "18082")
            .with_on_unlock(vec![UnlockEffect::Reveal("nowhere".into())]);
        let err = WorldState::builder()
            .entity(Entity::new("safe", EntityKind::Container(safe)))
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            WorldError::UnknownTarget {
                source_name: "safe".into(),
                target: "nowhere".into()
            }
        );
    }

    #[test]
    fn rejects_empty_secret() {
        let safe = GatedContainer::credential("safe", "");
        let err = WorldState::builder()
            .entity(Entity::new("safe", EntityKind::Container(safe)))
            .build()
            .unwrap_err();
        assert!(matches!(err, WorldError::EmptySecret { .. }));
    }

    #[test]
    fn rejects_duplicate_watchers() {
        let err = WorldState::builder()
            .watcher(ProgressWatcher::new("painting", vec![]))
            .watcher(ProgressWatcher::new("painting", vec![]))
            .build()
            .unwrap_err();
        assert!(matches!(err, WorldError::DuplicateWatcher { .. }));
    }
}
