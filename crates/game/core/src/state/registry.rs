//! Authoritative record of collected items.
//!
//! The registry is session-scoped: it outlives world (scene) replacement and
//! is cleared only by [`CollectionRegistry::reset_progress`]. Collection is
//! idempotent so that several triggers hitting the same item within one tick
//! (raycast and collision, for instance) record it once.

use std::collections::BTreeMap;

use crate::event::GameEvent;
use crate::state::{Item, ItemId};

/// Tracks which known items have been collected and latches completion.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CollectionRegistry {
    items: BTreeMap<ItemId, Item>,
    /// Collected ids in the order they were collected.
    collected: Vec<ItemId>,
    required_count: u32,
    /// Set when `SetComplete` has fired; cleared only by reset.
    completion_latched: bool,
}

impl CollectionRegistry {
    pub fn new(required_count: u32) -> Self {
        Self {
            items: BTreeMap::new(),
            collected: Vec::new(),
            required_count,
            completion_latched: false,
        }
    }

    /// Adds `id` to the known set. Already-known ids are left untouched.
    ///
    /// Returns true when the id was newly registered.
    pub fn register_known_item(&mut self, id: ItemId, display_name: impl Into<String>) -> bool {
        if self.items.contains_key(&id) {
            return false;
        }
        let item = Item::new(id.clone(), display_name);
        self.items.insert(id, item);
        true
    }

    /// Records the collection of `id`.
    ///
    /// Unknown and already-collected ids are ignored and produce no events.
    /// Otherwise emits `ItemCollected`, followed by `SetComplete` the first
    /// time the collected count reaches the required count.
    #[must_use]
    pub fn collect_item(&mut self, id: &ItemId) -> Vec<GameEvent> {
        let Some(item) = self.items.get_mut(id) else {
            tracing::debug!(item = %id, "ignoring collect for unknown item");
            return Vec::new();
        };
        if item.collected {
            tracing::trace!(item = %id, "item already collected");
            return Vec::new();
        }

        item.collected = true;
        self.collected.push(id.clone());

        let count = self.collected_count();
        let mut events = vec![GameEvent::ItemCollected {
            item: id.clone(),
            count,
        }];

        if !self.completion_latched && count == self.required_count {
            self.completion_latched = true;
            tracing::info!(count, "collection set complete");
            events.push(GameEvent::SetComplete { count });
        }

        events
    }

    /// Returns true when `id` is known and collected.
    pub fn is_collected(&self, id: &ItemId) -> bool {
        self.items.get(id).is_some_and(|item| item.collected)
    }

    /// Returns true when every id in `ids` is collected. Empty input is never
    /// considered satisfied.
    pub fn all_collected<'a>(&self, ids: impl IntoIterator<Item = &'a ItemId>) -> bool {
        let mut any = false;
        for id in ids {
            if !self.is_collected(id) {
                return false;
            }
            any = true;
        }
        any
    }

    /// Clears every known item, the collected list and the completion latch.
    ///
    /// Callers that need their known items back must register them again.
    pub fn reset_progress(&mut self) {
        self.items.clear();
        self.collected.clear();
        self.completion_latched = false;
    }

    pub fn item(&self, id: &ItemId) -> Option<&Item> {
        self.items.get(id)
    }

    /// Collected ids in collection order.
    pub fn collected_ids(&self) -> &[ItemId] {
        &self.collected
    }

    pub fn collected_count(&self) -> u32 {
        u32::try_from(self.collected.len()).unwrap_or(u32::MAX)
    }

    pub fn known_count(&self) -> u32 {
        u32::try_from(self.items.len()).unwrap_or(u32::MAX)
    }

    pub fn required_count(&self) -> u32 {
        self.required_count
    }

    /// True once `SetComplete` has fired in this session.
    pub fn is_complete(&self) -> bool {
        self.completion_latched
    }
}

impl Default for CollectionRegistry {
    fn default() -> Self {
        Self::new(crate::GameConfig::DEFAULT_REQUIRED_COUNT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry_with(ids: &[&str], required: u32) -> CollectionRegistry {
        let mut registry = CollectionRegistry::new(required);
        for id in ids {
            registry.register_known_item(ItemId::from(*id), format!("Piece {id}"));
        }
        registry
    }

    fn count_set_complete(events: &[GameEvent]) -> usize {
        events
            .iter()
            .filter(|e| matches!(e, GameEvent::SetComplete { .. }))
            .count()
    }

    #[test]
    fn register_is_idempotent() {
        let mut registry = CollectionRegistry::new(1);
        assert!(registry.register_known_item("P1".into(), "Torn piece"));
        assert!(!registry.register_known_item("P1".into(), "Other name"));
        assert_eq!(registry.known_count(), 1);
        assert_eq!(registry.item(&"P1".into()).unwrap().display_name, "Torn piece");
    }

    #[test]
    fn double_collect_counts_once() {
        let mut registry = registry_with(&["P1", "P2"], 5);

        let first = registry.collect_item(&"P1".into());
        let second = registry.collect_item(&"P1".into());

        assert_eq!(
            first,
            vec![GameEvent::ItemCollected {
                item: "P1".into(),
                count: 1
            }]
        );
        assert!(second.is_empty());
        assert_eq!(registry.collected_count(), 1);
    }

    #[test]
    fn unknown_item_is_ignored() {
        let mut registry = registry_with(&["P1"], 1);
        assert!(registry.collect_item(&"Ghost".into()).is_empty());
        assert_eq!(registry.collected_count(), 0);
        assert!(!registry.is_collected(&"Ghost".into()));
    }

    #[test]
    fn five_pieces_complete_exactly_once() {
        let ids = ["P1", "P2", "P3", "P4", "P5"];
        let mut registry = registry_with(&ids, 5);

        let mut collected_events = 0;
        let mut complete_events = 0;
        for (index, id) in ids.iter().enumerate() {
            let events = registry.collect_item(&ItemId::from(*id));
            collected_events += events
                .iter()
                .filter(|e| matches!(e, GameEvent::ItemCollected { .. }))
                .count();
            complete_events += count_set_complete(&events);

            if index < 4 {
                assert_eq!(complete_events, 0, "completion fired early at {id}");
            }
        }

        assert_eq!(collected_events, 5);
        assert_eq!(complete_events, 1);
        assert!(registry.is_complete());

        // Re-collecting after completion changes nothing.
        assert!(registry.collect_item(&"P1".into()).is_empty());
        assert_eq!(registry.collected_count(), 5);
    }

    #[test]
    fn completion_does_not_refire_past_threshold() {
        let mut registry = registry_with(&["A", "B", "C"], 2);

        let mut total = 0;
        for id in ["A", "B", "C"] {
            total += count_set_complete(&registry.collect_item(&id.into()));
        }
        registry.register_known_item("D".into(), "Late item");
        total += count_set_complete(&registry.collect_item(&"D".into()));

        assert_eq!(total, 1);
        assert_eq!(registry.collected_count(), 4);
    }

    #[test]
    fn collected_ids_keep_collection_order() {
        let mut registry = registry_with(&["P1", "P2", "P3"], 3);
        let _ = registry.collect_item(&"P3".into());
        let _ = registry.collect_item(&"P1".into());
        let _ = registry.collect_item(&"P2".into());

        let order: Vec<&str> = registry.collected_ids().iter().map(ItemId::as_str).collect();
        assert_eq!(order, ["P3", "P1", "P2"]);
    }

    #[test]
    fn reset_then_replay_reproduces_progression() {
        let ids = ["P1", "P2", "P3"];
        let mut registry = registry_with(&ids, 3);

        let run = |registry: &mut CollectionRegistry| -> Vec<u32> {
            ids.iter()
                .map(|id| {
                    let _ = registry.collect_item(&ItemId::from(*id));
                    registry.collected_count()
                })
                .collect()
        };

        let first = run(&mut registry);
        registry.reset_progress();
        assert_eq!(registry.known_count(), 0);
        assert!(!registry.is_complete());

        // Unknown after reset until re-registered.
        assert!(registry.collect_item(&"P1".into()).is_empty());

        for id in ids {
            registry.register_known_item(id.into(), id);
        }
        let second = run(&mut registry);

        assert_eq!(first, vec![1, 2, 3]);
        assert_eq!(first, second);
        assert!(registry.is_complete());
    }

    #[test]
    fn zero_required_never_completes() {
        let mut registry = registry_with(&["P1"], 0);
        let events = registry.collect_item(&"P1".into());
        assert_eq!(count_set_complete(&events), 0);
        assert!(!registry.is_complete());
    }

    #[test]
    fn all_collected_rejects_empty_set() {
        let mut registry = registry_with(&["P1"], 1);
        let _ = registry.collect_item(&"P1".into());
        assert!(!registry.all_collected(&Vec::<ItemId>::new()));
        assert!(registry.all_collected(&[ItemId::from("P1")]));
        assert!(!registry.all_collected(&[ItemId::from("P1"), ItemId::from("P2")]));
    }
}
