//! Deterministic progression rules for a narrative exploration chapter.
//!
//! `game-core` defines the canonical collection and puzzle-gating state
//! (registry, pickups, gated containers, doors, exits, progress watchers) and
//! exposes pure APIs reused by the runtime and content loaders. All state
//! mutation flows through [`engine::GameEngine`]; the
//! [`ProgressCoordinator`] turns the resulting events into presentation
//! directives. Nothing in this crate performs I/O or reads clocks.
pub mod config;
pub mod coordinator;
pub mod engine;
pub mod entity;
pub mod error;
pub mod event;
pub mod progress;
pub mod state;

pub use config::GameConfig;
pub use coordinator::{CompletionReaction, Directive, ProgressCoordinator, UnlockRelay};
pub use engine::{Command, GameEngine};
pub use entity::{
    ContainerOutcome, ContainerState, Door, Entity, EntityKind, Exit, Gate, GatedContainer,
    Inspectable, Pickup, PickupPhase, UnlockEffect,
};
pub use error::{ErrorSeverity, GameError};
pub use event::GameEvent;
pub use progress::ProgressWatcher;
pub use state::{
    CollectionRegistry, EntityFlags, EntityId, GameState, Item, ItemId, WorldBuilder, WorldError,
    WorldState,
};
