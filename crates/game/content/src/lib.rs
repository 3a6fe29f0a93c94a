//! Data-driven chapter content and loaders.
//!
//! This crate turns authored data files into game-core values:
//! - Scene layouts (entities, watchers, coordinator reactions) via RON
//! - Game configuration via TOML
//!
//! Content is validated while it is built; a scene that references unknown
//! entities never reaches the runtime.
//!
//! Loaders deserialize game-core types directly where their shape is already
//! authorable, and go through small `*Spec` types where defaults need
//! resolving.

pub mod scene;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use scene::{EffectSpec, EntityKindSpec, EntitySpec, SceneContent, SceneSpec, WatcherSpec};

#[cfg(feature = "loaders")]
pub use loaders::{ConfigLoader, ContentFactory, LoadResult, SceneLoader};
