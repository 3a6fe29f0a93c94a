//! Public runtime API surface.
//!
//! This module gathers the types exposed to consumers of the runtime crate so
//! the session and director can stay focused on orchestration.

pub mod collaborators;
pub mod errors;
pub mod input;

pub use collaborators::{NarrativeDisplay, SceneService, Ticket};
pub use errors::{Result, RuntimeError};
pub use input::InputEvent;
