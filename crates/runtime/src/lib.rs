//! Session orchestration for chapter progression.
//!
//! This crate wires the deterministic core, chapter content and presentation
//! collaborators into a frame-driven session. Hosts embed a [`Session`],
//! queue [`InputEvent`]s, call [`Session::tick`] once per frame and observe
//! progress through the [`EventBus`].
//!
//! Modules are organized by responsibility:
//! - [`session`] hosts the orchestrator and builder
//! - [`api`] exposes the types downstream hosts interact with
//! - [`director`] runs coordinator scripts and awaits their tickets
//! - [`display`] provides a task-driven narrative display
//! - [`events`] provides topic-based event bus for flexible event routing
pub mod api;
pub mod director;
pub mod display;
pub mod events;
pub mod session;

pub use api::{InputEvent, NarrativeDisplay, Result, RuntimeError, SceneService, Ticket};
pub use director::{Director, Followup};
pub use display::{OpenPanel, TaskDisplay};
pub use events::{Event, EventBus, Topic};
pub use session::{MAIN_MENU_SCENE, RuntimeConfig, Session, SessionBuilder};
