//! Frame-driven presentation tasks for narrative beats.
//!
//! Typewriter text, fades, shakes and timed notices are modeled as explicit
//! task objects advanced by the host's per-frame scheduler:
//!
//! - **Delta time**: every poll receives the seconds elapsed since the previous frame
//! - **Running state**: a task reports `Running` until its effect is complete
//! - **Cancellation**: a [`CancelToken`] flag is checked at the next poll
//!
//! # Architecture
//!
//! - [`Task`]: Core trait for all tasks
//! - [`Status`]: Running or Done
//! - [`Surface`]: What tasks draw into; [`Panel`] is a headless model of it
//! - Composite tasks: [`Sequence`], [`Parallel`]
//! - Decorator tasks: [`Cancellable`]
//! - Leaf tasks: [`Wait`], [`Typewriter`], [`Fade`], [`Shake`], [`Notice`]

pub mod builder;
pub mod cancel;
pub mod composite;
pub mod leaf;
pub mod status;
pub mod surface;
pub mod task;

// Re-export core types for ergonomic API
pub use builder::{MonologueTimings, monologue, sequence};
pub use cancel::{CancelToken, Cancellable};
pub use composite::{Parallel, Sequence};
pub use leaf::{Fade, Notice, Shake, Typewriter, Wait};
pub use status::Status;
pub use surface::{Panel, Surface};
pub use task::Task;
