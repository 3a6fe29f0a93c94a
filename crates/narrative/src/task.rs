//! Core task trait.
//!
//! This module defines the [`Task`] trait, the fundamental abstraction for
//! every presentation step. The trait is generic over a context type `C`,
//! the surface the task draws into.

use crate::Status;

/// A multi-frame presentation step.
pub trait Task<C>: Send {
    /// Advance this task by `dt` seconds.
    ///
    /// # Arguments
    ///
    /// * `ctx` - The surface to draw into.
    /// * `dt` - Seconds elapsed since the previous poll. May be zero.
    ///
    /// # Returns
    ///
    /// - `Status::Running` if the task needs more frames
    /// - `Status::Done` once it has finished
    fn poll(&mut self, ctx: &mut C, dt: f32) -> Status;

    /// Return the task to its initial state so it can run again.
    ///
    /// Tasks that cannot restart keep the default no-op.
    fn restart(&mut self) {}
}

/// Blanket implementation for boxed tasks.
///
/// This allows `Box<dyn Task<C>>` to also implement `Task<C>`, enabling
/// dynamic dispatch and heterogeneous collections of tasks.
impl<C> Task<C> for Box<dyn Task<C>> {
    #[inline]
    fn poll(&mut self, ctx: &mut C, dt: f32) -> Status {
        (**self).poll(ctx, dt)
    }

    #[inline]
    fn restart(&mut self) {
        (**self).restart()
    }
}
