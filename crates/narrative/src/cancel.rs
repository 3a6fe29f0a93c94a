//! Cancellation of in-flight tasks.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::{Status, Task};

/// Shared cancellation flag.
///
/// Cancelling never interrupts a poll in progress; the wrapped task observes
/// the flag at its next poll.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// Wraps a task so a [`CancelToken`] can stop it.
///
/// A cancelled task reports `Done` without being polled again. Callers that
/// care whether the task completed naturally check
/// [`was_cancelled`](Self::was_cancelled).
pub struct Cancellable<C> {
    inner: Box<dyn Task<C>>,
    token: CancelToken,
}

impl<C> Cancellable<C> {
    pub fn new(inner: Box<dyn Task<C>>) -> Self {
        Self {
            inner,
            token: CancelToken::new(),
        }
    }

    /// A handle that cancels this task.
    pub fn token(&self) -> CancelToken {
        self.token.clone()
    }

    pub fn was_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }
}

impl<C> Task<C> for Cancellable<C> {
    fn poll(&mut self, ctx: &mut C, dt: f32) -> Status {
        if self.token.is_cancelled() {
            tracing::trace!("task cancelled");
            return Status::Done;
        }
        self.inner.poll(ctx, dt)
    }

    fn restart(&mut self) {
        self.token = CancelToken::new();
        self.inner.restart();
    }
}
