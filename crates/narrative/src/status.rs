//! Status returned by presentation tasks.

/// The result of polling a task.
///
/// # Frame Semantics
///
/// A task is polled once per frame until it reports `Done`:
/// - Effects spread over time (typing, fading) report `Running` meanwhile
/// - Instant effects report `Done` from their first poll
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    /// The task needs more frames.
    Running,

    /// The task finished (or was cancelled). Polling it again is a no-op.
    Done,
}

impl Status {
    /// Returns `true` if this status is `Running`.
    #[inline]
    pub fn is_running(self) -> bool {
        matches!(self, Status::Running)
    }

    /// Returns `true` if this status is `Done`.
    #[inline]
    pub fn is_done(self) -> bool {
        matches!(self, Status::Done)
    }
}
