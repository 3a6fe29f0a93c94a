//! Composite tasks.
//!
//! Composite tasks drive several children across frames: [`Sequence`] runs
//! them one after another, [`Parallel`] runs them side by side.

use crate::{Status, Task};

/// Runs child tasks one after another.
///
/// # Semantics
///
/// A `Sequence` polls only its current child:
/// - While the child reports `Running`, the sequence reports `Running`
/// - When the child reports `Done`, the sequence **advances** and polls the
///   next child in the same frame with zero elapsed time
/// - When the last child is done, the sequence reports `Done`
pub struct Sequence<C> {
    children: Vec<Box<dyn Task<C>>>,
    current: usize,
}

impl<C> Sequence<C> {
    /// Creates a new sequence with the given child tasks.
    ///
    /// # Panics
    ///
    /// Panics if `children` is empty. A sequence with no children is
    /// meaningless and likely indicates a programming error.
    pub fn new(children: Vec<Box<dyn Task<C>>>) -> Self {
        assert!(
            !children.is_empty(),
            "Sequence must have at least one child"
        );
        Self {
            children,
            current: 0,
        }
    }

    /// Index of the child currently being polled.
    pub fn current(&self) -> usize {
        self.current
    }
}

impl<C> Task<C> for Sequence<C> {
    fn poll(&mut self, ctx: &mut C, dt: f32) -> Status {
        let mut dt = dt;
        while let Some(child) = self.children.get_mut(self.current) {
            match child.poll(ctx, dt) {
                Status::Running => return Status::Running,
                Status::Done => {
                    self.current += 1;
                    dt = 0.0;
                }
            }
        }
        Status::Done
    }

    fn restart(&mut self) {
        self.current = 0;
        for child in &mut self.children {
            child.restart();
        }
    }
}

/// Runs child tasks side by side until all are done.
pub struct Parallel<C> {
    children: Vec<(Box<dyn Task<C>>, bool)>,
}

impl<C> Parallel<C> {
    /// Creates a new parallel group.
    ///
    /// # Panics
    ///
    /// Panics if `children` is empty.
    pub fn new(children: Vec<Box<dyn Task<C>>>) -> Self {
        assert!(
            !children.is_empty(),
            "Parallel must have at least one child"
        );
        Self {
            children: children.into_iter().map(|c| (c, false)).collect(),
        }
    }
}

impl<C> Task<C> for Parallel<C> {
    fn poll(&mut self, ctx: &mut C, dt: f32) -> Status {
        let mut all_done = true;
        for (child, done) in &mut self.children {
            if !*done {
                *done = child.poll(ctx, dt).is_done();
            }
            all_done &= *done;
        }
        if all_done {
            Status::Done
        } else {
            Status::Running
        }
    }

    fn restart(&mut self) {
        for (child, done) in &mut self.children {
            child.restart();
            *done = false;
        }
    }
}
