//! Builder utilities for common presentation scripts.
//!
//! Instead of writing verbose `Box::new(Sequence::new(vec![...]))`, use
//! [`sequence`], and [`monologue`] for the standard multi-line beat.

use crate::{Fade, Sequence, Surface, Task, Typewriter, Wait};

/// Creates a sequence task.
///
/// Shorthand for `Box::new(Sequence::new(children))`.
#[inline]
pub fn sequence<C: 'static>(children: Vec<Box<dyn Task<C>>>) -> Box<dyn Task<C>> {
    Box::new(Sequence::new(children))
}

/// Pacing of a [`monologue`], in seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonologueTimings {
    pub fade: f32,
    pub per_char: f32,
    /// Minimum time a line stays up, typing included.
    pub line_time: f32,
    /// Pause after a line is fully typed.
    pub hold: f32,
    /// Blank pause between lines.
    pub gap: f32,
}

impl Default for MonologueTimings {
    fn default() -> Self {
        Self {
            fade: 0.5,
            per_char: 0.05,
            line_time: 2.5,
            hold: 1.0,
            gap: 0.3,
        }
    }
}

/// Fades the panel in, types each line, then fades out.
///
/// Every line stays up for at least `line_time` and is followed by at least
/// `hold`. An empty `lines` yields a bare fade in/out.
pub fn monologue<C: Surface + 'static>(
    lines: &[String],
    timings: MonologueTimings,
) -> Box<dyn Task<C>> {
    let mut steps: Vec<Box<dyn Task<C>>> =
        vec![Box::new(ClearText), Box::new(Fade::fade_in(timings.fade))];

    for (i, line) in lines.iter().enumerate() {
        if i > 0 {
            steps.push(Box::new(ClearText));
            steps.push(Box::new(Wait::new(timings.gap)));
        }
        let typing = Typewriter::new(line.clone(), timings.per_char);
        let hold = (timings.line_time - typing.duration()).max(timings.hold);
        steps.push(Box::new(typing));
        steps.push(Box::new(Wait::new(hold)));
    }

    steps.push(Box::new(Fade::fade_out(timings.fade)));
    steps.push(Box::new(ClearText));
    sequence(steps)
}

/// Empties the text line.
struct ClearText;

impl<C: Surface> Task<C> for ClearText {
    fn poll(&mut self, ctx: &mut C, _dt: f32) -> crate::Status {
        ctx.set_text("");
        crate::Status::Done
    }
}
