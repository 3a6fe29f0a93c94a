//! Leaf tasks.
//!
//! Each leaf animates one [`Surface`] property over time. All of them accept
//! a zero `dt` and clamp overshoot on the final frame.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::{Status, Surface, Task};

/// Does nothing for `duration` seconds.
#[derive(Debug, Clone)]
pub struct Wait {
    duration: f32,
    elapsed: f32,
}

impl Wait {
    pub fn new(duration: f32) -> Self {
        Self {
            duration,
            elapsed: 0.0,
        }
    }
}

impl<C> Task<C> for Wait {
    fn poll(&mut self, _ctx: &mut C, dt: f32) -> Status {
        self.elapsed += dt;
        if self.elapsed >= self.duration {
            Status::Done
        } else {
            Status::Running
        }
    }

    fn restart(&mut self) {
        self.elapsed = 0.0;
    }
}

/// Reveals `text` one character at a time.
#[derive(Debug, Clone)]
pub struct Typewriter {
    text: String,
    seconds_per_char: f32,
    elapsed: f32,
    shown: usize,
}

impl Typewriter {
    pub fn new(text: impl Into<String>, seconds_per_char: f32) -> Self {
        Self {
            text: text.into(),
            seconds_per_char,
            elapsed: 0.0,
            shown: usize::MAX,
        }
    }

    /// Seconds needed to type the whole line.
    pub fn duration(&self) -> f32 {
        self.text.chars().count() as f32 * self.seconds_per_char
    }
}

impl<C: Surface> Task<C> for Typewriter {
    fn poll(&mut self, ctx: &mut C, dt: f32) -> Status {
        let total = self.text.chars().count();
        self.elapsed += dt;

        let visible = if self.seconds_per_char <= 0.0 {
            total
        } else {
            ((self.elapsed / self.seconds_per_char) as usize).min(total)
        };
        if visible != self.shown {
            let end = self
                .text
                .char_indices()
                .nth(visible)
                .map_or(self.text.len(), |(i, _)| i);
            ctx.set_text(&self.text[..end]);
            self.shown = visible;
        }

        if visible == total {
            Status::Done
        } else {
            Status::Running
        }
    }

    fn restart(&mut self) {
        self.elapsed = 0.0;
        self.shown = usize::MAX;
    }
}

/// Linearly moves the surface alpha from `from` to `to`.
#[derive(Debug, Clone)]
pub struct Fade {
    from: f32,
    to: f32,
    duration: f32,
    elapsed: f32,
}

impl Fade {
    pub fn new(from: f32, to: f32, duration: f32) -> Self {
        Self {
            from,
            to,
            duration,
            elapsed: 0.0,
        }
    }

    pub fn fade_in(duration: f32) -> Self {
        Self::new(0.0, 1.0, duration)
    }

    pub fn fade_out(duration: f32) -> Self {
        Self::new(1.0, 0.0, duration)
    }
}

impl<C: Surface> Task<C> for Fade {
    fn poll(&mut self, ctx: &mut C, dt: f32) -> Status {
        self.elapsed += dt;
        let t = if self.duration <= 0.0 {
            1.0
        } else {
            (self.elapsed / self.duration).min(1.0)
        };
        ctx.set_alpha(self.from + (self.to - self.from) * t);

        if t >= 1.0 {
            Status::Done
        } else {
            Status::Running
        }
    }

    fn restart(&mut self) {
        self.elapsed = 0.0;
    }
}

/// Jitters the surface offset for `duration` seconds, then settles at rest.
///
/// Restarting an in-flight shake resets its clock instead of layering a
/// second shake on top.
#[derive(Debug, Clone)]
pub struct Shake {
    amplitude: f32,
    duration: f32,
    elapsed: f32,
    rng: SmallRng,
}

impl Shake {
    pub const DEFAULT_AMPLITUDE: f32 = 20.0;
    pub const DEFAULT_DURATION: f32 = 0.5;

    pub fn new(amplitude: f32, duration: f32) -> Self {
        Self::with_rng(amplitude, duration, SmallRng::from_entropy())
    }

    /// Deterministic jitter, for replays and tests.
    pub fn seeded(amplitude: f32, duration: f32, seed: u64) -> Self {
        Self::with_rng(amplitude, duration, SmallRng::seed_from_u64(seed))
    }

    fn with_rng(amplitude: f32, duration: f32, rng: SmallRng) -> Self {
        Self {
            amplitude,
            duration,
            elapsed: 0.0,
            rng,
        }
    }
}

impl Default for Shake {
    fn default() -> Self {
        Self::new(Self::DEFAULT_AMPLITUDE, Self::DEFAULT_DURATION)
    }
}

impl<C: Surface> Task<C> for Shake {
    fn poll(&mut self, ctx: &mut C, dt: f32) -> Status {
        self.elapsed += dt;
        if self.elapsed >= self.duration {
            ctx.set_offset(0.0, 0.0);
            return Status::Done;
        }

        let a = self.amplitude;
        let x = self.rng.gen_range(-a..=a);
        let y = self.rng.gen_range(-a..=a);
        ctx.set_offset(x, y);
        Status::Running
    }

    fn restart(&mut self) {
        self.elapsed = 0.0;
    }
}

/// Shows a notice line for `duration` seconds, then clears it.
#[derive(Debug, Clone)]
pub struct Notice {
    text: String,
    duration: f32,
    elapsed: f32,
    shown: bool,
}

impl Notice {
    pub fn new(text: impl Into<String>, duration: f32) -> Self {
        Self {
            text: text.into(),
            duration,
            elapsed: 0.0,
            shown: false,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

impl<C: Surface> Task<C> for Notice {
    fn poll(&mut self, ctx: &mut C, dt: f32) -> Status {
        if !self.shown {
            ctx.set_notice(Some(&self.text));
            self.shown = true;
            return Status::Running;
        }

        self.elapsed += dt;
        if self.elapsed >= self.duration {
            ctx.set_notice(None);
            Status::Done
        } else {
            Status::Running
        }
    }

    fn restart(&mut self) {
        self.elapsed = 0.0;
        self.shown = false;
    }
}
