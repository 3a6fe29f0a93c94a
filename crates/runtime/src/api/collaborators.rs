//! Presentation collaborators consumed by the session.
//!
//! Hosts plug in [`NarrativeDisplay`] and [`SceneService`] implementations so
//! the same progression can drive a game UI, a headless log, or test
//! fixtures. Both are optional: when one is missing, the session still
//! performs every state transition and only the presentation is skipped.
use std::fmt;
use std::time::Duration;

use game_core::EntityId;

/// Handle for a presentation step whose completion the session awaits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Ticket(pub u64);

impl fmt::Display for Ticket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Text and panel presentation.
///
/// Methods that take a [`Ticket`] start something the session waits on. The
/// display reports completion either by returning the ticket from
/// [`advance`](Self::advance) or through an input event
/// ([`InputEvent::SequenceFinished`](super::InputEvent::SequenceFinished) /
/// [`InputEvent::Close`](super::InputEvent::Close)).
pub trait NarrativeDisplay: Send {
    /// Start a multi-line narrative beat.
    fn show_sequence(&mut self, ticket: Ticket, lines: &[String]);

    fn show_prompt(&mut self, text: &str);

    fn hide_prompt(&mut self);

    /// Show a timed notice, replacing any notice still on screen.
    fn show_notice(&mut self, text: &str, duration: Duration);

    /// Open the letter panel. Returns `false` when unsupported, in which case
    /// the ticket resolves immediately.
    fn present_letter(&mut self, _ticket: Ticket, _text: &str) -> bool {
        false
    }

    /// Open a close-up view. Same contract as [`present_letter`](Self::present_letter).
    fn present_view(&mut self, _ticket: Ticket, _caption: &str) -> bool {
        false
    }

    /// Open code entry for `container`.
    fn request_credential(&mut self, _container: &EntityId) {}

    /// Close code entry for `container`, if open.
    fn close_credential(&mut self, _container: &EntityId) {}

    /// Failure feedback on `target`. An in-flight shake restarts.
    fn shake(&mut self, _target: &EntityId) {}

    /// Abandon the step behind `ticket` without reporting completion.
    fn cancel(&mut self, _ticket: Ticket) {}

    /// Advance frame-driven presentation by `dt` seconds and return the
    /// tickets that finished.
    fn advance(&mut self, _dt: f32) -> Vec<Ticket> {
        Vec::new()
    }
}

/// Scene transitions and cutscenes.
pub trait SceneService: Send {
    fn load_scene(&mut self, name: &str);

    /// Fade out, then load.
    fn fade_then_load(&mut self, name: &str) {
        self.load_scene(name);
    }

    /// Start a cutscene. Returns `false` when unsupported, in which case the
    /// ticket resolves immediately.
    fn play_cutscene(&mut self, _ticket: Ticket, _clip: &str) -> bool {
        false
    }
}
