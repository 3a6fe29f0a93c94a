//! Runs coordinator scripts against the presentation collaborators.
//!
//! A script is an ordered list of [`Directive`]s. Directives that await
//! completion park the rest of their script behind a [`Ticket`]; the script
//! resumes when that ticket is completed. When the collaborator needed by an
//! awaiting directive is missing or declines it, the ticket resolves on the
//! spot so progression never stalls on presentation.

use std::collections::VecDeque;
use std::time::Duration;

use game_core::{Command, Directive, EntityId};

use crate::api::{NarrativeDisplay, SceneService, Ticket};

/// Work the director hands back to the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Followup {
    /// Apply to the game state.
    Command(Command),
    /// Replace the current world with the named scene.
    LoadScene(String),
}

struct Parked {
    ticket: Ticket,
    owner: Option<EntityId>,
    rest: VecDeque<Directive>,
}

#[derive(Default)]
pub struct Director {
    display: Option<Box<dyn NarrativeDisplay>>,
    scenes: Option<Box<dyn SceneService>>,
    next_ticket: u64,
    parked: Vec<Parked>,
}

impl Director {
    pub fn new(
        display: Option<Box<dyn NarrativeDisplay>>,
        scenes: Option<Box<dyn SceneService>>,
    ) -> Self {
        Self {
            display,
            scenes,
            next_ticket: 0,
            parked: Vec::new(),
        }
    }

    /// Whether any script is waiting on a ticket.
    pub fn is_busy(&self) -> bool {
        !self.parked.is_empty()
    }

    /// Tickets currently awaited.
    pub fn pending(&self) -> impl Iterator<Item = Ticket> + '_ {
        self.parked.iter().map(|p| p.ticket)
    }

    /// Runs `script` until it finishes or parks on a ticket.
    pub fn run(&mut self, script: impl IntoIterator<Item = Directive>) -> Vec<Followup> {
        let mut followups = Vec::new();
        self.resume(script.into_iter().collect(), &mut followups);
        followups
    }

    /// Completes `ticket` and resumes the script parked behind it.
    ///
    /// Unknown or already completed tickets are ignored.
    pub fn complete(&mut self, ticket: Ticket) -> Vec<Followup> {
        let Some(index) = self.parked.iter().position(|p| p.ticket == ticket) else {
            tracing::debug!(%ticket, "completion for unknown ticket");
            return Vec::new();
        };
        let parked = self.parked.remove(index);

        let mut followups = Vec::new();
        if let Some(owner) = parked.owner {
            followups.push(Followup::Command(Command::FinishInspection { target: owner }));
        }
        self.resume(parked.rest, &mut followups);
        followups
    }

    /// Completes `ticket` on the player's behalf, closing whatever the
    /// display still shows for it.
    pub fn dismiss(&mut self, ticket: Ticket) -> Vec<Followup> {
        if let Some(display) = self.display.as_mut() {
            display.cancel(ticket);
        }
        self.complete(ticket)
    }

    /// Abandons every parked script.
    ///
    /// Owners of interrupted beats get a cancel command so they are left
    /// available rather than progressed.
    pub fn cancel_all(&mut self) -> Vec<Followup> {
        let mut followups = Vec::new();
        for parked in self.parked.drain(..) {
            if let Some(display) = self.display.as_mut() {
                display.cancel(parked.ticket);
            }
            if let Some(owner) = parked.owner {
                tracing::debug!(%owner, ticket = %parked.ticket, "beat interrupted");
                followups.push(Followup::Command(Command::CancelInspection { target: owner }));
            }
        }
        followups
    }

    /// Advances the display and resumes scripts whose tickets finished.
    pub fn advance(&mut self, dt: f32) -> Vec<Followup> {
        let finished = match self.display.as_mut() {
            Some(display) => display.advance(dt),
            None => Vec::new(),
        };
        finished
            .into_iter()
            .flat_map(|ticket| self.complete(ticket))
            .collect()
    }

    /// Shows or hides the interaction prompt directly.
    pub fn set_prompt(&mut self, prompt: Option<&str>) {
        let Some(display) = self.display.as_mut() else {
            return;
        };
        match prompt {
            Some(text) => display.show_prompt(text),
            None => display.hide_prompt(),
        }
    }

    /// Loads a scene through the scene service without a script.
    pub fn load_scene(&mut self, scene: &str) {
        match self.scenes.as_mut() {
            Some(scenes) => scenes.load_scene(scene),
            None => tracing::warn!(scene, "no scene service; skipping scene load"),
        }
    }

    fn resume(&mut self, mut script: VecDeque<Directive>, followups: &mut Vec<Followup>) {
        while let Some(directive) = script.pop_front() {
            tracing::trace!(directive = directive.name(), "running directive");
            let owner = match &directive {
                Directive::ShowSequence { owner, .. } => owner.clone(),
                _ => None,
            };

            match self.dispatch(directive, followups) {
                Some(ticket) => {
                    self.parked.push(Parked {
                        ticket,
                        owner,
                        rest: script,
                    });
                    return;
                }
                None => {
                    if let Some(owner) = owner {
                        followups.push(Followup::Command(Command::FinishInspection {
                            target: owner,
                        }));
                    }
                }
            }
        }
    }

    /// Executes one directive. Returns the ticket to park on when the
    /// directive is awaited by a present collaborator.
    fn dispatch(&mut self, directive: Directive, followups: &mut Vec<Followup>) -> Option<Ticket> {
        let ticket = Ticket(self.next_ticket);

        let accepted = match directive {
            Directive::ShowSequence { lines, .. } => match self.display.as_mut() {
                Some(display) => {
                    display.show_sequence(ticket, &lines);
                    true
                }
                None => {
                    tracing::warn!(lines = lines.len(), "no narrative display; skipping sequence");
                    false
                }
            },
            Directive::PresentLetter { text } => self
                .display
                .as_mut()
                .is_some_and(|display| display.present_letter(ticket, &text)),
            Directive::PresentView { caption } => self
                .display
                .as_mut()
                .is_some_and(|display| display.present_view(ticket, &caption)),
            Directive::PlayCutscene { clip } => {
                let played = self
                    .scenes
                    .as_mut()
                    .is_some_and(|scenes| scenes.play_cutscene(ticket, &clip));
                if !played {
                    tracing::warn!(%clip, "cutscene not played");
                }
                played
            }
            Directive::RequestCredential { container } => {
                if let Some(display) = self.display.as_mut() {
                    display.request_credential(&container);
                }
                false
            }
            Directive::CloseCredential { container } => {
                if let Some(display) = self.display.as_mut() {
                    display.close_credential(&container);
                }
                false
            }
            Directive::ShowPrompt { text } => {
                self.set_prompt(Some(&text));
                false
            }
            Directive::HidePrompt => {
                self.set_prompt(None);
                false
            }
            Directive::ShowNotice { text, duration_ms } => {
                match self.display.as_mut() {
                    Some(display) => {
                        display.show_notice(&text, Duration::from_millis(u64::from(duration_ms)))
                    }
                    None => tracing::warn!(%text, "no narrative display; skipping notice"),
                }
                false
            }
            Directive::Shake { target } => {
                if let Some(display) = self.display.as_mut() {
                    display.shake(&target);
                }
                false
            }
            Directive::Reveal { entity } => {
                followups.push(Followup::Command(Command::Reveal { target: entity }));
                false
            }
            Directive::Hide { entity } => {
                followups.push(Followup::Command(Command::Hide { target: entity }));
                false
            }
            Directive::LoadScene { scene, fade } => {
                match self.scenes.as_mut() {
                    Some(scenes) if fade => scenes.fade_then_load(&scene),
                    Some(scenes) => scenes.load_scene(&scene),
                    None => tracing::warn!(%scene, "no scene service; skipping scene load"),
                }
                followups.push(Followup::LoadScene(scene));
                false
            }
        };

        if accepted {
            self.next_ticket += 1;
            Some(ticket)
        } else {
            None
        }
    }
}
