//! Frame-driven [`NarrativeDisplay`] built on narrative tasks.
//!
//! Beats play one at a time as monologues on a headless [`Panel`]; later
//! beats queue behind the current one. Letter and view panels queue the same
//! way: only the oldest is shown and the next one opens when it is closed.
//! Notices replace each other, and a shake on an already shaking target
//! restarts it. Hosts read the panel each
//! frame to mirror it onto real widgets; headless hosts get the same content
//! through `tracing`.

use std::collections::{BTreeMap, VecDeque};
use std::time::Duration;

use game_core::EntityId;
use narrative::{Cancellable, MonologueTimings, Notice, Panel, Shake, Task, monologue};

use crate::api::{NarrativeDisplay, Ticket};

/// A panel the player has to close.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OpenPanel {
    Letter(String),
    View(String),
}

pub struct TaskDisplay {
    panel: Panel,
    timings: MonologueTimings,
    beat: Option<(Ticket, Cancellable<Panel>)>,
    queued: VecDeque<(Ticket, Vec<String>)>,
    notice: Option<Notice>,
    shakes: BTreeMap<EntityId, (Shake, Panel)>,
    prompt: Option<String>,
    panels: VecDeque<(Ticket, OpenPanel)>,
    credential: Option<EntityId>,
}

impl Default for TaskDisplay {
    fn default() -> Self {
        Self::new(MonologueTimings::default())
    }
}

impl TaskDisplay {
    pub fn new(timings: MonologueTimings) -> Self {
        Self {
            panel: Panel::default(),
            timings,
            beat: None,
            queued: VecDeque::new(),
            notice: None,
            shakes: BTreeMap::new(),
            prompt: None,
            panels: VecDeque::new(),
            credential: None,
        }
    }

    pub fn panel(&self) -> &Panel {
        &self.panel
    }

    pub fn prompt(&self) -> Option<&str> {
        self.prompt.as_deref()
    }

    /// The panel on screen. Later panels wait behind it.
    pub fn open_panel(&self) -> Option<(Ticket, &OpenPanel)> {
        self.panels.front().map(|(ticket, panel)| (*ticket, panel))
    }

    /// Container whose code entry is open, if any.
    pub fn credential_entry(&self) -> Option<&EntityId> {
        self.credential.as_ref()
    }

    /// Current displacement of a shaking target.
    pub fn shake_offset(&self, target: &EntityId) -> Option<(f32, f32)> {
        self.shakes.get(target).map(|(_, panel)| panel.offset)
    }

    pub fn is_playing(&self) -> bool {
        self.beat.is_some()
    }

    fn start_next(&mut self) {
        if self.beat.is_some() {
            return;
        }
        if let Some((ticket, lines)) = self.queued.pop_front() {
            for line in &lines {
                tracing::info!(%ticket, "{line}");
            }
            let task = Cancellable::new(monologue(&lines, self.timings));
            self.beat = Some((ticket, task));
        }
    }

    fn push_panel(&mut self, ticket: Ticket, panel: OpenPanel) {
        if !self.panels.is_empty() {
            tracing::debug!(%ticket, "panel queued behind open panel");
        }
        self.panels.push_back((ticket, panel));
    }
}

impl NarrativeDisplay for TaskDisplay {
    fn show_sequence(&mut self, ticket: Ticket, lines: &[String]) {
        self.queued.push_back((ticket, lines.to_vec()));
        self.start_next();
    }

    fn show_prompt(&mut self, text: &str) {
        tracing::debug!(prompt = text, "prompt shown");
        self.prompt = Some(text.to_string());
    }

    fn hide_prompt(&mut self) {
        self.prompt = None;
    }

    fn show_notice(&mut self, text: &str, duration: Duration) {
        tracing::info!(notice = text, "notice");
        self.notice = Some(Notice::new(text, duration.as_secs_f32()));
    }

    fn present_letter(&mut self, ticket: Ticket, text: &str) -> bool {
        tracing::info!(%ticket, "letter: {text}");
        self.push_panel(ticket, OpenPanel::Letter(text.to_string()));
        true
    }

    fn present_view(&mut self, ticket: Ticket, caption: &str) -> bool {
        tracing::info!(%ticket, "view: {caption}");
        self.push_panel(ticket, OpenPanel::View(caption.to_string()));
        true
    }

    fn request_credential(&mut self, container: &EntityId) {
        tracing::info!(%container, "code entry opened");
        self.credential = Some(container.clone());
    }

    fn close_credential(&mut self, container: &EntityId) {
        if self.credential.as_ref() == Some(container) {
            tracing::info!(%container, "code entry closed");
            self.credential = None;
        }
    }

    fn shake(&mut self, target: &EntityId) {
        match self.shakes.get_mut(target) {
            Some((shake, _)) => Task::<Panel>::restart(shake),
            None => {
                self.shakes
                    .insert(target.clone(), (Shake::default(), Panel::default()));
            }
        }
    }

    fn cancel(&mut self, ticket: Ticket) {
        if let Some((current, task)) = &self.beat
            && *current == ticket
        {
            task.token().cancel();
        }
        self.queued.retain(|(queued, _)| *queued != ticket);
        self.panels.retain(|(panel, _)| *panel != ticket);
    }

    fn advance(&mut self, dt: f32) -> Vec<Ticket> {
        let mut finished = Vec::new();

        if let Some((ticket, task)) = self.beat.as_mut()
            && task.poll(&mut self.panel, dt).is_done()
        {
            if !task.was_cancelled() {
                finished.push(*ticket);
            }
            self.beat = None;
            self.start_next();
        }

        if let Some(notice) = self.notice.as_mut()
            && notice.poll(&mut self.panel, dt).is_done()
        {
            self.notice = None;
        }

        self.shakes
            .retain(|_, (shake, panel)| shake.poll(panel, dt).is_running());

        finished
    }
}
