//! Session orchestrator.
//!
//! A [`Session`] owns the single [`GameState`] of a play session together
//! with the coordinator of the loaded scene. The host queues [`InputEvent`]s
//! and calls [`Session::tick`] once per frame; each tick drains the queue,
//! applies commands through the engine, relays events into directive scripts
//! and advances frame-driven presentation.

use std::collections::VecDeque;

use game_content::SceneContent;
use game_core::{
    Command, GameConfig, GameEngine, GameError, GameEvent, GameState, ProgressCoordinator,
    WorldState,
};

use crate::api::{InputEvent, NarrativeDisplay, Result, RuntimeError, SceneService, Ticket};
use crate::director::{Director, Followup};
use crate::events::{Event, EventBus};

/// Scene loaded by [`InputEvent::QuitToMenu`].
pub const MAIN_MENU_SCENE: &str = "MainMenu";

/// Runtime configuration shared across the session and its collaborators.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub game_config: GameConfig,
    pub event_buffer_size: usize,
    /// Scene entered by [`InputEvent::NewGame`].
    pub first_scene: String,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            game_config: GameConfig::default(),
            event_buffer_size: 100,
            first_scene: "room".to_string(),
        }
    }
}

pub struct Session {
    config: RuntimeConfig,
    state: GameState,
    coordinator: ProgressCoordinator,
    director: Director,
    bus: EventBus,
    inputs: VecDeque<InputEvent>,
    scene: String,
    scene_request: Option<String>,
}

impl Session {
    /// Create a new session builder
    pub fn builder() -> SessionBuilder {
        SessionBuilder::new()
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    /// Name of the loaded scene.
    pub fn scene(&self) -> &str {
        &self.scene
    }

    /// Cloneable handle to the session's event bus.
    pub fn events(&self) -> EventBus {
        self.bus.clone()
    }

    /// Tickets the session is waiting on, oldest first.
    pub fn pending_tickets(&self) -> Vec<Ticket> {
        self.director.pending().collect()
    }

    /// Queue input for the next tick.
    pub fn push_input(&mut self, input: InputEvent) {
        self.inputs.push_back(input);
    }

    /// The scene the session asked to load, if any. The host loads its
    /// content and hands it to [`enter_scene`](Self::enter_scene).
    pub fn take_scene_request(&mut self) -> Option<String> {
        self.scene_request.take()
    }

    /// Run one frame: drain queued input, then advance presentation by `dt`
    /// seconds. Returns the game events produced during the tick.
    pub fn tick(&mut self, dt: f32) -> Vec<GameEvent> {
        let mut produced = Vec::new();

        while let Some(input) = self.inputs.pop_front() {
            tracing::trace!(?input, "handling input");
            let followups = self.handle_input(input, &mut produced);
            self.apply(followups, &mut produced);
        }

        let followups = self.director.advance(dt);
        self.apply(followups, &mut produced);
        produced
    }

    /// Replace the current world with `content`.
    ///
    /// The collection registry is kept; pickups whose items were already
    /// collected come back spent. Parked scripts of the previous scene are
    /// abandoned.
    pub fn enter_scene(
        &mut self,
        name: impl Into<String>,
        content: SceneContent,
    ) -> Result<Vec<GameEvent>> {
        let name = name.into();
        if let Err(source) = content.coordinator.validate(&content.world) {
            tracing::warn!(scene = %name, code = source.error_code(), "rejecting scene: {source}");
            return Err(RuntimeError::InvalidScene {
                scene: name,
                source,
            });
        }

        let _ = self.director.cancel_all();
        tracing::info!(scene = %name, entities = content.world.len(), "entering scene");

        self.scene = name;
        self.coordinator = content.coordinator;
        let events = GameEngine::new(&mut self.state).load_world(content.world);

        let mut produced = Vec::new();
        let followups = self.publish_and_relay(events, &mut produced);
        self.apply(followups, &mut produced);
        Ok(produced)
    }

    fn handle_input(&mut self, input: InputEvent, produced: &mut Vec<GameEvent>) -> Vec<Followup> {
        match input {
            InputEvent::Focus(None) => {
                self.director.set_prompt(None);
                Vec::new()
            }
            InputEvent::Focus(Some(entity)) => {
                // Prompts stay hidden while a beat or panel is on screen.
                let prompt = if self.director.is_busy() {
                    None
                } else {
                    self.state.prompt_for(&entity)
                };
                self.director.set_prompt(prompt.as_deref());
                Vec::new()
            }
            InputEvent::Interact(target) => {
                vec![Followup::Command(Command::Interact { target })]
            }
            InputEvent::SubmitCredential { container, value } => {
                vec![Followup::Command(Command::SubmitCredential {
                    target: container,
                    value,
                })]
            }
            InputEvent::Close(ticket) => self.director.dismiss(ticket),
            InputEvent::SequenceFinished(ticket) => self.director.complete(ticket),
            InputEvent::SceneUnloading => self.director.cancel_all(),
            InputEvent::NewGame => {
                self.reset(produced);
                self.scene_request = Some(self.config.first_scene.clone());
                Vec::new()
            }
            InputEvent::QuitToMenu => {
                self.reset(produced);
                self.director.load_scene(MAIN_MENU_SCENE);
                self.scene_request = Some(MAIN_MENU_SCENE.to_string());
                Vec::new()
            }
        }
    }

    /// Clears all progress and unloads the world.
    fn reset(&mut self, produced: &mut Vec<GameEvent>) {
        let _ = self.director.cancel_all();
        self.director.set_prompt(None);
        let events = GameEngine::new(&mut self.state).execute(&Command::ResetProgress);
        self.state.world = WorldState::default();
        self.coordinator = ProgressCoordinator::new();
        let followups = self.publish_and_relay(events, produced);
        self.apply(followups, produced);
    }

    fn apply(&mut self, followups: Vec<Followup>, produced: &mut Vec<GameEvent>) {
        let mut queue: VecDeque<Followup> = followups.into();
        while let Some(followup) = queue.pop_front() {
            match followup {
                Followup::Command(command) => {
                    let events = GameEngine::new(&mut self.state).execute(&command);
                    queue.extend(self.publish_and_relay(events, produced));
                }
                Followup::LoadScene(scene) => {
                    tracing::info!(%scene, "scene requested");
                    self.scene_request = Some(scene);
                }
            }
        }
    }

    /// Publishes `events`, relays each through the coordinator, and runs the
    /// resulting scripts. Returns follow-ups the scripts produced.
    fn publish_and_relay(
        &mut self,
        events: Vec<GameEvent>,
        produced: &mut Vec<GameEvent>,
    ) -> Vec<Followup> {
        let mut followups = Vec::new();
        for event in events {
            tracing::debug!(kind = event.kind(), "game event");
            self.bus.publish(Event::Game(event.clone()));

            let script = self.coordinator.relay(&event);
            for directive in &script {
                self.bus.publish(Event::Directive(directive.clone()));
            }
            followups.extend(self.director.run(script));
            produced.push(event);
        }
        followups
    }
}

/// Builder for [`Session`].
pub struct SessionBuilder {
    config: RuntimeConfig,
    display: Option<Box<dyn NarrativeDisplay>>,
    scenes: Option<Box<dyn SceneService>>,
    scene: Option<(String, SceneContent)>,
}

impl SessionBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            display: None,
            scenes: None,
            scene: None,
        }
    }

    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    pub fn display(mut self, display: impl NarrativeDisplay + 'static) -> Self {
        self.display = Some(Box::new(display));
        self
    }

    pub fn scenes(mut self, scenes: impl SceneService + 'static) -> Self {
        self.scenes = Some(Box::new(scenes));
        self
    }

    /// Scene loaded when the session is built.
    pub fn scene(mut self, name: impl Into<String>, content: SceneContent) -> Self {
        self.scene = Some((name.into(), content));
        self
    }

    pub fn build(self) -> Result<Session> {
        let (name, content) = self.scene.ok_or(RuntimeError::MissingScene)?;

        let mut session = Session {
            state: GameState::new(&self.config.game_config),
            coordinator: ProgressCoordinator::new(),
            director: Director::new(self.display, self.scenes),
            bus: EventBus::with_capacity(self.config.event_buffer_size),
            inputs: VecDeque::new(),
            scene: String::new(),
            scene_request: None,
            config: self.config,
        };
        let _ = session.enter_scene(name, content)?;
        Ok(session)
    }
}
