//! Drives a [`Session`] from script commands.
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use anyhow::{Context, Result};
use game_content::ContentFactory;
use game_core::{EntityId, GameConfig};
use runtime::{
    InputEvent, NarrativeDisplay, OpenPanel, RuntimeConfig, SceneService, Session, TaskDisplay,
    Ticket,
};

use crate::config::ClientConfig;
use crate::script::ScriptCommand;

/// Scene service for a headless host: transitions are logged, cutscenes are
/// not played.
pub struct LoggedScenes;

impl SceneService for LoggedScenes {
    fn load_scene(&mut self, name: &str) {
        tracing::info!(scene = name, "loading scene");
    }

    fn fade_then_load(&mut self, name: &str) {
        tracing::info!(scene = name, "fading out, then loading scene");
    }
}

/// [`TaskDisplay`] shared between the session and the player, so script
/// commands can read what is on screen.
#[derive(Clone, Default)]
pub struct SharedDisplay(Arc<Mutex<TaskDisplay>>);

impl SharedDisplay {
    fn lock(&self) -> MutexGuard<'_, TaskDisplay> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl NarrativeDisplay for SharedDisplay {
    fn show_sequence(&mut self, ticket: Ticket, lines: &[String]) {
        self.lock().show_sequence(ticket, lines);
    }

    fn show_prompt(&mut self, text: &str) {
        self.lock().show_prompt(text);
    }

    fn hide_prompt(&mut self) {
        self.lock().hide_prompt();
    }

    fn show_notice(&mut self, text: &str, duration: Duration) {
        self.lock().show_notice(text, duration);
    }

    fn present_letter(&mut self, ticket: Ticket, text: &str) -> bool {
        self.lock().present_letter(ticket, text)
    }

    fn present_view(&mut self, ticket: Ticket, caption: &str) -> bool {
        self.lock().present_view(ticket, caption)
    }

    fn request_credential(&mut self, container: &EntityId) {
        self.lock().request_credential(container);
    }

    fn close_credential(&mut self, container: &EntityId) {
        self.lock().close_credential(container);
    }

    fn shake(&mut self, target: &EntityId) {
        self.lock().shake(target);
    }

    fn cancel(&mut self, ticket: Ticket) {
        self.lock().cancel(ticket);
    }

    fn advance(&mut self, dt: f32) -> Vec<Ticket> {
        self.lock().advance(dt)
    }
}

pub struct Player {
    session: Session,
    display: SharedDisplay,
    factory: ContentFactory,
    game_config: GameConfig,
    tick: Duration,
}

impl Player {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let factory = ContentFactory::new(&config.data_dir);
        let game_config = factory.load_config()?;
        let first = factory.load_scene(&config.first_scene, &game_config)?;
        let display = SharedDisplay::default();

        let session = Session::builder()
            .config(RuntimeConfig {
                game_config: game_config.clone(),
                first_scene: config.first_scene.clone(),
                ..RuntimeConfig::default()
            })
            .display(display.clone())
            .scenes(LoggedScenes)
            .scene(config.first_scene.clone(), first)
            .build()
            .context("Failed to start session")?;

        tracing::info!(
            scene = session.scene(),
            required = game_config.required_count,
            "session started"
        );
        Ok(Self {
            session,
            display,
            factory,
            game_config,
            tick: config.tick,
        })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn run(&mut self, command: ScriptCommand) -> Result<()> {
        tracing::debug!(?command, "script command");
        match command {
            ScriptCommand::Focus(target) => self.input(InputEvent::Focus(target.map(Into::into))),
            ScriptCommand::Interact(target) => self.input(InputEvent::Interact(target.into())),
            ScriptCommand::Code { container, value } => self.input(InputEvent::SubmitCredential {
                container: container.into(),
                value,
            }),
            ScriptCommand::Close => match self.closable() {
                Some(ticket) => self.input(InputEvent::Close(ticket)),
                None => tracing::warn!("nothing to close"),
            },
            ScriptCommand::Skip => match self.session.pending_tickets().first() {
                Some(&ticket) => self.input(InputEvent::SequenceFinished(ticket)),
                None => tracing::warn!("nothing to skip"),
            },
            ScriptCommand::Wait(secs) => self.wait(secs),
            ScriptCommand::NewGame => self.input(InputEvent::NewGame),
            ScriptCommand::Quit => self.input(InputEvent::QuitToMenu),
            ScriptCommand::Unload => self.input(InputEvent::SceneUnloading),
            ScriptCommand::Status => self.report(),
        }
        self.follow_scene_requests()
    }

    fn input(&mut self, input: InputEvent) {
        self.session.push_input(input);
        self.session.tick(0.0);
    }

    fn wait(&mut self, secs: f32) {
        let dt = self.tick.as_secs_f32();
        let frames = (secs / dt).ceil().max(0.0) as usize;
        for _ in 0..frames {
            self.session.tick(dt);
        }
    }

    /// The panel on screen, else the oldest step the session waits on.
    fn closable(&self) -> Option<Ticket> {
        let open = self.display.lock().open_panel().map(|(ticket, _)| ticket);
        open.or_else(|| self.session.pending_tickets().first().copied())
    }

    fn report(&self) {
        let registry = &self.session.state().registry;
        let shown = self.display.lock();
        let panel = shown.open_panel().map(|(_, panel)| match panel {
            OpenPanel::Letter(_) => "letter",
            OpenPanel::View(_) => "view",
        });
        tracing::info!(
            scene = self.session.scene(),
            collected = registry.collected_count(),
            required = registry.required_count(),
            complete = registry.is_complete(),
            pending = self.session.pending_tickets().len(),
            panel,
            code_entry = shown.credential_entry().map(EntityId::as_str),
            prompt = shown.prompt(),
            "status"
        );
    }

    /// Loads scenes the session asked for when they are part of the content.
    fn follow_scene_requests(&mut self) -> Result<()> {
        while let Some(scene) = self.session.take_scene_request() {
            if !self.factory.has_scene(&scene) {
                tracing::info!(%scene, "scene is not bundled; staying put");
                continue;
            }
            let content = self.factory.load_scene(&scene, &self.game_config)?;
            self.session.enter_scene(scene, content)?;
        }
        Ok(())
    }
}
