//! End-to-end chapter scenarios driven through the public session API.

use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use game_content::{ContentFactory, SceneContent};
use game_core::{
    EntityId, GameConfig, GameEvent, ItemId, ProgressCoordinator, UnlockRelay, WorldState,
};
use runtime::{
    InputEvent, MAIN_MENU_SCENE, NarrativeDisplay, RuntimeConfig, RuntimeError, SceneService,
    Session, TaskDisplay, Ticket, Topic,
};

// ============================================================================
// Fixtures
// ============================================================================

/// Everything the recording collaborators saw.
#[derive(Default, Debug)]
struct Log {
    sequences: Vec<(Ticket, Vec<String>)>,
    letters: Vec<(Ticket, String)>,
    views: Vec<(Ticket, String)>,
    cutscenes: Vec<(Ticket, String)>,
    prompts: Vec<Option<String>>,
    notices: Vec<String>,
    credentials: Vec<EntityId>,
    closed_credentials: Vec<EntityId>,
    shakes: Vec<EntityId>,
    cancelled: Vec<Ticket>,
    loads: Vec<String>,
}

#[derive(Clone, Default)]
struct Recorder(Arc<Mutex<Log>>);

impl Recorder {
    fn log(&self) -> MutexGuard<'_, Log> {
        self.0.lock().unwrap()
    }
}

impl NarrativeDisplay for Recorder {
    fn show_sequence(&mut self, ticket: Ticket, lines: &[String]) {
        self.log().sequences.push((ticket, lines.to_vec()));
    }

    fn show_prompt(&mut self, text: &str) {
        self.log().prompts.push(Some(text.to_string()));
    }

    fn hide_prompt(&mut self) {
        self.log().prompts.push(None);
    }

    fn show_notice(&mut self, text: &str, _duration: Duration) {
        self.log().notices.push(text.to_string());
    }

    fn present_letter(&mut self, ticket: Ticket, text: &str) -> bool {
        self.log().letters.push((ticket, text.to_string()));
        true
    }

    fn present_view(&mut self, ticket: Ticket, caption: &str) -> bool {
        self.log().views.push((ticket, caption.to_string()));
        true
    }

    fn request_credential(&mut self, container: &EntityId) {
        self.log().credentials.push(container.clone());
    }

    fn close_credential(&mut self, container: &EntityId) {
        self.log().closed_credentials.push(container.clone());
    }

    fn shake(&mut self, target: &EntityId) {
        self.log().shakes.push(target.clone());
    }

    fn cancel(&mut self, ticket: Ticket) {
        self.log().cancelled.push(ticket);
    }
}

impl SceneService for Recorder {
    fn load_scene(&mut self, name: &str) {
        self.log().loads.push(name.to_string());
    }

    fn fade_then_load(&mut self, name: &str) {
        self.log().loads.push(format!("fade:{name}"));
    }

    fn play_cutscene(&mut self, ticket: Ticket, clip: &str) -> bool {
        self.log().cutscenes.push((ticket, clip.to_string()));
        true
    }
}

fn factory() -> ContentFactory {
    ContentFactory::new(PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../data"))
}

fn load(name: &str) -> (GameConfig, SceneContent) {
    let factory = factory();
    let config = factory.load_config().expect("config.toml should load");
    let scene = factory
        .load_scene(name, &config)
        .expect("scene should load");
    (config, scene)
}

fn session_with(recorder: &Recorder) -> Session {
    let (game_config, room) = load("room");
    Session::builder()
        .config(RuntimeConfig {
            game_config,
            ..RuntimeConfig::default()
        })
        .display(recorder.clone())
        .scenes(recorder.clone())
        .scene("room", room)
        .build()
        .expect("room should build a session")
}

fn input(session: &mut Session, input: InputEvent) -> Vec<GameEvent> {
    session.push_input(input);
    session.tick(0.0)
}

fn interact(session: &mut Session, entity: &str) -> Vec<GameEvent> {
    input(session, InputEvent::Interact(entity.into()))
}

fn collected(events: &[GameEvent], item: &str) -> bool {
    events
        .iter()
        .any(|e| matches!(e, GameEvent::ItemCollected { item: i, .. } if i.as_str() == item))
}

// ============================================================================
// Full playthrough
// ============================================================================

#[test]
fn complete_chapter_playthrough() {
    let recorder = Recorder::default();
    let mut session = session_with(&recorder);
    assert_eq!(session.scene(), "room");
    assert_eq!(session.state().registry.required_count(), 5);

    // ------------------------------------------------------------------
    // Phase 1: a pickup with a narrative beat needs two interactions
    // ------------------------------------------------------------------
    let events = interact(&mut session, "piece_1");
    assert!(matches!(events[0], GameEvent::InspectionStarted { .. }));
    let (beat, lines) = recorder.log().sequences[0].clone();
    assert_eq!(lines.len(), 2);

    // Interacting again while the beat plays does nothing.
    assert!(interact(&mut session, "piece_1").is_empty());

    let events = input(&mut session, InputEvent::SequenceFinished(beat));
    assert_eq!(
        events,
        vec![GameEvent::InspectionFinished {
            entity: "piece_1".into()
        }]
    );
    assert!(collected(&interact(&mut session, "piece_1"), "P1"));

    // ------------------------------------------------------------------
    // Phase 2: the rest of the set completes and opens the letter
    // ------------------------------------------------------------------
    for piece in ["piece_2", "piece_3", "piece_5"] {
        let events = interact(&mut session, piece);
        assert!(events.iter().any(|e| matches!(e, GameEvent::PickupCollected { .. })));
    }
    assert!(recorder.log().letters.is_empty());

    let events = interact(&mut session, "piece_4");
    assert!(events.contains(&GameEvent::SetComplete { count: 5 }));
    assert!(events.contains(&GameEvent::WatcherCompleted {
        watcher: "painting".into()
    }));
    assert!(events.contains(&GameEvent::EntityRevealed {
        entity: "painting_complete".into()
    }));
    assert!(session.state().registry.is_complete());

    let (letter, text) = recorder.log().letters[0].clone();
    assert!(text.contains("18082"));
    // The after-beat of the last piece is waiting too.
    assert_eq!(session.pending_tickets().len(), 2);
    assert!(!recorder.log().notices.contains(&"Find the safe".to_string()));

    input(&mut session, InputEvent::Close(letter));
    assert!(recorder.log().notices.contains(&"Find the safe".to_string()));
    assert!(recorder.log().cancelled.contains(&letter));

    // ------------------------------------------------------------------
    // Phase 3: the safe rejects a wrong code and opens on the right one
    // ------------------------------------------------------------------
    let events = interact(&mut session, "safe");
    assert_eq!(
        events,
        vec![GameEvent::CredentialRequested {
            container: "safe".into()
        }]
    );
    assert_eq!(recorder.log().credentials, vec![EntityId::from("safe")]);

    let wrong = InputEvent::SubmitCredential {
        container: "safe".into(),
        value: "12345".into(),
    };
    input(&mut session, wrong.clone());
    input(&mut session, wrong);
    assert_eq!(recorder.log().shakes.len(), 2);
    assert!(recorder.log().closed_credentials.is_empty());

    let events = input(
        &mut session,
        InputEvent::SubmitCredential {
            container: "safe".into(),
            value: "18082".into(),
        },
    );
    assert_eq!(
        events[0],
        GameEvent::ContainerUnlocked {
            container: "safe".into()
        }
    );
    assert!(events.contains(&GameEvent::EntityRevealed {
        entity: "safe_key".into()
    }));
    assert!(events.contains(&GameEvent::EntityRevealed {
        entity: "mystery_box".into()
    }));
    assert!(recorder.log().notices.contains(&"Mystery box appeared!".to_string()));
    assert_eq!(recorder.log().closed_credentials, vec![EntityId::from("safe")]);

    // A late correct code does nothing once the safe is gone.
    assert!(
        input(
            &mut session,
            InputEvent::SubmitCredential {
                container: "safe".into(),
                value: "18082".into(),
            },
        )
        .is_empty()
    );

    // ------------------------------------------------------------------
    // Phase 4: the mystery box needs the key, then plays its ending
    // ------------------------------------------------------------------
    let events = interact(&mut session, "mystery_box");
    assert!(matches!(events[0], GameEvent::PrerequisiteMissing { .. }));
    assert_eq!(
        recorder.log().prompts.last(),
        Some(&Some("Need the SafeKey to open the mystery box!".to_string()))
    );

    assert!(collected(&interact(&mut session, "safe_key"), "SafeKey"));

    let events = interact(&mut session, "mystery_box");
    assert_eq!(
        events,
        vec![GameEvent::ContainerUnlocked {
            container: "mystery_box".into()
        }]
    );
    let (view, caption) = recorder.log().views[0].clone();
    assert_eq!(caption, "A wooden toy train");
    assert!(recorder.log().cutscenes.is_empty());

    input(&mut session, InputEvent::Close(view));
    let (cutscene, _) = recorder.log().cutscenes[0].clone();
    assert_eq!(session.take_scene_request(), None);

    input(&mut session, InputEvent::SequenceFinished(cutscene));
    assert_eq!(recorder.log().loads, vec!["map".to_string()]);
    assert_eq!(session.take_scene_request().as_deref(), Some("map"));

    // ------------------------------------------------------------------
    // Phase 5: the next scene keeps collected items
    // ------------------------------------------------------------------
    let (_, map) = load("map");
    session.enter_scene("map", map).expect("map should validate");
    assert_eq!(session.scene(), "map");
    assert_eq!(session.state().registry.collected_count(), 6);

    let events = interact(&mut session, "gate");
    assert_eq!(
        events,
        vec![GameEvent::DoorToggled {
            door: "gate".into(),
            open: true
        }]
    );

    let events = interact(&mut session, "storage_door");
    assert_eq!(
        events,
        vec![GameEvent::DoorLocked {
            door: "storage_door".into(),
            needs: ItemId::from("StorageKey")
        }]
    );
    assert!(
        recorder
            .log()
            .notices
            .contains(&"Locked! Requires StorageKey".to_string())
    );

    interact(&mut session, "final_model");
    assert_eq!(recorder.log().loads.last().map(String::as_str), Some("fade:NextLevel"));
    assert_eq!(session.take_scene_request().as_deref(), Some("NextLevel"));

    // An exit only fires once.
    assert!(interact(&mut session, "final_model").is_empty());
}

// ============================================================================
// Interruptions and lifecycle
// ============================================================================

#[test]
fn scene_unloading_returns_running_beat_to_available() {
    let recorder = Recorder::default();
    let mut session = session_with(&recorder);

    interact(&mut session, "piece_1");
    let (beat, _) = recorder.log().sequences[0].clone();

    let events = input(&mut session, InputEvent::SceneUnloading);
    assert_eq!(
        events,
        vec![GameEvent::InspectionCancelled {
            entity: "piece_1".into()
        }]
    );
    assert!(recorder.log().cancelled.contains(&beat));
    assert!(session.pending_tickets().is_empty());
    assert!(!session.state().registry.is_collected(&"P1".into()));

    // A late completion of the abandoned beat is ignored.
    assert!(input(&mut session, InputEvent::SequenceFinished(beat)).is_empty());

    // The beat starts over on the next interaction.
    let events = interact(&mut session, "piece_1");
    assert!(matches!(events[0], GameEvent::InspectionStarted { .. }));
}

#[test]
fn quit_to_menu_clears_progress() {
    let recorder = Recorder::default();
    let mut session = session_with(&recorder);
    interact(&mut session, "piece_2");
    assert_eq!(session.state().registry.collected_count(), 1);

    let events = input(&mut session, InputEvent::QuitToMenu);
    assert_eq!(events, vec![GameEvent::ProgressReset]);
    assert_eq!(session.state().registry.collected_count(), 0);
    assert!(session.state().world.is_empty());
    assert_eq!(recorder.log().loads.last().map(String::as_str), Some(MAIN_MENU_SCENE));
    assert_eq!(session.take_scene_request().as_deref(), Some(MAIN_MENU_SCENE));
}

#[test]
fn new_game_restarts_from_first_scene() {
    let recorder = Recorder::default();
    let mut session = session_with(&recorder);
    interact(&mut session, "piece_2");

    input(&mut session, InputEvent::NewGame);
    let first = session.take_scene_request().expect("new game requests a scene");
    assert_eq!(first, "room");

    let (_, room) = load(&first);
    session.enter_scene(first, room).expect("room should validate");
    assert!(collected(&interact(&mut session, "piece_2"), "P2"));
}

#[test]
fn reentering_scene_keeps_collected_pickups_spent() {
    let recorder = Recorder::default();
    let mut session = session_with(&recorder);
    interact(&mut session, "piece_2");

    let (_, room) = load("room");
    session.enter_scene("room", room).expect("room should validate");

    assert_eq!(session.state().prompt_for(&"piece_2".into()), None);
    assert!(interact(&mut session, "piece_2").is_empty());
    assert_eq!(session.state().registry.collected_count(), 1);
}

#[test]
fn focus_prompt_is_suppressed_while_busy() {
    let recorder = Recorder::default();
    let mut session = session_with(&recorder);

    input(&mut session, InputEvent::Focus(Some("piece_2".into())));
    assert_eq!(
        recorder.log().prompts.last(),
        Some(&Some("[E] Pick up Torn piece".to_string()))
    );

    interact(&mut session, "piece_1");
    input(&mut session, InputEvent::Focus(Some("piece_2".into())));
    assert_eq!(recorder.log().prompts.last(), Some(&None));
}

#[test]
fn once_only_inspectable_refuses_second_look() {
    let recorder = Recorder::default();
    let mut session = session_with(&recorder);

    interact(&mut session, "clock");
    let (beat, lines) = recorder.log().sequences[0].clone();
    assert_eq!(lines[0], "It stopped at 8:08.");
    input(&mut session, InputEvent::SequenceFinished(beat));

    let events = interact(&mut session, "clock");
    assert_eq!(
        events,
        vec![GameEvent::InspectionRefused {
            entity: "clock".into()
        }]
    );
    assert_eq!(
        recorder.log().notices.last().map(String::as_str),
        Some("Already inspected.")
    );
}

// ============================================================================
// Missing or frame-driven collaborators
// ============================================================================

#[test]
fn headless_session_never_stalls() {
    let (game_config, room) = load("room");
    let mut session = Session::builder()
        .config(RuntimeConfig {
            game_config,
            ..RuntimeConfig::default()
        })
        .scene("room", room)
        .build()
        .unwrap();

    let events = interact(&mut session, "piece_1");
    assert!(events.contains(&GameEvent::InspectionFinished {
        entity: "piece_1".into()
    }));
    assert!(collected(&interact(&mut session, "piece_1"), "P1"));

    for piece in ["piece_2", "piece_3", "piece_4", "piece_5"] {
        interact(&mut session, piece);
    }
    assert!(session.state().registry.is_complete());
    assert!(session.pending_tickets().is_empty());
}

#[test]
fn task_display_finishes_beats_by_itself() {
    let (game_config, room) = load("room");
    let mut session = Session::builder()
        .config(RuntimeConfig {
            game_config,
            ..RuntimeConfig::default()
        })
        .display(TaskDisplay::default())
        .scene("room", room)
        .build()
        .unwrap();

    interact(&mut session, "piece_1");
    assert_eq!(session.pending_tickets().len(), 1);

    let mut finished = false;
    for _ in 0..300 {
        let events = session.tick(0.1);
        if events.contains(&GameEvent::InspectionFinished {
            entity: "piece_1".into(),
        }) {
            finished = true;
            break;
        }
    }
    assert!(finished, "beat should finish within 30 simulated seconds");
    assert!(collected(&interact(&mut session, "piece_1"), "P1"));
}

#[test]
fn missing_scene_is_an_error() {
    assert!(matches!(
        Session::builder().build(),
        Err(RuntimeError::MissingScene)
    ));
}

#[test]
fn scene_with_dangling_relay_is_rejected() {
    let broken = SceneContent {
        world: WorldState::default(),
        coordinator: ProgressCoordinator::new().with_relays([UnlockRelay {
            container: "ghost".into(),
            directives: Vec::new(),
        }]),
    };

    let result = Session::builder().scene("broken", broken).build();
    assert!(matches!(
        result,
        Err(RuntimeError::InvalidScene { ref scene, .. }) if scene == "broken"
    ));
}

#[tokio::test]
async fn progress_topic_receives_collections() {
    let recorder = Recorder::default();
    let mut session = session_with(&recorder);
    let mut progress = session.events().subscribe(Topic::Progress);

    interact(&mut session, "piece_2");

    let event = progress.recv().await.expect("progress event");
    assert!(matches!(
        event,
        runtime::Event::Game(GameEvent::ItemCollected { count: 1, .. })
    ));
}
