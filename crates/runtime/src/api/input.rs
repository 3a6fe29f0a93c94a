//! Player and host input consumed once per tick.
use game_core::EntityId;

use super::Ticket;

/// Input queued by the host and drained at the start of each tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// The hit-tested entity under the crosshair changed. `None` clears it.
    Focus(Option<EntityId>),
    /// Interact was pressed against an entity.
    Interact(EntityId),
    /// A code was entered for a credential-gated container.
    SubmitCredential { container: EntityId, value: String },
    /// The player closed a letter or view panel.
    Close(Ticket),
    /// A narrative beat or cutscene finished playing.
    SequenceFinished(Ticket),
    /// Start over from the first scene with empty progress.
    NewGame,
    /// Drop all progress and return to the main menu.
    QuitToMenu,
    /// The host is tearing the current scene down.
    SceneUnloading,
}
