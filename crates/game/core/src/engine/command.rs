use crate::state::EntityId;

/// A request to mutate progression state.
///
/// Commands are produced by the runtime from player input and from
/// coordinator directives; every command is applied synchronously.
#[derive(Clone, Debug, PartialEq, Eq, strum::IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Command {
    /// The player pressed interact on `target`.
    Interact { target: EntityId },
    /// A code was entered for a credential-gated container.
    SubmitCredential { target: EntityId, value: String },
    /// A narrative beat owned by `target` finished.
    FinishInspection { target: EntityId },
    /// A narrative beat owned by `target` was interrupted.
    CancelInspection { target: EntityId },
    /// Make an inert entity available.
    Reveal { target: EntityId },
    /// Remove an entity from the world.
    Hide { target: EntityId },
    /// Complete a progress watcher regardless of its items.
    ForceCompleteWatcher { watcher: String },
    /// Clear every collection record (new game boundary).
    ResetProgress,
}

impl Command {
    pub fn name(&self) -> &'static str {
        self.into()
    }
}
