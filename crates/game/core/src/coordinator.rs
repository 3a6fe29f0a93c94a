//! Maps progression events to presentation directives.
//!
//! The [`ProgressCoordinator`] owns no progression data. It turns each
//! [`GameEvent`] into an ordered script of [`Directive`]s using the reactions
//! configured for the chapter: the completion letter shown once the registry
//! latches, and per-container relays run when a container unlocks.

use crate::config::GameConfig;
use crate::event::GameEvent;
use crate::state::{EntityId, WorldError, WorldState};

/// Notice shown when a once-only object is inspected again.
pub const ALREADY_INSPECTED: &str = "Already inspected.";

/// A request for the presentation layer or the scene service.
///
/// Directives for which [`awaits_completion`](Self::awaits_completion) is true
/// hold back the directives after them in the same script until the player
/// (or the display) finishes them.
#[derive(Clone, Debug, PartialEq, Eq, strum::IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Directive {
    /// Plays a narrative beat. `owner` is notified when it finishes.
    ShowSequence {
        owner: Option<EntityId>,
        lines: Vec<String>,
    },
    /// Opens the letter panel; completes when the player closes it.
    PresentLetter { text: String },
    /// Opens a close-up view; completes when the player closes it.
    PresentView { caption: String },
    /// Plays a cutscene; completes when the clip ends.
    PlayCutscene { clip: String },
    /// Opens code entry for a credential-gated container.
    RequestCredential { container: EntityId },
    /// Closes code entry for `container` if it is still open.
    CloseCredential { container: EntityId },
    ShowPrompt { text: String },
    HidePrompt,
    ShowNotice { text: String, duration_ms: u32 },
    /// Failure feedback. Restarts rather than stacks.
    Shake { target: EntityId },
    Reveal { entity: EntityId },
    Hide { entity: EntityId },
    LoadScene { scene: String, fade: bool },
}

impl Directive {
    pub fn name(&self) -> &'static str {
        self.into()
    }

    pub fn awaits_completion(&self) -> bool {
        matches!(
            self,
            Self::ShowSequence { .. }
                | Self::PresentLetter { .. }
                | Self::PresentView { .. }
                | Self::PlayCutscene { .. }
        )
    }
}

/// What happens once the collection set is complete.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CompletionReaction {
    /// Summary text presented in the letter panel.
    pub letter: String,
    /// Directives run after the letter is closed.
    #[cfg_attr(feature = "serde", serde(default))]
    pub follow_up: Vec<Directive>,
}

/// Directives relayed when `container` unlocks.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnlockRelay {
    pub container: EntityId,
    pub directives: Vec<Directive>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProgressCoordinator {
    completion: Option<CompletionReaction>,
    relays: Vec<UnlockRelay>,
}

impl Default for ProgressCoordinator {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressCoordinator {
    pub fn new() -> Self {
        Self {
            completion: None,
            relays: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_completion(mut self, reaction: CompletionReaction) -> Self {
        self.completion = Some(reaction);
        self
    }

    #[must_use]
    pub fn with_relays(mut self, relays: impl IntoIterator<Item = UnlockRelay>) -> Self {
        self.relays.extend(relays);
        self
    }

    pub fn completion(&self) -> Option<&CompletionReaction> {
        self.completion.as_ref()
    }

    pub fn relays(&self) -> &[UnlockRelay] {
        &self.relays
    }

    /// Checks that every relay and every relayed reveal/hide names an entity
    /// of `world`.
    pub fn validate(&self, world: &WorldState) -> Result<(), WorldError> {
        let follow_up = self
            .completion
            .iter()
            .flat_map(|c| c.follow_up.iter().map(|d| ("completion", d)));
        let relayed = self
            .relays
            .iter()
            .flat_map(|r| r.directives.iter().map(move |d| (r.container.as_str(), d)));

        for relay in &self.relays {
            if !world.contains(&relay.container) {
                return Err(WorldError::UnknownTarget {
                    source_name: "relay".to_string(),
                    target: relay.container.clone(),
                });
            }
        }

        for (source, directive) in follow_up.chain(relayed) {
            let target = match directive {
                Directive::Reveal { entity } | Directive::Hide { entity } => entity,
                Directive::Shake { target } => target,
                _ => continue,
            };
            if !world.contains(target) {
                return Err(WorldError::UnknownTarget {
                    source_name: source.to_string(),
                    target: target.clone(),
                });
            }
        }
        Ok(())
    }

    /// Translates one event into the directives it calls for.
    pub fn relay(&self, event: &GameEvent) -> Vec<Directive> {
        match event {
            GameEvent::SetComplete { count } => {
                let Some(reaction) = &self.completion else {
                    tracing::debug!(count, "set complete without a completion reaction");
                    return Vec::new();
                };
                tracing::info!(count, "collection complete, presenting letter");
                let mut script = vec![
                    Directive::HidePrompt,
                    Directive::PresentLetter {
                        text: reaction.letter.clone(),
                    },
                ];
                script.extend(reaction.follow_up.iter().cloned());
                script
            }
            GameEvent::InspectionStarted { entity, lines }
            | GameEvent::ObjectInspected { entity, lines } => vec![
                Directive::HidePrompt,
                Directive::ShowSequence {
                    owner: Some(entity.clone()),
                    lines: lines.clone(),
                },
            ],
            GameEvent::InspectionRefused { .. } => vec![Directive::ShowNotice {
                text: ALREADY_INSPECTED.to_string(),
                duration_ms: GameConfig::SHORT_NOTICE_MS,
            }],
            GameEvent::PickupCollected { after_lines, .. } => {
                let mut script = vec![Directive::HidePrompt];
                if !after_lines.is_empty() {
                    script.push(Directive::ShowSequence {
                        owner: None,
                        lines: after_lines.clone(),
                    });
                }
                script
            }
            GameEvent::CredentialRequested { container } => vec![
                Directive::HidePrompt,
                Directive::RequestCredential {
                    container: container.clone(),
                },
            ],
            GameEvent::CredentialRejected { container } => vec![Directive::Shake {
                target: container.clone(),
            }],
            GameEvent::PrerequisiteMissing { prompt, .. } => vec![Directive::ShowPrompt {
                text: prompt.clone(),
            }],
            GameEvent::ContainerUnlocked { container } => {
                let mut script = vec![Directive::CloseCredential {
                    container: container.clone(),
                }];
                script.extend(
                    self.relays
                        .iter()
                        .filter(|relay| &relay.container == container)
                        .flat_map(|relay| relay.directives.iter().cloned()),
                );
                script
            }
            GameEvent::NoticeRequested { text, duration_ms } => vec![Directive::ShowNotice {
                text: text.clone(),
                duration_ms: *duration_ms,
            }],
            GameEvent::DoorLocked { needs, .. } => vec![Directive::ShowNotice {
                text: format!("Locked! Requires {needs}"),
                duration_ms: GameConfig::LOCKED_NOTICE_MS,
            }],
            GameEvent::DoorToggled { open, .. } => {
                let text = if *open {
                    "Opening the door..."
                } else {
                    "Closing the door..."
                };
                vec![Directive::ShowNotice {
                    text: text.to_string(),
                    duration_ms: GameConfig::SHORT_NOTICE_MS,
                }]
            }
            GameEvent::ExitRequested { scene, .. } => vec![
                Directive::HidePrompt,
                Directive::LoadScene {
                    scene: scene.clone(),
                    fade: true,
                },
            ],
            GameEvent::ItemCollected { .. }
            | GameEvent::InspectionFinished { .. }
            | GameEvent::InspectionCancelled { .. }
            | GameEvent::ObjectInspectionFinished { .. }
            | GameEvent::ContainerConsumed { .. }
            | GameEvent::EntityRevealed { .. }
            | GameEvent::EntityHidden { .. }
            | GameEvent::WatcherCompleted { .. }
            | GameEvent::ProgressReset => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{Entity, EntityKind, GatedContainer};

    fn coordinator() -> ProgressCoordinator {
        ProgressCoordinator::new()
            .with_completion(CompletionReaction {
                letter: "Dear finder, the code is 18082.".into(),
                follow_up: vec![Directive::ShowNotice {
                    text: "Find the safe".into(),
                    duration_ms: 3_000,
                }],
            })
            .with_relays([UnlockRelay {
                container: "mystery_box".into(),
                directives: vec![
                    Directive::PresentView {
                        caption: "A toy train".into(),
                    },
                    Directive::PlayCutscene {
                        clip: "ending".into(),
                    },
                    Directive::LoadScene {
                        scene: "map".into(),
                        fade: false,
                    },
                ],
            }])
    }

    #[test]
    fn completion_presents_letter_then_notice() {
        let script = coordinator().relay(&GameEvent::SetComplete { count: 5 });
        assert_eq!(
            script,
            vec![
                Directive::HidePrompt,
                Directive::PresentLetter {
                    text: "Dear finder, the code is 18082.".into()
                },
                Directive::ShowNotice {
                    text: "Find the safe".into(),
                    duration_ms: 3_000
                },
            ]
        );
        assert!(script[1].awaits_completion());
        assert!(!script[2].awaits_completion());
    }

    #[test]
    fn unlock_relays_only_matching_container() {
        let coordinator = coordinator();
        let boxed = coordinator.relay(&GameEvent::ContainerUnlocked {
            container: "mystery_box".into(),
        });
        assert_eq!(boxed.len(), 4);
        assert_eq!(
            coordinator.relay(&GameEvent::ContainerUnlocked {
                container: "safe".into()
            }),
            vec![Directive::CloseCredential {
                container: "safe".into()
            }]
        );
    }

    #[test]
    fn rejection_shakes_container() {
        let script = coordinator().relay(&GameEvent::CredentialRejected {
            container: "safe".into(),
        });
        assert_eq!(script, vec![Directive::Shake { target: "safe".into() }]);
    }

    #[test]
    fn door_feedback_becomes_notices() {
        let coordinator = coordinator();
        let locked = coordinator.relay(&GameEvent::DoorLocked {
            door: "door".into(),
            needs: "BasementKey".into(),
        });
        assert_eq!(
            locked,
            vec![Directive::ShowNotice {
                text: "Locked! Requires BasementKey".into(),
                duration_ms: GameConfig::LOCKED_NOTICE_MS
            }]
        );
    }

    #[test]
    fn missing_completion_reaction_is_silent() {
        let script = ProgressCoordinator::new().relay(&GameEvent::SetComplete { count: 5 });
        assert!(script.is_empty());
    }

    #[test]
    fn validate_rejects_unknown_relay_container() {
        let world = WorldState::builder()
            .entity(Entity::new(
                "safe",
                EntityKind::Container(GatedContainer::credential("safe", "18082")),
            ))
            .build()
            .unwrap();

        let err = coordinator().validate(&world).unwrap_err();
        assert_eq!(
            err,
            WorldError::UnknownTarget {
                source_name: "relay".into(),
                target: "mystery_box".into()
            }
        );
    }
}
