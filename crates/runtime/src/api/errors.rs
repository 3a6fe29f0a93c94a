//! Unified error types surfaced by the runtime API.
//!
//! Progression itself never fails; these cover assembling a session from
//! content.
use thiserror::Error;

use game_core::WorldError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("session requires an initial scene before building")]
    MissingScene,

    #[error("scene '{scene}' failed validation")]
    InvalidScene {
        scene: String,
        #[source]
        source: WorldError,
    },
}
