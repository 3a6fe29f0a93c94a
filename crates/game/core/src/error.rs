//! Error classification shared by game-core error types.
//!
//! Progression itself cannot fail: unknown ids, repeated transitions and wrong
//! codes end in a no-op or a feedback event. Only assembling a world from
//! authored content is fallible, see [`crate::state::WorldError`].

/// How an error should be handled by whoever receives it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Bad authored content (duplicate ids, dangling references). Fix the
    /// data; retrying cannot help.
    Validation,
}

impl ErrorSeverity {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Validation => "validation",
        }
    }
}

/// Implemented by every game-core error so hosts can log and route errors
/// without matching on concrete types.
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    fn severity(&self) -> ErrorSeverity;

    /// Stable identifier for logs. Defaults to the type name.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
