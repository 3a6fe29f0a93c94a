/// Progression configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    /// Number of collected items that completes the collection set.
    /// Not necessarily every known item.
    pub required_count: u32,

    /// Default on-screen time for notices, in milliseconds.
    pub notice_ms: u32,
}

impl GameConfig {
    // ===== fixed feedback timings =====
    /// Notice shown when a keyed door is used without its key.
    pub const LOCKED_NOTICE_MS: u32 = 2_000;
    /// Door open/close and "already inspected" notices.
    pub const SHORT_NOTICE_MS: u32 = 1_500;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_REQUIRED_COUNT: u32 = 5;
    pub const DEFAULT_NOTICE_MS: u32 = 3_000;

    pub fn new() -> Self {
        Self {
            required_count: Self::DEFAULT_REQUIRED_COUNT,
            notice_ms: Self::DEFAULT_NOTICE_MS,
        }
    }

    pub fn with_required_count(required_count: u32) -> Self {
        Self {
            required_count,
            ..Self::new()
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}
