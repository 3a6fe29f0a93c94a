//! Client configuration read from the process environment.
use std::env;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// Directory holding `config.toml` and `scenes/`.
    pub data_dir: PathBuf,
    /// Command script to play; stdin when unset.
    pub script: Option<PathBuf>,
    /// Frame length used by `wait`.
    pub tick: Duration,
    /// Scene entered at start-up and by `newgame`.
    pub first_scene: String,
    /// Write a log file here in addition to stderr.
    pub log_dir: Option<PathBuf>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            script: None,
            tick: Duration::from_millis(16),
            first_scene: "room".to_string(),
            log_dir: None,
        }
    }
}

impl ClientConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `CHAPTER_DATA_DIR` - Content directory (default: `data`)
    /// - `CHAPTER_SCRIPT` - Command script file (default: read stdin)
    /// - `CHAPTER_TICK_MS` - Frame length in milliseconds (default: 16)
    /// - `CHAPTER_FIRST_SCENE` - Starting scene (default: `room`)
    /// - `LOG_DIR` - Directory for `client.log` (default: stderr only)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(dir) = env::var("CHAPTER_DATA_DIR") {
            config.data_dir = PathBuf::from(dir);
        }
        config.script = env::var("CHAPTER_SCRIPT").ok().map(PathBuf::from);

        if let Some(ms) = read_env::<u64>("CHAPTER_TICK_MS") {
            config.tick = Duration::from_millis(ms.max(1));
        }
        if let Ok(scene) = env::var("CHAPTER_FIRST_SCENE") {
            config.first_scene = scene;
        }
        config.log_dir = env::var("LOG_DIR").ok().map(PathBuf::from);

        config
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
