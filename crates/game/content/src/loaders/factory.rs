//! Content factory for building scenes from data files.

use std::path::{Path, PathBuf};

use game_core::GameConfig;

use crate::loaders::{ConfigLoader, LoadResult, SceneLoader};
use crate::scene::SceneContent;

/// Content factory that loads all chapter content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// └── scenes/
///     ├── room.ron
///     └── map.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load game configuration from `config.toml`.
    pub fn load_config(&self) -> LoadResult<GameConfig> {
        let path = self.data_dir.join("config.toml");
        ConfigLoader::load(&path)
    }

    /// Load and validate `scenes/{name}.ron`.
    pub fn load_scene(&self, name: &str, config: &GameConfig) -> LoadResult<SceneContent> {
        let path = self.scene_path(name);
        let spec = SceneLoader::load(&path)?;
        let scene = spec
            .build(config)
            .map_err(|e| anyhow::anyhow!("Invalid scene '{}': {}", name, e))?;
        Ok(scene)
    }

    /// Whether a scene file exists for `name`.
    pub fn has_scene(&self, name: &str) -> bool {
        self.scene_path(name).is_file()
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    fn scene_path(&self, name: &str) -> PathBuf {
        self.data_dir.join("scenes").join(format!("{}.ron", name))
    }
}
