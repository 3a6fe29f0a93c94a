//! Scene loader.

use std::path::Path;

use crate::loaders::{LoadResult, read_file};
use crate::scene::SceneSpec;

/// Loader for scene definitions from RON files.
pub struct SceneLoader;

impl SceneLoader {
    /// Load a scene definition from a RON file.
    ///
    /// The result is unvalidated; call [`SceneSpec::build`] to resolve
    /// defaults and check references.
    pub fn load(path: &Path) -> LoadResult<SceneSpec> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse scene RON {}: {}", path.display(), e))
    }

    /// Parse a scene definition from RON text.
    pub fn parse(content: &str) -> LoadResult<SceneSpec> {
        let spec: SceneSpec = ron::from_str(content)?;
        Ok(spec)
    }
}
