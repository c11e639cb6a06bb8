//! Scene catalog loader.

use std::path::Path;

use crate::loaders::{LoadResult, read_file};
use crate::specs::SceneCatalog;

/// Loader for the scene catalog.
pub struct SceneLoader;

impl SceneLoader {
    pub fn load(path: &Path) -> LoadResult<SceneCatalog> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<SceneCatalog> {
        ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse scene catalog RON: {}", e))
    }
}
