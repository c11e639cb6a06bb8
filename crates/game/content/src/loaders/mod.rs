//! Content loaders for reading game data from files.
//!
//! Catalogs are RON, configuration is TOML. Each loader reads one file and
//! returns core types; [`ContentFactory`] ties them to a data directory.

pub mod characters;
pub mod config;
pub mod effects;
pub mod factory;
pub mod objects;
pub mod scenes;

pub use characters::CharacterLoader;
pub use config::ConfigLoader;
pub use effects::EffectLoader;
pub use factory::ContentFactory;
pub use objects::ObjectLoader;
pub use scenes::SceneLoader;

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
