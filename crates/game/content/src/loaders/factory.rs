//! Content factory for loading a whole game from a data directory.

use std::path::{Path, PathBuf};

use tale_core::{EffectRegistry, GameConfig, ObjectDefinition};
use tracing::{debug, info};

use crate::content::GameContent;
use crate::loaders::{
    CharacterLoader, ConfigLoader, EffectLoader, LoadResult, ObjectLoader, SceneLoader,
};
use crate::specs::{CharacterSpec, SceneCatalog};

/// Content factory that loads all game content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml      (optional)
/// ├── effects.ron      (optional)
/// ├── objects.ron      (optional)
/// ├── characters.ron
/// └── scenes.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub const CONFIG_FILE: &'static str = "config.toml";
    pub const EFFECTS_FILE: &'static str = "effects.ron";
    pub const OBJECTS_FILE: &'static str = "objects.ron";
    pub const CHARACTERS_FILE: &'static str = "characters.ron";
    pub const SCENES_FILE: &'static str = "scenes.ron";

    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load game configuration from `config.toml`, or defaults if absent.
    pub fn load_config(&self) -> LoadResult<GameConfig> {
        self.optional(Self::CONFIG_FILE, ConfigLoader::load)
    }

    /// Load game effect definitions from `effects.ron`.
    pub fn load_effects(&self) -> LoadResult<EffectRegistry> {
        self.optional(Self::EFFECTS_FILE, EffectLoader::load)
    }

    /// Load registered object definitions from `objects.ron`.
    pub fn load_objects(&self) -> LoadResult<Vec<ObjectDefinition>> {
        self.optional(Self::OBJECTS_FILE, ObjectLoader::load)
    }

    pub fn load_characters(&self) -> LoadResult<Vec<CharacterSpec>> {
        CharacterLoader::load(&self.data_dir.join(Self::CHARACTERS_FILE))
    }

    pub fn load_scenes(&self) -> LoadResult<SceneCatalog> {
        SceneLoader::load(&self.data_dir.join(Self::SCENES_FILE))
    }

    /// Loads every catalog. Validation happens when a game is created.
    pub fn load(&self) -> LoadResult<GameContent> {
        let content = GameContent {
            config: self.load_config()?,
            effects: self.load_effects()?,
            objects: self.load_objects()?,
            characters: self.load_characters()?,
            scenes: self.load_scenes()?,
        };

        info!(
            data_dir = %self.data_dir.display(),
            effects = content.effects.len(),
            objects = content.objects.len(),
            characters = content.characters.len(),
            scenes = content.scenes.scenes.len(),
            "content loaded"
        );
        Ok(content)
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    fn optional<T: Default>(
        &self,
        file: &str,
        load: impl FnOnce(&Path) -> LoadResult<T>,
    ) -> LoadResult<T> {
        let path = self.data_dir.join(file);
        if path.exists() {
            load(&path)
        } else {
            debug!(path = %path.display(), "optional content file missing, using defaults");
            Ok(T::default())
        }
    }
}
