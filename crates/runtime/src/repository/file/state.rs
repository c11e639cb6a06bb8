//! File-based StateRepository implementation.

use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use tale_core::GameState;

use crate::repository::{RepositoryError, Result, StateRepository};

/// File-based implementation of StateRepository.
///
/// # File Format
///
/// States are stored as `state_{turn}.json`. Sets serialize as JSON arrays
/// and deserialize back into sets, so a save/load cycle is lossless. Writes
/// go to a temporary file that is renamed into place.
pub struct FileStateRepository {
    base_dir: PathBuf,
}

impl FileStateRepository {
    /// Create a new file-based state repository.
    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        fs::create_dir_all(&base_dir).map_err(RepositoryError::Io)?;
        Ok(Self { base_dir })
    }

    /// Repository under the platform data directory (`<data>/saves`).
    pub fn in_default_location() -> Result<Self> {
        let dirs = ProjectDirs::from("", "", "tale").ok_or(RepositoryError::NoDataDirectory)?;
        Self::new(dirs.data_dir().join("saves"))
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Get the path to a state file.
    fn state_path(&self, turn: u64) -> PathBuf {
        self.base_dir.join(format!("state_{}.json", turn))
    }
}

impl StateRepository for FileStateRepository {
    fn save(&self, turn: u64, state: &GameState) -> Result<()> {
        let path = self.state_path(turn);
        let temp_path = path.with_extension("json.tmp");

        let bytes =
            serde_json::to_vec_pretty(state).map_err(|e| RepositoryError::Json(e.to_string()))?;

        fs::write(&temp_path, bytes).map_err(RepositoryError::Io)?;
        fs::rename(&temp_path, &path).map_err(RepositoryError::Io)?;

        tracing::debug!("Saved state[{}] to {}", turn, path.display());

        Ok(())
    }

    fn load(&self, turn: u64) -> Result<Option<GameState>> {
        let path = self.state_path(turn);

        if !path.exists() {
            return Ok(None);
        }

        let bytes = fs::read(&path).map_err(RepositoryError::Io)?;
        let state: GameState = serde_json::from_slice(&bytes)
            .map_err(|e| RepositoryError::CorruptedData(format!("{}: {}", path.display(), e)))?;

        tracing::debug!("Loaded state[{}] from {}", turn, path.display());

        Ok(Some(state))
    }

    fn exists(&self, turn: u64) -> bool {
        self.state_path(turn).exists()
    }

    fn delete(&self, turn: u64) -> Result<()> {
        let path = self.state_path(turn);

        if path.exists() {
            fs::remove_file(&path).map_err(RepositoryError::Io)?;
            tracing::debug!("Deleted state[{}]", turn);
        }

        Ok(())
    }

    fn list_turns(&self) -> Result<Vec<u64>> {
        let mut turns = Vec::new();

        let entries = fs::read_dir(&self.base_dir).map_err(RepositoryError::Io)?;

        for entry in entries {
            let entry = entry.map_err(RepositoryError::Io)?;
            let path = entry.path();

            if let Some(filename) = path.file_name().and_then(|s| s.to_str())
                && let Some(turn_str) = filename
                    .strip_prefix("state_")
                    .and_then(|s| s.strip_suffix(".json"))
                && let Ok(turn) = turn_str.parse::<u64>()
            {
                turns.push(turn);
            }
        }

        turns.sort_unstable();
        Ok(turns)
    }
}

#[cfg(test)]
mod tests {
    use tale_core::{CharacterId, CharacterState, ObjectDefinition, Slot, StatBlock, StateId};

    use super::*;

    fn state() -> GameState {
        let mut hero = CharacterState::new(CharacterId::new("hero"), "Hero", StatBlock::default())
            .with_trait("curious")
            .with_flag("met_guard")
            .with_item(
                ObjectDefinition::new("belt", "Belt").with_slot(Slot::new("buckle").holding("gem")),
            );
        hero.traits.insert("stubborn".into());

        let mut state = GameState::new("hall")
            .with_seed(99)
            .with_character(hero)
            .with_scene("hall", vec![ObjectDefinition::new("door", "Door")])
            .with_registered_object(ObjectDefinition::new("gem", "Gem").with_weight(0.2));
        state.object_states.insert("door".into(), StateId::new("closed"));
        state.world.visited_scenes.insert("hall".into());
        state.world.turn = 4;
        state
    }

    #[test]
    fn save_load_is_lossless() {
        let dir = tempfile::tempdir().unwrap();
        let repo = FileStateRepository::new(dir.path()).unwrap();
        let state = state();

        repo.save(4, &state).unwrap();

        assert!(dir.path().join("state_4.json").exists());
        assert!(!dir.path().join("state_4.json.tmp").exists());
        assert_eq!(repo.load(4).unwrap(), Some(state));
        assert_eq!(repo.load(5).unwrap(), None);
    }

    #[test]
    fn sets_are_written_as_arrays() {
        let dir = tempfile::tempdir().unwrap();
        let repo = FileStateRepository::new(dir.path()).unwrap();
        repo.save(4, &state()).unwrap();

        let raw = fs::read_to_string(dir.path().join("state_4.json")).unwrap();
        let json: serde_json::Value = serde_json::from_str(&raw).unwrap();

        assert_eq!(
            json["characters"]["hero"]["traits"],
            serde_json::json!(["curious", "stubborn"])
        );
        assert_eq!(json["world"]["visited_scenes"], serde_json::json!(["hall"]));
        assert_eq!(json["objects"]["gem"]["weight"], serde_json::json!(0.2));
    }

    #[test]
    fn lists_only_state_files() {
        let dir = tempfile::tempdir().unwrap();
        let repo = FileStateRepository::new(dir.path()).unwrap();
        repo.save(10, &state()).unwrap();
        repo.save(2, &state()).unwrap();
        fs::write(dir.path().join("notes.txt"), "hi").unwrap();
        fs::write(dir.path().join("state_x.json"), "{}").unwrap();

        assert_eq!(repo.list_turns().unwrap(), vec![2, 10]);
        assert_eq!(repo.latest().unwrap().map(|(turn, _)| turn), Some(10));

        repo.delete(10).unwrap();
        assert!(!repo.exists(10));
    }

    #[test]
    fn corrupted_files_are_reported() {
        let dir = tempfile::tempdir().unwrap();
        let repo = FileStateRepository::new(dir.path()).unwrap();
        fs::write(dir.path().join("state_1.json"), "{ not json").unwrap();

        assert!(matches!(
            repo.load(1),
            Err(RepositoryError::CorruptedData(_))
        ));
    }
}
