//! Repository contracts for saving and loading game snapshots.

use tale_core::GameState;

use super::error::Result;

/// Snapshot persistence keyed by turn number.
///
/// Snapshots are whole [`GameState`] values; a repository never sees partial
/// updates. Implementations must round-trip sets and slot registries
/// losslessly.
pub trait StateRepository: Send + Sync {
    /// Save a game state under `turn`, replacing any earlier save.
    fn save(&self, turn: u64, state: &GameState) -> Result<()>;

    /// Load the game state saved under `turn`.
    fn load(&self, turn: u64) -> Result<Option<GameState>>;

    /// Check if a state exists
    fn exists(&self, turn: u64) -> bool;

    /// Delete a state
    fn delete(&self, turn: u64) -> Result<()>;

    /// All saved turns in ascending order.
    fn list_turns(&self) -> Result<Vec<u64>>;

    /// The most recent save, if any.
    fn latest(&self) -> Result<Option<(u64, GameState)>> {
        let Some(turn) = self.list_turns()?.last().copied() else {
            return Ok(None);
        };
        Ok(self.load(turn)?.map(|state| (turn, state)))
    }

    /// Delete all states in a range [start, end]
    fn delete_range(&self, start: u64, end: u64) -> Result<usize> {
        let mut deleted = 0;
        for turn in self.list_turns()? {
            if (start..=end).contains(&turn) {
                self.delete(turn)?;
                deleted += 1;
            }
        }
        Ok(deleted)
    }
}
