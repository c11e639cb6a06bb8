//! In-memory StateRepository implementation for tests and local runs.

use std::collections::BTreeMap;
use std::sync::RwLock;

use tale_core::GameState;

use crate::repository::{RepositoryError, Result, StateRepository};

/// In-memory implementation of StateRepository.
pub struct InMemoryStateRepo {
    states: RwLock<BTreeMap<u64, GameState>>,
}

impl InMemoryStateRepo {
    /// Create a new empty in-memory repository.
    pub fn new() -> Self {
        Self {
            states: RwLock::new(BTreeMap::new()),
        }
    }

    /// Create with an initial state saved under its own turn.
    pub fn with_initial_state(initial_state: GameState) -> Self {
        let mut states = BTreeMap::new();
        states.insert(initial_state.world.turn, initial_state);
        Self {
            states: RwLock::new(states),
        }
    }
}

impl Default for InMemoryStateRepo {
    fn default() -> Self {
        Self::new()
    }
}

impl StateRepository for InMemoryStateRepo {
    fn save(&self, turn: u64, state: &GameState) -> Result<()> {
        let mut states = self
            .states
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        states.insert(turn, state.clone());
        Ok(())
    }

    fn load(&self, turn: u64) -> Result<Option<GameState>> {
        let states = self
            .states
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(states.get(&turn).cloned())
    }

    fn exists(&self, turn: u64) -> bool {
        self.states
            .read()
            .map(|states| states.contains_key(&turn))
            .unwrap_or(false)
    }

    fn delete(&self, turn: u64) -> Result<()> {
        let mut states = self
            .states
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        states.remove(&turn);
        Ok(())
    }

    fn list_turns(&self) -> Result<Vec<u64>> {
        let states = self
            .states
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(states.keys().copied().collect())
    }
}
