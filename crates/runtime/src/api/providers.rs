//! Asynchronous abstraction for sourcing player intent.
//!
//! Runtime users plug in [`IntentProvider`] implementations so the simulation
//! can run with human input, scripted fixtures, or a parser front end.
use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use tale_core::{CharacterId, GameState, Intent};

use super::errors::{Result, RuntimeError};

/// Trait for providing intents based on the current game state.
#[async_trait]
pub trait IntentProvider: Send + Sync {
    /// Provide the next intent for `actor` given a read-only snapshot.
    async fn provide_intent(&self, actor: &CharacterId, state: &GameState) -> Result<Intent>;
}

/// Replays a fixed list of intents in order.
///
/// Useful for tests and demos. Once the script runs out every request fails
/// with [`RuntimeError::ProviderNotSet`].
pub struct ScriptedIntentProvider {
    script: Mutex<VecDeque<Intent>>,
}

impl ScriptedIntentProvider {
    pub fn new(script: impl IntoIterator<Item = Intent>) -> Self {
        Self {
            script: Mutex::new(script.into_iter().collect()),
        }
    }

    pub fn remaining(&self) -> usize {
        self.script.lock().map(|script| script.len()).unwrap_or(0)
    }
}

#[async_trait]
impl IntentProvider for ScriptedIntentProvider {
    async fn provide_intent(&self, _actor: &CharacterId, _state: &GameState) -> Result<Intent> {
        self.script
            .lock()
            .ok()
            .and_then(|mut script| script.pop_front())
            .ok_or(RuntimeError::ProviderNotSet)
    }
}
