//! Event payloads published on the bus.

use serde::{Deserialize, Serialize};
use tale_core::{CharacterId, Outcome, StateDelta};

/// Turn resolution results.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum GameStateEvent {
    /// An intent was resolved. Failure outcomes land here too: they are
    /// narrated to the player but leave the state unchanged.
    TurnResolved {
        /// Turn counter before the intent was resolved.
        turn: u64,
        actor: CharacterId,
        kind: String,
        outcome: Outcome,
        narrative: String,
        delta: Box<StateDelta>,
    },

    /// The engine refused the intent with an error; no turn was consumed.
    TurnRejected {
        turn: u64,
        actor: CharacterId,
        kind: String,
        code: String,
        error: String,
    },
}

/// Snapshot persistence notifications.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum PersistenceEvent {
    StateSaved { turn: u64 },
    SaveFailed { turn: u64, error: String },
    StateLoaded { turn: u64 },
}
