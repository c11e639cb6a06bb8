//! Cloneable façade for issuing commands to the runtime.
//!
//! [`RuntimeHandle`] hides channel plumbing and offers async helpers for
//! resolving intents, saving and loading snapshots, or streaming events from
//! specific topics.
use tokio::sync::{broadcast, mpsc, oneshot};

use tale_core::{GameState, Intent, Outcome, StateDelta};

use super::errors::{Result, RuntimeError};
use crate::events::{Event, EventBus, Topic};
use crate::workers::Command;

/// What one resolved intent produced, without the full snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct TurnReport {
    /// Turn counter after resolution. Unchanged for failure outcomes.
    pub turn: u64,
    pub outcome: Outcome,
    pub narrative: String,
    pub delta: StateDelta,
}

impl TurnReport {
    pub fn is_success(&self) -> bool {
        self.outcome == Outcome::Success
    }
}

/// Client-facing handle to interact with the runtime
#[derive(Clone)]
pub struct RuntimeHandle {
    command_tx: mpsc::Sender<Command>,
    event_bus: EventBus,
}

impl RuntimeHandle {
    pub(crate) fn new(command_tx: mpsc::Sender<Command>, event_bus: EventBus) -> Self {
        Self {
            command_tx,
            event_bus,
        }
    }

    async fn request<T>(&self, command: impl FnOnce(oneshot::Sender<T>) -> Command) -> Result<T> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(command(reply_tx))
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    /// Resolve one intent against the authoritative state.
    ///
    /// Game-outcome failures come back as a report with
    /// [`Outcome::Failure`]; only engine and content errors are `Err`.
    pub async fn execute(&self, intent: Intent) -> Result<TurnReport> {
        self.request(|reply| Command::Execute { intent, reply })
            .await?
    }

    /// Query the current game state (read-only snapshot)
    pub async fn query_state(&self) -> Result<GameState> {
        self.request(|reply| Command::QueryState { reply }).await
    }

    /// Save the current state, returning the turn it was saved under.
    pub async fn save(&self) -> Result<u64> {
        self.request(|reply| Command::Save { reply }).await?
    }

    /// Replace the current state with the snapshot saved under `turn`.
    pub async fn load(&self, turn: u64) -> Result<()> {
        self.request(|reply| Command::Load { turn, reply }).await?
    }

    /// Subscribe to events from a specific topic
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use tale_runtime::Topic;
    ///
    /// let mut turns = handle.subscribe(Topic::GameState);
    /// while let Ok(event) = turns.recv().await {
    ///     // Handle resolved and rejected turns
    /// }
    /// ```
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.event_bus.subscribe(topic)
    }

    /// Subscribe to multiple topics at once
    pub fn subscribe_multiple(
        &self,
        topics: &[Topic],
    ) -> std::collections::HashMap<Topic, broadcast::Receiver<Event>> {
        self.event_bus.subscribe_multiple(topics)
    }

    /// Get a reference to the event bus for advanced usage
    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }
}
