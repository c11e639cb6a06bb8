//! Simulation worker that owns the authoritative [`tale_core::GameState`].
//!
//! Receives commands from [`RuntimeHandle`](crate::RuntimeHandle), resolves
//! intents via [`tale_core::GameEngine`], persists snapshots, and publishes
//! events to the [`EventBus`].

use std::sync::Arc;

use tokio::sync::{mpsc, oneshot};

use tale_core::{CommandContext, GameEngine, GameError, GameState, Intent, TurnError};
use tracing::{debug, error, info, warn};

use crate::api::{Result, RuntimeError, TurnReport};
use crate::events::{Event, EventBus, GameStateEvent, PersistenceEvent};
use crate::repository::StateRepository;

/// Commands that can be sent to the simulation worker
pub enum Command {
    /// Resolve one intent.
    Execute {
        intent: Intent,
        reply: oneshot::Sender<Result<TurnReport>>,
    },
    /// Query the current game state (read-only).
    QueryState { reply: oneshot::Sender<GameState> },
    /// Save the current state under its turn number.
    Save { reply: oneshot::Sender<Result<u64>> },
    /// Replace the current state with a saved snapshot.
    Load {
        turn: u64,
        reply: oneshot::Sender<Result<()>>,
    },
}

/// Background task that processes gameplay commands.
///
/// The worker is the only place the authoritative state is replaced. Each
/// turn runs against the current snapshot and the result is swapped in
/// whole, so a failed turn can never leave partial changes behind.
pub struct SimulationWorker {
    state: GameState,
    engine: GameEngine,
    repository: Option<Arc<dyn StateRepository>>,
    autosave: bool,
    command_rx: mpsc::Receiver<Command>,
    event_bus: EventBus,
}

impl SimulationWorker {
    pub fn new(
        state: GameState,
        engine: GameEngine,
        repository: Option<Arc<dyn StateRepository>>,
        autosave: bool,
        command_rx: mpsc::Receiver<Command>,
        event_bus: EventBus,
    ) -> Self {
        info!(
            turn = state.world.turn,
            scene = %state.current_scene_id,
            characters = state.characters.len(),
            persistence = repository.is_some(),
            "SimulationWorker initialized"
        );

        Self {
            state,
            engine,
            repository,
            autosave,
            command_rx,
            event_bus,
        }
    }

    /// Main worker loop. Ends when every handle has been dropped.
    pub async fn run(mut self) {
        while let Some(cmd) = self.command_rx.recv().await {
            self.handle_command(cmd);
        }
        debug!("SimulationWorker stopped");
    }

    fn handle_command(&mut self, cmd: Command) {
        match cmd {
            Command::Execute { intent, reply } => {
                let result = self.execute(&intent);
                if reply.send(result).is_err() {
                    debug!("Execute reply channel closed (caller dropped)");
                }
            }
            Command::QueryState { reply } => {
                if reply.send(self.state.clone()).is_err() {
                    debug!("QueryState reply channel closed (caller dropped)");
                }
            }
            Command::Save { reply } => {
                let result = self.save();
                if reply.send(result).is_err() {
                    debug!("Save reply channel closed (caller dropped)");
                }
            }
            Command::Load { turn, reply } => {
                let result = self.load(turn);
                if reply.send(result).is_err() {
                    debug!("Load reply channel closed (caller dropped)");
                }
            }
        }
    }

    fn execute(&mut self, intent: &Intent) -> Result<TurnReport> {
        let turn = self.state.world.turn;
        let context = CommandContext::for_current_scene(&self.state);

        let outcome = match self.engine.execute(&self.state, intent, &context) {
            Ok(outcome) => outcome,
            Err(error) => {
                self.reject(intent, turn, &error);
                return Err(RuntimeError::Turn(error));
            }
        };

        debug!(
            turn,
            actor = %intent.actor_id,
            kind = %intent.kind,
            success = outcome.is_success(),
            "turn resolved"
        );

        let report = TurnReport {
            turn: outcome.state.world.turn,
            outcome: outcome.result.outcome,
            narrative: outcome.narrative,
            delta: outcome.delta,
        };
        let advanced = report.turn != turn;
        self.state = outcome.state;

        self.event_bus
            .publish(Event::GameState(GameStateEvent::TurnResolved {
                turn,
                actor: intent.actor_id.clone(),
                kind: intent.kind.clone(),
                outcome: report.outcome,
                narrative: report.narrative.clone(),
                delta: Box::new(report.delta.clone()),
            }));

        if advanced && self.autosave && self.repository.is_some() {
            // A failed autosave must not undo a resolved turn.
            if let Err(error) = self.save() {
                warn!(turn = report.turn, %error, "autosave failed");
            }
        }

        Ok(report)
    }

    fn reject(&self, intent: &Intent, turn: u64, error: &TurnError) {
        if error.severity().aborts_turn() {
            error!(
                target: "runtime::worker",
                actor = %intent.actor_id,
                kind = %intent.kind,
                code = error.error_code(),
                %error,
                "turn aborted by content error"
            );
        } else {
            warn!(
                target: "runtime::worker",
                actor = %intent.actor_id,
                kind = %intent.kind,
                code = error.error_code(),
                %error,
                "turn rejected"
            );
        }

        self.event_bus
            .publish(Event::GameState(GameStateEvent::TurnRejected {
                turn,
                actor: intent.actor_id.clone(),
                kind: intent.kind.clone(),
                code: error.error_code().to_owned(),
                error: error.to_string(),
            }));
    }

    fn save(&self) -> Result<u64> {
        let repository = self.repository.as_ref().ok_or(RuntimeError::NoRepository)?;
        let turn = self.state.world.turn;

        match repository.save(turn, &self.state) {
            Ok(()) => {
                info!(turn, "state saved");
                self.event_bus
                    .publish(Event::Persistence(PersistenceEvent::StateSaved { turn }));
                Ok(turn)
            }
            Err(error) => {
                self.event_bus
                    .publish(Event::Persistence(PersistenceEvent::SaveFailed {
                        turn,
                        error: error.to_string(),
                    }));
                Err(error.into())
            }
        }
    }

    fn load(&mut self, turn: u64) -> Result<()> {
        let repository = self.repository.as_ref().ok_or(RuntimeError::NoRepository)?;
        let state = repository
            .load(turn)?
            .ok_or(RuntimeError::SnapshotNotFound { turn })?;

        self.state = state;
        info!(turn, "state loaded");
        self.event_bus
            .publish(Event::Persistence(PersistenceEvent::StateLoaded { turn }));
        Ok(())
    }
}
