//! High-level runtime orchestrator.
//!
//! The runtime owns the simulation worker, wires up command/event channels,
//! and exposes a builder-based API for clients to drive the game.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use tale_content::{GameContent, validate_state};
use tale_core::{CharacterId, GameEngine, GameError, GameState};
use tracing::{info, warn};

use crate::api::{IntentProvider, Result, RuntimeError, RuntimeHandle, TurnReport};
use crate::events::EventBus;
use crate::repository::StateRepository;
use crate::workers::{Command, SimulationWorker};

/// Runtime configuration shared across the orchestrator and workers.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub event_buffer_size: usize,
    pub command_buffer_size: usize,
    /// Save a snapshot after every turn that advanced the counter.
    pub autosave: bool,
    /// Seed for games created from content.
    pub seed: u64,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            event_buffer_size: 100,
            command_buffer_size: 32,
            autosave: false,
            seed: 0,
        }
    }
}

/// Main runtime that orchestrates game simulation
///
/// [`RuntimeHandle`] provides a cloneable façade for clients.
pub struct Runtime {
    handle: RuntimeHandle,
    provider: Option<Box<dyn IntentProvider>>,
    sim_worker_handle: JoinHandle<()>,
}

impl Runtime {
    /// Create a new runtime builder
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    /// Get a cloneable handle to this runtime
    pub fn handle(&self) -> RuntimeHandle {
        self.handle.clone()
    }

    /// Ask the provider for `actor`'s next intent and resolve it.
    pub async fn step(&self, actor: &CharacterId) -> Result<TurnReport> {
        let provider = self.provider.as_ref().ok_or(RuntimeError::ProviderNotSet)?;

        let snapshot = self.handle.query_state().await?;
        let intent = provider.provide_intent(actor, &snapshot).await?;
        if intent.actor_id != *actor {
            return Err(RuntimeError::InvalidIntentActor {
                expected: actor.clone(),
                provided: intent.actor_id,
            });
        }

        self.handle.execute(intent).await
    }

    /// Set the intent provider
    pub fn set_provider(&mut self, provider: impl IntentProvider + 'static) {
        self.provider = Some(Box::new(provider));
    }

    /// Shutdown the runtime gracefully
    ///
    /// Waits for the worker to finish queued commands. Clones of the handle
    /// held elsewhere keep the worker alive until they are dropped.
    pub async fn shutdown(self) -> Result<()> {
        drop(self.handle);

        self.sim_worker_handle
            .await
            .map_err(RuntimeError::WorkerJoin)?;

        Ok(())
    }
}

/// Builder for [`Runtime`] with flexible configuration.
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    content: Option<GameContent>,
    engine: Option<GameEngine>,
    state: Option<GameState>,
    repository: Option<Arc<dyn StateRepository>>,
    resume: bool,
    provider: Option<Box<dyn IntentProvider>>,
}

impl RuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            content: None,
            engine: None,
            state: None,
            repository: None,
            resume: false,
            provider: None,
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Create the engine and opening state from loaded content.
    pub fn content(mut self, content: GameContent) -> Self {
        self.content = Some(content);
        self
    }

    /// Use a prebuilt engine instead of one derived from content.
    pub fn engine(mut self, engine: GameEngine) -> Self {
        self.engine = Some(engine);
        self
    }

    /// Provide initial game state
    pub fn initial_state(mut self, state: GameState) -> Self {
        self.state = Some(state);
        self
    }

    /// Persist snapshots through `repository`.
    pub fn repository(mut self, repository: impl StateRepository + 'static) -> Self {
        self.repository = Some(Arc::new(repository));
        self
    }

    /// Start from the repository's latest snapshot when one exists.
    pub fn resume(mut self, resume: bool) -> Self {
        self.resume = resume;
        self
    }

    /// Set intent provider (optional)
    pub fn provider(mut self, provider: impl IntentProvider + 'static) -> Self {
        self.provider = Some(Box::new(provider));
        self
    }

    /// Build the runtime and spawn its worker.
    ///
    /// The opening state comes from, in order: the repository's latest save
    /// when resuming, an explicit initial state, or a new game built from
    /// content. The engine comes from an explicit engine, then content, then
    /// [`GameEngine::default`].
    pub async fn build(self) -> Result<Runtime> {
        let saved = match (&self.repository, self.resume) {
            (Some(repository), true) => repository.latest()?,
            _ => None,
        };
        let resumed_turn = saved.as_ref().map(|(turn, _)| *turn);

        let (engine, state) = match (saved.map(|(_, state)| state).or(self.state), self.content) {
            (Some(state), content) => {
                let engine = self
                    .engine
                    .or_else(|| content.as_ref().map(GameContent::engine))
                    .unwrap_or_default();
                (engine, state)
            }
            (None, Some(content)) => {
                let (content_engine, state) = content.new_game(self.config.seed)?;
                (self.engine.unwrap_or(content_engine), state)
            }
            (None, None) => return Err(RuntimeError::MissingWorld),
        };

        if resumed_turn.is_some() {
            for issue in validate_state(&state, engine.effects()) {
                warn!(code = issue.error_code(), "saved state: {issue}");
            }
        }

        info!(
            turn = state.world.turn,
            resumed_from = ?resumed_turn,
            "runtime starting"
        );

        let (command_tx, command_rx) = mpsc::channel::<Command>(self.config.command_buffer_size);
        let event_bus = EventBus::with_capacity(self.config.event_buffer_size);
        let handle = RuntimeHandle::new(command_tx, event_bus.clone());

        let sim_worker = SimulationWorker::new(
            state,
            engine,
            self.repository,
            self.config.autosave,
            command_rx,
            event_bus,
        );

        let sim_worker_handle = tokio::spawn(async move {
            sim_worker.run().await;
        });

        Ok(Runtime {
            handle,
            provider: self.provider,
            sim_worker_handle,
        })
    }
}
