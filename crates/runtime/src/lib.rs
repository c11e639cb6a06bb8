//! Runtime orchestration for the narrative rules engine.
//!
//! This crate wraps the pure [`tale_core`] engine in an imperative shell: a
//! single worker task owns the authoritative game state and resolves intents
//! one at a time, snapshots are persisted through repositories, and results
//! are published on a topic-based event bus. Consumers embed [`Runtime`] and
//! talk to it through [`RuntimeHandle`].
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator and builder
//! - [`api`] exposes the types downstream clients interact with
//! - [`events`] provides the topic-based event bus
//! - [`repository`] persists snapshots keyed by turn
//! - `workers` keeps background tasks internal to the crate
pub mod api;
pub mod events;
pub mod repository;
pub mod runtime;

mod workers;

pub use api::{
    IntentProvider, Result, RuntimeError, RuntimeHandle, ScriptedIntentProvider, TurnReport,
};
pub use events::{Event, EventBus, GameStateEvent, PersistenceEvent, Topic};
pub use repository::{
    FileStateRepository, InMemoryStateRepo, RepositoryError, StateRepository,
};
pub use runtime::{Runtime, RuntimeBuilder, RuntimeConfig};
