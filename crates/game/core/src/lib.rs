//! Deterministic rules for a turn-based narrative inventory game.
//!
//! `tale-core` defines the canonical data (characters, objects, containers,
//! effects, world state) and the pure operations over it. Every operation
//! takes a snapshot by reference and returns a new one; nothing here performs
//! I/O. Turns flow through [`engine::GameEngine`], and supporting crates
//! depend on the types re-exported here.
pub mod action;
pub mod config;
pub mod effect;
pub mod engine;
pub mod env;
pub mod error;
pub mod inventory;
pub mod object;
pub mod state;
pub mod stats;

pub use action::{
    ActionResult, ChangeStateCommand, Command, CommandContext, CommandRegistry, EffectPayload,
    Intent, Narrative, ObjectStateChange, Outcome, Target, TransferCommand, TransferItem,
};
pub use config::GameConfig;
pub use effect::{Effect, EffectDefinition, EffectError, EffectManager, EffectRegistry, EffectSource};
pub use engine::{ApplyError, GameEngine, TurnError, TurnOutcome, apply_effects};
pub use env::GameEnv;
pub use error::{ErrorSeverity, GameError};
pub use inventory::{FitError, InventoryEntry, ItemLocation, TransferError};
pub use object::{ObjectDefinition, ResolvedObjects, Slot, StateDef};
pub use state::{
    ActionRecord, CharacterId, CharacterState, ConversationEntry, EffectId, GameState, ObjectId,
    SceneId, SlotId, StateDelta, StateId, WorldState,
};
pub use stats::{PartialStats, StatBlock, StatCalculator, StatKind};
