//! Status effects: definitions, live instances, and their lifecycle.
//!
//! Effects come from two registries. The built-in registry is process-wide
//! and read-only; the game registry is supplied by content at load time.
//! Built-ins always win a lookup when both define the same id.
pub mod builtin;
mod definition;
mod error;
mod instance;
mod manager;

pub use definition::{EffectDefinition, EffectRegistry};
pub use error::EffectError;
pub use instance::{Effect, EffectSource};
pub use manager::{EffectManager, merge_effect_modifiers, merge_per_turn_modifiers};
