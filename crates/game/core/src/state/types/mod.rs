mod character;
mod common;
mod history;
mod world;

pub use character::CharacterState;
pub use common::{CharacterId, EffectId, ObjectId, SceneId, SlotId, StateId};
pub use history::{ActionRecord, ConversationEntry};
pub use world::WorldState;
