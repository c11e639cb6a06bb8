use crate::state::{CharacterId, CharacterState, GameState, WorldState};

use super::bitmask::{CharacterFields, WorldFields};

/// Which fields of one character changed.
///
/// Values are not stored; read them from the before/after states.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CharacterChanges {
    pub id: CharacterId,
    pub fields: CharacterFields,
}

impl CharacterChanges {
    /// Returns `None` when nothing changed.
    pub(super) fn from_states(before: &CharacterState, after: &CharacterState) -> Option<Self> {
        debug_assert_eq!(
            before.id, after.id,
            "Cannot compare characters with different IDs"
        );

        let mut fields = CharacterFields::empty();

        if before.base_stats != after.base_stats {
            fields |= CharacterFields::BASE_STATS;
        }
        if before.stats != after.stats {
            fields |= CharacterFields::STATS;
        }
        if before.traits != after.traits {
            fields |= CharacterFields::TRAITS;
        }
        if before.flags != after.flags {
            fields |= CharacterFields::FLAGS;
        }
        if before.inventory != after.inventory {
            fields |= CharacterFields::INVENTORY;
        }
        if before.effects != after.effects {
            fields |= CharacterFields::EFFECTS;
        }

        if fields.is_empty() {
            None
        } else {
            Some(Self {
                id: after.id.clone(),
                fields,
            })
        }
    }
}

/// Which world-level fields changed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WorldChanges {
    pub fields: WorldFields,
}

impl WorldChanges {
    pub(super) fn from_states(before: &GameState, after: &GameState) -> Self {
        let mut fields = world_fields(&before.world, &after.world);
        if before.current_scene_id != after.current_scene_id {
            fields |= WorldFields::CURRENT_SCENE;
        }
        Self { fields }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

fn world_fields(before: &WorldState, after: &WorldState) -> WorldFields {
    let mut fields = WorldFields::empty();

    if before.global_flags != after.global_flags {
        fields |= WorldFields::GLOBAL_FLAGS;
    }
    if before.visited_scenes != after.visited_scenes {
        fields |= WorldFields::VISITED_SCENES;
    }
    if before.scene_flags != after.scene_flags {
        fields |= WorldFields::SCENE_FLAGS;
    }
    if before.turn != after.turn {
        fields |= WorldFields::TURN;
    }

    fields
}
