//! Bitmask-based records of what a turn changed.
//!
//! A [`StateDelta`] stores which characters, objects, scenes, and world
//! fields differ between two snapshots, never the values themselves. Callers
//! that need values read them from the before/after [`GameState`]s.
mod bitmask;
mod changes;
mod collection;

pub use bitmask::{CharacterFields, WorldFields};
pub use changes::{CharacterChanges, WorldChanges};
pub use collection::CollectionChanges;

use collection::{changed_keys, diff_collection};

use crate::state::{CharacterId, GameState, ObjectId, SceneId};

#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StateDelta {
    /// Turn counter of the resulting state.
    pub turn: u64,
    pub characters: CollectionChanges<CharacterId, CharacterChanges>,
    pub world: WorldChanges,
    /// Objects whose tracked state changed, appeared, or was cleared.
    pub object_states: Vec<ObjectId>,
    /// Scenes whose loose object list changed.
    pub scenes: Vec<SceneId>,
    /// Slot-held objects that were registered or released.
    pub registered_objects: Vec<ObjectId>,
}

impl StateDelta {
    /// Compares two snapshots field by field.
    pub fn from_states(before: &GameState, after: &GameState) -> Self {
        Self {
            turn: after.world.turn,
            characters: diff_collection(
                &before.characters,
                &after.characters,
                CharacterChanges::from_states,
            ),
            world: WorldChanges::from_states(before, after),
            object_states: changed_keys(&before.object_states, &after.object_states),
            scenes: changed_keys(&before.scene_objects, &after.scene_objects),
            registered_objects: changed_keys(&before.objects, &after.objects),
        }
    }

    /// Delta of a turn that changed nothing.
    pub fn unchanged(state: &GameState) -> Self {
        Self {
            turn: state.world.turn,
            ..Self::default()
        }
    }

    /// Returns true if no state changes occurred.
    pub fn is_empty(&self) -> bool {
        self.characters.is_empty()
            && self.world.is_empty()
            && self.object_states.is_empty()
            && self.scenes.is_empty()
            && self.registered_objects.is_empty()
    }

    pub fn character(&self, id: &str) -> Option<&CharacterChanges> {
        self.characters.updated.iter().find(|changes| changes.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::ObjectDefinition;
    use crate::state::{CharacterState, StateId};
    use crate::stats::StatBlock;

    fn state() -> GameState {
        GameState::new("hall")
            .with_character(CharacterState::new(
                CharacterId::new("hero"),
                "Hero",
                StatBlock::default(),
            ))
            .with_scene("hall", vec![ObjectDefinition::new("lamp", "Lamp")])
    }

    #[test]
    fn identical_states_produce_empty_delta() {
        let state = state();
        let delta = StateDelta::from_states(&state, &state.clone());
        assert!(delta.is_empty());
        assert_eq!(delta, StateDelta::unchanged(&state));
    }

    #[test]
    fn field_masks_follow_changes() {
        let before = state();
        let mut after = before.clone();
        after.world.turn += 1;
        after.characters.get_mut("hero").unwrap().flags.insert("wet".into());
        after.object_states.insert(ObjectId::new("lamp"), StateId::new("lit"));
        after.scene_objects.get_mut("hall").unwrap().clear();

        let delta = StateDelta::from_states(&before, &after);

        assert_eq!(delta.turn, 1);
        assert_eq!(delta.world.fields, WorldFields::TURN);
        assert_eq!(
            delta.character("hero").map(|changes| changes.fields),
            Some(CharacterFields::FLAGS)
        );
        assert_eq!(delta.object_states, vec![ObjectId::new("lamp")]);
        assert_eq!(delta.scenes, vec![SceneId::new("hall")]);
        assert!(delta.registered_objects.is_empty());
    }

    #[test]
    fn added_and_removed_characters() {
        let before = state();
        let after = before.clone().with_character(CharacterState::new(
            CharacterId::new("guard"),
            "Guard",
            StatBlock::default(),
        ));

        let delta = StateDelta::from_states(&before, &after);
        assert_eq!(delta.characters.added, vec![CharacterId::new("guard")]);

        let delta = StateDelta::from_states(&after, &before);
        assert_eq!(delta.characters.removed, vec![CharacterId::new("guard")]);
    }
}
