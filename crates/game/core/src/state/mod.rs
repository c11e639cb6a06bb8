//! Authoritative game state representation.
//!
//! [`GameState`] is a value: the engine takes it by reference and returns a
//! new snapshot for every turn. Runtime layers hold the current snapshot and
//! swap it wholesale.
pub mod delta;
pub mod types;

use std::collections::BTreeMap;

pub use delta::{CharacterChanges, CharacterFields, StateDelta, WorldChanges, WorldFields};
pub use types::{
    ActionRecord, CharacterId, CharacterState, ConversationEntry, EffectId, ObjectId, SceneId,
    SlotId, StateId, WorldState,
};

use crate::object::{ObjectDefinition, ResolvedObjects};

/// Canonical snapshot of the game.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameState {
    pub characters: BTreeMap<CharacterId, CharacterState>,
    pub world: WorldState,
    pub current_scene_id: SceneId,
    /// Loose objects per scene.
    pub scene_objects: BTreeMap<SceneId, Vec<ObjectDefinition>>,
    /// Current state of every object with a tracked state machine.
    ///
    /// Objects without an entry have no tracked state.
    #[cfg_attr(feature = "serde", serde(default))]
    pub object_states: BTreeMap<ObjectId, StateId>,
    /// Definitions of objects that currently sit in a slot.
    ///
    /// Slots only store ids, so the definition lives here until the item is
    /// moved back into general storage.
    #[cfg_attr(feature = "serde", serde(default))]
    pub objects: BTreeMap<ObjectId, ObjectDefinition>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub conversation_history: Vec<ConversationEntry>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub action_history: Vec<ActionRecord>,
    /// Set once at game creation and never modified by the engine.
    #[cfg_attr(feature = "serde", serde(default))]
    pub rng_seed: u64,
}

impl GameState {
    /// Creates an empty state positioned in `scene`.
    pub fn new(scene: impl Into<SceneId>) -> Self {
        Self {
            characters: BTreeMap::new(),
            world: WorldState::new(),
            current_scene_id: scene.into(),
            scene_objects: BTreeMap::new(),
            object_states: BTreeMap::new(),
            objects: BTreeMap::new(),
            conversation_history: Vec::new(),
            action_history: Vec::new(),
            rng_seed: 0,
        }
    }

    #[must_use]
    pub fn with_seed(mut self, rng_seed: u64) -> Self {
        self.rng_seed = rng_seed;
        self
    }

    #[must_use]
    pub fn with_character(mut self, character: CharacterState) -> Self {
        self.characters.insert(character.id.clone(), character);
        self
    }

    #[must_use]
    pub fn with_scene(mut self, scene: impl Into<SceneId>, objects: Vec<ObjectDefinition>) -> Self {
        self.scene_objects.insert(scene.into(), objects);
        self
    }

    /// Registers a definition for an item referenced by a slot.
    #[must_use]
    pub fn with_registered_object(mut self, object: ObjectDefinition) -> Self {
        self.objects.insert(object.id.clone(), object);
        self
    }

    pub fn character(&self, id: &str) -> Option<&CharacterState> {
        self.characters.get(id)
    }

    pub fn character_mut(&mut self, id: &str) -> Option<&mut CharacterState> {
        self.characters.get_mut(id)
    }

    pub fn scene_objects(&self, scene: &str) -> &[ObjectDefinition] {
        self.scene_objects
            .get(scene)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn current_scene_objects(&self) -> &[ObjectDefinition] {
        self.scene_objects(self.current_scene_id.as_str())
    }

    pub fn object_state(&self, object: &str) -> Option<&StateId> {
        self.object_states.get(object)
    }

    /// Iterates every object reachable through scenes and inventories,
    /// including nested general storage. Slot occupants are not included.
    pub fn placed_objects(&self) -> impl Iterator<Item = &ObjectDefinition> {
        let in_scenes = self.scene_objects.values().flatten();
        let carried = self
            .characters
            .values()
            .flat_map(|character| &character.inventory)
            .filter_map(|entry| entry.object_data.as_ref());

        in_scenes.chain(carried).flat_map(ObjectDefinition::walk)
    }

    /// Every known object definition keyed by id.
    ///
    /// Combines the slot registry with everything placed in scenes and
    /// inventories; placed objects win on id collisions.
    pub fn resolved_objects(&self) -> ResolvedObjects {
        let mut resolved = self.objects.clone();
        let slotted = self.objects.values().flat_map(ObjectDefinition::walk);
        for object in slotted.chain(self.placed_objects()) {
            resolved.insert(object.id.clone(), object.clone());
        }
        resolved
    }

    /// Tracks the default state of every object that declares one.
    ///
    /// Objects already tracked keep their current state.
    pub fn seed_object_states(&mut self) {
        let defaults: Vec<(ObjectId, StateId)> = self
            .placed_objects()
            .chain(self.objects.values().flat_map(ObjectDefinition::walk))
            .filter_map(|object| {
                object
                    .default_state
                    .clone()
                    .map(|state| (object.id.clone(), state))
            })
            .collect();

        for (object, state) in defaults {
            self.object_states.entry(object).or_insert(state);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::Slot;
    use crate::stats::StatBlock;

    fn lamp() -> ObjectDefinition {
        ObjectDefinition::new("lamp", "Lamp").with_default_state("unlit")
    }

    fn state() -> GameState {
        let hero = CharacterState::new(CharacterId::new("hero"), "Hero", StatBlock::default())
            .with_item(
                ObjectDefinition::new("satchel", "Satchel")
                    .with_content(lamp())
                    .with_slot(Slot::new("strap").holding("badge")),
            );

        GameState::new("cellar")
            .with_character(hero)
            .with_scene(
                "cellar",
                vec![ObjectDefinition::new("barrel", "Barrel").with_default_state("sealed")],
            )
            .with_registered_object(ObjectDefinition::new("badge", "Badge").with_weight(0.1))
    }

    #[test]
    fn seeding_reaches_nested_objects() {
        let mut state = state();
        state.seed_object_states();

        assert_eq!(state.object_state("lamp").map(StateId::as_str), Some("unlit"));
        assert_eq!(state.object_state("barrel").map(StateId::as_str), Some("sealed"));
        assert_eq!(state.object_state("satchel"), None);
    }

    #[test]
    fn seeding_keeps_existing_states() {
        let mut state = state();
        state
            .object_states
            .insert(ObjectId::new("lamp"), StateId::new("lit"));

        state.seed_object_states();

        assert_eq!(state.object_state("lamp").map(StateId::as_str), Some("lit"));
    }

    #[test]
    fn slotted_containers_are_seeded_and_resolved() {
        let mut state = GameState::new("cellar").with_registered_object(
            ObjectDefinition::new("quiver", "Quiver").with_content(lamp()),
        );
        state.seed_object_states();

        assert_eq!(state.object_state("lamp").map(StateId::as_str), Some("unlit"));
        assert!(state.resolved_objects().contains_key("lamp"));
    }

    #[test]
    fn resolved_objects_include_slot_registry() {
        let resolved = state().resolved_objects();

        for id in ["badge", "lamp", "satchel", "barrel", "left_hand", "right_hand"] {
            assert!(resolved.contains_key(id), "missing {id}");
        }
    }

    #[cfg(feature = "serde")]
    #[test]
    fn json_round_trip_keeps_sets_and_slots() {
        let mut state = state();
        state.seed_object_states();
        state.world.visited_scenes.insert(SceneId::new("cellar"));
        state
            .characters
            .get_mut("hero")
            .unwrap()
            .traits
            .insert("curious".into());

        let json = serde_json::to_string(&state).unwrap();
        let restored: GameState = serde_json::from_str(&json).unwrap();

        assert_eq!(restored, state);
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert!(value["world"]["visited_scenes"].is_array());
        assert!(value["characters"]["hero"]["traits"].is_array());
    }

    #[test]
    fn unknown_scene_has_no_objects() {
        assert!(state().scene_objects("attic").is_empty());
        assert_eq!(state().current_scene_objects().len(), 1);
    }
}
