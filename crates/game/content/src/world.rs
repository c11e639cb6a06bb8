//! Assembles the opening [`GameState`] from authored content.

use tale_core::{
    CharacterId, CharacterState, EffectError, GameConfig, GameEnv, GameState, InventoryEntry,
    ObjectDefinition, SceneId,
};
use tracing::debug;

use crate::specs::{CharacterSpec, SceneSpec};

/// Errors raised while assembling a world.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum WorldError {
    #[error("start scene `{scene}` is not defined")]
    UnknownStartScene { scene: SceneId },

    #[error("character `{id}` is defined more than once")]
    DuplicateCharacter { id: CharacterId },

    #[error("scene `{id}` is defined more than once")]
    DuplicateScene { id: SceneId },

    #[error("character `{character}` starts with an invalid effect: {source}")]
    StartingEffect {
        character: CharacterId,
        #[source]
        source: EffectError,
    },
}

/// Collects characters, scenes, and registered objects, then builds a state
/// that is ready for its first turn.
///
/// The built state has object states seeded from defaults, hand fixtures on
/// every character, the start scene marked visited, and current stats
/// computed from base stats, effects, and carried objects.
#[derive(Clone, Debug)]
pub struct WorldBuilder {
    start: SceneId,
    seed: u64,
    global_flags: Vec<String>,
    scenes: Vec<SceneSpec>,
    characters: Vec<CharacterSpec>,
    registered: Vec<ObjectDefinition>,
}

impl WorldBuilder {
    pub fn new(start: impl Into<SceneId>) -> Self {
        Self {
            start: start.into(),
            seed: 0,
            global_flags: Vec::new(),
            scenes: Vec::new(),
            characters: Vec::new(),
            registered: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    #[must_use]
    pub fn with_global_flag(mut self, flag: impl Into<String>) -> Self {
        self.global_flags.push(flag.into());
        self
    }

    #[must_use]
    pub fn with_scene(mut self, scene: SceneSpec) -> Self {
        self.scenes.push(scene);
        self
    }

    #[must_use]
    pub fn with_character(mut self, character: CharacterSpec) -> Self {
        self.characters.push(character);
        self
    }

    /// Adds definitions for items that start out in slots.
    #[must_use]
    pub fn with_registered_objects(
        mut self,
        objects: impl IntoIterator<Item = ObjectDefinition>,
    ) -> Self {
        self.registered.extend(objects);
        self
    }

    pub fn build(&self, env: &GameEnv<'_>) -> Result<GameState, WorldError> {
        if !self.scenes.iter().any(|scene| scene.id == self.start) {
            return Err(WorldError::UnknownStartScene {
                scene: self.start.clone(),
            });
        }

        let mut state = GameState::new(self.start.clone()).with_seed(self.seed);
        state.world.global_flags.extend(self.global_flags.iter().cloned());

        for scene in &self.scenes {
            if state.scene_objects.contains_key(&scene.id) {
                return Err(WorldError::DuplicateScene {
                    id: scene.id.clone(),
                });
            }
            state
                .scene_objects
                .insert(scene.id.clone(), scene.objects.clone());
            if !scene.flags.is_empty() {
                state
                    .world
                    .scene_flags
                    .insert(scene.id.clone(), scene.flags.clone());
            }
        }

        for object in &self.registered {
            state.objects.insert(object.id.clone(), object.clone());
        }

        for spec in &self.characters {
            if state.characters.contains_key(&spec.id) {
                return Err(WorldError::DuplicateCharacter {
                    id: spec.id.clone(),
                });
            }
            let character = character_from_spec(spec, env)?;
            state.characters.insert(spec.id.clone(), character);
        }

        state.seed_object_states();
        state.world.visited_scenes.insert(self.start.clone());

        let objects = state.resolved_objects();
        for character in state.characters.values_mut() {
            *character = env.stats().update_character_stats(character, &objects);
        }

        debug!(
            start = %self.start,
            scenes = state.scene_objects.len(),
            characters = state.characters.len(),
            tracked_objects = state.object_states.len(),
            "world assembled"
        );
        Ok(state)
    }
}

fn character_from_spec(spec: &CharacterSpec, env: &GameEnv<'_>) -> Result<CharacterState, WorldError> {
    let base_stats = spec.base_stats.unwrap_or(env.config().default_stats);
    let mut character = CharacterState::new(spec.id.clone(), spec.name.clone(), base_stats);
    character.traits.extend(spec.traits.iter().cloned());
    character.flags.extend(spec.flags.iter().cloned());

    for item in &spec.inventory {
        if is_hand_id(item.id.as_str()) {
            if let Some(hand) = character
                .inventory
                .iter_mut()
                .find(|entry| entry.id == item.id)
                .and_then(|entry| entry.object_data.as_mut())
            {
                fill_hand(hand, item);
                continue;
            }
        }
        character.inventory.push(InventoryEntry::from_object(item.clone()));
    }
    character.ensure_hands();

    for id in &spec.effects {
        character = env
            .effects()
            .apply_effect(&character, id.as_str(), None)
            .map_err(|source| WorldError::StartingEffect {
                character: spec.id.clone(),
                source,
            })?;
    }

    Ok(character)
}

fn is_hand_id(id: &str) -> bool {
    id == GameConfig::LEFT_HAND_ID || id == GameConfig::RIGHT_HAND_ID
}

/// Copies authored contents into a hand fixture without touching its shape.
fn fill_hand(hand: &mut ObjectDefinition, authored: &ObjectDefinition) {
    hand.contains = authored.contains.clone();
    for slot in &mut hand.slots {
        if let Some(filled) = authored
            .slots
            .iter()
            .find(|candidate| candidate.id == slot.id && candidate.item_id.is_some())
        {
            slot.item_id = filled.item_id.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use tale_core::effect::builtin::BLINDNESS;
    use tale_core::inventory::hands;
    use tale_core::{
        EffectManager, EffectPayload, ObjectId, Slot, StatBlock, StatCalculator, StateDef,
    };

    use super::*;

    struct Services {
        effects: EffectManager,
        stats: StatCalculator,
        config: GameConfig,
    }

    impl Services {
        fn new() -> Self {
            Self {
                effects: EffectManager::default(),
                stats: StatCalculator::new(),
                config: GameConfig::default(),
            }
        }

        fn env(&self) -> GameEnv<'_> {
            GameEnv::new(&self.effects, &self.stats, &self.config)
        }
    }

    fn lantern() -> ObjectDefinition {
        ObjectDefinition::new("lantern", "Lantern")
            .with_state(StateDef::new("unlit", ["douse"], EffectPayload::new()))
            .with_state(StateDef::new("lit", ["light"], EffectPayload::new()))
            .with_default_state("unlit")
    }

    fn builder() -> WorldBuilder {
        WorldBuilder::new("hall")
            .with_seed(7)
            .with_scene(
                SceneSpec::new("hall")
                    .with_object(lantern())
                    .with_flag("drafty"),
            )
            .with_scene(SceneSpec::new("yard"))
    }

    #[test]
    fn builds_a_ready_state() {
        let services = Services::new();
        let hero = CharacterSpec::new("hero", "Hero")
            .with_base_stats(StatBlock::new(12, 10, 10, 0, 10, 10))
            .with_effect(BLINDNESS);

        let state = builder().with_character(hero).build(&services.env()).unwrap();

        assert_eq!(state.rng_seed, 7);
        assert_eq!(state.current_scene_id, SceneId::new("hall"));
        assert!(state.world.has_visited("hall"));
        assert!(state.world.has_scene_flag("hall", "drafty"));
        assert_eq!(state.object_state("lantern").map(|s| s.as_str()), Some("unlit"));

        let hero = state.character("hero").unwrap();
        assert!(hero.inventory_entry(GameConfig::LEFT_HAND_ID).is_some());
        assert!(hero.inventory_entry(GameConfig::RIGHT_HAND_ID).is_some());
        assert_eq!(hero.base_stats.perception, 10);
        assert_eq!(hero.stats.perception, 10 - 999);
        assert_eq!(hero.stats.health, 12);
    }

    #[test]
    fn missing_base_stats_use_config_defaults() {
        let services = Services::new();
        let state = builder()
            .with_character(CharacterSpec::new("hero", "Hero"))
            .build(&services.env())
            .unwrap();

        assert_eq!(
            state.character("hero").unwrap().base_stats,
            services.config.default_stats
        );
    }

    #[test]
    fn authored_hands_keep_their_fixture() {
        let services = Services::new();
        let authored = ObjectDefinition::new(GameConfig::LEFT_HAND_ID, "Whatever")
            .with_content(ObjectDefinition::new("dagger", "Dagger"))
            .with_slot(Slot::new("ring").holding("signet"));
        let hero = CharacterSpec::new("hero", "Hero").with_item(authored);

        let state = builder()
            .with_registered_objects([ObjectDefinition::new("signet", "Signet")])
            .with_character(hero)
            .build(&services.env())
            .unwrap();

        let hero = state.character("hero").unwrap();
        assert_eq!(
            hero.inventory
                .iter()
                .filter(|entry| entry.id == GameConfig::LEFT_HAND_ID)
                .count(),
            1
        );
        let hand = hero
            .inventory_entry(GameConfig::LEFT_HAND_ID)
            .and_then(InventoryEntry::object)
            .unwrap();
        assert!(hands::is_hand(hand));
        assert_eq!(hand.slots.len(), GameConfig::FINGER_SLOTS.len());
        assert_eq!(hand.contains[0].id, ObjectId::new("dagger"));
        let ring = hand.slots.iter().find(|slot| slot.id == "ring").unwrap();
        assert_eq!(ring.item_id, Some(ObjectId::new("signet")));
        assert!(state.objects.contains_key("signet"));
    }

    #[test]
    fn rejects_bad_worlds() {
        let services = Services::new();

        let missing_start = WorldBuilder::new("void").with_scene(SceneSpec::new("hall"));
        assert!(matches!(
            missing_start.build(&services.env()),
            Err(WorldError::UnknownStartScene { .. })
        ));

        let twins = builder()
            .with_character(CharacterSpec::new("hero", "Hero"))
            .with_character(CharacterSpec::new("hero", "Other"));
        assert!(matches!(
            twins.build(&services.env()),
            Err(WorldError::DuplicateCharacter { .. })
        ));

        let cursed = builder().with_character(CharacterSpec::new("hero", "Hero").with_effect("hexed"));
        assert!(matches!(
            cursed.build(&services.env()),
            Err(WorldError::StartingEffect { .. })
        ));
    }
}
