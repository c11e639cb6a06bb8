use std::collections::BTreeSet;

use crate::state::{CharacterState, SceneId, WorldState};
use crate::stats::PartialStats;

/// Set updates for one character, removals before additions.
pub struct CharacterReducer<'a> {
    character: &'a mut CharacterState,
}

impl<'a> CharacterReducer<'a> {
    pub fn new(character: &'a mut CharacterState) -> Self {
        Self { character }
    }

    pub fn add_base_stats(&mut self, delta: &PartialStats) {
        self.character.base_stats = self.character.base_stats.apply(delta);
    }

    pub fn update_traits(&mut self, remove: &[String], add: &[String]) {
        update_set(&mut self.character.traits, remove, add);
    }

    pub fn update_flags(&mut self, remove: &[String], add: &[String]) {
        update_set(&mut self.character.flags, remove, add);
    }
}

pub struct WorldReducer<'a> {
    world: &'a mut WorldState,
}

impl<'a> WorldReducer<'a> {
    pub fn new(world: &'a mut WorldState) -> Self {
        Self { world }
    }

    pub fn update_scene_flags(&mut self, scene: &SceneId, remove: &[String], add: &[String]) {
        let flags = self.world.scene_flags.entry(scene.clone()).or_default();
        update_set(flags, remove, add);
        if flags.is_empty() {
            self.world.scene_flags.remove(scene);
        }
    }

    pub fn visit(&mut self, scene: &SceneId) -> bool {
        self.world.visited_scenes.insert(scene.clone())
    }

    pub fn advance_turn(&mut self) -> u64 {
        self.world.turn += 1;
        self.world.turn
    }
}

fn update_set(set: &mut BTreeSet<String>, remove: &[String], add: &[String]) {
    for value in remove {
        set.remove(value);
    }
    set.extend(add.iter().cloned());
}
