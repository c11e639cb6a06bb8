//! A complete, loaded set of game content.

use tale_core::{
    CommandRegistry, EffectManager, EffectRegistry, GameConfig, GameEngine, GameError, GameState,
    ObjectDefinition,
};
use tracing::{error, info};

use crate::specs::{CharacterSpec, SceneCatalog};
use crate::validate::{ContentIssue, validate_objects};
use crate::world::{WorldBuilder, WorldError};

/// Errors that stop a game from being created.
#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    #[error("content failed validation with {} issue(s)", .issues.len())]
    Invalid { issues: Vec<ContentIssue> },

    #[error(transparent)]
    World(#[from] WorldError),
}

/// Everything a game needs besides its mutable state.
#[derive(Clone, Debug)]
pub struct GameContent {
    pub config: GameConfig,
    /// Game-specific effects; built-ins are always available on top.
    pub effects: EffectRegistry,
    /// Definitions of items that start out in slots.
    pub objects: Vec<ObjectDefinition>,
    pub characters: Vec<CharacterSpec>,
    pub scenes: SceneCatalog,
}

impl GameContent {
    pub fn effect_manager(&self) -> EffectManager {
        EffectManager::new(self.effects.clone())
    }

    /// Engine with the built-in commands and this content's effects.
    pub fn engine(&self) -> GameEngine {
        GameEngine::new(
            CommandRegistry::with_builtins(),
            self.effect_manager(),
            self.config.clone(),
        )
    }

    pub fn world_builder(&self) -> WorldBuilder {
        let mut builder = WorldBuilder::new(self.scenes.start.clone())
            .with_registered_objects(self.objects.iter().cloned());
        for flag in &self.scenes.global_flags {
            builder = builder.with_global_flag(flag.clone());
        }
        for scene in &self.scenes.scenes {
            builder = builder.with_scene(scene.clone());
        }
        for character in &self.characters {
            builder = builder.with_character(character.clone());
        }
        builder
    }

    /// Checks every authored object against `effects`.
    pub fn validate(&self, effects: &EffectManager) -> Vec<ContentIssue> {
        let in_scenes = self.scenes.scenes.iter().flat_map(|scene| &scene.objects);
        let carried = self.characters.iter().flat_map(|character| &character.inventory);

        validate_objects(in_scenes.chain(carried), &self.objects, effects)
    }

    /// Validates the content and builds an engine plus the opening state.
    pub fn new_game(&self, seed: u64) -> Result<(GameEngine, GameState), ContentError> {
        let engine = self.engine();

        let issues = self.validate(engine.effects());
        if !issues.is_empty() {
            for issue in &issues {
                error!(code = issue.error_code(), "{issue}");
            }
            return Err(ContentError::Invalid { issues });
        }

        let state = self.world_builder().with_seed(seed).build(&engine.env())?;
        info!(
            start = %state.current_scene_id,
            characters = state.characters.len(),
            seed,
            "new game created"
        );
        Ok((engine, state))
    }
}

#[cfg(test)]
mod tests {
    use tale_core::{EffectDefinition, EffectId, EffectPayload, PartialStats, Slot, StateDef, StatKind};

    use super::*;
    use crate::specs::SceneSpec;

    fn content() -> GameContent {
        let shrine = ObjectDefinition::new("shrine", "Shrine")
            .fixed()
            .with_slot(Slot::new("offering").holding("candle"))
            .with_state(StateDef::new("quiet", ["leave"], EffectPayload::new()))
            .with_state(StateDef::new(
                "blessed",
                ["pray"],
                EffectPayload::new().add_effect(EffectId::new("blessed")),
            ))
            .with_default_state("quiet");

        GameContent {
            config: GameConfig::default().with_history_limit(4),
            effects: [EffectDefinition::new("blessed", "Blessed", "")
                .with_stat_modifiers(PartialStats::new().with(StatKind::Willpower, 2))]
            .into_iter()
            .collect(),
            objects: vec![ObjectDefinition::new("candle", "Candle")],
            characters: vec![CharacterSpec::new("hero", "Hero").with_effect("blessed")],
            scenes: SceneCatalog {
                start: "chapel".into(),
                global_flags: ["night".to_owned()].into(),
                scenes: vec![SceneSpec::new("chapel").with_object(shrine)],
            },
        }
    }

    #[test]
    fn new_game_uses_content_effects_and_config() {
        let (engine, state) = content().new_game(42).unwrap();

        assert_eq!(engine.config().history_limit, 4);
        assert!(engine.effects().definition("blessed").is_some());
        assert_eq!(state.rng_seed, 42);
        assert!(state.world.has_global_flag("night"));
        assert_eq!(state.object_state("shrine").map(|s| s.as_str()), Some("quiet"));

        let hero = state.character("hero").unwrap();
        assert_eq!(hero.stats.willpower, hero.base_stats.willpower + 2);
    }

    #[test]
    fn invalid_content_is_refused() {
        let mut content = content();
        content.objects.clear();

        match content.new_game(0) {
            Err(ContentError::Invalid { issues }) => {
                assert!(matches!(
                    issues.as_slice(),
                    [ContentIssue::UnregisteredSlotItem { .. }]
                ));
            }
            other => panic!("expected validation failure, got {other:?}"),
        }
    }
}
