//! Materializes a result's payload onto a fresh state.

use std::collections::BTreeSet;

use super::errors::ApplyError;
use super::reducer::{CharacterReducer, WorldReducer};
use crate::action::{ActionResult, EffectPayload, Target};
use crate::effect::{EffectError, EffectManager};
use crate::env::GameEnv;
use crate::inventory::transfer;
use crate::state::{CharacterId, CharacterState, GameState};

/// Applies a successful result's payload, returning the new state.
///
/// Failure results and results without a payload yield an unchanged copy.
/// The payload target defaults to `actor`. For every list field removals go
/// first, then additions; effects are removed through the effect manager
/// before new ones are applied. Characters whose stats, effects, or
/// inventory were touched get their current stats recomputed.
pub fn apply_effects(
    state: &GameState,
    actor: &CharacterId,
    result: &ActionResult,
    env: &GameEnv<'_>,
) -> Result<GameState, ApplyError> {
    let Some(payload) = result.effects.as_ref().filter(|_| result.is_success()) else {
        return Ok(state.clone());
    };

    let mut next = state.clone();
    let mut touched = BTreeSet::new();

    let target = payload
        .target
        .clone()
        .unwrap_or_else(|| Target::Character(actor.clone()));

    match target {
        Target::Scene(scene) => {
            if payload.touches_character_fields() {
                return Err(ApplyError::UnsupportedTarget { scene });
            }
            WorldReducer::new(&mut next.world).update_scene_flags(
                &scene,
                &payload.remove_flags,
                &payload.add_flags,
            );
        }
        Target::Character(id) => {
            let character = next
                .characters
                .get(id.as_str())
                .ok_or_else(|| ApplyError::UnknownCharacter { id: id.clone() })?;
            let updated = apply_to_character(character, payload, env.effects())?;
            next.characters.insert(id.clone(), updated);
            touched.insert(id);
        }
    }

    if let Some(request) = &payload.transfer_item {
        next = transfer(&next, actor, request)?;
        touched.insert(actor.clone());
    }

    if let Some(change) = &payload.object_state {
        match &change.state_id {
            Some(state_id) => {
                next.object_states
                    .insert(change.object_id.clone(), state_id.clone());
            }
            None => {
                next.object_states.remove(&change.object_id);
            }
        }
    }

    if !touched.is_empty() {
        let objects = next.resolved_objects();
        for id in touched {
            if let Some(character) = next.characters.get(&id) {
                let refreshed = env.stats().update_character_stats(character, &objects);
                next.characters.insert(id, refreshed);
            }
        }
    }

    Ok(next)
}

fn apply_to_character(
    character: &CharacterState,
    payload: &EffectPayload,
    effects: &EffectManager,
) -> Result<CharacterState, EffectError> {
    let mut next = character.clone();

    let mut reducer = CharacterReducer::new(&mut next);
    if let Some(stats) = &payload.stats {
        reducer.add_base_stats(stats);
    }
    reducer.update_traits(&payload.remove_traits, &payload.add_traits);
    reducer.update_flags(&payload.remove_flags, &payload.add_flags);

    for id in &payload.remove_effects {
        next = effects.remove_effect(&next, id.as_str()).into_owned();
    }
    for id in &payload.add_effects {
        next = effects.apply_effect(&next, id.as_str(), None)?;
    }

    Ok(next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::TransferItem;
    use crate::config::GameConfig;
    use crate::effect::builtin::{BLINDNESS, POISON};
    use crate::inventory::{FitError, TransferError};
    use crate::object::ObjectDefinition;
    use crate::state::{EffectId, ObjectId, SceneId, StateId};
    use crate::stats::{PartialStats, StatBlock, StatCalculator, StatKind};

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

    fn hero() -> CharacterId {
        CharacterId::new("hero")
    }

    fn state() -> GameState {
        GameState::new("crypt")
            .with_character(
                CharacterState::new(hero(), "Hero", StatBlock::new(10, 10, 10, 0, 10, 10))
                    .with_trait("brave")
                    .with_flag("torch"),
            )
            .with_character(CharacterState::new(
                CharacterId::new("ghoul"),
                "Ghoul",
                StatBlock::default(),
            ))
            .with_scene(
                "crypt",
                vec![
                    ObjectDefinition::new("bone", "Bone"),
                    ObjectDefinition::new("slab", "Slab"),
                ],
            )
    }

    fn apply(state: &GameState, result: &ActionResult) -> Result<GameState, ApplyError> {
        let services = Services::new();
        apply_effects(state, &hero(), result, &services.env())
    }

    #[test]
    fn failure_results_change_nothing() {
        let state = state();
        let result = ActionResult::failure("No.")
            .with_effects(EffectPayload::new().add_flag("should_not_apply"));

        assert_eq!(apply(&state, &result).unwrap(), state);
    }

    #[test]
    fn stats_fold_into_base_and_refresh_current() {
        let state = state();
        let result = ActionResult::success("Ouch.").with_effects(
            EffectPayload::new()
                .with_stats(PartialStats::new().with(StatKind::Health, -3))
                .add_effect(EffectId::new(BLINDNESS)),
        );

        let next = apply(&state, &result).unwrap();
        let character = next.character("hero").unwrap();

        assert_eq!(character.base_stats.health, 7);
        assert_eq!(character.stats.health, 7);
        assert_eq!(character.stats.perception, 10 - 999);
        assert_eq!(character.base_stats.perception, 10);
        assert_eq!(state.character("hero").unwrap().base_stats.health, 10);
    }

    #[test]
    fn removals_run_before_additions() {
        let result = ActionResult::success("Hm.").with_effects(
            EffectPayload::new()
                .remove_trait("brave")
                .add_trait("brave")
                .remove_flag("torch")
                .add_flag("lantern"),
        );

        let next = apply(&state(), &result).unwrap();
        let character = next.character("hero").unwrap();

        assert!(character.has_trait("brave"));
        assert!(!character.has_flag("torch"));
        assert!(character.has_flag("lantern"));
    }

    #[test]
    fn effects_are_removed_then_applied() {
        let services = Services::new();
        let mut state = state();
        let poisoned = services
            .effects
            .apply_effect(state.character("hero").unwrap(), POISON, Some(1))
            .unwrap();
        state.characters.insert(hero(), poisoned);

        let result = ActionResult::success("Cured, then poisoned again.").with_effects(
            EffectPayload::new()
                .remove_effect(EffectId::new(POISON))
                .add_effect(EffectId::new(POISON)),
        );

        let next = apply_effects(&state, &hero(), &result, &services.env()).unwrap();
        let effects = &next.character("hero").unwrap().effects;

        assert_eq!(effects.len(), 1);
        assert_eq!(effects[0].duration, Some(3));
    }

    #[test]
    fn explicit_character_target() {
        let result = ActionResult::success("The ghoul recoils.").with_effects(
            EffectPayload::new()
                .with_target(Target::Character(CharacterId::new("ghoul")))
                .add_flag("scared"),
        );

        let next = apply(&state(), &result).unwrap();

        assert!(next.character("ghoul").unwrap().has_flag("scared"));
        assert!(!next.character("hero").unwrap().has_flag("scared"));
    }

    #[test]
    fn scene_targets_take_flags_only() {
        let scene = SceneId::new("crypt");
        let flags = ActionResult::success("Dust settles.").with_effects(
            EffectPayload::new()
                .with_target(Target::Scene(scene.clone()))
                .add_flag("dusty"),
        );
        let next = apply(&state(), &flags).unwrap();
        assert!(next.world.has_scene_flag("crypt", "dusty"));

        let stats = ActionResult::success("?").with_effects(
            EffectPayload::new()
                .with_target(Target::Scene(scene.clone()))
                .with_stats(PartialStats::new().with(StatKind::Health, 1)),
        );
        assert_eq!(
            apply(&state(), &stats),
            Err(ApplyError::UnsupportedTarget { scene })
        );
    }

    #[test]
    fn content_errors_surface() {
        let unknown_effect = ActionResult::success("?")
            .with_effects(EffectPayload::new().add_effect(EffectId::new("hexed")));
        assert_eq!(
            apply(&state(), &unknown_effect),
            Err(ApplyError::Effect(EffectError::UnknownEffect {
                id: EffectId::new("hexed")
            }))
        );

        let unknown_target = ActionResult::success("?").with_effects(
            EffectPayload::new()
                .with_target(Target::Character(CharacterId::new("nobody")))
                .add_flag("x"),
        );
        assert!(matches!(
            apply(&state(), &unknown_target),
            Err(ApplyError::UnknownCharacter { .. })
        ));
    }

    #[test]
    fn transfers_and_refusals() {
        let pick_up = ActionResult::success("Got it.").with_effects(
            EffectPayload::new().with_transfer(TransferItem::new(
                "bone",
                "crypt",
                GameConfig::LEFT_HAND_ID,
            )),
        );
        let next = apply(&state(), &pick_up).unwrap();
        let hand = next
            .character("hero")
            .and_then(|character| character.inventory_entry(GameConfig::LEFT_HAND_ID))
            .and_then(|entry| entry.object())
            .unwrap();
        assert_eq!(hand.contains[0].id, ObjectId::new("bone"));

        let second = ActionResult::success("Got it.").with_effects(
            EffectPayload::new().with_transfer(TransferItem::new(
                "slab",
                "crypt",
                GameConfig::LEFT_HAND_ID,
            )),
        );
        assert_eq!(
            apply(&next, &second),
            Err(ApplyError::Transfer(TransferError::Fit(FitError::NoRoom)))
        );
    }

    #[test]
    fn object_states_are_persisted_and_cleared() {
        let set = ActionResult::success("Click.").with_effects(
            EffectPayload::new().with_object_state("slab", Some(StateId::new("open"))),
        );
        let next = apply(&state(), &set).unwrap();
        assert_eq!(
            next.object_state("slab").map(StateId::as_str),
            Some("open")
        );

        let clear = ActionResult::success("Clack.")
            .with_effects(EffectPayload::new().with_object_state("slab", None));
        let next = apply(&next, &clear).unwrap();
        assert_eq!(next.object_state("slab"), None);
    }
}
