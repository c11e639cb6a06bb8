//! Applying, removing, and ticking effects on characters.

use std::borrow::Cow;
use std::sync::Arc;

use super::builtin;
use super::definition::{EffectDefinition, EffectRegistry};
use super::error::EffectError;
use super::instance::Effect;
use crate::state::{CharacterState, EffectId};
use crate::stats::PartialStats;

/// Effect lifecycle operations over immutable character snapshots.
///
/// Every operation takes the character by reference and returns a new value;
/// the input is never modified.
#[derive(Clone, Debug)]
pub struct EffectManager {
    builtin: Arc<EffectRegistry>,
    game: EffectRegistry,
}

impl EffectManager {
    /// Creates a manager over the process-wide built-ins and a game registry.
    pub fn new(game: EffectRegistry) -> Self {
        Self::with_builtin(builtin::registry(), game)
    }

    pub fn with_builtin(builtin: Arc<EffectRegistry>, game: EffectRegistry) -> Self {
        Self { builtin, game }
    }

    pub fn builtin_definition(&self, id: &str) -> Option<&EffectDefinition> {
        self.builtin.get(id)
    }

    /// Looks up a definition, built-ins first.
    ///
    /// A game definition sharing an id with a built-in is never returned.
    pub fn definition(&self, id: &str) -> Option<&EffectDefinition> {
        self.builtin.get(id).or_else(|| self.game.get(id))
    }

    /// Iterates every reachable definition (shadowed game entries excluded).
    pub fn definitions(&self) -> impl Iterator<Item = &EffectDefinition> {
        self.builtin.iter().chain(
            self.game
                .iter()
                .filter(|definition| !self.builtin.contains(definition.id.as_str())),
        )
    }

    /// Attaches a new instance of `id` to the character.
    ///
    /// Stacking is allowed: applying an id that is already active adds a
    /// second, independent instance.
    pub fn apply_effect(
        &self,
        character: &CharacterState,
        id: &str,
        duration: Option<i32>,
    ) -> Result<CharacterState, EffectError> {
        let definition = self
            .definition(id)
            .ok_or_else(|| EffectError::UnknownEffect {
                id: EffectId::new(id),
            })?;

        let mut effects = character.effects.clone();
        effects.push(Effect::from_definition(definition, duration));

        Ok(CharacterState {
            effects,
            ..character.clone()
        })
    }

    /// Removes the first instance of `id`.
    ///
    /// Returns the input itself (`Cow::Borrowed`) when nothing matched.
    pub fn remove_effect<'a>(
        &self,
        character: &'a CharacterState,
        id: &str,
    ) -> Cow<'a, CharacterState> {
        let Some(index) = character.effects.iter().position(|effect| effect.id == id) else {
            return Cow::Borrowed(character);
        };

        let mut effects = character.effects.clone();
        effects.remove(index);

        Cow::Owned(CharacterState {
            effects,
            ..character.clone()
        })
    }

    /// Advances every effect on the character by one turn.
    ///
    /// Order per effect list: fold per-turn modifiers into base stats (each
    /// compounding on the previous), then tick durations, then drop expired
    /// effects. An effect expiring this tick still deals its per-turn delta.
    pub fn tick_effects(&self, character: &CharacterState) -> CharacterState {
        let base_stats = character
            .effects
            .iter()
            .fold(character.base_stats, |stats, effect| {
                effect.apply_per_turn_modifiers(&stats)
            });

        let effects = character
            .effects
            .iter()
            .cloned()
            .map(Effect::tick)
            .filter(|effect| !effect.should_remove())
            .collect();

        CharacterState {
            base_stats,
            effects,
            ..character.clone()
        }
    }

    pub fn has_effect(&self, character: &CharacterState, id: &str) -> bool {
        character.effects.iter().any(|effect| effect.id == id)
    }

    pub fn merge_effect_modifiers(&self, effects: &[Effect]) -> PartialStats {
        merge_effect_modifiers(effects)
    }

    pub fn merge_per_turn_modifiers(&self, effects: &[Effect]) -> PartialStats {
        merge_per_turn_modifiers(effects)
    }
}

impl Default for EffectManager {
    fn default() -> Self {
        Self::new(EffectRegistry::new())
    }
}

/// Sums static modifiers per stat; stats no effect touches stay absent.
pub fn merge_effect_modifiers(effects: &[Effect]) -> PartialStats {
    merge(effects.iter().filter_map(|effect| effect.stat_modifiers.as_ref()))
}

/// Sums per-turn modifiers per stat; stats no effect touches stay absent.
pub fn merge_per_turn_modifiers(effects: &[Effect]) -> PartialStats {
    merge(
        effects
            .iter()
            .filter_map(|effect| effect.per_turn_modifiers.as_ref()),
    )
}

fn merge<'a>(modifiers: impl Iterator<Item = &'a PartialStats>) -> PartialStats {
    modifiers.fold(PartialStats::new(), |mut total, modifiers| {
        total.accumulate(modifiers);
        total
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effect::builtin::{BLINDNESS, POISON};
    use crate::state::CharacterId;
    use crate::stats::{StatBlock, StatKind};

    fn hero() -> CharacterState {
        CharacterState::new(
            CharacterId::new("hero"),
            "Hero",
            StatBlock::new(10, 10, 10, 0, 10, 10),
        )
    }

    fn game_registry() -> EffectRegistry {
        [
            EffectDefinition::new("strength_potion", "Strength", "")
                .with_stat_modifiers(PartialStats::new().with(StatKind::Strength, 2))
                .with_duration(5),
            EffectDefinition::new("regeneration", "Regeneration", "")
                .with_per_turn_modifiers(PartialStats::new().with(StatKind::Health, 2))
                .with_duration(2),
            EffectDefinition::new(BLINDNESS, "Fake blindness", "shadowed"),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn builtins_win_lookups() {
        let manager = EffectManager::new(game_registry());

        let blindness = manager.definition(BLINDNESS).unwrap();
        assert!(blindness.builtin);
        assert_eq!(blindness.name, "Blindness");

        assert!(manager.definition("regeneration").is_some());
        assert!(manager.builtin_definition("regeneration").is_none());
        assert!(manager.definition("nothing").is_none());
        assert_eq!(
            manager
                .definitions()
                .filter(|definition| definition.id == BLINDNESS)
                .count(),
            1
        );
    }

    #[test]
    fn unknown_effect_is_an_error() {
        let manager = EffectManager::default();
        let error = manager.apply_effect(&hero(), "curse_of_nothing", None);

        assert_eq!(
            error,
            Err(EffectError::UnknownEffect {
                id: EffectId::new("curse_of_nothing")
            })
        );
    }

    #[test]
    fn apply_leaves_input_untouched() {
        let manager = EffectManager::default();
        let character = hero();

        let updated = manager.apply_effect(&character, POISON, None).unwrap();

        assert!(character.effects.is_empty());
        assert_eq!(updated.effects.len(), 1);
        assert_eq!(updated.effects[0].duration, Some(3));
    }

    #[test]
    fn poison_ticks_health_down_then_expires() {
        let manager = EffectManager::default();
        let mut character = manager.apply_effect(&hero(), POISON, None).unwrap();

        let mut health = vec![character.base_stats.health];
        for _ in 0..3 {
            character = manager.tick_effects(&character);
            health.push(character.base_stats.health);
        }

        assert_eq!(health, vec![10, 9, 8, 7]);
        assert!(character.effects.is_empty());
    }

    #[test]
    fn permanent_static_modifiers_do_not_compound() {
        let manager = EffectManager::default();
        let mut character = manager.apply_effect(&hero(), BLINDNESS, None).unwrap();

        for _ in 0..10 {
            character = manager.tick_effects(&character);
        }

        assert_eq!(character.effects.len(), 1);
        assert_eq!(character.base_stats.perception, 10);
        assert_eq!(character.effects[0].duration, None);
    }

    #[test]
    fn removing_missing_effect_returns_same_reference() {
        let manager = EffectManager::default();
        let character = manager.apply_effect(&hero(), POISON, None).unwrap();

        let updated = manager.remove_effect(&character, BLINDNESS);

        match updated {
            Cow::Borrowed(same) => assert!(std::ptr::eq(same, &character)),
            Cow::Owned(_) => panic!("expected the input reference back"),
        }
        assert_eq!(character.effects.len(), 1);
    }

    #[test]
    fn stacking_and_first_occurrence_removal() {
        let manager = EffectManager::default();
        let character = manager.apply_effect(&hero(), POISON, Some(2)).unwrap();
        let character = manager.apply_effect(&character, POISON, Some(5)).unwrap();
        assert_eq!(character.effects.len(), 2);

        let updated = manager.remove_effect(&character, POISON).into_owned();

        assert_eq!(updated.effects.len(), 1);
        assert_eq!(updated.effects[0].duration, Some(5));
    }

    #[test]
    fn per_turn_modifiers_compound_in_list_order() {
        let manager = EffectManager::new(game_registry());
        let character = manager.apply_effect(&hero(), POISON, None).unwrap();
        let character = manager
            .apply_effect(&character, "regeneration", None)
            .unwrap();

        let ticked = manager.tick_effects(&character);
        assert_eq!(ticked.base_stats.health, 11);

        let ticked = manager.tick_effects(&ticked);
        assert_eq!(ticked.base_stats.health, 12);
        // regeneration expired after its second tick
        assert_eq!(ticked.effects.len(), 1);
        assert_eq!(ticked.effects[0].id, POISON);
    }

    #[test]
    fn ticking_without_effects_keeps_base_stats() {
        let manager = EffectManager::default();
        let character = hero();
        let ticked = manager.tick_effects(&character);
        assert_eq!(ticked.base_stats, character.base_stats);
        assert!(ticked.effects.is_empty());
    }

    #[test]
    fn merges_sum_per_stat_and_keep_absence() {
        let manager = EffectManager::new(game_registry());
        let character = manager
            .apply_effect(&hero(), "strength_potion", None)
            .unwrap();
        let character = manager
            .apply_effect(&character, "strength_potion", None)
            .unwrap();
        let character = manager.apply_effect(&character, POISON, None).unwrap();

        let statics = manager.merge_effect_modifiers(&character.effects);
        assert_eq!(statics.strength, Some(4));
        assert_eq!(statics.health, None);
        assert_eq!(statics.len(), 1);

        let per_turn = manager.merge_per_turn_modifiers(&character.effects);
        assert_eq!(per_turn.health, Some(-1));
        assert_eq!(per_turn.strength, None);

        assert!(merge_effect_modifiers(&[]).is_empty());
    }
}
