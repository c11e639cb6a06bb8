use super::{StatBlock, StatKind};
use crate::effect::merge_effect_modifiers;
use crate::object::ResolvedObjects;
use crate::state::CharacterState;

/// Derives current stats from base stats and attached effects.
///
/// Carried objects influence stats only through effects they caused to be
/// attached. The resolved object view is accepted so callers can pass it
/// through unchanged once objects gain direct modifiers.
#[derive(Clone, Copy, Debug, Default)]
pub struct StatCalculator;

impl StatCalculator {
    pub fn new() -> Self {
        Self
    }

    /// `base_stats + merge_effect_modifiers(effects)`, stat by stat.
    pub fn calculate_current_stats(
        &self,
        character: &CharacterState,
        _objects: &ResolvedObjects,
    ) -> StatBlock {
        character
            .base_stats
            .apply(&merge_effect_modifiers(&character.effects))
    }

    pub fn effective_stat(
        &self,
        character: &CharacterState,
        kind: StatKind,
        objects: &ResolvedObjects,
    ) -> i32 {
        self.calculate_current_stats(character, objects).get(kind)
    }

    /// Returns a new character whose `stats` are recomputed.
    ///
    /// `base_stats` is carried over as is.
    pub fn update_character_stats(
        &self,
        character: &CharacterState,
        objects: &ResolvedObjects,
    ) -> CharacterState {
        CharacterState {
            stats: self.calculate_current_stats(character, objects),
            ..character.clone()
        }
    }
}
