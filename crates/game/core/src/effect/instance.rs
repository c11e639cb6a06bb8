//! Runtime effect instances.

use std::collections::BTreeMap;

use super::definition::EffectDefinition;
use crate::state::EffectId;
use crate::stats::{PartialStats, StatBlock};

/// Where an effect's definition came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum EffectSource {
    Builtin,
    Game,
}

/// A status currently applied to a character.
///
/// Effects are values: [`Effect::tick`] consumes the instance and returns the
/// next one, and nothing in the engine edits an attached effect in place.
///
/// - `duration == None`: permanent, never expires on its own
/// - `duration <= 0`: expired, dropped at the end of the current tick
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Effect {
    pub id: EffectId,
    pub source: EffectSource,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub duration: Option<i32>,
    /// Static modifiers, added every time current stats are derived.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub stat_modifiers: Option<PartialStats>,
    /// Folded into base stats once per tick.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub per_turn_modifiers: Option<PartialStats>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub metadata: BTreeMap<String, String>,
}

impl Effect {
    /// Instantiates an effect from its definition.
    ///
    /// An explicit `duration` overrides the definition's; `None` falls back to
    /// it (and a definition without a duration yields a permanent effect).
    pub fn from_definition(definition: &EffectDefinition, duration: Option<i32>) -> Self {
        let source = if definition.builtin {
            EffectSource::Builtin
        } else {
            EffectSource::Game
        };

        Self {
            id: definition.id.clone(),
            source,
            duration: duration.or(definition.duration),
            stat_modifiers: definition.stat_modifiers,
            per_turn_modifiers: definition.per_turn_modifiers,
            metadata: BTreeMap::new(),
        }
    }

    /// Attaches a metadata entry (builder pattern).
    #[must_use]
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    #[inline]
    pub fn is_permanent(&self) -> bool {
        self.duration.is_none()
    }

    /// Advances the effect by one turn.
    ///
    /// Permanent effects come back untouched.
    #[must_use]
    pub fn tick(self) -> Self {
        match self.duration {
            None => self,
            Some(remaining) => Self {
                duration: Some(remaining - 1),
                ..self
            },
        }
    }

    /// True once a finite duration has run out.
    pub fn should_remove(&self) -> bool {
        self.duration.is_some_and(|remaining| remaining <= 0)
    }

    /// Returns `base` with this effect's per-turn modifiers added.
    pub fn apply_per_turn_modifiers(&self, base: &StatBlock) -> StatBlock {
        match &self.per_turn_modifiers {
            Some(modifiers) => base.apply(modifiers),
            None => *base,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::StatKind;

    fn poison_definition() -> EffectDefinition {
        EffectDefinition::new("poison", "Poison", "Venom in the blood.")
            .with_duration(3)
            .with_per_turn_modifiers(PartialStats::new().with(StatKind::Health, -1))
    }

    #[test]
    fn permanent_tick_is_identity() {
        let definition = EffectDefinition::new("blessed", "Blessed", "")
            .with_stat_modifiers(PartialStats::new().with(StatKind::Reputation, 1));
        let effect = Effect::from_definition(&definition, None);
        let before = effect.clone();

        let ticked = effect.tick();

        assert_eq!(ticked, before);
        assert!(ticked.is_permanent());
        assert!(!ticked.should_remove());
    }

    #[test]
    fn finite_tick_decrements_and_copies_fields() {
        let effect = Effect::from_definition(&poison_definition(), None).with_metadata("by", "asp");

        let ticked = effect.clone().tick();

        assert_eq!(ticked.duration, Some(2));
        assert_eq!(ticked.id, effect.id);
        assert_eq!(ticked.per_turn_modifiers, effect.per_turn_modifiers);
        assert_eq!(ticked.metadata.get("by").map(String::as_str), Some("asp"));
    }

    #[test]
    fn should_remove_only_when_finite_and_exhausted() {
        let definition = poison_definition();
        assert!(!Effect::from_definition(&definition, Some(1)).should_remove());
        assert!(Effect::from_definition(&definition, Some(0)).should_remove());
        assert!(Effect::from_definition(&definition, Some(-2)).should_remove());
        assert!(Effect::from_definition(&definition, Some(1)).tick().should_remove());
    }

    #[test]
    fn explicit_duration_overrides_definition() {
        let definition = poison_definition();
        assert_eq!(Effect::from_definition(&definition, Some(7)).duration, Some(7));
        assert_eq!(Effect::from_definition(&definition, None).duration, Some(3));
    }

    #[test]
    fn source_follows_builtin_flag() {
        let mut definition = poison_definition();
        assert_eq!(
            Effect::from_definition(&definition, None).source,
            EffectSource::Game
        );

        definition.builtin = true;
        assert_eq!(
            Effect::from_definition(&definition, None).source,
            EffectSource::Builtin
        );
    }

    #[test]
    fn modifiers_are_copied_out_of_the_definition() {
        let mut definition = poison_definition();
        let effect = Effect::from_definition(&definition, None);

        definition.per_turn_modifiers = Some(PartialStats::new().with(StatKind::Health, -50));

        assert_eq!(
            effect.per_turn_modifiers,
            Some(PartialStats::new().with(StatKind::Health, -1))
        );
    }

    #[test]
    fn per_turn_modifiers_leave_input_untouched() {
        let effect = Effect::from_definition(&poison_definition(), None);
        let base = StatBlock::new(10, 1, 1, 1, 1, 1);

        let next = effect.apply_per_turn_modifiers(&base);

        assert_eq!(next.health, 9);
        assert_eq!(next.willpower, 1);
        assert_eq!(base.health, 10);
    }
}
