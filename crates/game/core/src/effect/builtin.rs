//! Built-in effect definitions shared by every game.
//!
//! The registry is constructed once per process and handed out behind an
//! [`Arc`]; there is no way to mutate it after construction.

use std::sync::{Arc, OnceLock};

use super::definition::{EffectDefinition, EffectRegistry};
use crate::stats::{PartialStats, StatKind};

pub const BLINDNESS: &str = "blindness";
pub const POISON: &str = "poison";
pub const UNCONSCIOUS: &str = "unconscious";
pub const DEAD: &str = "dead";

/// Modifier large enough to floor any stat it touches.
const INCAPACITATED: i32 = -999;

/// Returns the process-wide built-in registry.
pub fn registry() -> Arc<EffectRegistry> {
    static REGISTRY: OnceLock<Arc<EffectRegistry>> = OnceLock::new();
    Arc::clone(REGISTRY.get_or_init(|| Arc::new(definitions().into_iter().collect())))
}

/// The built-in definitions, in a fresh vector.
pub fn definitions() -> Vec<EffectDefinition> {
    vec![
        EffectDefinition::new(BLINDNESS, "Blindness", "You cannot see anything.")
            .with_stat_modifiers(PartialStats::new().with(StatKind::Perception, INCAPACITATED))
            .builtin(),
        EffectDefinition::new(POISON, "Poison", "Venom saps your health every turn.")
            .with_per_turn_modifiers(PartialStats::new().with(StatKind::Health, -1))
            .with_duration(3)
            .builtin(),
        EffectDefinition::new(UNCONSCIOUS, "Unconscious", "You are out cold.")
            .with_stat_modifiers(
                PartialStats::new()
                    .with(StatKind::Perception, INCAPACITATED)
                    .with(StatKind::Agility, INCAPACITATED),
            )
            .builtin(),
        EffectDefinition::new(DEAD, "Dead", "Your adventure is over.")
            .with_stat_modifiers(
                PartialStats::new()
                    .with(StatKind::Willpower, INCAPACITATED)
                    .with(StatKind::Perception, INCAPACITATED)
                    .with(StatKind::Strength, INCAPACITATED)
                    .with(StatKind::Agility, INCAPACITATED),
            )
            .builtin(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_is_shared() {
        let first = registry();
        let second = registry();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(first.len(), 4);
    }

    #[test]
    fn every_builtin_is_flagged() {
        assert!(registry().iter().all(|definition| definition.builtin));
    }

    #[test]
    fn poison_and_blindness_shapes() {
        let registry = registry();

        let poison = registry.get(POISON).unwrap();
        assert_eq!(poison.duration, Some(3));
        assert_eq!(
            poison.per_turn_modifiers.and_then(|m| m.health),
            Some(-1)
        );

        let blindness = registry.get(BLINDNESS).unwrap();
        assert_eq!(blindness.duration, None);
        assert_eq!(
            blindness.stat_modifiers.and_then(|m| m.perception),
            Some(-999)
        );
    }
}
