//! Effect definitions and registries.

use std::collections::BTreeMap;

use crate::state::EffectId;
use crate::stats::PartialStats;

/// Authoring-time template from which [`Effect`](super::Effect)s are created.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EffectDefinition {
    pub id: EffectId,
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub stat_modifiers: Option<PartialStats>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub per_turn_modifiers: Option<PartialStats>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub duration: Option<i32>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub builtin: bool,
}

impl EffectDefinition {
    pub fn new(
        id: impl Into<EffectId>,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            stat_modifiers: None,
            per_turn_modifiers: None,
            duration: None,
            builtin: false,
        }
    }

    #[must_use]
    pub fn with_stat_modifiers(mut self, modifiers: PartialStats) -> Self {
        self.stat_modifiers = Some(modifiers);
        self
    }

    #[must_use]
    pub fn with_per_turn_modifiers(mut self, modifiers: PartialStats) -> Self {
        self.per_turn_modifiers = Some(modifiers);
        self
    }

    #[must_use]
    pub fn with_duration(mut self, duration: i32) -> Self {
        self.duration = Some(duration);
        self
    }

    #[must_use]
    pub fn builtin(mut self) -> Self {
        self.builtin = true;
        self
    }
}

/// Definitions keyed by id.
///
/// Registries are assembled once (built-ins at startup, game content at load
/// time) and only read afterwards.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EffectRegistry {
    definitions: BTreeMap<EffectId, EffectDefinition>,
}

impl EffectRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a definition, returning the one it replaced.
    pub fn insert(&mut self, definition: EffectDefinition) -> Option<EffectDefinition> {
        self.definitions.insert(definition.id.clone(), definition)
    }

    pub fn get(&self, id: &str) -> Option<&EffectDefinition> {
        self.definitions.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.definitions.contains_key(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &EffectDefinition> {
        self.definitions.values()
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

impl FromIterator<EffectDefinition> for EffectRegistry {
    fn from_iter<I: IntoIterator<Item = EffectDefinition>>(iter: I) -> Self {
        let mut registry = Self::new();
        for definition in iter {
            registry.insert(definition);
        }
        registry
    }
}
