//! Authoring shapes for characters and scenes.
//!
//! Objects and effect definitions are authored directly as their core types;
//! characters and scenes need a slimmer shape because their runtime form
//! carries derived data (current stats, hand fixtures, live effects).

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tale_core::{CharacterId, EffectId, ObjectDefinition, SceneId, StatBlock};

/// A character as written in `characters.ron`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CharacterSpec {
    pub id: CharacterId,
    pub name: String,
    /// Falls back to `GameConfig::default_stats` when omitted.
    #[serde(default)]
    pub base_stats: Option<StatBlock>,
    #[serde(default)]
    pub traits: BTreeSet<String>,
    #[serde(default)]
    pub flags: BTreeSet<String>,
    /// Top-level inventory. An entry with a hand id replaces that hand.
    #[serde(default)]
    pub inventory: Vec<ObjectDefinition>,
    /// Effects active at game start, applied with their default duration.
    #[serde(default)]
    pub effects: Vec<EffectId>,
}

impl CharacterSpec {
    pub fn new(id: impl Into<CharacterId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            base_stats: None,
            traits: BTreeSet::new(),
            flags: BTreeSet::new(),
            inventory: Vec::new(),
            effects: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_base_stats(mut self, stats: StatBlock) -> Self {
        self.base_stats = Some(stats);
        self
    }

    #[must_use]
    pub fn with_item(mut self, item: ObjectDefinition) -> Self {
        self.inventory.push(item);
        self
    }

    #[must_use]
    pub fn with_effect(mut self, id: impl Into<EffectId>) -> Self {
        self.effects.push(id.into());
        self
    }
}

/// A scene and the objects lying loose in it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SceneSpec {
    pub id: SceneId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub objects: Vec<ObjectDefinition>,
    #[serde(default)]
    pub flags: BTreeSet<String>,
}

impl SceneSpec {
    pub fn new(id: impl Into<SceneId>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            objects: Vec::new(),
            flags: BTreeSet::new(),
        }
    }

    #[must_use]
    pub fn with_object(mut self, object: ObjectDefinition) -> Self {
        self.objects.push(object);
        self
    }

    #[must_use]
    pub fn with_flag(mut self, flag: impl Into<String>) -> Self {
        self.flags.insert(flag.into());
        self
    }
}

/// Contents of `scenes.ron`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SceneCatalog {
    /// Scene the game opens in.
    pub start: SceneId,
    #[serde(default)]
    pub global_flags: BTreeSet<String>,
    pub scenes: Vec<SceneSpec>,
}
