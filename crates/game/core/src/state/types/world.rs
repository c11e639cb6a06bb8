use std::collections::{BTreeMap, BTreeSet};

use super::common::SceneId;

/// World-wide flags and the turn counter.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct WorldState {
    pub global_flags: BTreeSet<String>,
    pub visited_scenes: BTreeSet<SceneId>,
    /// Flags set on scenes by scene-targeted payloads.
    pub scene_flags: BTreeMap<SceneId, BTreeSet<String>>,
    /// Number of completed turns.
    pub turn: u64,
}

impl WorldState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_global_flag(&self, flag: &str) -> bool {
        self.global_flags.contains(flag)
    }

    pub fn has_scene_flag(&self, scene: &str, flag: &str) -> bool {
        self.scene_flags
            .get(scene)
            .is_some_and(|flags| flags.contains(flag))
    }

    pub fn has_visited(&self, scene: &str) -> bool {
        self.visited_scenes.contains(scene)
    }
}
