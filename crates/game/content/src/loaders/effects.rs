//! Game effect definition loader.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tale_core::effect::builtin;
use tale_core::{EffectDefinition, EffectRegistry};
use tracing::warn;

use crate::loaders::{LoadResult, read_file};

/// Effect catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EffectCatalog {
    pub effects: Vec<EffectDefinition>,
}

/// Loader for the game effect registry.
pub struct EffectLoader;

impl EffectLoader {
    pub fn load(path: &Path) -> LoadResult<EffectRegistry> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    /// Parses a catalog into a game registry.
    ///
    /// Duplicate ids within the catalog are rejected. Ids that collide with a
    /// built-in are kept but never win a lookup.
    pub fn parse(content: &str) -> LoadResult<EffectRegistry> {
        let catalog: EffectCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse effect catalog RON: {}", e))?;

        let builtins = builtin::registry();
        let mut registry = EffectRegistry::new();
        for mut definition in catalog.effects {
            if builtins.contains(definition.id.as_str()) {
                warn!(effect = %definition.id, "game effect shadowed by built-in");
            }
            definition.builtin = false;
            let id = definition.id.clone();
            if registry.insert(definition).is_some() {
                anyhow::bail!("Effect '{}' is defined more than once", id);
            }
        }

        Ok(registry)
    }
}
