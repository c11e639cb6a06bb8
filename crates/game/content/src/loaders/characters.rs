//! Character catalog loader.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};
use crate::specs::CharacterSpec;

/// Character catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CharacterCatalog {
    pub characters: Vec<CharacterSpec>,
}

/// Loader for the character catalog.
pub struct CharacterLoader;

impl CharacterLoader {
    pub fn load(path: &Path) -> LoadResult<Vec<CharacterSpec>> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<Vec<CharacterSpec>> {
        let catalog: CharacterCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse character catalog RON: {}", e))?;

        Ok(catalog.characters)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_characters_with_inventory() {
        let characters = CharacterLoader::parse(
            r#"(
                characters: [
                    (
                        id: "hero",
                        name: "Hero",
                        base_stats: Some((
                            health: 12,
                            willpower: 10,
                            perception: 9,
                            reputation: 0,
                            strength: 11,
                            agility: 10,
                        )),
                        traits: ["curious"],
                        inventory: [
                            (
                                id: "backpack",
                                name: "Backpack",
                                traits: ["container"],
                                max_weight: Some(10.0),
                                slots: [(id: "side")],
                            ),
                        ],
                        effects: ["poison"],
                    ),
                    (id: "cat", name: "Cat"),
                ],
            )"#,
        )
        .unwrap();

        let hero = &characters[0];
        assert_eq!(hero.base_stats.map(|stats| stats.perception), Some(9));
        assert!(hero.traits.contains("curious"));
        assert_eq!(hero.inventory[0].max_weight, Some(10.0));
        assert_eq!(hero.effects.len(), 1);

        let cat = &characters[1];
        assert!(cat.base_stats.is_none());
        assert!(cat.inventory.is_empty());
    }
}
