use std::collections::BTreeSet;

use super::common::{CharacterId, ObjectId};
use crate::effect::Effect;
use crate::inventory::{InventoryEntry, hands};
use crate::object::ObjectDefinition;
use crate::stats::StatBlock;

/// A player or NPC.
///
/// # Invariants
///
/// - `stats` is derived from `base_stats`, `effects`, and carried objects; it
///   is refreshed by [`StatCalculator`](crate::stats::StatCalculator) and is
///   never edited directly.
/// - `inventory` always holds the two hand containers.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CharacterState {
    pub id: CharacterId,
    pub name: String,
    pub base_stats: StatBlock,
    pub stats: StatBlock,
    #[cfg_attr(feature = "serde", serde(default))]
    pub traits: BTreeSet<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub flags: BTreeSet<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub inventory: Vec<InventoryEntry>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub effects: Vec<Effect>,
}

impl CharacterState {
    /// Creates a character with empty hands and current stats equal to base.
    pub fn new(id: CharacterId, name: impl Into<String>, base_stats: StatBlock) -> Self {
        Self {
            id,
            name: name.into(),
            base_stats,
            stats: base_stats,
            traits: BTreeSet::new(),
            flags: BTreeSet::new(),
            inventory: hands::both()
                .into_iter()
                .map(InventoryEntry::from_object)
                .collect(),
            effects: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_trait(mut self, name: impl Into<String>) -> Self {
        self.traits.insert(name.into());
        self
    }

    #[must_use]
    pub fn with_flag(mut self, name: impl Into<String>) -> Self {
        self.flags.insert(name.into());
        self
    }

    /// Adds a top-level inventory entry.
    #[must_use]
    pub fn with_item(mut self, item: ObjectDefinition) -> Self {
        self.inventory.push(InventoryEntry::from_object(item));
        self
    }

    /// Re-adds any hand container missing from the inventory.
    ///
    /// Content may omit hands; loaders call this to restore the fixture.
    pub fn ensure_hands(&mut self) {
        for hand in hands::both() {
            if !self.inventory.iter().any(|entry| entry.id == hand.id) {
                self.inventory.push(InventoryEntry::from_object(hand));
            }
        }
    }

    pub fn has_trait(&self, name: &str) -> bool {
        self.traits.contains(name)
    }

    pub fn has_flag(&self, name: &str) -> bool {
        self.flags.contains(name)
    }

    pub fn inventory_entry(&self, id: &str) -> Option<&InventoryEntry> {
        self.inventory.iter().find(|entry| entry.id == id)
    }

    /// Ids of every top-level inventory entry.
    pub fn carried_ids(&self) -> impl Iterator<Item = &ObjectId> {
        self.inventory.iter().map(|entry| &entry.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;

    #[test]
    fn new_characters_have_both_hands() {
        let character = CharacterState::new(
            CharacterId::new("hero"),
            "Hero",
            StatBlock::new(10, 10, 10, 0, 10, 10),
        );

        assert_eq!(character.stats, character.base_stats);
        assert!(character.inventory_entry(GameConfig::LEFT_HAND_ID).is_some());
        assert!(character.inventory_entry(GameConfig::RIGHT_HAND_ID).is_some());
        assert_eq!(character.inventory.len(), 2);
    }

    #[test]
    fn ensure_hands_only_fills_gaps() {
        let mut character = CharacterState::new(CharacterId::new("hero"), "Hero", StatBlock::default());
        character
            .inventory
            .retain(|entry| entry.id != GameConfig::LEFT_HAND_ID);

        character.ensure_hands();
        character.ensure_hands();

        assert_eq!(character.inventory.len(), 2);
        assert!(character.inventory_entry(GameConfig::LEFT_HAND_ID).is_some());
    }
}
