//! The two hand containers every character carries.

use crate::config::GameConfig;
use crate::object::{CONTAINER_TRAIT, ObjectDefinition, Slot};

pub const HAND_TRAIT: &str = "hand";

pub fn left_hand() -> ObjectDefinition {
    hand(GameConfig::LEFT_HAND_ID, "Left hand", "left")
}

pub fn right_hand() -> ObjectDefinition {
    hand(GameConfig::RIGHT_HAND_ID, "Right hand", "right")
}

pub fn both() -> [ObjectDefinition; 2] {
    [left_hand(), right_hand()]
}

pub fn is_hand(object: &ObjectDefinition) -> bool {
    object.has_trait(HAND_TRAIT)
}

/// Holds one item in general storage (any weight) and one ring per finger.
fn hand(id: &str, name: &str, side: &str) -> ObjectDefinition {
    let mut hand = ObjectDefinition::new(id, name)
        .with_trait(CONTAINER_TRAIT)
        .with_trait(HAND_TRAIT)
        .with_max_items(GameConfig::HAND_MAX_ITEMS)
        .fixed();

    hand.slots = GameConfig::FINGER_SLOTS
        .iter()
        .map(|finger| Slot::new(*finger).with_name(format!("{side} {finger}")))
        .collect();
    hand
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hands_have_five_empty_finger_slots() {
        for hand in both() {
            let ids: Vec<_> = hand.slots.iter().map(|slot| slot.id.as_str()).collect();
            assert_eq!(ids, vec!["thumb", "index", "middle", "ring", "pinky"]);
            assert!(hand.slots.iter().all(Slot::is_empty));
            assert_eq!(hand.max_items, Some(1));
            assert_eq!(hand.max_weight, None);
            assert!(!hand.removable);
            assert!(is_hand(&hand));
        }
    }
}
