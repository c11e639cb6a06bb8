//! Object definitions: world objects, carried items, and containers.
//!
//! The same [`ObjectDefinition`] describes a lamp on a table, a ring on a
//! finger, and the backpack holding both. Containers store children two ways:
//! unstructured general storage (`contains`) and named single-occupancy
//! [`Slot`]s that reference their item by id.
mod state;

use std::collections::{BTreeMap, BTreeSet};

pub use state::{StateDef, transition_payload};

use crate::state::{ObjectId, SlotId, StateId};

/// Every object definition reachable in a game, keyed by id.
pub type ResolvedObjects = BTreeMap<ObjectId, ObjectDefinition>;

/// Trait marking an object as able to hold other objects.
pub const CONTAINER_TRAIT: &str = "container";

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ObjectDefinition {
    pub id: ObjectId,
    #[cfg_attr(feature = "serde", serde(default))]
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub weight: f64,
    #[cfg_attr(feature = "serde", serde(default = "default_quantity"))]
    pub quantity: u32,
    /// How hard the object is to notice.
    #[cfg_attr(feature = "serde", serde(default))]
    pub perception: i32,
    #[cfg_attr(feature = "serde", serde(default = "default_removable"))]
    pub removable: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub traits: BTreeSet<String>,

    /// General storage.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Vec::is_empty")
    )]
    pub contains: Vec<ObjectDefinition>,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Vec::is_empty")
    )]
    pub slots: Vec<Slot>,
    /// Weight ceiling for general storage (contents plus incoming item).
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub max_weight: Option<f64>,
    /// Entry ceiling for general storage, counted by quantity.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub max_items: Option<u32>,

    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub width: Option<f64>,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub height: Option<f64>,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub depth: Option<f64>,

    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Vec::is_empty")
    )]
    pub states: Vec<StateDef>,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub default_state: Option<StateId>,
}

#[cfg(feature = "serde")]
fn default_quantity() -> u32 {
    1
}

#[cfg(feature = "serde")]
fn default_removable() -> bool {
    true
}

impl ObjectDefinition {
    pub fn new(id: impl Into<ObjectId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            weight: 0.0,
            quantity: 1,
            perception: 0,
            removable: true,
            description: String::new(),
            traits: BTreeSet::new(),
            contains: Vec::new(),
            slots: Vec::new(),
            max_weight: None,
            max_items: None,
            width: None,
            height: None,
            depth: None,
            states: Vec::new(),
            default_state: None,
        }
    }

    #[must_use]
    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    #[must_use]
    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity;
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    #[must_use]
    pub fn with_trait(mut self, name: impl Into<String>) -> Self {
        self.traits.insert(name.into());
        self
    }

    #[must_use]
    pub fn fixed(mut self) -> Self {
        self.removable = false;
        self
    }

    #[must_use]
    pub fn with_content(mut self, item: ObjectDefinition) -> Self {
        self.contains.push(item);
        self
    }

    #[must_use]
    pub fn with_slot(mut self, slot: Slot) -> Self {
        self.slots.push(slot);
        self
    }

    #[must_use]
    pub fn with_max_weight(mut self, max_weight: f64) -> Self {
        self.max_weight = Some(max_weight);
        self
    }

    #[must_use]
    pub fn with_max_items(mut self, max_items: u32) -> Self {
        self.max_items = Some(max_items);
        self
    }

    #[must_use]
    pub fn with_dimensions(mut self, width: f64, height: f64, depth: f64) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self.depth = Some(depth);
        self
    }

    #[must_use]
    pub fn with_state(mut self, state: StateDef) -> Self {
        self.states.push(state);
        self
    }

    #[must_use]
    pub fn with_default_state(mut self, state: impl Into<StateId>) -> Self {
        self.default_state = Some(state.into());
        self
    }

    pub fn has_trait(&self, name: &str) -> bool {
        self.traits.contains(name)
    }

    /// True when the object can hold other objects.
    pub fn is_container(&self) -> bool {
        self.has_trait(CONTAINER_TRAIT) || !self.contains.is_empty() || !self.slots.is_empty()
    }

    pub fn state(&self, id: &str) -> Option<&StateDef> {
        self.states.iter().find(|state| state.id == id)
    }

    /// Finds the state whose action names match a player verb.
    ///
    /// Matching is case-insensitive; an action name matches when it equals
    /// the verb or appears in it as a whole-word phrase ("turn on" matches
    /// "turn on the lamp" but "on" does not match "ontology").
    pub fn state_for_verb(&self, verb: &str) -> Option<&StateDef> {
        self.states.iter().find(|state| state.matches_verb(verb))
    }

    /// Iterates this object and everything nested in its general storage.
    pub fn walk(&self) -> impl Iterator<Item = &ObjectDefinition> {
        let mut stack = vec![self];
        std::iter::from_fn(move || {
            let next = stack.pop()?;
            stack.extend(next.contains.iter().rev());
            Some(next)
        })
    }
}

/// Named single-occupancy storage inside a container.
///
/// Constraints are declarative: absent limits impose nothing, and each
/// dimension is compared independently.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Slot {
    pub id: SlotId,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub name: Option<String>,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub max_weight: Option<f64>,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub width: Option<f64>,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub height: Option<f64>,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub depth: Option<f64>,
    /// `None` while the slot is empty.
    #[cfg_attr(feature = "serde", serde(default))]
    pub item_id: Option<ObjectId>,
}

impl Slot {
    pub fn new(id: impl Into<SlotId>) -> Self {
        Self {
            id: id.into(),
            name: None,
            max_weight: None,
            width: None,
            height: None,
            depth: None,
            item_id: None,
        }
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_max_weight(mut self, max_weight: f64) -> Self {
        self.max_weight = Some(max_weight);
        self
    }

    #[must_use]
    pub fn with_dimensions(mut self, width: f64, height: f64, depth: f64) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self.depth = Some(depth);
        self
    }

    #[must_use]
    pub fn holding(mut self, item: impl Into<ObjectId>) -> Self {
        self.item_id = Some(item.into());
        self
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.item_id.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::EffectPayload;

    fn lamp() -> ObjectDefinition {
        ObjectDefinition::new("lamp", "Brass lamp")
            .with_state(StateDef::new("lit", ["light", "Turn On"], EffectPayload::new()))
            .with_state(StateDef::new("unlit", ["extinguish"], EffectPayload::new()))
            .with_default_state("unlit")
    }

    #[test]
    fn verbs_match_case_insensitively() {
        let lamp = lamp();
        assert_eq!(lamp.state_for_verb("LIGHT").map(|s| s.id.as_str()), Some("lit"));
        assert_eq!(lamp.state_for_verb("turn on").map(|s| s.id.as_str()), Some("lit"));
    }

    #[test]
    fn verbs_match_whole_word_phrases() {
        let lamp = lamp();
        assert_eq!(
            lamp.state_for_verb("please turn on the lamp")
                .map(|s| s.id.as_str()),
            Some("lit")
        );
        assert!(lamp.state_for_verb("turnon").is_none());
        assert!(lamp.state_for_verb("lighten").is_none());
        assert!(lamp.state_for_verb("").is_none());
    }

    #[test]
    fn container_detection() {
        assert!(!lamp().is_container());
        assert!(ObjectDefinition::new("bag", "Bag").with_trait(CONTAINER_TRAIT).is_container());
        assert!(
            ObjectDefinition::new("belt", "Belt")
                .with_slot(Slot::new("buckle"))
                .is_container()
        );
    }

    #[test]
    fn walk_visits_nested_storage_depth_first() {
        let chest = ObjectDefinition::new("chest", "Chest")
            .with_content(
                ObjectDefinition::new("pouch", "Pouch")
                    .with_content(ObjectDefinition::new("coin", "Coin")),
            )
            .with_content(ObjectDefinition::new("map", "Map"));

        let ids: Vec<_> = chest.walk().map(|object| object.id.as_str()).collect();
        assert_eq!(ids, vec!["chest", "pouch", "coin", "map"]);
    }
}
