//! Declarative state changes carried by an action result.

use crate::state::{CharacterId, EffectId, ObjectId, SceneId, SlotId, StateId};
use crate::stats::PartialStats;

/// Who a payload's stats, traits, flags, and effects apply to.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(tag = "type", content = "id", rename_all = "lowercase")
)]
pub enum Target {
    /// Only flags apply to scenes.
    Scene(SceneId),
    Character(CharacterId),
}

/// Moves one item between holders.
///
/// A holder id is a container object, the acting character (their top-level
/// inventory), or the current scene (loose on the floor).
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TransferItem {
    pub item_id: ObjectId,
    pub from_container_id: String,
    pub to_container_id: String,
    /// `None` targets general storage.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub slot_id: Option<SlotId>,
}

impl TransferItem {
    pub fn new(
        item_id: impl Into<ObjectId>,
        from_container_id: impl Into<String>,
        to_container_id: impl Into<String>,
    ) -> Self {
        Self {
            item_id: item_id.into(),
            from_container_id: from_container_id.into(),
            to_container_id: to_container_id.into(),
            slot_id: None,
        }
    }

    #[must_use]
    pub fn into_slot(mut self, slot_id: impl Into<SlotId>) -> Self {
        self.slot_id = Some(slot_id.into());
        self
    }
}

/// Persists an object's state id; `None` clears tracking.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ObjectStateChange {
    pub object_id: ObjectId,
    pub state_id: Option<StateId>,
}

/// Everything a successful result asks the engine to change.
///
/// Removals are applied before additions for every list field.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EffectPayload {
    /// Defaults to the acting character.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub target: Option<Target>,
    /// Folded into the target's base stats.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub stats: Option<PartialStats>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Vec::is_empty"))]
    pub add_traits: Vec<String>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Vec::is_empty"))]
    pub remove_traits: Vec<String>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Vec::is_empty"))]
    pub add_flags: Vec<String>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Vec::is_empty"))]
    pub remove_flags: Vec<String>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Vec::is_empty"))]
    pub add_effects: Vec<EffectId>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Vec::is_empty"))]
    pub remove_effects: Vec<EffectId>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub transfer_item: Option<TransferItem>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub object_state: Option<ObjectStateChange>,
}

impl EffectPayload {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_target(mut self, target: Target) -> Self {
        self.target = Some(target);
        self
    }

    #[must_use]
    pub fn with_stats(mut self, stats: PartialStats) -> Self {
        self.stats = Some(stats);
        self
    }

    #[must_use]
    pub fn add_trait(mut self, name: impl Into<String>) -> Self {
        self.add_traits.push(name.into());
        self
    }

    #[must_use]
    pub fn remove_trait(mut self, name: impl Into<String>) -> Self {
        self.remove_traits.push(name.into());
        self
    }

    #[must_use]
    pub fn add_flag(mut self, name: impl Into<String>) -> Self {
        self.add_flags.push(name.into());
        self
    }

    #[must_use]
    pub fn remove_flag(mut self, name: impl Into<String>) -> Self {
        self.remove_flags.push(name.into());
        self
    }

    #[must_use]
    pub fn add_effect(mut self, id: impl Into<EffectId>) -> Self {
        self.add_effects.push(id.into());
        self
    }

    #[must_use]
    pub fn remove_effect(mut self, id: impl Into<EffectId>) -> Self {
        self.remove_effects.push(id.into());
        self
    }

    #[must_use]
    pub fn with_transfer(mut self, transfer: TransferItem) -> Self {
        self.transfer_item = Some(transfer);
        self
    }

    #[must_use]
    pub fn with_object_state(
        mut self,
        object_id: impl Into<ObjectId>,
        state_id: Option<StateId>,
    ) -> Self {
        self.object_state = Some(ObjectStateChange {
            object_id: object_id.into(),
            state_id,
        });
        self
    }

    /// True when the payload touches stats, traits, or effects.
    ///
    /// Those are the fields a scene target cannot take.
    pub fn touches_character_fields(&self) -> bool {
        self.stats.is_some_and(|stats| !stats.is_empty())
            || !self.add_traits.is_empty()
            || !self.remove_traits.is_empty()
            || !self.add_effects.is_empty()
            || !self.remove_effects.is_empty()
    }

    pub fn is_empty(&self) -> bool {
        !self.touches_character_fields()
            && self.add_flags.is_empty()
            && self.remove_flags.is_empty()
            && self.transfer_item.is_none()
            && self.object_state.is_none()
    }
}
