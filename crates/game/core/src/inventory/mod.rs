//! Container and slot resolution.
//!
//! Characters carry a flat list of [`InventoryEntry`]s; containers among them
//! nest further objects in general storage and in named slots. Everything
//! here is a pure query except [`transfer`], which works on a state the
//! caller already owns.
mod container;
pub mod hands;
mod search;
mod transfer;

pub use container::{
    FitError, available_slots, calculate_container_weight, can_fit_in_slot, can_fit_in_storage,
    find_slot_in_container, slot_contents, slot_fit, storage_fit,
};
pub use search::{
    ItemLocation, find_inventory_entry, find_item_in_inventory, find_item_in_objects, find_object,
    find_object_mut, holds,
};
pub use transfer::{TransferError, transfer};

use crate::object::ObjectDefinition;
use crate::state::ObjectId;

/// One top-level item in a character's inventory.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InventoryEntry {
    pub id: ObjectId,
    pub quantity: u32,
    /// Materialized object; `None` for entries known only by id.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub object_data: Option<ObjectDefinition>,
}

impl InventoryEntry {
    pub fn from_object(object: ObjectDefinition) -> Self {
        Self {
            id: object.id.clone(),
            quantity: object.quantity,
            object_data: Some(object),
        }
    }

    pub fn by_id(id: impl Into<ObjectId>, quantity: u32) -> Self {
        Self {
            id: id.into(),
            quantity,
            object_data: None,
        }
    }

    pub fn object(&self) -> Option<&ObjectDefinition> {
        self.object_data.as_ref()
    }
}
