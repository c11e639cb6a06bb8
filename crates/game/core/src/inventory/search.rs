use super::InventoryEntry;
use crate::object::{ObjectDefinition, ResolvedObjects};
use crate::state::{ObjectId, SlotId};

/// Where an item was found.
///
/// `slot_id` is `Some` for a named slot and `None` for general storage.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemLocation {
    pub container_id: ObjectId,
    pub slot_id: Option<SlotId>,
}

impl ItemLocation {
    pub fn in_storage(container_id: ObjectId) -> Self {
        Self {
            container_id,
            slot_id: None,
        }
    }

    pub fn in_slot(container_id: ObjectId, slot_id: SlotId) -> Self {
        Self {
            container_id,
            slot_id: Some(slot_id),
        }
    }

    pub fn is_slotted(&self) -> bool {
        self.slot_id.is_some()
    }
}

/// Finds the container holding `item_id` anywhere below the inventory's
/// top-level entries.
///
/// Slot occupants are resolved through `objects`, so items stored inside a
/// slotted container are found too.
pub fn find_item_in_inventory(
    inventory: &[InventoryEntry],
    item_id: &str,
    objects: &ResolvedObjects,
) -> Option<ItemLocation> {
    find_inventory_entry(inventory, item_id, objects).map(|(_, location)| location)
}

/// Like [`find_item_in_inventory`], also returning the top-level entry the
/// item was found under.
pub fn find_inventory_entry<'a>(
    inventory: &'a [InventoryEntry],
    item_id: &str,
    objects: &ResolvedObjects,
) -> Option<(&'a InventoryEntry, ItemLocation)> {
    inventory.iter().find_map(|entry| {
        let object = entry.object()?;
        locate(object, item_id, objects, &mut Vec::new()).map(|location| (entry, location))
    })
}

/// Finds the container holding `item_id` below any of `roots`.
///
/// The roots themselves are not matched, only what they hold.
pub fn find_item_in_objects<'a, I>(
    roots: I,
    item_id: &str,
    objects: &ResolvedObjects,
) -> Option<ItemLocation>
where
    I: IntoIterator<Item = &'a ObjectDefinition>,
{
    roots
        .into_iter()
        .find_map(|root| locate(root, item_id, objects, &mut Vec::new()))
}

/// Depth-first: general storage (recursing into nested containers) first,
/// then occupied slots, then inside slotted containers.
fn locate<'a>(
    container: &'a ObjectDefinition,
    item_id: &str,
    objects: &'a ResolvedObjects,
    seen: &mut Vec<&'a ObjectId>,
) -> Option<ItemLocation> {
    if seen.contains(&&container.id) {
        return None;
    }
    seen.push(&container.id);

    for child in &container.contains {
        if child.id == item_id {
            return Some(ItemLocation::in_storage(container.id.clone()));
        }
        if let Some(found) = locate(child, item_id, objects, seen) {
            return Some(found);
        }
    }

    if let Some(slot) = container
        .slots
        .iter()
        .find(|slot| slot.item_id.as_ref().is_some_and(|id| id == item_id))
    {
        return Some(ItemLocation::in_slot(container.id.clone(), slot.id.clone()));
    }

    slot_occupants(container, objects).find_map(|occupant| locate(occupant, item_id, objects, seen))
}

/// Finds an object among `roots`, anywhere in their general storage, or in a
/// slot along the way.
pub fn find_object<'a, I>(
    roots: I,
    id: &str,
    objects: &'a ResolvedObjects,
) -> Option<&'a ObjectDefinition>
where
    I: IntoIterator<Item = &'a ObjectDefinition>,
{
    roots
        .into_iter()
        .find_map(|root| find_in(root, id, objects, &mut Vec::new()))
}

fn find_in<'a>(
    object: &'a ObjectDefinition,
    id: &str,
    objects: &'a ResolvedObjects,
    seen: &mut Vec<&'a ObjectId>,
) -> Option<&'a ObjectDefinition> {
    if object.id == id {
        return Some(object);
    }
    if seen.contains(&&object.id) {
        return None;
    }
    seen.push(&object.id);

    object
        .contains
        .iter()
        .chain(slot_occupants(object, objects))
        .find_map(|child| find_in(child, id, objects, seen))
}

/// Whether `id` is `object` itself or sits anywhere below it, through
/// general storage or slots.
pub fn holds(object: &ObjectDefinition, id: &str, objects: &ResolvedObjects) -> bool {
    find_in(object, id, objects, &mut Vec::new()).is_some()
}

fn slot_occupants<'a>(
    container: &'a ObjectDefinition,
    objects: &'a ResolvedObjects,
) -> impl Iterator<Item = &'a ObjectDefinition> {
    container
        .slots
        .iter()
        .filter_map(|slot| slot.item_id.as_ref())
        .filter_map(|id| objects.get(id))
}

pub fn find_object_mut<'a, I>(roots: I, id: &str) -> Option<&'a mut ObjectDefinition>
where
    I: IntoIterator<Item = &'a mut ObjectDefinition>,
{
    roots.into_iter().find_map(|root| find_in_mut(root, id))
}

fn find_in_mut<'a>(object: &'a mut ObjectDefinition, id: &str) -> Option<&'a mut ObjectDefinition> {
    if object.id == id {
        return Some(object);
    }
    object
        .contains
        .iter_mut()
        .find_map(|child| find_in_mut(child, id))
}
