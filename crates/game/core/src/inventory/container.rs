use crate::object::{ObjectDefinition, ResolvedObjects, Slot};

/// Why an item cannot go where it was sent.
///
/// The display text is shown to the player as is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FitError {
    #[error("That slot is already occupied.")]
    SlotOccupied,

    #[error("That doesn't fit.")]
    TooHeavy,

    #[error("That doesn't fit.")]
    TooLarge,

    #[error("There's no room for that.")]
    NoRoom,
}

pub fn find_slot_in_container<'a>(
    container: &'a ObjectDefinition,
    slot_id: &str,
) -> Option<&'a Slot> {
    container.slots.iter().find(|slot| slot.id == slot_id)
}

/// Checks occupancy, the weight ceiling, then each dimension ceiling.
pub fn slot_fit(item: &ObjectDefinition, slot: &Slot) -> Result<(), FitError> {
    if !slot.is_empty() {
        return Err(FitError::SlotOccupied);
    }

    if slot
        .max_weight
        .is_some_and(|max_weight| item.weight > max_weight)
    {
        return Err(FitError::TooHeavy);
    }

    let exceeds = |limit: Option<f64>, size: Option<f64>| match (limit, size) {
        (Some(limit), Some(size)) => size > limit,
        _ => false,
    };
    if exceeds(slot.width, item.width)
        || exceeds(slot.height, item.height)
        || exceeds(slot.depth, item.depth)
    {
        return Err(FitError::TooLarge);
    }

    Ok(())
}

pub fn can_fit_in_slot(item: &ObjectDefinition, slot: &Slot) -> bool {
    slot_fit(item, slot).is_ok()
}

/// Checks a container's general-storage caps against an incoming item.
///
/// `max_items` counts stored entries, so a stack of coins takes one place;
/// `max_weight` bounds the weight of current contents plus the item.
pub fn storage_fit(
    item: &ObjectDefinition,
    container: &ObjectDefinition,
    objects: &ResolvedObjects,
) -> Result<(), FitError> {
    if let Some(max_items) = container.max_items {
        let stored = u32::try_from(container.contains.len()).unwrap_or(u32::MAX);
        if stored >= max_items {
            return Err(FitError::NoRoom);
        }
    }

    if let Some(max_weight) = container.max_weight {
        let stored: f64 = container
            .contains
            .iter()
            .map(|child| calculate_container_weight(child, objects))
            .sum();
        if stored + calculate_container_weight(item, objects) > max_weight {
            return Err(FitError::TooHeavy);
        }
    }

    Ok(())
}

pub fn can_fit_in_storage(
    item: &ObjectDefinition,
    container: &ObjectDefinition,
    objects: &ResolvedObjects,
) -> bool {
    storage_fit(item, container, objects).is_ok()
}

pub fn available_slots(container: &ObjectDefinition) -> Vec<&Slot> {
    container.slots.iter().filter(|slot| slot.is_empty()).collect()
}

pub fn slot_contents(container: &ObjectDefinition) -> Vec<&Slot> {
    container
        .slots
        .iter()
        .filter(|slot| !slot.is_empty())
        .collect()
}

/// Total weight of an object and everything it holds.
///
/// Slot occupants are looked up in `objects`; an id with no definition
/// weighs nothing. Containers must be acyclic, which content validation
/// guarantees.
pub fn calculate_container_weight(container: &ObjectDefinition, objects: &ResolvedObjects) -> f64 {
    let own = container.weight * f64::from(container.quantity);

    let stored: f64 = container
        .contains
        .iter()
        .map(|child| calculate_container_weight(child, objects))
        .sum();

    let slotted: f64 = container
        .slots
        .iter()
        .filter_map(|slot| slot.item_id.as_ref())
        .filter_map(|id| objects.get(id))
        .map(|item| calculate_container_weight(item, objects))
        .sum();

    own + stored + slotted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::ObjectId;

    fn ring(weight: f64) -> ObjectDefinition {
        ObjectDefinition::new("ring", "Ring").with_weight(weight)
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn slot_weight_ceiling() {
        let anvil = ObjectDefinition::new("anvil", "Anvil").with_weight(5.0);

        assert!(!can_fit_in_slot(&anvil, &Slot::new("s").with_max_weight(2.0)));
        assert_eq!(
            slot_fit(&anvil, &Slot::new("s").with_max_weight(2.0)),
            Err(FitError::TooHeavy)
        );
        assert!(can_fit_in_slot(&anvil, &Slot::new("s").with_max_weight(5.0)));
        assert!(can_fit_in_slot(&anvil, &Slot::new("s")));
    }

    #[test]
    fn occupied_slot_rejects_everything() {
        let occupied = Slot::new("s").holding("other");
        assert_eq!(slot_fit(&ring(0.0), &occupied), Err(FitError::SlotOccupied));
    }

    #[test]
    fn dimensions_compare_per_axis() {
        let slot = Slot::new("sheath").with_dimensions(1.0, 10.0, 1.0);
        let dagger = ObjectDefinition::new("dagger", "Dagger").with_dimensions(1.0, 8.0, 0.5);
        let sword = ObjectDefinition::new("sword", "Sword").with_dimensions(1.0, 12.0, 0.5);
        let undeclared = ObjectDefinition::new("rope", "Rope");

        assert!(can_fit_in_slot(&dagger, &slot));
        assert_eq!(slot_fit(&sword, &slot), Err(FitError::TooLarge));
        assert!(can_fit_in_slot(&undeclared, &slot));
    }

    #[test]
    fn slot_filters_return_empty_without_slots() {
        let plain = ObjectDefinition::new("rock", "Rock");
        assert!(available_slots(&plain).is_empty());
        assert!(slot_contents(&plain).is_empty());
        assert!(find_slot_in_container(&plain, "any").is_none());

        let belt = ObjectDefinition::new("belt", "Belt")
            .with_slot(Slot::new("left"))
            .with_slot(Slot::new("right").holding("pouch"));
        assert_eq!(available_slots(&belt)[0].id, "left");
        assert_eq!(slot_contents(&belt)[0].id, "right");
        assert!(find_slot_in_container(&belt, "right").is_some());
    }

    #[test]
    fn weight_aggregates_storage_and_slots() {
        let container = ObjectDefinition::new("box", "Box")
            .with_weight(1.0)
            .with_content(ObjectDefinition::new("apple", "Apple").with_weight(0.5))
            .with_slot(Slot::new("lid").holding("ring"));
        let objects: ResolvedObjects = [(ObjectId::new("ring"), ring(0.1))].into_iter().collect();

        assert_close(calculate_container_weight(&container, &objects), 1.6);
    }

    #[test]
    fn weight_recurses_and_counts_quantity() {
        let pouch = ObjectDefinition::new("pouch", "Pouch")
            .with_weight(0.2)
            .with_content(ObjectDefinition::new("coin", "Coin").with_weight(0.01).with_quantity(10));
        let bag = ObjectDefinition::new("bag", "Bag")
            .with_weight(1.0)
            .with_content(pouch)
            .with_slot(Slot::new("clip").holding("missing"));

        assert_close(calculate_container_weight(&bag, &ResolvedObjects::new()), 1.3);
    }

    #[test]
    fn storage_caps() {
        let objects = ResolvedObjects::new();
        let hand = ObjectDefinition::new("hand", "Hand").with_max_items(1);
        let stone = ObjectDefinition::new("stone", "Stone").with_weight(3.0);

        assert!(can_fit_in_storage(&stone, &hand, &objects));
        let full = hand.with_content(ObjectDefinition::new("cup", "Cup"));
        assert_eq!(storage_fit(&stone, &full, &objects), Err(FitError::NoRoom));

        let basket = ObjectDefinition::new("basket", "Basket")
            .with_max_weight(4.0)
            .with_content(ObjectDefinition::new("bread", "Bread").with_weight(1.5));
        assert_eq!(storage_fit(&stone, &basket, &objects), Err(FitError::TooHeavy));
        assert!(can_fit_in_storage(&ring(2.5), &basket, &objects));
    }

    #[test]
    fn a_stack_takes_one_place() {
        let objects = ResolvedObjects::new();
        let coins = ObjectDefinition::new("coins", "Coins").with_quantity(5);
        let hand = ObjectDefinition::new("hand", "Hand").with_max_items(1);

        assert!(can_fit_in_storage(&coins, &hand, &objects));

        let purse = ObjectDefinition::new("purse", "Purse")
            .with_max_items(2)
            .with_content(coins.clone());
        assert!(can_fit_in_storage(&coins, &purse, &objects));
        let purse = purse.with_content(ObjectDefinition::new("button", "Button"));
        assert_eq!(storage_fit(&coins, &purse, &objects), Err(FitError::NoRoom));
    }
}
