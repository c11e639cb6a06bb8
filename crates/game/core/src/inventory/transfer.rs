//! Moving items between scenes, inventories, containers, and slots.

use super::container::{FitError, slot_fit, storage_fit};
use super::search::{find_object_mut, holds};
use super::InventoryEntry;
use crate::action::TransferItem;
use crate::error::{ErrorSeverity, GameError};
use crate::object::ObjectDefinition;
use crate::state::{CharacterId, GameState, ObjectId};

/// Reasons a transfer is refused.
///
/// All of them are ordinary game outcomes; the display text is shown to the
/// player.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TransferError {
    #[error("You don't have that.")]
    ItemNotFound { item_id: ObjectId },

    #[error("You can't find that here.")]
    ContainerNotFound { container_id: String },

    #[error("That can't hold anything.")]
    NotAContainer { container_id: ObjectId },

    #[error("There's nowhere to put that.")]
    SlotNotFound { container_id: String, slot_id: String },

    #[error("You can't put something inside itself.")]
    IntoItself { item_id: ObjectId },

    #[error("That won't budge.")]
    Fixed { item_id: ObjectId },

    #[error(transparent)]
    Fit(#[from] FitError),
}

impl GameError for TransferError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Recoverable
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::ItemNotFound { .. } => "TRANSFER_ITEM_NOT_FOUND",
            Self::ContainerNotFound { .. } => "TRANSFER_CONTAINER_NOT_FOUND",
            Self::NotAContainer { .. } => "TRANSFER_NOT_A_CONTAINER",
            Self::SlotNotFound { .. } => "TRANSFER_SLOT_NOT_FOUND",
            Self::IntoItself { .. } => "TRANSFER_INTO_ITSELF",
            Self::Fixed { .. } => "TRANSFER_FIXED_ITEM",
            Self::Fit(FitError::SlotOccupied) => "TRANSFER_SLOT_OCCUPIED",
            Self::Fit(FitError::TooHeavy) => "TRANSFER_TOO_HEAVY",
            Self::Fit(FitError::TooLarge) => "TRANSFER_TOO_LARGE",
            Self::Fit(FitError::NoRoom) => "TRANSFER_NO_ROOM",
        }
    }
}

/// What a holder id in a [`TransferItem`] refers to.
enum Holder<'a> {
    /// Loose in the current scene.
    Scene,
    /// The actor's top-level inventory.
    Inventory,
    Container(&'a str),
}

impl<'a> Holder<'a> {
    fn resolve(state: &GameState, actor: &CharacterId, id: &'a str) -> Self {
        if state.current_scene_id == id {
            Self::Scene
        } else if actor == id {
            Self::Inventory
        } else {
            Self::Container(id)
        }
    }
}

/// Moves one item for `actor`, returning the resulting state.
///
/// Fit and capacity are checked against the destination after the item has
/// left its source, so rearranging inside one container behaves. The input
/// state is never modified; on error nothing has happened.
pub fn transfer(
    state: &GameState,
    actor: &CharacterId,
    request: &TransferItem,
) -> Result<GameState, TransferError> {
    let mut next = state.clone();

    let source = Holder::resolve(state, actor, &request.from_container_id);
    let item = take(&mut next, actor, source, &request.item_id)?;
    if !item.removable {
        return Err(TransferError::Fixed { item_id: item.id });
    }

    let destination = Holder::resolve(state, actor, &request.to_container_id);
    if let Holder::Container(container_id) = destination
        && holds(&item, container_id, &next.objects)
    {
        return Err(TransferError::IntoItself { item_id: item.id });
    }

    put(&mut next, actor, destination, request, item)?;
    Ok(next)
}

fn take(
    state: &mut GameState,
    actor: &CharacterId,
    source: Holder<'_>,
    item_id: &ObjectId,
) -> Result<ObjectDefinition, TransferError> {
    let not_found = || TransferError::ItemNotFound {
        item_id: item_id.clone(),
    };

    match source {
        Holder::Scene => {
            let scene = state
                .scene_objects
                .get_mut(state.current_scene_id.as_str())
                .ok_or_else(not_found)?;
            let index = scene
                .iter()
                .position(|object| object.id == *item_id)
                .ok_or_else(not_found)?;
            Ok(scene.remove(index))
        }
        Holder::Inventory => {
            let character = state.characters.get_mut(actor).ok_or_else(not_found)?;
            let index = character
                .inventory
                .iter()
                .position(|entry| entry.id == *item_id)
                .ok_or_else(not_found)?;
            let entry = character.inventory.remove(index);
            Ok(match entry.object_data {
                Some(object) => object,
                None => materialize(state, item_id).with_quantity(entry.quantity),
            })
        }
        Holder::Container(container_id) => {
            let container = container_mut(state, actor, container_id).ok_or_else(|| {
                TransferError::ContainerNotFound {
                    container_id: container_id.to_owned(),
                }
            })?;

            if let Some(slot) = container
                .slots
                .iter_mut()
                .find(|slot| slot.item_id.as_ref() == Some(item_id))
            {
                slot.item_id = None;
                return Ok(materialize(state, item_id));
            }

            let index = container
                .contains
                .iter()
                .position(|object| object.id == *item_id)
                .ok_or_else(not_found)?;
            Ok(container.contains.remove(index))
        }
    }
}

fn put(
    state: &mut GameState,
    actor: &CharacterId,
    destination: Holder<'_>,
    request: &TransferItem,
    item: ObjectDefinition,
) -> Result<(), TransferError> {
    let no_slot = |container_id: &str, slot_id: &str| TransferError::SlotNotFound {
        container_id: container_id.to_owned(),
        slot_id: slot_id.to_owned(),
    };

    match destination {
        Holder::Scene => {
            if let Some(slot_id) = &request.slot_id {
                return Err(no_slot(state.current_scene_id.as_str(), slot_id.as_str()));
            }
            state
                .scene_objects
                .entry(state.current_scene_id.clone())
                .or_default()
                .push(item);
        }
        Holder::Inventory => {
            if let Some(slot_id) = &request.slot_id {
                return Err(no_slot(actor.as_str(), slot_id.as_str()));
            }
            let character = state.characters.get_mut(actor).ok_or_else(|| {
                TransferError::ContainerNotFound {
                    container_id: actor.to_string(),
                }
            })?;
            character.inventory.push(InventoryEntry::from_object(item));
        }
        Holder::Container(container_id) => {
            let objects = state.resolved_objects();
            let container = container_mut(state, actor, container_id).ok_or_else(|| {
                TransferError::ContainerNotFound {
                    container_id: container_id.to_owned(),
                }
            })?;
            if !container.is_container() {
                return Err(TransferError::NotAContainer {
                    container_id: container.id.clone(),
                });
            }

            match &request.slot_id {
                Some(slot_id) => {
                    let slot = container
                        .slots
                        .iter_mut()
                        .find(|slot| slot.id == *slot_id)
                        .ok_or_else(|| no_slot(container_id, slot_id.as_str()))?;
                    slot_fit(&item, slot)?;
                    slot.item_id = Some(item.id.clone());
                    state.objects.insert(item.id.clone(), item);
                }
                None => {
                    storage_fit(&item, container, &objects)?;
                    container.contains.push(item);
                }
            }
        }
    }

    Ok(())
}

/// Finds a container the actor can reach: carried, loose in the current
/// scene, or sitting in a slot.
fn container_mut<'a>(
    state: &'a mut GameState,
    actor: &CharacterId,
    id: &str,
) -> Option<&'a mut ObjectDefinition> {
    let GameState {
        characters,
        scene_objects,
        current_scene_id,
        objects,
        ..
    } = state;

    let carried = characters
        .get_mut(actor)
        .into_iter()
        .flat_map(|character| character.inventory.iter_mut())
        .filter_map(|entry| entry.object_data.as_mut());
    let loose = scene_objects
        .get_mut(current_scene_id.as_str())
        .into_iter()
        .flatten();

    find_object_mut(carried.chain(loose).chain(objects.values_mut()), id)
}

/// Takes a slotted item's definition out of the registry.
///
/// An id with no registered definition becomes a bare object named after it.
fn materialize(state: &mut GameState, item_id: &ObjectId) -> ObjectDefinition {
    state
        .objects
        .remove(item_id)
        .unwrap_or_else(|| ObjectDefinition::new(item_id.clone(), item_id.as_str()))
}
