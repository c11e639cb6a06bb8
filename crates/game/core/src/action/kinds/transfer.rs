use super::{NOT_FOUND, NOT_HELD};
use crate::action::{ActionResult, Command, CommandContext, EffectPayload, Intent, TransferItem};
use crate::env::GameEnv;
use crate::inventory::{find_item_in_inventory, find_item_in_objects, transfer};
use crate::state::{CharacterState, GameState};

/// Moves `intent.item_id` into `intent.target_id`.
///
/// The destination is a container id, the current scene id (drop), or the
/// actor's id (top-level inventory, also the default). `intent.slot_id`
/// selects a named slot. The move is tried on a scratch copy so refusals are
/// reported before anything is applied. Intents issued for any scene other
/// than the current one find nothing.
#[derive(Clone, Copy, Debug, Default)]
pub struct TransferCommand;

impl TransferCommand {
    pub const KIND: &'static str = "transfer";
}

impl Command for TransferCommand {
    fn kind(&self) -> &str {
        Self::KIND
    }

    fn resolve(
        &self,
        state: &GameState,
        intent: &Intent,
        context: &CommandContext<'_>,
        _env: &GameEnv<'_>,
    ) -> ActionResult {
        if intent.scene_id != state.current_scene_id {
            return ActionResult::failure(NOT_FOUND);
        }
        let Some(actor) = state.character(intent.actor_id.as_str()) else {
            return ActionResult::failure(NOT_FOUND);
        };
        let Some(item_id) = &intent.item_id else {
            return ActionResult::failure(NOT_HELD);
        };
        let Some(source) = source_of(state, actor, context, item_id.as_str()) else {
            return ActionResult::failure(NOT_FOUND);
        };

        let destination = intent
            .target_id
            .as_ref()
            .map_or_else(|| actor.id.to_string(), ToString::to_string);
        let mut request = TransferItem::new(item_id.clone(), source, destination);
        request.slot_id = intent.slot_id.clone();

        match transfer(state, &actor.id, &request) {
            Ok(_) => {
                let name = context
                    .find_object(actor, item_id.as_str())
                    .map_or_else(|| item_id.to_string(), |item| item.name.clone());
                ActionResult::success(format!("You move the {name}."))
                    .with_effects(EffectPayload::new().with_transfer(request))
            }
            Err(refusal) => ActionResult::failure(refusal.to_string()),
        }
    }
}

/// Holder id the item currently sits in, searching what the actor carries
/// before the scene.
fn source_of(
    state: &GameState,
    actor: &CharacterState,
    context: &CommandContext<'_>,
    item_id: &str,
) -> Option<String> {
    if actor.inventory_entry(item_id).is_some() {
        return Some(actor.id.to_string());
    }
    if let Some(location) = find_item_in_inventory(&actor.inventory, item_id, context.objects) {
        return Some(location.container_id.to_string());
    }
    if context.scene_objects.iter().any(|object| object.id == item_id) {
        return Some(state.current_scene_id.to_string());
    }
    find_item_in_objects(context.scene_objects, item_id, context.objects)
        .map(|location| location.container_id.to_string())
}
