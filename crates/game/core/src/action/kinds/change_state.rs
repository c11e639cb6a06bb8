use super::{NO_MATCHING_STATE, NOT_FOUND};
use crate::action::{ActionResult, Command, CommandContext, Intent};
use crate::env::GameEnv;
use crate::object::transition_payload;
use crate::state::GameState;

/// Moves an object through its declared state machine.
///
/// The target state comes from `intent.state_id` when given, otherwise from
/// matching `intent.verb` against each state's action names.
#[derive(Clone, Copy, Debug, Default)]
pub struct ChangeStateCommand;

impl ChangeStateCommand {
    pub const KIND: &'static str = "change_state";
}

impl Command for ChangeStateCommand {
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
        let Some(actor) = state.character(intent.actor_id.as_str()) else {
            return ActionResult::failure(NOT_FOUND);
        };
        let Some(object) = intent
            .target_id
            .as_ref()
            .and_then(|target| context.find_object(actor, target.as_str()))
        else {
            return ActionResult::failure(NOT_FOUND);
        };

        let next = match (&intent.state_id, &intent.verb) {
            (Some(state_id), _) => object.state(state_id.as_str()),
            (None, Some(verb)) => object.state_for_verb(verb),
            (None, None) => None,
        };
        let Some(next) = next else {
            return ActionResult::failure(NO_MATCHING_STATE);
        };

        let current = state
            .object_state(object.id.as_str())
            .and_then(|current| object.state(current.as_str()));

        if current.is_some_and(|current| current.id == next.id) {
            return ActionResult::success(format!("It is already {}.", next.id));
        }

        let payload = transition_payload(current, next)
            .with_object_state(object.id.clone(), Some(next.id.clone()));
        let narrative = next
            .description
            .clone()
            .unwrap_or_else(|| format!("The {} is now {}.", object.name, next.id));

        ActionResult::success(narrative).with_effects(payload)
    }
}
