//! Turn resolution pipeline.
//!
//! [`GameEngine::execute`] runs one intent to completion:
//!
//! ```text
//! intent → command.resolve → apply_effects → tick actor effects
//!        → recompute stats → advance turn → record history
//! ```
//!
//! The input state is never modified. A failed result (including a transfer
//! refused at apply time) yields the input state unchanged; content errors
//! abort the turn with a [`TurnError`].
mod apply;
mod errors;
mod reducer;

pub use apply::apply_effects;
pub use errors::{ApplyError, TurnError};
pub use reducer::{CharacterReducer, WorldReducer};

use crate::action::{ActionResult, CommandContext, CommandRegistry, Intent};
use crate::config::GameConfig;
use crate::effect::EffectManager;
use crate::env::GameEnv;
use crate::state::{ActionRecord, CharacterId, GameState, StateDelta};
use crate::stats::StatCalculator;

/// Everything a resolved turn produced.
#[derive(Clone, Debug)]
pub struct TurnOutcome {
    pub state: GameState,
    pub result: ActionResult,
    /// Narrative rendered against `state`.
    pub narrative: String,
    pub delta: StateDelta,
}

impl TurnOutcome {
    #[inline]
    pub fn is_success(&self) -> bool {
        self.result.is_success()
    }
}

/// Owns the services a turn needs and sequences them.
#[derive(Clone, Debug)]
pub struct GameEngine {
    commands: CommandRegistry,
    effects: EffectManager,
    stats: StatCalculator,
    config: GameConfig,
}

impl GameEngine {
    pub fn new(commands: CommandRegistry, effects: EffectManager, config: GameConfig) -> Self {
        Self {
            commands,
            effects,
            stats: StatCalculator::new(),
            config,
        }
    }

    pub fn commands(&self) -> &CommandRegistry {
        &self.commands
    }

    pub fn effects(&self) -> &EffectManager {
        &self.effects
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn env(&self) -> GameEnv<'_> {
        GameEnv::new(&self.effects, &self.stats, &self.config)
    }

    /// Resolves one intent against `state`.
    pub fn execute(
        &self,
        state: &GameState,
        intent: &Intent,
        context: &CommandContext<'_>,
    ) -> Result<TurnOutcome, TurnError> {
        if state.character(intent.actor_id.as_str()).is_none() {
            return Err(TurnError::UnknownActor {
                id: intent.actor_id.clone(),
            });
        }
        let command = self
            .commands
            .get(&intent.kind)
            .ok_or_else(|| TurnError::UnknownCommand {
                kind: intent.kind.clone(),
            })?;

        let env = self.env();
        let result = command.resolve(state, intent, context, &env);
        if !result.is_success() {
            return Ok(unchanged(state, result));
        }

        let applied = match apply_effects(state, &intent.actor_id, &result, &env) {
            Ok(applied) => applied,
            Err(ApplyError::Transfer(refusal)) => {
                return Ok(unchanged(state, ActionResult::failure(refusal.to_string())));
            }
            Err(error) => return Err(TurnError::Apply(error)),
        };

        let mut next = self.complete_turn(&applied, &intent.actor_id);
        let narrative = result.narrative.render(&next);
        self.record(&mut next, state.world.turn, intent, &result, &narrative);

        let delta = StateDelta::from_states(state, &next);
        Ok(TurnOutcome {
            state: next,
            result,
            narrative,
            delta,
        })
    }

    /// Turn boundary bookkeeping for `actor`.
    ///
    /// Ticks the actor's effects, recomputes their stats, advances the turn
    /// counter, and marks the current scene visited.
    pub fn complete_turn(&self, state: &GameState, actor: &CharacterId) -> GameState {
        let mut next = state.clone();

        if let Some(character) = state.character(actor.as_str()) {
            let ticked = self.effects.tick_effects(character);
            let refreshed = self
                .stats
                .update_character_stats(&ticked, &next.resolved_objects());
            next.characters.insert(actor.clone(), refreshed);
        }

        let mut world = reducer::WorldReducer::new(&mut next.world);
        world.advance_turn();
        world.visit(&state.current_scene_id);

        next
    }

    fn record(
        &self,
        state: &mut GameState,
        turn: u64,
        intent: &Intent,
        result: &ActionResult,
        narrative: &str,
    ) {
        state.action_history.push(ActionRecord {
            turn,
            actor_id: intent.actor_id.clone(),
            kind: intent.kind.clone(),
            scene_id: intent.scene_id.clone(),
            target_id: intent.target_id.clone(),
            outcome: result.outcome,
            narrative: narrative.to_owned(),
            timestamp: intent.timestamp,
        });

        let excess = state
            .action_history
            .len()
            .saturating_sub(self.config.history_limit);
        state.action_history.drain(..excess);
    }
}

impl Default for GameEngine {
    fn default() -> Self {
        Self::new(
            CommandRegistry::with_builtins(),
            EffectManager::default(),
            GameConfig::default(),
        )
    }
}

fn unchanged(state: &GameState, result: ActionResult) -> TurnOutcome {
    TurnOutcome {
        narrative: result.narrative.render(state),
        state: state.clone(),
        result,
        delta: StateDelta::unchanged(state),
    }
}
