//! Intents, commands, and the results they resolve to.
//!
//! A player [`Intent`] is routed by its `kind` to a [`Command`], which reads
//! the current state and returns an [`ActionResult`]. Results are
//! declarative: the engine applies their [`EffectPayload`] afterwards, so a
//! command never mutates state.
mod command;
pub mod kinds;
mod payload;

use std::fmt;
use std::sync::Arc;

pub use command::{Command, CommandContext, CommandRegistry};
pub use kinds::{ChangeStateCommand, TransferCommand};
pub use payload::{EffectPayload, ObjectStateChange, Target, TransferItem};

use crate::state::{CharacterId, GameState, ObjectId, SceneId, SlotId, StateId};

/// What the player asked for.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Intent {
    pub actor_id: CharacterId,
    /// Routing key into the [`CommandRegistry`].
    pub kind: String,
    pub scene_id: SceneId,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub target_id: Option<ObjectId>,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub item_id: Option<ObjectId>,
    /// Free-text verb as typed by the player.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub verb: Option<String>,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub state_id: Option<StateId>,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub slot_id: Option<SlotId>,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub timestamp: Option<u64>,
}

impl Intent {
    pub fn new(
        actor_id: impl Into<CharacterId>,
        kind: impl Into<String>,
        scene_id: impl Into<SceneId>,
    ) -> Self {
        Self {
            actor_id: actor_id.into(),
            kind: kind.into(),
            scene_id: scene_id.into(),
            target_id: None,
            item_id: None,
            verb: None,
            state_id: None,
            slot_id: None,
            timestamp: None,
        }
    }

    #[must_use]
    pub fn with_target(mut self, target: impl Into<ObjectId>) -> Self {
        self.target_id = Some(target.into());
        self
    }

    #[must_use]
    pub fn with_item(mut self, item: impl Into<ObjectId>) -> Self {
        self.item_id = Some(item.into());
        self
    }

    #[must_use]
    pub fn with_verb(mut self, verb: impl Into<String>) -> Self {
        self.verb = Some(verb.into());
        self
    }

    #[must_use]
    pub fn with_state(mut self, state: impl Into<StateId>) -> Self {
        self.state_id = Some(state.into());
        self
    }

    #[must_use]
    pub fn with_slot(mut self, slot: impl Into<SlotId>) -> Self {
        self.slot_id = Some(slot.into());
        self
    }

    #[must_use]
    pub fn with_timestamp(mut self, timestamp: u64) -> Self {
        self.timestamp = Some(timestamp);
        self
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Outcome {
    Success,
    Failure,
}

impl Outcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Success => "success",
            Outcome::Failure => "failure",
        }
    }
}

type NarrativeFn = dyn Fn(&GameState) -> String + Send + Sync;

/// Text shown to the player for a resolved intent.
///
/// A resolver is evaluated against the state produced by the turn, so it can
/// describe what actually happened.
#[derive(Clone)]
pub enum Narrative {
    Text(String),
    Resolver(Arc<NarrativeFn>),
}

impl Narrative {
    pub fn resolver<F>(resolver: F) -> Self
    where
        F: Fn(&GameState) -> String + Send + Sync + 'static,
    {
        Self::Resolver(Arc::new(resolver))
    }

    pub fn render(&self, state: &GameState) -> String {
        match self {
            Narrative::Text(text) => text.clone(),
            Narrative::Resolver(resolver) => resolver(state),
        }
    }
}

impl fmt::Debug for Narrative {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Narrative::Text(text) => f.debug_tuple("Text").field(text).finish(),
            Narrative::Resolver(_) => f.write_str("Resolver(..)"),
        }
    }
}

impl From<&str> for Narrative {
    fn from(text: &str) -> Self {
        Self::Text(text.to_owned())
    }
}

impl From<String> for Narrative {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

/// Declarative outcome of resolving one intent.
#[derive(Clone, Debug)]
pub struct ActionResult {
    pub outcome: Outcome,
    pub narrative: Narrative,
    /// Applied only when `outcome` is [`Outcome::Success`].
    pub effects: Option<EffectPayload>,
}

impl ActionResult {
    pub fn success(narrative: impl Into<Narrative>) -> Self {
        Self {
            outcome: Outcome::Success,
            narrative: narrative.into(),
            effects: None,
        }
    }

    pub fn failure(narrative: impl Into<Narrative>) -> Self {
        Self {
            outcome: Outcome::Failure,
            narrative: narrative.into(),
            effects: None,
        }
    }

    #[must_use]
    pub fn with_effects(mut self, effects: EffectPayload) -> Self {
        self.effects = Some(effects);
        self
    }

    #[inline]
    pub fn is_success(&self) -> bool {
        self.outcome == Outcome::Success
    }
}
