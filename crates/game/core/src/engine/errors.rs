//! Error types for the turn pipeline.

use crate::effect::EffectError;
use crate::error::{ErrorSeverity, GameError};
use crate::inventory::TransferError;
use crate::state::{CharacterId, SceneId};

/// Errors raised while applying a result's payload.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ApplyError {
    #[error(transparent)]
    Effect(#[from] EffectError),

    /// Scenes only take flags.
    #[error("scene {scene} cannot receive stats, traits, or effects")]
    UnsupportedTarget { scene: SceneId },

    #[error("unknown character: {id}")]
    UnknownCharacter { id: CharacterId },

    /// The destination refused the item. This is a game outcome; the engine
    /// turns it into a failed result.
    #[error(transparent)]
    Transfer(#[from] TransferError),
}

impl GameError for ApplyError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Effect(error) => error.severity(),
            Self::UnsupportedTarget { .. } | Self::UnknownCharacter { .. } => {
                ErrorSeverity::Content
            }
            Self::Transfer(error) => error.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Effect(error) => error.error_code(),
            Self::UnsupportedTarget { .. } => "APPLY_UNSUPPORTED_TARGET",
            Self::UnknownCharacter { .. } => "APPLY_UNKNOWN_CHARACTER",
            Self::Transfer(error) => error.error_code(),
        }
    }
}

/// Errors that abort a turn; the input state stays authoritative.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TurnError {
    #[error("no command registered for intent kind '{kind}'")]
    UnknownCommand { kind: String },

    #[error("acting character {id} does not exist")]
    UnknownActor { id: CharacterId },

    #[error("failed to apply result: {0}")]
    Apply(ApplyError),
}

impl GameError for TurnError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::UnknownCommand { .. } | Self::UnknownActor { .. } => ErrorSeverity::Content,
            Self::Apply(error) => error.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownCommand { .. } => "TURN_UNKNOWN_COMMAND",
            Self::UnknownActor { .. } => "TURN_UNKNOWN_ACTOR",
            Self::Apply(error) => error.error_code(),
        }
    }
}
