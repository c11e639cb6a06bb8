use crate::error::{ErrorSeverity, GameError};
use crate::state::EffectId;

/// Errors raised by the effect manager.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EffectError {
    /// Neither the built-in nor the game registry defines this id.
    #[error("unknown effect id: {id}")]
    UnknownEffect { id: EffectId },
}

impl GameError for EffectError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::UnknownEffect { .. } => ErrorSeverity::Content,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownEffect { .. } => "EFFECT_UNKNOWN_ID",
        }
    }
}
