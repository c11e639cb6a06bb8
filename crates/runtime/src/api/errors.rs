//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from worker coordination, repositories, content, and the
//! engine so clients can bubble them up with consistent context.
use thiserror::Error;
use tokio::sync::oneshot;

use tale_content::ContentError;
use tale_core::{CharacterId, ErrorSeverity, GameError, TurnError};

pub use crate::repository::RepositoryError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("intent provider not set")]
    ProviderNotSet,

    #[error("simulation worker command channel closed")]
    CommandChannelClosed,

    #[error("simulation worker reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),

    #[error("simulation worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error("no state repository configured")]
    NoRepository,

    #[error("no saved state for turn {turn}")]
    SnapshotNotFound { turn: u64 },

    #[error("runtime requires content or an initial state before building")]
    MissingWorld,

    #[error(transparent)]
    Content(#[from] ContentError),

    #[error(transparent)]
    Turn(#[from] TurnError),

    #[error("intent actor {provided} does not match requested actor {expected}")]
    InvalidIntentActor {
        expected: CharacterId,
        provided: CharacterId,
    },
}

impl GameError for RuntimeError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Turn(error) => error.severity(),
            Self::Content(_) => ErrorSeverity::Content,
            Self::InvalidIntentActor { .. } | Self::SnapshotNotFound { .. } => {
                ErrorSeverity::Recoverable
            }
            _ => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::ProviderNotSet => "RUNTIME_PROVIDER_NOT_SET",
            Self::CommandChannelClosed => "RUNTIME_COMMAND_CHANNEL_CLOSED",
            Self::ReplyChannelClosed(_) => "RUNTIME_REPLY_CHANNEL_CLOSED",
            Self::WorkerJoin(_) => "RUNTIME_WORKER_JOIN",
            Self::Repository(_) => "RUNTIME_REPOSITORY",
            Self::NoRepository => "RUNTIME_NO_REPOSITORY",
            Self::SnapshotNotFound { .. } => "RUNTIME_SNAPSHOT_NOT_FOUND",
            Self::MissingWorld => "RUNTIME_MISSING_WORLD",
            Self::Content(_) => "RUNTIME_CONTENT",
            Self::Turn(error) => error.error_code(),
            Self::InvalidIntentActor { .. } => "RUNTIME_INVALID_INTENT_ACTOR",
        }
    }
}
