//! Common error infrastructure for tale-core.
//!
//! This module provides shared types and traits used across all error types in tale-core.
//! Domain-specific errors (e.g., `EffectError`, `ApplyError`) are defined in their
//! respective modules alongside the operations that raise them.
//!
//! # Design Principles
//!
//! - **Content errors are errors**: unknown effect ids, unknown commands and
//!   malformed payloads are authoring bugs and surface as `Err`
//! - **Game outcomes are values**: a missing object or a full slot is an
//!   [`ActionResult`](crate::action::ActionResult) with a failure outcome, never an `Err`
//! - **Severity Classification**: errors are categorized for logging and recovery

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Recoverable**: The player can retry with a different intent
/// - **Content**: Authoring or data bug; the turn is aborted and logged
/// - **Internal**: Unexpected state inconsistency that requires investigation
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Recoverable error - can retry with same or alternative intent.
    ///
    /// Examples: destination slot occupied, item too heavy
    Recoverable,

    /// Content error - data references something that does not exist.
    ///
    /// Examples: unknown effect id, unknown command kind
    Content,

    /// Internal error - unexpected state inconsistency.
    ///
    /// Examples: acting character missing from a state that validated earlier
    Internal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Content => "content",
            Self::Internal => "internal",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if the turn that produced this error must be aborted.
    pub const fn aborts_turn(&self) -> bool {
        matches!(self, Self::Content | Self::Internal)
    }
}

/// Common trait for all tale-core errors.
///
/// # Implementation Guidelines
///
/// - All error enums should implement this trait
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// This is useful for error categorization, log filtering, and testing.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
