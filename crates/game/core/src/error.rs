//! Common error infrastructure for game-core.
//!
//! Domain-specific errors (e.g. [`crate::entity::EquipError`],
//! [`crate::combat::CombatError`]) are defined in their respective modules
//! alongside the operations they validate. This module provides the shared
//! classification used by callers to decide how to react.
//!
//! # Design Principles
//!
//! - **Type Safety**: Each operation has its own error type with specific variants
//! - **Severity Classification**: Errors are categorized for recovery strategies
//! - **Atomic Rejection**: A rejected operation leaves all game state untouched

/// Severity level of an error, used for categorization and recovery strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Recoverable error - the player can retry with a different action.
    ///
    /// Examples: flee from a finished encounter, inventory full
    Recoverable,

    /// Validation error - invalid input, should not retry without changes.
    ///
    /// Examples: equipping a consumable, using an item that is not owned
    Validation,

    /// Fatal error - the operation cannot be completed at all.
    ///
    /// Examples: corrupt save data. Fatal errors abort the operation,
    /// never the session.
    Fatal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }
}

/// Common interface implemented by all game-core error types.
pub trait GameError: core::fmt::Debug {
    /// Severity classification for this error.
    fn severity(&self) -> ErrorSeverity;

    /// Stable machine-readable code, independent of the display message.
    fn error_code(&self) -> &'static str;
}
