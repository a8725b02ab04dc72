//! Common error infrastructure for delve-core.
//!
//! Domain-specific errors (`MapError`, `ActionError`, `PathError`, `TurnError`)
//! live next to the code that raises them; this module provides the shared
//! classification they all implement.
//!
//! Nothing raised by the core should end the process. Recoverable errors turn
//! into a one-line message for the player, validation and internal errors
//! point at a caller bug and are logged by the runtime.

/// Severity level of an error, used for categorization and recovery strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Expected outcome; the game continues and the actor may retry.
    ///
    /// Examples: destination blocked, door locked, no path
    Recoverable,

    /// Invalid input from the caller.
    ///
    /// Examples: actor not found, door not at the given cell
    Validation,

    /// Unexpected state inconsistency that indicates a bug.
    ///
    /// Examples: occupancy desync, coordinate escaped bounds checking
    Internal,

    /// State cannot be used any further.
    Fatal,
}

impl ErrorSeverity {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common trait for all delve-core errors.
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    fn severity(&self) -> ErrorSeverity;

    /// Stable identifier for the error variant, used in logs and tests.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
