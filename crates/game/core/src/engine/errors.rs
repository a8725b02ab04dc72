//! Error types for the action execution pipeline.

use crate::action::{ActionError, ActionKind};
use crate::error::{ErrorSeverity, GameError};
use crate::state::EntityId;

/// Identifies which stage of the transition pipeline produced an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TransitionPhase {
    PreValidate,
    Apply,
    PostValidate,
}

impl TransitionPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransitionPhase::PreValidate => "pre_validate",
            TransitionPhase::Apply => "apply",
            TransitionPhase::PostValidate => "post_validate",
        }
    }
}

/// Associates a transition phase with the underlying error.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TransitionPhaseError<E> {
    pub phase: TransitionPhase,
    pub error: E,
}

impl<E> TransitionPhaseError<E> {
    pub fn new(phase: TransitionPhase, error: E) -> Self {
        Self { phase, error }
    }
}

impl<E: std::fmt::Display> std::fmt::Display for TransitionPhaseError<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} failed: {}", self.phase.as_str(), self.error)
    }
}

impl<E: std::fmt::Display + std::fmt::Debug> std::error::Error for TransitionPhaseError<E> {}

/// A refused action together with the phase that refused it.
pub type ActionFailure = TransitionPhaseError<ActionError>;

/// Errors surfaced while executing an action through the game engine.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ExecuteError {
    #[error("{kind} action failed: {failure}")]
    Action {
        kind: ActionKind,
        failure: ActionFailure,
    },

    #[error("invalid actor: action actor {actor} does not match current turn actor {current:?}")]
    ActorNotCurrent {
        actor: EntityId,
        current: Option<EntityId>,
    },
}

impl ExecuteError {
    /// One-line text suitable for the player's message log.
    pub fn player_message(&self) -> String {
        match self {
            Self::Action { failure, .. } => failure.error.to_string(),
            Self::ActorNotCurrent { .. } => self.to_string(),
        }
    }

    /// The underlying action error, if the pipeline produced one.
    pub fn action_error(&self) -> Option<&ActionError> {
        match self {
            Self::Action { failure, .. } => Some(&failure.error),
            Self::ActorNotCurrent { .. } => None,
        }
    }
}

impl GameError for ExecuteError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Action { failure, .. } => failure.error.severity(),
            Self::ActorNotCurrent { .. } => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Action { failure, .. } => failure.error.error_code(),
            Self::ActorNotCurrent { .. } => "EXECUTE_ACTOR_NOT_CURRENT",
        }
    }
}
