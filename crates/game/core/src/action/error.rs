//! Action execution errors.
//!
//! Every variant is an expected, per-action outcome. The scheduler turns
//! them into a player message and lets the actor retry at no time cost.

use crate::error::{ErrorSeverity, GameError};
use crate::state::{EntityId, Position};

/// Reasons an action can refuse to run. Raising one leaves the state
/// untouched.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionError {
    #[error("Actor {0} not found")]
    ActorNotFound(EntityId),

    #[error("Door {0} not found")]
    DoorNotFound(EntityId),

    #[error("Door {door} is not at {position}")]
    DoorNotAt { door: EntityId, position: Position },

    /// `by` names the terrain, or the first impassable occupant when the
    /// terrain itself is passable.
    #[error("Cannot advance into {destination}: blocked by {by}")]
    Blocked { destination: Position, by: String },

    #[error("{target} is not adjacent to {from}")]
    NotAdjacent { from: Position, target: Position },

    #[error("The door is locked")]
    DoorLocked,

    #[error("The door is already open")]
    DoorAlreadyOpen,

    #[error("The door is already closed")]
    DoorAlreadyClosed,

    #[error("Occupancy desync for actor {actor} at {position}")]
    OccupancyDesync { actor: EntityId, position: Position },
}

impl GameError for ActionError {
    fn severity(&self) -> ErrorSeverity {
        use ActionError::*;
        match self {
            ActorNotFound(_) | DoorNotFound(_) | DoorNotAt { .. } => ErrorSeverity::Validation,
            Blocked { .. } | NotAdjacent { .. } => ErrorSeverity::Recoverable,
            DoorLocked | DoorAlreadyOpen | DoorAlreadyClosed => ErrorSeverity::Recoverable,
            OccupancyDesync { .. } => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        use ActionError::*;
        match self {
            ActorNotFound(_) => "ACTION_ACTOR_NOT_FOUND",
            DoorNotFound(_) => "ACTION_DOOR_NOT_FOUND",
            DoorNotAt { .. } => "ACTION_DOOR_NOT_AT",
            Blocked { .. } => "ACTION_BLOCKED",
            NotAdjacent { .. } => "ACTION_NOT_ADJACENT",
            DoorLocked => "ACTION_DOOR_LOCKED",
            DoorAlreadyOpen => "ACTION_DOOR_ALREADY_OPEN",
            DoorAlreadyClosed => "ACTION_DOOR_ALREADY_CLOSED",
            OccupancyDesync { .. } => "ACTION_OCCUPANCY_DESYNC",
        }
    }
}
