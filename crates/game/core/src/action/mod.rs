//! Action domain: atomic, time-costed world mutations.
//!
//! Every change to the world passes through one [`Action`] variant. An action
//! is bound to a single actor, runs through the three-phase transition
//! pipeline (see [`crate::engine`]) and either fully succeeds, returning its
//! duration, or fails with an [`ActionError`] and leaves the state untouched.
//!
//! # Module Structure
//!
//! - `error`: [`ActionError`]
//! - `turn`: rotate one step
//! - `movement`: advance one cell in the facing direction
//! - `door`: open and close adjacent doors

mod door;
mod error;
mod movement;
mod turn;

pub use door::{CloseDoorAction, OpenDoorAction};
pub use error::ActionError;
pub use movement::AdvanceAction;
pub use turn::TurnAction;

use crate::config::GameConfig;
use crate::state::{EntityId, GameState, Position, Tick};

/// Defines how a concrete action variant mutates game state.
///
/// `pre_validate` must reject everything `apply` could fail on, so that a
/// failing action never leaves a partial change behind. `post_validate`
/// checks invariants after the mutation and only fails on a bug.
pub trait ActionTransition {
    type Error;

    /// Returns the entity performing this action.
    fn actor(&self) -> EntityId;

    /// Time cost of a successful run.
    fn cost(&self, config: &GameConfig) -> Tick;

    /// Validates pre-conditions using the state **before** mutation.
    fn pre_validate(&self, _state: &GameState, _config: &GameConfig) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Applies the action and returns its duration.
    fn apply(&self, state: &mut GameState, config: &GameConfig) -> Result<Tick, Self::Error>;

    /// Validates post-conditions using the state **after** mutation.
    fn post_validate(&self, _state: &GameState, _config: &GameConfig) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Discriminant of [`Action`], used for logging and text commands.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ActionKind {
    Turn,
    Advance,
    OpenDoor,
    CloseDoor,
}

/// One-shot request bound to a specific actor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Action {
    Turn(TurnAction),
    Advance(AdvanceAction),
    OpenDoor(OpenDoorAction),
    CloseDoor(CloseDoorAction),
}

impl Action {
    pub fn turn(actor: EntityId, clockwise: bool) -> Self {
        Self::Turn(TurnAction::new(actor, clockwise))
    }

    pub fn advance(actor: EntityId) -> Self {
        Self::Advance(AdvanceAction::new(actor))
    }

    pub fn open_door(actor: EntityId, door: EntityId, at: Position) -> Self {
        Self::OpenDoor(OpenDoorAction::new(actor, door, at))
    }

    pub fn close_door(actor: EntityId, door: EntityId, at: Position) -> Self {
        Self::CloseDoor(CloseDoorAction::new(actor, door, at))
    }

    /// Returns the entity ID performing this action.
    pub fn actor(&self) -> EntityId {
        match self {
            Action::Turn(action) => action.actor(),
            Action::Advance(action) => action.actor(),
            Action::OpenDoor(action) => action.actor(),
            Action::CloseDoor(action) => action.actor(),
        }
    }

    pub fn kind(&self) -> ActionKind {
        match self {
            Action::Turn(_) => ActionKind::Turn,
            Action::Advance(_) => ActionKind::Advance,
            Action::OpenDoor(_) => ActionKind::OpenDoor,
            Action::CloseDoor(_) => ActionKind::CloseDoor,
        }
    }
}

impl From<TurnAction> for Action {
    fn from(action: TurnAction) -> Self {
        Self::Turn(action)
    }
}

impl From<AdvanceAction> for Action {
    fn from(action: AdvanceAction) -> Self {
        Self::Advance(action)
    }
}

impl From<OpenDoorAction> for Action {
    fn from(action: OpenDoorAction) -> Self {
        Self::OpenDoor(action)
    }
}

impl From<CloseDoorAction> for Action {
    fn from(action: CloseDoorAction) -> Self {
        Self::CloseDoor(action)
    }
}
