//! Action transition dispatch and execution logic.

use crate::action::{Action, ActionTransition};
use crate::config::GameConfig;
use crate::state::{GameState, Tick};

use super::errors::{ExecuteError, TransitionPhase, TransitionPhaseError};

/// Executes a transition through the three-phase pipeline and returns its
/// duration.
///
/// Phases:
/// 1. `pre_validate` - Check preconditions before mutation
/// 2. `apply` - Mutate the game state and return the duration
/// 3. `post_validate` - Verify postconditions after mutation
#[inline]
fn drive_transition<T>(
    transition: &T,
    state: &mut GameState,
    config: &GameConfig,
) -> Result<Tick, TransitionPhaseError<T::Error>>
where
    T: ActionTransition,
{
    transition
        .pre_validate(state, config)
        .map_err(|error| TransitionPhaseError::new(TransitionPhase::PreValidate, error))?;

    let duration = transition
        .apply(state, config)
        .map_err(|error| TransitionPhaseError::new(TransitionPhase::Apply, error))?;

    transition
        .post_validate(state, config)
        .map_err(|error| TransitionPhaseError::new(TransitionPhase::PostValidate, error))?;

    Ok(duration)
}

/// Routes an action to its transition.
pub(super) fn execute_transition(
    action: &Action,
    state: &mut GameState,
    config: &GameConfig,
) -> Result<Tick, ExecuteError> {
    let result = match action {
        Action::Turn(transition) => drive_transition(transition, state, config),
        Action::Advance(transition) => drive_transition(transition, state, config),
        Action::OpenDoor(transition) => drive_transition(transition, state, config),
        Action::CloseDoor(transition) => drive_transition(transition, state, config),
    };
    result.map_err(|failure| ExecuteError::Action {
        kind: action.kind(),
        failure,
    })
}
