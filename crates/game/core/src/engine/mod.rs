//! Turn scheduling and action execution pipeline.
//!
//! The [`GameEngine`] is the authoritative reducer for [`GameState`]. It
//! borrows the state for the duration of one operation, drives actions
//! through the transition phases and keeps the turn timeline in step with
//! the world.

mod errors;
mod transition;
mod turns;

pub use errors::{ActionFailure, ExecuteError, TransitionPhase, TransitionPhaseError};
pub use turns::{TurnError, TurnOutcome};

use crate::action::Action;
use crate::config::GameConfig;
use crate::state::{EntityId, GameState, MapError, Occupant, Tick};

/// Chooses the next action for a non-player actor.
pub trait DecisionPolicy {
    fn decide(&mut self, actor: EntityId, state: &GameState) -> Action;
}

/// Game engine that manages action execution, turn scheduling, and game logic.
///
/// All world mutations flow through the three-phase action pipeline:
/// pre_validate → apply → post_validate
pub struct GameEngine<'a> {
    state: &'a mut GameState,
    config: &'a GameConfig,
}

impl<'a> GameEngine<'a> {
    /// Creates a new game engine over the given state.
    pub fn new(state: &'a mut GameState, config: &'a GameConfig) -> Self {
        Self { state, config }
    }

    pub fn state(&self) -> &GameState {
        self.state
    }

    pub fn config(&self) -> &GameConfig {
        self.config
    }

    /// Executes an action for the actor whose turn it is.
    ///
    /// Returns the action's duration. Refusals come from `pre_validate` and
    /// leave the state unchanged; a `post_validate` failure means an occupancy
    /// invariant broke and is reported with internal severity.
    pub fn execute(&mut self, action: &Action) -> Result<Tick, ExecuteError> {
        self.validate_actor(action)?;
        transition::execute_transition(action, self.state, self.config)
    }

    /// Runs an action outside of turn order, e.g. while setting up a level.
    pub fn execute_unscheduled(&mut self, action: &Action) -> Result<Tick, ExecuteError> {
        transition::execute_transition(action, self.state, self.config)
    }

    /// Validates action actor matches turn state.
    fn validate_actor(&self, action: &Action) -> Result<(), ExecuteError> {
        let current = self.state.turn.current_actor;
        if current != Some(action.actor()) {
            return Err(ExecuteError::ActorNotCurrent {
                actor: action.actor(),
                current,
            });
        }
        Ok(())
    }

    /// Removes an occupant from the world, dropping its pending turn too.
    pub fn despawn(&mut self, entity: EntityId) -> Result<Occupant, MapError> {
        let occupant = self.state.despawn(entity)?;
        self.deactivate(entity);
        if self.state.turn.current_actor == Some(entity) {
            self.state.turn.current_actor = None;
        }
        Ok(occupant)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{MapDimensions, TerrainType};
    use crate::state::{ActorState, GridMap, Orientation, Position};

    fn arena() -> GameState {
        let mut map = GridMap::new(MapDimensions::new(4, 4));
        for position in map.dimensions().positions().collect::<Vec<_>>() {
            map.set_terrain(position, &TerrainType::floor()).unwrap();
        }
        GameState::new(map)
    }

    #[test]
    fn execute_rejects_out_of_turn_actor() {
        let mut state = arena();
        let player = state
            .spawn(Position::new(1, 1), ActorState::player(Position::ORIGIN, Orientation::EAST))
            .unwrap();
        let config = GameConfig::default();
        let mut engine = GameEngine::new(&mut state, &config);

        let error = engine.execute(&Action::advance(player)).unwrap_err();
        assert!(matches!(error, ExecuteError::ActorNotCurrent { current: None, .. }));

        engine.activate(player).unwrap();
        engine.prepare_next_turn().unwrap();
        assert_eq!(engine.execute(&Action::advance(player)), Ok(Tick(1)));
        assert_eq!(engine.state().player().unwrap().position, Position::new(2, 1));
    }

    #[test]
    fn failed_action_reports_phase_and_leaves_state_alone() {
        let mut state = arena();
        let player = state
            .spawn(Position::new(3, 0), ActorState::player(Position::ORIGIN, Orientation::EAST))
            .unwrap();
        let before = state.clone();
        let config = GameConfig::default();
        let mut engine = GameEngine::new(&mut state, &config);

        let error = engine
            .execute_unscheduled(&Action::advance(player))
            .unwrap_err();
        match error {
            ExecuteError::Action { failure, .. } => {
                assert_eq!(failure.phase, TransitionPhase::PreValidate);
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(state, before);
    }

    #[test]
    fn despawn_clears_cell_and_schedule() {
        let mut state = arena();
        let rat = state
            .spawn(
                Position::new(2, 2),
                ActorState::npc("rat", 'r', Position::ORIGIN, Orientation::NORTH),
            )
            .unwrap();
        let config = GameConfig::default();
        let mut engine = GameEngine::new(&mut state, &config);
        engine.activate(rat).unwrap();

        engine.despawn(rat).unwrap();
        assert!(!engine.is_entity_active(rat));
        assert!(engine.state().map.occupants(Position::new(2, 2)).is_empty());
    }
}
