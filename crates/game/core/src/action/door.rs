use crate::action::{ActionError, ActionTransition};
use crate::config::GameConfig;
use crate::state::{DoorState, EntityId, GameState, Position, Tick};

/// Checks shared by opening and closing: the actor exists and stands next to
/// `at`, and `door` is a door listed at `at`.
fn reach_door<'s>(
    state: &'s GameState,
    actor: EntityId,
    door: EntityId,
    at: Position,
) -> Result<&'s DoorState, ActionError> {
    let actor_state = state
        .entities
        .actor(actor)
        .ok_or(ActionError::ActorNotFound(actor))?;
    let door_state = state
        .entities
        .door(door)
        .ok_or(ActionError::DoorNotFound(door))?;
    if !state.map.occupants(at).contains(&door) {
        return Err(ActionError::DoorNotAt { door, position: at });
    }
    if !actor_state.position.is_adjacent(at) {
        return Err(ActionError::NotAdjacent {
            from: actor_state.position,
            target: at,
        });
    }
    Ok(door_state)
}

fn set_closed(state: &mut GameState, door: EntityId, closed: bool) -> Result<(), ActionError> {
    let door_state = state
        .entities
        .door_mut(door)
        .ok_or(ActionError::DoorNotFound(door))?;
    door_state.closed = closed;
    Ok(())
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OpenDoorAction {
    pub actor: EntityId,
    pub door: EntityId,
    pub at: Position,
}

impl OpenDoorAction {
    pub fn new(actor: EntityId, door: EntityId, at: Position) -> Self {
        Self { actor, door, at }
    }
}

impl ActionTransition for OpenDoorAction {
    type Error = ActionError;

    fn actor(&self) -> EntityId {
        self.actor
    }

    fn cost(&self, config: &GameConfig) -> Tick {
        Tick(config.costs.open_door)
    }

    fn pre_validate(&self, state: &GameState, _config: &GameConfig) -> Result<(), Self::Error> {
        let door = reach_door(state, self.actor, self.door, self.at)?;
        if door.locked {
            return Err(ActionError::DoorLocked);
        }
        if !door.closed {
            return Err(ActionError::DoorAlreadyOpen);
        }
        Ok(())
    }

    fn apply(&self, state: &mut GameState, config: &GameConfig) -> Result<Tick, Self::Error> {
        set_closed(state, self.door, false)?;
        Ok(self.cost(config))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CloseDoorAction {
    pub actor: EntityId,
    pub door: EntityId,
    pub at: Position,
}

impl CloseDoorAction {
    pub fn new(actor: EntityId, door: EntityId, at: Position) -> Self {
        Self { actor, door, at }
    }
}

impl ActionTransition for CloseDoorAction {
    type Error = ActionError;

    fn actor(&self) -> EntityId {
        self.actor
    }

    fn cost(&self, config: &GameConfig) -> Tick {
        Tick(config.costs.close_door)
    }

    fn pre_validate(&self, state: &GameState, _config: &GameConfig) -> Result<(), Self::Error> {
        let door = reach_door(state, self.actor, self.door, self.at)?;
        if door.closed {
            return Err(ActionError::DoorAlreadyClosed);
        }
        Ok(())
    }

    fn apply(&self, state: &mut GameState, config: &GameConfig) -> Result<Tick, Self::Error> {
        set_closed(state, self.door, true)?;
        Ok(self.cost(config))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{MapDimensions, TerrainType};
    use crate::state::{ActorState, GridMap, Orientation};

    fn doorway(locked: bool) -> (GameState, EntityId, EntityId) {
        let mut map = GridMap::new(MapDimensions::new(3, 3));
        for position in map.dimensions().positions().collect::<Vec<_>>() {
            map.set_terrain(position, &TerrainType::floor()).unwrap();
        }
        let mut state = GameState::new(map);
        let player = state
            .spawn(Position::new(0, 1), ActorState::player(Position::ORIGIN, Orientation::EAST))
            .unwrap();
        let door = state.place_door(Position::new(1, 1), false, locked).unwrap();
        (state, player, door)
    }

    #[test]
    fn closing_an_open_door_twice_fails_the_second_time() {
        let (mut state, player, door) = doorway(false);
        let config = GameConfig::default();
        let close = CloseDoorAction::new(player, door, Position::new(1, 1));

        close.pre_validate(&state, &config).unwrap();
        close.apply(&mut state, &config).unwrap();
        assert!(state.entities.door(door).unwrap().closed);
        assert_eq!(
            close.pre_validate(&state, &config),
            Err(ActionError::DoorAlreadyClosed)
        );
    }

    #[test]
    fn door_must_be_adjacent_and_where_claimed() {
        let (mut state, player, door) = doorway(false);
        let config = GameConfig::default();
        assert!(matches!(
            CloseDoorAction::new(player, door, Position::new(0, 0)).pre_validate(&state, &config),
            Err(ActionError::DoorNotAt { .. })
        ));

        state.despawn(player).unwrap();
        let imp = state
            .spawn(
                Position::new(2, 2),
                ActorState::npc("imp", 'i', Position::ORIGIN, Orientation::WEST),
            )
            .unwrap();
        let at = Position::new(1, 1);
        assert!(CloseDoorAction::new(imp, door, at).pre_validate(&state, &config).is_ok());

        let mut far = GameState::new(GridMap::new(MapDimensions::new(4, 1)));
        for x in 0..4 {
            far.map.set_terrain(Position::new(x, 0), &TerrainType::floor()).unwrap();
        }
        let door = far.place_door(Position::new(0, 0), false, false).unwrap();
        let imp = far
            .spawn(
                Position::new(3, 0),
                ActorState::npc("imp", 'i', Position::ORIGIN, Orientation::WEST),
            )
            .unwrap();
        assert_eq!(
            CloseDoorAction::new(imp, door, Position::new(0, 0)).pre_validate(&far, &config),
            Err(ActionError::NotAdjacent {
                from: Position::new(3, 0),
                target: Position::new(0, 0),
            })
        );
    }

    #[test]
    fn locked_door_cannot_be_closed_then_opened() {
        let (mut state, player, door) = doorway(true);
        let config = GameConfig::default();
        let at = Position::new(1, 1);

        CloseDoorAction::new(player, door, at)
            .apply(&mut state, &config)
            .unwrap();
        assert_eq!(
            OpenDoorAction::new(player, door, at).pre_validate(&state, &config),
            Err(ActionError::DoorLocked)
        );
    }
}
