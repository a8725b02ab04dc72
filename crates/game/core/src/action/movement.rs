use crate::action::{ActionError, ActionTransition};
use crate::config::GameConfig;
use crate::state::{EntityId, GameState, Position, Tick};

const MAP_EDGE: &str = "the edge of the map";

/// Step one cell in the direction the actor faces.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AdvanceAction {
    pub actor: EntityId,
}

impl AdvanceAction {
    pub fn new(actor: EntityId) -> Self {
        Self { actor }
    }

    fn route(&self, state: &GameState) -> Result<(Position, Position), ActionError> {
        let actor = state
            .entities
            .actor(self.actor)
            .ok_or(ActionError::ActorNotFound(self.actor))?;
        Ok((actor.position, actor.position.step(actor.orientation)))
    }
}

impl ActionTransition for AdvanceAction {
    type Error = ActionError;

    fn actor(&self) -> EntityId {
        self.actor
    }

    fn cost(&self, config: &GameConfig) -> Tick {
        Tick(config.costs.advance)
    }

    fn pre_validate(&self, state: &GameState, _config: &GameConfig) -> Result<(), Self::Error> {
        let (origin, destination) = self.route(state)?;

        if !state.map.occupants(origin).contains(&self.actor) {
            return Err(ActionError::OccupancyDesync {
                actor: self.actor,
                position: origin,
            });
        }

        let view = state
            .tile_view(destination)
            .map_err(|_| ActionError::Blocked {
                destination,
                by: MAP_EDGE.to_owned(),
            })?;
        if let Some(by) = view.blocker() {
            return Err(ActionError::Blocked {
                destination,
                by: by.to_owned(),
            });
        }

        Ok(())
    }

    fn apply(&self, state: &mut GameState, config: &GameConfig) -> Result<Tick, Self::Error> {
        let (origin, destination) = self.route(state)?;

        // pre_validate established both cells are in bounds and the actor is
        // listed at origin
        state.map.remove_occupant(origin, self.actor);
        state
            .map
            .add_occupant(destination, self.actor)
            .map_err(|_| ActionError::OccupancyDesync {
                actor: self.actor,
                position: destination,
            })?;

        let actor = state
            .entities
            .actor_mut(self.actor)
            .ok_or(ActionError::ActorNotFound(self.actor))?;
        actor.position = destination;

        Ok(self.cost(config))
    }

    fn post_validate(&self, state: &GameState, _config: &GameConfig) -> Result<(), Self::Error> {
        let actor = state
            .entities
            .actor(self.actor)
            .ok_or(ActionError::ActorNotFound(self.actor))?;
        let listed = state
            .map
            .occupancy()
            .filter(|(_, ids)| ids.contains(&self.actor))
            .map(|(position, _)| position)
            .collect::<Vec<_>>();

        if listed == [actor.position] {
            Ok(())
        } else {
            Err(ActionError::OccupancyDesync {
                actor: self.actor,
                position: actor.position,
            })
        }
    }
}
