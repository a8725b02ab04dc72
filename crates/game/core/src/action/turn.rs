use crate::action::{ActionError, ActionTransition};
use crate::config::GameConfig;
use crate::state::{EntityId, GameState, Tick};

/// Rotate one step. Always succeeds for an existing actor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnAction {
    pub actor: EntityId,
    pub clockwise: bool,
}

impl TurnAction {
    pub fn new(actor: EntityId, clockwise: bool) -> Self {
        Self { actor, clockwise }
    }
}

impl ActionTransition for TurnAction {
    type Error = ActionError;

    fn actor(&self) -> EntityId {
        self.actor
    }

    fn cost(&self, config: &GameConfig) -> Tick {
        Tick(config.costs.turn)
    }

    fn pre_validate(&self, state: &GameState, _config: &GameConfig) -> Result<(), Self::Error> {
        state
            .entities
            .actor(self.actor)
            .map(|_| ())
            .ok_or(ActionError::ActorNotFound(self.actor))
    }

    fn apply(&self, state: &mut GameState, config: &GameConfig) -> Result<Tick, Self::Error> {
        let actor = state
            .entities
            .actor_mut(self.actor)
            .ok_or(ActionError::ActorNotFound(self.actor))?;
        actor.orientation = actor.orientation.turned(self.clockwise);
        Ok(self.cost(config))
    }
}
