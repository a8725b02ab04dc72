use super::{CommandStep, turn_toward};
use crate::action::Action;
use crate::state::{EntityId, GameState, Orientation};

/// Turn the short way round until facing `target`, then advance once.
///
/// On a half-turn the rotation resolves counter-clockwise.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TurnAndGo {
    pub actor: EntityId,
    pub target: Orientation,
    advanced: bool,
}

impl TurnAndGo {
    pub fn new(actor: EntityId, target: Orientation) -> Self {
        Self {
            actor,
            target,
            advanced: false,
        }
    }

    pub fn next(&mut self, state: &GameState) -> CommandStep {
        if self.advanced {
            return CommandStep::Done;
        }
        let Some(actor) = state.entities.actor(self.actor) else {
            return CommandStep::Done;
        };
        if let Some(turn) = turn_toward(self.actor, actor.orientation, self.target) {
            return CommandStep::Action(turn);
        }
        self.advanced = true;
        CommandStep::Action(Action::advance(self.actor))
    }
}
