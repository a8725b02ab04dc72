use super::{CommandStep, turn_toward};
use crate::action::Action;
use crate::message::MessageSink;
use crate::pathfinding::find_path_in;
use crate::state::{EntityId, GameState, Orientation, Position};

/// Walk to `destination`, re-planning from scratch on every step.
///
/// When the destination cannot be reached the walk heads for the reachable
/// cell closest to it and stops there.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GoTo {
    pub actor: EntityId,
    pub destination: Position,
    reported_no_path: bool,
}

impl GoTo {
    pub fn new(actor: EntityId, destination: Position) -> Self {
        Self {
            actor,
            destination,
            reported_no_path: false,
        }
    }

    pub fn next(&mut self, state: &GameState, messages: &mut dyn MessageSink) -> CommandStep {
        let Some(actor) = state.entities.actor(self.actor) else {
            return CommandStep::Done;
        };
        let origin = actor.position;

        let path = match find_path_in(state, origin, self.destination) {
            Ok(path) => path,
            Err(error) => {
                if !self.reported_no_path {
                    self.reported_no_path = true;
                    messages.post_message(format!(
                        "No path to {}; getting as close as possible",
                        self.destination
                    ));
                }
                error.into_best_effort()
            }
        };

        let Some(step) = path.first_step() else {
            if origin == self.destination {
                messages.post_message(format!("Arrived at {}", self.destination));
            } else {
                messages.post_message(format!("Cannot get any closer to {}", self.destination));
            }
            return CommandStep::Done;
        };

        let Some(heading) = Orientation::from_delta(step.x - origin.x, step.y - origin.y) else {
            return CommandStep::Done;
        };
        match turn_toward(self.actor, actor.orientation, heading) {
            Some(turn) => CommandStep::Action(turn),
            None => CommandStep::Action(Action::advance(self.actor)),
        }
    }
}
