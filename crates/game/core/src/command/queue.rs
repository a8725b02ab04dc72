use std::collections::VecDeque;

use super::{Command, CommandStep};
use crate::action::Action;
use crate::message::MessageSink;
use crate::state::GameState;

/// FIFO of pending commands for one actor.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CommandQueue {
    commands: VecDeque<Command>,
}

impl CommandQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a command. A bare [`Action`] becomes a one-action sequence.
    pub fn issue(&mut self, command: impl Into<Command>) {
        self.commands.push_back(command.into());
    }

    /// Next action from the front-most command that still has one.
    ///
    /// Finished commands are dropped on the way. `None` means the queue is
    /// exhausted and the caller should wait for new input.
    pub fn next(&mut self, state: &GameState, messages: &mut dyn MessageSink) -> Option<Action> {
        while let Some(command) = self.commands.front_mut() {
            match command.next(state, messages) {
                CommandStep::Action(action) => return Some(action),
                CommandStep::Done => {
                    self.commands.pop_front();
                }
            }
        }
        None
    }

    /// Drops the front-most command, returning it.
    pub fn cancel_current(&mut self) -> Option<Command> {
        self.commands.pop_front()
    }

    /// Drops every pending command.
    pub fn interrupt(&mut self) {
        self.commands.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{MapDimensions, TerrainType};
    use crate::command::ActionSequence;
    use crate::state::{EntityId, GridMap};

    fn empty_state() -> GameState {
        let mut map = GridMap::new(MapDimensions::new(1, 1));
        map.set_terrain(crate::state::Position::ORIGIN, &TerrainType::floor())
            .unwrap();
        GameState::new(map)
    }

    #[test]
    fn bare_actions_are_drained_in_order() {
        let state = empty_state();
        let mut messages: Vec<String> = Vec::new();
        let mut queue = CommandQueue::new();
        let player = EntityId::PLAYER;
        queue.issue(Action::turn(player, true));
        queue.issue(ActionSequence::default());
        queue.issue(Command::sequence([Action::advance(player), Action::turn(player, false)]));

        assert_eq!(queue.next(&state, &mut messages), Some(Action::turn(player, true)));
        assert_eq!(queue.next(&state, &mut messages), Some(Action::advance(player)));
        assert_eq!(queue.next(&state, &mut messages), Some(Action::turn(player, false)));
        assert_eq!(queue.next(&state, &mut messages), None);
        assert!(queue.is_empty());
    }

    #[test]
    fn interrupt_clears_pending_commands() {
        let state = empty_state();
        let mut queue = CommandQueue::new();
        queue.issue(Command::sequence([Action::advance(EntityId::PLAYER); 3]));
        queue.issue(Action::advance(EntityId::PLAYER));
        queue.interrupt();
        assert_eq!(queue.next(&state, &mut Vec::<String>::new()), None);
    }

    #[test]
    fn cancel_current_keeps_later_commands() {
        let state = empty_state();
        let mut messages: Vec<String> = Vec::new();
        let mut queue = CommandQueue::new();
        let player = EntityId::PLAYER;
        queue.issue(Command::sequence([Action::advance(player); 2]));
        queue.issue(Action::turn(player, false));

        assert_eq!(queue.next(&state, &mut messages), Some(Action::advance(player)));
        assert!(queue.cancel_current().is_some());
        assert_eq!(queue.next(&state, &mut messages), Some(Action::turn(player, false)));
        assert_eq!(queue.next(&state, &mut messages), None);
        assert_eq!(queue.cancel_current(), None);
    }
}
