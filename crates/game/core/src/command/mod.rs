//! Commands: multi-step, interruptible requests that produce actions lazily.
//!
//! Each command kind is an explicit state machine. [`Command::next`] looks at
//! the current state and either hands out the next action or reports that
//! the command is finished. Nothing is planned ahead, so a command always
//! reacts to the world as it is when resumed.
mod goto;
mod queue;
mod sequence;
mod turn_and_go;

pub use goto::GoTo;
pub use queue::CommandQueue;
pub use sequence::ActionSequence;
pub use turn_and_go::TurnAndGo;

use crate::action::Action;
use crate::message::MessageSink;
use crate::state::{EntityId, GameState, Orientation, Position};

/// Result of resuming a command.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CommandStep {
    Action(Action),
    Done,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    ActionSequence(ActionSequence),
    TurnAndGo(TurnAndGo),
    GoTo(GoTo),
}

impl Command {
    pub fn sequence(actions: impl IntoIterator<Item = Action>) -> Self {
        Self::ActionSequence(ActionSequence::new(actions))
    }

    pub fn turn_and_go(actor: EntityId, target: Orientation) -> Self {
        Self::TurnAndGo(TurnAndGo::new(actor, target))
    }

    pub fn go_to(actor: EntityId, destination: Position) -> Self {
        Self::GoTo(GoTo::new(actor, destination))
    }

    /// Resumes the command against the current state.
    pub fn next(&mut self, state: &GameState, messages: &mut dyn MessageSink) -> CommandStep {
        match self {
            Command::ActionSequence(command) => command.next(),
            Command::TurnAndGo(command) => command.next(state),
            Command::GoTo(command) => command.next(state, messages),
        }
    }
}

impl From<Action> for Command {
    fn from(action: Action) -> Self {
        Self::sequence([action])
    }
}

impl From<ActionSequence> for Command {
    fn from(command: ActionSequence) -> Self {
        Self::ActionSequence(command)
    }
}

impl From<TurnAndGo> for Command {
    fn from(command: TurnAndGo) -> Self {
        Self::TurnAndGo(command)
    }
}

impl From<GoTo> for Command {
    fn from(command: GoTo) -> Self {
        Self::GoTo(command)
    }
}

/// One rotation step from `current` towards `target`, or `None` when aligned.
pub(crate) fn turn_toward(actor: EntityId, current: Orientation, target: Orientation) -> Option<Action> {
    match current.rotation_to(target) {
        0 => None,
        rotation => Some(Action::turn(actor, rotation > 0)),
    }
}
