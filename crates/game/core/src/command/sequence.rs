use std::collections::VecDeque;

use super::CommandStep;
use crate::action::Action;

/// Fixed list of actions handed out in order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ActionSequence {
    actions: VecDeque<Action>,
}

impl ActionSequence {
    pub fn new(actions: impl IntoIterator<Item = Action>) -> Self {
        Self {
            actions: actions.into_iter().collect(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.actions.len()
    }

    pub fn next(&mut self) -> CommandStep {
        self.actions
            .pop_front()
            .map_or(CommandStep::Done, CommandStep::Action)
    }
}
