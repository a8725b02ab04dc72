use crate::action::Action;
use crate::command::CommandQueue;
use crate::error::{ErrorSeverity, GameError};
use crate::message::MessageSink;
use crate::state::{EntityId, ScheduledTurn, Tick};

use super::{DecisionPolicy, ExecuteError, GameEngine};

/// Errors that can occur during turn operations
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TurnError {
    #[error("no entities are currently active")]
    NoActiveEntities,

    #[error("entity {0} already has a pending turn")]
    AlreadyScheduled(EntityId),

    #[error("entity {0} has no pending turn")]
    NotScheduled(EntityId),

    #[error("actor {0} not found")]
    ActorNotFound(EntityId),
}

impl GameError for TurnError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::NoActiveEntities => ErrorSeverity::Fatal,
            Self::AlreadyScheduled(_) | Self::NotScheduled(_) => ErrorSeverity::Validation,
            Self::ActorNotFound(_) => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NoActiveEntities => "TURN_NO_ACTIVE_ENTITIES",
            Self::AlreadyScheduled(_) => "TURN_ALREADY_SCHEDULED",
            Self::NotScheduled(_) => "TURN_NOT_SCHEDULED",
            Self::ActorNotFound(_) => "TURN_ACTOR_NOT_FOUND",
        }
    }
}

/// What one scheduler step did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TurnOutcome {
    /// The action ran; the actor acts again at `next_at`.
    Acted {
        actor: EntityId,
        action: Action,
        next_at: Tick,
    },

    /// The action was refused. The actor keeps its slot at the same time.
    Failed {
        actor: EntityId,
        action: Action,
        error: ExecuteError,
    },

    /// The player is up and has nothing queued. Nothing changed except the
    /// clock; issue a command and step again.
    AwaitingInput,
}

/// Turn scheduling methods for GameEngine.
impl<'a> GameEngine<'a> {
    /// Returns the current timeline clock value.
    pub fn clock(&self) -> Tick {
        self.state.turn.clock
    }

    /// Checks if an entity is currently scheduled.
    pub fn is_entity_active(&self, entity: EntityId) -> bool {
        self.state.turn.is_scheduled(entity)
    }

    /// Schedules an actor to act at the current clock.
    pub fn activate(&mut self, entity: EntityId) -> Result<(), TurnError> {
        let clock = self.state.turn.clock;
        self.activate_at(entity, clock)
    }

    pub fn activate_at(&mut self, entity: EntityId, ready_at: Tick) -> Result<(), TurnError> {
        if self.state.entities.actor(entity).is_none() {
            return Err(TurnError::ActorNotFound(entity));
        }
        if !self.state.turn.schedule(entity, ready_at) {
            return Err(TurnError::AlreadyScheduled(entity));
        }
        Ok(())
    }

    /// Schedules every actor that has no pending turn yet.
    pub fn activate_all(&mut self) {
        let clock = self.state.turn.clock;
        let idle: Vec<EntityId> = self
            .state
            .entities
            .actor_ids()
            .filter(|id| !self.state.turn.is_scheduled(*id))
            .collect();
        for entity in idle {
            self.state.turn.schedule(entity, clock);
        }
    }

    /// Removes an entity's pending turn. Returns true if it had one.
    pub fn deactivate(&mut self, entity: EntityId) -> bool {
        self.state.turn.unschedule(entity).is_some()
    }

    /// Moves an entity's pending turn to a new time.
    pub fn reschedule(&mut self, entity: EntityId, ready_at: Tick) -> Result<(), TurnError> {
        self.state
            .turn
            .unschedule(entity)
            .ok_or(TurnError::NotScheduled(entity))?;
        self.state.turn.schedule(entity, ready_at);
        Ok(())
    }

    /// Pops the soonest pending turn, advancing the clock and setting the
    /// current actor. Equal times resolve by ascending entity id.
    pub fn prepare_next_turn(&mut self) -> Result<ScheduledTurn, TurnError> {
        self.state
            .turn
            .pop_next()
            .ok_or(TurnError::NoActiveEntities)
    }

    /// Returns the entity currently taking their turn.
    pub fn current_actor(&self) -> Option<EntityId> {
        self.state.turn.current_actor
    }

    /// Runs one scheduler tick.
    ///
    /// The player's action comes from `commands`; everyone else asks
    /// `policy`. A successful action puts the actor back at
    /// `time + duration`, a failed one at `time`. Queued commands that act
    /// for someone other than the player are dropped. When the player is up
    /// with an empty queue the turn is put back untouched and
    /// [`TurnOutcome::AwaitingInput`] is returned.
    pub fn step(
        &mut self,
        commands: &mut CommandQueue,
        policy: &mut dyn DecisionPolicy,
        messages: &mut dyn MessageSink,
    ) -> Result<TurnOutcome, TurnError> {
        let turn = self.prepare_next_turn()?;
        let actor = turn.entity;
        let is_player = self
            .state
            .entities
            .actor(actor)
            .ok_or(TurnError::ActorNotFound(actor))?
            .is_player();

        let action = if is_player {
            loop {
                match commands.next(self.state, messages) {
                    Some(action) if action.actor() == actor => break action,
                    // a command for some other actor can never run on this turn
                    Some(_) => {
                        commands.cancel_current();
                    }
                    None => {
                        self.state.turn.schedule(actor, turn.ready_at);
                        return Ok(TurnOutcome::AwaitingInput);
                    }
                }
            }
        } else {
            policy.decide(actor, self.state)
        };

        match self.execute(&action) {
            Ok(duration) => {
                let next_at = turn.ready_at + duration;
                self.state.turn.schedule(actor, next_at);
                Ok(TurnOutcome::Acted {
                    actor,
                    action,
                    next_at,
                })
            }
            Err(error) => {
                if is_player {
                    messages.post_message(error.player_message());
                }
                self.state.turn.schedule(actor, turn.ready_at);
                Ok(TurnOutcome::Failed {
                    actor,
                    action,
                    error,
                })
            }
        }
    }
}
