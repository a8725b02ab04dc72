//! The gameboard: one map, its actors and the player's pending commands.
//!
//! A [`Session`] owns the authoritative [`GameState`] and drives the turn
//! scheduler on behalf of a frontend. Frontends issue commands, then call
//! [`Session::run_until_input`] to let everyone act until the player's queue
//! runs dry.

use std::path::Path;

use delve_content::SnapshotLoader;
use delve_core::{
    Action, Command, CommandQueue, DecisionPolicy, EntityId, GameEngine, GameError, GameState,
    Occupant, Orientation, Position, TurnOutcome, Visible, compute_visible,
};
use tracing::{debug, error, info, warn};

use crate::config::RuntimeConfig;
use crate::error::{Result, RuntimeError};
use crate::message::MessageLog;
use crate::policy::RandomPolicy;

const NEW_GAME: &str = "New game";

/// What one [`Session::run_until_input`] call did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Poll {
    /// Every action attempted, in order. Never contains
    /// [`TurnOutcome::AwaitingInput`].
    pub outcomes: Vec<TurnOutcome>,
    /// False when the step budget ran out before the player needed input.
    pub awaiting_input: bool,
}

pub struct Session {
    state: GameState,
    config: RuntimeConfig,
    commands: CommandQueue,
    policy: Box<dyn DecisionPolicy>,
    messages: MessageLog,
}

impl Session {
    /// Starts a game on a loaded map. Every actor on it is scheduled at the
    /// current clock and the log opens with "New game".
    pub fn new_game(state: GameState, config: RuntimeConfig) -> Result<Self> {
        if state.player().is_none() {
            return Err(RuntimeError::NoPlayer);
        }
        let policy = RandomPolicy::new(config.npc_seed);
        let mut session = Self {
            messages: MessageLog::new(config.game.message_capacity),
            state,
            config,
            commands: CommandQueue::new(),
            policy: Box::new(policy),
        };
        GameEngine::new(&mut session.state, &session.config.game).activate_all();
        info!(
            dimensions = %session.state.map.dimensions(),
            actors = session.state.entities.actor_ids().count(),
            "session started"
        );
        session.messages.push_text(NEW_GAME);
        Ok(session)
    }

    /// Resumes from a snapshot written by [`Session::save`].
    pub fn restore(path: &Path, config: RuntimeConfig) -> Result<Self> {
        let state = SnapshotLoader::load(path)?;
        info!(path = %path.display(), "snapshot restored");
        Self::new_game(state, config)
    }

    /// Writes the map's cells and seen memory to `path`.
    pub fn save(&self, path: &Path) -> Result<()> {
        SnapshotLoader::save(path, &self.state)?;
        info!(path = %path.display(), "snapshot saved");
        Ok(())
    }

    /// Replaces the decision policy used for every non-player actor.
    #[must_use]
    pub fn with_policy(mut self, policy: impl DecisionPolicy + 'static) -> Self {
        self.policy = Box::new(policy);
        self
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    pub fn messages(&self) -> &MessageLog {
        &self.messages
    }

    pub fn player_position(&self) -> Option<Position> {
        self.state.player().map(|player| player.position)
    }

    /// Appends a command to the player's queue.
    pub fn issue(&mut self, command: impl Into<Command>) {
        self.commands.issue(command);
    }

    /// Drops everything the player has queued.
    pub fn interrupt(&mut self) {
        if !self.commands.is_empty() {
            debug!(dropped = self.commands.len(), "player commands interrupted");
        }
        self.commands.interrupt();
    }

    pub fn has_pending_commands(&self) -> bool {
        !self.commands.is_empty()
    }

    /// Walks to `target` along the cheapest route.
    pub fn click(&mut self, target: Position) {
        self.messages.push_text(format!("Going to {target}"));
        self.commands.issue(Command::go_to(EntityId::PLAYER, target));
    }

    /// Faces `direction` the short way round, then steps once.
    pub fn walk(&mut self, direction: Orientation) {
        self.commands
            .issue(Command::turn_and_go(EntityId::PLAYER, direction));
    }

    /// Turns the player one step.
    pub fn turn(&mut self, clockwise: bool) {
        self.commands
            .issue(Action::turn(EntityId::PLAYER, clockwise));
    }

    pub fn advance(&mut self) {
        self.commands.issue(Action::advance(EntityId::PLAYER));
    }

    /// Queues opening or closing the door next to the player in
    /// `direction`. Returns false, with a message, if there is none.
    pub fn operate_door(&mut self, direction: Orientation, open: bool) -> bool {
        let Some(origin) = self.player_position() else {
            return false;
        };
        let at = origin.step(direction);
        let door = self
            .state
            .occupants(at)
            .find(|(_, occupant)| matches!(occupant, Occupant::Door(_)))
            .map(|(id, _)| id);
        let Some(door) = door else {
            self.messages.push_text(format!("There is no door at {at}"));
            return false;
        };
        let action = if open {
            Action::open_door(EntityId::PLAYER, door, at)
        } else {
            Action::close_door(EntityId::PLAYER, door, at)
        };
        self.commands.issue(action);
        true
    }

    /// Runs one scheduler step.
    pub fn step(&mut self) -> Result<TurnOutcome> {
        if let Some(next) = self.state.turn.peek_next() {
            self.messages.set_clock(next.ready_at);
        }
        let outcome = GameEngine::new(&mut self.state, &self.config.game).step(
            &mut self.commands,
            self.policy.as_mut(),
            &mut self.messages,
        )?;

        match &outcome {
            TurnOutcome::Acted {
                actor,
                action,
                next_at,
            } => {
                debug!(%actor, kind = %action.kind(), next_at = next_at.0, "action executed");
            }
            TurnOutcome::Failed {
                actor,
                action,
                error,
            } => {
                if error.severity().is_internal() {
                    error!(
                        %actor,
                        kind = %action.kind(),
                        code = error.error_code(),
                        %error,
                        "action broke an invariant"
                    );
                } else {
                    warn!(%actor, kind = %action.kind(), %error, "action failed");
                }
            }
            TurnOutcome::AwaitingInput => {
                debug!(clock = self.state.turn.clock.0, "awaiting player input");
            }
        }
        Ok(outcome)
    }

    /// Steps until the player is up with nothing queued, or until
    /// `max_steps_per_poll` steps have run.
    pub fn run_until_input(&mut self) -> Result<Poll> {
        let mut outcomes = Vec::new();
        for _ in 0..self.config.max_steps_per_poll {
            match self.step()? {
                TurnOutcome::AwaitingInput => {
                    return Ok(Poll {
                        outcomes,
                        awaiting_input: true,
                    });
                }
                outcome => outcomes.push(outcome),
            }
        }
        warn!(
            steps = self.config.max_steps_per_poll,
            "step budget exhausted before the player needed input"
        );
        Ok(Poll {
            outcomes,
            awaiting_input: false,
        })
    }

    /// What the player can see right now, terrain first then occupants.
    /// Every visible cell is folded into the map's seen memory.
    pub fn look(&mut self) -> Result<Vec<(Position, Visible<'_>)>> {
        let origin = self.player_position().ok_or(RuntimeError::NoPlayer)?;
        let radius = self.config.game.fov_radius;
        let cells: Vec<Position> = delve_core::visible_positions(&self.state, origin, radius);
        self.state.remember(cells);
        Ok(compute_visible(&self.state, origin, radius))
    }

    /// Removes an actor or feature, along with any pending turn. The player
    /// stays for the whole session.
    pub fn despawn(&mut self, entity: EntityId) -> Result<Occupant> {
        if entity == EntityId::PLAYER {
            return Err(RuntimeError::PlayerDespawn);
        }
        let occupant = GameEngine::new(&mut self.state, &self.config.game).despawn(entity)?;
        info!(%entity, name = occupant.name(), "despawned");
        Ok(occupant)
    }
}

#[cfg(test)]
mod tests {
    use delve_content::MapLoader;
    use delve_core::{TerrainRegistry, Tick};

    use super::*;
    use crate::policy::IdlePolicy;

    fn session(rows: &str) -> Session {
        let state = MapLoader::parse(rows, &TerrainRegistry::standard()).unwrap();
        Session::new_game(state, RuntimeConfig::default())
            .unwrap()
            .with_policy(IdlePolicy)
    }

    fn texts(session: &Session) -> Vec<String> {
        session.messages().iter().map(|entry| entry.text.clone()).collect()
    }

    #[test]
    fn new_game_requires_a_player() {
        let state = MapLoader::parse("...", &TerrainRegistry::standard()).unwrap();
        assert!(matches!(
            Session::new_game(state, RuntimeConfig::default()),
            Err(RuntimeError::NoPlayer)
        ));
    }

    #[test]
    fn log_opens_with_new_game() {
        let session = session("@..");
        assert_eq!(texts(&session), vec![NEW_GAME.to_string()]);
    }

    #[test]
    fn click_walks_to_the_target() {
        let mut session = session("#####\n#@..#\n#...#\n#####");
        session.click(Position::new(3, 2));
        let poll = session.run_until_input().unwrap();

        assert!(poll.awaiting_input);
        assert_eq!(session.player_position(), Some(Position::new(3, 2)));
        assert_eq!(
            texts(&session),
            vec![
                NEW_GAME.to_string(),
                "Going to (3,2)".to_string(),
                "Arrived at (3,2)".to_string(),
            ]
        );
        assert!(!session.has_pending_commands());
    }

    #[test]
    fn npcs_act_between_player_turns() {
        let mut state = MapLoader::parse(".....\n.@...\n.....", &TerrainRegistry::standard())
            .unwrap();
        let rat = state
            .spawn(
                Position::new(4, 2),
                delve_core::ActorState::npc("rat", 'r', Position::ORIGIN, Orientation::NORTH),
            )
            .unwrap();
        let mut session = Session::new_game(state, RuntimeConfig::default())
            .unwrap()
            .with_policy(IdlePolicy);

        session.advance();
        session.advance();
        let poll = session.run_until_input().unwrap();
        let actors: Vec<EntityId> = poll
            .outcomes
            .iter()
            .map(|outcome| match outcome {
                TurnOutcome::Acted { actor, .. } => *actor,
                other => panic!("unexpected outcome {other:?}"),
            })
            .collect();

        assert_eq!(actors, vec![EntityId::PLAYER, rat, EntityId::PLAYER, rat]);
        assert_eq!(session.player_position(), Some(Position::new(3, 1)));
        assert_eq!(session.state().turn.clock, Tick(2));
    }

    #[test]
    fn failed_action_is_reported_to_the_log() {
        let mut session = session("#@#");
        session.advance();
        let poll = session.run_until_input().unwrap();
        assert!(matches!(poll.outcomes[..], [TurnOutcome::Failed { .. }]));
        assert!(texts(&session)[1].starts_with("Cannot advance into (2,0)"));
    }

    #[test]
    fn budget_caps_a_poll() {
        let state = MapLoader::parse("@....", &TerrainRegistry::standard()).unwrap();
        let config = RuntimeConfig {
            max_steps_per_poll: 2,
            ..RuntimeConfig::default()
        };
        let mut session = Session::new_game(state, config).unwrap();
        session.issue(Command::sequence(vec![Action::turn(EntityId::PLAYER, true); 5]));

        let poll = session.run_until_input().unwrap();
        assert!(!poll.awaiting_input);
        assert_eq!(poll.outcomes.len(), 2);
        assert!(session.has_pending_commands());

        session.interrupt();
        assert!(session.run_until_input().unwrap().awaiting_input);
    }

    #[test]
    fn doors_open_from_an_adjacent_cell() {
        let mut session = session("#####\n#@+.#\n#####");
        assert!(!session.operate_door(Orientation::SOUTH, true));
        assert!(session.operate_door(Orientation::EAST, true));
        session.run_until_input().unwrap();
        assert!(session.state().is_passable(Position::new(2, 1)));

        session.walk(Orientation::EAST);
        session.run_until_input().unwrap();
        assert_eq!(session.player_position(), Some(Position::new(2, 1)));
    }

    #[test]
    fn look_remembers_what_was_seen() {
        let mut session = session("#####\n#@+.#\n#####");
        let visible = session.look().unwrap();
        assert!(visible.iter().any(|(position, _)| *position == Position::new(2, 1)));

        let map = &session.state().map;
        assert!(map.is_seen(Position::new(1, 1)));
        assert!(map.is_seen(Position::new(2, 1)));
        assert!(!map.is_seen(Position::new(3, 1)));
    }

    #[test]
    fn save_and_restore_keep_the_layout() {
        let session = session("#####\n#@+.#\n#####");
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("save.ron");
        session.save(&path).unwrap();

        let restored = Session::restore(&path, RuntimeConfig::default()).unwrap();
        assert_eq!(restored.player_position(), Some(Position::new(1, 1)));
        assert_eq!(
            restored.state().export_cells().unwrap(),
            session.state().export_cells().unwrap()
        );
    }

    #[test]
    fn despawned_actor_leaves_the_schedule() {
        let mut state = MapLoader::parse("@..", &TerrainRegistry::standard()).unwrap();
        let rat = state
            .spawn(
                Position::new(2, 0),
                delve_core::ActorState::npc("rat", 'r', Position::ORIGIN, Orientation::WEST),
            )
            .unwrap();
        let mut session = Session::new_game(state, RuntimeConfig::default()).unwrap();

        session.despawn(rat).unwrap();
        assert!(!session.state().turn.is_scheduled(rat));
        assert!(session.state().map.occupants(Position::new(2, 0)).is_empty());
    }

    #[test]
    fn player_cannot_be_despawned() {
        let mut session = session("@..");
        assert!(matches!(
            session.despawn(EntityId::PLAYER),
            Err(RuntimeError::PlayerDespawn)
        ));
        assert_eq!(session.player_position(), Some(Position::ORIGIN));
        assert!(session.state().turn.is_scheduled(EntityId::PLAYER));
    }
}
