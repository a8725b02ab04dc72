use delve_core::{
    Action, ActorState, Command, CommandQueue, DecisionPolicy, EntityId, GameConfig, GameEngine,
    GameState, GridMap, MapDimensions, Orientation, PathError, Position, TerrainRegistry, Tick,
    TurnOutcome, find_path_in,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

struct AlwaysTurn;

impl DecisionPolicy for AlwaysTurn {
    fn decide(&mut self, actor: EntityId, _state: &GameState) -> Action {
        Action::turn(actor, true)
    }
}

/// Builds a state from terrain rows; `+` places a closed door on floor.
fn level(rows: &[&str]) -> GameState {
    let registry = TerrainRegistry::standard();
    let dimensions = MapDimensions::new(rows[0].len() as u32, rows.len() as u32);
    let mut map = GridMap::new(dimensions);
    let mut doors = Vec::new();
    for (y, row) in rows.iter().enumerate() {
        for (x, glyph) in row.chars().enumerate() {
            let position = Position::new(x as i32, y as i32);
            let terrain = if glyph == '+' {
                doors.push(position);
                registry.underlay()
            } else {
                registry.terrain_for_glyph(glyph)
            };
            map.set_terrain(position, terrain).unwrap();
        }
    }
    let mut state = GameState::new(map);
    for position in doors {
        state.place_door(position, true, true).unwrap();
    }
    state
}

fn open_room(size: usize) -> GameState {
    let row = ".".repeat(size);
    let rows: Vec<&str> = (0..size).map(|_| row.as_str()).collect();
    level(&rows)
}

/// Steps until the player needs input, returning every outcome on the way.
fn run_until_input(
    state: &mut GameState,
    commands: &mut CommandQueue,
    messages: &mut Vec<String>,
) -> Vec<TurnOutcome> {
    let config = GameConfig::default();
    let mut engine = GameEngine::new(state, &config);
    let mut outcomes = Vec::new();
    for _ in 0..100 {
        let outcome = engine.step(commands, &mut AlwaysTurn, messages).unwrap();
        if outcome == TurnOutcome::AwaitingInput {
            return outcomes;
        }
        outcomes.push(outcome);
    }
    panic!("player never ran out of actions");
}

#[test]
fn turn_and_go_turns_the_short_way_then_advances_once() {
    let mut state = open_room(5);
    let player = state
        .spawn(Position::new(0, 0), ActorState::player(Position::ORIGIN, Orientation::EAST))
        .unwrap();
    GameEngine::new(&mut state, &GameConfig::default())
        .activate(player)
        .unwrap();

    let mut commands = CommandQueue::new();
    commands.issue(Command::turn_and_go(player, Orientation::SOUTH));
    let mut messages = Vec::new();
    let actions: Vec<Action> = run_until_input(&mut state, &mut commands, &mut messages)
        .into_iter()
        .map(|outcome| match outcome {
            TurnOutcome::Acted { action, .. } => action,
            other => panic!("unexpected outcome {other:?}"),
        })
        .collect();

    assert_eq!(
        actions,
        vec![
            Action::turn(player, true),
            Action::turn(player, true),
            Action::advance(player),
        ]
    );
    let actor = state.player().unwrap();
    assert_eq!(actor.orientation, Orientation::SOUTH);
    assert_eq!(actor.position, Position::new(0, 1));
    assert_eq!(state.turn.clock, Tick(3));
}

#[test]
fn go_to_behind_locked_door_stops_at_closest_cell() {
    let mut state = level(&["#######", "#..+..#", "#######"]);
    let player = state
        .spawn(Position::new(1, 1), ActorState::player(Position::ORIGIN, Orientation::EAST))
        .unwrap();
    GameEngine::new(&mut state, &GameConfig::default())
        .activate(player)
        .unwrap();

    let mut commands = CommandQueue::new();
    commands.issue(Command::go_to(player, Position::new(5, 1)));
    let mut messages = Vec::new();
    run_until_input(&mut state, &mut commands, &mut messages);

    assert_eq!(state.player().unwrap().position, Position::new(2, 1));
    assert!(commands.is_empty());
    assert_eq!(
        messages,
        vec![
            "No path to (5,1); getting as close as possible".to_string(),
            "Cannot get any closer to (5,1)".to_string(),
        ]
    );
}

#[test]
fn go_to_walks_around_corners_and_announces_arrival() {
    let mut state = level(&["#####", "#...#", "###.#", "#...#", "#####"]);
    let player = state
        .spawn(Position::new(1, 1), ActorState::player(Position::ORIGIN, Orientation::NORTH))
        .unwrap();
    GameEngine::new(&mut state, &GameConfig::default())
        .activate(player)
        .unwrap();

    let mut commands = CommandQueue::new();
    commands.issue(Command::go_to(player, Position::new(1, 3)));
    let mut messages = Vec::new();
    run_until_input(&mut state, &mut commands, &mut messages);

    assert_eq!(state.player().unwrap().position, Position::new(1, 3));
    assert_eq!(messages, vec!["Arrived at (1,3)".to_string()]);
}

#[test]
fn equal_duration_actors_interleave_fairly() {
    fn run() -> (Vec<EntityId>, usize, usize) {
        let mut state = open_room(6);
        let player = state
            .spawn(Position::new(1, 1), ActorState::player(Position::ORIGIN, Orientation::EAST))
            .unwrap();
        let rat = state
            .spawn(
                Position::new(4, 4),
                ActorState::npc("rat", 'r', Position::ORIGIN, Orientation::WEST),
            )
            .unwrap();
        let config = GameConfig::default();
        let mut engine = GameEngine::new(&mut state, &config);
        engine.activate(rat).unwrap();
        engine.activate(player).unwrap();

        let mut commands = CommandQueue::new();
        commands.issue(Command::sequence(vec![Action::turn(player, false); 20]));
        let mut order = Vec::new();
        for _ in 0..9 {
            match engine
                .step(&mut commands, &mut AlwaysTurn, &mut Vec::<String>::new())
                .unwrap()
            {
                TurnOutcome::Acted { actor, .. } => order.push(actor),
                other => panic!("unexpected outcome {other:?}"),
            }
        }
        let by_player = order.iter().filter(|id| id.is_player()).count();
        let by_rat = order.iter().filter(|id| **id == rat).count();
        (order, by_player, by_rat)
    }

    let (order, by_player, by_rat) = run();
    assert_eq!(by_player, 5);
    assert_eq!(by_rat, 4);
    assert_eq!(order[0], EntityId::PLAYER);
    assert_eq!(run().0, order);
}

#[test]
fn advance_either_relocates_exactly_or_changes_nothing() {
    let mut state = level(&[
        "########",
        "#......#",
        "#..#...#",
        "#......#",
        "#...+..#",
        "########",
    ]);
    let player = state
        .spawn(Position::new(1, 1), ActorState::player(Position::ORIGIN, Orientation::EAST))
        .unwrap();
    state
        .spawn(
            Position::new(5, 3),
            ActorState::npc("statue", 'S', Position::ORIGIN, Orientation::NORTH),
        )
        .unwrap();
    let config = GameConfig::default();
    let mut rng = ChaCha8Rng::seed_from_u64(7);

    for _ in 0..300 {
        let action = match rng.gen_range(0..3) {
            0 => Action::turn(player, true),
            1 => Action::turn(player, false),
            _ => Action::advance(player),
        };
        let before = state.clone();
        let origin = before.player().unwrap().position;
        let heading = before.player().unwrap().orientation;

        let result = GameEngine::new(&mut state, &config).execute_unscheduled(&action);
        let actor = state.player().unwrap();
        match (action, result) {
            (Action::Advance(_), Ok(_)) => {
                assert_eq!(actor.position, origin.step(heading));
                assert!(!state.map.occupants(origin).contains(&player));
                assert_eq!(state.map.occupants(actor.position).last(), Some(&player));
            }
            (_, Err(_)) => assert_eq!(state, before),
            (_, Ok(_)) => assert_eq!(actor.position, origin),
        }
        let listed: Vec<Position> = state
            .map
            .occupancy()
            .filter(|(_, ids)| ids.contains(&player))
            .map(|(position, _)| position)
            .collect();
        assert_eq!(listed, vec![actor.position]);
        assert!(actor.orientation.index() < 8);
    }
}

#[test]
fn door_open_close_round_trip_restores_closed_state() {
    let mut state = level(&["...", "...", "..."]);
    let at = Position::new(1, 1);
    let door = state.place_door(at, true, false).unwrap();
    let player = state
        .spawn(Position::new(0, 1), ActorState::player(Position::ORIGIN, Orientation::EAST))
        .unwrap();
    let original = *state.entities.door(door).unwrap();
    let config = GameConfig::default();
    let mut engine = GameEngine::new(&mut state, &config);

    engine
        .execute_unscheduled(&Action::open_door(player, door, at))
        .unwrap();
    assert!(engine.execute_unscheduled(&Action::open_door(player, door, at)).is_err());
    engine
        .execute_unscheduled(&Action::close_door(player, door, at))
        .unwrap();
    assert!(engine.execute_unscheduled(&Action::close_door(player, door, at)).is_err());

    assert_eq!(*state.entities.door(door).unwrap(), original);
}

#[test]
fn open_room_path_is_straight() {
    let state = open_room(5);
    let path = find_path_in(&state, Position::new(0, 0), Position::new(3, 0)).unwrap();
    assert_eq!(path.cost, 3.0);
    assert_eq!(path.len(), 4);
}

#[test]
fn walled_off_goal_yields_best_effort_path() {
    let state = level(&[
        ".......",
        "....###",
        "....#..",
        "....###",
        ".......",
    ]);
    let goal = Position::new(5, 2);
    let Err(PathError::NoPath { best_effort, .. }) =
        find_path_in(&state, Position::new(0, 2), goal)
    else {
        panic!("goal should be unreachable");
    };
    assert_eq!(best_effort.last(), Some(Position::new(3, 2)));
    assert_eq!(best_effort.cost, 3.0);
}
