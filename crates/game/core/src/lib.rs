//! Deterministic game rules shared by the runtime and tools.
//!
//! `delve-core` defines the canonical world model (grid map, terrain
//! palette, occupants, turn timeline), the spatial queries over it (field of
//! view, pathfinding), and the pipeline that changes it: commands produce
//! actions, and every action runs through [`engine::GameEngine`]. Nothing in
//! this crate performs I/O or logging.
pub mod action;
pub mod command;
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod fov;
pub mod message;
pub mod pathfinding;
pub mod state;

pub use action::{
    Action, ActionError, ActionKind, ActionTransition, AdvanceAction, CloseDoorAction,
    OpenDoorAction, TurnAction,
};
pub use command::{ActionSequence, Command, CommandQueue, CommandStep, GoTo, TurnAndGo};
pub use config::{ActionCosts, GameConfig};
pub use engine::{
    ActionFailure, DecisionPolicy, ExecuteError, GameEngine, TransitionPhase, TransitionPhaseError,
    TurnError, TurnOutcome,
};
pub use env::{FeatureGlyph, MapDimensions, TerrainRegistry, TerrainType};
pub use error::{ErrorSeverity, GameError};
pub use fov::{Visible, compute_visible, visible_positions};
pub use message::{MessageSink, NullSink};
pub use pathfinding::{Path, PathError, find_path, find_path_in};
pub use state::{
    ActorKind, ActorState, CellExport, CellLegend, DoorAxis, DoorState, EntitiesState, EntityId,
    FeatureState, GameState, GridMap, ImportError, MapError, Occupant, Orientation, Position,
    ScheduledTurn, Tick, TileView, TurnState,
};
