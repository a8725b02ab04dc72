//! Authoritative game state representation.
//!
//! [`GameState`] is the single ownership root: it owns the grid, every
//! occupant (through [`EntitiesState`]) and the turn timeline. Cells refer
//! to occupants by [`EntityId`]; actors record their own position, and the
//! two always agree.
mod cells;
mod common;
mod entities;
mod error;
mod turn;
mod world;

use std::collections::BTreeSet;

pub use cells::{CellExport, CellLegend, ImportError};
pub use common::{EntityId, Orientation, Position, Tick};
pub use entities::{
    ActorKind, ActorState, DoorAxis, DoorState, EntitiesState, FeatureState, Occupant,
};
pub use error::MapError;
pub use turn::{ScheduledTurn, TurnState};
pub use world::{GridMap, TerrainIndex, TileView};

use crate::env::TerrainType;

/// Canonical snapshot of the game world.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameState {
    /// Terrain grid, occupancy lists and seen memory.
    pub map: GridMap,
    /// Every occupant, keyed by id.
    pub entities: EntitiesState,
    /// Clock and pending turns.
    pub turn: TurnState,
}

impl GameState {
    pub fn new(map: GridMap) -> Self {
        Self {
            map,
            entities: EntitiesState::new(),
            turn: TurnState::new(),
        }
    }

    pub fn terrain(&self, position: Position) -> Result<&TerrainType, MapError> {
        self.map.terrain(position)
    }

    /// Terrain plus resolved occupants of one cell.
    pub fn tile_view(&self, position: Position) -> Result<TileView<'_>, MapError> {
        let terrain = self.map.terrain(position)?;
        Ok(TileView::new(position, terrain, self.occupants(position).collect()))
    }

    /// Occupants at `position` in list order.
    pub fn occupants(&self, position: Position) -> impl Iterator<Item = (EntityId, &Occupant)> {
        self.map
            .occupants(position)
            .iter()
            .filter_map(|id| self.entities.get(*id).map(|occupant| (*id, occupant)))
    }

    /// False for impassable terrain, any impassable occupant, or a cell
    /// outside the map.
    pub fn is_passable(&self, position: Position) -> bool {
        self.tile_view(position)
            .map(|view| view.is_passable())
            .unwrap_or(false)
    }

    /// True for opaque terrain, any opaque occupant, or a cell outside the map.
    pub fn is_opaque(&self, position: Position) -> bool {
        self.tile_view(position)
            .map(|view| view.is_opaque())
            .unwrap_or(true)
    }

    /// Where an occupant currently is. Actors answer from their own record,
    /// everything else is looked up in the occupancy lists.
    pub fn position_of(&self, entity: EntityId) -> Option<Position> {
        match self.entities.get(entity)? {
            Occupant::Actor(actor) => Some(actor.position),
            _ => self.map.locate(entity),
        }
    }

    /// Deduplicated snapshot of every placed occupant matching `predicate`.
    pub fn all_objects<F>(&self, mut predicate: F) -> BTreeSet<EntityId>
    where
        F: FnMut(EntityId, &Occupant) -> bool,
    {
        self.map
            .occupancy()
            .flat_map(|(_, ids)| ids.iter().copied())
            .filter(|id| {
                self.entities
                    .get(*id)
                    .is_some_and(|occupant| predicate(*id, occupant))
            })
            .collect()
    }

    /// Places a new occupant at `position` and returns its id.
    ///
    /// Actors have their recorded position overwritten with `position`.
    pub fn spawn(
        &mut self,
        position: Position,
        occupant: impl Into<Occupant>,
    ) -> Result<EntityId, MapError> {
        let mut occupant = occupant.into();
        if !self.map.contains(position) {
            return Err(MapError::OutOfBounds {
                position,
                dimensions: self.map.dimensions(),
            });
        }
        if let Occupant::Actor(actor) = &mut occupant {
            if actor.is_player() {
                if let Some(existing) = self.player() {
                    return Err(MapError::PlayerExists(existing.position));
                }
            }
            actor.position = position;
        }
        let id = self.entities.insert(occupant);
        self.map.add_occupant(position, id)?;
        Ok(id)
    }

    /// Places a door whose axis is inferred from the surrounding terrain.
    pub fn place_door(
        &mut self,
        position: Position,
        closed: bool,
        locked: bool,
    ) -> Result<EntityId, MapError> {
        let mut door = DoorState::new(self.map.infer_door_axis(position), closed);
        door.locked = locked;
        self.spawn(position, door)
    }

    /// Removes an occupant from its cell and from the arena.
    pub fn despawn(&mut self, entity: EntityId) -> Result<Occupant, MapError> {
        let position = self
            .position_of(entity)
            .ok_or(MapError::EntityNotFound(entity))?;
        self.map.remove_occupant(position, entity);
        self.entities
            .remove(entity)
            .ok_or(MapError::EntityNotFound(entity))
    }

    pub fn player(&self) -> Option<&ActorState> {
        self.entities.player()
    }

    /// Folds a set of visible cells into the seen memory.
    pub fn remember<I>(&mut self, cells: I)
    where
        I: IntoIterator<Item = Position>,
    {
        for position in cells {
            self.map.mark_seen(position);
        }
    }
}
