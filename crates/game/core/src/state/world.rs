use std::collections::{BTreeMap, HashMap};
use std::fmt;

use crate::env::{MapDimensions, TerrainType};

use super::{DoorAxis, EntityId, MapError, Occupant, Position};

/// Index into a map's terrain palette.
pub type TerrainIndex = u16;

/// Dense terrain grid plus per-cell occupant lists.
///
/// Terrain is stored as a palette index per cell; the palette always starts
/// with `void` and grows the first time a new terrain kind is set. Occupant
/// lists are created lazily: a cell with no entry holds nothing. List order
/// is insertion order and never contains the same id twice.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GridMap {
    dimensions: MapDimensions,
    palette: Vec<TerrainType>,
    palette_index: HashMap<TerrainType, TerrainIndex>,
    cells: Vec<TerrainIndex>,
    occupancy: BTreeMap<Position, Vec<EntityId>>,
    seen: Vec<bool>,
}

impl GridMap {
    /// A map of the given size filled with `void`.
    pub fn new(dimensions: MapDimensions) -> Self {
        let void = TerrainType::void();
        let mut palette_index = HashMap::new();
        palette_index.insert(void.clone(), 0);
        Self {
            dimensions,
            palette: vec![void],
            palette_index,
            cells: vec![0; dimensions.area()],
            occupancy: BTreeMap::new(),
            seen: vec![false; dimensions.area()],
        }
    }

    pub fn dimensions(&self) -> MapDimensions {
        self.dimensions
    }

    pub fn width(&self) -> u32 {
        self.dimensions.width
    }

    pub fn height(&self) -> u32 {
        self.dimensions.height
    }

    pub fn contains(&self, position: Position) -> bool {
        self.dimensions.contains(position)
    }

    fn index(&self, position: Position) -> Result<usize, MapError> {
        self.dimensions
            .index_of(position)
            .ok_or(MapError::OutOfBounds {
                position,
                dimensions: self.dimensions,
            })
    }

    pub fn terrain(&self, position: Position) -> Result<&TerrainType, MapError> {
        let index = self.index(position)?;
        Ok(&self.palette[self.cells[index] as usize])
    }

    /// Palette slot of the terrain at `position`.
    pub fn terrain_index(&self, position: Position) -> Result<TerrainIndex, MapError> {
        let index = self.index(position)?;
        Ok(self.cells[index])
    }

    /// Sets the terrain at `position`, adding the kind to the palette if unseen.
    pub fn set_terrain(&mut self, position: Position, terrain: &TerrainType) -> Result<(), MapError> {
        let index = self.index(position)?;
        let slot = self.intern(terrain)?;
        self.cells[index] = slot;
        Ok(())
    }

    fn intern(&mut self, terrain: &TerrainType) -> Result<TerrainIndex, MapError> {
        if let Some(slot) = self.palette_index.get(terrain) {
            return Ok(*slot);
        }
        let slot = TerrainIndex::try_from(self.palette.len()).map_err(|_| MapError::PaletteFull {
            len: self.palette.len(),
        })?;
        self.palette.push(terrain.clone());
        self.palette_index.insert(terrain.clone(), slot);
        Ok(slot)
    }

    /// Distinct terrain kinds in first-use order; index 0 is `void`.
    pub fn palette(&self) -> &[TerrainType] {
        &self.palette
    }

    /// Ids at `position` in insertion order. Empty for unoccupied or
    /// out-of-bounds cells.
    pub fn occupants(&self, position: Position) -> &[EntityId] {
        self.occupancy
            .get(&position)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Appends `entity` to the cell's list. Returns `false` if it was already there.
    pub fn add_occupant(&mut self, position: Position, entity: EntityId) -> Result<bool, MapError> {
        self.index(position)?;
        let slot = self.occupancy.entry(position).or_default();
        if slot.contains(&entity) {
            return Ok(false);
        }
        slot.push(entity);
        Ok(true)
    }

    /// Removes `entity` from the cell's list, keeping the order of the rest.
    pub fn remove_occupant(&mut self, position: Position, entity: EntityId) -> bool {
        let Some(slot) = self.occupancy.get_mut(&position) else {
            return false;
        };
        let Some(index) = slot.iter().position(|occupant| *occupant == entity) else {
            return false;
        };
        slot.remove(index);
        if slot.is_empty() {
            self.occupancy.remove(&position);
        }
        true
    }

    /// Cell currently listing `entity`, found by scanning occupancy.
    pub fn locate(&self, entity: EntityId) -> Option<Position> {
        self.occupancy
            .iter()
            .find(|(_, slot)| slot.contains(&entity))
            .map(|(position, _)| *position)
    }

    /// Non-empty occupant lists in position order.
    pub fn occupancy(&self) -> impl Iterator<Item = (Position, &[EntityId])> {
        self.occupancy
            .iter()
            .map(|(position, slot)| (*position, slot.as_slice()))
    }

    /// Whether the player has ever seen this cell.
    pub fn is_seen(&self, position: Position) -> bool {
        self.dimensions
            .index_of(position)
            .is_some_and(|index| self.seen[index])
    }

    pub fn mark_seen(&mut self, position: Position) {
        if let Some(index) = self.dimensions.index_of(position) {
            self.seen[index] = true;
        }
    }

    /// Door orientation by majority vote of the four orthogonal neighbours.
    ///
    /// Blocked east/west neighbours mean the door sits in a wall running
    /// east-west. Ties resolve to horizontal. Out-of-bounds counts as blocked.
    pub fn infer_door_axis(&self, position: Position) -> DoorAxis {
        let blocked = |dx: i32, dy: i32| -> u8 {
            let passable = self
                .terrain(position.offset((dx, dy)))
                .map(|terrain| terrain.passable)
                .unwrap_or(false);
            u8::from(!passable)
        };
        let east_west = blocked(1, 0) + blocked(-1, 0);
        let north_south = blocked(0, 1) + blocked(0, -1);
        if east_west >= north_south {
            DoorAxis::Horizontal
        } else {
            DoorAxis::Vertical
        }
    }

    /// Terrain glyph rows, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = String> + '_ {
        let width = self.dimensions.width as usize;
        self.cells.chunks(width.max(1)).map(|row| {
            row.iter()
                .map(|slot| self.palette[*slot as usize].glyph)
                .collect()
        })
    }
}

impl fmt::Display for GridMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Map {} by {}:", self.width(), self.height())?;
        for row in self.rows() {
            write!(f, "\n{row}")?;
        }
        Ok(())
    }
}

/// Merged view of one cell: its terrain and every occupant on it.
pub struct TileView<'a> {
    position: Position,
    terrain: &'a TerrainType,
    occupants: Vec<(EntityId, &'a Occupant)>,
}

impl<'a> TileView<'a> {
    pub(crate) fn new(
        position: Position,
        terrain: &'a TerrainType,
        occupants: Vec<(EntityId, &'a Occupant)>,
    ) -> Self {
        Self {
            position,
            terrain,
            occupants,
        }
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn terrain(&self) -> &'a TerrainType {
        self.terrain
    }

    pub fn occupants(&self) -> impl Iterator<Item = (EntityId, &'a Occupant)> + '_ {
        self.occupants.iter().copied()
    }

    pub fn is_passable(&self) -> bool {
        self.blocker().is_none()
    }

    pub fn is_opaque(&self) -> bool {
        self.terrain.opaque || self.occupants.iter().any(|(_, occupant)| occupant.is_opaque())
    }

    /// Name of whatever stops movement here: the terrain first, then the
    /// first impassable occupant in list order.
    pub fn blocker(&self) -> Option<&'a str> {
        if !self.terrain.passable {
            return Some(self.terrain.name.as_str());
        }
        self.occupants
            .iter()
            .find_map(|&(_, occupant)| (!occupant.is_passable()).then(|| occupant.name()))
    }
}
