//! Structural export and import of a whole map.
//!
//! Every distinct (terrain, occupant stack) combination becomes one display
//! character in a multi-line grid, with a legend mapping the character back
//! to its contents. The seen memory travels alongside as a `*`/`.` grid.
//! No file I/O happens here; persistence belongs to the content loaders.
use std::collections::{BTreeMap, HashMap};

use crate::env::{MapDimensions, TerrainType};
use crate::error::{ErrorSeverity, GameError};

use super::{GameState, GridMap, MapError, Occupant, Position};

const SEEN: char = '*';
const UNSEEN: char = '.';

/// What one legend character stands for.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellLegend {
    pub terrain: TerrainType,
    /// Occupants bottom to top, in list order.
    #[cfg_attr(feature = "serde", serde(default))]
    pub occupants: Vec<Occupant>,
}

/// Result of [`GameState::export_cells`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellExport {
    pub legend: BTreeMap<char, CellLegend>,
    /// One line per row, one legend character per cell.
    pub grid: String,
    /// Same shape as `grid`; `*` marks cells the player has seen. Empty when
    /// nothing has been seen yet.
    #[cfg_attr(feature = "serde", serde(default))]
    pub seen: String,
}

/// Errors raised while rebuilding a map from a [`CellExport`].
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("glyph {glyph:?} at {position} has no legend entry")]
    UnknownGlyph { glyph: char, position: Position },

    #[error("seen grid does not match the {dimensions} cell grid")]
    SeenShape { dimensions: MapDimensions },

    #[error("grid of {width}x{height} cells is too large")]
    TooLarge { width: usize, height: usize },

    #[error(transparent)]
    Map(#[from] MapError),
}

impl GameError for ImportError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Map(error) => error.severity(),
            _ => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::RaggedRow { .. } => "IMPORT_RAGGED_ROW",
            Self::UnknownGlyph { .. } => "IMPORT_UNKNOWN_GLYPH",
            Self::SeenShape { .. } => "IMPORT_SEEN_SHAPE",
            Self::TooLarge { .. } => "IMPORT_TOO_LARGE",
            Self::Map(error) => error.error_code(),
        }
    }
}

/// Characters handed out when a cell's natural glyph is already taken.
fn fallback_glyphs() -> impl Iterator<Item = char> {
    ('!'..='~').chain(
        ('\u{a1}'..=char::MAX).filter(|glyph| !glyph.is_control() && !glyph.is_whitespace()),
    )
}

impl GameState {
    /// Exports terrain, occupants and seen memory as a legend plus grids.
    ///
    /// A cell's character is its top occupant's glyph, or its terrain glyph
    /// when empty, unless that character already names a different
    /// combination.
    pub fn export_cells(&self) -> Result<CellExport, MapError> {
        let dimensions = self.map.dimensions();
        let mut legend = BTreeMap::new();
        let mut assigned: HashMap<CellLegend, char> = HashMap::new();
        let mut fallback = fallback_glyphs();
        let mut grid = String::with_capacity(dimensions.area() + dimensions.height as usize);

        for position in dimensions.positions() {
            if position.x == 0 && position.y > 0 {
                grid.push('\n');
            }
            let cell = CellLegend {
                terrain: self.map.terrain(position)?.clone(),
                occupants: self
                    .occupants(position)
                    .map(|(_, occupant)| detached(occupant))
                    .collect(),
            };
            let glyph = match assigned.get(&cell) {
                Some(glyph) => *glyph,
                None => {
                    let preferred = cell
                        .occupants
                        .last()
                        .map(Occupant::glyph)
                        .unwrap_or(cell.terrain.glyph);
                    let glyph = if legend.contains_key(&preferred) || preferred == '\n' {
                        fallback
                            .find(|glyph| !legend.contains_key(glyph))
                            .ok_or(MapError::GlyphsExhausted { used: legend.len() })?
                    } else {
                        preferred
                    };
                    legend.insert(glyph, cell.clone());
                    assigned.insert(cell, glyph);
                    glyph
                }
            };
            grid.push(glyph);
        }

        Ok(CellExport {
            legend,
            grid,
            seen: self.export_seen(),
        })
    }

    fn export_seen(&self) -> String {
        if !self.map.dimensions().positions().any(|p| self.map.is_seen(p)) {
            return String::new();
        }
        self.map
            .dimensions()
            .positions()
            .fold(String::new(), |mut out, position| {
                if position.x == 0 && position.y > 0 {
                    out.push('\n');
                }
                out.push(if self.map.is_seen(position) { SEEN } else { UNSEEN });
                out
            })
    }

    /// Rebuilds a state from an export.
    ///
    /// Occupants receive fresh ids in row-major order, bottom to top within
    /// a cell; the player keeps the reserved id. The turn timeline starts
    /// empty.
    pub fn import_cells(export: &CellExport) -> Result<GameState, ImportError> {
        let rows: Vec<Vec<char>> = if export.grid.is_empty() {
            Vec::new()
        } else {
            export.grid.split('\n').map(|row| row.chars().collect()).collect()
        };
        let width = rows.first().map_or(0, Vec::len);
        for (row, cells) in rows.iter().enumerate() {
            if cells.len() != width {
                return Err(ImportError::RaggedRow {
                    row,
                    expected: width,
                    found: cells.len(),
                });
            }
        }
        let too_large = || ImportError::TooLarge {
            width,
            height: rows.len(),
        };
        let dimensions = MapDimensions::new(
            u32::try_from(width).map_err(|_| too_large())?,
            u32::try_from(rows.len()).map_err(|_| too_large())?,
        );

        let mut state = GameState::new(GridMap::new(dimensions));
        for (position, glyph) in dimensions
            .positions()
            .zip(rows.iter().flat_map(|row| row.iter().copied()))
        {
            let cell = export
                .legend
                .get(&glyph)
                .ok_or(ImportError::UnknownGlyph { glyph, position })?;
            state.map.set_terrain(position, &cell.terrain)?;
            for occupant in &cell.occupants {
                state.spawn(position, occupant.clone())?;
            }
        }

        if !export.seen.is_empty() {
            let seen: Vec<&str> = export.seen.split('\n').collect();
            if seen.len() != rows.len() || seen.iter().any(|row| row.chars().count() != width) {
                return Err(ImportError::SeenShape { dimensions });
            }
            for (position, mark) in dimensions.positions().zip(seen.iter().flat_map(|row| row.chars())) {
                if mark == SEEN {
                    state.map.mark_seen(position);
                }
            }
        }

        Ok(state)
    }
}

/// Copy of an occupant with its actor position cleared, so identical
/// occupants on different cells share one legend entry. `spawn` puts the
/// position back on import.
fn detached(occupant: &Occupant) -> Occupant {
    let mut occupant = occupant.clone();
    if let Occupant::Actor(actor) = &mut occupant {
        actor.position = Position::ORIGIN;
    }
    occupant
}
