//! ASCII map loader.
//!
//! One text line per map row, one character per cell. Short rows are padded
//! with spaces (void) up to the widest row. Characters resolve through a
//! [`TerrainRegistry`]:
//! - terrain glyphs set the cell's terrain, unknown ones become void
//! - feature glyphs put the registry's underlay terrain down and place the
//!   feature on top (doors get their axis from the surrounding walls)
//! - `@` marks the player start on underlay terrain

use std::path::Path;

use delve_core::{
    ActorState, FeatureGlyph, GameState, GridMap, MapDimensions, Orientation, Position,
    TerrainRegistry,
};

use crate::loaders::{LoadResult, read_file};

const PLAYER_START: char = '@';

/// Loader for ASCII map files.
pub struct MapLoader;

impl MapLoader {
    /// Load a map from a text file.
    pub fn load(path: &Path, registry: &TerrainRegistry) -> LoadResult<GameState> {
        let content = read_file(path)?;
        Self::parse(&content, registry)
            .map_err(|e| anyhow::anyhow!("Failed to load map {}: {}", path.display(), e))
    }

    /// Build a game state from ASCII rows.
    ///
    /// Occupants are spawned in row-major order, so a player start always
    /// precedes the features below and to the right of it. A trailing blank
    /// line is ignored.
    pub fn parse(text: &str, registry: &TerrainRegistry) -> LoadResult<GameState> {
        let mut rows: Vec<&str> = text.lines().collect();
        if rows.last().is_some_and(|row| row.trim().is_empty()) {
            rows.pop();
        }
        let width = rows.iter().map(|row| row.chars().count()).max().unwrap_or(0);
        if width == 0 {
            return Err(anyhow::anyhow!("Map has no cells"));
        }

        let dimensions = MapDimensions::new(
            u32::try_from(width).map_err(|_| anyhow::anyhow!("Map is too wide: {width}"))?,
            u32::try_from(rows.len())
                .map_err(|_| anyhow::anyhow!("Map is too tall: {}", rows.len()))?,
        );
        let mut map = GridMap::new(dimensions);
        let mut placements = Vec::new();

        for (y, row) in rows.iter().enumerate() {
            let padded = row.chars().chain(std::iter::repeat(' ')).take(width);
            for (x, glyph) in padded.enumerate() {
                let position = Position::new(x as i32, y as i32);
                let terrain = if glyph == PLAYER_START {
                    placements.push((position, Placement::Player));
                    registry.underlay()
                } else if let Some(feature) = registry.feature_for_glyph(glyph) {
                    placements.push((position, Placement::Feature(feature.clone())));
                    registry.underlay()
                } else {
                    registry.terrain_for_glyph(glyph)
                };
                map.set_terrain(position, terrain)?;
            }
        }

        // Terrain must be complete before doors look at their neighbours.
        let mut state = GameState::new(map);
        for (position, placement) in placements {
            match placement {
                Placement::Player => {
                    state
                        .spawn(position, ActorState::player(position, Orientation::EAST))
                        .map_err(|e| anyhow::anyhow!("Invalid player start: {}", e))?;
                }
                Placement::Feature(FeatureGlyph::Door { closed }) => {
                    state.place_door(position, closed, false)?;
                }
                Placement::Feature(FeatureGlyph::Feature(feature)) => {
                    state.spawn(position, feature)?;
                }
            }
        }

        Ok(state)
    }
}

enum Placement {
    Player,
    Feature(FeatureGlyph),
}
