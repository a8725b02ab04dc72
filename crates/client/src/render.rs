//! ASCII rendering of the player's view.
use std::collections::HashMap;

use delve_core::{GameState, Position, Visible};

/// Glyph per visible cell: the top occupant if any, else the terrain.
pub fn visible_glyphs<'a>(
    visible: impl IntoIterator<Item = (Position, Visible<'a>)>,
) -> HashMap<Position, char> {
    let mut glyphs = HashMap::new();
    // terrain comes first and occupants bottom to top, so the last write wins
    for (position, seen) in visible {
        let glyph = match seen {
            Visible::Terrain(terrain) => terrain.glyph,
            Visible::Occupant(_, occupant) => occupant.glyph(),
        };
        glyphs.insert(position, glyph);
    }
    glyphs
}

/// Draws the map: visible cells in full, remembered cells as bare terrain,
/// everything else blank.
pub fn render_map(state: &GameState, glyphs: &HashMap<Position, char>) -> String {
    let dimensions = state.map.dimensions();
    let mut out = String::with_capacity(dimensions.area() + dimensions.height as usize);
    for y in 0..dimensions.height as i32 {
        if y > 0 {
            out.push('\n');
        }
        let row_start = out.len();
        for x in 0..dimensions.width as i32 {
            let position = Position::new(x, y);
            let glyph = match glyphs.get(&position) {
                Some(glyph) => *glyph,
                None if state.map.is_seen(position) => state
                    .terrain(position)
                    .map_or(' ', |terrain| terrain.glyph),
                None => ' ',
            };
            out.push(glyph);
        }
        let trimmed = out[row_start..].trim_end().len();
        out.truncate(row_start + trimmed);
    }
    out
}
