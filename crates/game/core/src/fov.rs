//! Field of view by symmetric shadowcasting.
//!
//! The sweep walks four quadrants (each covering two octants) row by row away
//! from the origin, narrowing the visible slope range as opaque cells are
//! met. Slopes are exact integer fractions, so results are symmetric: if `b`
//! is visible from `a`, then `a` is visible from `b` over the same cells.
use std::collections::HashSet;

use crate::env::TerrainType;
use crate::state::{EntityId, GameState, Occupant, Position};

/// One thing reported at a visible cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Visible<'a> {
    Terrain(&'a TerrainType),
    Occupant(EntityId, &'a Occupant),
}

/// Everything visible from `origin`: for each visible cell its terrain, then
/// each occupant in list order.
///
/// `radius` bounds the sweep depth; `None` uses a radius that covers the
/// whole map. Cells are reported once, origin first, in sweep order.
pub fn compute_visible(
    state: &GameState,
    origin: Position,
    radius: Option<u32>,
) -> Vec<(Position, Visible<'_>)> {
    let mut out = Vec::new();
    for position in visible_positions(state, origin, radius) {
        let Ok(view) = state.tile_view(position) else {
            continue;
        };
        out.push((position, Visible::Terrain(view.terrain())));
        out.extend(
            view.occupants()
                .map(|(id, occupant)| (position, Visible::Occupant(id, occupant))),
        );
    }
    out
}

/// In-bounds cells visible from `origin`, without their contents.
pub fn visible_positions(state: &GameState, origin: Position, radius: Option<u32>) -> Vec<Position> {
    let radius = radius.unwrap_or_else(|| state.map.dimensions().sweep_radius());
    let mut out = Vec::new();
    shadowcast(
        origin,
        radius,
        |position| state.is_opaque(position),
        |position| {
            if state.map.contains(position) {
                out.push(position);
            }
        },
    );
    out
}

/// Runs the sweep with caller-supplied opacity and reveal callbacks.
///
/// `reveal` is called at most once per cell, starting with `origin`. Cells
/// for which `is_opaque` answers true are revealed but stop sight; callers
/// should treat anything outside their grid as opaque so the sweep ends.
pub fn shadowcast<O, R>(origin: Position, radius: u32, mut is_opaque: O, mut reveal: R)
where
    O: FnMut(Position) -> bool,
    R: FnMut(Position),
{
    let mut revealed = HashSet::new();
    revealed.insert(origin);
    reveal(origin);

    if radius == 0 {
        return;
    }

    for quadrant in Quadrant::ALL {
        let mut rows = vec![Row::first()];
        while let Some(mut row) = rows.pop() {
            let mut previous: Option<bool> = None;
            for col in row.columns() {
                let position = quadrant.transform(origin, row.depth, col);
                let opaque = is_opaque(position);
                if (opaque || row.is_symmetric(col)) && revealed.insert(position) {
                    reveal(position);
                }
                if previous == Some(true) && !opaque {
                    row.start = Slope::of(row.depth, col);
                }
                if previous == Some(false) && opaque && row.depth < i64::from(radius) {
                    let mut next = row.next();
                    next.end = Slope::of(row.depth, col);
                    rows.push(next);
                }
                previous = Some(opaque);
            }
            if previous == Some(false) && row.depth < i64::from(radius) {
                rows.push(row.next());
            }
        }
    }
}

#[derive(Clone, Copy, Debug)]
enum Quadrant {
    North,
    East,
    South,
    West,
}

impl Quadrant {
    const ALL: [Quadrant; 4] = [Quadrant::North, Quadrant::East, Quadrant::South, Quadrant::West];

    fn transform(self, origin: Position, depth: i64, col: i64) -> Position {
        let (depth, col) = (depth as i32, col as i32);
        match self {
            Quadrant::North => origin.offset((col, -depth)),
            Quadrant::South => origin.offset((col, depth)),
            Quadrant::East => origin.offset((depth, col)),
            Quadrant::West => origin.offset((-depth, col)),
        }
    }
}

/// `num / den` with `den > 0`.
#[derive(Clone, Copy, Debug)]
struct Slope {
    num: i64,
    den: i64,
}

impl Slope {
    const fn new(num: i64, den: i64) -> Self {
        Self { num, den }
    }

    /// Slope through the near edge of the cell at `(depth, col)`.
    const fn of(depth: i64, col: i64) -> Self {
        Self::new(2 * col - 1, 2 * depth)
    }
}

#[derive(Clone, Copy, Debug)]
struct Row {
    depth: i64,
    start: Slope,
    end: Slope,
}

impl Row {
    const fn first() -> Self {
        Self {
            depth: 1,
            start: Slope::new(-1, 1),
            end: Slope::new(1, 1),
        }
    }

    const fn next(self) -> Self {
        Self {
            depth: self.depth + 1,
            ..self
        }
    }

    /// Columns from `round_ties_up(depth * start)` to
    /// `round_ties_down(depth * end)`.
    fn columns(&self) -> std::ops::RangeInclusive<i64> {
        let Slope { num, den } = self.start;
        let min = (2 * self.depth * num + den).div_euclid(2 * den);
        let Slope { num, den } = self.end;
        let max = -(den - 2 * self.depth * num).div_euclid(2 * den);
        min..=max
    }

    fn is_symmetric(&self, col: i64) -> bool {
        col * self.start.den >= self.depth * self.start.num
            && col * self.end.den <= self.depth * self.end.num
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::MapDimensions;
    use crate::state::{ActorState, GridMap, Orientation};

    fn room(rows: &[&str]) -> GameState {
        let height = rows.len() as u32;
        let width = rows[0].len() as u32;
        let mut map = GridMap::new(MapDimensions::new(width, height));
        for (y, row) in rows.iter().enumerate() {
            for (x, glyph) in row.chars().enumerate() {
                let terrain = if glyph == '#' {
                    TerrainType::wall()
                } else {
                    TerrainType::floor()
                };
                map.set_terrain(Position::new(x as i32, y as i32), &terrain)
                    .unwrap();
            }
        }
        GameState::new(map)
    }

    #[test]
    fn open_room_is_fully_visible_without_duplicates() {
        let state = room(&[".....", ".....", ".....", ".....", "....."]);
        let visible = visible_positions(&state, Position::new(2, 2), None);
        assert_eq!(visible[0], Position::new(2, 2));
        assert_eq!(visible.len(), 25);
        let unique: HashSet<_> = visible.iter().collect();
        assert_eq!(unique.len(), 25);
    }

    #[test]
    fn walls_are_seen_but_block_what_lies_behind() {
        let state = room(&[".......", "...#...", ".......", "......."]);
        let visible: HashSet<_> = visible_positions(&state, Position::new(3, 3), None)
            .into_iter()
            .collect();
        assert!(visible.contains(&Position::new(3, 1)));
        assert!(!visible.contains(&Position::new(3, 0)));
        assert!(visible.contains(&Position::new(0, 0)));
    }

    #[test]
    fn visibility_is_symmetric() {
        let state = room(&[
            "........",
            "..#.....",
            "....#...",
            ".#......",
            "......#.",
            "........",
        ]);
        let cells: Vec<_> = state.map.dimensions().positions().collect();
        for &a in &cells {
            if state.is_opaque(a) {
                continue;
            }
            let from_a: HashSet<_> = visible_positions(&state, a, None).into_iter().collect();
            for &b in &cells {
                if state.is_opaque(b) || !from_a.contains(&b) {
                    continue;
                }
                let from_b: HashSet<_> = visible_positions(&state, b, None).into_iter().collect();
                assert!(from_b.contains(&a), "{a} sees {b} but not the reverse");
            }
        }
    }

    #[test]
    fn radius_limits_the_sweep() {
        let state = room(&[".........", ".........", "........."]);
        let visible = visible_positions(&state, Position::new(0, 1), Some(2));
        assert!(visible.iter().all(|p| p.x <= 2));
        assert!(visible_positions(&state, Position::new(0, 1), Some(0)).len() == 1);
    }

    #[test]
    fn terrain_is_reported_before_occupants() {
        let mut state = room(&["...", "...", "..."]);
        let rat = state
            .spawn(
                Position::new(2, 1),
                ActorState::npc("rat", 'r', Position::ORIGIN, Orientation::WEST),
            )
            .unwrap();
        let visible = compute_visible(&state, Position::new(0, 1), None);
        let at_rat: Vec<_> = visible
            .iter()
            .filter(|(position, _)| *position == Position::new(2, 1))
            .map(|(_, seen)| *seen)
            .collect();
        assert!(matches!(at_rat[0], Visible::Terrain(terrain) if terrain.name == "floor"));
        assert!(matches!(at_rat[1], Visible::Occupant(id, _) if id == rat));
    }

    #[test]
    fn repeated_sweeps_report_the_same_sequence() {
        let layout = [".#....", "...#..", "#.....", "....#."];
        let build = || {
            let mut state = room(&layout);
            for (x, glyph) in [(4, 'r'), (1, 'k')] {
                state
                    .spawn(
                        Position::new(x, 3),
                        ActorState::npc("critter", glyph, Position::ORIGIN, Orientation::NORTH),
                    )
                    .unwrap();
            }
            state
        };
        let first = build();
        let second = build();
        let origin = Position::new(2, 2);

        let once = compute_visible(&first, origin, None);
        assert_eq!(once, compute_visible(&first, origin, None));
        assert_eq!(once, compute_visible(&second, origin, None));
        assert_eq!(
            visible_positions(&first, origin, Some(3)),
            visible_positions(&second, origin, Some(3))
        );
    }
}
