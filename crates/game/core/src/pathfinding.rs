//! Best-first path search over the 8-connected grid.
//!
//! Orthogonal steps cost 1 and diagonal steps cost √2; the heuristic is the
//! straight-line distance to the goal, which never overestimates under that
//! metric. Neighbours are expanded in orientation order (0 through 7), and
//! frontier entries with equal estimated total are ordered by remaining
//! distance, then by insertion order, so equal-cost paths come out the same
//! way on every run.
use std::cmp::Ordering;
use std::collections::hash_map::Entry;
use std::collections::{BinaryHeap, HashMap};

use arrayvec::ArrayVec;

use crate::error::{ErrorSeverity, GameError};
use crate::state::{GameState, Orientation, Position};

/// A walkable route, `from` and `to` inclusive, plus its total cost.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Path {
    pub nodes: Vec<Position>,
    pub cost: f64,
}

impl Path {
    /// Number of cells on the path, including the start.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The cell reached by the first step, if the path moves at all.
    pub fn first_step(&self) -> Option<Position> {
        self.nodes.get(1).copied()
    }

    pub fn last(&self) -> Option<Position> {
        self.nodes.last().copied()
    }
}

#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum PathError {
    /// The goal cannot be reached. `best_effort` leads to the reachable cell
    /// closest to it in a straight line.
    #[error("no path to {goal}")]
    NoPath { goal: Position, best_effort: Path },
}

impl PathError {
    pub fn best_effort(&self) -> &Path {
        match self {
            Self::NoPath { best_effort, .. } => best_effort,
        }
    }

    pub fn into_best_effort(self) -> Path {
        match self {
            Self::NoPath { best_effort, .. } => best_effort,
        }
    }
}

impl GameError for PathError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Recoverable
    }

    fn error_code(&self) -> &'static str {
        "PATH_NO_PATH"
    }
}

/// Convenience wrapper using the state's combined terrain and occupant
/// passability.
pub fn find_path_in(state: &GameState, from: Position, to: Position) -> Result<Path, PathError> {
    find_path(from, to, |position| state.is_passable(position))
}

/// Searches for the cheapest route from `from` to `to`.
///
/// `from` itself is never checked for passability; every other cell on the
/// route must pass `is_passable`. The predicate must reject everything
/// outside some finite region or an unreachable goal never terminates.
pub fn find_path<F>(from: Position, to: Position, mut is_passable: F) -> Result<Path, PathError>
where
    F: FnMut(Position) -> bool,
{
    if from == to {
        return Ok(Path {
            nodes: vec![from],
            cost: 0.0,
        });
    }

    let mut nodes: HashMap<Position, Node> = HashMap::new();
    let mut frontier = BinaryHeap::new();
    let mut sequence = 0u64;

    let start_h = from.distance(to);
    nodes.insert(
        from,
        Node {
            g: 0.0,
            parent: None,
            closed: false,
        },
    );
    frontier.push(Frontier {
        f: start_h,
        h: start_h,
        sequence,
        g: 0.0,
        position: from,
    });

    let mut best = (from, start_h, 0.0);

    while let Some(entry) = frontier.pop() {
        let Some(node) = nodes.get_mut(&entry.position) else {
            continue;
        };
        // superseded by a cheaper entry pushed later
        if node.closed || entry.g > node.g {
            continue;
        }
        node.closed = true;

        if entry.position == to {
            return Ok(reconstruct(&nodes, to));
        }
        if entry.h < best.1 || (entry.h == best.1 && entry.g < best.2) {
            best = (entry.position, entry.h, entry.g);
        }

        for (next, step) in neighbours(entry.position) {
            if !is_passable(next) {
                continue;
            }
            let g = entry.g + step;
            match nodes.entry(next) {
                Entry::Occupied(mut slot) => {
                    let known = slot.get_mut();
                    if known.closed || g >= known.g {
                        continue;
                    }
                    known.g = g;
                    known.parent = Some(entry.position);
                }
                Entry::Vacant(slot) => {
                    slot.insert(Node {
                        g,
                        parent: Some(entry.position),
                        closed: false,
                    });
                }
            }
            sequence += 1;
            let h = next.distance(to);
            frontier.push(Frontier {
                f: g + h,
                h,
                sequence,
                g,
                position: next,
            });
        }
    }

    Err(PathError::NoPath {
        goal: to,
        best_effort: reconstruct(&nodes, best.0),
    })
}

#[derive(Clone, Copy, Debug)]
struct Node {
    g: f64,
    parent: Option<Position>,
    closed: bool,
}

#[derive(Clone, Copy, Debug)]
struct Frontier {
    f: f64,
    h: f64,
    sequence: u64,
    g: f64,
    position: Position,
}

impl Frontier {
    fn key_cmp(&self, other: &Self) -> Ordering {
        self.f
            .total_cmp(&other.f)
            .then_with(|| self.h.total_cmp(&other.h))
            .then_with(|| self.sequence.cmp(&other.sequence))
    }
}

impl PartialEq for Frontier {
    fn eq(&self, other: &Self) -> bool {
        self.key_cmp(other) == Ordering::Equal
    }
}

impl Eq for Frontier {}

impl PartialOrd for Frontier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Frontier {
    // BinaryHeap is a max-heap; smallest key must compare greatest.
    fn cmp(&self, other: &Self) -> Ordering {
        other.key_cmp(self)
    }
}

fn neighbours(position: Position) -> ArrayVec<(Position, f64), 8> {
    Orientation::all()
        .map(|orientation| {
            let (dx, dy) = orientation.delta();
            let step = if dx != 0 && dy != 0 {
                std::f64::consts::SQRT_2
            } else {
                1.0
            };
            (position.offset((dx, dy)), step)
        })
        .collect()
}

fn reconstruct(nodes: &HashMap<Position, Node>, end: Position) -> Path {
    let cost = nodes.get(&end).map_or(0.0, |node| node.g);
    let mut path = vec![end];
    let mut cursor = end;
    while let Some(parent) = nodes.get(&cursor).and_then(|node| node.parent) {
        path.push(parent);
        cursor = parent;
    }
    path.reverse();
    Path { nodes: path, cost }
}
