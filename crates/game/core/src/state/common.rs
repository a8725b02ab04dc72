use std::fmt;

/// Unique identifier for any occupant tracked in the state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntityId(pub u32);

impl EntityId {
    /// Reserved identifier for the controllable player character.
    pub const PLAYER: Self = Self(0);

    /// Returns true if this entity represents the player.
    #[inline]
    pub const fn is_player(self) -> bool {
        self.0 == Self::PLAYER.0
    }
}

impl Default for EntityId {
    fn default() -> Self {
        Self::PLAYER
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Discrete grid position expressed in tile coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const ORIGIN: Self = Self { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub const fn offset(self, (dx, dy): (i32, i32)) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// The neighbouring cell in the given orientation.
    pub const fn step(self, orientation: Orientation) -> Self {
        self.offset(orientation.delta())
    }

    /// True when `other` is a different cell within one step in both axes.
    pub fn is_adjacent(self, other: Position) -> bool {
        self != other && (self.x - other.x).abs() <= 1 && (self.y - other.y).abs() <= 1
    }

    /// Straight-line distance between cell centres.
    pub fn distance(self, other: Position) -> f64 {
        let dx = f64::from(self.x - other.x);
        let dy = f64::from(self.y - other.y);
        dx.hypot(dy)
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::ORIGIN
    }
}

impl From<(i32, i32)> for Position {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}

/// One of the eight compass headings, stored as an index in `[0, 8)`.
///
/// Index 0 points north-east and each increment rotates one step clockwise,
/// so east is 1, south 3, west 5 and north 7. All arithmetic wraps mod 8.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "u8", into = "u8"))]
pub struct Orientation(u8);

impl Orientation {
    pub const COUNT: u8 = 8;

    pub const NORTH_EAST: Self = Self(0);
    pub const EAST: Self = Self(1);
    pub const SOUTH_EAST: Self = Self(2);
    pub const SOUTH: Self = Self(3);
    pub const SOUTH_WEST: Self = Self(4);
    pub const WEST: Self = Self(5);
    pub const NORTH_WEST: Self = Self(6);
    pub const NORTH: Self = Self(7);

    const DELTAS: [(i32, i32); 8] = [
        (1, -1),
        (1, 0),
        (1, 1),
        (0, 1),
        (-1, 1),
        (-1, 0),
        (-1, -1),
        (0, -1),
    ];

    /// Builds an orientation from any integer, wrapping it into `[0, 8)`.
    pub const fn new(value: i32) -> Self {
        Self(value.rem_euclid(Self::COUNT as i32) as u8)
    }

    pub const fn index(self) -> u8 {
        self.0
    }

    /// Unit step `(dx, dy)` for this heading.
    pub const fn delta(self) -> (i32, i32) {
        Self::DELTAS[self.0 as usize]
    }

    /// Heading whose unit step points the same way as `(dx, dy)`.
    ///
    /// Returns `None` for the zero vector.
    pub fn from_delta(dx: i32, dy: i32) -> Option<Self> {
        let unit = (dx.signum(), dy.signum());
        Self::DELTAS
            .iter()
            .position(|delta| *delta == unit)
            .map(|index| Self(index as u8))
    }

    /// One step clockwise (`+1`) or counter-clockwise (`-1`).
    pub const fn turned(self, clockwise: bool) -> Self {
        if clockwise {
            Self::new(self.0 as i32 + 1)
        } else {
            Self::new(self.0 as i32 - 1)
        }
    }

    /// Signed rotation towards `target`: `((4 + target - self) mod 8) - 4`.
    ///
    /// Zero only when already aligned. Positive means turn clockwise; a
    /// half-turn yields `-4` and therefore resolves counter-clockwise.
    pub const fn rotation_to(self, target: Orientation) -> i32 {
        (4 + target.0 as i32 - self.0 as i32).rem_euclid(Self::COUNT as i32) - 4
    }

    /// All eight headings in index order.
    pub fn all() -> impl Iterator<Item = Orientation> {
        (0..Self::COUNT).map(Self)
    }
}

impl From<u8> for Orientation {
    fn from(value: u8) -> Self {
        Self::new(i32::from(value))
    }
}

impl From<Orientation> for u8 {
    fn from(value: Orientation) -> Self {
        value.0
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Discrete time unit in the timeline-based scheduling system.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Self = Self(0);

    pub fn new(value: u64) -> Self {
        Self(value)
    }
}

// Saturates at `u64::MAX`; the timeline never wraps back to zero.
impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    fn add(self, rhs: u64) -> Tick {
        Tick(self.0.saturating_add(rhs))
    }
}

impl std::ops::Add<Tick> for Tick {
    type Output = Tick;
    fn add(self, rhs: Tick) -> Tick {
        self + rhs.0
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn orientation_wraps_for_any_turn_sequence() {
        let mut orientation = Orientation::EAST;
        let turns = [true, true, false, true, true, true, true, true, true, false, false];
        let mut net = 0;
        for clockwise in turns {
            orientation = orientation.turned(clockwise);
            net += if clockwise { 1 } else { -1 };
            assert!(orientation.index() < Orientation::COUNT);
        }
        assert_eq!(orientation, Orientation::new(1 + net));
    }

    #[test]
    fn counter_clockwise_from_zero_wraps_to_seven() {
        assert_eq!(Orientation::NORTH_EAST.turned(false), Orientation::NORTH);
    }

    #[test]
    fn delta_table_round_trips() {
        for orientation in Orientation::all() {
            let (dx, dy) = orientation.delta();
            assert_eq!(Orientation::from_delta(dx, dy), Some(orientation));
        }
        assert_eq!(Orientation::from_delta(0, 0), None);
        assert_eq!(Orientation::from_delta(5, 0), Some(Orientation::EAST));
    }

    #[test]
    fn rotation_prefers_shorter_direction() {
        assert_eq!(Orientation::EAST.rotation_to(Orientation::SOUTH), 2);
        assert_eq!(Orientation::SOUTH.rotation_to(Orientation::EAST), -2);
        assert_eq!(Orientation::NORTH.rotation_to(Orientation::NORTH_EAST), 1);
        assert_eq!(Orientation::EAST.rotation_to(Orientation::EAST), 0);
        assert_eq!(Orientation::EAST.rotation_to(Orientation::WEST), -4);
    }

    #[test]
    fn tick_addition_saturates() {
        assert_eq!(Tick(3) + 4, Tick(7));
        assert_eq!(Tick(u64::MAX - 1) + Tick(5), Tick(u64::MAX));
        assert_eq!(Tick(u64::MAX) + u64::MAX, Tick(u64::MAX));
    }

    #[test]
    fn adjacency_excludes_same_cell() {
        let origin = Position::new(2, 2);
        assert!(!origin.is_adjacent(origin));
        assert!(origin.is_adjacent(Position::new(3, 3)));
        assert!(origin.is_adjacent(Position::new(2, 1)));
        assert!(!origin.is_adjacent(Position::new(4, 2)));
    }
}
