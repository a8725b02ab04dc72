//! State management errors.
//!
//! Errors raised by grid lookups and occupancy bookkeeping.

use crate::env::MapDimensions;
use crate::error::{ErrorSeverity, GameError};
use crate::state::{EntityId, Position};

/// Errors that occur while reading or mutating the grid.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MapError {
    /// Position is outside the map bounds.
    #[error("position {position} is out of bounds (map size: {dimensions})")]
    OutOfBounds {
        position: Position,
        dimensions: MapDimensions,
    },

    /// More distinct terrain kinds than a cell index can address.
    #[error("terrain palette is full ({len} kinds)")]
    PaletteFull { len: usize },

    /// Entity is not present in the occupant arena.
    #[error("entity {0} not found")]
    EntityNotFound(EntityId),

    /// A second player was placed while one is already on the map.
    #[error("a player is already placed at {0}")]
    PlayerExists(Position),

    /// Cell export ran out of distinct display characters.
    #[error("no unused glyph left after {used} cell kinds")]
    GlyphsExhausted { used: usize },
}

impl GameError for MapError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::OutOfBounds { .. } => ErrorSeverity::Internal,
            Self::PaletteFull { .. } => ErrorSeverity::Fatal,
            Self::EntityNotFound(_) | Self::PlayerExists(_) => ErrorSeverity::Validation,
            Self::GlyphsExhausted { .. } => ErrorSeverity::Fatal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::OutOfBounds { .. } => "MAP_OUT_OF_BOUNDS",
            Self::PaletteFull { .. } => "MAP_PALETTE_FULL",
            Self::EntityNotFound(_) => "MAP_ENTITY_NOT_FOUND",
            Self::PlayerExists(_) => "MAP_PLAYER_EXISTS",
            Self::GlyphsExhausted { .. } => "MAP_GLYPHS_EXHAUSTED",
        }
    }
}
