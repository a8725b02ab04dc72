//! Static world data that does not change during play.
//!
//! Terrain kinds, the load-time glyph tables that map characters to terrain
//! and features, and map extents. The [`TerrainRegistry`] is created once and
//! passed by reference to anything that turns characters into terrain.
mod map;
mod terrain;

pub use map::MapDimensions;
pub use terrain::{FeatureGlyph, TerrainRegistry, TerrainType};
