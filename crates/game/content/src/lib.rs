//! Data-driven content and loaders.
//!
//! This crate turns files into `delve-core` values:
//! - ASCII map layouts (terrain glyphs, doors, features, the player start)
//! - NPC spawn lists (RON)
//! - Game configuration (TOML)
//! - Snapshots of a map's cell export (RON)
//!
//! Nothing here mutates a running game; the runtime decides what to do with
//! what was loaded.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{ActorLoader, ConfigLoader, LoadResult, MapLoader, NpcSpawn, SnapshotLoader};
