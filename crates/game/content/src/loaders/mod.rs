//! Content loaders for reading game data from files.
//!
//! Each loader has a `parse`/`from_str` entry point working on text and a
//! `load` wrapper that reads the file first, so tests can skip the disk.

pub mod actors;
pub mod config;
pub mod map;
pub mod snapshot;

pub use actors::{ActorLoader, NpcSpawn};
pub use config::ConfigLoader;
pub use map::MapLoader;
pub use snapshot::SnapshotLoader;

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}

/// Helper function to write file contents.
pub(crate) fn write_file(path: &Path, content: &str) -> LoadResult<()> {
    std::fs::write(path, content)
        .map_err(|e| anyhow::anyhow!("Failed to write file {}: {}", path.display(), e))
}
