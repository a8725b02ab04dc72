//! Snapshot persistence for a map's cell export.
//!
//! A snapshot is the RON form of [`CellExport`]: legend, cell grid and seen
//! grid. Only the structural shape is stored; turn order and queued
//! commands are not part of it.

use std::path::Path;

use delve_core::{CellExport, GameState};

use crate::loaders::{LoadResult, read_file, write_file};

/// Reads and writes RON snapshots of a [`GameState`].
pub struct SnapshotLoader;

impl SnapshotLoader {
    /// Export `state` and write it to `path`.
    pub fn save(path: &Path, state: &GameState) -> LoadResult<()> {
        let content = Self::to_ron(state)?;
        write_file(path, &content)
    }

    /// Read a snapshot and rebuild the state it describes.
    pub fn load(path: &Path) -> LoadResult<GameState> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Failed to load snapshot {}: {}", path.display(), e))
    }

    pub fn to_ron(state: &GameState) -> LoadResult<String> {
        let export = state.export_cells()?;
        ron::ser::to_string_pretty(&export, ron::ser::PrettyConfig::default())
            .map_err(|e| anyhow::anyhow!("Failed to serialize snapshot RON: {}", e))
    }

    pub fn parse(content: &str) -> LoadResult<GameState> {
        let export: CellExport = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse snapshot RON: {}", e))?;
        Ok(GameState::import_cells(&export)?)
    }
}
