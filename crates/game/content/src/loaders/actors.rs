//! NPC spawn list loader.
//!
//! RON format: a list of [`NpcSpawn`] entries, e.g.
//!
//! ```ron
//! [
//!     (name: "rat", glyph: 'r', position: (x: 4, y: 2)),
//!     (name: "bat", glyph: 'b', position: (x: 7, y: 1), orientation: 5),
//! ]
//! ```

use std::path::Path;

use delve_core::{ActorState, EntityId, GameState, Orientation, Position};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// One non-player character to place on a freshly loaded map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NpcSpawn {
    pub name: String,
    pub glyph: char,
    pub position: Position,
    #[serde(default = "default_orientation")]
    pub orientation: Orientation,
    #[serde(default)]
    pub description: Option<String>,
}

fn default_orientation() -> Orientation {
    Orientation::SOUTH
}

impl NpcSpawn {
    pub fn to_actor(&self) -> ActorState {
        let actor = ActorState::npc(self.name.clone(), self.glyph, self.position, self.orientation);
        match &self.description {
            Some(description) => actor.with_description(description.clone()),
            None => actor,
        }
    }
}

/// Loader for NPC spawn lists from RON files.
pub struct ActorLoader;

impl ActorLoader {
    /// Load a spawn list from a RON file.
    pub fn load(path: &Path) -> LoadResult<Vec<NpcSpawn>> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<Vec<NpcSpawn>> {
        ron::from_str(content).map_err(|e| anyhow::anyhow!("Failed to parse NPC list RON: {}", e))
    }

    /// Place every entry on the map, in list order.
    ///
    /// Stops at the first entry that cannot be placed; earlier entries stay
    /// spawned.
    pub fn spawn_all(state: &mut GameState, spawns: &[NpcSpawn]) -> LoadResult<Vec<EntityId>> {
        spawns
            .iter()
            .map(|spawn| {
                state.spawn(spawn.position, spawn.to_actor()).map_err(|e| {
                    anyhow::anyhow!("Failed to spawn NPC '{}': {}", spawn.name, e)
                })
            })
            .collect()
    }
}
