//! Client configuration read from the process environment.
use std::env;
use std::path::PathBuf;

/// Where the client finds its content and where it writes logs and saves.
#[derive(Clone, Debug, Default)]
pub struct ClientConfig {
    pub map_path: Option<PathBuf>,
    pub config_path: Option<PathBuf>,
    pub npcs_path: Option<PathBuf>,
    pub seed: Option<u64>,
    pub log_dir: Option<PathBuf>,
    pub save_path: PathBuf,
}

impl ClientConfig {
    pub const DEFAULT_SAVE_FILE: &'static str = "delve-save.ron";

    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `DELVE_MAP` - ASCII map file (default: built-in demo map)
    /// - `DELVE_CONFIG` - TOML game configuration (default: built-in values)
    /// - `DELVE_NPCS` - RON NPC spawn list (default: demo NPCs with the demo map)
    /// - `DELVE_SEED` - NPC decision seed
    /// - `DELVE_LOG_DIR` - Directory for a daily rolling log file (default: stderr only)
    /// - `DELVE_SAVE` - Snapshot file used by `save` and `load`
    pub fn from_env() -> Self {
        Self {
            map_path: read_path("DELVE_MAP"),
            config_path: read_path("DELVE_CONFIG"),
            npcs_path: read_path("DELVE_NPCS"),
            seed: read_env::<u64>("DELVE_SEED"),
            log_dir: read_path("DELVE_LOG_DIR"),
            save_path: read_path("DELVE_SAVE")
                .unwrap_or_else(|| PathBuf::from(Self::DEFAULT_SAVE_FILE)),
        }
    }
}

fn read_path(key: &str) -> Option<PathBuf> {
    env::var_os(key)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
