//! Session configuration.
use delve_core::GameConfig;

/// Settings for one [`Session`](crate::Session).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    pub game: GameConfig,
    /// Seed for the NPC decision policy.
    pub npc_seed: u64,
    /// Upper bound on scheduler steps per [`Session::run_until_input`]
    /// call, so a map without a player cannot spin forever.
    ///
    /// [`Session::run_until_input`]: crate::Session::run_until_input
    pub max_steps_per_poll: usize,
}

impl RuntimeConfig {
    pub const DEFAULT_NPC_SEED: u64 = 0x5eed;
    pub const DEFAULT_MAX_STEPS_PER_POLL: usize = 1_000;

    pub fn new(game: GameConfig) -> Self {
        Self {
            game,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_npc_seed(mut self, seed: u64) -> Self {
        self.npc_seed = seed;
        self
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            game: GameConfig::default(),
            npc_seed: Self::DEFAULT_NPC_SEED,
            max_steps_per_poll: Self::DEFAULT_MAX_STEPS_PER_POLL,
        }
    }
}
