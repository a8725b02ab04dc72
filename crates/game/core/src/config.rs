/// Time cost of each successful action, in ticks.
///
/// Failed actions never cost anything; the scheduler re-inserts the actor at
/// the same time regardless of these values.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ActionCosts {
    pub turn: u64,
    pub advance: u64,
    pub open_door: u64,
    pub close_door: u64,
}

impl ActionCosts {
    pub const DEFAULT_COST: u64 = 1;

    /// Every action costs the same.
    pub const fn uniform(cost: u64) -> Self {
        Self {
            turn: cost,
            advance: cost,
            open_door: cost,
            close_door: cost,
        }
    }
}

impl Default for ActionCosts {
    fn default() -> Self {
        Self::uniform(Self::DEFAULT_COST)
    }
}

/// Game configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    pub costs: ActionCosts,

    /// Field-of-view sweep radius. `None` sweeps the whole map.
    pub fov_radius: Option<u32>,

    /// How many player messages the log keeps before dropping the oldest.
    pub message_capacity: usize,
}

impl GameConfig {
    pub const DEFAULT_MESSAGE_CAPACITY: usize = 100;

    pub fn new() -> Self {
        Self {
            costs: ActionCosts::default(),
            fov_radius: None,
            message_capacity: Self::DEFAULT_MESSAGE_CAPACITY,
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}
