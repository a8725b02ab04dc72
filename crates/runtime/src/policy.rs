//! Decision policies for non-player actors.
use delve_core::{Action, DecisionPolicy, EntityId, GameState};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Wanders: each turn picks uniformly between advancing and turning one
/// step either way. Seeded, so a given seed replays the same choices.
#[derive(Clone, Debug)]
pub struct RandomPolicy {
    rng: ChaCha8Rng,
}

impl RandomPolicy {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl DecisionPolicy for RandomPolicy {
    fn decide(&mut self, actor: EntityId, _state: &GameState) -> Action {
        match self.rng.gen_range(0..3) {
            0 => Action::advance(actor),
            1 => Action::turn(actor, true),
            _ => Action::turn(actor, false),
        }
    }
}

/// Never moves; always turns clockwise. Useful for scripted scenes.
#[derive(Clone, Copy, Debug, Default)]
pub struct IdlePolicy;

impl DecisionPolicy for IdlePolicy {
    fn decide(&mut self, actor: EntityId, _state: &GameState) -> Action {
        Action::turn(actor, true)
    }
}
