use blackjack_engine::game::RoundSnapshot;
use blackjack_engine::player::PlayerAction;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

use crate::Strategy;

/// Uniform pick among the legal actions, reproducible from a seed.
#[derive(Debug, Clone)]
pub struct RandomStrategy {
    rng: ChaCha20Rng,
}

impl RandomStrategy {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => ChaCha20Rng::seed_from_u64(s),
            None => ChaCha20Rng::seed_from_u64(rand::random()),
        };
        Self { rng }
    }
}

impl Strategy for RandomStrategy {
    fn decide(&mut self, snapshot: &RoundSnapshot) -> PlayerAction {
        let legal = match snapshot.available.as_ref() {
            Some(a) => a.legal_actions(),
            None => return PlayerAction::Stand,
        };
        if legal.is_empty() {
            return PlayerAction::Stand;
        }
        legal[self.rng.random_range(0..legal.len())]
    }

    fn name(&self) -> &str {
        "Random"
    }
}
