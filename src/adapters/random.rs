//! Uniformly random opponent

use rand::{SeedableRng, rngs::StdRng, seq::IndexedRandom};

use crate::{
    Result,
    game::Board,
    ports::MoveSource,
};

/// Opponent that picks a uniformly random legal move
#[derive(Debug)]
pub struct RandomOpponent {
    name: String,
    rng: StdRng,
}

impl RandomOpponent {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rng: StdRng::from_rng(&mut rand::rng()),
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }
}

impl Default for RandomOpponent {
    fn default() -> Self {
        Self::new("Random")
    }
}

impl MoveSource for RandomOpponent {
    fn next_move(&mut self, _board: &Board, legal: &[usize]) -> Result<usize> {
        legal
            .choose(&mut self.rng)
            .copied()
            .ok_or(crate::Error::NoLegalActions)
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn set_rng_seed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }
}
