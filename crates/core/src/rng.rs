use crate::Card;
use rand::{rngs::StdRng, seq::SliceRandom, RngCore, SeedableRng};
use std::fmt;

/// Orders the deck at round start. Tests plug in scripted sources for
/// deterministic deals.
pub trait RandomSource: fmt::Debug {
    fn shuffle_cards(&mut self, cards: &mut [Card]);
}

#[derive(Debug, Clone)]
pub struct RngState {
    seed: u64,
    rng: StdRng,
}

impl RngState {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            seed,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        let seed = rand::thread_rng().next_u64();
        Self::from_seed(seed)
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn next_u64(&mut self) -> u64 {
        self.rng.next_u64()
    }

    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        items.shuffle(&mut self.rng);
    }
}

impl RandomSource for RngState {
    fn shuffle_cards(&mut self, cards: &mut [Card]) {
        self.shuffle(cards);
    }
}
