use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::collections::VecDeque;

/// Source of the biased coin flips that decide whether a freshly inserted
/// value is promoted one layer further up.
pub trait Coin {
    /// Returns `true` with probability `p`. `p` is always within `[0, 1]`.
    fn flip(&mut self, p: f64) -> bool;
}

/// Coin backed by a `rand` generator.
#[derive(Clone, Debug)]
pub struct RngCoin<R> {
    rng: R,
}

impl<R: Rng> RngCoin<R> {
    pub fn new(rng: R) -> Self {
        RngCoin { rng }
    }
}

impl RngCoin<SmallRng> {
    pub fn from_entropy() -> Self {
        RngCoin::new(SmallRng::from_entropy())
    }

    pub fn seeded(seed: u64) -> Self {
        RngCoin::new(SmallRng::seed_from_u64(seed))
    }
}

impl Default for RngCoin<SmallRng> {
    fn default() -> Self {
        RngCoin::from_entropy()
    }
}

impl<R: Rng> Coin for RngCoin<R> {
    #[inline]
    fn flip(&mut self, p: f64) -> bool {
        self.rng.gen_bool(p)
    }
}

/// Replays a fixed sequence of outcomes, ignoring `p`. Once the script runs
/// out every flip fails, so no further promotion happens.
#[derive(Clone, Debug, Default)]
pub struct ScriptedCoin {
    outcomes: VecDeque<bool>,
}

impl ScriptedCoin {
    pub fn new<I: IntoIterator<Item = bool>>(outcomes: I) -> Self {
        ScriptedCoin {
            outcomes: outcomes.into_iter().collect(),
        }
    }

    /// Flips still left in the script.
    pub fn remaining(&self) -> usize {
        self.outcomes.len()
    }
}

impl Coin for ScriptedCoin {
    fn flip(&mut self, _p: f64) -> bool {
        self.outcomes.pop_front().unwrap_or(false)
    }
}
