//! Dice roll model.
//!
//! A single wager resolves by drawing a uniform integer in [0, 10000) and
//! scaling it down to a 2-decimal value in [0, 100). The wager wins when
//! the value rolls strictly under the win-probability threshold. The
//! integer draw is deliberate: it keeps the comparison well-defined at the
//! platform's 2-decimal resolution.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Produces win/loss outcomes for single wagers.
#[derive(Debug)]
pub struct DiceRoller<R: Rng> {
    rng: R,
}

impl DiceRoller<StdRng> {
    /// Entropy-seeded roller for production runs.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }
}

impl Default for DiceRoller<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl DiceRoller<ChaCha8Rng> {
    /// Deterministic roller for reproducible batches.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl<R: Rng> DiceRoller<R> {
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }

    /// Resolve one wager. `win_probability` is a percentage threshold;
    /// the roll wins iff the scaled draw lands strictly under it.
    pub fn roll(&mut self, win_probability: f64) -> bool {
        let roll_value = self.rng.gen_range(0..10_000) as f64 / 100.0;
        roll_value < win_probability
    }
}
