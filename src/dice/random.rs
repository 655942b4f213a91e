use super::*;
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::SmallRng;

/// Uniform dice backed by a small, fast PRNG.
#[derive(Debug, Clone)]
pub struct Random(SmallRng);

impl Random {
    /// Reproducible dice for simulations.
    pub fn seeded(seed: u64) -> Self {
        Self(SmallRng::seed_from_u64(seed))
    }
}

impl Default for Random {
    fn default() -> Self {
        Self(SmallRng::from_os_rng())
    }
}

impl Dice for Random {
    fn roll(&mut self, range: Range<Power>) -> Power {
        if range.is_empty() {
            range.start
        } else {
            self.0.random_range(range)
        }
    }
}
