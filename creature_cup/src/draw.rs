//! Injectable randomness for shuffles and roster sampling.

use rand::{Rng, SeedableRng, rngs::StdRng, seq::SliceRandom, seq::index};

/// Randomness source for the tournament.
///
/// Every random decision (per-round shuffle, roster sampling, id draws) goes
/// through a `Draw`, so a seeded draw replays a whole tournament exactly.
pub struct Draw<R = StdRng> {
    rng: R,
}

impl Draw<StdRng> {
    /// Deterministic draw for tests and `--seed` runs
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Draw seeded from the operating system
    #[must_use]
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }
}

impl Default for Draw<StdRng> {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl<R: Rng> Draw<R> {
    /// Wrap any RNG
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }

    /// Shuffle a slice in place
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        items.shuffle(&mut self.rng);
    }

    /// Pick `count` distinct elements of `pool` in random order
    ///
    /// # Returns
    ///
    /// * `Option<Vec<T>>` - The sample, or None if `count` exceeds the pool
    pub fn sample<T: Clone>(&mut self, pool: &[T], count: usize) -> Option<Vec<T>> {
        if count > pool.len() {
            return None;
        }

        Some(
            index::sample(&mut self.rng, pool.len(), count)
                .into_iter()
                .map(|idx| pool[idx].clone())
                .collect(),
        )
    }

    /// Draw up to `count` distinct ids in `1..=max_id`
    ///
    /// Fewer than `count` ids come back only when `max_id < count`.
    pub fn random_ids(&mut self, count: usize, max_id: u32) -> Vec<u32> {
        let population = max_id as usize;
        let amount = count.min(population);
        index::sample(&mut self.rng, population, amount)
            .into_iter()
            .map(|idx| idx as u32 + 1)
            .collect()
    }
}
