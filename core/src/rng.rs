//! Pluggable randomness.
//!
//! Anything implementing [`rand::Rng`] is a [`RandomSource`], so boards default to a
//! `SmallRng` seeded from the OS while tests pin a seed for deterministic layouts.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Uniform randomness provider used for mine placement.
pub trait RandomSource {
    /// Returns a uniformly distributed index in `0..bound`. `bound` must be non-zero.
    fn pick_index(&mut self, bound: usize) -> usize;
}

impl<R: Rng + ?Sized> RandomSource for R {
    #[inline]
    fn pick_index(&mut self, bound: usize) -> usize {
        self.random_range(0..bound)
    }
}

/// Deterministic RNG for replays and tests.
pub fn seeded(seed: u64) -> SmallRng {
    SmallRng::seed_from_u64(seed)
}

/// RNG seeded from system entropy.
pub fn from_entropy() -> SmallRng {
    SmallRng::from_os_rng()
}

/// Draws `take` distinct elements of `items` uniformly without replacement.
///
/// This is a partial Fisher-Yates shuffle over a copy of the input, so only the first
/// `take` slots are ever swapped. When `take` exceeds the input length every element is
/// returned, in shuffled order.
pub fn shuffled_prefix<T: Clone, R: RandomSource + ?Sized>(
    items: &[T],
    take: usize,
    rng: &mut R,
) -> Vec<T> {
    let mut pool = items.to_vec();
    let take = take.min(pool.len());

    for i in 0..take {
        let j = i + rng.pick_index(pool.len() - i);
        pool.swap(i, j);
    }

    pool.truncate(take);
    pool
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_is_deterministic() {
        let mut rng1 = seeded(42);
        let mut rng2 = seeded(42);
        for _ in 0..100 {
            assert_eq!(rng1.pick_index(1000), rng2.pick_index(1000));
        }
    }

    #[test]
    fn pick_index_stays_in_range() {
        let mut rng = seeded(123);
        for _ in 0..1000 {
            assert!(rng.pick_index(10) < 10);
        }
    }

    #[test]
    fn shuffled_prefix_draws_distinct_items() {
        let items: Vec<u32> = (0..50).collect();
        let mut rng = seeded(7);

        let mut drawn = shuffled_prefix(&items, 20, &mut rng);
        assert_eq!(drawn.len(), 20);
        assert_eq!(items.len(), 50);

        drawn.sort_unstable();
        drawn.dedup();
        assert_eq!(drawn.len(), 20);
    }

    #[test]
    fn shuffled_prefix_caps_at_input_length() {
        let mut rng = seeded(1);
        let mut all = shuffled_prefix(&[3, 1, 2], 10, &mut rng);
        all.sort_unstable();

        assert_eq!(all, vec![1, 2, 3]);
    }

    /// Always picks the last slot, handy for checking the swap arithmetic.
    struct Last;

    impl RandomSource for Last {
        fn pick_index(&mut self, bound: usize) -> usize {
            bound - 1
        }
    }

    #[test]
    fn custom_sources_plug_in() {
        assert_eq!(shuffled_prefix(&[1, 2, 3, 4], 2, &mut Last), vec![4, 1]);
    }
}
