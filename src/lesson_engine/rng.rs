use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Deterministic random stream for one lesson.
///
/// Every draw goes through [`SeededRandom::next`], so the number and order of
/// `next()` calls made by the generator fully determines its output.
/// ChaCha8 is used because its output is stable across platforms and crate
/// releases, unlike `StdRng`.
#[derive(Debug, Clone)]
pub struct SeededRandom {
    rng: ChaCha8Rng,
    draws: u64,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        SeededRandom { rng: ChaCha8Rng::seed_from_u64(seed), draws: 0 }
    }

    /// Uniform float in `[0, 1)`.
    pub fn next(&mut self) -> f64 {
        self.draws += 1;
        self.rng.gen::<f64>()
    }

    /// Uniform integer in `[min, max]`. Swapped bounds are tolerated.
    pub fn next_int(&mut self, min: i64, max: i64) -> i64 {
        let (lo, hi) = if min <= max { (min, max) } else { (max, min) };
        // Widened so the full i64 span cannot overflow.
        let width = hi as i128 - lo as i128;
        let offset = (self.next() * (width + 1) as f64).floor() as i128;
        // Guard against float rounding landing exactly on the span.
        (lo as i128 + offset.min(width)) as i64
    }

    /// Uniform index in `[0, len)`; `len` must be non-zero.
    pub fn pick_index(&mut self, len: usize) -> usize {
        debug_assert!(len > 0, "pick_index on empty slice");
        ((self.next() * len as f64).floor() as usize).min(len.saturating_sub(1))
    }

    /// Return a shuffled copy of `items`.
    ///
    /// Fisher-Yates from the back, one `next()` per swap position.
    pub fn shuffle<T: Clone>(&mut self, items: &[T]) -> Vec<T> {
        let mut out = items.to_vec();
        for i in (1..out.len()).rev() {
            let j = self.pick_index(i + 1);
            out.swap(i, j);
        }
        out
    }

    /// Number of `next()` calls made so far.
    pub fn draws(&self) -> u64 {
        self.draws
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_stream() {
        let mut a = SeededRandom::new(99);
        let mut b = SeededRandom::new(99);
        for _ in 0..100 {
            assert_eq!(a.next().to_bits(), b.next().to_bits());
        }
    }

    #[test]
    fn different_seeds_diverge() {
        let make = |seed: u64| -> Vec<i64> {
            let mut rng = SeededRandom::new(seed);
            (0..8).map(|_| rng.next_int(0, 1000)).collect()
        };
        assert_eq!(make(7), make(7));
        assert_ne!(make(7), make(8));
    }

    #[test]
    fn next_is_in_unit_interval() {
        let mut rng = SeededRandom::new(1);
        for _ in 0..1000 {
            let x = rng.next();
            assert!((0.0..1.0).contains(&x), "{x} outside [0, 1)");
        }
    }

    #[test]
    fn next_int_is_inclusive_and_covers_range() {
        let mut rng = SeededRandom::new(3);
        let mut seen = [false; 6];
        for _ in 0..500 {
            let v = rng.next_int(-2, 3);
            assert!((-2..=3).contains(&v));
            seen[(v + 2) as usize] = true;
        }
        assert!(seen.iter().all(|s| *s), "not every value drawn: {seen:?}");
        assert_eq!(rng.next_int(4, 4), 4);
    }

    #[test]
    fn next_int_handles_the_full_i64_span() {
        let mut rng = SeededRandom::new(11);
        for _ in 0..200 {
            let v = rng.next_int(0, i64::MAX);
            assert!(v >= 0);
            rng.next_int(i64::MIN, i64::MAX);
        }
    }

    #[test]
    fn shuffle_is_a_permutation_and_counts_draws() {
        let mut rng = SeededRandom::new(42);
        let input: Vec<u32> = (0..10).collect();
        let out = rng.shuffle(&input);
        assert_eq!(rng.draws(), 9);
        let mut sorted = out.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, input);
    }

    #[test]
    fn shuffle_of_empty_or_single_draws_nothing() {
        let mut rng = SeededRandom::new(0);
        assert!(rng.shuffle::<u8>(&[]).is_empty());
        assert_eq!(rng.shuffle(&[5]), vec![5]);
        assert_eq!(rng.draws(), 0);
    }
}
