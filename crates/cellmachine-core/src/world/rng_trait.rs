//! RNG trait abstraction for the automaton
//!
//! Every random decision the rule table makes (direction order, ignition,
//! burnout, growth) goes through this trait, so the engine can run on:
//! - A seeded `Xoshiro256StarStar` (reproducible runs and tests)
//! - Any other `rand::Rng`
//! - Scripted test doubles that force a particular branch

/// Random number generator trait for automaton updates
pub trait CellRng {
    /// Generate random boolean with 50% probability
    fn gen_bool(&mut self) -> bool;

    /// Generate random f32 in [0.0, 1.0)
    fn gen_f32(&mut self) -> f32;

    /// Generate an index in `0..len`. `len` must be non-zero.
    fn gen_index(&mut self, len: usize) -> usize;

    /// Check if random value is less than probability threshold
    fn check_probability(&mut self, probability: f32) -> bool {
        self.gen_f32() < probability
    }

    /// Shuffle a slice in place (Fisher-Yates)
    fn shuffle<T>(&mut self, items: &mut [T]) {
        for i in (1..items.len()).rev() {
            let j = self.gen_index(i + 1);
            items.swap(i, j);
        }
    }
}

// Blanket implementation for any type implementing rand::Rng
impl<T: ?Sized + rand::Rng> CellRng for T {
    fn gen_bool(&mut self) -> bool {
        rand::Rng::r#gen(self)
    }

    fn gen_f32(&mut self) -> f32 {
        rand::Rng::r#gen(self)
    }

    fn gen_index(&mut self, len: usize) -> usize {
        rand::Rng::gen_range(self, 0..len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro256StarStar;

    #[test]
    fn test_cell_rng_gen_bool() {
        let mut rng = Xoshiro256StarStar::seed_from_u64(12345);

        let mut seen_true = false;
        let mut seen_false = false;

        for _ in 0..100 {
            if rng.gen_bool() {
                seen_true = true;
            } else {
                seen_false = true;
            }
        }

        assert!(seen_true);
        assert!(seen_false);
    }

    #[test]
    fn test_cell_rng_gen_f32_range() {
        let mut rng = Xoshiro256StarStar::seed_from_u64(12345);

        for _ in 0..100 {
            let val = rng.gen_f32();
            assert!((0.0..1.0).contains(&val));
        }
    }

    #[test]
    fn test_cell_rng_gen_index_range() {
        let mut rng = Xoshiro256StarStar::seed_from_u64(7);

        let mut seen = [false; 3];
        for _ in 0..200 {
            let i = rng.gen_index(3);
            assert!(i < 3);
            seen[i] = true;
        }
        assert_eq!(seen, [true; 3]);
    }

    #[test]
    fn test_check_probability_extremes() {
        let mut rng = Xoshiro256StarStar::seed_from_u64(12345);

        for _ in 0..100 {
            assert!(rng.check_probability(1.0));
            assert!(!rng.check_probability(0.0));
        }
    }

    #[test]
    fn test_shuffle_is_permutation() {
        let mut rng = Xoshiro256StarStar::seed_from_u64(99);
        let mut items = [1, 2, 3, 4, 5, 6];

        rng.shuffle(&mut items);

        let mut sorted = items;
        sorted.sort_unstable();
        assert_eq!(sorted, [1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_shuffle_handles_tiny_slices() {
        let mut rng = Xoshiro256StarStar::seed_from_u64(1);
        let mut empty: [u8; 0] = [];
        rng.shuffle(&mut empty);

        let mut one = [9];
        rng.shuffle(&mut one);
        assert_eq!(one, [9]);
    }

    #[test]
    fn test_cell_rng_deterministic() {
        let mut rng1 = Xoshiro256StarStar::seed_from_u64(42);
        let mut rng2 = Xoshiro256StarStar::seed_from_u64(42);

        for _ in 0..100 {
            assert_eq!(rng1.gen_bool(), rng2.gen_bool());
            assert_eq!(rng1.gen_f32(), rng2.gen_f32());
            assert_eq!(rng1.gen_index(10), rng2.gen_index(10));
        }
    }
}
