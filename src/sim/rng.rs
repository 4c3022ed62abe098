//! Park-Miller minimal standard generator
//!
//! Gameplay randomness (obstacle gaps and sizes) comes only from here so a
//! seed reproduces a run exactly. The state transition is integer-only.

use serde::{Deserialize, Serialize};

/// 2^31 - 1
pub const MODULUS: i64 = 2_147_483_647;
pub const MULTIPLIER: i64 = 16_807;

/// Linear congruential generator, state always in [1, MODULUS - 1]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lcg {
    state: i32,
}

impl Lcg {
    /// Seed the generator. Any integer is accepted: it is reduced modulo
    /// `MODULUS` and a zero result is replaced with 1.
    pub fn new(seed: i64) -> Self {
        let reduced = seed.rem_euclid(MODULUS);
        Self {
            state: if reduced == 0 { 1 } else { reduced as i32 },
        }
    }

    /// Current internal state
    pub fn state(&self) -> i32 {
        self.state
    }

    /// Advance and return the new state
    pub fn next_int(&mut self) -> i32 {
        self.state = ((self.state as i64 * MULTIPLIER) % MODULUS) as i32;
        self.state
    }

    /// Advance and map the new state into [0, 1)
    pub fn frac(&mut self) -> f64 {
        (self.next_int() - 1) as f64 / (MODULUS - 1) as f64
    }

    /// `lo + floor(frac() * span)`
    pub fn range(&mut self, lo: i32, span: i32) -> i32 {
        lo + (self.frac() * span as f64).floor() as i32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_value_for_known_seed() {
        let mut rng = Lcg::new(12345);
        assert_eq!(rng.next_int(), ((12345_i64 * 16807) % 2_147_483_647) as i32);
        assert_eq!(rng.state(), 207_482_415);
    }

    #[test]
    fn test_identical_seeds_identical_sequences() {
        let mut a = Lcg::new(98765);
        let mut b = Lcg::new(98765);
        for _ in 0..1000 {
            assert_eq!(a.next_int(), b.next_int());
        }
    }

    #[test]
    fn test_zero_seed_coerced() {
        let rng = Lcg::new(0);
        assert_eq!(rng.state(), 1);
        assert_eq!(Lcg::new(MODULUS).state(), 1);
    }

    #[test]
    fn test_negative_seed_reduced_into_range() {
        let rng = Lcg::new(-5);
        assert_eq!(rng.state(), (MODULUS - 5) as i32);
    }

    #[test]
    fn test_large_seed_reduced() {
        // Millisecond timestamps exceed i32
        let seed = 1_760_000_000_000_i64;
        let rng = Lcg::new(seed);
        assert_eq!(rng.state() as i64, seed % MODULUS);
    }

    #[test]
    fn test_frac_bounds_at_extremes() {
        // State 1 maps to 16807 next, never below 1
        let mut low = Lcg::new(1);
        let f = low.frac();
        assert!((0.0..1.0).contains(&f));

        let mut high = Lcg::new(MODULUS - 1);
        for _ in 0..100 {
            let f = high.frac();
            assert!((0.0..1.0).contains(&f));
        }
    }

    #[test]
    fn test_range_stays_within_span() {
        let mut rng = Lcg::new(42);
        for _ in 0..500 {
            let v = rng.range(24, 90);
            assert!((24..24 + 90).contains(&v));
        }
    }
}
