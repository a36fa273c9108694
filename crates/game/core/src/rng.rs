//! Seedable random number generation.
//!
//! The only randomness in the base rules is the flee-success draw, but all of
//! it flows through the [`RngSource`] trait so tests can substitute a fixed
//! sequence and a saved seed replays an encounter exactly.

/// Source of randomness for game rules.
///
/// Implementations must be deterministic: the same seed must produce the
/// same sequence of values.
pub trait RngSource {
    /// Produce the next random u32, advancing the generator.
    fn next_u32(&mut self) -> u32;

    /// Draw a success/failure outcome with the given success chance
    /// in percent. `percent >= 100` always succeeds, `0` never does.
    fn chance_percent(&mut self, percent: u32) -> bool {
        self.next_u32() % 100 < percent.min(100)
    }

    /// Random value in `[min, max]` inclusive.
    fn range(&mut self, min: u32, max: u32) -> u32 {
        if min >= max {
            return min;
        }
        let span = max - min + 1;
        min + self.next_u32() % span
    }
}

/// PCG random number generator (Permuted Congruential Generator).
///
/// PCG-XSH-RR: 64 bits of state, 32-bit output, a single multiply plus a
/// xorshift and a data-dependent rotate. Small, fast, and passes the usual
/// statistical batteries, which is all a flee roll needs.
///
/// # References
///
/// - PCG paper: <https://www.pcg-random.org/>
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PcgRng {
    state: u64,
}

impl PcgRng {
    /// PCG multiplier constant.
    const MULTIPLIER: u64 = 6364136223846793005;

    /// PCG increment constant.
    const INCREMENT: u64 = 1442695040888963407;

    /// Create a generator from a seed. The seed is stepped once so that
    /// adjacent seeds do not produce correlated first outputs.
    pub fn from_seed(seed: u64) -> Self {
        let mut rng = Self {
            state: seed.wrapping_add(Self::INCREMENT),
        };
        rng.state = Self::step(rng.state);
        rng
    }

    /// Advance the LCG state by one step.
    #[inline]
    fn step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    /// XSH-RR output permutation: xorshift the high bits, then rotate by
    /// the topmost bits.
    #[inline]
    fn output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }
}

impl RngSource for PcgRng {
    fn next_u32(&mut self) -> u32 {
        let out = Self::output(self.state);
        self.state = Self::step(self.state);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_sequence() {
        let mut a = PcgRng::from_seed(42);
        let mut b = PcgRng::from_seed(42);
        for _ in 0..100 {
            assert_eq!(a.next_u32(), b.next_u32());
        }
    }

    #[test]
    fn different_seeds_diverge() {
        let mut a = PcgRng::from_seed(1);
        let mut b = PcgRng::from_seed(2);
        let same = (0..32).filter(|_| a.next_u32() == b.next_u32()).count();
        assert!(same < 4);
    }

    #[test]
    fn chance_percent_extremes() {
        let mut rng = PcgRng::from_seed(7);
        assert!((0..100).all(|_| rng.chance_percent(100)));
        assert!((0..100).all(|_| !rng.chance_percent(0)));
    }

    #[test]
    fn fifty_percent_converges() {
        // Statistical property from the flee rules: success rate converges
        // to 0.5 over a large number of trials with a fixed seed.
        let mut rng = PcgRng::from_seed(0xA57E_21A5);
        let trials = 10_000;
        let successes = (0..trials).filter(|_| rng.chance_percent(50)).count();
        let rate = successes as f64 / trials as f64;
        assert!((rate - 0.5).abs() < 0.02, "rate was {rate}");
    }

    #[test]
    fn range_is_inclusive() {
        let mut rng = PcgRng::from_seed(9);
        for _ in 0..1000 {
            let v = rng.range(3, 5);
            assert!((3..=5).contains(&v));
        }
        assert_eq!(rng.range(4, 4), 4);
    }
}
