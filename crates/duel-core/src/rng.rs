//! Random number generation for battles
//!
//! Uses a seeded ChaCha RNG for reproducibility (deterministic replay).

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Battle random number generator
///
/// Wraps ChaCha8Rng for reproducible rolls.
/// Note: RNG state is not serialized - a restored battle draws a fresh
/// stream from the original seed.
#[derive(Debug, Clone)]
pub struct BattleRng {
    rng: ChaCha8Rng,
    seed: u64,
}

// Custom serialization - only serialize the seed, recreate the generator
// on deserialize.
impl Serialize for BattleRng {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.seed.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for BattleRng {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let seed = u64::deserialize(deserializer)?;
        Ok(BattleRng::new(seed))
    }
}

impl BattleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Create a new RNG with a random seed
    pub fn from_entropy() -> Self {
        let seed = rand::random();
        Self::new(seed)
    }

    /// Get the seed used to create this RNG
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Returns 0..n-1
    ///
    /// Returns 0 if n is 0.
    pub fn rn2(&mut self, n: u32) -> u32 {
        if n == 0 {
            return 0;
        }
        self.rng.gen_range(0..n)
    }

    /// Returns true with probability `p` (clamped to [0, 1])
    pub fn chance(&mut self, p: f64) -> bool {
        if p <= 0.0 {
            false
        } else if p >= 1.0 {
            true
        } else {
            self.rng.gen_bool(p)
        }
    }
}

impl Default for BattleRng {
    fn default() -> Self {
        Self::from_entropy()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rn2_bounds() {
        let mut rng = BattleRng::new(42);
        for _ in 0..1000 {
            let v = rng.rn2(6);
            assert!(v < 6);
        }
    }

    #[test]
    fn test_rn2_zero() {
        let mut rng = BattleRng::new(42);
        assert_eq!(rng.rn2(0), 0);
    }

    #[test]
    fn test_chance_extremes() {
        let mut rng = BattleRng::new(42);
        for _ in 0..100 {
            assert!(!rng.chance(0.0));
            assert!(rng.chance(1.0));
            assert!(!rng.chance(-0.5));
            assert!(rng.chance(1.5));
        }
    }

    #[test]
    fn test_chance_mixes_outcomes() {
        let mut rng = BattleRng::new(42);
        let hits = (0..1000).filter(|_| rng.chance(0.5)).count();
        assert!(hits > 300 && hits < 700);
    }

    #[test]
    fn test_reproducibility() {
        let mut a = BattleRng::new(12345);
        let mut b = BattleRng::new(12345);
        for _ in 0..100 {
            assert_eq!(a.rn2(1000), b.rn2(1000));
        }
    }

    #[test]
    fn test_seed_survives_serde() {
        let rng = BattleRng::new(7);
        let json = serde_json::to_string(&rng).unwrap();
        let restored: BattleRng = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.seed(), 7);
    }
}
