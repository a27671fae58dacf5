//! xorshift64* random number generator
//!
//! Fast, deterministic PRNG with 64-bit state. The simulator threads a single
//! instance through growth and moderation so that a seed fully determines a run.
//!
//! # Determinism
//!
//! Same seed → same sequence of draws → same `SimulationResult`. This is what
//! makes the exclusion vs. reintegration comparison reproducible.

use serde::{Deserialize, Serialize};

/// Deterministic random number generator using xorshift64*
///
/// # Example
/// ```
/// use community_moderation_sim::RngManager;
///
/// let mut rng = RngManager::new(12345);
/// let growth = rng.range_inclusive(20, 60);
/// assert!((20..=60).contains(&growth));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RngManager {
    state: u64,
}

impl RngManager {
    /// Create a new RNG with given seed
    ///
    /// A zero seed is mapped to 1 (xorshift cannot leave the all-zero state).
    pub fn new(seed: u64) -> Self {
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u64 value
    pub fn next(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x >> 12;
        x ^= x << 25;
        x ^= x >> 27;
        self.state = x;
        x.wrapping_mul(0x2545F4914F6CDD1D)
    }

    /// Generate random value in range [min, max)
    ///
    /// # Panics
    /// Panics if min >= max
    pub fn range(&mut self, min: u64, max: u64) -> u64 {
        assert!(min < max, "min must be less than max");

        let span = max - min;
        min + self.next() % span
    }

    /// Generate random value in range [low, high], both ends included
    ///
    /// A degenerate range (`low == high`) returns `low` without consuming a draw.
    /// A range covering every `u64` value takes the raw draw.
    ///
    /// # Panics
    /// Panics if low > high
    pub fn range_inclusive(&mut self, low: usize, high: usize) -> usize {
        assert!(low <= high, "low must not exceed high");

        if low == high {
            return low;
        }
        match (high as u64).checked_add(1) {
            Some(end) => self.range(low as u64, end) as usize,
            // high == u64::MAX; width is zero only for the full [0, u64::MAX] span
            None => match (u64::MAX - low as u64).wrapping_add(1) {
                0 => self.next() as usize,
                width => (low as u64 + self.next() % width) as usize,
            },
        }
    }

    /// Uniform index into a collection of `len` elements
    ///
    /// # Panics
    /// Panics if len == 0
    pub fn index(&mut self, len: usize) -> usize {
        self.range(0, len as u64) as usize
    }

    /// Generate random f64 in range [0.0, 1.0)
    pub fn next_f64(&mut self) -> f64 {
        let value = self.next();
        (value >> 11) as f64 * (1.0 / ((1u64 << 53) as f64))
    }

    /// Pick an index according to non-negative weights
    ///
    /// Weights need not be normalized. Returns `None` for an empty slice
    /// or when every weight is zero.
    pub fn weighted_index(&mut self, weights: &[f64]) -> Option<usize> {
        let total: f64 = weights.iter().sum();
        if weights.is_empty() || total <= 0.0 {
            return None;
        }

        let mut target = self.next_f64() * total;
        for (idx, weight) in weights.iter().enumerate() {
            target -= weight;
            if target < 0.0 {
                return Some(idx);
            }
        }

        // Rounding can leave a sliver of mass past the last bucket
        weights.iter().rposition(|w| *w > 0.0)
    }

    /// Draw `k` distinct elements uniformly, without replacement
    ///
    /// Partial Fisher-Yates shuffle: every element has the same probability
    /// `k / items.len()` of being included. `k` is clamped to `items.len()`.
    /// The returned order is the draw order.
    pub fn sample_without_replacement<T: Clone>(&mut self, items: &[T], k: usize) -> Vec<T> {
        let mut pool: Vec<T> = items.to_vec();
        let k = k.min(pool.len());

        for i in 0..k {
            let j = i + self.index(pool.len() - i);
            pool.swap(i, j);
        }

        pool.truncate(k);
        pool
    }

    /// Get current RNG state (for replaying from a known point)
    pub fn get_state(&self) -> u64 {
        self.state
    }
}
