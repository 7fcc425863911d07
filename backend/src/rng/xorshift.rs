//! xorshift64* random number generator
//!
//! Fast, deterministic PRNG with 64-bit state. Same seed produces the same
//! sequence of job sizes, which is what makes simulation runs replayable
//! once the real-time source is fixed.

use serde::{Deserialize, Serialize};

/// Deterministic random number generator using xorshift64*
///
/// # Example
/// ```
/// use printer_queue_core::RngManager;
///
/// let mut rng = RngManager::new(12345);
/// let band = rng.below(10);          // [0, 10)
/// let pages = rng.range_inclusive(1, 10);
/// assert!(band < 10);
/// assert!((1..=10).contains(&pages));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RngManager {
    state: u64,
}

impl RngManager {
    /// Create a new RNG with given seed
    pub fn new(seed: u64) -> Self {
        // xorshift state must never be zero
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

    /// Uniform value in `[0, bound)`
    ///
    /// # Panics
    /// Panics if `bound` is zero
    pub fn below(&mut self, bound: u64) -> u64 {
        assert!(bound > 0, "bound must be positive");
        self.next() % bound
    }

    /// Uniform value in `[min, max]`
    ///
    /// # Panics
    /// Panics if `min > max`
    pub fn range_inclusive(&mut self, min: u32, max: u32) -> u32 {
        assert!(min <= max, "min must not exceed max");
        let span = u64::from(max - min) + 1;
        min + self.below(span) as u32
    }

    /// Current state, usable as a seed to resume the sequence
    pub fn get_state(&self) -> u64 {
        self.state
    }
}
