//! RNG module - food placement randomness.
//!
//! A tiny seedable xorshift generator. Food placement is the only random
//! decision in the game, so a full RNG crate would be overkill; a deterministic
//! generator also keeps tests reproducible.

/// Xorshift32 generator.
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Xorshift cannot leave the zero state
        let state = if seed == 0 { 0x9e37_79b9 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        x
    }

    /// Generate a random value in `[0, max)`. `max` must be nonzero.
    pub fn gen_range(&mut self, max: u32) -> u32 {
        debug_assert!(max > 0);
        // Multiply-shift range reduction avoids the low-bit bias of `% max`.
        (((self.next_u32() as u64) * (max as u64)) >> 32) as u32
    }
}
