//! RNG module - seeded generator for board scrambles
//!
//! Scrambles must be reproducible from a seed so that sessions can be replayed
//! in tests and bug reports, so the engine carries its own tiny LCG instead of
//! pulling entropy on every shuffle.

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    ///
    /// The seed goes through a murmur3 finalizer first. Small consecutive
    /// seeds would otherwise start the LCG in one narrow band and bias the
    /// first draws of a shuffle.
    pub fn new(seed: u32) -> Self {
        Self::from_state(mix(seed))
    }

    /// Resume from a raw state returned by [`SimpleRng::state`].
    pub fn from_state(state: u32) -> Self {
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // (a * state + c) mod 2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Random value in `[0, max)`.
    ///
    /// Uses the high bits of the next state; the low bits of a power-of-two LCG
    /// cycle with very short periods.
    pub fn next_range(&mut self, max: u32) -> u32 {
        if max <= 1 {
            let _ = self.next_u32();
            return 0;
        }
        (((self.next_u32() as u64) * (max as u64)) >> 32) as u32
    }

    /// Shuffle a slice in place using Fisher-Yates
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.next_range((i + 1) as u32) as usize;
            slice.swap(i, j);
        }
    }

    /// Current internal state (feed it back into [`SimpleRng::from_state`] to resume the sequence).
    pub fn state(&self) -> u32 {
        self.state
    }
}

/// murmur3 `fmix32`.
fn mix(mut h: u32) -> u32 {
    h ^= h >> 16;
    h = h.wrapping_mul(0x85eb_ca6b);
    h ^= h >> 13;
    h = h.wrapping_mul(0xc2b2_ae35);
    h ^= h >> 16;
    h
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}
