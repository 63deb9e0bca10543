//! Deterministic random number generation.
//!
//! RULE: Nothing in the game may call any platform RNG.
//! Every stochastic decision flows through the single XorShiftRng owned
//! by the service registry, seeded explicitly by the composition root.
//!
//! The stream is xorshift32 (shifts 13, 17, 5). Given the same seed, the
//! sequence of draws is identical on every platform.

use crate::error::{SimError, SimResult};
use rand::{RngCore, SeedableRng};

/// 2^32, the normaliser that keeps `next_f64` strictly below 1.0.
const U32_SPAN: f64 = 4_294_967_296.0;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XorShiftRng {
    seed: u32,
}

impl XorShiftRng {
    /// A zero seed is a fixed point of xorshift and yields 0.0 forever.
    pub fn new(seed: u32) -> Self {
        if seed == 0 {
            log::warn!("rng seeded with 0: every draw will be 0.0");
        }
        Self { seed }
    }

    /// Current internal state. Fully determines all future draws.
    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// Advance one xorshift32 step and return the new state.
    pub fn next_u32(&mut self) -> u32 {
        let mut x = self.seed;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.seed = x;
        x
    }

    /// Roll a float in [0.0, 1.0).
    pub fn next_f64(&mut self) -> f64 {
        f64::from(self.next_u32()) / U32_SPAN
    }

    /// Roll a float in [min, max).
    pub fn range(&mut self, min: f64, max: f64) -> f64 {
        min + (max - min) * self.next_f64()
    }

    /// Uniform pick. An empty slice consumes no draw.
    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> SimResult<&'a T> {
        if items.is_empty() {
            return Err(SimError::EmptyCollection);
        }
        let index = self.range(0.0, items.len() as f64).floor() as usize;
        // range() < len, but guard the float edge anyway.
        Ok(&items[index.min(items.len() - 1)])
    }

    /// Bernoulli trial: returns true with probability p.
    pub fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }
}

impl RngCore for XorShiftRng {
    fn next_u32(&mut self) -> u32 {
        XorShiftRng::next_u32(self)
    }

    fn next_u64(&mut self) -> u64 {
        let hi = u64::from(XorShiftRng::next_u32(self));
        let lo = u64::from(XorShiftRng::next_u32(self));
        (hi << 32) | lo
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(4) {
            let bytes = XorShiftRng::next_u32(self).to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl SeedableRng for XorShiftRng {
    type Seed = [u8; 4];

    fn from_seed(seed: Self::Seed) -> Self {
        Self::new(u32::from_le_bytes(seed))
    }
}
