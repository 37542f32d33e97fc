//! Random number sources for placement and flash triggering.
//!
//! Everything random in the crate goes through [`RandomSource`], so a run can
//! use fresh entropy while tests pin the sequence.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// A source of uniform floats in `[0, 1)`.
pub trait RandomSource {
    /// Next uniform sample in `[0, 1)`.
    fn next_f32(&mut self) -> f32;

    /// Uniform sample in `[min, max)`.
    #[inline]
    fn range(&mut self, min: f32, max: f32) -> f32 {
        min + (max - min) * self.next_f32()
    }

    /// Uniform sample in `[-half_width, half_width)`.
    #[inline]
    fn symmetric(&mut self, half_width: f32) -> f32 {
        (self.next_f32() - 0.5) * 2.0 * half_width
    }

    /// `true` with probability `p`. Never true for `p <= 0`.
    #[inline]
    fn chance(&mut self, p: f32) -> bool {
        self.next_f32() < p
    }
}

/// Fast non-cryptographic generator backed by [`SmallRng`].
#[derive(Debug, Clone)]
pub struct SmallRandom {
    rng: SmallRng,
}

impl SmallRandom {
    /// Seed from operating-system entropy. Every run differs.
    pub fn from_entropy() -> Self {
        Self {
            rng: SmallRng::from_entropy(),
        }
    }

    /// Fixed seed for reproducible runs.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Seeded when `seed` is set, entropy otherwise.
    pub fn from_seed_option(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::seeded(seed),
            None => Self::from_entropy(),
        }
    }
}

impl Default for SmallRandom {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl RandomSource for SmallRandom {
    #[inline]
    fn next_f32(&mut self) -> f32 {
        self.rng.gen()
    }
}

/// Replays a fixed list of samples, wrapping around at the end.
///
/// Handy for pinning placement and trigger decisions in tests.
#[derive(Debug, Clone)]
pub struct SequenceRandom {
    values: Vec<f32>,
    cursor: usize,
}

impl SequenceRandom {
    /// Create a sequence. Samples are clamped into `[0, 1)`.
    ///
    /// An empty list behaves like a constant `0.0`.
    pub fn new(values: impl Into<Vec<f32>>) -> Self {
        let values = values
            .into()
            .into_iter()
            .map(|v| v.clamp(0.0, 1.0 - f32::EPSILON))
            .collect();
        Self { values, cursor: 0 }
    }

    /// A source that always yields `value`.
    pub fn constant(value: f32) -> Self {
        Self::new(vec![value])
    }
}

impl RandomSource for SequenceRandom {
    fn next_f32(&mut self) -> f32 {
        if self.values.is_empty() {
            return 0.0;
        }
        let v = self.values[self.cursor];
        self.cursor = (self.cursor + 1) % self.values.len();
        v
    }
}
