//! Injectable sources of randomness.
//!
//! Every random decision in flowgen goes through [`RandomSource`], so tests
//! can replace the ambient generator with a scripted sequence.

use std::collections::VecDeque;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// A source of uniformly distributed integers.
pub trait RandomSource {
    /// Return an integer in the inclusive range `min..=max`.
    ///
    /// Callers guarantee `min <= max`.
    fn next_int(&mut self, min: usize, max: usize) -> usize;
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn next_int(&mut self, min: usize, max: usize) -> usize {
        (**self).next_int(min, max)
    }
}

/// [`RandomSource`] backed by rand's [`StdRng`].
#[derive(Debug, Clone)]
pub struct StdRandom {
    rng: StdRng,
}

impl StdRandom {
    /// Create a source seeded from operating system entropy.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Create a reproducible source from a fixed seed.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for StdRandom {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl RandomSource for StdRandom {
    fn next_int(&mut self, min: usize, max: usize) -> usize {
        self.rng.gen_range(min..=max)
    }
}

/// [`RandomSource`] that replays a fixed script of values.
///
/// Scripted values are clamped into the requested range. Once the script
/// is exhausted every draw returns `min`.
#[derive(Debug, Clone, Default)]
pub struct ScriptedRandom {
    values: VecDeque<usize>,
}

impl ScriptedRandom {
    /// Create a source that replays `values` in order.
    #[must_use]
    pub fn new(values: impl IntoIterator<Item = usize>) -> Self {
        Self {
            values: values.into_iter().collect(),
        }
    }

    /// Number of scripted values not yet consumed.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.values.len()
    }
}

impl RandomSource for ScriptedRandom {
    fn next_int(&mut self, min: usize, max: usize) -> usize {
        self.values
            .pop_front()
            .map_or(min, |value| value.clamp(min, max))
    }
}
