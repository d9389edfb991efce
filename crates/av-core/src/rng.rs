//! Deterministic simulation RNG and the injectable `RandomSource` seam.
//!
//! # Determinism strategy
//!
//! Every episode owns exactly one `SimRng` seeded from the run's seed.  All
//! random decisions inside a tick (direction resampling, anti-stall action
//! substitution) draw from it in a fixed order: pedestrians by `AgentId`,
//! then debris by `AgentId`, then the vehicle.  The same seed therefore always
//! reproduces the same episode.
//!
//! Batch evaluation seeds each episode with [`SimRng::mixed_seed`], mixing the
//! episode index with the 64-bit fractional golden-ratio constant so
//! neighbouring episodes get unrelated streams.  Seeds depend only on the
//! index, never on how many episodes ran before.
//!
//! Code that consumes randomness takes `&mut impl RandomSource` (or
//! `&mut dyn RandomSource`) rather than `SimRng` so tests can drive it with a
//! [`ScriptedRng`].

use std::collections::VecDeque;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

// ── RandomSource ──────────────────────────────────────────────────────────────

/// The three draws the simulation needs.
pub trait RandomSource {
    /// Uniform sample in `[0, 1)`.
    fn unit(&mut self) -> f64;

    /// Uniform index in `0..n`.  `n` must be non-zero.
    fn below(&mut self, n: usize) -> usize;

    /// `true` with probability `p`.
    fn chance(&mut self, p: f64) -> bool {
        self.unit() < p
    }

    /// Pick a uniformly random element of `items`, `None` if empty.
    fn pick<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T>
    where
        Self: Sized,
    {
        if items.is_empty() {
            None
        } else {
            items.get(self.below(items.len()))
        }
    }
}

// ── SimRng ────────────────────────────────────────────────────────────────────

/// Episode-level RNG.
///
/// Used only from the single thread that owns the episode.  Parallel batches
/// build one per episode from [`SimRng::mixed_seed`].
#[derive(Clone, Debug)]
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// Seed for the `index`-th item of a batch without advancing any stream.
    #[inline]
    pub fn mixed_seed(seed: u64, index: u64) -> u64 {
        seed ^ index.wrapping_mul(MIXING_CONSTANT)
    }

    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }
}

impl RandomSource for SimRng {
    #[inline]
    fn unit(&mut self) -> f64 {
        self.0.r#gen::<f64>()
    }

    #[inline]
    fn below(&mut self, n: usize) -> usize {
        self.0.gen_range(0..n)
    }

    #[inline]
    fn chance(&mut self, p: f64) -> bool {
        self.0.gen_bool(p.clamp(0.0, 1.0))
    }
}

// ── ScriptedRng ───────────────────────────────────────────────────────────────

/// A `RandomSource` that replays fixed sequences.
///
/// Each queue is consumed front to back.  An exhausted `units` queue yields
/// `1.0` (so `chance(p)` is false for every `p <= 1`) and an exhausted
/// `indices` queue yields `0`.  Indices are reduced modulo `n`.
#[derive(Clone, Debug, Default)]
pub struct ScriptedRng {
    units: VecDeque<f64>,
    indices: VecDeque<usize>,
}

impl ScriptedRng {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_units(mut self, units: impl IntoIterator<Item = f64>) -> Self {
        self.units.extend(units);
        self
    }

    pub fn with_indices(mut self, indices: impl IntoIterator<Item = usize>) -> Self {
        self.indices.extend(indices);
        self
    }

    /// Draws left in both queues.
    pub fn remaining(&self) -> usize {
        self.units.len() + self.indices.len()
    }
}

impl RandomSource for ScriptedRng {
    fn unit(&mut self) -> f64 {
        self.units.pop_front().unwrap_or(1.0)
    }

    fn below(&mut self, n: usize) -> usize {
        self.indices.pop_front().map_or(0, |i| i % n.max(1))
    }
}
