//! Run configuration.
//!
//! `SimConfig` sizes the world and bounds an episode; `RewardConfig` holds the
//! per-step reward schedule.  Both are plain data with `Default` values, and
//! both derive serde behind the `serde` feature so applications can load them
//! from a file.

use std::ops::RangeInclusive;

use crate::{CoreError, CoreResult};

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Top-level simulation configuration.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimConfig {
    /// Grid height in cells.
    pub rows: u16,
    /// Grid width in cells.
    pub cols: u16,

    /// Buildings placed by scenario generation.
    pub building_count: usize,
    /// Number of targets drawn per scenario (inclusive range).
    pub target_count: RangeInclusive<usize>,
    /// Number of pedestrians spawned per scenario (inclusive range).
    pub pedestrian_count: RangeInclusive<usize>,
    /// Number of debris items spawned per scenario.
    pub debris_count: usize,

    /// Step ceiling for one episode.
    pub max_steps: u32,
    /// Consecutive blocked ticks before the policy is consulted.
    pub wait_threshold: u32,
    /// Per-tick probability that a wandering agent resamples its heading.
    pub resample_probability: f64,

    /// Master RNG seed.  The same seed always produces identical results.
    pub seed: u64,

    /// Entries kept in each vehicle's diagnostic log.
    pub diagnostic_capacity: usize,
    /// Simulated milliseconds per tick, used for arrival reporting.
    pub tick_millis: u32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            rows: 10,
            cols: 10,
            building_count: 8,
            target_count: 1..=3,
            pedestrian_count: 3..=6,
            debris_count: 4,
            max_steps: 100,
            wait_threshold: 3,
            resample_probability: 0.2,
            seed: 0,
            diagnostic_capacity: 25,
            tick_millis: 500,
        }
    }
}

impl SimConfig {
    pub fn cell_count(&self) -> usize {
        self.rows as usize * self.cols as usize
    }

    /// Reject configurations that scenario generation cannot satisfy.
    ///
    /// Every placement draws a distinct cell, so the worst case (all
    /// buildings, one start, the most targets, the most pedestrians and all
    /// debris) must fit in the grid.
    pub fn validate(&self) -> CoreResult<()> {
        if self.rows == 0 || self.cols == 0 {
            return Err(CoreError::Config(format!(
                "grid must be non-empty, got {}x{}",
                self.rows, self.cols
            )));
        }
        if self.target_count.is_empty() || *self.target_count.start() == 0 {
            return Err(CoreError::Config(format!(
                "target_count must be a non-empty range starting at 1 or more, got {:?}",
                self.target_count
            )));
        }
        if self.pedestrian_count.is_empty() {
            return Err(CoreError::Config(format!(
                "pedestrian_count must be a non-empty range, got {:?}",
                self.pedestrian_count
            )));
        }
        if !(0.0..=1.0).contains(&self.resample_probability) {
            return Err(CoreError::Config(format!(
                "resample_probability must lie in [0, 1], got {}",
                self.resample_probability
            )));
        }
        if self.max_steps == 0 {
            return Err(CoreError::Config("max_steps must be at least 1".into()));
        }
        if self.wait_threshold == 0 {
            return Err(CoreError::Config("wait_threshold must be at least 1".into()));
        }
        if self.tick_millis == 0 {
            return Err(CoreError::Config("tick_millis must be at least 1".into()));
        }
        let demand = self.building_count
            + 1
            + *self.target_count.end()
            + *self.pedestrian_count.end()
            + self.debris_count;
        if demand > self.cell_count() {
            return Err(CoreError::Config(format!(
                "{} placements requested but the grid only has {} cells",
                demand,
                self.cell_count()
            )));
        }
        Ok(())
    }
}

// ── RewardConfig ──────────────────────────────────────────────────────────────

/// Reward schedule for one episode step.
///
/// Termination rewards are additive: a step that reaches a target on the
/// final allowed step earns `goal + timeout`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RewardConfig {
    pub wait: f64,
    pub forward_success: f64,
    pub forward_fail: f64,
    pub lane_change_success: f64,
    pub lane_change_fail: f64,
    pub goal: f64,
    pub collision: f64,
    pub timeout: f64,
}

impl Default for RewardConfig {
    fn default() -> Self {
        Self {
            wait: -0.1,
            forward_success: 0.5,
            forward_fail: -1.0,
            lane_change_success: -0.2,
            lane_change_fail: 0.0,
            goal: 10.0,
            collision: -20.0,
            timeout: -5.0,
        }
    }
}
