//! Simulation time model.
//!
//! Time is a monotonically increasing `Tick` counter.  One tick is one
//! simulation step: every wandering agent moves at most one cell and every
//! vehicle takes one decision.  `SimClock` maps ticks to simulated wall time
//! for arrival reporting:
//!
//!   elapsed = tick * tick_millis
//!
//! The default tick is 500 ms, the refresh period of the interactive run.

use std::fmt;

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute simulation tick counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// Return the tick `n` steps after `self`.
    #[inline]
    pub fn offset(self, n: u64) -> Tick {
        Tick(self.0 + n)
    }

    /// Ticks elapsed from `earlier` to `self`, saturating at zero.
    #[inline]
    pub fn since(self, earlier: Tick) -> u64 {
        self.0.saturating_sub(earlier.0)
    }
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    #[inline]
    fn add(self, rhs: u64) -> Tick {
        Tick(self.0 + rhs)
    }
}

impl std::ops::Sub for Tick {
    type Output = u64;
    #[inline]
    fn sub(self, rhs: Tick) -> u64 {
        self.0 - rhs.0
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// Tick counter plus its wall-time resolution.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimClock {
    /// Simulated milliseconds per tick.  Default: 500.
    pub tick_millis: u32,
    /// The current tick, advanced by `SimClock::advance()` each iteration.
    pub current_tick: Tick,
}

impl SimClock {
    pub fn new(tick_millis: u32) -> Self {
        Self { tick_millis, current_tick: Tick::ZERO }
    }

    /// Advance the clock by one tick.
    #[inline]
    pub fn advance(&mut self) {
        self.current_tick = Tick(self.current_tick.0 + 1);
    }

    #[inline]
    pub fn reset(&mut self) {
        self.current_tick = Tick::ZERO;
    }

    /// Elapsed simulated milliseconds since tick 0.
    #[inline]
    pub fn elapsed_millis(&self) -> u64 {
        self.current_tick.0 * self.tick_millis as u64
    }

    /// Elapsed simulated seconds since tick 0.
    #[inline]
    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed_millis() as f64 / 1_000.0
    }

    /// Simulated seconds spanned by `ticks`.
    #[inline]
    pub fn secs_for_ticks(&self, ticks: u64) -> f64 {
        (ticks * self.tick_millis as u64) as f64 / 1_000.0
    }
}

impl Default for SimClock {
    fn default() -> Self {
        Self::new(500)
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:.1}s)", self.current_tick, self.elapsed_secs())
    }
}
