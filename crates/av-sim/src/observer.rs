//! Simulation observer trait for progress reporting and run logging.

use av_core::Tick;
use av_vehicle::Vehicle;

use crate::{Arrival, EpisodeSummary};

/// Callbacks invoked by [`Sim::run`][crate::Sim::run] and
/// [`Evaluator::run_observed`][crate::Evaluator::run_observed].
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example: arrival printer
///
/// ```rust,ignore
/// struct ArrivalPrinter;
///
/// impl SimObserver for ArrivalPrinter {
///     fn on_arrival(&mut self, arrival: &Arrival) {
///         println!("{} arrived at {}", arrival.vehicle, arrival.tick);
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the very start of each tick, before agents move.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called at the end of each tick with every vehicle's post-tick state.
    fn on_tick_end(&mut self, _tick: Tick, _vehicles: &[Vehicle]) {}

    /// Called once per vehicle, the first tick it stands on the final target.
    fn on_arrival(&mut self, _arrival: &Arrival) {}

    /// Called once per finished evaluation episode, in episode order.
    fn on_episode_end(&mut self, _summary: &EpisodeSummary) {}

    /// Called once after the final tick completes.
    fn on_sim_end(&mut self, _final_tick: Tick) {}
}

/// A [`SimObserver`] that does nothing.  Use when you need to call `run` but
/// don't want progress callbacks.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
