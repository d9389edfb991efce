//! `av-sim`: drivers that run vehicles and wandering agents together.
//!
//! # Two drivers
//!
//! ```text
//! Episode (one vehicle, caller-chosen actions, rewards):
//!   ① pedestrians move, then debris (never onto the vehicle)
//!   ② a wait at the wait threshold becomes a random moving action
//!   ③ apply Wait / Forward / TurnRight / TurnLeft, score it
//!   ④ termination, additive: target +goal, collision +collision,
//!      step ceiling +timeout
//!
//! Sim (hybrid + path-only vehicles, no rewards):
//!   ① pedestrians move, then debris
//!   ② record first arrivals at the final target
//!   ③ each vehicle not yet arrived runs its own controller tick
//! ```
//!
//! [`Evaluator`] runs a batch of greedy-policy episodes over generated
//! scenarios.
//!
//! # Cargo features
//!
//! | Feature    | Effect                                              |
//! |------------|-----------------------------------------------------|
//! | `parallel` | Runs evaluation episodes on Rayon's thread pool.    |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use av_behavior::{Action, GridOracle, QTable};
//! use av_core::SimConfig;
//! use av_grid::{AStar, Scenario};
//! use av_sim::{NoopObserver, SimBuilder};
//!
//! let config = SimConfig::default();
//! let scenario = Scenario::generate(&config, config.seed)?;
//! let policy = Arc::new(QTable::uniform(Action::TurnLeft));
//! let mut sim = SimBuilder::new(config, scenario, policy, GridOracle, AStar).build()?;
//! sim.run(&mut NoopObserver)?;
//! ```

pub mod builder;
pub mod episode;
pub mod error;
pub mod evaluate;
pub mod observer;
pub mod sim;

#[cfg(test)]
mod tests;

pub use builder::{SimBuilder, DEFAULT_MAX_TICKS};
pub use episode::{Episode, StepInfo, StepOutcome};
pub use error::{SimError, SimResult};
pub use evaluate::{EpisodeSummary, Evaluator};
pub use observer::{NoopObserver, SimObserver};
pub use sim::{Arrival, Sim};
