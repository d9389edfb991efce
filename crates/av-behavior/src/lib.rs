//! `av-behavior`: what the vehicle can do and what it consults to decide.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                  |
//! |-----------------|-----------------------------------------------------------|
//! | [`action`]      | `Action`, `Observation`, `ObservationCode`                |
//! | [`policy`]      | `Policy` trait, `QTable`, `ConstantPolicy`                |
//! | [`loader`]      | CSV loading for `QTable`                                  |
//! | [`oracle`]      | `HazardOracle` trait, `GridOracle`                        |
//! | [`error`]       | `BehaviorError`, `BehaviorResult<T>`                      |
//!
//! # Design notes
//!
//! Both capabilities the controller consumes are read-only traits:
//!
//! - a [`HazardOracle`] answers "is there a hazard in this cell?" with an
//!   optional confidence, standing in for a vision model;
//! - a [`Policy`] maps a 3-bit [`ObservationCode`] to an [`Action`].
//!
//! Neither is mutated by the simulation, so both are `Send + Sync` and can
//! be shared across the workers of a parallel evaluation batch.

pub mod action;
pub mod error;
pub mod loader;
pub mod oracle;
pub mod policy;

#[cfg(test)]
mod tests;

pub use action::{Action, Observation, ObservationCode};
pub use error::{BehaviorError, BehaviorResult};
pub use loader::{load_qtable_csv, load_qtable_reader};
pub use oracle::{GridOracle, HazardOracle};
pub use policy::{ConstantPolicy, Policy, QTable};
