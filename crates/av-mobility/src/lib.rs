//! `av-mobility`: per-tick movement of wandering agents.
//!
//! # Crate layout
//!
//! | Module     | Contents                                                     |
//! |------------|--------------------------------------------------------------|
//! | [`rule`]   | `WanderRule`: heading inertia and resampling per species     |
//! | [`mover`]  | `Mover`: one-step lookahead move for a whole `AgentSet`      |
//! | [`error`]  | `MobilityError`, `MobilityResult<T>`                         |
//!
//! # Movement model
//!
//! Each tick every agent of a species moves at most one cell:
//!
//! 1. Its current cell is vacated on the grid.
//! 2. With probability `p` the heading is resampled uniformly from the four
//!    cardinals (debris refuses an exact U-turn); otherwise it is kept.
//! 3. The step is taken only if the destination is in bounds, reads as
//!    `Empty`, and is not claimed by a peer or a vehicle this tick.
//! 4. Agents that move release their origin; agents that stay claim it.
//! 5. Final positions are stamped back onto the grid.
//!
//! Agents resolve in `AgentId` order, so the earlier agent wins a contested
//! cell.
//!
//! # Cargo features
//!
//! | Feature   | Effect                                                   |
//! |-----------|----------------------------------------------------------|
//! | `fx-hash` | Uses `rustc_hash::FxHashSet` for the claimed-cell set.   |

pub mod error;
pub mod mover;
pub mod rule;

#[cfg(test)]
mod tests;

pub use error::{MobilityError, MobilityResult};
pub use mover::{MoveReport, Mover};
pub use rule::WanderRule;
