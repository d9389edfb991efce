//! `av-core`: foundational types for the gridnav vehicle simulator.
//!
//! This crate is a dependency of every other `av-*` crate.  It intentionally
//! has no `av-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `AgentId`, `VehicleId`                                |
//! | [`cell`]        | `Cell` coordinates, cardinal `Direction`, `Side`      |
//! | [`time`]        | `Tick`, `SimClock`                                    |
//! | [`rng`]         | `RandomSource` trait, `SimRng`, `ScriptedRng`         |
//! | [`config`]      | `SimConfig`, `RewardConfig`                           |
//! | [`error`]       | `CoreError`, `CoreResult`                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types; required to load `SimConfig` from JSON. |

pub mod cell;
pub mod config;
pub mod error;
pub mod ids;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use cell::{Cell, Direction, Side};
pub use config::{RewardConfig, SimConfig};
pub use error::{CoreError, CoreResult};
pub use ids::{AgentId, VehicleId};
pub use rng::{RandomSource, ScriptedRng, SimRng};
pub use time::{SimClock, Tick};
