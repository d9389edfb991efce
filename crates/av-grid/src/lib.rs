//! `av-grid`: occupancy grid, pathfinding, and scenario bootstrap.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                   |
//! |--------------|------------------------------------------------------------|
//! | [`grid`]     | `Grid` (terrain + occupant layers), `CellKind`, accessors  |
//! | [`astar`]    | `Pathfinder` trait, `Path`, `AStar`                        |
//! | [`scenario`] | `Scenario::generate`, `ScenarioBuilder`                    |
//! | [`error`]    | `GridError`, `GridResult<T>`                               |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on public types.           |

pub mod astar;
pub mod error;
pub mod grid;
pub mod scenario;


pub use astar::{AStar, Path, Pathfinder};
pub use error::{GridError, GridResult};
pub use grid::{CellKind, Grid, Occupant, Terrain};
pub use scenario::{Scenario, ScenarioBuilder};
