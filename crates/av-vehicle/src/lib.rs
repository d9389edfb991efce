//! `av-vehicle`: the per-tick vehicle controller.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                  |
//! |-----------------|-----------------------------------------------------------|
//! | [`state`]       | `ControlState`, `Escalation`: the blocked-counter machine |
//! | [`diagnostics`] | `Diagnostic`, bounded `DiagnosticLog`                     |
//! | [`vehicle`]     | `Vehicle`: scan, decide, advance, lane change, replan     |
//! | [`builder`]     | `VehicleBuilder`                                          |
//! | [`error`]       | `VehicleError`, `VehicleResult<T>`                        |
//!
//! # Control loop
//!
//! ```text
//! each tick:
//!   scan front / front-left / front-right through the HazardOracle
//!   clear   → FollowingPath, advance one path step (replan on exhaustion)
//!   hazard  → Waiting(n+1); once n+1 reaches the threshold, consult the
//!             Policy with the 3-bit observation, reset the counter, and
//!             apply Wait / Forward / TurnRight / TurnLeft
//! ```
//!
//! A [`Mode::PathOnly`] vehicle skips the escalation entirely: it follows its
//! path while the way is clear and holds otherwise.

pub mod builder;
pub mod diagnostics;
pub mod error;
pub mod state;
pub mod vehicle;


pub use builder::VehicleBuilder;
pub use diagnostics::{Diagnostic, DiagnosticLog};
pub use error::{VehicleError, VehicleResult};
pub use state::{ControlState, Escalation};
pub use vehicle::{ActionOutcome, Advance, Decision, LaneChange, Mode, TickReport, Vehicle};
