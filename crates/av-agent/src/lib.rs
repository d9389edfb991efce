//! `av-agent`: Structure-of-Arrays storage for wandering agents.
//!
//! # Crate layout
//!
//! | Module        | Contents                                               |
//! |---------------|--------------------------------------------------------|
//! | [`store`]     | `AgentSet` (positions, headings, spawn points)         |
//! | [`builder`]   | `AgentSetBuilder` (fluent construction)                |
//! | [`error`]     | `AgentError`, `AgentResult<T>`                         |
//!
//! One `AgentSet` holds one species.  Pedestrians and debris live in separate
//! sets and are moved independently.

pub mod builder;
pub mod error;
pub mod store;

#[cfg(test)]
mod tests;

pub use builder::AgentSetBuilder;
pub use error::{AgentError, AgentResult};
pub use store::AgentSet;
