//! Agent-storage error type.

use thiserror::Error;

use av_core::Cell;
use av_grid::Occupant;

#[derive(Debug, Error)]
pub enum AgentError {
    #[error("a {species:?} already spawns at {cell}")]
    DuplicateSpawn { species: Occupant, cell: Cell },

    #[error("{0:?} is not a wandering species")]
    NotWandering(Occupant),
}

pub type AgentResult<T> = Result<T, AgentError>;
