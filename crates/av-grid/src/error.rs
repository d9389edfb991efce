//! Grid-subsystem error type.

use thiserror::Error;

use av_core::{Cell, CoreError};

use crate::Occupant;

/// Errors produced by `av-grid`.
#[derive(Debug, Error)]
pub enum GridError {
    #[error("cell {cell} is outside the {rows}x{cols} grid")]
    OutOfBounds { cell: Cell, rows: u16, cols: u16 },

    #[error("cannot place {occupant:?} on building at {cell}")]
    StaticObstacle { cell: Cell, occupant: Occupant },

    #[error("occupancy violated at {cell}: {reason}")]
    Occupancy { cell: Cell, reason: &'static str },

    #[error("invalid scenario: {0}")]
    Scenario(String),

    #[error(transparent)]
    Core(#[from] CoreError),
}

pub type GridResult<T> = Result<T, GridError>;
