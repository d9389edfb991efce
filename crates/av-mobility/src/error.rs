//! Mobility-subsystem error type.

use thiserror::Error;

use av_grid::GridError;

#[derive(Debug, Error)]
pub enum MobilityError {
    #[error("grid error while moving agents: {0}")]
    Grid(#[from] GridError),

    #[error("resample probability {0} outside [0, 1]")]
    BadProbability(f64),
}

pub type MobilityResult<T> = Result<T, MobilityError>;
