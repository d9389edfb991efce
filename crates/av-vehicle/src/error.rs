use thiserror::Error;

use av_core::VehicleId;

#[derive(Debug, Error)]
pub enum VehicleError {
    #[error("{0} runs in hybrid mode but has no policy")]
    MissingPolicy(VehicleId),

    #[error("wait threshold must be at least 1")]
    ZeroThreshold,
}

pub type VehicleResult<T> = Result<T, VehicleError>;
