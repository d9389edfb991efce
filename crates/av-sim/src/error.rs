use av_agent::AgentError;
use av_core::CoreError;
use av_grid::GridError;
use av_mobility::MobilityError;
use av_vehicle::VehicleError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error("episode already finished after {steps} steps; call reset()")]
    EpisodeFinished { steps: u32 },

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("grid error: {0}")]
    Grid(#[from] GridError),

    #[error("agent error: {0}")]
    Agent(#[from] AgentError),

    #[error("mobility error: {0}")]
    Mobility(#[from] MobilityError),

    #[error("vehicle error: {0}")]
    Vehicle(#[from] VehicleError),
}

pub type SimResult<T> = Result<T, SimError>;
