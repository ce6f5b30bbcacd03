use qs_core::QsError;
use thiserror::Error;

use crate::StopReason;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum SimError {
    #[error(transparent)]
    Core(#[from] QsError),

    #[error("simulation configuration error: {0}")]
    Config(String),

    /// The stop condition fired before the first patient arrived, so no
    /// aggregate statistic exists.
    #[error("simulation produced no patients (stopped by {0})")]
    EmptySimulation(StopReason),

    /// First arrival and last completion coincide; utilization would divide
    /// by zero.
    #[error("utilization is undefined: the run spans zero time")]
    UndefinedUtilization,
}

pub type SimResult<T> = Result<T, SimError>;
