use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ModelError {
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Utilization at or above one: the queue grows without bound and no
    /// steady-state measure exists.
    #[error("system is unstable (ρ = {rho:.4} ≥ 1); add servers or raise the service rate")]
    UnstableSystem { rho: f64 },
}

pub type ModelResult<T> = Result<T, ModelError>;
