use qs_core::QsError;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum FitError {
    #[error(transparent)]
    Core(#[from] QsError),

    #[error("invalid fit configuration: {0}")]
    InvalidParameter(String),

    /// The test cannot be computed for this sample; the outcome is
    /// indeterminate rather than accepted or rejected.
    #[error("goodness-of-fit test is indeterminate: {0}")]
    Degenerate(String),
}

pub type FitResult<T> = Result<T, FitError>;
