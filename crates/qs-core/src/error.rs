//! Framework error type.
//!
//! Sub-crates define their own error enums and wrap `QsError` as one variant
//! via `#[from]`, so a bad distribution parameter surfaces unchanged through
//! the simulation and fit layers.

use thiserror::Error;

/// The base error type for `qs-core`.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum QsError {
    /// A parameter failed validation before any sampling took place
    /// (mean ≤ 0, non-finite input, unknown distribution name, …).
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Shorthand result type for `qs-core`.
pub type QsResult<T> = Result<T, QsError>;
