//! `qs-core`: foundational types for the `qsim` queue simulator.
//!
//! This crate is a dependency of every other `qs-*` crate.  It intentionally
//! has no `qs-*` dependencies.
//!
//! # What lives here
//!
//! | Module           | Contents                                              |
//! |------------------|-------------------------------------------------------|
//! | [`ids`]          | `PatientId`                                           |
//! | [`distribution`] | `DistributionKind`, `DistributionSpec`                |
//! | [`sampler`]      | `DurationSampler` (draws non-negative durations)      |
//! | [`cdf`]          | `CdfEvaluator` (cumulative and interval probability)  |
//! | [`rng`]          | `QsRng` (seeded or entropy-seeded run RNG)            |
//! | [`error`]        | `QsError`, `QsResult`                                 |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | `Serialize`/`Deserialize` on public types (scenario files) |

pub mod cdf;
pub mod distribution;
pub mod error;
pub mod ids;
pub mod rng;
pub mod sampler;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use cdf::CdfEvaluator;
pub use distribution::{DistributionKind, DistributionSpec, NORMAL_SPREAD};
pub use error::{QsError, QsResult};
pub use ids::PatientId;
pub use rng::QsRng;
pub use sampler::DurationSampler;
