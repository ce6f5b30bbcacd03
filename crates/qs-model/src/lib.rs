//! `qs-model`: analytic steady-state queueing formulas for the qsim queue
//! simulator.
//!
//! Independent of the simulation engine: inputs are rates and variances,
//! outputs are the classic measures.
//!
//! | Variant | `Lq`                                              |
//! |---------|---------------------------------------------------|
//! | M/M/1   | ρ² / (1 − ρ)                                      |
//! | M/G/1   | (λ²σ² + ρ²) / (2(1 − ρ))                          |
//! | M/M/c   | P₀ aᶜ ρ / (c! (1 − ρ)²), a = λ/μ                  |
//! | M/G/c   | Lq(M/M/c) · (C_s² + 1) / 2, C_s² = σ²μ²           |
//! | G/G/c   | a² (cₐ² + C_s²) / (2(1 − ρ)) · Lq(M/M/c)          |
//!
//! Then `Wq = Lq/λ`, `Ws = Wq + 1/μ`, `Ls = Lq + λ/μ`.  ρ is `λ/μ` for the
//! single-server variants and `λ/(cμ)` otherwise; ρ ≥ 1 is an error.
//!
//! ```rust,ignore
//! use qs_model::{ModelParams, QueueModel, queueing_model};
//!
//! let r = queueing_model(QueueModel::MMc, &ModelParams::new(10.0, 4.0).with_servers(3))?;
//! println!("Wq = {:.3}", r.wq);
//! ```

pub mod error;
pub mod formulas;
pub mod model;


pub use error::{ModelError, ModelResult};
pub use formulas::queueing_model;
pub use model::{DEFAULT_N, ModelParams, QueueModel, QueueingModelResult};
