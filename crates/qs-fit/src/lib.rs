//! `qs-fit`: Chi-square goodness-of-fit checks for the qsim queue simulator.
//!
//! # Procedure
//!
//! ```text
//! ① Bin    : equal-width bins over [min, max] of the sample (BinRule)
//! ② Observe: count samples per bin
//! ③ Expect : CDF mass per bin, rescaled so Σ expected = Σ observed
//! ④ Merge  : fold bins with expected < min_expected into a neighbour
//! ⑤ Test   : χ² = Σ (O − E)² / E, dof = bins − 1 − estimated params
//! ⑥ Decide : Accepted iff p > α
//! ```
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use qs_fit::{chi_square_test, FitConfig};
//!
//! let fit = chi_square_test(&run.service_samples(), &config.service, &FitConfig::default())?;
//! println!("χ² = {:.2}, p = {:.4}: {}", fit.statistic, fit.p_value, fit.decision);
//! ```

pub mod bins;
pub mod chi_square;
pub mod error;


pub use bins::BinRule;
pub use chi_square::{Decision, FitBin, FitConfig, GoodnessOfFit, chi_square_test};
pub use error::{FitError, FitResult};
