//! Cumulative probability evaluation.
//!
//! Uses the same parameter mapping as [`crate::sampler`] (both read it from
//! [`DistributionSpec`]).  Goodness-of-fit results are only meaningful while
//! that holds.

use std::fmt;

use statrs::distribution::{ContinuousCDF, DiscreteCDF, Exp, Normal, Poisson, Uniform};

use crate::{DistributionKind, DistributionSpec, QsError, QsResult};

enum Law {
    Exponential(Exp),
    Poisson(Poisson),
    Uniform(Uniform),
    Normal(Normal),
}

/// Evaluates `P(X ≤ x)` for one [`DistributionSpec`].
pub struct CdfEvaluator {
    spec: DistributionSpec,
    law:  Law,
}

impl CdfEvaluator {
    pub fn new(spec: &DistributionSpec) -> QsResult<Self> {
        let mean = spec.mean();
        let law = match spec.kind() {
            DistributionKind::Exponential => {
                Law::Exponential(Exp::new(1.0 / mean).map_err(|e| invalid(spec, e))?)
            }
            DistributionKind::Poisson => {
                Law::Poisson(Poisson::new(mean).map_err(|e| invalid(spec, e))?)
            }
            DistributionKind::Uniform => {
                let (low, high) = spec.uniform_bounds();
                Law::Uniform(Uniform::new(low, high).map_err(|e| invalid(spec, e))?)
            }
            DistributionKind::Normal => {
                Law::Normal(Normal::new(mean, spec.normal_std_dev()).map_err(|e| invalid(spec, e))?)
            }
        };
        Ok(Self { spec: *spec, law })
    }

    #[inline]
    pub fn spec(&self) -> &DistributionSpec {
        &self.spec
    }

    /// Cumulative probability at `x`, in `[0, 1]`.
    ///
    /// The Poisson law is evaluated at `⌊x⌋`.  Anything below zero has
    /// probability 0 and `+∞` has probability 1 for every kind.  NaN maps
    /// to 0.
    pub fn cdf(&self, x: f64) -> f64 {
        if x.is_nan() {
            return 0.0;
        }
        if x == f64::INFINITY {
            return 1.0;
        }
        let p = match &self.law {
            Law::Exponential(d) => d.cdf(x),
            Law::Poisson(d) => {
                if x < 0.0 {
                    0.0
                } else if x >= u64::MAX as f64 {
                    1.0
                } else {
                    d.cdf(x.floor() as u64)
                }
            }
            Law::Uniform(d) => d.cdf(x),
            // Sampled Normal draws are clamped at zero, so the mass below
            // zero sits in an atom at 0.
            Law::Normal(d) => {
                if x < 0.0 { 0.0 } else { d.cdf(x) }
            }
        };
        p.clamp(0.0, 1.0)
    }

    /// Probability mass in `(low, high]`: `cdf(high) − cdf(low)`.
    ///
    /// Floating-point error can make the difference marginally negative for
    /// a degenerate interval; the result is clamped to `[0, 1]`.
    pub fn interval_probability(&self, low: f64, high: f64) -> f64 {
        (self.cdf(high) - self.cdf(low)).clamp(0.0, 1.0)
    }
}

fn invalid(spec: &DistributionSpec, e: impl fmt::Display) -> QsError {
    QsError::InvalidParameter(format!("{spec}: {e}"))
}
