//! Duration sampling.
//!
//! `DurationSampler` is built once per distribution and then drawn from in
//! the simulation loop.  The random source is always supplied by the caller,
//! so seeded runs are reproducible and no sampler holds RNG state of its own.

use std::fmt;

use rand::Rng;
use rand::distributions::{Distribution, Uniform};
use rand_distr::{Exp, Normal, Poisson};

use crate::{DistributionKind, DistributionSpec, QsError, QsResult};

enum Law {
    Exponential(Exp<f64>),
    Poisson(Poisson<f64>),
    Uniform(Uniform<f64>),
    Normal(Normal<f64>),
}

/// Draws non-negative durations from one [`DistributionSpec`].
pub struct DurationSampler {
    spec: DistributionSpec,
    law:  Law,
}

impl DurationSampler {
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
                Law::Uniform(Uniform::new(low, high))
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

    /// Draw one duration.  Normal draws below zero are clamped to zero; the
    /// other laws are non-negative by construction.
    #[inline]
    pub fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        match &self.law {
            Law::Exponential(d) => d.sample(rng),
            Law::Poisson(d)     => d.sample(rng),
            Law::Uniform(d)     => d.sample(rng),
            Law::Normal(d)      => d.sample(rng).max(0.0),
        }
    }
}

fn invalid(spec: &DistributionSpec, e: impl fmt::Display) -> QsError {
    QsError::InvalidParameter(format!("{spec}: {e}"))
}

impl Distribution<f64> for DurationSampler {
    #[inline]
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        self.draw(rng)
    }
}
