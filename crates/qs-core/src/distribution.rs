//! Named duration distributions and their parameterization.
//!
//! Every supported law is described by a single `mean`.  The mapping from
//! `mean` to the law's native parameters lives here and nowhere else, so the
//! sampler and the CDF evaluator cannot drift apart:
//!
//! | Kind          | Native parameters                                  |
//! |---------------|----------------------------------------------------|
//! | `Exponential` | scale = mean (rate = 1 / mean)                     |
//! | `Poisson`     | rate λ = mean                                      |
//! | `Uniform`     | support `[0.5 · mean, 1.5 · mean]`                 |
//! | `Normal`      | location = mean, std-dev = `NORMAL_SPREAD` · mean  |

use std::fmt;
use std::str::FromStr;

use rand::Rng;

use crate::{CdfEvaluator, DurationSampler, QsError, QsResult};

/// Normal standard deviation as a fraction of the mean.  Used for both
/// sampling and CDF evaluation.
pub const NORMAL_SPREAD: f64 = 0.3;

// ── DistributionKind ──────────────────────────────────────────────────────────

/// The supported duration laws.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DistributionKind {
    Exponential,
    Poisson,
    Uniform,
    Normal,
}

impl DistributionKind {
    pub const ALL: [DistributionKind; 4] = [
        DistributionKind::Exponential,
        DistributionKind::Poisson,
        DistributionKind::Uniform,
        DistributionKind::Normal,
    ];

    /// Number of parameters a fit test treats as estimated from data.
    /// Every kind here is driven by its mean alone.
    #[inline]
    pub fn parameter_count(self) -> usize {
        1
    }
}

impl fmt::Display for DistributionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DistributionKind::Exponential => "Exponential",
            DistributionKind::Poisson     => "Poisson",
            DistributionKind::Uniform     => "Uniform",
            DistributionKind::Normal      => "Normal",
        };
        f.write_str(s)
    }
}

impl FromStr for DistributionKind {
    type Err = QsError;

    /// Case-insensitive parse of the display name.
    fn from_str(s: &str) -> QsResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "exponential" => Ok(DistributionKind::Exponential),
            "poisson"     => Ok(DistributionKind::Poisson),
            "uniform"     => Ok(DistributionKind::Uniform),
            "normal"      => Ok(DistributionKind::Normal),
            other => Err(QsError::InvalidParameter(format!(
                "unsupported distribution {other:?}"
            ))),
        }
    }
}

// ── DistributionSpec ──────────────────────────────────────────────────────────

/// A distribution kind plus its (strictly positive, finite) mean.
///
/// Construction validates the mean, so a `DistributionSpec` in hand is always
/// usable for sampling and CDF evaluation.
#[derive(Copy, Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "SpecRepr", into = "SpecRepr"))]
pub struct DistributionSpec {
    kind: DistributionKind,
    mean: f64,
}

impl DistributionSpec {
    pub fn new(kind: DistributionKind, mean: f64) -> QsResult<Self> {
        if !mean.is_finite() || mean <= 0.0 {
            return Err(QsError::InvalidParameter(format!(
                "{kind} mean must be a positive finite number, got {mean}"
            )));
        }
        Ok(Self { kind, mean })
    }

    #[inline]
    pub fn kind(&self) -> DistributionKind {
        self.kind
    }

    #[inline]
    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// `[low, high)` support of the `Uniform` law for this mean.
    #[inline]
    pub fn uniform_bounds(&self) -> (f64, f64) {
        (0.5 * self.mean, 1.5 * self.mean)
    }

    /// Standard deviation of the `Normal` law for this mean.
    #[inline]
    pub fn normal_std_dev(&self) -> f64 {
        NORMAL_SPREAD * self.mean
    }

    /// Build a reusable sampler for this distribution.
    pub fn sampler(&self) -> QsResult<DurationSampler> {
        DurationSampler::new(self)
    }

    /// Build a reusable CDF evaluator for this distribution.
    pub fn evaluator(&self) -> QsResult<CdfEvaluator> {
        CdfEvaluator::new(self)
    }

    /// Draw a single non-negative duration.
    ///
    /// Prefer [`sampler`][Self::sampler] in loops; this rebuilds the
    /// underlying distribution on every call.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> QsResult<f64> {
        Ok(self.sampler()?.draw(rng))
    }

    /// Cumulative probability at `x`.
    pub fn cdf(&self, x: f64) -> QsResult<f64> {
        Ok(self.evaluator()?.cdf(x))
    }

    /// `cdf(high) − cdf(low)`, clamped to `[0, 1]`.
    pub fn interval_probability(&self, low: f64, high: f64) -> QsResult<f64> {
        Ok(self.evaluator()?.interval_probability(low, high))
    }
}

impl fmt::Display for DistributionSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(mean={})", self.kind, self.mean)
    }
}

// ── serde representation ──────────────────────────────────────────────────────

/// Unvalidated wire form; deserialization goes through `DistributionSpec::new`.
#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
struct SpecRepr {
    kind: DistributionKind,
    mean: f64,
}

#[cfg(feature = "serde")]
impl TryFrom<SpecRepr> for DistributionSpec {
    type Error = QsError;
    fn try_from(r: SpecRepr) -> QsResult<Self> {
        DistributionSpec::new(r.kind, r.mean)
    }
}

#[cfg(feature = "serde")]
impl From<DistributionSpec> for SpecRepr {
    fn from(s: DistributionSpec) -> Self {
        SpecRepr { kind: s.kind, mean: s.mean }
    }
}
