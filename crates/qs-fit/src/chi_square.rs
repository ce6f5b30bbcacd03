//! Pearson Chi-square goodness-of-fit test.

use std::fmt;

use log::{debug, warn};
use statrs::distribution::{ChiSquared, ContinuousCDF};

use qs_core::{CdfEvaluator, DistributionSpec};

use crate::bins::{edges, histogram};
use crate::{BinRule, FitError, FitResult};

// ── Configuration ─────────────────────────────────────────────────────────────

/// Tunables for [`chi_square_test`].
#[derive(Copy, Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FitConfig {
    pub bins: BinRule,

    /// Significance level.  Default 0.05.
    pub alpha: f64,

    /// Parameters treated as estimated from the data, subtracted from the
    /// degrees of freedom.  `None` uses the distribution's own parameter
    /// count (1 for every supported kind).  With the default, samples
    /// drawn from the tested law are accepted about 90 % of the time at
    /// α = 0.05; `Some(0)` for a known mean restores about 95 %.
    pub estimated_params: Option<usize>,

    /// Bins whose rescaled expected count falls below this are merged into a
    /// neighbour.  Bins with zero expected count are merged regardless.
    pub min_expected: f64,
}

impl Default for FitConfig {
    fn default() -> Self {
        Self {
            bins:             BinRule::default(),
            alpha:            0.05,
            estimated_params: None,
            min_expected:     5.0,
        }
    }
}

impl FitConfig {
    fn validate(&self) -> FitResult<()> {
        if !(self.alpha > 0.0 && self.alpha < 1.0) {
            return Err(FitError::InvalidParameter(format!(
                "alpha must lie in (0, 1), got {}",
                self.alpha
            )));
        }
        if !self.min_expected.is_finite() || self.min_expected < 0.0 {
            return Err(FitError::InvalidParameter(format!(
                "min_expected must be a non-negative finite number, got {}",
                self.min_expected
            )));
        }
        Ok(())
    }
}

// ── Result types ──────────────────────────────────────────────────────────────

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Decision {
    /// p-value above α: the sample is consistent with the distribution.
    Accepted,
    Rejected,
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Decision::Accepted => "Accepted",
            Decision::Rejected => "Rejected",
        })
    }
}

/// One (possibly merged) bin that entered the statistic.
#[derive(Copy, Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FitBin {
    pub low:      f64,
    pub high:     f64,
    pub observed: u64,
    /// Rescaled so that expected counts sum to the observed total.
    pub expected: f64,
}

#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GoodnessOfFit {
    pub statistic:          f64,
    pub p_value:            f64,
    pub degrees_of_freedom: usize,
    /// χ² quantile at `1 − alpha`.
    pub critical_value:     f64,
    pub alpha:              f64,
    pub decision:           Decision,
    pub bins:               Vec<FitBin>,
    /// Raw histogram bins before merging.
    pub raw_bins:           usize,
}

impl GoodnessOfFit {
    #[inline]
    pub fn accepted(&self) -> bool {
        self.decision == Decision::Accepted
    }
}

// ── Test ──────────────────────────────────────────────────────────────────────

/// Test whether `sample` plausibly comes from `spec`.
///
/// Bins span the sample's min..max.  Expected counts come from the CDF over
/// each bin and are rescaled to the observed total, since the sample range
/// truncates the distribution's support.  Sparse bins are merged before the
/// statistic is formed.
///
/// Returns [`FitError::Degenerate`] when the outcome is indeterminate: empty
/// or non-finite sample, zero-width range, no probability mass over the
/// range, or too few bins left for a positive number of degrees of freedom.
pub fn chi_square_test(
    sample: &[f64],
    spec:   &DistributionSpec,
    config: &FitConfig,
) -> FitResult<GoodnessOfFit> {
    config.validate()?;

    if sample.is_empty() {
        return Err(FitError::Degenerate("empty sample".into()));
    }
    if sample.iter().any(|x| !x.is_finite()) {
        return Err(FitError::Degenerate("sample contains non-finite values".into()));
    }

    let (min, max) = sample
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &x| (lo.min(x), hi.max(x)));
    if max <= min {
        return Err(FitError::Degenerate(format!("all {} samples equal {min}", sample.len())));
    }

    let k = config.bins.bin_count(sample, min, max)?;
    let edges = edges(min, max, k);
    let observed = histogram(sample, min, max, k);

    // Probability of each bin, with the same half-open edges as the histogram.
    let eval = CdfEvaluator::new(spec)?;
    let probs: Vec<f64> = (0..k)
        .map(|i| {
            let high = if i + 1 == k { edges[k] } else { left_limit(edges[i + 1]) };
            eval.interval_probability(left_limit(edges[i]), high)
        })
        .collect();

    let total_prob: f64 = probs.iter().sum();
    if total_prob <= 0.0 {
        return Err(FitError::Degenerate(format!(
            "{spec} assigns no probability to [{min}, {max}]"
        )));
    }
    let n = sample.len() as f64;
    let raw: Vec<FitBin> = (0..k)
        .map(|i| FitBin {
            low:      edges[i],
            high:     edges[i + 1],
            observed: observed[i],
            expected: probs[i] * n / total_prob,
        })
        .collect();

    let bins = merge_sparse(&raw, config.min_expected);
    if bins.len() < raw.len() {
        debug!("{spec}: merged {} sparse bins into {}", raw.len(), bins.len());
    }

    let params = config.estimated_params.unwrap_or(spec.kind().parameter_count());
    let dof = bins.len() as isize - 1 - params as isize;
    if dof <= 0 {
        warn!("{spec}: {} bins leave {dof} degrees of freedom", bins.len());
        return Err(FitError::Degenerate(format!(
            "{} bins with {params} estimated parameters leave {dof} degrees of freedom",
            bins.len()
        )));
    }

    let statistic: f64 = bins
        .iter()
        .map(|b| {
            let d = b.observed as f64 - b.expected;
            d * d / b.expected
        })
        .sum();

    let chi2 = ChiSquared::new(dof as f64)
        .map_err(|e| FitError::InvalidParameter(format!("chi-square with {dof} dof: {e}")))?;
    let p_value = chi2.sf(statistic).clamp(0.0, 1.0);
    let critical_value = chi2.inverse_cdf(1.0 - config.alpha);
    let decision = if p_value > config.alpha { Decision::Accepted } else { Decision::Rejected };

    debug!("{spec}: chi2={statistic:.4} dof={dof} p={p_value:.4} → {decision}");

    Ok(GoodnessOfFit {
        statistic,
        p_value,
        degrees_of_freedom: dof as usize,
        critical_value,
        alpha: config.alpha,
        decision,
        bins,
        raw_bins: k,
    })
}

/// A point just below `x`, so CDF differences cover `[low, high)` and atoms
/// sitting on an edge (Poisson integers, the Normal clamp at zero) land in
/// the same bin as the histogram puts them.
#[inline]
fn left_limit(x: f64) -> f64 {
    x - 1e-9 * x.abs().max(1.0)
}

/// Merge left to right until each group reaches `min_expected` (and is
/// positive); a short tail is folded into the last complete group.
fn merge_sparse(raw: &[FitBin], min_expected: f64) -> Vec<FitBin> {
    let mut merged: Vec<FitBin> = Vec::with_capacity(raw.len());
    let mut pending: Option<FitBin> = None;

    for bin in raw {
        let group = match pending.take() {
            None => *bin,
            Some(p) => FitBin {
                low:      p.low,
                high:     bin.high,
                observed: p.observed + bin.observed,
                expected: p.expected + bin.expected,
            },
        };
        if group.expected > 0.0 && group.expected >= min_expected {
            merged.push(group);
        } else {
            pending = Some(group);
        }
    }

    if let Some(tail) = pending {
        match merged.last_mut() {
            Some(last) => {
                last.high = tail.high;
                last.observed += tail.observed;
                last.expected += tail.expected;
            }
            // The whole sample never reached the threshold.
            None => merged.push(tail),
        }
    }
    merged
}
