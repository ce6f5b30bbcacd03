//! Equal-width histogram binning over the sample range.

use crate::{FitError, FitResult};

/// How many equal-width bins to lay over `[min, max]`.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum BinRule {
    /// Always `n` bins.
    Fixed(usize),
    /// `⌈log2 n⌉ + 1`.
    Sturges,
    /// The finer of Sturges and Freedman–Diaconis (`2·IQR·n^(-1/3)`),
    /// falling back to Sturges when the IQR is zero.
    Auto,
}

impl Default for BinRule {
    fn default() -> Self {
        BinRule::Fixed(10)
    }
}

impl BinRule {
    /// Bin count for `sample`, which must be non-empty with `max > min`.
    /// Never more bins than samples.
    pub fn bin_count(&self, sample: &[f64], min: f64, max: f64) -> FitResult<usize> {
        let n = sample.len();
        let count = match *self {
            BinRule::Fixed(0) => {
                return Err(FitError::InvalidParameter("bin count must be at least 1".into()));
            }
            BinRule::Fixed(k) => k,
            BinRule::Sturges => sturges(n),
            BinRule::Auto => {
                let range = max - min;
                let sturges_width = range / ((n as f64).log2() + 1.0);
                let fd_width = 2.0 * iqr(sample) / (n as f64).cbrt();
                let width = if fd_width > 0.0 { fd_width.min(sturges_width) } else { sturges_width };
                (range / width).ceil() as usize
            }
        };
        Ok(count.clamp(1, n.max(1)))
    }
}

fn sturges(n: usize) -> usize {
    (n as f64).log2().ceil() as usize + 1
}

/// Interquartile range with linear interpolation between order statistics.
fn iqr(sample: &[f64]) -> f64 {
    let mut sorted = sample.to_vec();
    sorted.sort_by(f64::total_cmp);
    percentile(&sorted, 0.75) - percentile(&sorted, 0.25)
}

fn percentile(sorted: &[f64], q: f64) -> f64 {
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    sorted[lo] + (sorted[hi] - sorted[lo]) * (pos - lo as f64)
}

/// `k + 1` equally spaced edges from `min` to `max`; the last edge is
/// exactly `max`.
pub(crate) fn edges(min: f64, max: f64, k: usize) -> Vec<f64> {
    let width = (max - min) / k as f64;
    let mut e: Vec<f64> = (0..k).map(|i| min + i as f64 * width).collect();
    e.push(max);
    e
}

/// Count samples per bin.  Bins are half-open `[low, high)` except the last,
/// which also holds `max`.
pub(crate) fn histogram(sample: &[f64], min: f64, max: f64, k: usize) -> Vec<u64> {
    let width = (max - min) / k as f64;
    let mut counts = vec![0u64; k];
    for &x in sample {
        let idx = (((x - min) / width) as usize).min(k - 1);
        counts[idx] += 1;
    }
    counts
}
