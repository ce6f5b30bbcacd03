//! Run configuration and stopping policy.

use qs_core::{DistributionSpec, QsRng};

use crate::{SimError, SimResult};

// ── StopPolicy ────────────────────────────────────────────────────────────────

/// Which stop conditions end the arrival loop.
///
/// The patient cap in [`SimConfig::max_patients`] always applies on top.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum StopPolicy {
    /// Stop once the next arrival would fall after the horizon.
    #[default]
    Horizon,
    /// Stop once both running CDF masses would exceed 1.  The horizon is
    /// ignored.
    CumulativeProbability,
    /// Whichever of the two fires first.
    HorizonAndCumulative,
}

impl StopPolicy {
    /// Map the classic "stop on cumulative probability" checkbox: the
    /// horizon always applies, the cumulative rule only when enabled.
    pub fn from_flag(stop_on_cumulative: bool) -> Self {
        if stop_on_cumulative {
            StopPolicy::HorizonAndCumulative
        } else {
            StopPolicy::Horizon
        }
    }

    #[inline]
    pub fn uses_horizon(self) -> bool {
        matches!(self, StopPolicy::Horizon | StopPolicy::HorizonAndCumulative)
    }

    #[inline]
    pub fn uses_cumulative(self) -> bool {
        matches!(self, StopPolicy::CumulativeProbability | StopPolicy::HorizonAndCumulative)
    }
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Immutable description of one simulation run.
///
/// Typically built in code or loaded from a JSON scenario file by the
/// application crate, then handed to [`SimBuilder`][crate::SimBuilder].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimConfig {
    /// Inter-arrival gap distribution.
    pub arrival: DistributionSpec,

    /// Service duration distribution.
    pub service: DistributionSpec,

    /// Simulated time after which no new arrival is accepted.  Ignored by
    /// [`StopPolicy::CumulativeProbability`].
    pub horizon: f64,

    #[cfg_attr(feature = "serde", serde(default))]
    pub stop_policy: StopPolicy,

    /// Hard upper bound on generated patients, so a parameter choice whose
    /// stop condition never fires cannot loop forever.
    #[cfg_attr(feature = "serde", serde(default = "default_max_patients"))]
    pub max_patients: usize,

    /// Lower bound applied to every drawn gap and service duration.
    /// `0.0` leaves draws untouched.
    #[cfg_attr(feature = "serde", serde(default))]
    pub duration_floor: f64,

    /// RNG seed.  `None` draws a fresh seed from the OS on every run.
    #[cfg_attr(feature = "serde", serde(default))]
    pub seed: Option<u64>,
}

#[cfg(feature = "serde")]
fn default_max_patients() -> usize {
    SimConfig::DEFAULT_MAX_PATIENTS
}

impl SimConfig {
    pub const DEFAULT_MAX_PATIENTS: usize = 100_000;

    /// Horizon-only config with default cap, no floor and no seed.
    pub fn new(arrival: DistributionSpec, service: DistributionSpec, horizon: f64) -> Self {
        Self {
            arrival,
            service,
            horizon,
            stop_policy:    StopPolicy::Horizon,
            max_patients:   Self::DEFAULT_MAX_PATIENTS,
            duration_floor: 0.0,
            seed:           None,
        }
    }

    pub fn with_stop_policy(mut self, policy: StopPolicy) -> Self {
        self.stop_policy = policy;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Check everything the distribution specs do not already guarantee.
    pub fn validate(&self) -> SimResult<()> {
        if self.horizon.is_nan() || self.horizon <= 0.0 {
            return Err(SimError::Config(format!(
                "horizon must be positive, got {}",
                self.horizon
            )));
        }
        if self.max_patients == 0 || self.max_patients > u32::MAX as usize {
            return Err(SimError::Config(format!(
                "max_patients must be in 1..={}, got {}",
                u32::MAX,
                self.max_patients
            )));
        }
        if !self.duration_floor.is_finite() || self.duration_floor < 0.0 {
            return Err(SimError::Config(format!(
                "duration_floor must be a non-negative finite number, got {}",
                self.duration_floor
            )));
        }
        Ok(())
    }

    /// RNG for this run: seeded when `seed` is set.
    pub fn make_rng(&self) -> QsRng {
        QsRng::from_optional_seed(self.seed)
    }
}
