//! Model variants, their inputs and their outputs.

use std::fmt;
use std::str::FromStr;

use crate::{ModelError, ModelResult};

/// Default state index for `Pₙ`.
pub const DEFAULT_N: u32 = 10;

// ── QueueModel ────────────────────────────────────────────────────────────────

/// Kendall notation for the supported variants.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum QueueModel {
    #[cfg_attr(feature = "serde", serde(rename = "M/M/1"))]
    MM1,
    #[cfg_attr(feature = "serde", serde(rename = "M/G/1"))]
    MG1,
    #[cfg_attr(feature = "serde", serde(rename = "M/M/c"))]
    MMc,
    #[cfg_attr(feature = "serde", serde(rename = "M/G/c"))]
    MGc,
    #[cfg_attr(feature = "serde", serde(rename = "G/G/c"))]
    GGc,
}

impl QueueModel {
    pub const ALL: [QueueModel; 5] = [
        QueueModel::MM1,
        QueueModel::MG1,
        QueueModel::MMc,
        QueueModel::MGc,
        QueueModel::GGc,
    ];

    /// `true` for the `c`-server variants, which need `servers`.
    #[inline]
    pub fn is_multi_server(self) -> bool {
        matches!(self, QueueModel::MMc | QueueModel::MGc | QueueModel::GGc)
    }

    /// `true` when the service law is general and `service_std_dev` is needed.
    #[inline]
    pub fn needs_service_std_dev(self) -> bool {
        matches!(self, QueueModel::MG1 | QueueModel::MGc | QueueModel::GGc)
    }

    #[inline]
    pub fn needs_arrival_cv(self) -> bool {
        self == QueueModel::GGc
    }
}

impl fmt::Display for QueueModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            QueueModel::MM1 => "M/M/1",
            QueueModel::MG1 => "M/G/1",
            QueueModel::MMc => "M/M/c",
            QueueModel::MGc => "M/G/c",
            QueueModel::GGc => "G/G/c",
        };
        f.write_str(s)
    }
}

impl FromStr for QueueModel {
    type Err = ModelError;

    /// Case-insensitive Kendall notation, e.g. `"M/M/1"` or `"g/g/c"`.
    fn from_str(s: &str) -> ModelResult<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "M/M/1" => Ok(QueueModel::MM1),
            "M/G/1" => Ok(QueueModel::MG1),
            "M/M/C" => Ok(QueueModel::MMc),
            "M/G/C" => Ok(QueueModel::MGc),
            "G/G/C" => Ok(QueueModel::GGc),
            other => Err(ModelError::InvalidParameter(format!(
                "unsupported queueing model {other:?}"
            ))),
        }
    }
}

// ── ModelParams ───────────────────────────────────────────────────────────────

/// Inputs to [`queueing_model`](crate::queueing_model).
///
/// Optional fields are only consulted by the variants that need them; a
/// variant that needs one and finds `None` fails with `InvalidParameter`.
#[derive(Copy, Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ModelParams {
    /// λ, arrivals per unit time.
    pub arrival_rate:    f64,
    /// μ, completions per unit time per server.
    pub service_rate:    f64,
    /// c, for the multi-server variants.
    pub servers:         Option<u32>,
    /// σ of the service time.
    pub service_std_dev: Option<f64>,
    /// cₐ, coefficient of variation of inter-arrival times (G/G/c only).
    pub arrival_cv:      Option<f64>,
    /// State index for `Pₙ`.
    #[cfg_attr(feature = "serde", serde(default = "default_n"))]
    pub n:               u32,
}

#[cfg(feature = "serde")]
fn default_n() -> u32 {
    DEFAULT_N
}

impl ModelParams {
    pub fn new(arrival_rate: f64, service_rate: f64) -> Self {
        Self {
            arrival_rate,
            service_rate,
            servers:         None,
            service_std_dev: None,
            arrival_cv:      None,
            n:               DEFAULT_N,
        }
    }

    pub fn with_servers(mut self, servers: u32) -> Self {
        self.servers = Some(servers);
        self
    }

    pub fn with_service_std_dev(mut self, sigma: f64) -> Self {
        self.service_std_dev = Some(sigma);
        self
    }

    pub fn with_arrival_cv(mut self, ca: f64) -> Self {
        self.arrival_cv = Some(ca);
        self
    }

    pub fn with_n(mut self, n: u32) -> Self {
        self.n = n;
        self
    }
}

// ── QueueingModelResult ───────────────────────────────────────────────────────

/// Steady-state measures for one model evaluation.
#[derive(Copy, Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QueueingModelResult {
    pub model: QueueModel,
    /// Utilization per server.
    pub rho:   f64,
    /// Probability the system is empty.
    pub p0:    f64,
    /// Mean number waiting in queue.
    pub lq:    f64,
    /// Mean number in system.
    pub ls:    f64,
    /// Mean wait in queue.
    pub wq:    f64,
    /// Mean time in system.
    pub ws:    f64,
    pub n:     u32,
    /// Probability of exactly `n` in system.
    pub pn:    f64,
}
