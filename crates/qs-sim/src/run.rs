//! Run records: raw arrivals, scheduled patients, and aggregate statistics.

use std::fmt;

use qs_core::PatientId;

use crate::{SimError, SimResult};

// ── StopReason ────────────────────────────────────────────────────────────────

/// Which condition ended the arrival loop.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum StopReason {
    /// Elapsed time reached or would have passed the horizon.
    HorizonReached,
    /// Both running CDF masses would have exceeded 1.
    CumulativeProbability,
    /// `SimConfig::max_patients` patients were generated.
    PatientCap,
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            StopReason::HorizonReached        => "time horizon",
            StopReason::CumulativeProbability => "cumulative probability",
            StopReason::PatientCap            => "patient cap",
        };
        f.write_str(s)
    }
}

// ── ArrivalEvent ──────────────────────────────────────────────────────────────

/// Running CDF totals after a patient's gap and service draw were accepted.
#[derive(Copy, Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CumulativeMass {
    pub arrival: f64,
    pub service: f64,
}

/// One accepted arrival, before FIFO scheduling.
#[derive(Copy, Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ArrivalEvent {
    pub id:            PatientId,
    /// Gap since the previous arrival (since time 0 for the first).
    pub inter_arrival: f64,
    /// Absolute arrival time.
    pub arrival:       f64,
    pub service:       f64,
    /// Present only when the cumulative stop rule was active.
    pub cumulative:    Option<CumulativeMass>,
}

// ── Patient ───────────────────────────────────────────────────────────────────

/// A fully scheduled patient.
///
/// Invariants (see [`schedule_fifo`]):
/// `start ≥ arrival`, `completion = start + service`,
/// `waiting = response = start − arrival`, `turnaround = completion − arrival`.
#[derive(Copy, Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Patient {
    pub id:            PatientId,
    pub inter_arrival: f64,
    pub arrival:       f64,
    pub service:       f64,
    pub start:         f64,
    pub completion:    f64,
    pub waiting:       f64,
    pub turnaround:    f64,
    /// Identical to `waiting` for a non-preemptive single server.
    pub response:      f64,
    pub cumulative:    Option<CumulativeMass>,
}

/// Single-server FIFO recurrence over time-ordered arrivals.
///
/// `start[0] = arrival[0]`, `start[i] = max(arrival[i], completion[i-1])`.
pub fn schedule_fifo(events: &[ArrivalEvent]) -> Vec<Patient> {
    let mut patients = Vec::with_capacity(events.len());
    let mut server_free_at = f64::NEG_INFINITY;

    for ev in events {
        let start = ev.arrival.max(server_free_at);
        let completion = start + ev.service;
        let waiting = start - ev.arrival;
        patients.push(Patient {
            id:            ev.id,
            inter_arrival: ev.inter_arrival,
            arrival:       ev.arrival,
            service:       ev.service,
            start,
            completion,
            waiting,
            turnaround:    completion - ev.arrival,
            response:      waiting,
            cumulative:    ev.cumulative,
        });
        server_free_at = completion;
    }
    patients
}

// ── SimulationRun ─────────────────────────────────────────────────────────────

/// Output of one run: patients in arrival order plus how the run ended.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimulationRun {
    patients:           Vec<Patient>,
    stop_reason:        StopReason,
    cumulative_tracked: bool,
}

/// One bar of a Gantt-style timeline.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct TimelineBar {
    pub patient: PatientId,
    pub arrival: f64,
    pub start:   f64,
    pub finish:  f64,
}

impl SimulationRun {
    /// Schedule `events` and wrap the result.
    pub fn from_arrivals(
        events:             &[ArrivalEvent],
        stop_reason:        StopReason,
        cumulative_tracked: bool,
    ) -> Self {
        Self {
            patients: schedule_fifo(events),
            stop_reason,
            cumulative_tracked,
        }
    }

    #[inline]
    pub fn patients(&self) -> &[Patient] {
        &self.patients
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.patients.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.patients.is_empty()
    }

    #[inline]
    pub fn stop_reason(&self) -> StopReason {
        self.stop_reason
    }

    /// Whether patients carry cumulative-probability columns.
    #[inline]
    pub fn tracks_cumulative(&self) -> bool {
        self.cumulative_tracked
    }

    /// Inter-arrival gaps, for fitting against the arrival distribution.
    pub fn inter_arrival_samples(&self) -> Vec<f64> {
        self.patients.iter().map(|p| p.inter_arrival).collect()
    }

    /// Service durations, for fitting against the service distribution.
    pub fn service_samples(&self) -> Vec<f64> {
        self.patients.iter().map(|p| p.service).collect()
    }

    /// Arrival-to-completion bars for timeline charts.
    pub fn timeline(&self) -> impl Iterator<Item = TimelineBar> + '_ {
        self.patients.iter().map(|p| TimelineBar {
            patient: p.id,
            arrival: p.arrival,
            start:   p.start,
            finish:  p.completion,
        })
    }

    /// Aggregate statistics.
    ///
    /// Fails with [`SimError::EmptySimulation`] when no patient arrived.
    /// Utilization inside the summary is `None` when the run spans zero
    /// time; use [`utilization`][Self::utilization] for an explicit error.
    pub fn summary(&self) -> SimResult<RunSummary> {
        let (Some(first), Some(last)) = (self.patients.first(), self.patients.last()) else {
            return Err(SimError::EmptySimulation(self.stop_reason));
        };

        let n = self.patients.len() as f64;
        let mean = |f: fn(&Patient) -> f64| self.patients.iter().map(f).sum::<f64>() / n;

        let total_service: f64 = self.patients.iter().map(|p| p.service).sum();
        let makespan = last.completion - first.arrival;
        let max_waiting = self
            .patients
            .iter()
            .map(|p| p.waiting)
            .fold(0.0, f64::max);

        Ok(RunSummary {
            patients:           self.patients.len(),
            mean_arrival:       mean(|p| p.arrival),
            mean_inter_arrival: mean(|p| p.inter_arrival),
            mean_service:       mean(|p| p.service),
            mean_waiting:       mean(|p| p.waiting),
            mean_turnaround:    mean(|p| p.turnaround),
            mean_response:      mean(|p| p.response),
            max_waiting,
            total_service,
            makespan,
            utilization: (makespan > 0.0).then(|| total_service / makespan),
        })
    }

    /// Busy fraction of the server: `Σ service ÷ (last completion − first arrival)`.
    pub fn utilization(&self) -> SimResult<f64> {
        self.summary()?
            .utilization
            .ok_or(SimError::UndefinedUtilization)
    }
}

// ── RunSummary ────────────────────────────────────────────────────────────────

/// Column means and server utilization of a non-empty run.
#[derive(Copy, Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunSummary {
    pub patients:           usize,
    /// Mean absolute arrival time.
    pub mean_arrival:       f64,
    pub mean_inter_arrival: f64,
    pub mean_service:       f64,
    pub mean_waiting:       f64,
    pub mean_turnaround:    f64,
    pub mean_response:      f64,
    pub max_waiting:        f64,
    pub total_service:      f64,
    /// Last completion minus first arrival.
    pub makespan:           f64,
    /// `None` when `makespan` is zero.
    pub utilization:        Option<f64>,
}
