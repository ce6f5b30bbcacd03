//! Plain data row types written by output backends.

use qs_core::DistributionSpec;
use qs_fit::GoodnessOfFit;
use qs_sim::{Patient, RunSummary, StopReason, TimelineBar};

/// One simulated patient.  `patient` is the 1-based ordinal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PatientRow {
    pub patient:         u64,
    pub arrival_time:    f64,
    pub service_time:    f64,
    pub start_time:      f64,
    pub completion_time: f64,
    pub waiting_time:    f64,
    pub turnaround_time: f64,
    pub response_time:   f64,
    /// Accumulated arrival-CDF mass; only present in cumulative runs.
    pub arrival_cp:      Option<f64>,
    pub service_cp:      Option<f64>,
}

impl From<&Patient> for PatientRow {
    fn from(p: &Patient) -> Self {
        Self {
            patient:         p.id.ordinal(),
            arrival_time:    p.arrival,
            service_time:    p.service,
            start_time:      p.start,
            completion_time: p.completion,
            waiting_time:    p.waiting,
            turnaround_time: p.turnaround,
            response_time:   p.response,
            arrival_cp:      p.cumulative.map(|c| c.arrival),
            service_cp:      p.cumulative.map(|c| c.service),
        }
    }
}

/// Run-level averages.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SummaryRow {
    pub patients:           usize,
    pub stop_reason:        StopReason,
    pub mean_inter_arrival: f64,
    pub mean_service:       f64,
    pub mean_waiting:       f64,
    pub mean_turnaround:    f64,
    pub mean_response:      f64,
    pub max_waiting:        f64,
    pub makespan:           f64,
    /// `None` when the run spans zero time.
    pub utilization:        Option<f64>,
}

impl SummaryRow {
    pub fn new(summary: &RunSummary, stop_reason: StopReason) -> Self {
        Self {
            patients:           summary.patients,
            stop_reason,
            mean_inter_arrival: summary.mean_inter_arrival,
            mean_service:       summary.mean_service,
            mean_waiting:       summary.mean_waiting,
            mean_turnaround:    summary.mean_turnaround,
            mean_response:      summary.mean_response,
            max_waiting:        summary.max_waiting,
            makespan:           summary.makespan,
            utilization:        summary.utilization,
        }
    }
}

/// One Gantt bar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimelineRow {
    pub patient: u64,
    pub arrival: f64,
    pub start:   f64,
    pub finish:  f64,
}

impl From<TimelineBar> for TimelineRow {
    fn from(bar: TimelineBar) -> Self {
        Self {
            patient: bar.patient.ordinal(),
            arrival: bar.arrival,
            start:   bar.start,
            finish:  bar.finish,
        }
    }
}

/// Outcome of one χ² test, labelled with the column it checked.
#[derive(Debug, Clone, PartialEq)]
pub struct FitRow {
    pub column:             String,
    pub distribution:       String,
    pub statistic:          f64,
    pub p_value:            f64,
    pub degrees_of_freedom: usize,
    pub critical_value:     f64,
    pub alpha:              f64,
    pub accepted:           bool,
}

impl FitRow {
    pub fn new(column: impl Into<String>, spec: &DistributionSpec, fit: &GoodnessOfFit) -> Self {
        Self {
            column:             column.into(),
            distribution:       spec.to_string(),
            statistic:          fit.statistic,
            p_value:            fit.p_value,
            degrees_of_freedom: fit.degrees_of_freedom,
            critical_value:     fit.critical_value,
            alpha:              fit.alpha,
            accepted:           fit.accepted(),
        }
    }
}
