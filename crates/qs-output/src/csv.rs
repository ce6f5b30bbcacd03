//! CSV output backend.
//!
//! Creates four files in the configured output directory:
//! - `queue_simulation.csv`
//! - `summary.csv`
//! - `timeline.csv`
//! - `goodness_of_fit.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::RunWriter;
use crate::{FitRow, OutputResult, PatientRow, SummaryRow, TimelineRow};

const PATIENT_HEADER: [&str; 8] = [
    "patient",
    "arrival_time",
    "service_time",
    "start_time",
    "completion_time",
    "waiting_time",
    "turnaround_time",
    "response_time",
];

/// Writes run output to four CSV files.
pub struct CsvWriter {
    patients:   Writer<File>,
    summary:    Writer<File>,
    timeline:   Writer<File>,
    fits:       Writer<File>,
    cumulative: bool,
    finished:   bool,
}

impl CsvWriter {
    /// Open (or create) the four CSV files in `dir` and write the header rows.
    ///
    /// With `cumulative` set, the patient table gains `arrival_cp` and
    /// `service_cp` columns.
    pub fn new(dir: &Path, cumulative: bool) -> OutputResult<Self> {
        let mut patients = Writer::from_path(dir.join("queue_simulation.csv"))?;
        let mut header: Vec<&str> = PATIENT_HEADER.to_vec();
        if cumulative {
            header.extend(["arrival_cp", "service_cp"]);
        }
        patients.write_record(&header)?;

        let mut summary = Writer::from_path(dir.join("summary.csv"))?;
        summary.write_record([
            "patients",
            "stop_reason",
            "mean_inter_arrival",
            "mean_service",
            "mean_waiting",
            "mean_turnaround",
            "mean_response",
            "max_waiting",
            "makespan",
            "utilization",
        ])?;

        let mut timeline = Writer::from_path(dir.join("timeline.csv"))?;
        timeline.write_record(["patient", "arrival", "start", "finish"])?;

        let mut fits = Writer::from_path(dir.join("goodness_of_fit.csv"))?;
        fits.write_record([
            "column",
            "distribution",
            "statistic",
            "p_value",
            "degrees_of_freedom",
            "critical_value",
            "alpha",
            "decision",
        ])?;

        Ok(Self {
            patients,
            summary,
            timeline,
            fits,
            cumulative,
            finished: false,
        })
    }
}

/// Blank cell for a missing value.
fn opt(v: Option<f64>) -> String {
    v.map(|x| x.to_string()).unwrap_or_default()
}

impl RunWriter for CsvWriter {
    fn write_patients(&mut self, rows: &[PatientRow]) -> OutputResult<()> {
        for row in rows {
            let mut record = vec![
                row.patient.to_string(),
                row.arrival_time.to_string(),
                row.service_time.to_string(),
                row.start_time.to_string(),
                row.completion_time.to_string(),
                row.waiting_time.to_string(),
                row.turnaround_time.to_string(),
                row.response_time.to_string(),
            ];
            if self.cumulative {
                record.push(opt(row.arrival_cp));
                record.push(opt(row.service_cp));
            }
            self.patients.write_record(&record)?;
        }
        Ok(())
    }

    fn write_summary(&mut self, row: &SummaryRow) -> OutputResult<()> {
        self.summary.write_record(&[
            row.patients.to_string(),
            row.stop_reason.to_string(),
            row.mean_inter_arrival.to_string(),
            row.mean_service.to_string(),
            row.mean_waiting.to_string(),
            row.mean_turnaround.to_string(),
            row.mean_response.to_string(),
            row.max_waiting.to_string(),
            row.makespan.to_string(),
            opt(row.utilization),
        ])?;
        Ok(())
    }

    fn write_timeline(&mut self, rows: &[TimelineRow]) -> OutputResult<()> {
        for row in rows {
            self.timeline.write_record(&[
                row.patient.to_string(),
                row.arrival.to_string(),
                row.start.to_string(),
                row.finish.to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_fit(&mut self, row: &FitRow) -> OutputResult<()> {
        self.fits.write_record(&[
            row.column.clone(),
            row.distribution.clone(),
            row.statistic.to_string(),
            row.p_value.to_string(),
            row.degrees_of_freedom.to_string(),
            row.critical_value.to_string(),
            row.alpha.to_string(),
            if row.accepted { "Accepted" } else { "Rejected" }.to_string(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.patients.flush()?;
        self.summary.flush()?;
        self.timeline.flush()?;
        self.fits.flush()?;
        Ok(())
    }
}
