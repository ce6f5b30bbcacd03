//! The `RunWriter` trait implemented by backend writers.

use crate::{FitRow, OutputResult, PatientRow, SummaryRow, TimelineRow};

/// Sink for everything a finished run produces.
pub trait RunWriter {
    /// Write a batch of patient rows.
    fn write_patients(&mut self, rows: &[PatientRow]) -> OutputResult<()>;

    fn write_summary(&mut self, row: &SummaryRow) -> OutputResult<()>;

    fn write_timeline(&mut self, rows: &[TimelineRow]) -> OutputResult<()>;

    fn write_fit(&mut self, row: &FitRow) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent.
    fn finish(&mut self) -> OutputResult<()>;
}
