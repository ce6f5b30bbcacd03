//! Drive a [`RunWriter`] from a finished run.

use log::{debug, info};

use qs_sim::SimulationRun;

use crate::writer::RunWriter;
use crate::{FitRow, OutputResult, PatientRow, SummaryRow, TimelineRow};

/// Write the patient table, the summary, the timeline and `fits`, then
/// finish the writer.
///
/// An empty run still produces headers; it has no summary row.
pub fn write_run<W: RunWriter>(
    writer: &mut W,
    run:    &SimulationRun,
    fits:   &[FitRow],
) -> OutputResult<()> {
    let patients: Vec<PatientRow> = run.patients().iter().map(PatientRow::from).collect();
    writer.write_patients(&patients)?;

    match run.summary() {
        Ok(summary) => writer.write_summary(&SummaryRow::new(&summary, run.stop_reason()))?,
        Err(e) => debug!("no summary row: {e}"),
    }

    let timeline: Vec<TimelineRow> = run.timeline().map(TimelineRow::from).collect();
    writer.write_timeline(&timeline)?;

    for fit in fits {
        writer.write_fit(fit)?;
    }
    writer.finish()?;

    info!("wrote {} patients and {} fit rows", patients.len(), fits.len());
    Ok(())
}
