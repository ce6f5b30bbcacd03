//! `qs-output`: run output writers for the qsim queue simulator.
//!
//! | Backend | Files created                                                            |
//! |---------|--------------------------------------------------------------------------|
//! | CSV     | `queue_simulation.csv`, `summary.csv`, `timeline.csv`, `goodness_of_fit.csv` |
//!
//! Backends implement [`RunWriter`]; [`write_run`] feeds one a finished
//! [`SimulationRun`](qs_sim::SimulationRun).
//!
//! # Usage
//!
//! ```rust,ignore
//! use qs_output::{CsvWriter, write_run};
//!
//! let mut writer = CsvWriter::new(Path::new("./output"), run.tracks_cumulative())?;
//! write_run(&mut writer, &run, &fit_rows)?;
//! ```

pub mod csv;
pub mod error;
pub mod export;
pub mod row;
pub mod writer;


pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use export::write_run;
pub use row::{FitRow, PatientRow, SummaryRow, TimelineRow};
pub use writer::RunWriter;
