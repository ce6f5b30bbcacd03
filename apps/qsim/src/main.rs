//! qsim: command-line front end for the qsim queue simulator.
//!
//! `simulate` runs a JSON scenario, prints the patient table and averages,
//! checks both sampled columns with a χ² test and optionally writes CSVs.
//! `model` evaluates one of the closed-form queueing models.

mod args;
mod report;
mod scenario;


use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::Result;
use log::{info, warn};

use qs_core::DistributionSpec;
use qs_fit::{FitConfig, FitError, chi_square_test};
use qs_model::{ModelParams, QueueModel, queueing_model};
use qs_output::{CsvWriter, FitRow, write_run};
use qs_sim::{SimBuilder, SimulationRun};

use args::{Args, Command, USAGE};
use scenario::Scenario;

fn main() -> Result<()> {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .format_timestamp(None)
        .init();

    match Args::parse()?.command {
        Command::Simulate { scenario, out_dir, seed } => run_simulation(&scenario, out_dir, seed),
        Command::Model { model, params, json } => run_model(model, &params, json),
        Command::Help => {
            print!("{USAGE}");
            Ok(())
        }
    }
}

// ── simulate ──────────────────────────────────────────────────────────────────

fn run_simulation(path: &Path, out_dir: Option<PathBuf>, seed: Option<u64>) -> Result<()> {
    let mut scenario = Scenario::load(path)?;
    if seed.is_some() {
        scenario.simulation.seed = seed;
    }
    let config = scenario.simulation.clone();

    println!("=== qsim: {} ===", path.display());
    println!(
        "Arrivals: {}  |  Service: {}  |  Horizon: {}  |  Stop: {:?}",
        config.arrival, config.service, config.horizon, config.stop_policy
    );
    println!();

    let mut sim = SimBuilder::new(config.clone()).build()?;
    let t0 = Instant::now();
    let run = sim.run(&mut config.make_rng())?;
    info!("simulated {} patients in {:.3} ms", run.len(), t0.elapsed().as_secs_f64() * 1e3);

    if run.is_empty() {
        println!("No patient arrived before the run stopped ({}).", run.stop_reason());
    } else {
        report::print_patients(&run);
        report::print_summary(&run.summary()?);
    }

    let fits = fit_columns(&run, &config.arrival, &config.service, &scenario.fit)?;

    if let Some(dir) = out_dir {
        std::fs::create_dir_all(&dir)?;
        let mut writer = CsvWriter::new(&dir, run.tracks_cumulative())?;
        write_run(&mut writer, &run, &fits)?;
        println!();
        println!("CSV output written to {}", dir.display());
    }
    Ok(())
}

/// χ² on inter-arrival gaps and service durations.  A column too small or
/// too uniform to test is reported and skipped.
fn fit_columns(
    run:     &SimulationRun,
    arrival: &DistributionSpec,
    service: &DistributionSpec,
    config:  &FitConfig,
) -> Result<Vec<FitRow>> {
    let columns = [
        ("inter_arrival", run.inter_arrival_samples(), arrival),
        ("service", run.service_samples(), service),
    ];

    let mut rows = Vec::with_capacity(columns.len());
    report::print_fit_header();
    for (column, sample, spec) in columns {
        match chi_square_test(&sample, spec, config) {
            Ok(fit) => {
                report::print_fit(column, &fit);
                rows.push(FitRow::new(column, spec, &fit));
            }
            Err(FitError::Degenerate(why)) => {
                warn!("{column}: χ² test skipped: {why}");
                println!("{column:<14} {:>10}", "n/a");
            }
            Err(e) => return Err(e.into()),
        }
    }
    Ok(rows)
}

// ── model ─────────────────────────────────────────────────────────────────────

fn run_model(model: QueueModel, params: &ModelParams, json: bool) -> Result<()> {
    let result = queueing_model(model, params)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        report::print_model(&result);
    }
    Ok(())
}
