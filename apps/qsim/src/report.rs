//! Plain-text tables for the terminal.

use qs_fit::GoodnessOfFit;
use qs_model::QueueingModelResult;
use qs_sim::{RunSummary, SimulationRun};

/// Rows shown before the patient table is cut short.
const PATIENT_ROWS: usize = 20;

pub fn print_patients(run: &SimulationRun) {
    println!(
        "{:<8} {:>10} {:>10} {:>10} {:>10} {:>10} {:>10}",
        "Patient", "Arrival", "Service", "Start", "Finish", "Wait", "Turnaround"
    );
    println!("{}", "-".repeat(74));
    for p in run.patients().iter().take(PATIENT_ROWS) {
        println!(
            "{:<8} {:>10.3} {:>10.3} {:>10.3} {:>10.3} {:>10.3} {:>10.3}",
            p.id.ordinal(),
            p.arrival,
            p.service,
            p.start,
            p.completion,
            p.waiting,
            p.turnaround,
        );
    }
    if run.len() > PATIENT_ROWS {
        println!("... {} more", run.len() - PATIENT_ROWS);
    }
    println!();
}

pub fn print_summary(summary: &RunSummary) {
    println!("{:<22} {:>12}", "Measure", "Value");
    println!("{}", "-".repeat(35));
    let rows = [
        ("Patients", summary.patients as f64),
        ("Mean inter-arrival", summary.mean_inter_arrival),
        ("Mean service", summary.mean_service),
        ("Mean waiting", summary.mean_waiting),
        ("Mean turnaround", summary.mean_turnaround),
        ("Mean response", summary.mean_response),
        ("Max waiting", summary.max_waiting),
        ("Makespan", summary.makespan),
    ];
    for (label, value) in rows {
        println!("{label:<22} {value:>12.3}");
    }
    match summary.utilization {
        Some(u) => println!("{:<22} {:>12.3}", "Utilization", u),
        None => println!("{:<22} {:>12}", "Utilization", "undefined"),
    }
    println!();
}

pub fn print_fit_header() {
    println!(
        "{:<14} {:>10} {:>10} {:>5} {:>10}  {}",
        "Column", "Chi2", "p-value", "dof", "Critical", "Decision"
    );
    println!("{}", "-".repeat(62));
}

pub fn print_fit(column: &str, fit: &GoodnessOfFit) {
    println!(
        "{:<14} {:>10.4} {:>10.4} {:>5} {:>10.4}  {}",
        column, fit.statistic, fit.p_value, fit.degrees_of_freedom, fit.critical_value, fit.decision
    );
}

pub fn print_model(r: &QueueingModelResult) {
    println!("{:<28} {:>12}", r.model.to_string(), "Value");
    println!("{}", "-".repeat(41));
    let pn_label = format!("P{} (exactly {} in system)", r.n, r.n);
    let rows = [
        ("ρ (utilization)", r.rho),
        ("P0 (server idle)", r.p0),
        ("Lq (mean queue length)", r.lq),
        ("Ls (mean in system)", r.ls),
        ("Wq (mean wait in queue)", r.wq),
        ("Ws (mean time in system)", r.ws),
        (pn_label.as_str(), r.pn),
    ];
    for (label, value) in rows {
        println!("{label:<28} {value:>12.4}");
    }
}
