//! `qs-sim`: single-server FIFO queue simulation for the qsim queue simulator.
//!
//! # Arrival loop
//!
//! ```text
//! elapsed = 0, arrival_mass = 0, service_mass = 0
//! loop:
//!   ① Draw     : gap a ~ arrival law, service s ~ service law
//!   ② Cumulative: (if enabled) stop when arrival_mass + F(a) > 1
//!                  and service_mass + F(s) > 1; else accumulate both
//!   ③ Horizon  : (if enabled) elapsed += a; stop when elapsed > horizon
//!   ④ Record   : patient arrives at `elapsed` needing `s`
//! then FIFO:
//!   start[i] = max(arrival[i], completion[i-1]); completion = start + s
//! ```
//!
//! Every run is bounded by `SimConfig::max_patients`.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use qs_core::{DistributionKind, DistributionSpec, QsRng};
//! use qs_sim::{SimBuilder, SimConfig};
//!
//! let config = SimConfig::new(
//!     DistributionSpec::new(DistributionKind::Exponential, 5.0)?,
//!     DistributionSpec::new(DistributionKind::Exponential, 3.0)?,
//!     60.0,
//! );
//! let run = SimBuilder::new(config).build()?.run(&mut QsRng::new(42))?;
//! println!("utilization {:.2}", run.utilization()?);
//! ```

pub mod builder;
pub mod config;
pub mod error;
pub mod observer;
pub mod run;
pub mod sim;

#[cfg(test)]
mod tests;

pub use builder::SimBuilder;
pub use config::{SimConfig, StopPolicy};
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver};
pub use run::{
    ArrivalEvent, CumulativeMass, Patient, RunSummary, SimulationRun, StopReason, TimelineBar,
    schedule_fifo,
};
pub use sim::{Sim, simulate};
