//! Simulation observer trait for progress reporting and data collection.

use crate::{ArrivalEvent, SimConfig, StopReason};

/// Callbacks invoked by [`Sim::run`][crate::Sim::run] while arrivals are
/// generated.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example: arrival counter
///
/// ```rust,ignore
/// struct Counter(usize);
///
/// impl SimObserver for Counter {
///     fn on_arrival(&mut self, _event: &ArrivalEvent) {
///         self.0 += 1;
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called once before the first draw.
    fn on_start(&mut self, _config: &SimConfig) {}

    /// Called for every accepted arrival, in order, before FIFO scheduling.
    fn on_arrival(&mut self, _event: &ArrivalEvent) {}

    /// Called once when a stop condition fires.  `patients` is the number of
    /// accepted arrivals.
    fn on_stop(&mut self, _reason: StopReason, _patients: usize) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
