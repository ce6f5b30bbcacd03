//! The `Sim` struct and its arrival loop.

use log::{debug, info, warn};
use rand::Rng;

use qs_core::{CdfEvaluator, DistributionKind, DistributionSpec, DurationSampler, PatientId};

use crate::{
    ArrivalEvent, CumulativeMass, NoopObserver, SimBuilder, SimConfig, SimObserver, SimResult,
    SimulationRun, StopPolicy, StopReason,
};

/// The simulation runner.
///
/// Each call to [`run`][Self::run] performs one independent run:
///
/// 1. **Draw**: an inter-arrival gap from the arrival law and a service
///    duration from the service law, each raised to `duration_floor`.
/// 2. **Cumulative check** (policies with the cumulative rule): if adding
///    the gap's CDF to the running arrival mass *and* the service CDF to the
///    running service mass would both exceed 1, stop and discard the pair.
/// 3. **Horizon check** (policies with the horizon): advance the clock by
///    the gap; if it passed the horizon, stop without recording.
/// 4. **Record** the arrival, then loop while the clock is before the
///    horizon.
/// 5. **Schedule** the accepted arrivals with the FIFO recurrence.
///
/// Create via [`SimBuilder`].
pub struct Sim<O: SimObserver = NoopObserver> {
    pub config: SimConfig,

    arrival:     DurationSampler,
    service:     DurationSampler,
    arrival_cdf: CdfEvaluator,
    service_cdf: CdfEvaluator,

    /// Receives arrival and stop callbacks.
    pub observer: O,
}

impl<O: SimObserver> Sim<O> {
    pub(crate) fn from_parts(config: SimConfig, observer: O) -> SimResult<Self> {
        Ok(Self {
            arrival:     config.arrival.sampler()?,
            service:     config.service.sampler()?,
            arrival_cdf: config.arrival.evaluator()?,
            service_cdf: config.service.evaluator()?,
            config,
            observer,
        })
    }

    /// Run once, drawing from `rng`.  An empty run is a valid result; its
    /// [`summary`][SimulationRun::summary] reports the empty state.
    pub fn run<R: Rng + ?Sized>(&mut self, rng: &mut R) -> SimResult<SimulationRun> {
        let policy  = self.config.stop_policy;
        let horizon = self.config.horizon;
        let floor   = self.config.duration_floor;
        let cap     = self.config.max_patients;

        debug!(
            "sim start: arrival={} service={} horizon={} policy={:?} cap={}",
            self.config.arrival, self.config.service, horizon, policy, cap
        );
        self.observer.on_start(&self.config);

        let mut elapsed = 0.0_f64;
        let mut arrival_mass = 0.0_f64;
        let mut service_mass = 0.0_f64;
        let mut events: Vec<ArrivalEvent> = Vec::new();

        let reason = loop {
            if policy.uses_horizon() && elapsed >= horizon {
                break StopReason::HorizonReached;
            }
            if events.len() >= cap {
                warn!("sim stopped at the {cap}-patient safety cap (elapsed {elapsed:.3})");
                break StopReason::PatientCap;
            }

            let gap     = self.arrival.draw(rng).max(floor);
            let service = self.service.draw(rng).max(floor);

            let cumulative = if policy.uses_cumulative() {
                let cp_gap     = self.arrival_cdf.cdf(gap);
                let cp_service = self.service_cdf.cdf(service);
                if arrival_mass + cp_gap > 1.0 && service_mass + cp_service > 1.0 {
                    break StopReason::CumulativeProbability;
                }
                arrival_mass += cp_gap;
                service_mass += cp_service;
                Some(CumulativeMass { arrival: arrival_mass, service: service_mass })
            } else {
                None
            };

            elapsed += gap;
            if policy.uses_horizon() && elapsed > horizon {
                break StopReason::HorizonReached;
            }

            let event = ArrivalEvent {
                // `validate` bounds the cap by u32::MAX.
                id:            PatientId(events.len() as u32),
                inter_arrival: gap,
                arrival:       elapsed,
                service,
                cumulative,
            };
            self.observer.on_arrival(&event);
            events.push(event);
        };

        self.observer.on_stop(reason, events.len());
        info!("sim finished: {} patients, stopped by {reason}", events.len());

        Ok(SimulationRun::from_arrivals(&events, reason, policy.uses_cumulative()))
    }

    /// Consume the sim and return its observer.
    pub fn into_observer(self) -> O {
        self.observer
    }
}

/// One-call entry point taking plain parameters.
///
/// `stop_on_cumulative = false` stops on the horizon only; `true` also
/// applies the cumulative-probability rule.  Means are validated before any
/// draw.
pub fn simulate<R: Rng + ?Sized>(
    arrival_kind:       DistributionKind,
    arrival_mean:       f64,
    service_kind:       DistributionKind,
    service_mean:       f64,
    horizon:            f64,
    stop_on_cumulative: bool,
    rng:                &mut R,
) -> SimResult<SimulationRun> {
    let config = SimConfig::new(
        DistributionSpec::new(arrival_kind, arrival_mean)?,
        DistributionSpec::new(service_kind, service_mean)?,
        horizon,
    )
    .with_stop_policy(StopPolicy::from_flag(stop_on_cumulative));

    SimBuilder::new(config).build()?.run(rng)
}
