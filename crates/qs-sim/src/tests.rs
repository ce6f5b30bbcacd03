//! Tests for qs-sim.

use qs_core::{DistributionKind, DistributionSpec, PatientId, QsError, QsRng};

use crate::{
    ArrivalEvent, SimBuilder, SimConfig, SimError, SimObserver, SimulationRun, StopPolicy,
    StopReason,
};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn spec(kind: DistributionKind, mean: f64) -> DistributionSpec {
    DistributionSpec::new(kind, mean).unwrap()
}

fn exp_config(arrival_mean: f64, service_mean: f64, horizon: f64) -> SimConfig {
    SimConfig::new(
        spec(DistributionKind::Exponential, arrival_mean),
        spec(DistributionKind::Exponential, service_mean),
        horizon,
    )
}

fn run(config: SimConfig, seed: u64) -> SimulationRun {
    SimBuilder::new(config)
        .build()
        .unwrap()
        .run(&mut QsRng::new(seed))
        .unwrap()
}

/// Hand-built arrivals at the given absolute times.
fn events(arrivals: &[f64], services: &[f64]) -> Vec<ArrivalEvent> {
    let mut prev = 0.0;
    arrivals
        .iter()
        .zip(services)
        .enumerate()
        .map(|(i, (&arrival, &service))| {
            let ev = ArrivalEvent {
                id:            PatientId(i as u32),
                inter_arrival: arrival - prev,
                arrival,
                service,
                cumulative:    None,
            };
            prev = arrival;
            ev
        })
        .collect()
}

fn assert_fifo_invariants(run: &SimulationRun) {
    let ps = run.patients();
    for (i, p) in ps.iter().enumerate() {
        assert_eq!(p.id, PatientId(i as u32));
        assert!(p.start >= p.arrival, "patient {i}: start before arrival");
        assert_eq!(p.completion, p.start + p.service);
        assert_eq!(p.waiting, p.start - p.arrival);
        assert!(p.waiting >= 0.0);
        assert_eq!(p.turnaround, p.completion - p.arrival);
        assert!((p.turnaround - (p.waiting + p.service)).abs() < 1e-9);
        assert_eq!(p.response, p.waiting);
        if i > 0 {
            assert!(p.start >= ps[i - 1].completion, "patient {i}: server overlap");
            assert!(p.arrival >= ps[i - 1].arrival, "patient {i}: arrivals out of order");
        }
    }
}

// ── SimBuilder / SimConfig validation ─────────────────────────────────────────

#[cfg(test)]
mod builder_tests {
    use super::*;

    #[test]
    fn builds_successfully_with_defaults() {
        let sim = SimBuilder::new(exp_config(5.0, 3.0, 60.0)).build().unwrap();
        assert_eq!(sim.config.stop_policy, StopPolicy::Horizon);
        assert_eq!(sim.config.max_patients, SimConfig::DEFAULT_MAX_PATIENTS);
    }

    #[test]
    fn non_positive_horizon_errors() {
        for horizon in [0.0, -5.0, f64::NAN] {
            let result = SimBuilder::new(exp_config(5.0, 3.0, horizon)).build();
            assert!(matches!(result, Err(SimError::Config(_))), "horizon {horizon}");
        }
    }

    #[test]
    fn zero_cap_errors() {
        let mut cfg = exp_config(5.0, 3.0, 60.0);
        cfg.max_patients = 0;
        assert!(SimBuilder::new(cfg).build().is_err());
    }

    #[test]
    fn negative_floor_errors() {
        let mut cfg = exp_config(5.0, 3.0, 60.0);
        cfg.duration_floor = -0.1;
        assert!(SimBuilder::new(cfg).build().is_err());
    }

    #[test]
    fn stop_policy_flag_mapping() {
        assert_eq!(StopPolicy::from_flag(false), StopPolicy::Horizon);
        assert_eq!(StopPolicy::from_flag(true), StopPolicy::HorizonAndCumulative);
        assert!(StopPolicy::HorizonAndCumulative.uses_horizon());
        assert!(StopPolicy::HorizonAndCumulative.uses_cumulative());
        assert!(!StopPolicy::CumulativeProbability.uses_horizon());
        assert!(!StopPolicy::Horizon.uses_cumulative());
    }

    #[test]
    fn simulate_rejects_bad_mean_before_sampling() {
        let err = crate::simulate(
            DistributionKind::Exponential,
            0.0,
            DistributionKind::Exponential,
            3.0,
            60.0,
            false,
            &mut QsRng::new(1),
        )
        .unwrap_err();
        assert!(matches!(err, SimError::Core(QsError::InvalidParameter(_))));
    }
}

// ── FIFO recurrence ───────────────────────────────────────────────────────────

#[cfg(test)]
mod fifo_tests {
    use super::*;
    use crate::schedule_fifo;

    #[test]
    fn hand_computed_schedule() {
        let ps = schedule_fifo(&events(&[1.0, 2.0, 10.0], &[3.0, 3.0, 1.0]));
        let starts: Vec<f64> = ps.iter().map(|p| p.start).collect();
        let completions: Vec<f64> = ps.iter().map(|p| p.completion).collect();
        let waits: Vec<f64> = ps.iter().map(|p| p.waiting).collect();
        let tats: Vec<f64> = ps.iter().map(|p| p.turnaround).collect();
        assert_eq!(starts, [1.0, 4.0, 10.0]);
        assert_eq!(completions, [4.0, 7.0, 11.0]);
        assert_eq!(waits, [0.0, 2.0, 0.0]);
        assert_eq!(tats, [3.0, 5.0, 1.0]);
    }

    #[test]
    fn hand_computed_summary() {
        let run = SimulationRun::from_arrivals(
            &events(&[1.0, 2.0, 10.0], &[3.0, 3.0, 1.0]),
            StopReason::HorizonReached,
            false,
        );
        let s = run.summary().unwrap();
        assert_eq!(s.patients, 3);
        assert!((s.mean_arrival - 13.0 / 3.0).abs() < 1e-12);
        assert!((s.mean_service - 7.0 / 3.0).abs() < 1e-12);
        assert!((s.mean_waiting - 2.0 / 3.0).abs() < 1e-12);
        assert!((s.mean_turnaround - 3.0).abs() < 1e-12);
        assert_eq!(s.mean_response, s.mean_waiting);
        assert_eq!(s.max_waiting, 2.0);
        assert_eq!(s.makespan, 10.0);
        assert!((run.utilization().unwrap() - 0.7).abs() < 1e-12);
    }

    #[test]
    fn empty_run_has_no_summary() {
        let run = SimulationRun::from_arrivals(&[], StopReason::HorizonReached, false);
        assert!(run.is_empty());
        assert_eq!(
            run.summary().unwrap_err(),
            SimError::EmptySimulation(StopReason::HorizonReached)
        );
        assert!(matches!(run.utilization(), Err(SimError::EmptySimulation(_))));
    }

    #[test]
    fn zero_span_run_has_undefined_utilization() {
        let run = SimulationRun::from_arrivals(
            &events(&[2.0], &[0.0]),
            StopReason::HorizonReached,
            false,
        );
        let s = run.summary().unwrap();
        assert_eq!(s.utilization, None);
        assert_eq!(run.utilization().unwrap_err(), SimError::UndefinedUtilization);
    }

    #[test]
    fn single_patient_with_service_is_fully_utilized() {
        let run = SimulationRun::from_arrivals(
            &events(&[2.0], &[1.5]),
            StopReason::HorizonReached,
            false,
        );
        assert_eq!(run.utilization().unwrap(), 1.0);
    }

    #[test]
    fn timeline_spans_arrival_to_completion() {
        let run = SimulationRun::from_arrivals(
            &events(&[1.0, 2.0], &[3.0, 1.0]),
            StopReason::HorizonReached,
            false,
        );
        let bars: Vec<_> = run.timeline().collect();
        assert_eq!(bars.len(), 2);
        assert_eq!(bars[1].patient, PatientId(1));
        assert_eq!((bars[1].arrival, bars[1].start, bars[1].finish), (2.0, 4.0, 5.0));
    }
}

// ── Engine runs ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod run_tests {
    use super::*;

    #[test]
    fn exponential_horizon_scenario() {
        let run = run(exp_config(5.0, 3.0, 60.0), 42);
        assert_eq!(run.stop_reason(), StopReason::HorizonReached);
        assert!(!run.tracks_cumulative());

        let first = run.patients()[0];
        assert!(first.arrival > 0.0);
        assert_eq!(first.arrival, first.inter_arrival);
        assert_eq!(first.start, first.arrival);
        assert_eq!(first.completion, first.start + first.service);
        assert!(run.patients().last().unwrap().arrival <= 60.0);
        assert!(run.patients().iter().all(|p| p.cumulative.is_none()));
        assert_fifo_invariants(&run);
    }

    #[test]
    fn same_seed_same_run() {
        let a = run(exp_config(5.0, 3.0, 200.0), 7);
        let b = run(exp_config(5.0, 3.0, 200.0), 7);
        assert_eq!(a, b);
    }

    #[test]
    fn invariants_hold_for_every_kind_pair() {
        for arrival in DistributionKind::ALL {
            for service in DistributionKind::ALL {
                let cfg = SimConfig::new(spec(arrival, 4.0), spec(service, 3.0), 300.0);
                for seed in 0..5 {
                    let r = run(cfg.clone(), seed);
                    assert_fifo_invariants(&r);
                    if let Some(last) = r.patients().last() {
                        assert!(last.arrival <= 300.0);
                    }
                }
            }
        }
    }

    #[test]
    fn utilization_in_unit_interval() {
        for seed in 0..20 {
            let r = run(exp_config(2.0, 1.5, 500.0), seed);
            assert!(r.len() >= 2);
            let u = r.utilization().unwrap();
            assert!(u > 0.0 && u <= 1.0 + 1e-9, "seed {seed}: utilization {u}");
        }
    }

    #[test]
    fn inter_arrival_gaps_sum_to_arrival_times() {
        let r = run(exp_config(3.0, 2.0, 100.0), 3);
        let mut t = 0.0;
        for (gap, p) in r.inter_arrival_samples().iter().zip(r.patients()) {
            t += gap;
            assert!((t - p.arrival).abs() < 1e-9);
        }
        assert_eq!(r.service_samples().len(), r.len());
    }

    #[test]
    fn horizon_before_first_arrival_gives_empty_run() {
        // Uniform(10) gaps are at least 5.
        let cfg = SimConfig::new(
            spec(DistributionKind::Uniform, 10.0),
            spec(DistributionKind::Exponential, 1.0),
            1.0,
        );
        let r = run(cfg, 0);
        assert!(r.is_empty());
        assert_eq!(r.stop_reason(), StopReason::HorizonReached);
        assert!(matches!(r.summary(), Err(SimError::EmptySimulation(_))));
    }

    #[test]
    fn cumulative_rule_records_masses() {
        let cfg = exp_config(5.0, 3.0, 1_000.0).with_stop_policy(StopPolicy::HorizonAndCumulative);
        for seed in 0..10 {
            let r = run(cfg.clone(), seed);
            assert!(r.tracks_cumulative());
            let mut prev = (0.0, 0.0);
            for p in r.patients() {
                let m = p.cumulative.expect("cumulative mass recorded");
                assert!(m.arrival >= prev.0 && m.service >= prev.1);
                assert!(m.arrival <= 1.0 || m.service <= 1.0);
                prev = (m.arrival, m.service);
            }
            assert_fifo_invariants(&r);
        }
    }

    #[test]
    fn cumulative_only_policy_stops_on_mass() {
        let cfg = exp_config(5.0, 3.0, 1.0).with_stop_policy(StopPolicy::CumulativeProbability);
        let r = run(cfg, 11);
        // The 1.0 horizon is ignored under this policy.
        assert_eq!(r.stop_reason(), StopReason::CumulativeProbability);
    }

    #[test]
    fn patient_cap_bounds_the_run() {
        let mut cfg = exp_config(0.01, 0.01, 1e12);
        cfg.max_patients = 50;
        let r = run(cfg, 5);
        assert_eq!(r.len(), 50);
        assert_eq!(r.stop_reason(), StopReason::PatientCap);
    }

    #[test]
    fn duration_floor_lifts_zero_draws() {
        let mut cfg = SimConfig::new(
            spec(DistributionKind::Poisson, 0.5),
            spec(DistributionKind::Poisson, 0.5),
            50.0,
        );
        cfg.duration_floor = 0.01;
        let r = run(cfg, 9);
        assert!(!r.is_empty());
        for p in r.patients() {
            assert!(p.inter_arrival >= 0.01 && p.service >= 0.01);
        }
    }

    #[test]
    fn simulate_facade_matches_builder() {
        let via_facade = crate::simulate(
            DistributionKind::Exponential,
            5.0,
            DistributionKind::Exponential,
            3.0,
            60.0,
            true,
            &mut QsRng::new(42),
        )
        .unwrap();
        let cfg = exp_config(5.0, 3.0, 60.0).with_stop_policy(StopPolicy::HorizonAndCumulative);
        assert_eq!(via_facade, run(cfg, 42));
    }
}

// ── Observer ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod observer_tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        started:  usize,
        arrivals: Vec<f64>,
        stops:    Vec<(StopReason, usize)>,
    }

    impl SimObserver for Recorder {
        fn on_start(&mut self, _config: &SimConfig) {
            self.started += 1;
        }
        fn on_arrival(&mut self, event: &ArrivalEvent) {
            self.arrivals.push(event.arrival);
        }
        fn on_stop(&mut self, reason: StopReason, patients: usize) {
            self.stops.push((reason, patients));
        }
    }

    #[test]
    fn observer_sees_every_arrival_once() {
        let mut sim = SimBuilder::new(exp_config(4.0, 3.0, 120.0))
            .observer(Recorder::default())
            .build()
            .unwrap();
        let r = sim.run(&mut QsRng::new(2)).unwrap();
        let rec = sim.into_observer();

        assert_eq!(rec.started, 1);
        assert_eq!(rec.arrivals.len(), r.len());
        let arrivals: Vec<f64> = r.patients().iter().map(|p| p.arrival).collect();
        assert_eq!(rec.arrivals, arrivals);
        assert_eq!(rec.stops, vec![(r.stop_reason(), r.len())]);
    }
}
