//! Unit tests for qs-core primitives.

#[cfg(test)]
mod ids_tests {
    use crate::PatientId;

    #[test]
    fn index_roundtrip() {
        let id = PatientId(42);
        assert_eq!(id.index(), 42);
        assert_eq!(PatientId::try_from(42usize).unwrap(), id);
    }

    #[test]
    fn display_is_one_based() {
        assert_eq!(PatientId(0).to_string(), "Patient 1");
        assert_eq!(PatientId(9).ordinal(), 10);
    }
}

#[cfg(test)]
mod distribution_tests {
    use crate::{DistributionKind, DistributionSpec, QsError};

    #[test]
    fn parse_names_case_insensitively() {
        assert_eq!("exponential".parse::<DistributionKind>().unwrap(), DistributionKind::Exponential);
        assert_eq!(" Normal ".parse::<DistributionKind>().unwrap(), DistributionKind::Normal);
        assert_eq!("POISSON".parse::<DistributionKind>().unwrap(), DistributionKind::Poisson);
    }

    #[test]
    fn unknown_name_is_invalid_parameter() {
        let err = "Erlang".parse::<DistributionKind>().unwrap_err();
        assert!(matches!(err, QsError::InvalidParameter(_)));
    }

    #[test]
    fn display_roundtrips_through_parse() {
        for kind in DistributionKind::ALL {
            assert_eq!(kind.to_string().parse::<DistributionKind>().unwrap(), kind);
        }
    }

    #[test]
    fn non_positive_mean_rejected() {
        assert!(DistributionSpec::new(DistributionKind::Exponential, 0.0).is_err());
        assert!(DistributionSpec::new(DistributionKind::Uniform, -1.0).is_err());
        assert!(DistributionSpec::new(DistributionKind::Normal, f64::NAN).is_err());
        assert!(DistributionSpec::new(DistributionKind::Poisson, f64::INFINITY).is_err());
    }

    #[test]
    fn derived_parameters() {
        let u = DistributionSpec::new(DistributionKind::Uniform, 4.0).unwrap();
        assert_eq!(u.uniform_bounds(), (2.0, 6.0));
        let n = DistributionSpec::new(DistributionKind::Normal, 10.0).unwrap();
        assert!((n.normal_std_dev() - 3.0).abs() < 1e-12);
    }
}

#[cfg(test)]
mod sampler_tests {
    use crate::{DistributionKind, DistributionSpec, QsRng};

    fn sample_mean(kind: DistributionKind, mean: f64, n: usize) -> f64 {
        let spec = DistributionSpec::new(kind, mean).unwrap();
        let sampler = spec.sampler().unwrap();
        let mut rng = QsRng::new(7);
        (0..n).map(|_| sampler.draw(&mut rng)).sum::<f64>() / n as f64
    }

    #[test]
    fn sample_means_track_configured_mean() {
        for kind in DistributionKind::ALL {
            let m = sample_mean(kind, 5.0, 20_000);
            assert!((m - 5.0).abs() < 0.25, "{kind}: sample mean {m}");
        }
    }

    #[test]
    fn draws_are_non_negative() {
        let mut rng = QsRng::new(1);
        for kind in DistributionKind::ALL {
            let sampler = DistributionSpec::new(kind, 0.5).unwrap().sampler().unwrap();
            for _ in 0..2_000 {
                assert!(sampler.draw(&mut rng) >= 0.0, "{kind} drew a negative value");
            }
        }
    }

    #[test]
    fn uniform_stays_in_support() {
        let spec = DistributionSpec::new(DistributionKind::Uniform, 8.0).unwrap();
        let sampler = spec.sampler().unwrap();
        let mut rng = QsRng::new(3);
        for _ in 0..5_000 {
            let v = sampler.draw(&mut rng);
            assert!((4.0..12.0).contains(&v), "got {v}");
        }
    }

    #[test]
    fn poisson_is_integer_valued() {
        let spec = DistributionSpec::new(DistributionKind::Poisson, 3.0).unwrap();
        let mut rng = QsRng::new(11);
        for _ in 0..500 {
            let v = spec.sample(&mut rng).unwrap();
            assert_eq!(v, v.floor());
        }
    }
}

#[cfg(test)]
mod cdf_tests {
    use crate::{DistributionKind, DistributionSpec};

    #[test]
    fn boundaries_for_every_kind() {
        for kind in DistributionKind::ALL {
            let eval = DistributionSpec::new(kind, 20.0).unwrap().evaluator().unwrap();
            let at_zero = eval.cdf(0.0);
            assert!(at_zero < 1e-3, "{kind}: cdf(0) = {at_zero}");
            assert_eq!(eval.cdf(f64::INFINITY), 1.0, "{kind}");
            assert!(eval.cdf(1e9) > 0.999_999, "{kind}");
            assert_eq!(eval.cdf(-1.0), 0.0, "{kind}");
        }
    }

    #[test]
    fn nan_input_stays_in_unit_interval() {
        for kind in DistributionKind::ALL {
            let eval = DistributionSpec::new(kind, 5.0).unwrap().evaluator().unwrap();
            assert_eq!(eval.cdf(f64::NAN), 0.0, "{kind}");
            let p = eval.interval_probability(f64::NAN, 3.0);
            assert!((0.0..=1.0).contains(&p), "{kind}: {p}");
        }
    }

    #[test]
    fn exponential_matches_closed_form() {
        let eval = DistributionSpec::new(DistributionKind::Exponential, 5.0)
            .unwrap()
            .evaluator()
            .unwrap();
        let expected = 1.0 - (-1.0f64).exp();
        assert!((eval.cdf(5.0) - expected).abs() < 1e-12);
    }

    #[test]
    fn uniform_is_linear_on_support() {
        let eval = DistributionSpec::new(DistributionKind::Uniform, 4.0)
            .unwrap()
            .evaluator()
            .unwrap();
        assert_eq!(eval.cdf(2.0), 0.0);
        assert!((eval.cdf(4.0) - 0.5).abs() < 1e-12);
        assert_eq!(eval.cdf(6.0), 1.0);
    }

    #[test]
    fn normal_median_is_mean() {
        let eval = DistributionSpec::new(DistributionKind::Normal, 10.0)
            .unwrap()
            .evaluator()
            .unwrap();
        assert!((eval.cdf(10.0) - 0.5).abs() < 1e-9);
    }

    #[test]
    fn poisson_is_step_function() {
        let eval = DistributionSpec::new(DistributionKind::Poisson, 3.0)
            .unwrap()
            .evaluator()
            .unwrap();
        assert_eq!(eval.cdf(2.0), eval.cdf(2.9));
        assert!(eval.cdf(3.0) > eval.cdf(2.9));
    }

    #[test]
    fn interval_probability_is_cdf_difference() {
        for kind in DistributionKind::ALL {
            let eval = DistributionSpec::new(kind, 5.0).unwrap().evaluator().unwrap();
            for (low, high) in [(0.0, 1.0), (1.5, 4.2), (3.0, 9.0), (2.0, 2.0)] {
                assert_eq!(
                    eval.interval_probability(low, high),
                    eval.cdf(high) - eval.cdf(low),
                    "{kind} on [{low}, {high}]",
                );
            }
        }
    }

    #[test]
    fn reversed_interval_clamps_to_zero() {
        let spec = DistributionSpec::new(DistributionKind::Exponential, 2.0).unwrap();
        assert_eq!(spec.interval_probability(5.0, 1.0).unwrap(), 0.0);
    }
}

#[cfg(test)]
mod rng_tests {
    use rand::RngCore;

    use crate::QsRng;

    #[test]
    fn deterministic_same_seed() {
        let mut r1 = QsRng::new(12345);
        let mut r2 = QsRng::new(12345);
        for _ in 0..100 {
            assert_eq!(r1.next_u64(), r2.next_u64());
        }
    }

    #[test]
    fn children_diverge() {
        let mut root = QsRng::new(1);
        let mut c0 = root.child(0);
        let mut c1 = root.child(1);
        assert_ne!(c0.next_u64(), c1.next_u64(), "child streams should diverge");
    }

    #[test]
    fn optional_seed_is_deterministic_when_present() {
        let mut a = QsRng::from_optional_seed(Some(9));
        let mut b = QsRng::new(9);
        assert_eq!(a.next_u32(), b.next_u32());
    }
}
