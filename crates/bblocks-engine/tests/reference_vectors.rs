// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use bblocks_core::BlocksError;
use bblocks_engine::{BayesianBlocks, BlocksConfig};
use bblocks_fitness::{FitnessKind, Prior};

const REFERENCE_VALUES: [f64; 9] = [1.0, 3.0, 5.0, 100.0, 97.0, 8.0, 7.0, 6.0, 5.0];

fn reference_times() -> Vec<f64> {
    (1..=9).map(f64::from).collect()
}

fn detector(fitness: FitnessKind, prior: Prior) -> BayesianBlocks {
    BayesianBlocks::new(BlocksConfig::new(fitness, prior).expect("valid config"))
        .expect("valid detector")
}

fn expand_events(times: &[f64], counts: &[f64]) -> Vec<f64> {
    times
        .iter()
        .zip(counts)
        .flat_map(|(&t, &count)| std::iter::repeat_n(t, count as usize))
        .collect()
}

fn plateau_counts() -> (Vec<f64>, Vec<f64>) {
    let times = (0..20).map(f64::from).collect();
    let values = vec![
        2.0, 3.0, 2.0, 2.0, 3.0, 2.0, 15.0, 16.0, 14.0, 15.0, 17.0, 15.0, 3.0, 2.0, 3.0, 2.0, 2.0,
        3.0, 2.0, 3.0,
    ];
    (times, values)
}

#[test]
fn reference_vector_events_p0() {
    let blocks = detector(FitnessKind::Events, Prior::P0 { p0: 0.01 });
    let edges = blocks
        .calculate_bins_binned(&reference_times(), &REFERENCE_VALUES)
        .expect("reference run succeeds");
    assert_eq!(edges, vec![1.0, 3.5, 5.5, 9.0]);
}

#[test]
fn reference_vector_through_every_entry_point() {
    let blocks = detector(FitnessKind::Events, Prior::P0 { p0: 0.01 });
    let times = reference_times();
    let expected = vec![1.0, 3.5, 5.5, 9.0];

    let ones = vec![1.0; times.len()];
    assert_eq!(
        blocks
            .calculate_bins(&times, &REFERENCE_VALUES, &ones)
            .expect("three-argument call"),
        expected
    );

    let events = expand_events(&times, &REFERENCE_VALUES);
    assert_eq!(events.len(), 232);
    assert_eq!(
        blocks.calculate_bins_events(&events).expect("event call"),
        expected
    );
}

#[test]
fn reference_vector_near_the_top_of_the_float_range() {
    let times: Vec<f64> = (1..=9).map(|t| f64::from(t) * 1e307).collect();
    let result = detector(FitnessKind::Events, Prior::P0 { p0: 0.01 })
        .fit_binned(&times, &REFERENCE_VALUES)
        .expect("large finite times");
    assert_eq!(result.change_indices, vec![0, 3, 5, 9]);
    assert!(result.edges.iter().all(|edge| edge.is_finite()));
    assert_eq!(result.diagnostics.degenerate_candidates, 0);
}

#[test]
fn single_point_returns_two_equal_edges() {
    for blocks in [
        BayesianBlocks::default(),
        detector(FitnessKind::Measures, Prior::Point),
        detector(FitnessKind::Events, Prior::Gamma { gamma: 0.5 }),
    ] {
        assert_eq!(
            blocks.calculate_bins_events(&[5.0]).expect("single event"),
            vec![5.0, 5.0]
        );
        assert_eq!(
            blocks
                .calculate_bins(&[2.5], &[7.0], &[0.5])
                .expect("single measurement"),
            vec![2.5, 2.5]
        );
    }
}

#[test]
fn two_argument_call_defaults_uncertainties_to_one() {
    let (times, values) = plateau_counts();
    let ones = vec![1.0; times.len()];
    for fitness in FitnessKind::ALL {
        let blocks = detector(fitness, Prior::Point);
        assert_eq!(
            blocks.calculate_bins_binned(&times, &values).expect("binned"),
            blocks.calculate_bins(&times, &values, &ones).expect("measured")
        );
    }
}

#[test]
fn unbinned_events_fixture() {
    let events = [
        0.5, 1.0, 1.0, 1.0, 2.0, 2.5, 2.5, 3.0, 7.0, 7.5, 8.0, 8.1, 8.2, 8.3, 8.4, 8.5, 8.6, 8.7,
        9.0, 12.0, 15.0, 19.0,
    ];
    let strict = detector(FitnessKind::Events, Prior::P0 { p0: 0.05 });
    assert_eq!(
        strict.calculate_bins_events(&events).expect("events"),
        vec![0.5, 8.05, 8.85, 19.0]
    );

    let loose = detector(FitnessKind::Events, Prior::P0 { p0: 0.5 });
    assert_eq!(
        loose.calculate_bins_events(&events).expect("events"),
        vec![0.5, 2.75, 7.75, 8.85, 19.0]
    );
}

#[test]
fn gamma_prior_sparsity_on_reference_vector() {
    let times = reference_times();
    let mut previous = usize::MAX;
    for gamma in [0.5, 0.1, 1e-3, 1e-6, 1e-12] {
        let edges = detector(FitnessKind::Events, Prior::Gamma { gamma })
            .calculate_bins_binned(&times, &REFERENCE_VALUES)
            .expect("gamma run");
        assert!(edges.len() <= previous, "gamma={gamma} produced {edges:?}");
        previous = edges.len();
    }

    let weakest = detector(FitnessKind::Events, Prior::Gamma { gamma: 0.5 })
        .calculate_bins_binned(&times, &REFERENCE_VALUES)
        .expect("gamma run");
    assert_eq!(weakest, vec![1.0, 3.5, 5.5, 9.0]);
    let strongest = detector(FitnessKind::Events, Prior::Gamma { gamma: 1e-12 })
        .calculate_bins_binned(&times, &REFERENCE_VALUES)
        .expect("gamma run");
    assert_eq!(strongest, vec![1.0, 9.0]);
}

#[test]
fn gamma_prior_sparsity_on_plateau() {
    let (times, values) = plateau_counts();
    for (gamma, expected) in [
        (0.5, vec![0.0, 5.5, 11.5, 19.0]),
        (0.2, vec![0.0, 5.5, 11.5, 19.0]),
        (0.1, vec![0.0, 5.5, 11.5, 19.0]),
        (0.05, vec![0.0, 19.0]),
        (1e-6, vec![0.0, 19.0]),
    ] {
        let edges = detector(FitnessKind::Events, Prior::Gamma { gamma })
            .calculate_bins_binned(&times, &values)
            .expect("gamma run");
        assert_eq!(edges, expected, "gamma={gamma}");
    }
}

#[test]
fn constant_prior_fixtures() {
    let every_point = detector(FitnessKind::Events, Prior::Constant { beta: 0.0 })
        .calculate_bins_binned(&reference_times(), &REFERENCE_VALUES)
        .expect("zero penalty");
    assert_eq!(
        every_point,
        vec![1.0, 1.5, 2.5, 3.5, 4.5, 5.5, 6.5, 7.5, 8.5, 9.0]
    );

    let (times, values) = plateau_counts();
    for (beta, expected) in [
        (1.0, vec![0.0, 5.5, 11.5, 19.0]),
        (20.0, vec![0.0, 5.5, 11.5, 19.0]),
        (100.0, vec![0.0, 19.0]),
    ] {
        let edges = detector(FitnessKind::Events, Prior::Constant { beta })
            .calculate_bins_binned(&times, &values)
            .expect("constant run");
        assert_eq!(edges, expected, "beta={beta}");
    }
}

#[test]
fn p0_prior_on_plateau() {
    let (times, values) = plateau_counts();
    let edges = BayesianBlocks::default()
        .calculate_bins_binned(&times, &values)
        .expect("default run");
    assert_eq!(edges, vec![0.0, 5.5, 11.5, 19.0]);
}

#[test]
fn measures_step_fixture() {
    let times: Vec<f64> = (0..10).map(f64::from).collect();
    let values = [1.0, 1.0, 1.0, 1.0, 1.0, 9.0, 9.0, 9.0, 9.0, 9.0];
    for prior in [Prior::Point, Prior::P0 { p0: 0.05 }] {
        let blocks = detector(FitnessKind::Measures, prior);
        assert_eq!(
            blocks.calculate_bins_binned(&times, &values).expect("measures"),
            vec![0.0, 4.5, 9.0]
        );
        assert_eq!(
            blocks
                .calculate_bins(&times, &values, &[0.5; 10])
                .expect("measures with sigma"),
            vec![0.0, 4.5, 9.0]
        );
    }
}

#[test]
fn duplicate_times_are_rejected_in_canonical_form() {
    let blocks = BayesianBlocks::default();
    let err = blocks
        .calculate_bins(&[1.0, 2.0, 2.0], &[1.0, 1.0, 1.0], &[1.0, 1.0, 1.0])
        .expect_err("duplicate must fail");
    assert_eq!(
        err,
        BlocksError::DuplicateInput {
            index: 2,
            time: 2.0
        }
    );

    let err = blocks
        .calculate_bins_binned(&[1.0, 1.0], &[1.0, 1.0])
        .expect_err("duplicate must fail");
    assert!(matches!(err, BlocksError::DuplicateInput { .. }));

    // Repeated event times are aggregated rather than rejected.
    assert_eq!(
        blocks.calculate_bins_events(&[1.0, 1.0]).expect("aggregated"),
        vec![1.0, 1.0]
    );
}

#[test]
fn unknown_fitness_tag_fails_before_any_work() {
    let err = BlocksConfig::from_tag("photons", Prior::default()).expect_err("unknown tag");
    assert!(matches!(err, BlocksError::Configuration(_)));
}

#[test]
fn empty_input_is_invalid() {
    let blocks = BayesianBlocks::default();
    assert!(matches!(
        blocks.calculate_bins_events(&[]),
        Err(BlocksError::InvalidInput(_))
    ));
    assert!(matches!(
        blocks.calculate_bins(&[], &[], &[]),
        Err(BlocksError::InvalidInput(_))
    ));
}
