//! End-to-end checks of the public engine API

use approx::assert_relative_eq;
use hardrods::analysis::single_site_density;
use hardrods::{
    GcmcEngine, GcmcError, Lattice, MoveKind, MoveResult, Orientation, Recorder, Rod,
    SimulationParams,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

#[test]
fn test_concrete_single_site_scenario() {
    let params = SimulationParams::new(100_000, 1, 10, 10, 1.0);
    let mut engine = GcmcEngine::with_seed(params, 20150605).unwrap();
    let mut recorder = Recorder::new(100, params.step_budget);

    engine.run_observed(|step, engine| recorder.observe(step, engine));

    let steady: Vec<_> = recorder
        .records()
        .iter()
        .filter(|record| record.step > 10_000)
        .collect();
    assert!(steady.iter().all(|record| record.order_parameter.is_some()));

    let mean = steady.iter().map(|record| record.density).sum::<f64>() / steady.len() as f64;
    assert_relative_eq!(mean, single_site_density(1.0), epsilon = 0.05);
    assert!(engine.is_consistent());
}

#[test]
fn test_rod_placements_serialize_and_replay() {
    let params = SimulationParams::new(20_000, 4, 16, 12, 3.0);
    let mut engine = GcmcEngine::with_seed(params, 99).unwrap();
    engine.run();

    let rods: Vec<Rod> = engine.registry().iter().copied().collect();
    assert!(!rods.is_empty());

    let json = serde_json::to_string(&rods).unwrap();
    let restored: Vec<Rod> = serde_json::from_str(&json).unwrap();
    let replay = Lattice::from_rods(params.rows, params.columns, &restored).unwrap();

    assert_eq!(&replay, engine.lattice());
}

#[test]
fn test_injected_generator_matches_seeded_constructor() {
    let params = SimulationParams::new(2_000, 2, 7, 9, 0.8);
    let mut seeded = GcmcEngine::with_seed(params, 5).unwrap();
    let mut injected = GcmcEngine::with_rng(params, StdRng::seed_from_u64(5)).unwrap();

    for _ in 0..2_000 {
        assert_eq!(seeded.monte_carlo_step(), injected.monte_carlo_step());
    }
    assert_eq!(seeded.lattice(), injected.lattice());
}

#[test]
fn test_outcomes_match_counter_changes() {
    let params = SimulationParams::new(0, 3, 8, 8, 1.2);
    let mut engine = GcmcEngine::with_seed(params, 64).unwrap();

    for _ in 0..5_000 {
        let before = engine.counters().clone();
        let n_before = engine.vertical_count() + engine.horizontal_count();
        let outcome = engine.monte_carlo_step();
        let after = engine.counters();
        let n_after = engine.vertical_count() + engine.horizontal_count();

        match (outcome.kind, outcome.result) {
            (MoveKind::Add, MoveResult::Accepted) => {
                assert_eq!(after.accepted_additions(), before.accepted_additions() + 1);
                assert_eq!(n_after, n_before + 1);
            }
            (MoveKind::Delete, MoveResult::Accepted) => {
                assert_eq!(after.accepted_deletions(), before.accepted_deletions() + 1);
                assert_eq!(n_after + 1, n_before);
            }
            (MoveKind::Delete, MoveResult::Skipped) => {
                assert_eq!(n_before, 0);
                assert_eq!(n_after, 0);
            }
            (MoveKind::Add, MoveResult::Skipped) | (MoveKind::Delete, MoveResult::Blocked) => {
                panic!("impossible outcome {:?}", outcome)
            }
            _ => assert_eq!(n_after, n_before),
        }
    }
}

#[test]
fn test_orientations_balanced_on_square_lattice() {
    let params = SimulationParams::new(200_000, 2, 12, 12, 1.0);
    let mut engine = GcmcEngine::with_seed(params, 3).unwrap();
    engine.run();

    let vertical = engine
        .live_vertical_rods()
        .iter()
        .all(|rod| rod.orientation == Orientation::Vertical);
    let horizontal = engine
        .live_horizontal_rods()
        .iter()
        .all(|rod| rod.orientation == Orientation::Horizontal);
    assert!(vertical && horizontal);

    let q = engine.order_parameter().unwrap();
    assert!((-1.0..=1.0).contains(&q));
}

#[test]
fn test_construction_errors_surface_before_running() {
    let err = GcmcEngine::new(SimulationParams::new(10, 11, 10, 10, 1.0)).unwrap_err();
    assert!(matches!(err, GcmcError::Configuration(_)));
    assert!(err.to_string().contains("exceeds"));
}
