use approx::assert_relative_eq;
use flock_core::Objective;
use flock_solvers::optimization::particle_swarm::{
    AbortReason, Bounds, Config, Error, Event, minimize, minimize_unobserved,
};
use integration_tests::objectives::{Counted, HalfSpace};

#[test]
fn finds_the_constrained_minimum_on_the_boundary() {
    let objective = HalfSpace { threshold: 1.0 };
    let bounds = Bounds::uniform(2, -2.0, 2.0).unwrap();
    let config = Config::default().with_max_iters(300);

    let mut infeasible = 0;
    let observer = |event: &Event<'_>| {
        assert!(event.best.x.iter().sum::<f64>() >= 1.0);
        infeasible += event.infeasible;
        None
    };
    let solution = minimize(&objective, bounds, &config, observer).unwrap();

    assert!(infeasible > 0);
    assert!(objective.evaluate(&solution.x).is_ok());
    assert_relative_eq!(solution.objective, 0.5, epsilon = 1e-3);
    assert_relative_eq!(solution.x[0], 0.5, epsilon = 0.05);
    assert_relative_eq!(solution.x[1], 0.5, epsilon = 0.05);
}

#[test]
fn unreachable_feasible_region_aborts_without_iterating() {
    let objective = Counted::new(HalfSpace { threshold: 10.0 });
    let bounds = Bounds::uniform(3, -1.0, 1.0).unwrap();
    let config = Config::default().with_swarm_size(12);

    let result = minimize_unobserved(&objective, bounds, &config);

    match result {
        Err(Error::Aborted {
            reason: AbortReason::AllInfeasible,
            iters: 0,
            best,
        }) => assert!(best.objective.is_infinite()),
        other => panic!("expected an abort, got {other:?}"),
    }
    assert_eq!(objective.calls(), 12);
}
