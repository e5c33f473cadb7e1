use approx::assert_relative_eq;
use flock_core::Direction;
use flock_solvers::optimization::particle_swarm::{
    Bounds, Config, Status, maximize_unobserved, minimize_unobserved, optimize,
};
use integration_tests::objectives::{Counted, Rastrigin, Rosenbrock, Sphere};

#[test]
fn sphere_in_five_dimensions() {
    let bounds = Bounds::uniform(5, -10.0, 10.0).unwrap();
    let config = Config::default().with_max_iters(400).with_seed(11);

    let solution = minimize_unobserved(&Sphere, bounds, &config).unwrap();

    assert!(solution.objective < 1e-6, "got {}", solution.objective);
    for x in &solution.x {
        assert!(x.abs() < 1e-2);
    }
}

#[test]
fn rosenbrock_valley() {
    let bounds = Bounds::uniform(2, -2.0, 2.0).unwrap();
    let config = Config::default().with_max_iters(500).with_seed(3);

    let solution = minimize_unobserved(&Rosenbrock, bounds, &config).unwrap();

    assert!(solution.objective < 1e-3, "got {}", solution.objective);
    assert_relative_eq!(solution.x[0], 1.0, epsilon = 0.1);
    assert_relative_eq!(solution.x[1], 1.0, epsilon = 0.2);
}

#[test]
fn maximizing_negated_sphere_matches_minimizing_sphere() {
    struct Negated;

    impl flock_core::Objective for Negated {
        type Error = std::convert::Infallible;

        fn evaluate(&self, x: &[f64]) -> Result<f64, Self::Error> {
            Ok(-x.iter().map(|v| v * v).sum::<f64>())
        }
    }

    let bounds = Bounds::uniform(3, -4.0, 4.0).unwrap();
    let config = Config::default().with_max_iters(50).with_trace(true);

    let min = minimize_unobserved(&Sphere, bounds.clone(), &config).unwrap();
    let max = maximize_unobserved(&Negated, bounds, &config).unwrap();

    // Same seed and mirrored scores walk the swarm through the same points.
    assert_eq!(min.x, max.x);
    let negated: Vec<f64> = max.trace.unwrap().iter().map(|v| -v).collect();
    assert_eq!(min.trace.unwrap(), negated);
}

#[test]
fn evaluation_count_is_predictable() {
    let objective = Counted::new(Rastrigin);
    let bounds = Bounds::uniform(3, -5.12, 5.12).unwrap();
    let config = Config::default().with_swarm_size(25).with_max_iters(40);

    let solution = optimize(&objective, bounds, &config, Direction::Minimize, ()).unwrap();

    assert_eq!(solution.status, Status::MaxIters);
    assert_eq!(objective.calls(), 25 * 41);
}

#[cfg(feature = "rayon")]
#[test]
fn thread_count_does_not_change_the_run() {
    let run = |threads| {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build()
            .unwrap();
        pool.install(|| {
            let bounds = Bounds::uniform(4, -5.12, 5.12).unwrap();
            let config = Config::default().with_max_iters(100).with_trace(true);
            minimize_unobserved(&Rastrigin, bounds, &config).unwrap()
        })
    };

    let single = run(1);
    let many = run(4);
    assert_eq!(single.trace, many.trace);
    assert_eq!(single.x, many.x);
}
