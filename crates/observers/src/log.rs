use flock_core::Observer;
use tracing::info;

use crate::traits::{HasGeneration, HasObjective};

/// An observer that logs solver progress as `tracing` events at `info` level.
///
/// Logs every generation by default; use [`every`](Self::every) to thin the
/// output on long runs. Never acts on the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TracingObserver {
    every: usize,
}

impl TracingObserver {
    /// Creates an observer that logs every generation.
    #[must_use]
    pub fn new() -> Self {
        Self { every: 1 }
    }

    /// Logs only generations that are a multiple of `n`.
    ///
    /// Generation 0 is always logged. Values below 1 are treated as 1.
    #[must_use]
    pub fn every(mut self, n: usize) -> Self {
        self.every = n.max(1);
        self
    }

    fn should_log(&self, generation: usize) -> bool {
        generation % self.every == 0
    }
}

impl Default for TracingObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl<E, A> Observer<E, A> for TracingObserver
where
    E: HasGeneration + HasObjective,
{
    fn observe(&mut self, event: &E) -> Option<A> {
        let generation = event.generation();
        if self.should_log(generation) {
            info!(generation, objective = event.objective(), "solver progress");
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use flock_core::FnObjective;
    use flock_solvers::optimization::particle_swarm::{self, Bounds, Config, Status};

    #[test]
    fn thins_output() {
        let observer = TracingObserver::new().every(10);
        assert!(observer.should_log(0));
        assert!(!observer.should_log(5));
        assert!(observer.should_log(20));

        let clamped = TracingObserver::new().every(0);
        assert_eq!(clamped, TracingObserver::new());
    }

    #[test]
    fn never_stops_the_run() {
        let bounds = Bounds::uniform(2, -1.0, 1.0).unwrap();
        let objective = FnObjective(|x: &[f64]| x[0] * x[1]);
        let config = Config::default().with_max_iters(15);

        let solution =
            particle_swarm::minimize(&objective, bounds, &config, TracingObserver::new()).unwrap();

        assert_eq!(solution.status, Status::MaxIters);
        assert_eq!(solution.iters, 15);
    }
}
