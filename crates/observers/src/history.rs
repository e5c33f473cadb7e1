use flock_core::Observer;

use crate::traits::{HasGeneration, HasObjective};

/// One recorded observation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Entry {
    pub generation: usize,
    pub objective: f64,
}

/// An observer that records the objective reported by every event.
///
/// Pass `&mut History` as the solver observer to keep the record after the
/// run completes.
///
/// # Example
///
/// ```rust
/// use flock_core::FnObjective;
/// use flock_observers::History;
/// use flock_solvers::optimization::particle_swarm::{self, Bounds, Config};
///
/// let bounds = Bounds::uniform(1, -2.0, 2.0).unwrap();
/// let objective = FnObjective(|x: &[f64]| (x[0] - 1.0).powi(2));
/// let config = Config::default().with_max_iters(20);
///
/// let mut history = History::new();
/// particle_swarm::minimize(&objective, bounds, &config, &mut history).unwrap();
///
/// assert_eq!(history.len(), 21);
/// assert_eq!(history.entries()[0].generation, 0);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct History {
    entries: Vec<Entry>,
}

impl History {
    /// Creates an empty history.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an observation.
    pub fn record(&mut self, generation: usize, objective: f64) {
        self.entries.push(Entry {
            generation,
            objective,
        });
    }

    /// Returns all observations in the order they were recorded.
    #[must_use]
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Returns the recorded objective values.
    pub fn objectives(&self) -> impl Iterator<Item = f64> + '_ {
        self.entries.iter().map(|entry| entry.objective)
    }

    /// Returns the most recent observation.
    #[must_use]
    pub fn last(&self) -> Option<&Entry> {
        self.entries.last()
    }

    /// Returns the number of recorded observations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<E, A> Observer<E, A> for History
where
    E: HasGeneration + HasObjective,
{
    fn observe(&mut self, event: &E) -> Option<A> {
        self.record(event.generation(), event.objective());
        None
    }
}

/// Allows `&mut History` to be passed to solvers that take an observer by
/// value, so the record can be read after the solve completes.
impl<E, A> Observer<E, A> for &mut History
where
    E: HasGeneration + HasObjective,
{
    fn observe(&mut self, event: &E) -> Option<A> {
        (*self).observe(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use flock_core::FnObjective;
    use flock_solvers::optimization::particle_swarm::{self, Bounds, Config};

    #[test]
    fn matches_the_solution_trace() {
        let bounds = Bounds::uniform(2, -3.0, 3.0).unwrap();
        let objective = FnObjective(|x: &[f64]| (x[0] - 1.0).powi(2) + (x[1] + 0.5).powi(2));
        let config = Config::default().with_max_iters(40).with_trace(true);

        let mut history = History::new();
        let solution = particle_swarm::minimize(&objective, bounds, &config, &mut history).unwrap();

        let trace = solution.trace.unwrap();
        assert_eq!(history.len(), trace.len());
        for (recorded, traced) in history.objectives().zip(&trace) {
            assert_relative_eq!(recorded, *traced);
        }
        let generations: Vec<usize> = history.entries().iter().map(|e| e.generation).collect();
        assert_eq!(generations, (0..=40).collect::<Vec<_>>());
        assert_relative_eq!(history.last().unwrap().objective, solution.objective);
    }

    #[test]
    fn starts_empty() {
        let mut history = History::new();
        assert!(history.is_empty());
        assert_eq!(history.len(), 0);
        history.record(0, 1.5);
        assert!(!history.is_empty());
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn composes_inside_a_closure() {
        let bounds = Bounds::uniform(1, 0.0, 1.0).unwrap();
        let objective = FnObjective(|x: &[f64]| x[0]);
        let config = Config::default().with_max_iters(10);

        let mut history = History::new();
        particle_swarm::maximize(
            &objective,
            bounds,
            &config,
            |event: &particle_swarm::Event<'_>| {
                if event.improved {
                    history.record(event.generation, event.objective());
                }
                None
            },
        )
        .unwrap();

        assert!(history.entries().iter().all(|e| e.generation > 0));
        assert!(history.objectives().all(|v| v <= 1.0));
    }
}
