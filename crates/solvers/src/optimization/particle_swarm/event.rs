use super::{Particle, Point};

/// Event emitted by the particle swarm solver once per generation.
///
/// Generation 0 is the swarm right after initialization. The event is a
/// read-only view; the swarm is not mutated while observers run.
#[derive(Debug, Clone, Copy)]
pub struct Event<'a> {
    /// The generation number.
    pub generation: usize,

    /// The global best after this generation.
    pub best: &'a Point,

    /// Whether the global best strictly improved this generation.
    pub improved: bool,

    /// Number of particles whose evaluation was infeasible.
    pub infeasible: usize,

    /// Number of particles perturbed before this generation's evaluation.
    pub perturbed: usize,

    /// Generations since the global best last improved.
    pub stagnation: usize,

    /// All particles, in index order.
    pub particles: &'a [Particle],
}

impl Event<'_> {
    /// Returns the global best objective value.
    #[must_use]
    pub fn objective(&self) -> f64 {
        self.best.objective
    }
}
