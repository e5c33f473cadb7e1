/// Indicates why a run finished normally.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// The global best reached the configured target.
    Converged,

    /// Reached the generation limit.
    MaxIters,

    /// Stopped early due to an observer decision.
    StoppedByObserver,
}

/// The result of a particle swarm run.
#[derive(Debug, Clone)]
pub struct Solution {
    /// Final solver status.
    pub status: Status,

    /// Best position found.
    pub x: Vec<f64>,

    /// Objective value at `x`.
    pub objective: f64,

    /// Number of generations executed after initialization.
    pub iters: usize,

    /// Global best value after initialization and after every generation,
    /// when recording is enabled.
    pub trace: Option<Vec<f64>>,
}
