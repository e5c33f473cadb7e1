use super::{ConfigError, Point};

/// Errors that can occur during a particle swarm run.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The configuration, bounds, or initial positions are invalid.
    ///
    /// Raised before any evaluation.
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    /// The run gave up.
    ///
    /// Carries the best point found before the abort. Its objective is the
    /// worst value for the direction if no feasible point was ever found.
    #[error("run aborted after {iters} generations: {reason}")]
    Aborted {
        reason: AbortReason,
        best: Point,
        iters: usize,
    },
}

/// Why a run was aborted.
#[derive(Debug, thiserror::Error, Clone, Copy, PartialEq, Eq)]
pub enum AbortReason {
    /// Every particle was infeasible in the same generation.
    #[error("every particle was infeasible")]
    AllInfeasible,

    /// The global best did not improve for longer than the stagnation cap.
    #[error("no improvement for {0} generations")]
    Stagnated(usize),
}
