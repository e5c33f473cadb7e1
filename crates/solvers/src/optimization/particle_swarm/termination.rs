use flock_core::Direction;

use super::{AbortReason, ConfigError, Status};

/// Conditions that end a run.
///
/// Checked once per generation, after the global best has been updated. The
/// first condition met wins, in this order:
///
/// 1. The global best reached the target ([`Status::Converged`]).
/// 2. The global best has not improved for more than `stagnation_cap`
///    generations ([`AbortReason::Stagnated`]).
/// 3. The generation count reached `max_iters` ([`Status::MaxIters`]).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Termination {
    pub(super) max_iters: usize,
    pub(super) target: Option<Target>,
    pub(super) stagnation_cap: Option<usize>,
}

/// A known objective value to stop at.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Target {
    /// The objective value to reach.
    pub value: f64,

    /// How far from `value` still counts as reached.
    pub tolerance: f64,
}

/// What the swarm should do after a generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Decision {
    Continue,
    Stop(Status),
    Abort(AbortReason),
}

impl Default for Termination {
    fn default() -> Self {
        Self {
            max_iters: 1000,
            target: None,
            stagnation_cap: None,
        }
    }
}

impl Termination {
    /// Returns the maximum number of generations.
    #[must_use]
    pub fn max_iters(&self) -> usize {
        self.max_iters
    }

    /// Returns the target, if one is set.
    #[must_use]
    pub fn target(&self) -> Option<Target> {
        self.target
    }

    /// Returns the hard stagnation cap, if one is set.
    #[must_use]
    pub fn stagnation_cap(&self) -> Option<usize> {
        self.stagnation_cap
    }

    pub(super) fn validate(&self, threshold: Option<usize>) -> Result<(), ConfigError> {
        if self.max_iters == 0 {
            return Err(ConfigError::MaxIters);
        }
        if let Some(target) = self.target {
            if !target.value.is_finite() || !target.tolerance.is_finite() || target.tolerance < 0.0
            {
                return Err(ConfigError::Target);
            }
        }
        if let Some(cap) = self.stagnation_cap {
            let threshold = threshold.unwrap_or(0);
            if cap <= threshold {
                return Err(ConfigError::StagnationCap { cap, threshold });
            }
        }
        Ok(())
    }

    /// Decides whether the run continues after `generation`.
    pub(super) fn decide(
        &self,
        generation: usize,
        best: f64,
        stagnation: usize,
        direction: Direction,
    ) -> Decision {
        if let Some(target) = self.target {
            if target.is_reached(best, direction) {
                return Decision::Stop(Status::Converged);
            }
        }
        if let Some(cap) = self.stagnation_cap {
            if stagnation > cap {
                return Decision::Abort(AbortReason::Stagnated(stagnation));
            }
        }
        if generation >= self.max_iters {
            return Decision::Stop(Status::MaxIters);
        }
        Decision::Continue
    }
}

impl Target {
    /// Returns `true` if `value` is within tolerance of the target, or better.
    #[must_use]
    pub fn is_reached(&self, value: f64, direction: Direction) -> bool {
        value.is_finite() && direction.score(value) <= direction.score(self.value) + self.tolerance
    }
}
