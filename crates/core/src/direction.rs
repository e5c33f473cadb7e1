/// The optimization direction.
///
/// Solvers compare objective values through a `Direction` instead of keeping
/// separate minimize and maximize code paths. Internally every comparison is a
/// minimization of [`Direction::score`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Direction {
    /// Smaller objective values are better.
    #[default]
    Minimize,

    /// Larger objective values are better.
    Maximize,
}

impl Direction {
    /// Transforms an objective value into a score where smaller is better.
    ///
    /// - [`Direction::Minimize`]: returns the value unchanged
    /// - [`Direction::Maximize`]: negates the value
    #[inline]
    #[must_use]
    pub fn score(self, value: f64) -> f64 {
        match self {
            Self::Minimize => value,
            Self::Maximize => -value,
        }
    }

    /// Returns `true` if `candidate` is strictly better than `incumbent`.
    #[inline]
    #[must_use]
    pub fn is_better(self, candidate: f64, incumbent: f64) -> bool {
        self.score(candidate) < self.score(incumbent)
    }

    /// Returns the worst possible objective value for this direction.
    ///
    /// Infeasible evaluations are assigned this value so they can never beat a
    /// feasible one.
    #[inline]
    #[must_use]
    pub fn worst(self) -> f64 {
        match self {
            Self::Minimize => f64::INFINITY,
            Self::Maximize => f64::NEG_INFINITY,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn minimize_prefers_smaller_values() {
        let dir = Direction::Minimize;
        assert!(dir.is_better(1.0, 2.0));
        assert!(!dir.is_better(2.0, 1.0));
        assert!(!dir.is_better(1.0, 1.0));
        assert_relative_eq!(dir.score(3.5), 3.5);
    }

    #[test]
    fn maximize_prefers_larger_values() {
        let dir = Direction::Maximize;
        assert!(dir.is_better(2.0, 1.0));
        assert!(!dir.is_better(1.0, 2.0));
        assert_relative_eq!(dir.score(3.5), -3.5);
    }

    #[test]
    fn worst_loses_to_every_finite_value() {
        for dir in [Direction::Minimize, Direction::Maximize] {
            assert!(dir.is_better(0.0, dir.worst()));
            assert!(dir.is_better(-1e300, dir.worst()));
            assert!(dir.is_better(1e300, dir.worst()));
            assert!(!dir.is_better(dir.worst(), dir.worst()));
        }
    }
}
