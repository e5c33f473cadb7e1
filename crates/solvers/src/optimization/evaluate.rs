use flock_core::{Direction, Objective};

/// The outcome of evaluating an objective at a point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Evaluation {
    /// The objective returned a finite value.
    Feasible(f64),

    /// The objective returned an error or a non-finite value.
    Infeasible,
}

impl Evaluation {
    /// Returns `true` if the evaluation produced a usable value.
    #[must_use]
    pub fn is_feasible(self) -> bool {
        matches!(self, Self::Feasible(_))
    }

    /// Returns the objective value, substituting the worst possible value
    /// for the direction when the point is infeasible.
    #[must_use]
    pub fn value(self, direction: Direction) -> f64 {
        match self {
            Self::Feasible(value) => value,
            Self::Infeasible => direction.worst(),
        }
    }
}

/// Evaluates the objective at `x`.
///
/// Errors and non-finite values are absorbed into [`Evaluation::Infeasible`];
/// they never propagate to the caller.
pub fn evaluate<O: Objective>(objective: &O, x: &[f64]) -> Evaluation {
    match objective.evaluate(x) {
        Ok(value) if value.is_finite() => Evaluation::Feasible(value),
        Ok(value) => {
            tracing::trace!(?x, value, "objective returned a non-finite value");
            Evaluation::Infeasible
        }
        Err(error) => {
            tracing::trace!(?x, %error, "objective rejected point");
            Evaluation::Infeasible
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use flock_core::{FnObjective, Infeasible};

    struct RejectNegative;

    impl Objective for RejectNegative {
        type Error = Infeasible;

        fn evaluate(&self, x: &[f64]) -> Result<f64, Self::Error> {
            if x[0] < 0.0 { Err(Infeasible) } else { Ok(x[0]) }
        }
    }

    #[test]
    fn finite_values_are_feasible() {
        let eval = evaluate(&FnObjective(|x: &[f64]| x[0] + 1.0), &[2.0]);
        assert_eq!(eval, Evaluation::Feasible(3.0));
        assert!(eval.is_feasible());
        assert_relative_eq!(eval.value(Direction::Maximize), 3.0);
    }

    #[test]
    fn non_finite_values_are_infeasible() {
        let nan = evaluate(&FnObjective(|_: &[f64]| f64::NAN), &[0.0]);
        let inf = evaluate(&FnObjective(|_: &[f64]| f64::INFINITY), &[0.0]);
        assert_eq!(nan, Evaluation::Infeasible);
        assert_eq!(inf, Evaluation::Infeasible);
    }

    #[test]
    fn errors_are_infeasible() {
        assert_eq!(evaluate(&RejectNegative, &[-1.0]), Evaluation::Infeasible);
        assert_eq!(evaluate(&RejectNegative, &[1.0]), Evaluation::Feasible(1.0));
    }

    #[test]
    fn infeasible_value_is_worst_for_direction() {
        assert_eq!(
            Evaluation::Infeasible.value(Direction::Minimize),
            f64::INFINITY
        );
        assert_eq!(
            Evaluation::Infeasible.value(Direction::Maximize),
            f64::NEG_INFINITY
        );
    }
}
