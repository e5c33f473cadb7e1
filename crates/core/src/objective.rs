use std::convert::Infallible;

use thiserror::Error;

/// A scalar fitness function over a parameter vector.
///
/// Objectives must be deterministic for a given `x` so that seeded runs are
/// reproducible, and `Sync` so that solvers may evaluate particles in
/// parallel.
///
/// An objective that cannot produce a valid value for `x` (a domain error or
/// a violated constraint) returns an error instead of panicking. Solvers treat
/// any error, and any non-finite value, as *infeasible*: the worst possible
/// value for the optimization direction.
pub trait Objective: Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Evaluates the objective at `x`.
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] if `x` is infeasible.
    fn evaluate(&self, x: &[f64]) -> Result<f64, Self::Error>;
}

/// Error for objectives that reject a point without further detail.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq, Default)]
#[error("point is infeasible")]
pub struct Infeasible;

/// Adapter that turns a plain closure into an [`Objective`].
///
/// The closure cannot fail directly; return `f64::NAN` to mark a point as
/// infeasible.
///
/// # Example
///
/// ```
/// use flock_core::{FnObjective, Objective};
///
/// let sphere = FnObjective(|x: &[f64]| x.iter().map(|v| v * v).sum::<f64>());
/// assert_eq!(sphere.evaluate(&[1.0, 2.0]).unwrap(), 5.0);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct FnObjective<F>(pub F);

impl<F> Objective for FnObjective<F>
where
    F: Fn(&[f64]) -> f64 + Sync,
{
    type Error = Infallible;

    fn evaluate(&self, x: &[f64]) -> Result<f64, Self::Error> {
        Ok((self.0)(x))
    }
}
