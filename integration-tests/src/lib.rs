//! Shared objectives for the cross-crate tests.

pub mod objectives {
    use std::{
        convert::Infallible,
        f64::consts::PI,
        sync::atomic::{AtomicUsize, Ordering},
    };

    use flock_core::{Infeasible, Objective};

    /// Sum of squares; minimum 0 at the origin.
    pub struct Sphere;

    impl Objective for Sphere {
        type Error = Infallible;

        fn evaluate(&self, x: &[f64]) -> Result<f64, Self::Error> {
            Ok(x.iter().map(|v| v * v).sum())
        }
    }

    /// Rosenbrock's valley; minimum 0 at `(1, 1, ..., 1)`.
    pub struct Rosenbrock;

    impl Objective for Rosenbrock {
        type Error = Infallible;

        fn evaluate(&self, x: &[f64]) -> Result<f64, Self::Error> {
            Ok(x.windows(2)
                .map(|w| 100.0 * (w[1] - w[0] * w[0]).powi(2) + (1.0 - w[0]).powi(2))
                .sum())
        }
    }

    /// Highly multimodal; minimum 0 at the origin, local minima near every
    /// integer lattice point.
    pub struct Rastrigin;

    impl Objective for Rastrigin {
        type Error = Infallible;

        fn evaluate(&self, x: &[f64]) -> Result<f64, Self::Error> {
            Ok(x.iter()
                .map(|v| v * v - 10.0 * (2.0 * PI * v).cos() + 10.0)
                .sum())
        }
    }

    /// Sphere restricted to the half-space `sum(x) >= threshold`.
    ///
    /// For a positive threshold in `d` dimensions the constrained minimum is
    /// at `x_i = threshold / d`.
    pub struct HalfSpace {
        pub threshold: f64,
    }

    impl Objective for HalfSpace {
        type Error = Infeasible;

        fn evaluate(&self, x: &[f64]) -> Result<f64, Self::Error> {
            if x.iter().sum::<f64>() < self.threshold {
                return Err(Infeasible);
            }
            Ok(x.iter().map(|v| v * v).sum())
        }
    }

    /// Wraps an objective and counts its evaluations.
    pub struct Counted<O> {
        inner: O,
        calls: AtomicUsize,
    }

    impl<O> Counted<O> {
        pub fn new(inner: O) -> Self {
            Self {
                inner,
                calls: AtomicUsize::new(0),
            }
        }

        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::Relaxed)
        }
    }

    impl<O: Objective> Objective for Counted<O> {
        type Error = O::Error;

        fn evaluate(&self, x: &[f64]) -> Result<f64, Self::Error> {
            self.calls.fetch_add(1, Ordering::Relaxed);
            self.inner.evaluate(x)
        }
    }
}
