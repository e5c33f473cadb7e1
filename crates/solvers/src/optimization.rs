//! Solvers for optimization problems: minimizing or maximizing an objective.
//!
//! An [`Objective`] maps a parameter vector `x: &[f64]` to a scalar value.
//! Solvers in this module search a bounded region for the `x` that minimizes
//! or maximizes that value.
//!
//! # Solvers
//!
//! - [`particle_swarm`]: population-based search for non-convex, noisy, or
//!   discontinuous objectives
//!
//! [`Objective`]: flock_core::Objective

mod evaluate;

pub use evaluate::{Evaluation, evaluate};

pub mod particle_swarm;
