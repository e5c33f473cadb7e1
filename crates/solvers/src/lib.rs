//! Solvers for the Flock framework.
//!
//! - [`optimization::particle_swarm`]: derivative-free global search with a
//!   seeded particle swarm

pub mod optimization;
