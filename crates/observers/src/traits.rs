//! Capability traits for cross-solver observers.
//!
//! These traits abstract over solver-specific event and action types, enabling
//! observers to work generically across different solvers.
//!
//! # Event traits
//!
//! - [`HasGeneration`]: events that carry an iteration or generation number
//! - [`HasObjective`]: events that carry an objective value
//!
//! # Action traits
//!
//! - [`CanStopEarly`]: actions that can signal early termination
//!
//! # Example
//!
//! ```rust
//! use flock_core::Observer;
//! use flock_observers::traits::{CanStopEarly, HasGeneration, HasObjective};
//!
//! struct GoodEnough {
//!     threshold: f64,
//!     min_generations: usize,
//! }
//!
//! impl<E: HasGeneration + HasObjective, A: CanStopEarly> Observer<E, A> for GoodEnough {
//!     fn observe(&mut self, event: &E) -> Option<A> {
//!         let settled = event.generation() >= self.min_generations;
//!         (settled && event.objective() < self.threshold).then(A::stop_early)
//!     }
//! }
//! ```

use flock_solvers::optimization::particle_swarm;

/// An event that carries an iteration or generation number.
pub trait HasGeneration {
    /// Returns the generation this event reports on.
    fn generation(&self) -> usize;
}

/// An event that carries an objective value.
pub trait HasObjective {
    /// Returns the objective for this event.
    ///
    /// Returns `f64::NAN` when the event represents an error and no objective
    /// is available.
    fn objective(&self) -> f64;
}

/// An action type that can signal early termination.
pub trait CanStopEarly {
    /// Returns the action that stops the solver early.
    fn stop_early() -> Self;
}

// --- particle_swarm::Event ---

impl HasGeneration for particle_swarm::Event<'_> {
    fn generation(&self) -> usize {
        self.generation
    }
}

impl HasObjective for particle_swarm::Event<'_> {
    fn objective(&self) -> f64 {
        self.best.objective
    }
}

// --- particle_swarm::Action ---

impl CanStopEarly for particle_swarm::Action {
    fn stop_early() -> Self {
        Self::StopEarly
    }
}
