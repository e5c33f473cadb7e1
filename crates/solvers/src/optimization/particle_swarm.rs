//! Particle swarm optimization over a bounded box.
//!
//! # Algorithm
//!
//! A swarm of particles moves through the search space. Each particle keeps
//! its velocity and position plus the best point it has ever visited. Every
//! generation each velocity is pulled toward the particle's personal best and
//! the swarm's global best:
//!
//! ```text
//! v' = w·v + c1·r1·(pbest − x) + c2·r2·(gbest − x)
//! ```
//!
//! with `r1, r2` fresh uniform draws per dimension. Velocities are clamped to a
//! per-dimension maximum and positions are clamped into the bounds.
//!
//! Initial positions come from a Halton sequence, unless given explicitly, so
//! the starting swarm covers the box evenly.
//!
//! When the global best stops improving for a configured number of
//! generations, a [`Perturbation`] scatters part of the swarm to force
//! re-exploration away from a local optimum.
//!
//! # When to Use
//!
//! Particle swarm optimization is appropriate when:
//! - The objective is non-convex, noisy, or discontinuous
//! - Derivative information is unavailable
//! - Some regions are infeasible and can only be detected by evaluating
//!
//! # Infeasible Points
//!
//! An objective that returns an error, NaN, or infinity marks the point
//! infeasible. It scores the worst possible value for the direction and so
//! never becomes a personal or global best while any feasible point is known.
//! If every particle is infeasible in the same generation, the run aborts.
//!
//! # Reproducibility
//!
//! Each particle draws from its own random generator seeded from
//! [`Config::with_seed`] and the particle index. A run is a pure function of
//! its inputs, with or without the `rayon` feature.
//!
//! # Observer Events
//!
//! The solver emits one [`Event`] for the initialized swarm (generation 0) and
//! one after every generation, including a generation that aborts the run, so
//! the last event matches the `iters` carried by [`Error::Aborted`]. A run that
//! aborts during initialization emits no events. Observers can return
//! [`Action::StopEarly`] to stop at that generation boundary with
//! [`Status::StoppedByObserver`].

mod action;
mod bounds;
mod config;
mod error;
mod event;
mod halton;
mod particle;
mod perturbation;
mod point;
mod search;
mod solution;
mod swarm;
mod termination;


pub use action::Action;
pub use bounds::Bounds;
pub use config::{Boundary, Config, ConfigError, Inertia, InitialVelocity};
pub use error::{AbortReason, Error};
pub use event::Event;
pub use halton::{Halton, radical_inverse};
pub use particle::Particle;
pub use perturbation::{Perturbation, Selection};
pub use point::Point;
pub use solution::{Solution, Status};
pub use swarm::Swarm;
pub use termination::{Target, Termination};

use flock_core::{Direction, Objective, Observer};

use search::search;

/// Finds the minimum of the objective within `bounds`.
///
/// The observer receives an [`Event`] for generation 0 and every generation
/// after it. See the [module docs](self) for details.
///
/// # Errors
///
/// Returns [`Error::Config`] if the config or bounds are invalid, and
/// [`Error::Aborted`] if the run gives up.
pub fn minimize<O, Obs>(
    objective: &O,
    bounds: Bounds,
    config: &Config,
    observer: Obs,
) -> Result<Solution, Error>
where
    O: Objective,
    Obs: for<'a> Observer<Event<'a>, Action>,
{
    optimize(objective, bounds, config, Direction::Minimize, observer)
}

/// Finds the minimum of the objective without observer support.
///
/// This is a convenience wrapper around [`minimize`] that uses a no-op observer.
///
/// # Errors
///
/// Returns [`Error::Config`] if the config or bounds are invalid, and
/// [`Error::Aborted`] if the run gives up.
pub fn minimize_unobserved<O: Objective>(
    objective: &O,
    bounds: Bounds,
    config: &Config,
) -> Result<Solution, Error> {
    minimize(objective, bounds, config, ())
}

/// Finds the maximum of the objective within `bounds`.
///
/// The observer receives an [`Event`] for generation 0 and every generation
/// after it. See the [module docs](self) for details.
///
/// # Errors
///
/// Returns [`Error::Config`] if the config or bounds are invalid, and
/// [`Error::Aborted`] if the run gives up.
pub fn maximize<O, Obs>(
    objective: &O,
    bounds: Bounds,
    config: &Config,
    observer: Obs,
) -> Result<Solution, Error>
where
    O: Objective,
    Obs: for<'a> Observer<Event<'a>, Action>,
{
    optimize(objective, bounds, config, Direction::Maximize, observer)
}

/// Finds the maximum of the objective without observer support.
///
/// This is a convenience wrapper around [`maximize`] that uses a no-op observer.
///
/// # Errors
///
/// Returns [`Error::Config`] if the config or bounds are invalid, and
/// [`Error::Aborted`] if the run gives up.
pub fn maximize_unobserved<O: Objective>(
    objective: &O,
    bounds: Bounds,
    config: &Config,
) -> Result<Solution, Error> {
    maximize(objective, bounds, config, ())
}

/// Optimizes the objective in the given direction.
///
/// # Errors
///
/// Returns [`Error::Config`] if the config or bounds are invalid, and
/// [`Error::Aborted`] if the run gives up.
pub fn optimize<O, Obs>(
    objective: &O,
    bounds: Bounds,
    config: &Config,
    direction: Direction,
    observer: Obs,
) -> Result<Solution, Error>
where
    O: Objective,
    Obs: for<'a> Observer<Event<'a>, Action>,
{
    search(objective, bounds, config, direction, Vec::new(), observer)
}

/// Optimizes the objective, starting the first particles at `positions`.
///
/// Remaining particles start at Halton points as usual.
///
/// # Errors
///
/// Returns [`Error::Config`] if the config or bounds are invalid, more
/// positions than particles are given, or a position lies outside `bounds`.
/// Returns [`Error::Aborted`] if the run gives up.
pub fn optimize_from<O, Obs>(
    objective: &O,
    bounds: Bounds,
    config: &Config,
    direction: Direction,
    positions: Vec<Vec<f64>>,
    observer: Obs,
) -> Result<Solution, Error>
where
    O: Objective,
    Obs: for<'a> Observer<Event<'a>, Action>,
{
    search(objective, bounds, config, direction, positions, observer)
}
