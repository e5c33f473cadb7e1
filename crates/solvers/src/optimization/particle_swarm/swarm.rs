#[cfg(feature = "rayon")]
use rayon::prelude::*;

use flock_core::{Direction, Objective};
use tracing::{debug, info, warn};

use crate::optimization::{Evaluation, evaluate};

use super::{
    AbortReason, Bounds, Config, ConfigError, Error, Event, Halton, Particle, Point, Solution,
    Status,
    config::InitialVelocity,
    particle::{Weights, random_velocity},
    perturbation::Controller,
    termination::Decision,
};

/// A particle swarm bound to an objective and a search space.
///
/// The swarm is a flat, index-addressed collection of particles plus the
/// global best. Each call to [`step`](Self::step) runs one generation:
///
/// 1. Every particle moves, pulled toward its personal best and toward the
///    global best as it stood at the start of the generation.
/// 2. A pending perturbation (see [`Perturbation`]) scatters its selected
///    particles.
/// 3. Every particle is evaluated and its personal best updated.
/// 4. The global best is recomputed from the personal bests, ties going to
///    the lowest particle index.
/// 5. The perturbation controller and the termination policy are consulted.
///
/// Steps 1 and 3 touch each particle independently and run in parallel when
/// the `rayon` feature is enabled; results do not depend on thread count.
///
/// [`Perturbation`]: super::Perturbation
pub struct Swarm<'a, O> {
    objective: &'a O,
    direction: Direction,
    config: Config,
    bounds: Bounds,
    max_velocity: Vec<f64>,
    particles: Vec<Particle>,
    best: Point,
    best_index: usize,
    generation: usize,
    stagnation: usize,
    controller: Controller,
    trace: Option<Vec<f64>>,
    last: Summary,
    state: State,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Running,
    Finished(Status),
    Aborted(AbortReason),
}

/// What happened in the most recent generation.
#[derive(Debug, Clone, Copy, Default)]
struct Summary {
    improved: bool,
    infeasible: usize,
    perturbed: usize,
}

impl<'a, O: Objective> Swarm<'a, O> {
    /// Builds and evaluates a swarm with Halton-distributed initial positions.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the config is invalid, or
    /// [`Error::Aborted`] if every initial position is infeasible.
    pub fn new(
        objective: &'a O,
        bounds: Bounds,
        config: &Config,
        direction: Direction,
    ) -> Result<Self, Error> {
        Self::with_positions(objective, bounds, config, direction, Vec::new())
    }

    /// Builds and evaluates a swarm, placing the first particles at
    /// `positions`.
    ///
    /// Particle `i` without an explicit position starts at Halton sample
    /// `i + 1`, so the default population is jointly well spread.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the config is invalid, more positions
    /// than particles are given, or a position has the wrong length or lies
    /// outside `bounds`, or the velocity limit scales the bounds to a
    /// non-finite max velocity. Returns [`Error::Aborted`] if every initial
    /// position is infeasible.
    pub fn with_positions(
        objective: &'a O,
        bounds: Bounds,
        config: &Config,
        direction: Direction,
        positions: Vec<Vec<f64>>,
    ) -> Result<Self, Error> {
        config.validate()?;
        if positions.len() > config.swarm_size() {
            return Err(ConfigError::TooManyPositions {
                given: positions.len(),
                swarm_size: config.swarm_size(),
            }
            .into());
        }
        for (particle, x) in positions.iter().enumerate() {
            bounds.check_position(particle, x)?;
        }

        let max_velocity = bounds.max_velocity(config.velocity_limit());
        // Velocities are drawn from `[-max, max]`, whose width must be finite.
        if max_velocity.iter().any(|v| !(2.0 * v).is_finite()) {
            return Err(ConfigError::VelocityLimit.into());
        }
        let halton = Halton::new(bounds.dims());
        let mut explicit = positions.into_iter();
        let starts: Vec<Vec<f64>> = (0..config.swarm_size())
            .map(|i| {
                explicit
                    .next()
                    .unwrap_or_else(|| halton.point(i as u64 + 1, &bounds))
            })
            .collect();

        let evaluations = evaluate_all(objective, &starts);
        let infeasible = evaluations.iter().filter(|e| !e.is_feasible()).count();

        let particles: Vec<Particle> = starts
            .into_iter()
            .zip(evaluations)
            .enumerate()
            .map(|(i, (position, evaluation))| {
                let mut rng = Particle::rng(config.seed(), i);
                let velocity = match config.initial_velocity() {
                    InitialVelocity::Zero => vec![0.0; position.len()],
                    InitialVelocity::Random => random_velocity(&mut rng, &max_velocity),
                };
                Particle::new(position, velocity, evaluation.value(direction), rng)
            })
            .collect();

        let best_index = best_index(&particles, direction);
        let best = particles[best_index].best().clone();

        let mut swarm = Self {
            objective,
            direction,
            config: *config,
            bounds,
            max_velocity,
            particles,
            best,
            best_index,
            generation: 0,
            stagnation: 0,
            controller: Controller::new(config.perturbation()),
            trace: None,
            last: Summary {
                improved: false,
                infeasible,
                perturbed: 0,
            },
            state: State::Running,
        };
        if config.record_trace() {
            swarm.trace = Some(vec![swarm.best.objective]);
        }

        debug!(
            particles = swarm.particles.len(),
            dims = swarm.bounds.dims(),
            best = swarm.best.objective,
            infeasible,
            "swarm initialized"
        );

        if infeasible == swarm.particles.len() {
            warn!("every initial position was infeasible");
            return Err(swarm.abort(AbortReason::AllInfeasible));
        }
        swarm.decide()?;
        Ok(swarm)
    }

    /// Runs one generation.
    ///
    /// Returns `Some(status)` once the run has finished; further calls do
    /// nothing and return the same status.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Aborted`] if every particle is infeasible in this
    /// generation, or the global best has stagnated past the hard cap.
    pub fn step(&mut self) -> Result<Option<Status>, Error> {
        match self.state {
            State::Running => {}
            State::Finished(status) => return Ok(Some(status)),
            State::Aborted(reason) => return Err(self.abort(reason)),
        }

        self.generation += 1;
        let weights = Weights {
            inertia: self
                .config
                .inertia()
                .weight(self.generation, self.config.max_iters()),
            cognitive: self.config.cognitive(),
            social: self.config.social(),
        };

        // Every particle reads the same generation-start global best.
        let global_best = self.best.x.as_slice();
        let bounds = &self.bounds;
        let max_velocity = self.max_velocity.as_slice();
        let boundary = self.config.boundary();
        let advance = |p: &mut Particle| {
            p.update_velocity(global_best, weights, max_velocity);
            p.update_position(bounds, boundary);
        };
        #[cfg(feature = "rayon")]
        self.particles.par_iter_mut().for_each(advance);
        #[cfg(not(feature = "rayon"))]
        self.particles.iter_mut().for_each(advance);

        let perturbed = self.controller.apply(
            &mut self.particles,
            self.best_index,
            &self.bounds,
            &self.max_velocity,
            self.direction,
        );

        let objective = self.objective;
        let direction = self.direction;
        let observe = |p: &mut Particle| {
            let evaluation = p.evaluate(objective);
            p.update_best(evaluation, direction);
            usize::from(!evaluation.is_feasible())
        };
        #[cfg(feature = "rayon")]
        let infeasible: usize = self.particles.par_iter_mut().map(observe).sum();
        #[cfg(not(feature = "rayon"))]
        let infeasible: usize = self.particles.iter_mut().map(observe).sum();

        let previous = self.best.objective;
        self.best_index = best_index(&self.particles, direction);
        self.best.clone_from(self.particles[self.best_index].best());
        let improved = direction.is_better(self.best.objective, previous);
        self.stagnation = if improved { 0 } else { self.stagnation + 1 };
        self.last = Summary {
            improved,
            infeasible,
            perturbed,
        };
        if let Some(trace) = &mut self.trace {
            trace.push(self.best.objective);
        }

        debug!(
            generation = self.generation,
            best = self.best.objective,
            improved,
            infeasible,
            perturbed,
            "generation complete"
        );

        if infeasible == self.particles.len() {
            warn!(generation = self.generation, "every particle was infeasible");
            return Err(self.abort(AbortReason::AllInfeasible));
        }
        if self.controller.record(improved) {
            info!(
                generation = self.generation,
                stagnation = self.stagnation,
                "global best stagnated, perturbing swarm"
            );
        }
        self.decide()
    }

    /// Returns the final status, or `None` while the run continues.
    #[must_use]
    pub fn status(&self) -> Option<Status> {
        match self.state {
            State::Finished(status) => Some(status),
            State::Running | State::Aborted(_) => None,
        }
    }

    /// Returns a read-only view of the most recent generation.
    #[must_use]
    pub fn event(&self) -> Event<'_> {
        Event {
            generation: self.generation,
            best: &self.best,
            improved: self.last.improved,
            infeasible: self.last.infeasible,
            perturbed: self.last.perturbed,
            stagnation: self.stagnation,
            particles: &self.particles,
        }
    }

    /// Returns the global best.
    #[must_use]
    pub fn best(&self) -> &Point {
        &self.best
    }

    /// Returns the index of the particle holding the global best.
    #[must_use]
    pub fn best_index(&self) -> usize {
        self.best_index
    }

    /// Returns all particles in index order.
    #[must_use]
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Returns the number of generations run after initialization.
    #[must_use]
    pub fn generation(&self) -> usize {
        self.generation
    }

    /// Returns the number of generations since the global best improved.
    #[must_use]
    pub fn stagnation(&self) -> usize {
        self.stagnation
    }

    /// Returns the search space.
    #[must_use]
    pub fn bounds(&self) -> &Bounds {
        &self.bounds
    }

    /// Returns the optimization direction.
    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Returns the max velocity magnitude per dimension.
    #[must_use]
    pub fn max_velocity(&self) -> &[f64] {
        &self.max_velocity
    }

    /// Returns the recorded global best values, if recording is enabled.
    #[must_use]
    pub fn trace(&self) -> Option<&[f64]> {
        self.trace.as_deref()
    }

    /// Consumes the swarm and returns its best result with `status`.
    #[must_use]
    pub fn into_solution(self, status: Status) -> Solution {
        Solution {
            status,
            x: self.best.x,
            objective: self.best.objective,
            iters: self.generation,
            trace: self.trace,
        }
    }

    fn decide(&mut self) -> Result<Option<Status>, Error> {
        let decision = self.config.termination().decide(
            self.generation,
            self.best.objective,
            self.stagnation,
            self.direction,
        );
        match decision {
            Decision::Continue => Ok(None),
            Decision::Stop(status) => {
                self.state = State::Finished(status);
                Ok(Some(status))
            }
            Decision::Abort(reason) => {
                warn!(generation = self.generation, %reason, "aborting run");
                Err(self.abort(reason))
            }
        }
    }

    fn abort(&mut self, reason: AbortReason) -> Error {
        self.state = State::Aborted(reason);
        Error::Aborted {
            reason,
            best: self.best.clone(),
            iters: self.generation,
        }
    }
}

/// Evaluates every start position.
fn evaluate_all<O: Objective>(objective: &O, positions: &[Vec<f64>]) -> Vec<Evaluation> {
    #[cfg(feature = "rayon")]
    let evaluations = positions.par_iter().map(|x| evaluate(objective, x)).collect();
    #[cfg(not(feature = "rayon"))]
    let evaluations = positions.iter().map(|x| evaluate(objective, x)).collect();
    evaluations
}

/// Returns the index of the best personal best; ties go to the lowest index.
fn best_index(particles: &[Particle], direction: Direction) -> usize {
    particles
        .iter()
        .enumerate()
        .skip(1)
        .fold(0, |best, (i, p)| {
            if direction.is_better(p.best().objective, particles[best].best().objective) {
                i
            } else {
                best
            }
        })
}
