use flock_core::{Direction, Objective};
use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::optimization::{Evaluation, evaluate};

use super::{Bounds, Point, bounds::Side, config::Boundary};

/// Odd multiplier that spreads consecutive particle indices across seeds.
const STREAM_MIX: u64 = 0x9E37_79B9_7F4A_7C15;

/// One candidate solution in the swarm.
///
/// Each particle owns its random generator, seeded from the run seed and the
/// particle index, so updates can run in any order (or in parallel) and still
/// reproduce exactly.
#[derive(Debug, Clone)]
pub struct Particle {
    position: Vec<f64>,
    velocity: Vec<f64>,
    value: f64,
    best: Point,
    stagnation: usize,
    rng: StdRng,
}

/// Coefficients of the velocity update for one generation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct Weights {
    pub(super) inertia: f64,
    pub(super) cognitive: f64,
    pub(super) social: f64,
}

impl Particle {
    /// Creates a particle that has just been evaluated at `position`.
    pub(super) fn new(position: Vec<f64>, velocity: Vec<f64>, value: f64, rng: StdRng) -> Self {
        Self {
            best: Point::new(position.clone(), value),
            position,
            velocity,
            value,
            stagnation: 0,
            rng,
        }
    }

    /// Returns the random generator for particle `index` of a run seeded with `seed`.
    pub(super) fn rng(seed: u64, index: usize) -> StdRng {
        let stream = (index as u64).wrapping_add(1).wrapping_mul(STREAM_MIX);
        StdRng::seed_from_u64(seed ^ stream)
    }

    /// Returns the current position.
    #[must_use]
    pub fn position(&self) -> &[f64] {
        &self.position
    }

    /// Returns the current velocity.
    #[must_use]
    pub fn velocity(&self) -> &[f64] {
        &self.velocity
    }

    /// Returns the objective value from the most recent evaluation.
    ///
    /// Infeasible evaluations report the worst value for the direction.
    #[must_use]
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Returns the best point this particle has occupied.
    #[must_use]
    pub fn best(&self) -> &Point {
        &self.best
    }

    /// Returns the number of generations since the personal best improved.
    #[must_use]
    pub fn stagnation(&self) -> usize {
        self.stagnation
    }

    /// Evaluates the objective at the current position.
    pub(super) fn evaluate<O: Objective>(&self, objective: &O) -> Evaluation {
        evaluate(objective, &self.position)
    }

    /// Records an evaluation of the current position.
    ///
    /// Returns `true` if the personal best strictly improved.
    pub(super) fn update_best(&mut self, evaluation: Evaluation, direction: Direction) -> bool {
        self.value = evaluation.value(direction);
        if direction.is_better(self.value, self.best.objective) {
            self.best.x.clone_from(&self.position);
            self.best.objective = self.value;
            self.stagnation = 0;
            true
        } else {
            self.stagnation += 1;
            false
        }
    }

    /// Pulls the velocity toward the personal and global bests.
    ///
    /// Each component becomes
    /// `w·v + c1·r1·(pbest − x) + c2·r2·(gbest − x)`, clamped to
    /// `±max_velocity`, with fresh `r1`, `r2` in `[0, 1)` per component.
    pub(super) fn update_velocity(
        &mut self,
        global_best: &[f64],
        weights: Weights,
        max_velocity: &[f64],
    ) {
        for d in 0..self.position.len() {
            let r1: f64 = self.rng.random();
            let r2: f64 = self.rng.random();
            let x = self.position[d];
            let v = weights.inertia * self.velocity[d]
                + weights.cognitive * r1 * (self.best.x[d] - x)
                + weights.social * r2 * (global_best[d] - x);
            self.velocity[d] = v.clamp(-max_velocity[d], max_velocity[d]);
        }
    }

    /// Moves by the current velocity and clamps into `bounds`.
    pub(super) fn update_position(&mut self, bounds: &Bounds, boundary: Boundary) {
        for d in 0..self.position.len() {
            let (x, side) = bounds.clamp(d, self.position[d] + self.velocity[d]);
            self.position[d] = x;
            if side.is_some() {
                self.velocity[d] = match boundary {
                    Boundary::Absorb => 0.0,
                    Boundary::Reflect => -self.velocity[d],
                };
            }
        }
    }

    /// Redraws the velocity and jitters the position by up to
    /// `magnitude · width` per dimension, then clamps into `bounds`.
    pub(super) fn scatter(&mut self, magnitude: f64, bounds: &Bounds, max_velocity: &[f64]) {
        self.velocity = random_velocity(&mut self.rng, max_velocity);
        for d in 0..self.position.len() {
            let offset = self.rng.random_range(-1.0..1.0) * magnitude * bounds.width(d);
            let (x, side) = bounds.clamp(d, self.position[d] + offset);
            self.position[d] = x;
            if matches!(
                (side, self.velocity[d] > 0.0),
                (Some(Side::Upper), true) | (Some(Side::Lower), false)
            ) {
                self.velocity[d] = -self.velocity[d];
            }
        }
    }
}

/// Draws each component uniformly from `[-max, max]`.
pub(super) fn random_velocity(rng: &mut StdRng, max_velocity: &[f64]) -> Vec<f64> {
    max_velocity
        .iter()
        .map(|&max| rng.random_range(-max..=max))
        .collect()
}
