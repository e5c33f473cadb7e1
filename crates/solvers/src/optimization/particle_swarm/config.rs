use thiserror::Error;

use super::{Perturbation, Termination, perturbation::Selection, termination::Target};

/// Configuration for the particle swarm solver.
///
/// Construct with [`Config::default`] and chain builder methods as needed.
/// Values are validated when a swarm is built, before any evaluation.
///
/// # Example
///
/// ```
/// use flock_solvers::optimization::particle_swarm::{Config, Inertia};
///
/// let config = Config::default()
///     .with_swarm_size(20)
///     .with_inertia(Inertia::linear(0.9, 0.4))
///     .with_max_iters(200)
///     .with_seed(7);
///
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Config {
    swarm_size: usize,
    inertia: Inertia,
    cognitive: f64,
    social: f64,
    velocity_limit: f64,
    initial_velocity: InitialVelocity,
    boundary: Boundary,
    seed: u64,
    perturbation: Option<Perturbation>,
    termination: Termination,
    record_trace: bool,
}

/// Errors that can occur when validating a particle swarm configuration.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("bounds must have at least one dimension")]
    EmptyBounds,

    #[error("dimension {dim}: bounds [{lower}, {upper}] must be finite with lower < upper and a finite width")]
    Bounds { dim: usize, lower: f64, upper: f64 },

    #[error("expected {expected} max velocity values, got {actual}")]
    MaxVelocityLength { expected: usize, actual: usize },

    #[error("dimension {dim}: max velocity must be finite and positive")]
    MaxVelocity { dim: usize },

    #[error("swarm size must be at least 1")]
    SwarmSize,

    #[error("max_iters must be at least 1")]
    MaxIters,

    #[error("inertia weights must be finite and non-negative")]
    Inertia,

    #[error("cognitive coefficient must be finite and positive")]
    Cognitive,

    #[error("social coefficient must be finite and positive")]
    Social,

    #[error("velocity limit must be positive and give a finite max velocity in every dimension")]
    VelocityLimit,

    #[error("perturbation threshold must be at least 1")]
    PerturbationThreshold,

    #[error("perturbation magnitude must be finite and positive")]
    PerturbationMagnitude,

    #[error("perturbation fraction must be in (0, 1]")]
    PerturbationFraction,

    #[error("stagnation cap {cap} must exceed the perturbation threshold {threshold}")]
    StagnationCap { cap: usize, threshold: usize },

    #[error("target must be finite and tolerance finite and non-negative")]
    Target,

    #[error("{given} initial positions given for a swarm of {swarm_size}")]
    TooManyPositions { given: usize, swarm_size: usize },

    #[error("particle {particle}: initial position has {actual} values, expected {expected}")]
    PositionLength {
        particle: usize,
        expected: usize,
        actual: usize,
    },

    #[error("particle {particle}: initial value {value} is outside the bounds of dimension {dim}")]
    PositionOutOfBounds {
        particle: usize,
        dim: usize,
        value: f64,
    },
}

/// Inertia weight schedule.
///
/// The weight decays linearly from `start` (first generation) to `end`
/// (generation `max_iters`). A constant weight has `start == end`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Inertia {
    start: f64,
    end: f64,
}

impl Inertia {
    /// Creates a constant inertia weight.
    #[must_use]
    pub fn constant(weight: f64) -> Self {
        Self::linear(weight, weight)
    }

    /// Creates a weight that decays linearly from `start` to `end`.
    #[must_use]
    pub fn linear(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    /// Returns the weight used in `generation` of a run of `max_iters`.
    #[must_use]
    pub fn weight(&self, generation: usize, max_iters: usize) -> f64 {
        if max_iters <= 1 {
            return self.start;
        }
        #[allow(clippy::cast_precision_loss)]
        let progress = (generation.saturating_sub(1) as f64 / (max_iters - 1) as f64).min(1.0);
        self.start + (self.end - self.start) * progress
    }

    fn is_valid(&self) -> bool {
        [self.start, self.end]
            .iter()
            .all(|w| w.is_finite() && *w >= 0.0)
    }
}

/// How particle velocities are initialized.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InitialVelocity {
    /// All components start at zero.
    Zero,

    /// Components are drawn uniformly from `[-max_velocity, max_velocity]`.
    #[default]
    Random,
}

/// What happens to a velocity component when its particle hits a bound.
///
/// The position is always clamped onto the bound. The policy is fixed for a
/// run because it changes convergence behavior.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Boundary {
    /// The offending velocity component is set to zero.
    #[default]
    Absorb,

    /// The offending velocity component changes sign.
    Reflect,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            swarm_size: 30,
            inertia: Inertia::constant(0.729),
            cognitive: 1.494,
            social: 1.494,
            velocity_limit: 0.5,
            initial_velocity: InitialVelocity::Random,
            boundary: Boundary::Absorb,
            seed: 0,
            perturbation: Some(Perturbation::default()),
            termination: Termination::default(),
            record_trace: false,
        }
    }
}

impl Config {
    /// Sets the number of particles.
    #[must_use]
    pub fn with_swarm_size(mut self, swarm_size: usize) -> Self {
        self.swarm_size = swarm_size;
        self
    }

    /// Sets the inertia weight schedule.
    #[must_use]
    pub fn with_inertia(mut self, inertia: Inertia) -> Self {
        self.inertia = inertia;
        self
    }

    /// Sets the attraction toward each particle's personal best.
    #[must_use]
    pub fn with_cognitive(mut self, cognitive: f64) -> Self {
        self.cognitive = cognitive;
        self
    }

    /// Sets the attraction toward the global best.
    #[must_use]
    pub fn with_social(mut self, social: f64) -> Self {
        self.social = social;
        self
    }

    /// Sets the max velocity as a fraction of each dimension's width.
    ///
    /// Ignored for bounds that carry explicit limits
    /// (see [`Bounds::with_max_velocity`]).
    ///
    /// [`Bounds::with_max_velocity`]: super::Bounds::with_max_velocity
    #[must_use]
    pub fn with_velocity_limit(mut self, fraction: f64) -> Self {
        self.velocity_limit = fraction;
        self
    }

    /// Sets how initial velocities are chosen.
    #[must_use]
    pub fn with_initial_velocity(mut self, initial_velocity: InitialVelocity) -> Self {
        self.initial_velocity = initial_velocity;
        self
    }

    /// Sets the boundary policy.
    #[must_use]
    pub fn with_boundary(mut self, boundary: Boundary) -> Self {
        self.boundary = boundary;
        self
    }

    /// Sets the root random seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Enables perturbation with the given policy.
    #[must_use]
    pub fn with_perturbation(mut self, perturbation: Perturbation) -> Self {
        self.perturbation = Some(perturbation);
        self
    }

    /// Disables perturbation.
    #[must_use]
    pub fn without_perturbation(mut self) -> Self {
        self.perturbation = None;
        self
    }

    /// Sets the maximum number of generations.
    #[must_use]
    pub fn with_max_iters(mut self, max_iters: usize) -> Self {
        self.termination.max_iters = max_iters;
        self
    }

    /// Stops once the global best is within `tolerance` of `target` or better.
    #[must_use]
    pub fn with_target(mut self, target: f64, tolerance: f64) -> Self {
        self.termination.target = Some(Target {
            value: target,
            tolerance,
        });
        self
    }

    /// Aborts the run once the global best has not improved for more than
    /// `cap` generations.
    #[must_use]
    pub fn with_stagnation_cap(mut self, cap: usize) -> Self {
        self.termination.stagnation_cap = Some(cap);
        self
    }

    /// Enables or disables recording of the global best value per generation.
    #[must_use]
    pub fn with_trace(mut self, record: bool) -> Self {
        self.record_trace = record;
        self
    }

    /// Checks that every option is usable.
    ///
    /// # Errors
    ///
    /// Returns the first invalid option found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.swarm_size == 0 {
            return Err(ConfigError::SwarmSize);
        }
        if !self.inertia.is_valid() {
            return Err(ConfigError::Inertia);
        }
        if !self.cognitive.is_finite() || self.cognitive <= 0.0 {
            return Err(ConfigError::Cognitive);
        }
        if !self.social.is_finite() || self.social <= 0.0 {
            return Err(ConfigError::Social);
        }
        if !self.velocity_limit.is_finite() || self.velocity_limit <= 0.0 {
            return Err(ConfigError::VelocityLimit);
        }
        if let Some(perturbation) = &self.perturbation {
            validate_perturbation(perturbation)?;
        }
        self.termination.validate(self.perturbation.map(|p| p.threshold()))
    }

    /// Returns the number of particles.
    #[must_use]
    pub fn swarm_size(&self) -> usize {
        self.swarm_size
    }

    /// Returns the inertia weight schedule.
    #[must_use]
    pub fn inertia(&self) -> Inertia {
        self.inertia
    }

    /// Returns the cognitive coefficient.
    #[must_use]
    pub fn cognitive(&self) -> f64 {
        self.cognitive
    }

    /// Returns the social coefficient.
    #[must_use]
    pub fn social(&self) -> f64 {
        self.social
    }

    /// Returns the max velocity as a fraction of each dimension's width.
    #[must_use]
    pub fn velocity_limit(&self) -> f64 {
        self.velocity_limit
    }

    /// Returns the initial velocity policy.
    #[must_use]
    pub fn initial_velocity(&self) -> InitialVelocity {
        self.initial_velocity
    }

    /// Returns the boundary policy.
    #[must_use]
    pub fn boundary(&self) -> Boundary {
        self.boundary
    }

    /// Returns the root random seed.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Returns the perturbation policy, if enabled.
    #[must_use]
    pub fn perturbation(&self) -> Option<Perturbation> {
        self.perturbation
    }

    /// Returns the termination policy.
    #[must_use]
    pub fn termination(&self) -> Termination {
        self.termination
    }

    /// Returns the maximum number of generations.
    #[must_use]
    pub fn max_iters(&self) -> usize {
        self.termination.max_iters
    }

    /// Returns whether the global best is recorded per generation.
    #[must_use]
    pub fn record_trace(&self) -> bool {
        self.record_trace
    }
}

fn validate_perturbation(perturbation: &Perturbation) -> Result<(), ConfigError> {
    if perturbation.threshold() == 0 {
        return Err(ConfigError::PerturbationThreshold);
    }
    let magnitude = perturbation.magnitude();
    if !magnitude.is_finite() || magnitude <= 0.0 {
        return Err(ConfigError::PerturbationMagnitude);
    }
    if let Selection::Worst(fraction) = perturbation.selection() {
        if !(fraction > 0.0 && fraction <= 1.0) {
            return Err(ConfigError::PerturbationFraction);
        }
    }
    Ok(())
}
