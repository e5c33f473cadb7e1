//! Stagnation detection and escape.
//!
//! When the global best stops improving the swarm has usually collapsed onto
//! one basin. The [`Controller`] counts generations without improvement and,
//! once the count reaches the policy threshold, scatters a subset of
//! particles: each selected particle gets a freshly drawn velocity and a
//! random position offset scaled by the policy magnitude and the width of
//! each dimension.

use flock_core::Direction;

use super::{Bounds, Particle};

/// Perturbation policy.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Perturbation {
    threshold: usize,
    magnitude: f64,
    selection: Selection,
    elitism: bool,
}

/// Which particles a perturbation scatters.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Selection {
    /// Every particle.
    All,

    /// Particles whose personal best has not improved for at least the
    /// perturbation threshold.
    Stagnant,

    /// The given fraction of particles with the worst personal bests,
    /// rounded up.
    Worst(f64),
}

impl Default for Perturbation {
    fn default() -> Self {
        Self::new(20, 0.1)
    }
}

impl Perturbation {
    /// Creates a policy that triggers after `threshold` generations without
    /// improvement and jitters by up to `magnitude` times each dimension's width.
    ///
    /// Defaults to [`Selection::Stagnant`] with elitism enabled.
    #[must_use]
    pub fn new(threshold: usize, magnitude: f64) -> Self {
        Self {
            threshold,
            magnitude,
            selection: Selection::Stagnant,
            elitism: true,
        }
    }

    /// Sets which particles are scattered.
    #[must_use]
    pub fn with_selection(mut self, selection: Selection) -> Self {
        self.selection = selection;
        self
    }

    /// Sets whether the particle holding the global best is exempt.
    #[must_use]
    pub fn with_elitism(mut self, elitism: bool) -> Self {
        self.elitism = elitism;
        self
    }

    /// Returns the number of stagnant generations that triggers a perturbation.
    #[must_use]
    pub fn threshold(&self) -> usize {
        self.threshold
    }

    /// Returns the jitter scale relative to each dimension's width.
    #[must_use]
    pub fn magnitude(&self) -> f64 {
        self.magnitude
    }

    /// Returns the selection policy.
    #[must_use]
    pub fn selection(&self) -> Selection {
        self.selection
    }

    /// Returns whether the global best holder is exempt.
    #[must_use]
    pub fn elitism(&self) -> bool {
        self.elitism
    }

    /// Returns the indices of the particles to scatter, in ascending order.
    pub(super) fn select(
        &self,
        particles: &[Particle],
        best_index: usize,
        direction: Direction,
    ) -> Vec<usize> {
        let mut selected: Vec<usize> = match self.selection {
            Selection::All => (0..particles.len()).collect(),
            Selection::Stagnant => (0..particles.len())
                .filter(|&i| particles[i].stagnation() >= self.threshold)
                .collect(),
            Selection::Worst(fraction) => {
                #[allow(
                    clippy::cast_possible_truncation,
                    clippy::cast_precision_loss,
                    clippy::cast_sign_loss
                )]
                let count = ((fraction * particles.len() as f64).ceil() as usize).min(particles.len());
                let mut order: Vec<usize> = (0..particles.len()).collect();
                // Worst first; equal scores keep index order.
                order.sort_by(|&a, &b| {
                    let sa = direction.score(particles[a].best().objective);
                    let sb = direction.score(particles[b].best().objective);
                    sb.total_cmp(&sa)
                });
                order.truncate(count);
                order.sort_unstable();
                order
            }
        };
        if self.elitism {
            selected.retain(|&i| i != best_index);
        }
        selected
    }
}

/// Counts stagnant generations and schedules perturbations.
#[derive(Debug, Clone)]
pub(super) struct Controller {
    policy: Option<Perturbation>,
    streak: usize,
    pending: bool,
}

impl Controller {
    pub(super) fn new(policy: Option<Perturbation>) -> Self {
        Self {
            policy,
            streak: 0,
            pending: false,
        }
    }

    /// Records whether the global best improved this generation.
    ///
    /// Returns `true` when a perturbation is triggered. The streak then
    /// restarts, so the next trigger needs another full threshold of
    /// stagnant generations.
    pub(super) fn record(&mut self, improved: bool) -> bool {
        let Some(policy) = self.policy else {
            return false;
        };
        if improved {
            self.streak = 0;
            return false;
        }
        self.streak += 1;
        if self.streak >= policy.threshold {
            self.streak = 0;
            self.pending = true;
            return true;
        }
        false
    }

    /// Scatters the selected particles if a perturbation is pending.
    ///
    /// Returns the number of particles scattered.
    pub(super) fn apply(
        &mut self,
        particles: &mut [Particle],
        best_index: usize,
        bounds: &Bounds,
        max_velocity: &[f64],
        direction: Direction,
    ) -> usize {
        if !std::mem::take(&mut self.pending) {
            return 0;
        }
        let Some(policy) = self.policy else {
            return 0;
        };
        let selected = policy.select(particles, best_index, direction);
        for &i in &selected {
            particles[i].scatter(policy.magnitude, bounds, max_velocity);
        }
        selected.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::optimization::Evaluation;

    /// Particles at 0, 1, 2, … with personal best equal to their index.
    fn particles(n: usize) -> Vec<Particle> {
        (0..n)
            .map(|i| {
                #[allow(clippy::cast_precision_loss)]
                let x = i as f64;
                Particle::new(vec![x], vec![0.0], x, Particle::rng(1, i))
            })
            .collect()
    }

    #[test]
    fn triggers_after_threshold_and_resets() {
        let mut controller = Controller::new(Some(Perturbation::new(3, 0.1)));
        assert!(!controller.record(false));
        assert!(!controller.record(false));
        assert!(controller.record(false));
        assert!(!controller.record(false));
        assert!(!controller.record(false));
        assert!(controller.record(false));
    }

    #[test]
    fn improvement_restarts_the_streak() {
        let mut controller = Controller::new(Some(Perturbation::new(2, 0.1)));
        assert!(!controller.record(false));
        assert!(!controller.record(true));
        assert!(!controller.record(false));
        assert!(controller.record(false));
    }

    #[test]
    fn disabled_controller_never_triggers() {
        let mut controller = Controller::new(None);
        for _ in 0..100 {
            assert!(!controller.record(false));
        }
    }

    #[test]
    fn all_with_elitism_spares_the_best() {
        let policy = Perturbation::new(1, 0.1).with_selection(Selection::All);
        let swarm = particles(4);
        assert_eq!(policy.select(&swarm, 2, Direction::Minimize), vec![0, 1, 3]);

        let policy = policy.with_elitism(false);
        assert_eq!(policy.select(&swarm, 2, Direction::Minimize), vec![0, 1, 2, 3]);
    }

    #[test]
    fn worst_fraction_respects_direction() {
        let policy = Perturbation::new(1, 0.1)
            .with_selection(Selection::Worst(0.5))
            .with_elitism(false);
        let swarm = particles(5);
        // ceil(0.5 * 5) = 3 particles.
        assert_eq!(policy.select(&swarm, 0, Direction::Minimize), vec![2, 3, 4]);
        assert_eq!(policy.select(&swarm, 4, Direction::Maximize), vec![0, 1, 2]);
    }

    #[test]
    fn stagnant_selects_by_personal_best_age() {
        let policy = Perturbation::new(2, 0.1);
        let mut swarm = particles(3);
        for _ in 0..2 {
            swarm[1].update_best(Evaluation::Feasible(10.0), Direction::Minimize);
            swarm[2].update_best(Evaluation::Feasible(10.0), Direction::Minimize);
        }
        // Particle 0 is fresh; particle 1 is exempt as the best holder.
        assert_eq!(policy.select(&swarm, 1, Direction::Minimize), vec![2]);
    }

    #[test]
    fn apply_only_runs_when_pending() {
        let bounds = Bounds::uniform(1, 0.0, 10.0).unwrap();
        let max_velocity = bounds.max_velocity(0.5);
        let policy = Perturbation::new(1, 0.5).with_selection(Selection::All);
        let mut controller = Controller::new(Some(policy));
        let mut swarm = particles(4);

        assert_eq!(
            controller.apply(&mut swarm, 0, &bounds, &max_velocity, Direction::Minimize),
            0
        );

        assert!(controller.record(false));
        assert_eq!(
            controller.apply(&mut swarm, 0, &bounds, &max_velocity, Direction::Minimize),
            3
        );
        assert_eq!(swarm[0].position(), &[0.0]);
        assert!(swarm.iter().all(|p| bounds.contains(p.position())));

        assert_eq!(
            controller.apply(&mut swarm, 0, &bounds, &max_velocity, Direction::Minimize),
            0
        );
    }
}
