//! Watch a particle swarm escape the local minima of the Rastrigin function.
//!
//! # Usage
//!
//! ```text
//! cargo run --example progress
//! cargo run --example progress -- 5
//! ```
//!
//! The optional argument is the number of dimensions (default 2). The run
//! stops after 300 generations or when the user-supplied budget of 20 000
//! evaluations is spent, whichever comes first, then prints the best value
//! every 25 generations.

use std::{
    error::Error,
    f64::consts::PI,
    sync::atomic::{AtomicUsize, Ordering},
};

use flock_core::{Objective, Observer};
use flock_observers::{CancelToken, History};
use flock_solvers::optimization::particle_swarm::{
    self, Action, Bounds, Config, Event, Perturbation, Selection,
};

/// Rastrigin function that cancels the run once its budget is spent.
struct Rastrigin {
    evaluations: AtomicUsize,
    budget: usize,
    token: CancelToken,
}

impl Objective for Rastrigin {
    type Error = std::convert::Infallible;

    fn evaluate(&self, x: &[f64]) -> Result<f64, Self::Error> {
        if self.evaluations.fetch_add(1, Ordering::Relaxed) + 1 >= self.budget {
            self.token.cancel();
        }
        Ok(x
            .iter()
            .map(|v| v * v - 10.0 * (2.0 * PI * v).cos() + 10.0)
            .sum())
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let dims = std::env::args()
        .nth(1)
        .as_deref()
        .map(str::parse::<usize>)
        .transpose()?
        .unwrap_or(2);

    let token = CancelToken::new();
    let objective = Rastrigin {
        evaluations: AtomicUsize::new(0),
        budget: 20_000,
        token: token.clone(),
    };
    let bounds = Bounds::uniform(dims, -5.12, 5.12)?;
    let config = Config::default()
        .with_swarm_size(40)
        .with_max_iters(300)
        .with_seed(2024)
        .with_perturbation(Perturbation::new(15, 0.2).with_selection(Selection::Worst(0.5)));

    let mut history = History::new();
    let mut cancel = token;
    let observer = |event: &Event<'_>| -> Option<Action> {
        history.record(event.generation, event.best.objective);
        if event.perturbed > 0 {
            println!("generation {:>4}: perturbed {} particles", event.generation, event.perturbed);
        }
        cancel.observe(event)
    };
    let solution = particle_swarm::minimize(&objective, bounds, &config, observer)?;

    println!();
    for entry in history.entries().iter().filter(|e| e.generation % 25 == 0) {
        println!("generation {:>4}: best {:.6}", entry.generation, entry.objective);
    }
    println!();
    println!("status:      {:?}", solution.status);
    println!("generations: {}", solution.iters);
    println!("evaluations: {}", objective.evaluations.load(Ordering::Relaxed));
    println!("best:        {:.6} at {:?}", solution.objective, solution.x);

    Ok(())
}
