use flock_core::{Direction, Objective, Observer};
use tracing::info;

use super::{Action, Bounds, Config, Error, Event, Solution, Status, Swarm};

/// Drives a swarm until termination, an abort, or an observer stop.
///
/// The observer sees generation 0 (the initialized swarm) and every
/// generation after it, including one that aborts the run. A `StopEarly`
/// returned for a finishing or aborting generation is ignored; the run already
/// has an outcome. An abort during initialization happens before any event.
pub(super) fn search<O, Obs>(
    objective: &O,
    bounds: Bounds,
    config: &Config,
    direction: Direction,
    positions: Vec<Vec<f64>>,
    mut observer: Obs,
) -> Result<Solution, Error>
where
    O: Objective,
    Obs: for<'a> Observer<Event<'a>, Action>,
{
    let mut swarm = Swarm::with_positions(objective, bounds, config, direction, positions)?;

    loop {
        let action = observer.observe(&swarm.event());

        if let Some(status) = swarm.status() {
            info!(
                ?status,
                generations = swarm.generation(),
                best = swarm.best().objective,
                "particle swarm finished"
            );
            return Ok(swarm.into_solution(status));
        }

        if let Some(Action::StopEarly) = action {
            info!(
                generations = swarm.generation(),
                best = swarm.best().objective,
                "particle swarm stopped by observer"
            );
            return Ok(swarm.into_solution(Status::StoppedByObserver));
        }

        if let Err(error) = swarm.step() {
            observer.observe(&swarm.event());
            return Err(error);
        }
    }
}
