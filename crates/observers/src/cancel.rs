use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use flock_core::Observer;
use tracing::debug;

use crate::traits::CanStopEarly;

/// A shareable flag that stops a run at the next observed event.
///
/// Clones share the flag, so one clone can be handed to the solver as its
/// observer while another is cancelled from a different thread, a signal
/// handler, or the objective itself.
///
/// # Example
///
/// ```rust
/// use flock_core::FnObjective;
/// use flock_observers::CancelToken;
/// use flock_solvers::optimization::particle_swarm::{self, Bounds, Config, Status};
///
/// let token = CancelToken::new();
/// token.cancel();
///
/// let bounds = Bounds::uniform(2, -1.0, 1.0).unwrap();
/// let objective = FnObjective(|x: &[f64]| x.iter().map(|v| v * v).sum::<f64>());
/// let solution = particle_swarm::minimize(&objective, bounds, &Config::default(), token).unwrap();
///
/// assert_eq!(solution.status, Status::StoppedByObserver);
/// assert_eq!(solution.iters, 0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    /// Creates a token that has not been cancelled.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation for every clone of this token.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    /// Returns `true` once any clone has been cancelled.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}

impl<E, A: CanStopEarly> Observer<E, A> for CancelToken {
    fn observe(&mut self, _event: &E) -> Option<A> {
        if self.is_cancelled() {
            debug!("cancellation requested, stopping");
            return Some(A::stop_early());
        }
        None
    }
}
