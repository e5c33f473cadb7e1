/// Actions an observer can take during a particle swarm run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Stop at this generation boundary and return the best solution so far.
    StopEarly,
}
