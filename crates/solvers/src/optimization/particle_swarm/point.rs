/// A position with its objective value.
#[derive(Debug, Clone, PartialEq)]
pub struct Point {
    /// The position.
    pub x: Vec<f64>,

    /// The objective value at `x`.
    pub objective: f64,
}

impl Point {
    /// Creates a new point.
    #[must_use]
    pub fn new(x: Vec<f64>, objective: f64) -> Self {
        Self { x, objective }
    }
}
