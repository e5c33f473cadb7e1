use super::ConfigError;

/// The search space: a closed `[lower, upper]` interval per dimension.
///
/// Every particle position is kept inside these bounds after each update.
/// The dimension count is fixed for the life of a run.
#[derive(Debug, Clone, PartialEq)]
pub struct Bounds {
    lower: Vec<f64>,
    upper: Vec<f64>,
    max_velocity: Option<Vec<f64>>,
}

impl Bounds {
    /// Creates bounds from `(lower, upper)` pairs, one per dimension.
    ///
    /// # Errors
    ///
    /// Returns an error if there are no dimensions, or if any pair is
    /// non-finite, has `lower >= upper`, or is too wide for `upper - lower`
    /// to be finite.
    pub fn new<I>(pairs: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (f64, f64)>,
    {
        let (lower, upper): (Vec<f64>, Vec<f64>) = pairs.into_iter().unzip();
        if lower.is_empty() {
            return Err(ConfigError::EmptyBounds);
        }
        for (dim, (&lo, &hi)) in lower.iter().zip(&upper).enumerate() {
            if !lo.is_finite() || !hi.is_finite() || lo >= hi || !(hi - lo).is_finite() {
                return Err(ConfigError::Bounds {
                    dim,
                    lower: lo,
                    upper: hi,
                });
            }
        }
        Ok(Self {
            lower,
            upper,
            max_velocity: None,
        })
    }

    /// Creates bounds with the same interval in every dimension.
    ///
    /// # Errors
    ///
    /// Returns an error if `dims` is zero or the interval is invalid.
    pub fn uniform(dims: usize, lower: f64, upper: f64) -> Result<Self, ConfigError> {
        Self::new(std::iter::repeat_n((lower, upper), dims))
    }

    /// Sets an explicit max velocity magnitude per dimension.
    ///
    /// Overrides the width-relative limit from the solver config.
    ///
    /// # Errors
    ///
    /// Returns an error if the length does not match the dimension count or
    /// any value is non-positive or too large for `[-max, max]` to have a
    /// finite width.
    pub fn with_max_velocity(mut self, max_velocity: Vec<f64>) -> Result<Self, ConfigError> {
        if max_velocity.len() != self.dims() {
            return Err(ConfigError::MaxVelocityLength {
                expected: self.dims(),
                actual: max_velocity.len(),
            });
        }
        if let Some(dim) = max_velocity
            .iter()
            .position(|v| !(2.0 * v).is_finite() || *v <= 0.0)
        {
            return Err(ConfigError::MaxVelocity { dim });
        }
        self.max_velocity = Some(max_velocity);
        Ok(self)
    }

    /// Returns the number of dimensions.
    #[must_use]
    pub fn dims(&self) -> usize {
        self.lower.len()
    }

    /// Returns the lower bound of every dimension.
    #[must_use]
    pub fn lower(&self) -> &[f64] {
        &self.lower
    }

    /// Returns the upper bound of every dimension.
    #[must_use]
    pub fn upper(&self) -> &[f64] {
        &self.upper
    }

    /// Returns `upper - lower` for `dim`.
    #[must_use]
    pub fn width(&self, dim: usize) -> f64 {
        self.upper[dim] - self.lower[dim]
    }

    /// Maps `unit` in `[0, 1)` linearly onto `[lower, upper)` of `dim`.
    #[must_use]
    pub fn interpolate(&self, dim: usize, unit: f64) -> f64 {
        (self.lower[dim] + unit * self.width(dim)).min(self.upper[dim])
    }

    /// Returns `true` if every coordinate of `x` lies within its bounds.
    #[must_use]
    pub fn contains(&self, x: &[f64]) -> bool {
        x.len() == self.dims()
            && x
                .iter()
                .zip(self.lower.iter().zip(&self.upper))
                .all(|(v, (lo, hi))| lo <= v && v <= hi)
    }

    /// Clamps `value` into the bounds of `dim`.
    ///
    /// Returns the clamped value and the side that was hit, if any.
    pub(super) fn clamp(&self, dim: usize, value: f64) -> (f64, Option<Side>) {
        if value < self.lower[dim] {
            (self.lower[dim], Some(Side::Lower))
        } else if value > self.upper[dim] {
            (self.upper[dim], Some(Side::Upper))
        } else {
            (value, None)
        }
    }

    /// Returns the max velocity magnitude per dimension.
    ///
    /// Uses the explicit limits if set, otherwise `fraction * width`.
    #[must_use]
    pub fn max_velocity(&self, fraction: f64) -> Vec<f64> {
        match &self.max_velocity {
            Some(limits) => limits.clone(),
            None => (0..self.dims()).map(|d| fraction * self.width(d)).collect(),
        }
    }

    /// Checks an explicit initial position for `particle`.
    pub(super) fn check_position(&self, particle: usize, x: &[f64]) -> Result<(), ConfigError> {
        if x.len() != self.dims() {
            return Err(ConfigError::PositionLength {
                particle,
                expected: self.dims(),
                actual: x.len(),
            });
        }
        for (dim, &value) in x.iter().enumerate() {
            if !(self.lower[dim]..=self.upper[dim]).contains(&value) {
                return Err(ConfigError::PositionOutOfBounds {
                    particle,
                    dim,
                    value,
                });
            }
        }
        Ok(())
    }
}

/// The bound a coordinate was clamped onto.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Side {
    Lower,
    Upper,
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn rejects_empty_and_inverted_bounds() {
        assert_eq!(
            Bounds::new(Vec::<(f64, f64)>::new()),
            Err(ConfigError::EmptyBounds)
        );
        assert_eq!(
            Bounds::new([(0.0, 1.0), (2.0, 2.0)]),
            Err(ConfigError::Bounds {
                dim: 1,
                lower: 2.0,
                upper: 2.0
            })
        );
        assert!(Bounds::new([(f64::NEG_INFINITY, 0.0)]).is_err());
        assert_eq!(
            Bounds::uniform(1, -1e308, 1e308),
            Err(ConfigError::Bounds {
                dim: 0,
                lower: -1e308,
                upper: 1e308
            })
        );
        assert!(Bounds::new([(-1e308, 0.0)]).is_ok());
        assert!(Bounds::uniform(0, -1.0, 1.0).is_err());
    }

    #[test]
    fn interpolates_unit_interval() {
        let bounds = Bounds::new([(-10.0, 10.0), (0.0, 4.0)]).unwrap();
        assert_relative_eq!(bounds.interpolate(0, 0.0), -10.0);
        assert_relative_eq!(bounds.interpolate(0, 0.5), 0.0);
        assert_relative_eq!(bounds.interpolate(1, 0.25), 1.0);
    }

    #[test]
    fn clamps_and_reports_side() {
        let bounds = Bounds::uniform(1, -1.0, 1.0).unwrap();
        assert_eq!(bounds.clamp(0, 2.0), (1.0, Some(Side::Upper)));
        assert_eq!(bounds.clamp(0, -3.0), (-1.0, Some(Side::Lower)));
        assert_eq!(bounds.clamp(0, 0.5), (0.5, None));
    }

    #[test]
    fn max_velocity_defaults_to_fraction_of_width() {
        let bounds = Bounds::new([(-10.0, 10.0), (0.0, 1.0)]).unwrap();
        assert_eq!(bounds.max_velocity(0.5), vec![10.0, 0.5]);

        let bounds = bounds.with_max_velocity(vec![1.0, 2.0]).unwrap();
        assert_eq!(bounds.max_velocity(0.5), vec![1.0, 2.0]);
    }

    #[test]
    fn rejects_bad_max_velocity() {
        let bounds = Bounds::uniform(2, 0.0, 1.0).unwrap();
        assert_eq!(
            bounds.clone().with_max_velocity(vec![1.0]),
            Err(ConfigError::MaxVelocityLength {
                expected: 2,
                actual: 1
            })
        );
        assert_eq!(
            bounds.clone().with_max_velocity(vec![1.0, 0.0]),
            Err(ConfigError::MaxVelocity { dim: 1 })
        );
        assert_eq!(
            bounds.with_max_velocity(vec![1e308, 1.0]),
            Err(ConfigError::MaxVelocity { dim: 0 })
        );
    }

    #[test]
    fn checks_initial_positions() {
        let bounds = Bounds::uniform(2, 0.0, 1.0).unwrap();
        assert_eq!(bounds.check_position(0, &[0.0, 1.0]), Ok(()));
        assert_eq!(
            bounds.check_position(3, &[0.5]),
            Err(ConfigError::PositionLength {
                particle: 3,
                expected: 2,
                actual: 1
            })
        );
        assert_eq!(
            bounds.check_position(1, &[0.5, 1.5]),
            Err(ConfigError::PositionOutOfBounds {
                particle: 1,
                dim: 1,
                value: 1.5
            })
        );
        assert!(bounds.contains(&[0.2, 0.8]));
        assert!(!bounds.contains(&[0.2, 1.8]));
    }
}
