//! Halton low-discrepancy sequence.
//!
//! Dimension `d` of the sequence is the radical inverse of the sample index in
//! the `d`-th prime base (2, 3, 5, 7, …). Consecutive indices fill the unit
//! hypercube far more evenly than independent uniform draws, which gives the
//! swarm a well-spread starting population.

use super::Bounds;

/// A Halton sequence generator with one prime base per dimension.
///
/// Sampling is a pure function of `(index, dim)`; the generator holds no
/// state beyond the list of bases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Halton {
    bases: Vec<u64>,
}

impl Halton {
    /// Creates a generator for `dims` dimensions using the first `dims` primes.
    #[must_use]
    pub fn new(dims: usize) -> Self {
        Self {
            bases: primes(dims),
        }
    }

    /// Returns the number of dimensions with a reserved base.
    #[must_use]
    pub fn dims(&self) -> usize {
        self.bases.len()
    }

    /// Returns the prime base used for `dim`.
    ///
    /// Dimensions past [`dims`](Self::dims) continue the prime sequence, but
    /// the extension is recomputed on every call. Size the generator with
    /// [`Halton::new`] to cover every dimension sampled repeatedly.
    #[must_use]
    pub fn base(&self, dim: usize) -> u64 {
        match self.bases.get(dim) {
            Some(&base) => base,
            None => nth_prime(dim),
        }
    }

    /// Returns coordinate `dim` of sample `index`, a value in `[0, 1)`.
    #[must_use]
    pub fn sample(&self, index: u64, dim: usize) -> f64 {
        radical_inverse(index, self.base(dim))
    }

    /// Returns sample `index` mapped into `bounds`.
    ///
    /// Bounds with more dimensions than the generator extend the prime
    /// sequence once per call, not once per dimension.
    #[must_use]
    pub fn point(&self, index: u64, bounds: &Bounds) -> Vec<f64> {
        let extended;
        let bases = if bounds.dims() > self.dims() {
            extended = primes(bounds.dims());
            &extended
        } else {
            &self.bases
        };
        bases
            .iter()
            .take(bounds.dims())
            .enumerate()
            .map(|(dim, &base)| bounds.interpolate(dim, radical_inverse(index, base)))
            .collect()
    }
}

/// Reflects the base-`base` digits of `index` about the radix point.
///
/// For base 2, indices 1, 2, 3, 4 give 0.5, 0.25, 0.75, 0.125.
#[must_use]
pub fn radical_inverse(mut index: u64, base: u64) -> f64 {
    debug_assert!(base >= 2, "radical inverse needs a base of at least 2");

    #[allow(clippy::cast_precision_loss)]
    let inv_base = 1.0 / base as f64;
    let mut scale = inv_base;
    let mut result = 0.0;
    while index > 0 {
        #[allow(clippy::cast_precision_loss)]
        let digit = (index % base) as f64;
        result += digit * scale;
        index /= base;
        scale *= inv_base;
    }
    result
}

/// Returns the first `count` primes in ascending order.
fn primes(count: usize) -> Vec<u64> {
    let mut found = Vec::with_capacity(count);
    let mut candidate = 2;
    while found.len() < count {
        if is_prime_given(candidate, &found) {
            found.push(candidate);
        }
        candidate += 1;
    }
    found
}

/// Returns the zero-based `n`-th prime.
fn nth_prime(n: usize) -> u64 {
    let all = primes(n + 1);
    all[n]
}

/// Trial division by the smaller primes already found.
fn is_prime_given(candidate: u64, smaller: &[u64]) -> bool {
    smaller
        .iter()
        .take_while(|&&p| p * p <= candidate)
        .all(|&p| candidate % p != 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn base_two_prefix() {
        let halton = Halton::new(1);
        let expected = [0.5, 0.25, 0.75, 0.125];
        for (index, want) in (1..=4).zip(expected) {
            assert_relative_eq!(halton.sample(index, 0), want);
        }
    }

    #[test]
    fn base_three_prefix() {
        let halton = Halton::new(2);
        let expected = [1.0 / 3.0, 2.0 / 3.0, 1.0 / 9.0, 4.0 / 9.0];
        for (index, want) in (1..=4).zip(expected) {
            assert_relative_eq!(halton.sample(index, 1), want, epsilon = 1e-15);
        }
    }

    #[test]
    fn index_zero_is_origin() {
        assert_relative_eq!(radical_inverse(0, 7), 0.0);
    }

    #[test]
    fn samples_are_deterministic() {
        let a = Halton::new(5);
        let b = Halton::new(5);
        for index in 0..50 {
            for dim in 0..5 {
                assert_eq!(a.sample(index, dim).to_bits(), b.sample(index, dim).to_bits());
            }
        }
    }

    #[test]
    fn bases_are_distinct_ascending_primes() {
        let halton = Halton::new(30);
        assert_eq!(&halton.bases[..8], &[2, 3, 5, 7, 11, 13, 17, 19]);
        assert!(halton.bases.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(halton.base(29), 113);
    }

    #[test]
    fn continues_primes_past_reserved_dimensions() {
        let halton = Halton::new(2);
        assert_eq!(halton.base(2), 5);
        assert_eq!(halton.base(9), 29);
        assert_relative_eq!(halton.sample(1, 9), 1.0 / 29.0);
    }

    #[test]
    fn undersized_generator_matches_a_sized_one() {
        let bounds = Bounds::uniform(4, -1.0, 1.0).unwrap();
        let small = Halton::new(1);
        let sized = Halton::new(4);
        for index in 1..20 {
            assert_eq!(small.point(index, &bounds), sized.point(index, &bounds));
        }
        assert_eq!(small.base(3), sized.base(3));
    }

    #[test]
    fn points_fill_bounds() {
        let halton = Halton::new(2);
        let bounds = Bounds::new([(-10.0, 10.0), (0.0, 3.0)]).unwrap();
        let first = halton.point(1, &bounds);
        assert_relative_eq!(first[0], 0.0);
        assert_relative_eq!(first[1], 1.0, epsilon = 1e-12);
        for index in 1..200 {
            assert!(bounds.contains(&halton.point(index, &bounds)));
        }
    }
}
