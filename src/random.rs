//! Injectable randomness.
//!
//! The relaxation needs exactly three kinds of draws: a uniform interior
//! index, a standard-normal perturbation, and a uniform unit sample for
//! randomising the starting trajectory. [`RandomSource`] names those
//! operations so tests can inject scripted sequences, while
//! [`SeededSource`] is the reproducible production generator.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;

/// Source of the random draws used by the step function.
pub trait RandomSource {
    /// Uniform index in `[1, len - 2]`, i.e. a point with both neighbours.
    ///
    /// Callers guarantee `len >= 3`.
    fn interior_index(&mut self, len: usize) -> usize;

    /// Sample from the standard normal distribution N(0, 1).
    fn standard_normal(&mut self) -> f64;

    /// Uniform sample in `[0, 1)`.
    fn unit(&mut self) -> f64;
}

/// Creates a deterministic generator from a 64-bit seed.
pub fn create_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// [`RandomSource`] backed by any [`Rng`]; seeded [`StdRng`] by default.
///
/// # Examples
///
/// ```
/// use u_fermat::random::{RandomSource, SeededSource};
///
/// let mut a = SeededSource::new(7);
/// let mut b = SeededSource::new(7);
/// assert_eq!(a.standard_normal(), b.standard_normal());
/// let ix = a.interior_index(15);
/// assert!((1..=13).contains(&ix));
/// ```
#[derive(Debug, Clone)]
pub struct SeededSource<R = StdRng> {
    rng: R,
}

impl SeededSource<StdRng> {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: create_rng(seed),
        }
    }

    /// Seeds from OS entropy. Not reproducible.
    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }
}

impl<R: Rng> SeededSource<R> {
    /// Wraps an existing generator.
    pub fn from_rng(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> RandomSource for SeededSource<R> {
    fn interior_index(&mut self, len: usize) -> usize {
        self.rng.random_range(1..len - 1)
    }

    fn standard_normal(&mut self) -> f64 {
        self.rng.sample(StandardNormal)
    }

    fn unit(&mut self) -> f64 {
        self.rng.random::<f64>()
    }
}
