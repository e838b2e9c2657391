//! Relaxation configuration.

use crate::error::{FermatError, FermatResult};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Configuration for the Monte-Carlo relaxation.
///
/// Defaults reproduce the air/glass validation run: unit starting delta,
/// 100 000 iterations, and a stagnation budget of 20 % of that.
///
/// # Examples
///
/// ```
/// use u_fermat::relax::RelaxConfig;
///
/// let config = RelaxConfig::default()
///     .with_initial_delta(0.5)
///     .with_max_iterations(20_000)
///     .with_seed(0);
/// assert!(config.validate().is_ok());
/// assert_eq!(config.stagnation_limit(), 4000.0);
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RelaxConfig {
    /// Perturbation scale used until the first accepted move.
    pub initial_delta: f64,

    /// Hard iteration cap (not counting the priming step).
    pub max_iterations: usize,

    /// Stop once the stagnation count reaches this fraction of
    /// `max_iterations`.
    pub stagnation_fraction: f64,

    /// An accepted move whose roughness drop is below this counts as
    /// stagnant.
    pub stagnation_threshold: f64,

    /// After an accepted move, `delta = shrink_factor * roughness / N`.
    pub shrink_factor: f64,

    /// Sample the roughness every this many iterations. 0 disables history.
    pub history_interval: usize,

    /// Random seed for reproducibility. `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for RelaxConfig {
    fn default() -> Self {
        Self {
            initial_delta: 1.0,
            max_iterations: 100_000,
            stagnation_fraction: 0.2,
            stagnation_threshold: 1e-5,
            shrink_factor: 0.4,
            history_interval: 1000,
            seed: None,
        }
    }
}

impl RelaxConfig {
    pub fn with_initial_delta(mut self, delta: f64) -> Self {
        self.initial_delta = delta;
        self
    }

    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    pub fn with_stagnation_fraction(mut self, fraction: f64) -> Self {
        self.stagnation_fraction = fraction;
        self
    }

    pub fn with_stagnation_threshold(mut self, threshold: f64) -> Self {
        self.stagnation_threshold = threshold;
        self
    }

    pub fn with_shrink_factor(mut self, factor: f64) -> Self {
        self.shrink_factor = factor;
        self
    }

    pub fn with_history_interval(mut self, n: usize) -> Self {
        self.history_interval = n;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Stagnation count at which the run stops.
    pub fn stagnation_limit(&self) -> f64 {
        self.stagnation_fraction * self.max_iterations as f64
    }

    /// Validates the configuration.
    pub fn validate(&self) -> FermatResult<()> {
        if !(self.initial_delta.is_finite() && self.initial_delta > 0.0) {
            return Err(FermatError::config(format!(
                "initial_delta must be positive, got {}",
                self.initial_delta
            )));
        }
        if self.max_iterations == 0 {
            return Err(FermatError::config("max_iterations must be positive"));
        }
        if !(self.stagnation_fraction.is_finite() && self.stagnation_fraction > 0.0) {
            return Err(FermatError::config(format!(
                "stagnation_fraction must be positive, got {}",
                self.stagnation_fraction
            )));
        }
        if !self.stagnation_threshold.is_finite() {
            return Err(FermatError::config(format!(
                "stagnation_threshold must be finite, got {}",
                self.stagnation_threshold
            )));
        }
        if !(self.shrink_factor.is_finite() && self.shrink_factor > 0.0) {
            return Err(FermatError::config(format!(
                "shrink_factor must be positive, got {}",
                self.shrink_factor
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RelaxConfig::default();
        assert!((config.initial_delta - 1.0).abs() < 1e-15);
        assert_eq!(config.max_iterations, 100_000);
        assert!((config.stagnation_fraction - 0.2).abs() < 1e-15);
        assert!((config.stagnation_threshold - 1e-5).abs() < 1e-20);
        assert!((config.shrink_factor - 0.4).abs() < 1e-15);
        assert!(config.seed.is_none());
    }

    #[test]
    fn test_validate_ok() {
        assert!(RelaxConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validate_bad_delta() {
        for delta in [0.0, -1.0, f64::NAN] {
            let err = RelaxConfig::default()
                .with_initial_delta(delta)
                .validate()
                .unwrap_err();
            assert!(err.to_string().contains("initial_delta"));
        }
    }

    #[test]
    fn test_validate_zero_iterations() {
        let config = RelaxConfig::default().with_max_iterations(0);
        assert!(matches!(
            config.validate(),
            Err(FermatError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_validate_bad_fraction() {
        let config = RelaxConfig::default().with_stagnation_fraction(0.0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_bad_shrink() {
        let config = RelaxConfig::default().with_shrink_factor(-0.4);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_stagnation_limit() {
        let config = RelaxConfig::default().with_max_iterations(1000);
        assert!((config.stagnation_limit() - 200.0).abs() < 1e-12);
    }
}
