//! Concrete refractive-index profiles.

use super::types::RefractiveIndex;
use crate::error::{FermatError, FermatResult};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

fn check_index(name: &str, n: f64) -> FermatResult<()> {
    if !(n.is_finite() && n > 0.0) {
        return Err(FermatError::config(format!(
            "{name} index must be positive and finite, got {n}"
        )));
    }
    Ok(())
}

/// Two-region medium: `left` for `x < boundary`, `right` otherwise.
///
/// A point exactly on the boundary belongs to the right region.
///
/// # Examples
///
/// ```
/// use u_fermat::medium::{RefractiveIndex, StepIndex};
///
/// let air_glass = StepIndex::centered(0.0, 10.0, 1.0, 1.5).unwrap();
/// assert_eq!(air_glass.boundary, 5.0);
/// assert_eq!(air_glass.index_at(4.999), 1.0);
/// assert_eq!(air_glass.index_at(5.0), 1.5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StepIndex {
    /// Interface position.
    pub boundary: f64,
    /// Index for `x < boundary`.
    pub left: f64,
    /// Index for `x >= boundary`.
    pub right: f64,
}

impl StepIndex {
    pub fn new(boundary: f64, left: f64, right: f64) -> FermatResult<Self> {
        if !boundary.is_finite() {
            return Err(FermatError::config(format!(
                "boundary must be finite, got {boundary}"
            )));
        }
        check_index("left", left)?;
        check_index("right", right)?;
        Ok(Self {
            boundary,
            left,
            right,
        })
    }

    /// Interface at the midpoint of `[x0, xf]`.
    pub fn centered(x0: f64, xf: f64, left: f64, right: f64) -> FermatResult<Self> {
        Self::new((x0 + xf) / 2.0, left, right)
    }
}

impl RefractiveIndex for StepIndex {
    fn index_at(&self, x: f64) -> f64 {
        if x < self.boundary {
            self.left
        } else {
            self.right
        }
    }
}

/// Homogeneous medium. Minimum-OPL paths are straight lines.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct UniformIndex(pub f64);

impl UniformIndex {
    pub fn new(n: f64) -> FermatResult<Self> {
        check_index("uniform", n)?;
        Ok(Self(n))
    }
}

impl RefractiveIndex for UniformIndex {
    fn index_at(&self, _x: f64) -> f64 {
        self.0
    }
}

/// Index varying linearly with x: `base + slope * (x - origin)`.
///
/// Construction only checks the coefficients; callers must make sure the
/// index stays positive across their domain (see [`LinearGradient::over`]).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LinearGradient {
    pub origin: f64,
    pub base: f64,
    pub slope: f64,
}

impl LinearGradient {
    /// Gradient starting at `base` at `x0`, checked positive over `[x0, xf]`.
    pub fn over(x0: f64, xf: f64, base: f64, slope: f64) -> FermatResult<Self> {
        if !slope.is_finite() {
            return Err(FermatError::config(format!(
                "gradient slope must be finite, got {slope}"
            )));
        }
        let gradient = Self {
            origin: x0,
            base,
            slope,
        };
        check_index("gradient start", gradient.index_at(x0))?;
        check_index("gradient end", gradient.index_at(xf))?;
        Ok(gradient)
    }
}

impl RefractiveIndex for LinearGradient {
    fn index_at(&self, x: f64) -> f64 {
        self.base + self.slope * (x - self.origin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_regions() {
        let step = StepIndex::new(5.0, 1.0, 1.5).unwrap();
        assert_eq!(step.index_at(0.0), 1.0);
        assert_eq!(step.index_at(4.9), 1.0);
        assert_eq!(step.index_at(5.0), 1.5);
        assert_eq!(step.index_at(10.0), 1.5);
    }

    #[test]
    fn test_step_centered() {
        let step = StepIndex::centered(2.0, 8.0, 1.0, 1.33).unwrap();
        assert!((step.boundary - 5.0).abs() < 1e-15);
    }

    #[test]
    fn test_step_rejects_non_positive() {
        assert!(StepIndex::new(5.0, 0.0, 1.5).is_err());
        assert!(StepIndex::new(5.0, 1.0, -1.5).is_err());
        assert!(StepIndex::new(f64::NAN, 1.0, 1.5).is_err());
    }

    #[test]
    fn test_uniform() {
        let u = UniformIndex::new(1.2).unwrap();
        assert_eq!(u.index_at(-100.0), 1.2);
        assert_eq!(u.index_at(100.0), 1.2);
        assert!(UniformIndex::new(f64::INFINITY).is_err());
    }

    #[test]
    fn test_gradient() {
        let g = LinearGradient::over(0.0, 10.0, 1.0, 0.05).unwrap();
        assert!((g.index_at(0.0) - 1.0).abs() < 1e-15);
        assert!((g.index_at(10.0) - 1.5).abs() < 1e-12);
    }

    #[test]
    fn test_gradient_must_stay_positive() {
        assert!(LinearGradient::over(0.0, 10.0, 1.0, -0.2).is_err());
    }

    #[test]
    fn test_closure_profile() {
        let f = |x: f64| if x < 1.0 { 2.0 } else { 3.0 };
        assert_eq!(f.index_at(0.5), 2.0);
        assert_eq!(f.index_at(1.5), 3.0);
    }
}
