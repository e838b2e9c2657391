//! Snell's-law check of a relaxed trajectory.
//!
//! The relaxed path is approximated by two straight legs meeting at the
//! last grid point at or before the interface. The incidence angle of the
//! first leg predicts, via `n_left * sin(theta_i) = n_right * sin(theta_r)`,
//! the refraction angle the second leg should have. The relative gap
//! between prediction and measurement validates the Monte-Carlo result.
//!
//! Angles are measured from the interface normal (the x axis).

use crate::error::{FermatError, FermatResult};
use crate::trajectory::Trajectory;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Measured and predicted angles, in radians.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SnellMeasurement {
    /// Grid point used as the interface crossing.
    pub crossing: usize,
    pub incidence: f64,
    pub refraction: f64,
    /// Refraction angle predicted from `incidence` by Snell's law.
    pub theoretical_refraction: f64,
    /// `|100 * (theoretical - measured) / theoretical|`.
    pub percent_error: f64,
}

impl SnellMeasurement {
    pub fn incidence_degrees(&self) -> f64 {
        self.incidence.to_degrees()
    }

    pub fn refraction_degrees(&self) -> f64 {
        self.refraction.to_degrees()
    }

    pub fn theoretical_refraction_degrees(&self) -> f64 {
        self.theoretical_refraction.to_degrees()
    }
}

/// Compares the trajectory's refraction at `boundary_x` with Snell's law.
///
/// The crossing is the largest `ix` with `x_ix <= boundary_x`. The
/// incidence leg runs from the start point to `(boundary_x, y_ix)`, the
/// refraction leg from there to the end point:
///
/// ```text
/// incidence  = atan((y_ix - y_start) / (boundary_x - x_start))
/// refraction = atan((y_end - y_ix) / (x_end - boundary_x))
/// ```
///
/// With the start at the origin the incidence reduces to
/// `atan(y_ix / boundary_x)`.
///
/// # Errors
///
/// [`FermatError::NumericDegenerate`] when the boundary lies outside the
/// trajectory or on an endpoint, an index is not positive, the predicted
/// angle does not exist (total internal reflection), or the predicted angle
/// is zero so the relative error is undefined.
///
/// # Examples
///
/// ```
/// use u_fermat::snell::measure;
/// use u_fermat::trajectory::Trajectory;
///
/// // Straight diagonal through a uniform medium: no refraction at all.
/// let path = Trajectory::from_ys(0.0, 4.0, vec![0.0, 1.0, 2.0, 3.0, 4.0]).unwrap();
/// let m = measure(&path, 2.0, 1.0, 1.0).unwrap();
/// assert!((m.incidence_degrees() - 45.0).abs() < 1e-9);
/// assert!(m.percent_error < 1e-9);
/// ```
pub fn measure(
    trajectory: &Trajectory,
    boundary_x: f64,
    index_left: f64,
    index_right: f64,
) -> FermatResult<SnellMeasurement> {
    let (x_start, y_start) = trajectory.start();
    let (x_end, y_end) = trajectory.end();

    if !(index_left > 0.0 && index_right > 0.0) {
        return Err(FermatError::degenerate(format!(
            "indices must be positive, got {index_left} and {index_right}"
        )));
    }
    if !(x_start..=x_end).contains(&boundary_x) {
        return Err(FermatError::degenerate(format!(
            "boundary {boundary_x} lies outside [{x_start}, {x_end}]"
        )));
    }
    if boundary_x == x_start {
        return Err(FermatError::degenerate(
            "boundary coincides with the start point; incidence leg has zero width",
        ));
    }
    if boundary_x == x_end {
        return Err(FermatError::degenerate(
            "boundary coincides with the end point; refraction leg has zero width",
        ));
    }

    let crossing = trajectory.last_at_or_before(boundary_x).ok_or_else(|| {
        FermatError::degenerate(format!("no grid point at or before {boundary_x}"))
    })?;
    let y_cross = trajectory.y()[crossing];

    let incidence = ((y_cross - y_start) / (boundary_x - x_start)).atan();
    let refraction = ((y_end - y_cross) / (x_end - boundary_x)).atan();

    let sine = index_left * incidence.sin() / index_right;
    if sine.abs() > 1.0 {
        return Err(FermatError::degenerate(format!(
            "total internal reflection: sin(theta_r) would be {sine:.6}"
        )));
    }
    let theoretical_refraction = sine.asin();
    if theoretical_refraction == 0.0 {
        return Err(FermatError::degenerate(
            "predicted refraction angle is zero; relative error undefined",
        ));
    }

    let percent_error =
        (100.0 * (theoretical_refraction - refraction) / theoretical_refraction).abs();

    Ok(SnellMeasurement {
        crossing,
        incidence,
        refraction,
        theoretical_refraction,
        percent_error,
    })
}
