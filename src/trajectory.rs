//! Discretised ray trajectory.
//!
//! A trajectory is `N` points `(x_i, y_i)` on an equally spaced horizontal
//! grid. The x grid and both endpoint heights are fixed at construction;
//! only interior heights change, and only through the step function.

use crate::error::{FermatError, FermatResult};
use crate::medium::RefractiveIndex;
use crate::random::RandomSource;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Ray path with fixed x grid and fixed endpoints.
///
/// # Examples
///
/// ```
/// use u_fermat::trajectory::Trajectory;
///
/// let t = Trajectory::new(15, 0.0, 10.0, 0.0, 10.0).unwrap();
/// assert_eq!(t.len(), 15);
/// assert_eq!(t.start(), (0.0, 0.0));
/// assert_eq!(t.end(), (10.0, 10.0));
/// assert!((t.dx() - 10.0 / 14.0).abs() < 1e-15);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(try_from = "TrajectoryData", into = "TrajectoryData")
)]
pub struct Trajectory {
    x: Vec<f64>,
    y: Vec<f64>,
    dx: f64,
}

/// Serialized form: the domain bounds and the heights. The grid is rebuilt
/// and validated on load.
#[cfg(feature = "serde")]
#[derive(Serialize, Deserialize)]
struct TrajectoryData {
    x0: f64,
    xf: f64,
    y: Vec<f64>,
}

#[cfg(feature = "serde")]
impl TryFrom<TrajectoryData> for Trajectory {
    type Error = FermatError;

    fn try_from(data: TrajectoryData) -> FermatResult<Self> {
        Self::from_ys(data.x0, data.xf, data.y)
    }
}

#[cfg(feature = "serde")]
impl From<Trajectory> for TrajectoryData {
    fn from(t: Trajectory) -> Self {
        let (x0, _) = t.start();
        let (xf, _) = t.end();
        Self { x0, xf, y: t.y }
    }
}

impl Trajectory {
    /// Creates `n` points from `(x0, y0)` to `(xf, yf)`.
    ///
    /// Interior heights start at `y0`; call [`randomize_interior`] for the
    /// random starting shape.
    ///
    /// [`randomize_interior`]: Trajectory::randomize_interior
    pub fn new(n: usize, x0: f64, xf: f64, y0: f64, yf: f64) -> FermatResult<Self> {
        let mut y = vec![y0; n];
        if let Some(last) = y.last_mut() {
            *last = yf;
        }
        Self::from_ys(x0, xf, y)
    }

    /// Builds a trajectory over `[x0, xf]` from explicit heights.
    ///
    /// The first and last entries of `ys` become the fixed endpoints.
    pub fn from_ys(x0: f64, xf: f64, ys: Vec<f64>) -> FermatResult<Self> {
        let n = ys.len();
        if n < 3 {
            return Err(FermatError::config(format!(
                "trajectory needs at least 3 points, got {n}"
            )));
        }
        if !(x0.is_finite() && xf.is_finite()) {
            return Err(FermatError::config(format!(
                "domain bounds must be finite, got [{x0}, {xf}]"
            )));
        }
        if x0 >= xf {
            return Err(FermatError::config(format!(
                "x0 must be less than xf, got x0={x0}, xf={xf}"
            )));
        }
        if let Some(bad) = ys.iter().find(|v| !v.is_finite()) {
            return Err(FermatError::config(format!(
                "heights must be finite, got {bad}"
            )));
        }

        let dx = (xf - x0) / (n - 1) as f64;
        let mut x: Vec<f64> = (0..n).map(|i| x0 + i as f64 * dx).collect();
        x[n - 1] = xf;

        Ok(Self { x, y: ys, dx })
    }

    /// Replaces interior heights with `y0 + (yf - y0) * u`, `u ~ U[0, 1)`.
    pub fn randomize_interior<R: RandomSource + ?Sized>(&mut self, rng: &mut R) {
        let (_, y0) = self.start();
        let (_, yf) = self.end();
        let n = self.len();
        for y in &mut self.y[1..n - 1] {
            *y = y0 + (yf - y0) * rng.unit();
        }
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    /// Always false: a trajectory has at least three points.
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    pub fn x(&self) -> &[f64] {
        &self.x
    }

    pub fn y(&self) -> &[f64] {
        &self.y
    }

    /// Fixed horizontal spacing.
    pub fn dx(&self) -> f64 {
        self.dx
    }

    pub fn start(&self) -> (f64, f64) {
        (self.x[0], self.y[0])
    }

    pub fn end(&self) -> (f64, f64) {
        let last = self.len() - 1;
        (self.x[last], self.y[last])
    }

    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.x.iter().copied().zip(self.y.iter().copied())
    }

    /// Overwrites an interior height. Callers pass `1..=len-2` only.
    pub(crate) fn set_interior(&mut self, ix: usize, value: f64) {
        debug_assert!(ix >= 1 && ix + 1 < self.len(), "index {ix} is not interior");
        self.y[ix] = value;
    }

    /// Total variation `sum |y_{i+1} - y_i|`, the progress metric.
    ///
    /// Zero only when every height is equal.
    pub fn roughness(&self) -> f64 {
        self.y.windows(2).map(|w| (w[1] - w[0]).abs()).sum()
    }

    /// Optical path of the two segments meeting at `ix`, with `y_ix`
    /// replaced by `y_mid`.
    ///
    /// Each segment is weighted by the index at its left end:
    /// `[ix-1, ix]` uses `n(x_{ix-1})` and `[ix, ix+1]` uses `n(x_ix)`.
    ///
    /// # Panics
    ///
    /// If `ix` is not an interior index.
    pub fn local_opl<I: RefractiveIndex + ?Sized>(
        &self,
        ix: usize,
        y_mid: f64,
        index: &I,
    ) -> f64 {
        let (ya, yb) = (self.y[ix - 1], self.y[ix + 1]);
        segment(self.dx, ya - y_mid) * index.index_at(self.x[ix - 1])
            + segment(self.dx, y_mid - yb) * index.index_at(self.x[ix])
    }

    /// Total optical path length under the same left-endpoint rule.
    pub fn optical_path_length<I: RefractiveIndex + ?Sized>(&self, index: &I) -> f64 {
        self.y
            .windows(2)
            .zip(&self.x)
            .map(|(w, &x)| segment(self.dx, w[1] - w[0]) * index.index_at(x))
            .sum()
    }

    /// Largest `ix` with `x_ix <= x`, or `None` when `x` precedes the grid.
    pub fn last_at_or_before(&self, x: f64) -> Option<usize> {
        self.x.iter().rposition(|&xi| xi <= x)
    }
}

#[inline]
fn segment(dx: f64, dy: f64) -> f64 {
    (dy * dy + dx * dx).sqrt()
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn test_json_round_trip_keeps_grid() {
        let t = Trajectory::from_ys(0.0, 10.0, vec![0.0, 3.0, 7.0, 10.0]).unwrap();
        let json = serde_json::to_string(&t).unwrap();
        let back: Trajectory = serde_json::from_str(&json).unwrap();
        assert_eq!(back, t);
    }

    #[test]
    fn test_two_point_payload_rejected() {
        let err = serde_json::from_str::<Trajectory>(r#"{"x0":0.0,"xf":1.0,"y":[0.0,1.0]}"#)
            .unwrap_err();
        assert!(err.to_string().contains("at least 3 points"), "{err}");
    }

    #[test]
    fn test_reversed_domain_payload_rejected() {
        let json = r#"{"x0":5.0,"xf":1.0,"y":[0.0,1.0,2.0]}"#;
        assert!(serde_json::from_str::<Trajectory>(json).is_err());
    }

    #[test]
    fn test_raw_grid_payload_rejected() {
        // Fields of the in-memory layout are not accepted.
        let json = r#"{"x":[0.0,1.0],"y":[0.0,1.0],"dx":1.0}"#;
        assert!(serde_json::from_str::<Trajectory>(json).is_err());
    }
}
