//! Core trait for refractive-index profiles.

/// Reports the refractive index of the medium at a horizontal position.
///
/// Implementations must return a positive, finite index for every `x`
/// inside the trajectory's domain. The relaxation never inspects the
/// profile's shape, only point evaluations.
///
/// # Examples
///
/// ```
/// use u_fermat::medium::RefractiveIndex;
///
/// struct Glass;
///
/// impl RefractiveIndex for Glass {
///     fn index_at(&self, _x: f64) -> f64 {
///         1.5
///     }
/// }
///
/// assert_eq!(Glass.index_at(3.0), 1.5);
/// // Closures are profiles too.
/// let ramp = |x: f64| 1.0 + 0.05 * x;
/// assert_eq!(ramp.index_at(10.0), 1.5);
/// ```
pub trait RefractiveIndex {
    /// Index of refraction at horizontal position `x`.
    fn index_at(&self, x: f64) -> f64;
}

impl<F> RefractiveIndex for F
where
    F: Fn(f64) -> f64,
{
    fn index_at(&self, x: f64) -> f64 {
        self(x)
    }
}
