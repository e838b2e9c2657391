//! Monte-Carlo search for the path of minimum optical length.
//!
//! By Fermat's principle light follows the path that minimises the optical
//! path length `OPL = integral of n(s) ds`. This crate discretises a ray
//! between two fixed endpoints into `N` points on an even x grid and relaxes
//! the interior heights by random local moves that shorten the optical path:
//!
//! - **Trajectory**: fixed x grid and endpoints, mutable interior heights,
//!   roughness (total variation) progress metric.
//! - **Medium**: refractive index as an opaque capability
//!   ([`medium::RefractiveIndex`]), with step, uniform, and gradient
//!   profiles; any `Fn(f64) -> f64` also qualifies.
//! - **Relaxation**: the accept-if-shorter step function and the adaptive
//!   driver with its stagnation/iteration-cap stopping rule.
//! - **Snell check**: measures incidence and refraction at an interface and
//!   compares with Snell's law.
//! - **Randomness**: an injectable [`random::RandomSource`] so runs are
//!   reproducible from a seed and tests can script the draws.
//!
//! # Examples
//!
//! ```
//! use u_fermat::medium::StepIndex;
//! use u_fermat::random::SeededSource;
//! use u_fermat::relax::{RelaxConfig, RelaxRunner};
//! use u_fermat::snell::measure;
//! use u_fermat::trajectory::Trajectory;
//!
//! let mut path = Trajectory::new(15, 0.0, 10.0, 0.0, 10.0)?;
//! let medium = StepIndex::centered(0.0, 10.0, 1.0, 1.5)?;
//! let mut rng = SeededSource::new(0);
//! path.randomize_interior(&mut rng);
//!
//! let config = RelaxConfig::default().with_max_iterations(20_000);
//! RelaxRunner::run_with_source(&mut path, &medium, &config, &mut rng)?;
//!
//! let snell = measure(&path, medium.boundary, medium.left, medium.right)?;
//! assert!(snell.refraction < snell.incidence);
//! # Ok::<(), u_fermat::FermatError>(())
//! ```

pub mod error;
pub mod medium;
pub mod random;
pub mod relax;
pub mod snell;
pub mod trajectory;

pub use error::{FermatError, FermatResult};
