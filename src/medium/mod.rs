//! Refractive-index profiles.
//!
//! The relaxation treats the medium as an opaque capability: anything that
//! can report an index at a horizontal position. Concrete profiles cover
//! the air/glass interface used for validation, a homogeneous medium, and
//! a linear gradient. Plain closures `Fn(f64) -> f64` work as well.
//!
//! # References
//!
//! - Hasbun, J. E., "Monte Carlo determination of the minimum optical path",
//!   *American Journal of Physics*.

mod profiles;
mod types;

pub use profiles::{LinearGradient, StepIndex, UniformIndex};
pub use types::RefractiveIndex;
