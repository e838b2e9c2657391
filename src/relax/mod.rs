//! Monte-Carlo relaxation toward the minimum optical path.
//!
//! Repeatedly perturbs one interior height by a normal sample and keeps the
//! move only if it shortens the local optical path. The perturbation scale
//! shrinks with the trajectory's roughness, and the run stops once enough
//! small-improvement moves have accumulated or the iteration cap is hit.
//!
//! Only strictly improving moves are accepted. There is no temperature,
//! so this is random-coordinate descent rather than simulated annealing:
//! on a non-convex index profile it can settle in a local optimum of the
//! discretised path length.
//!
//! # References
//!
//! - Hasbun, J. E., "Monte Carlo determination of the minimum optical path",
//!   *American Journal of Physics*.

mod config;
pub mod ensemble;
mod runner;
mod step;

pub use config::RelaxConfig;
pub use runner::{RelaxResult, RelaxRunner, StopReason};
pub use step::{step, StepOutcome};
