//! Independent relaxations over a range of seeds.
//!
//! A single Monte-Carlo run is one sample of a noisy process. Running the
//! same setup under many seeds shows how much the Snell's-law agreement
//! depends on the particular random draw. Every member is an ordinary
//! single-threaded run; members only fan out across threads.

use rayon::prelude::*;
use tracing::debug;

use super::config::RelaxConfig;
use super::runner::{RelaxResult, RelaxRunner};
use crate::error::FermatResult;
use crate::medium::RefractiveIndex;
use crate::random::SeededSource;
use crate::snell::{measure, SnellMeasurement};
use crate::trajectory::Trajectory;

/// One relaxed member of an ensemble.
#[derive(Debug, Clone)]
pub struct EnsembleMember {
    pub seed: u64,
    pub trajectory: Trajectory,
    pub result: RelaxResult,
}

/// Aggregate Snell's-law agreement over an ensemble.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ErrorSummary {
    /// Members whose measurement succeeded.
    pub measured: usize,
    /// Members whose measurement was degenerate.
    pub failures: usize,
    pub mean_percent_error: f64,
    pub min_percent_error: f64,
    pub max_percent_error: f64,
}

/// Relaxes one copy of `template` per seed.
///
/// Each member gets a fresh generator seeded with its seed, which first
/// randomises the interior and then drives the relaxation, exactly like a
/// standalone run. Results come back in seed order regardless of
/// `parallel`.
///
/// # Errors
///
/// The first configuration error encountered.
pub fn run_ensemble<I>(
    template: &Trajectory,
    index: &I,
    config: &RelaxConfig,
    seeds: impl IntoIterator<Item = u64>,
    parallel: bool,
) -> FermatResult<Vec<EnsembleMember>>
where
    I: RefractiveIndex + Sync + ?Sized,
{
    config.validate()?;
    let seeds: Vec<u64> = seeds.into_iter().collect();

    let relax_one = |seed: u64| -> FermatResult<EnsembleMember> {
        let mut rng = SeededSource::new(seed);
        let mut trajectory = template.clone();
        trajectory.randomize_interior(&mut rng);
        let result = RelaxRunner::run_with_source(&mut trajectory, index, config, &mut rng)?;
        Ok(EnsembleMember {
            seed,
            trajectory,
            result,
        })
    };

    let members = if parallel {
        seeds.par_iter().map(|&s| relax_one(s)).collect::<FermatResult<Vec<_>>>()?
    } else {
        seeds.iter().map(|&s| relax_one(s)).collect::<FermatResult<Vec<_>>>()?
    };

    debug!(members = members.len(), parallel, "ensemble finished");
    Ok(members)
}

/// Measures every member against Snell's law and aggregates the errors.
///
/// Returns the per-member measurements (in member order) alongside the
/// summary. `None` when no member could be measured.
pub fn summarize_errors(
    members: &[EnsembleMember],
    boundary_x: f64,
    index_left: f64,
    index_right: f64,
) -> (Vec<FermatResult<SnellMeasurement>>, Option<ErrorSummary>) {
    let measurements: Vec<FermatResult<SnellMeasurement>> = members
        .iter()
        .map(|m| measure(&m.trajectory, boundary_x, index_left, index_right))
        .collect();

    let errors: Vec<f64> = measurements
        .iter()
        .filter_map(|m| m.as_ref().ok().map(|m| m.percent_error))
        .collect();

    if errors.is_empty() {
        return (measurements, None);
    }

    let summary = ErrorSummary {
        measured: errors.len(),
        failures: members.len() - errors.len(),
        mean_percent_error: errors.iter().sum::<f64>() / errors.len() as f64,
        min_percent_error: errors.iter().copied().fold(f64::INFINITY, f64::min),
        max_percent_error: errors.iter().copied().fold(f64::NEG_INFINITY, f64::max),
    };
    (measurements, Some(summary))
}
