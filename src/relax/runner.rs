//! Relaxation loop.
//!
//! # Algorithm
//!
//! 1. Take one priming step with the initial delta; its roughness seeds
//!    the progress baseline.
//! 2. While the stagnation count is below `stagnation_fraction *
//!    max_iterations` and fewer than `max_iterations` iterations ran:
//!    a. Step with the current delta
//!    b. On acceptance, set `delta = shrink_factor * roughness / N` and
//!       count the move as stagnant if roughness fell by less than
//!       `stagnation_threshold`
//! 3. Return run statistics; the trajectory is relaxed in place.
//!
//! The stagnation count is cumulative. It is never reset by a large
//! improvement, so a run that keeps improving through many tiny steps can
//! stop before it has truly converged. A roughness *increase* on an
//! accepted move also counts as stagnant.

use tracing::debug;

use super::config::RelaxConfig;
use super::step::step;
use crate::error::FermatResult;
use crate::medium::RefractiveIndex;
use crate::random::{RandomSource, SeededSource};
use crate::trajectory::Trajectory;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Why the loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum StopReason {
    /// The stagnation count reached its limit.
    Stagnated,
    /// The iteration cap was reached first.
    IterationCap,
}

/// Statistics of a relaxation run.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RelaxResult {
    /// Loop iterations executed, excluding the priming step.
    pub iterations: usize,

    /// Accepted proposals, including the priming step.
    pub accepted_moves: usize,

    /// Final value of the cumulative stagnation count.
    pub stagnant_moves: usize,

    /// Perturbation scale when the loop stopped.
    pub final_delta: f64,

    /// Roughness of the relaxed trajectory.
    pub final_roughness: f64,

    pub stop_reason: StopReason,

    /// Roughness sampled every `history_interval` iterations.
    pub roughness_history: Vec<f64>,
}

/// Executes the Monte-Carlo relaxation.
pub struct RelaxRunner;

impl RelaxRunner {
    /// Relaxes `trajectory` in place with a generator seeded from
    /// `config.seed`.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_fermat::medium::UniformIndex;
    /// use u_fermat::relax::{RelaxConfig, RelaxRunner};
    /// use u_fermat::trajectory::Trajectory;
    ///
    /// let mut path = Trajectory::from_ys(0.0, 4.0, vec![0.0, 3.0, -1.0, 2.0, 4.0]).unwrap();
    /// let config = RelaxConfig::default().with_max_iterations(5000).with_seed(1);
    /// let result = RelaxRunner::run(&mut path, &UniformIndex(1.0), &config).unwrap();
    /// assert!(result.iterations <= 5000);
    /// assert_eq!(path.end(), (4.0, 4.0));
    /// ```
    pub fn run<I: RefractiveIndex + ?Sized>(
        trajectory: &mut Trajectory,
        index: &I,
        config: &RelaxConfig,
    ) -> FermatResult<RelaxResult> {
        let mut rng = match config.seed {
            Some(seed) => SeededSource::new(seed),
            None => SeededSource::from_entropy(),
        };
        Self::run_with_source(trajectory, index, config, &mut rng)
    }

    /// Relaxes `trajectory` in place, drawing from an injected source.
    ///
    /// `config.seed` is ignored; the caller owns the generator, so the
    /// same source can randomise the starting shape and drive the run.
    pub fn run_with_source<I, R>(
        trajectory: &mut Trajectory,
        index: &I,
        config: &RelaxConfig,
        rng: &mut R,
    ) -> FermatResult<RelaxResult>
    where
        I: RefractiveIndex + ?Sized,
        R: RandomSource + ?Sized,
    {
        config.validate()?;

        let n = trajectory.len() as f64;
        let stagnation_limit = config.stagnation_limit();

        let mut delta = config.initial_delta;
        let primed = step(trajectory, index, delta, rng)?;
        let mut size = primed.roughness;
        let mut accepted_moves = usize::from(primed.accepted);

        let mut count = 0usize;
        let mut dcount = 0usize;
        let mut roughness_history = vec![size];

        debug!(
            points = trajectory.len(),
            initial_roughness = size,
            max_iterations = config.max_iterations,
            stagnation_limit,
            "relaxation started"
        );

        while (dcount as f64) < stagnation_limit && count < config.max_iterations {
            let outcome = step(trajectory, index, delta, rng)?;
            if outcome.accepted {
                accepted_moves += 1;
                delta = config.shrink_factor * outcome.roughness / n;
                let oldsize = size;
                size = outcome.roughness;
                if oldsize - size < config.stagnation_threshold {
                    dcount += 1;
                }
            }
            count += 1;

            if config.history_interval > 0 && count.is_multiple_of(config.history_interval) {
                roughness_history.push(size);
            }
        }

        let stop_reason = if count >= config.max_iterations {
            StopReason::IterationCap
        } else {
            StopReason::Stagnated
        };

        debug!(
            iterations = count,
            accepted_moves,
            stagnant_moves = dcount,
            final_delta = delta,
            final_roughness = size,
            ?stop_reason,
            "relaxation finished"
        );

        Ok(RelaxResult {
            iterations: count,
            accepted_moves,
            stagnant_moves: dcount,
            final_delta: delta,
            final_roughness: trajectory.roughness(),
            stop_reason,
            roughness_history,
        })
    }
}
