//! Single Monte-Carlo step.

use crate::error::{FermatError, FermatResult};
use crate::medium::RefractiveIndex;
use crate::random::RandomSource;
use crate::trajectory::Trajectory;

/// What one step did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepOutcome {
    /// Whether the proposal was committed.
    pub accepted: bool,
    /// Roughness of the trajectory after the step.
    pub roughness: f64,
    /// Interior index that was perturbed.
    pub position: usize,
    /// Local optical path at `position` before the step.
    pub before: f64,
    /// Local optical path at `position` after the step. Equals `before`
    /// when the proposal was rejected.
    pub after: f64,
}

/// Perturbs one interior height and keeps it only if the local optical
/// path strictly decreases.
///
/// The proposal is `y_ix + delta * z` with `z ~ N(0, 1)` and `ix` uniform
/// over the interior. Only `y_ix` can change.
///
/// # Errors
///
/// [`FermatError::InvalidConfiguration`] if `delta` is not positive.
///
/// # Examples
///
/// ```
/// use u_fermat::medium::StepIndex;
/// use u_fermat::random::SeededSource;
/// use u_fermat::relax::step;
/// use u_fermat::trajectory::Trajectory;
///
/// let mut path = Trajectory::new(15, 0.0, 10.0, 0.0, 10.0).unwrap();
/// let mut rng = SeededSource::new(0);
/// path.randomize_interior(&mut rng);
///
/// let medium = StepIndex::centered(0.0, 10.0, 1.0, 1.5).unwrap();
/// let outcome = step(&mut path, &medium, 1.0, &mut rng).unwrap();
/// assert!(outcome.after <= outcome.before);
/// ```
pub fn step<I, R>(
    trajectory: &mut Trajectory,
    index: &I,
    delta: f64,
    rng: &mut R,
) -> FermatResult<StepOutcome>
where
    I: RefractiveIndex + ?Sized,
    R: RandomSource + ?Sized,
{
    if !(delta.is_finite() && delta > 0.0) {
        return Err(FermatError::config(format!(
            "delta must be positive, got {delta}"
        )));
    }

    let ix = rng.interior_index(trajectory.len());
    let current = trajectory.y()[ix];
    let before = trajectory.local_opl(ix, current, index);

    let proposed = current + rng.standard_normal() * delta;
    let candidate = trajectory.local_opl(ix, proposed, index);

    let accepted = candidate < before;
    if accepted {
        trajectory.set_interior(ix, proposed);
    }

    Ok(StepOutcome {
        accepted,
        roughness: trajectory.roughness(),
        position: ix,
        before,
        after: if accepted { candidate } else { before },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::medium::{StepIndex, UniformIndex};
    use crate::random::SeededSource;

    /// Replays fixed draws so acceptance can be checked by hand.
    struct Scripted {
        indices: Vec<usize>,
        normals: Vec<f64>,
    }

    impl RandomSource for Scripted {
        fn interior_index(&mut self, _len: usize) -> usize {
            self.indices.remove(0)
        }

        fn standard_normal(&mut self) -> f64 {
            self.normals.remove(0)
        }

        fn unit(&mut self) -> f64 {
            0.5
        }
    }

    fn kinked() -> Trajectory {
        Trajectory::from_ys(0.0, 4.0, vec![0.0, 1.0, 5.0, 3.0, 4.0]).unwrap()
    }

    #[test]
    fn test_improving_move_accepted() {
        let mut t = kinked();
        // y_2 = 5 sits above both neighbours; pulling it down to 2 helps.
        let mut rng = Scripted {
            indices: vec![2],
            normals: vec![-1.5],
        };
        let out = step(&mut t, &UniformIndex(1.0), 2.0, &mut rng).unwrap();
        assert!(out.accepted);
        assert_eq!(out.position, 2);
        assert_eq!(t.y()[2], 2.0);
        assert!(out.after < out.before);
        assert!((out.roughness - t.roughness()).abs() < 1e-15);
        assert!((out.roughness - 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_worsening_move_rejected() {
        let mut t = kinked();
        let original = t.clone();
        let mut rng = Scripted {
            indices: vec![2],
            normals: vec![1.0],
        };
        let out = step(&mut t, &UniformIndex(1.0), 1.0, &mut rng).unwrap();
        assert!(!out.accepted);
        assert_eq!(t, original);
        assert_eq!(out.after, out.before);
        assert!((out.roughness - original.roughness()).abs() < 1e-15);
    }

    #[test]
    fn test_equal_length_move_rejected() {
        // Mirror image about the straight line has the same local length.
        let mut t = Trajectory::from_ys(0.0, 2.0, vec![0.0, 1.0, 0.0]).unwrap();
        let mut rng = Scripted {
            indices: vec![1],
            normals: vec![-2.0],
        };
        let out = step(&mut t, &UniformIndex(1.0), 1.0, &mut rng).unwrap();
        assert!(!out.accepted, "ties must not be accepted");
        assert_eq!(t.y()[1], 1.0);
    }

    #[test]
    fn test_delta_scales_perturbation() {
        let mut t = kinked();
        let mut rng = Scripted {
            indices: vec![2],
            normals: vec![-0.25],
        };
        step(&mut t, &UniformIndex(1.0), 4.0, &mut rng).unwrap();
        assert_eq!(t.y()[2], 4.0);
    }

    #[test]
    fn test_rejects_non_positive_delta() {
        let mut t = kinked();
        let mut rng = SeededSource::new(0);
        for delta in [0.0, -0.5, f64::INFINITY] {
            let err = step(&mut t, &UniformIndex(1.0), delta, &mut rng).unwrap_err();
            assert!(matches!(err, FermatError::InvalidConfiguration(_)));
        }
        assert_eq!(t, kinked());
    }

    #[test]
    fn test_denser_right_half_shortens_glass_segment() {
        // Raising y_1 shortens the segment in glass at the cost of air.
        let step_medium = StepIndex::new(1.0, 1.0, 3.0).unwrap();
        let mut t = Trajectory::from_ys(0.0, 2.0, vec![0.0, 1.0, 2.0]).unwrap();
        let mut rng = Scripted {
            indices: vec![1],
            normals: vec![0.5],
        };
        let out = step(&mut t, &step_medium, 1.0, &mut rng).unwrap();
        assert!(out.accepted);
        assert_eq!(t.y()[1], 1.5);

        let mut straight = Trajectory::from_ys(0.0, 2.0, vec![0.0, 1.0, 2.0]).unwrap();
        let mut rng = Scripted {
            indices: vec![1],
            normals: vec![0.5],
        };
        let out = step(&mut straight, &UniformIndex(1.0), 1.0, &mut rng).unwrap();
        assert!(!out.accepted);
    }

    #[test]
    fn test_only_chosen_point_changes() {
        let mut t = Trajectory::new(15, 0.0, 10.0, 0.0, 10.0).unwrap();
        let mut rng = SeededSource::new(9);
        t.randomize_interior(&mut rng);
        let medium = StepIndex::centered(0.0, 10.0, 1.0, 1.5).unwrap();
        for _ in 0..500 {
            let before = t.clone();
            let out = step(&mut t, &medium, 0.5, &mut rng).unwrap();
            for i in 0..t.len() {
                if i != out.position {
                    assert_eq!(t.y()[i].to_bits(), before.y()[i].to_bits());
                }
            }
        }
    }
}
