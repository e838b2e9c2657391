//! Property tests for the step function and trajectory invariants.

use proptest::prelude::*;
use u_fermat::medium::{LinearGradient, StepIndex};
use u_fermat::random::SeededSource;
use u_fermat::relax::{step, RelaxConfig, RelaxRunner};
use u_fermat::trajectory::Trajectory;

fn random_path(n: usize, y0: f64, yf: f64, seed: u64) -> (Trajectory, SeededSource) {
    let mut path = Trajectory::new(n, 0.0, 10.0, y0, yf).unwrap();
    let mut rng = SeededSource::new(seed);
    path.randomize_interior(&mut rng);
    (path, rng)
}

proptest! {
    #[test]
    fn endpoints_and_grid_never_move(
        n in 3usize..40,
        y0 in -20.0f64..20.0,
        yf in -20.0f64..20.0,
        seed in any::<u64>(),
        steps in 1usize..2000,
        delta in 0.01f64..5.0,
    ) {
        let medium = StepIndex::centered(0.0, 10.0, 1.0, 1.5).unwrap();
        let (mut path, mut rng) = random_path(n, y0, yf, seed);
        let grid: Vec<u64> = path.x().iter().map(|x| x.to_bits()).collect();

        for _ in 0..steps {
            step(&mut path, &medium, delta, &mut rng).unwrap();
        }

        prop_assert_eq!(path.start().1.to_bits(), y0.to_bits());
        prop_assert_eq!(path.end().1.to_bits(), yf.to_bits());
        let after: Vec<u64> = path.x().iter().map(|x| x.to_bits()).collect();
        prop_assert_eq!(grid, after);
    }

    #[test]
    fn step_never_lengthens_local_path(
        n in 3usize..30,
        seed in any::<u64>(),
        delta in 0.01f64..5.0,
        slope in -0.04f64..0.2,
    ) {
        let medium = LinearGradient::over(0.0, 10.0, 1.0, slope).unwrap();
        let (mut path, mut rng) = random_path(n, 0.0, 10.0, seed);

        for _ in 0..200 {
            let out = step(&mut path, &medium, delta, &mut rng).unwrap();
            let now = path.local_opl(out.position, path.y()[out.position], &medium);
            prop_assert!(now <= out.before);
            prop_assert_eq!(now, out.after);
            if out.accepted {
                prop_assert!(out.after < out.before);
            } else {
                prop_assert_eq!(out.after, out.before);
            }
        }
    }

    #[test]
    fn roughness_is_non_negative(
        ys in proptest::collection::vec(-100.0f64..100.0, 3..50),
    ) {
        let path = Trajectory::from_ys(0.0, 1.0, ys.clone()).unwrap();
        let r = path.roughness();
        prop_assert!(r >= 0.0);
        let flat = ys.iter().all(|&y| y == ys[0]);
        prop_assert_eq!(r == 0.0, flat);
    }

    #[test]
    fn relaxation_terminates_within_cap(
        seed in any::<u64>(),
        cap in 1usize..3000,
    ) {
        let medium = StepIndex::centered(0.0, 10.0, 1.0, 1.5).unwrap();
        let (mut path, mut rng) = random_path(15, 0.0, 10.0, seed);
        let config = RelaxConfig::default().with_max_iterations(cap);
        let result = RelaxRunner::run_with_source(&mut path, &medium, &config, &mut rng).unwrap();
        prop_assert!(result.iterations <= cap);
    }
}
