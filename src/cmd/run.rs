use super::ExperimentArgs;
use crate::reports;
use clap::Args;
use tracing::{error, info};
use u_fermat::random::SeededSource;
use u_fermat::relax::RelaxRunner;
use u_fermat::snell::measure;
use u_fermat::FermatResult;

#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    #[command(flatten)]
    pub experiment: ExperimentArgs,

    #[arg(short = 'S', long, default_value_t = 0)]
    pub seed: u64,

    /// Skip the before/after trajectory tables.
    #[arg(long, default_value_t = false)]
    pub no_table: bool,
}

pub fn run(args: RunArgs) -> FermatResult<()> {
    let exp = &args.experiment;
    let medium = exp.medium()?;
    let config = exp.relax_config(args.seed);
    config.validate()?;
    let boundary = exp.boundary();

    let mut path = exp.trajectory()?;
    let mut rng = SeededSource::new(args.seed);
    path.randomize_interior(&mut rng);

    if !args.no_table {
        let title = "Trajectory of light ray before MC";
        reports::print_trajectory(title, &path, &*medium, boundary);
    }

    info!(
        "🔦 Relaxing {} points (seed {}, OPL {:.6})",
        path.len(),
        args.seed,
        path.optical_path_length(&*medium)
    );
    let result = RelaxRunner::run_with_source(&mut path, &*medium, &config, &mut rng)?;
    info!(
        "✅ Stopped after {} iterations ({:?}): {} accepted, {} stagnant, OPL {:.6}",
        result.iterations,
        result.stop_reason,
        result.accepted_moves,
        result.stagnant_moves,
        path.optical_path_length(&*medium)
    );

    if !args.no_table {
        let title = "Trajectory of light ray after MC";
        reports::print_trajectory(title, &path, &*medium, boundary);
    }

    match exp.snell_indices() {
        Some((n_left, n_right)) => match measure(&path, boundary, n_left, n_right) {
            Ok(m) => reports::print_snell(&m),
            Err(e) => error!("❌ {}", e),
        },
        None => info!("Snell's-law check skipped: profile has no sharp interface"),
    }

    Ok(())
}
