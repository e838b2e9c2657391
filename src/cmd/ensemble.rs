use super::ExperimentArgs;
use crate::reports;
use clap::Args;
use tracing::{info, warn};
use u_fermat::relax::ensemble::{run_ensemble, summarize_errors};
use u_fermat::FermatResult;

#[derive(Args, Debug, Clone)]
pub struct EnsembleArgs {
    #[command(flatten)]
    pub experiment: ExperimentArgs,

    /// First seed; members use consecutive seeds from here.
    #[arg(short = 'S', long, default_value_t = 0)]
    pub seed: u64,

    #[arg(short = 'c', long, default_value_t = 16)]
    pub count: u64,

    /// Relax members one after another instead of in parallel.
    #[arg(long, default_value_t = false)]
    pub sequential: bool,
}

pub fn run(args: EnsembleArgs) -> FermatResult<()> {
    let exp = &args.experiment;
    let medium = exp.medium()?;
    let config = exp.relax_config(args.seed);
    let template = exp.trajectory()?;

    let seeds = args.seed..args.seed.saturating_add(args.count);
    info!(
        "🎲 Relaxing {} members (seeds {}..{})",
        args.count, seeds.start, seeds.end
    );
    let members = run_ensemble(&template, &*medium, &config, seeds, !args.sequential)?;

    let Some((n_left, n_right)) = exp.snell_indices() else {
        info!("Snell's-law check skipped: profile has no sharp interface");
        return Ok(());
    };

    let (measurements, summary) = summarize_errors(&members, exp.boundary(), n_left, n_right);
    reports::print_ensemble(&members, &measurements);
    match summary {
        Some(s) => reports::print_error_summary(&s),
        None => warn!("⚠️  No member could be measured against Snell's law"),
    }
    Ok(())
}
