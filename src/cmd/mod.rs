use clap::{Args, ValueEnum};
use u_fermat::medium::{LinearGradient, RefractiveIndex, StepIndex, UniformIndex};
use u_fermat::relax::RelaxConfig;
use u_fermat::trajectory::Trajectory;
use u_fermat::FermatResult;

pub mod ensemble;
pub mod run;

pub type Medium = Box<dyn RefractiveIndex + Send + Sync>;

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    /// `n-left` before the boundary, `n-right` from it on.
    Step,
    /// `n-left` everywhere.
    Uniform,
    /// `n-left` at x0, rising by `slope` per unit x.
    Gradient,
}

/// Geometry, medium, and relaxation settings shared by every command.
#[derive(Args, Debug, Clone)]
pub struct ExperimentArgs {
    /// Number of trajectory points, endpoints included.
    #[arg(short = 'N', long, default_value_t = 15)]
    pub points: usize,
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub x0: f64,
    #[arg(long, default_value_t = 10.0, allow_negative_numbers = true)]
    pub xf: f64,
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub y0: f64,
    #[arg(long, default_value_t = 10.0, allow_negative_numbers = true)]
    pub yf: f64,

    #[arg(long, value_enum, default_value_t = Profile::Step)]
    pub profile: Profile,
    #[arg(long, default_value_t = 1.0)]
    pub n_left: f64,
    #[arg(long, default_value_t = 1.5)]
    pub n_right: f64,
    /// Interface position. Defaults to the midpoint of [x0, xf].
    #[arg(long, allow_negative_numbers = true)]
    pub boundary: Option<f64>,
    #[arg(long, default_value_t = 0.05, allow_negative_numbers = true)]
    pub slope: f64,

    #[arg(long, default_value_t = 1.0)]
    pub delta: f64,
    #[arg(long, default_value_t = 100_000)]
    pub max_iterations: usize,
    #[arg(long, default_value_t = 0.2)]
    pub stagnation_fraction: f64,
}

impl ExperimentArgs {
    pub fn boundary(&self) -> f64 {
        self.boundary.unwrap_or((self.x0 + self.xf) / 2.0)
    }

    /// Straight-from-start trajectory; interior not yet randomised.
    pub fn trajectory(&self) -> FermatResult<Trajectory> {
        Trajectory::new(self.points, self.x0, self.xf, self.y0, self.yf)
    }

    pub fn medium(&self) -> FermatResult<Medium> {
        let medium: Medium = match self.profile {
            Profile::Step => Box::new(StepIndex::new(self.boundary(), self.n_left, self.n_right)?),
            Profile::Uniform => Box::new(UniformIndex::new(self.n_left)?),
            Profile::Gradient => Box::new(LinearGradient::over(
                self.x0,
                self.xf,
                self.n_left,
                self.slope,
            )?),
        };
        Ok(medium)
    }

    /// Indices on either side of the boundary, when Snell's law applies.
    pub fn snell_indices(&self) -> Option<(f64, f64)> {
        match self.profile {
            Profile::Step => Some((self.n_left, self.n_right)),
            Profile::Uniform => Some((self.n_left, self.n_left)),
            Profile::Gradient => None,
        }
    }

    pub fn relax_config(&self, seed: u64) -> RelaxConfig {
        RelaxConfig::default()
            .with_initial_delta(self.delta)
            .with_max_iterations(self.max_iterations)
            .with_stagnation_fraction(self.stagnation_fraction)
            .with_seed(seed)
    }
}
