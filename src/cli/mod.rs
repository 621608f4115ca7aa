//! Command-line parsing for the `grism` demonstration binary.
//!
//! The goal of this module is to keep **argument parsing** separate from the
//! modelling code: the library never sees clap types.

use clap::{Args, Parser, Subcommand};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "grism", version, about = "Grism forward model: dispersed images and chi-squared")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Register a synthetic grism observation, render it repeatedly and report chi2 and timing.
    Demo(DemoArgs),
    /// Compare single-worker and multi-worker rendering of the same scene.
    Bench(BenchArgs),
}

/// Theory cube, detector and grism geometry.
#[derive(Debug, Args, Clone)]
pub struct GeometryArgs {
    /// Theory cube width (pixels).
    #[arg(long, default_value_t = 64)]
    pub model_nx: usize,

    /// Theory cube height (pixels).
    #[arg(long, default_value_t = 64)]
    pub model_ny: usize,

    /// Number of wavelength slices in the theory cube.
    #[arg(long, default_value_t = 40)]
    pub model_nlam: usize,

    /// Theory cube pixel scale (arcsec/pixel).
    #[arg(long, default_value_t = 0.05)]
    pub model_scale: f64,

    /// Observed image width (pixels).
    #[arg(long, default_value_t = 48)]
    pub nx: usize,

    /// Observed image height (pixels).
    #[arg(long, default_value_t = 32)]
    pub ny: usize,

    /// Observed image pixel scale (arcsec/pixel).
    #[arg(long, default_value_t = 0.13)]
    pub pix_scale: f64,

    /// Spectral resolution at 1 micron.
    #[arg(long, default_value_t = 461.0)]
    pub r_spec: f64,

    /// Dispersion angle (radians).
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    pub disp_ang: f64,

    /// Dispersion offset (observed pixels).
    #[arg(long, default_value_t = -605.0, allow_hyphen_values = true)]
    pub offset: f64,

    /// Aperture diameter (cm).
    #[arg(long, default_value_t = 250.0)]
    pub diameter: f64,

    /// Exposure time (s).
    #[arg(long, default_value_t = 600.0)]
    pub exp_time: f64,

    /// Detector gain.
    #[arg(long, default_value_t = 1.0)]
    pub gain: f64,
}

/// Synthetic source and noise.
#[derive(Debug, Args, Clone)]
pub struct SceneArgs {
    /// Source Gaussian sigma (arcsec).
    #[arg(long, default_value_t = 0.3)]
    pub sigma: f64,

    /// Continuum flux density at the source centre.
    #[arg(long, default_value_t = 1e-6)]
    pub continuum: f64,

    /// Emission line peak relative to the continuum.
    #[arg(long, default_value_t = 5.0)]
    pub line_strength: f64,

    /// Emission line centre (nm).
    #[arg(long, default_value_t = 656.3)]
    pub line_center: f64,

    /// Emission line sigma (nm).
    #[arg(long, default_value_t = 1.0)]
    pub line_width: f64,

    /// Blue edge of the wavelength range (nm).
    #[arg(long, default_value_t = 640.0)]
    pub lambda_min: f64,

    /// Red edge of the wavelength range (nm).
    #[arg(long, default_value_t = 680.0)]
    pub lambda_max: f64,

    /// Per-pixel noise sigma of the synthetic observation.
    #[arg(long, default_value_t = 5.0)]
    pub noise: f64,

    /// Random seed for the synthetic noise.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Asymptotic disk rotation speed (km/s); enables the rotating-disk line shift.
    #[arg(long)]
    pub vcirc: Option<f64>,

    /// Rotation curve offset velocity (km/s).
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    pub v0: f64,

    /// Rotation curve turnover radius (arcsec).
    #[arg(long, default_value_t = 0.2)]
    pub rscale: f64,

    /// Sine of the disk inclination.
    #[arg(long, default_value_t = 0.5)]
    pub sini: f64,

    /// Position angle of the disk major axis (radians).
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    pub theta_int: f64,
}

#[derive(Debug, Args, Clone)]
pub struct DemoArgs {
    #[command(flatten)]
    pub geometry: GeometryArgs,

    #[command(flatten)]
    pub scene: SceneArgs,

    /// Flux scale applied to the truth cube for the mismatched model.
    #[arg(long, default_value_t = 1.05)]
    pub perturb: f64,

    /// Number of timed render + chi2 iterations.
    #[arg(long, default_value_t = 20)]
    pub iterations: usize,

    /// Render workers (defaults to GRISM_NUM_THREADS / OMP_NUM_THREADS, else 1).
    #[arg(long)]
    pub workers: Option<usize>,
}

#[derive(Debug, Args, Clone)]
pub struct BenchArgs {
    #[command(flatten)]
    pub geometry: GeometryArgs,

    #[command(flatten)]
    pub scene: SceneArgs,

    /// Worker count compared against a single worker.
    #[arg(long, default_value_t = 4)]
    pub workers: usize,

    /// Renders per worker configuration.
    #[arg(long, default_value_t = 20)]
    pub iterations: usize,
}
