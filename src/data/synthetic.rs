//! Synthetic grism scenes for the demo and benchmark commands.
//!
//! A scene is a circular Gaussian source whose spectrum is a flat continuum
//! plus one Gaussian emission line, observed through a bandpass that ramps up
//! linearly from the blue edge to the red edge of the wavelength range.
//! Scenes with a [`VelocityModel`] Doppler-shift the line per spaxel.

use ndarray::{Array2, Array3};
use rand::prelude::*;
use rand::rngs::StdRng;
use rand_distr::Normal;

use crate::data::VelocityModel;
use crate::domain::{GrismConfig, SpectralBin};
use crate::error::AppError;
use crate::math::centered_grid;

/// Source and noise parameters of a synthetic scene.
#[derive(Debug, Clone)]
pub struct SceneParams {
    /// Source Gaussian sigma (arcsec).
    pub sigma_arcsec: f64,
    /// Continuum flux density at the source centre.
    pub continuum: f64,
    /// Peak of the emission line relative to the continuum.
    pub line_strength: f64,
    /// Emission line centre (nm).
    pub line_center: f64,
    /// Emission line Gaussian sigma (nm).
    pub line_width: f64,
    /// Blue edge of the wavelength range (nm).
    pub lambda_min: f64,
    /// Red edge of the wavelength range (nm).
    pub lambda_max: f64,
    /// Bandpass throughput at `lambda_min` and `lambda_max`.
    pub throughput: (f64, f64),
    /// Per-pixel Gaussian noise sigma of the observed image.
    pub noise_sigma: f64,
    pub seed: u64,
    /// Disk rotation; `None` keeps the line at rest in every spaxel.
    pub velocity: Option<VelocityModel>,
}

/// `lambdas[nlam, 2]` and `bandpasses[nlam, 2]` for a uniform wavelength grid.
pub fn spectral_grid(
    nlam: usize,
    params: &SceneParams,
) -> Result<(Array2<f64>, Array2<f64>), AppError> {
    if nlam == 0 {
        return Err(AppError::new(2, "Number of wavelength slices must be > 0."));
    }
    if !(params.lambda_min.is_finite() && params.lambda_max > params.lambda_min) {
        return Err(AppError::new(
            2,
            format!(
                "Invalid wavelength range: [{}, {}] nm.",
                params.lambda_min, params.lambda_max
            ),
        ));
    }

    let step = (params.lambda_max - params.lambda_min) / nlam as f64;
    let (t_blue, t_red) = params.throughput;
    let throughput = |lam: f64| {
        let u = (lam - params.lambda_min) / (params.lambda_max - params.lambda_min);
        t_blue + (t_red - t_blue) * u
    };

    let lambdas = Array2::from_shape_fn((nlam, 2), |(i, edge)| {
        params.lambda_min + step * (i + edge) as f64
    });
    let bandpasses = Array2::from_shape_fn((nlam, 2), |(i, edge)| throughput(lambdas[[i, edge]]));
    Ok((lambdas, bandpasses))
}

/// Theory cube `[model_Nlam, model_Ny, model_Nx]` of the scene.
pub fn theory_cube(
    config: &GrismConfig,
    bins: &[SpectralBin],
    params: &SceneParams,
) -> Array3<f64> {
    let img = &config.imaging;
    let xs = centered_grid(img.model_nx, img.model_scale);
    let ys = centered_grid(img.model_ny, img.model_scale);
    let two_s2 = 2.0 * params.sigma_arcsec * params.sigma_arcsec;

    // Observed line centre per spaxel, row-major.
    let centers: Vec<f64> = ys
        .iter()
        .flat_map(|&y| xs.iter().map(move |&x| (x, y)))
        .map(|(x, y)| match &params.velocity {
            Some(v) => v.doppler_shift(params.line_center, x, y),
            None => params.line_center,
        })
        .collect();

    Array3::from_shape_fn((img.model_nlam, img.model_ny, img.model_nx), |(z, y, x)| {
        let d = (bins[z].mean_wave() - centers[y * img.model_nx + x]) / params.line_width;
        let spectrum = params.continuum * (1.0 + params.line_strength * (-0.5 * d * d).exp());
        let r2 = xs[x] * xs[x] + ys[y] * ys[y];
        spectrum * (-r2 / two_s2).exp()
    })
}

/// Add seeded Gaussian noise to a rendered image.
///
/// Returns `(data, noise)` where `noise` is the constant per-pixel sigma.
pub fn observe(
    truth: &Array2<f64>,
    params: &SceneParams,
) -> Result<(Array2<f64>, Array2<f64>), AppError> {
    if !(params.noise_sigma.is_finite() && params.noise_sigma > 0.0) {
        return Err(AppError::new(2, "Noise sigma must be finite and > 0."));
    }
    let normal = Normal::new(0.0, params.noise_sigma)
        .map_err(|e| AppError::new(4, format!("Noise distribution error: {e}")))?;
    let mut rng = StdRng::seed_from_u64(params.seed);

    let data = truth.mapv(|v| v + rng.sample(normal));
    let noise = Array2::from_elem(truth.raw_dim(), params.noise_sigma);
    Ok((data, noise))
}
