//! Chi-squared of a model image against a registered observation.

use ndarray::{ArrayView2, Zip};

use crate::error::GrismError;
use crate::registry::Registry;
use crate::shape::expect_shape;

/// `Σ ((model - data) / noise)²` over all pixels.
///
/// No masking is applied; zero noise yields a non-finite result.
///
/// # Panics
/// Panics if the three images do not share one shape. [`Registry::chi2`]
/// checks shapes first.
pub fn chi_squared(
    model: ArrayView2<'_, f64>,
    data: ArrayView2<'_, f64>,
    noise: ArrayView2<'_, f64>,
) -> f64 {
    Zip::from(&model)
        .and(&data)
        .and(&noise)
        .fold(0.0, |acc, &m, &d, &n| {
            let r = (m - d) / n;
            acc + r * r
        })
}

impl Registry {
    /// Chi-squared of `model_image` (`[Ny, Nx]`) against observation `index`.
    pub fn chi2(&self, index: usize, model_image: ArrayView2<'_, f64>) -> Result<f64, GrismError> {
        let obs = self.get(index)?;
        expect_shape("modelImage", &model_image, &obs.model().imaging().image_shape())?;
        Ok(chi_squared(model_image, obs.data(), obs.noise()))
    }
}
