//! Host-facing operation set.
//!
//! These functions mirror what an embedding interpreter binds: buffers arrive
//! as dynamically-ranked `f64` arrays and every rank and shape is checked here
//! before anything is stored or written.

use ndarray::{ArrayViewD, ArrayViewMutD, Ix2, Ix3};

use crate::domain::{GrismConfig, ImagingConfig};
use crate::error::GrismError;
use crate::registry::Registry;
use crate::response::DispersionModel;
use crate::shape::{fixed_rank, fixed_rank_mut};

pub use crate::diag::set_mpi_info;

/// Build the dispersion model of a grism observation and register it.
pub fn add_grism_observation(
    registry: &mut Registry,
    config: &GrismConfig,
    lambdas: ArrayViewD<'_, f64>,
    bandpasses: ArrayViewD<'_, f64>,
    data: ArrayViewD<'_, f64>,
    noise: ArrayViewD<'_, f64>,
) -> Result<(), GrismError> {
    let lambdas = fixed_rank::<Ix2>("lambdas", lambdas)?;
    let bandpasses = fixed_rank::<Ix2>("bandpasses", bandpasses)?;
    let data = fixed_rank::<Ix2>("data", data)?;
    let noise = fixed_rank::<Ix2>("noise", noise)?;

    let model = DispersionModel::grism(config.clone(), lambdas, bandpasses)?;
    registry.append(data, noise, model)
}

/// Register a photometry-only observation (empty response table).
pub fn add_image_observation(
    registry: &mut Registry,
    config: &ImagingConfig,
    data: ArrayViewD<'_, f64>,
    noise: ArrayViewD<'_, f64>,
) -> Result<(), GrismError> {
    let data = fixed_rank::<Ix2>("data", data)?;
    let noise = fixed_rank::<Ix2>("noise", noise)?;
    registry.append(data, noise, DispersionModel::photometry(config.clone()))
}

/// Render observation `index` from `theory_data` into `dispersed_data`.
pub fn get_dispersed_image(
    registry: &Registry,
    index: usize,
    theory_data: ArrayViewD<'_, f64>,
    dispersed_data: ArrayViewMutD<'_, f64>,
) -> Result<(), GrismError> {
    let theory_data = fixed_rank::<Ix3>("theory_data", theory_data)?;
    let dispersed_data = fixed_rank_mut::<Ix2>("dispersed_data", dispersed_data)?;
    registry.render(index, theory_data, dispersed_data)
}

/// Chi-squared of `model_image` against the data of observation `index`.
pub fn get_chi2(
    registry: &Registry,
    index: usize,
    model_image: ArrayViewD<'_, f64>,
) -> Result<f64, GrismError> {
    let model_image = fixed_rank::<Ix2>("modelImage", model_image)?;
    registry.chi2(index, model_image)
}

/// Drop every registered observation.
pub fn clear_observation(registry: &mut Registry) {
    registry.clear();
}

/// Number of registered observations.
pub fn get_nobs(registry: &Registry) -> usize {
    registry.count()
}
