//! Observation registry.
//!
//! A [`Registry`] is an ordered list of observations, each pairing an observed
//! image and its noise map with the [`DispersionModel`] that forward-models
//! it. Indices are insertion positions; the registry only grows by
//! [`Registry::append`] and only shrinks by [`Registry::clear`].
//!
//! Mutation takes `&mut self`, so one registry has a single writer at a time.
//! Hosts that share a registry between threads wrap it in a mutex.

use log::info;
use ndarray::{Array2, ArrayView2, ArrayView3, ArrayViewMut2};

use crate::diag;
use crate::error::GrismError;
use crate::render::Renderer;
use crate::response::DispersionModel;
use crate::shape::expect_shape;

pub mod chi2;

pub use chi2::*;

/// One registered observation. Data and noise are owned copies.
#[derive(Debug, Clone)]
pub struct Observation {
    model: DispersionModel,
    data: Array2<f64>,
    noise: Array2<f64>,
}

impl Observation {
    pub fn model(&self) -> &DispersionModel {
        &self.model
    }

    pub fn data(&self) -> ArrayView2<'_, f64> {
        self.data.view()
    }

    pub fn noise(&self) -> ArrayView2<'_, f64> {
        self.noise.view()
    }
}

#[derive(Debug)]
pub struct Registry {
    observations: Vec<Observation>,
    renderer: Renderer,
}

impl Registry {
    pub fn new(renderer: Renderer) -> Self {
        Self {
            observations: Vec::new(),
            renderer,
        }
    }

    /// Empty registry whose renderer is sized from the environment.
    pub fn from_env() -> Result<Self, GrismError> {
        Ok(Self::new(Renderer::from_env()?))
    }

    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    /// Register an observation.
    ///
    /// `data` and `noise` must both be `[Ny, Nx]` for `model`. Nothing is
    /// registered on error.
    pub fn append(
        &mut self,
        data: ArrayView2<'_, f64>,
        noise: ArrayView2<'_, f64>,
        model: DispersionModel,
    ) -> Result<(), GrismError> {
        let shape = model.imaging().image_shape();
        expect_shape("data", &data, &shape)?;
        expect_shape("noise", &noise, &shape)?;

        self.observations.push(Observation {
            model,
            data: data.to_owned(),
            noise: noise.to_owned(),
        });
        info!(
            "{} {} observations in this list",
            diag::prefix(),
            self.observations.len()
        );
        Ok(())
    }

    /// Remove every observation.
    pub fn clear(&mut self) {
        self.observations.clear();
        info!("{} All existing observations cleared", diag::prefix());
    }

    pub fn count(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    pub fn get(&self, index: usize) -> Result<&Observation, GrismError> {
        self.observations
            .get(index)
            .ok_or(GrismError::IndexOutOfRange {
                index,
                count: self.observations.len(),
            })
    }

    pub fn iter(&self) -> impl Iterator<Item = &Observation> {
        self.observations.iter()
    }

    /// Render the dispersed image of observation `index` into `out`.
    pub fn render(
        &self,
        index: usize,
        cube: ArrayView3<'_, f64>,
        out: ArrayViewMut2<'_, f64>,
    ) -> Result<(), GrismError> {
        let obs = self.get(index)?;
        self.renderer.render(&obs.model, cube, out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ImagingConfig;
    use crate::render::RenderSettings;
    use ndarray::Array3;

    pub(crate) fn imaging(nx: usize, ny: usize) -> ImagingConfig {
        ImagingConfig {
            model_nx: 4,
            model_ny: 4,
            model_nlam: 2,
            model_scale: 0.1,
            nx,
            ny,
            pix_scale: 0.1,
            diameter: 1.0,
            exp_time: 1.0,
            gain: 1.0,
        }
    }

    pub(crate) fn registry() -> Registry {
        Registry::new(Renderer::new(RenderSettings::default()).unwrap())
    }

    #[test]
    fn append_copies_buffers_and_counts() {
        let mut reg = registry();
        let mut data = Array2::from_elem((2, 3), 4.0);
        let noise = Array2::from_elem((2, 3), 0.5);
        reg.append(data.view(), noise.view(), DispersionModel::photometry(imaging(3, 2)))
            .unwrap();
        data.fill(-1.0);

        assert_eq!(reg.count(), 1);
        let obs = reg.get(0).unwrap();
        assert!(obs.data().iter().all(|&v| v == 4.0));
        assert!(obs.noise().iter().all(|&v| v == 0.5));
        assert_eq!(obs.model().nx(), 3);
    }

    #[test]
    fn insertion_order_defines_index() {
        let mut reg = registry();
        for nx in 1..=3 {
            let img = Array2::zeros((2, nx));
            reg.append(img.view(), img.view(), DispersionModel::photometry(imaging(nx, 2)))
                .unwrap();
        }
        let widths: Vec<usize> = reg.iter().map(|o| o.model().nx()).collect();
        assert_eq!(widths, vec![1, 2, 3]);
        assert_eq!(reg.get(1).unwrap().model().nx(), 2);
    }

    #[test]
    fn shape_mismatch_registers_nothing() {
        let mut reg = registry();
        let data = Array2::zeros((2, 3));
        let noise = Array2::zeros((3, 2));
        let err = reg
            .append(data.view(), noise.view(), DispersionModel::photometry(imaging(3, 2)))
            .unwrap_err();
        assert!(err.is_dimensionality());
        assert!(err.to_string().contains("noise"));
        assert_eq!(reg.count(), 0);
    }

    #[test]
    fn clear_empties_registry() {
        let mut reg = registry();
        let img = Array2::zeros((2, 2));
        for _ in 0..3 {
            reg.append(img.view(), img.view(), DispersionModel::photometry(imaging(2, 2)))
                .unwrap();
        }
        reg.clear();
        assert_eq!(reg.count(), 0);
        assert!(reg.is_empty());
    }

    #[test]
    fn out_of_range_index_is_an_error() {
        let mut reg = registry();
        let img = Array2::zeros((2, 2));
        reg.append(img.view(), img.view(), DispersionModel::photometry(imaging(2, 2)))
            .unwrap();
        reg.clear();

        let cube = Array3::zeros((2, 4, 4));
        let mut out = Array2::zeros((2, 2));
        let err = reg.render(0, cube.view(), out.view_mut()).unwrap_err();
        assert!(matches!(err, GrismError::IndexOutOfRange { index: 0, count: 0 }));
    }
}
