//! Dispersed image rendering.
//!
//! Rendering applies a response table to a theory cube:
//!
//! ```text
//! out[image_y, image_x] += cube[cube_z, cube_y, cube_x] * weight
//! ```
//!
//! Many entries hit the same output pixel, so the table is split into one
//! contiguous chunk per worker, each chunk accumulates into a private image,
//! and the private images are summed into the output after all workers join.
//! For a fixed worker count the summation order is deterministic; across
//! worker counts results agree only up to floating-point reordering.

use ndarray::{Array2, ArrayView3, ArrayViewMut2};
use rayon::prelude::*;

use crate::error::GrismError;
use crate::response::DispersionModel;
use crate::shape::expect_shape;

pub mod settings;

pub use settings::*;

/// Fixed-size worker pool used to render dispersed images.
#[derive(Debug)]
pub struct Renderer {
    settings: RenderSettings,
    pool: rayon::ThreadPool,
}

impl Renderer {
    pub fn new(settings: RenderSettings) -> Result<Self, GrismError> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(settings.workers)
            .thread_name(|i| format!("grism-render-{i}"))
            .build()?;
        Ok(Self { settings, pool })
    }

    /// Renderer sized from the environment (see [`RenderSettings::from_env`]).
    pub fn from_env() -> Result<Self, GrismError> {
        Self::new(RenderSettings::from_env())
    }

    pub fn workers(&self) -> usize {
        self.settings.workers
    }

    /// Overwrite `out` with the dispersed image of `cube`.
    ///
    /// `cube` must be `[model_Nlam, model_Ny, model_Nx]` and `out` `[Ny, Nx]`
    /// for `model`'s configuration. Shapes are checked before `out` is
    /// touched.
    pub fn render(
        &self,
        model: &DispersionModel,
        cube: ArrayView3<'_, f64>,
        mut out: ArrayViewMut2<'_, f64>,
    ) -> Result<(), GrismError> {
        let img = model.imaging();
        expect_shape("theory_data", &cube, &img.cube_shape())?;
        expect_shape("dispersed_data", &out, &img.image_shape())?;

        out.fill(0.0);
        let table = model.table();
        if table.is_empty() {
            return Ok(());
        }

        let nx = img.nx;
        let npix = img.ny * nx;
        let chunk = table.len().div_ceil(self.settings.workers);

        let partials: Vec<Vec<f64>> = self.pool.install(|| {
            table
                .par_chunks(chunk)
                .map(|entries| {
                    let mut local = vec![0.0; npix];
                    for e in entries {
                        local[e.image_y * nx + e.image_x] +=
                            cube[[e.cube_z, e.cube_y, e.cube_x]] * e.weight;
                    }
                    local
                })
                .collect()
        });

        for local in &partials {
            for (o, v) in out.iter_mut().zip(local) {
                *o += v;
            }
        }
        Ok(())
    }

    /// Render into a freshly allocated `[Ny, Nx]` image.
    pub fn render_new(
        &self,
        model: &DispersionModel,
        cube: ArrayView3<'_, f64>,
    ) -> Result<Array2<f64>, GrismError> {
        let mut out = Array2::zeros((model.ny(), model.nx()));
        self.render(model, cube, out.view_mut())?;
        Ok(out)
    }
}
