//! Shared scene/model/registry workflow used by the `demo` and `bench` commands.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! synthetic scene -> response table -> registry -> render/chi2 loop
//!
//! The command handlers can then focus on presentation.

use std::time::{Duration, Instant};

use log::info;
use ndarray::{Array2, Array3, ArrayView3};

use crate::data::{SceneParams, observe, spectral_grid, theory_cube};
use crate::domain::{GrismConfig, TableSummary};
use crate::error::AppError;
use crate::registry::Registry;
use crate::render::{RenderSettings, Renderer};
use crate::report::max_relative_difference;
use crate::response::{DispersionModel, spectral_bins};

/// Inputs of a `grism demo` run.
#[derive(Debug, Clone)]
pub struct DemoConfig {
    pub grism: GrismConfig,
    pub scene: SceneParams,
    /// Flux factor applied to the truth cube to build the mismatched model.
    pub perturb: f64,
    pub iterations: usize,
    pub render: RenderSettings,
}

/// Inputs of a `grism bench` run.
#[derive(Debug, Clone)]
pub struct BenchConfig {
    pub grism: GrismConfig,
    pub scene: SceneParams,
    pub workers: usize,
    pub iterations: usize,
}

/// All computed outputs of a single `grism demo` run.
#[derive(Debug, Clone)]
pub struct DemoOutput {
    pub table: TableSummary,
    pub workers: usize,
    pub build_time: Duration,
    /// Mean wall time of one render.
    pub render_time: Duration,
    pub renders: usize,
    pub npix: usize,
    pub observed_total: f64,
    pub chi2_truth: f64,
    pub chi2_perturbed: f64,
}

#[derive(Debug, Clone)]
pub struct BenchOutput {
    pub table: TableSummary,
    pub workers: usize,
    pub renders: usize,
    /// Mean wall time of one single-worker render.
    pub serial_time: Duration,
    /// Mean wall time of one render with `workers` workers.
    pub parallel_time: Duration,
    pub max_rel_diff: f64,
}

struct Scene {
    model: DispersionModel,
    cube: Array3<f64>,
    build_time: Duration,
}

fn build_scene(grism: &GrismConfig, params: &SceneParams) -> Result<Scene, AppError> {
    let nlam = grism.imaging.model_nlam;
    let (lambdas, bandpasses) = spectral_grid(nlam, params)?;
    let bins = spectral_bins(lambdas.view(), bandpasses.view(), nlam)?;
    let cube = theory_cube(grism, &bins, params);

    let start = Instant::now();
    let model = DispersionModel::grism(grism.clone(), lambdas.view(), bandpasses.view())?;
    let build_time = start.elapsed();

    Ok(Scene {
        model,
        cube,
        build_time,
    })
}

/// Register a synthetic observation and run the render + chi2 loop.
pub fn run_demo(config: &DemoConfig) -> Result<DemoOutput, AppError> {
    let Scene {
        model,
        cube,
        build_time,
    } = build_scene(&config.grism, &config.scene)?;
    let table = model.summary();

    let mut registry = Registry::new(Renderer::new(config.render)?);
    let truth = registry.renderer().render_new(&model, cube.view())?;
    let (data, noise) = observe(&truth, &config.scene)?;
    let observed_total = data.sum();
    registry.append(data.view(), noise.view(), model)?;

    let perturbed = cube.mapv(|v| v * config.perturb);
    let mut image = Array2::zeros(config.grism.imaging.image_shape());
    let iterations = config.iterations.max(1);
    let mut chi2_truth = 0.0;
    let mut chi2_perturbed = 0.0;

    let start = Instant::now();
    for _ in 0..iterations {
        registry.render(0, cube.view(), image.view_mut())?;
        chi2_truth = registry.chi2(0, image.view())?;
        registry.render(0, perturbed.view(), image.view_mut())?;
        chi2_perturbed = registry.chi2(0, image.view())?;
    }
    let renders = 2 * iterations;
    let render_time = per_render(start.elapsed(), renders);
    info!("demo finished {renders} renders in {:?}", start.elapsed());

    Ok(DemoOutput {
        table,
        workers: registry.renderer().workers(),
        build_time,
        render_time,
        renders,
        npix: truth.len(),
        observed_total,
        chi2_truth,
        chi2_perturbed,
    })
}

/// Render the same scene with one worker and with `workers` workers.
pub fn run_bench(config: &BenchConfig) -> Result<BenchOutput, AppError> {
    let scene = build_scene(&config.grism, &config.scene)?;
    let iterations = config.iterations.max(1);

    let serial = Renderer::new(RenderSettings::with_workers(1))?;
    let parallel = Renderer::new(RenderSettings::with_workers(config.workers))?;

    let (serial_time, serial_image) =
        time_renders(&serial, &scene.model, scene.cube.view(), iterations)?;
    let (parallel_time, parallel_image) =
        time_renders(&parallel, &scene.model, scene.cube.view(), iterations)?;

    Ok(BenchOutput {
        table: scene.model.summary(),
        workers: parallel.workers(),
        renders: iterations,
        serial_time,
        parallel_time,
        max_rel_diff: max_relative_difference(&serial_image, &parallel_image),
    })
}

fn time_renders(
    renderer: &Renderer,
    model: &DispersionModel,
    cube: ArrayView3<'_, f64>,
    iterations: usize,
) -> Result<(Duration, Array2<f64>), AppError> {
    let mut image = Array2::zeros((model.ny(), model.nx()));
    let start = Instant::now();
    for _ in 0..iterations {
        renderer.render(model, cube, image.view_mut())?;
    }
    Ok((per_render(start.elapsed(), iterations), image))
}

/// Mean duration of one of `renders` renders.
fn per_render(elapsed: Duration, renders: usize) -> Duration {
    elapsed.div_f64(renders.max(1) as f64)
}
