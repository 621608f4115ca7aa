//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - turns them into library configuration
//! - runs the demo/bench pipeline
//! - prints reports

use clap::Parser;

use crate::cli::{BenchArgs, Command, DemoArgs, GeometryArgs, SceneArgs};
use crate::data::{SceneParams, VelocityModel};
use crate::domain::{DispersionParams, GrismConfig, ImagingConfig};
use crate::error::AppError;
use crate::render::RenderSettings;

pub mod pipeline;

/// Entry point for the `grism` binary.
pub fn run() -> Result<(), AppError> {
    let cli = crate::cli::Cli::parse();

    match cli.command {
        Command::Demo(args) => handle_demo(args),
        Command::Bench(args) => handle_bench(args),
    }
}

fn handle_demo(args: DemoArgs) -> Result<(), AppError> {
    let config = demo_config_from_args(&args)?;
    let out = pipeline::run_demo(&config)?;
    println!("{}", crate::report::format_demo_summary(&out, &config));
    Ok(())
}

fn handle_bench(args: BenchArgs) -> Result<(), AppError> {
    let config = pipeline::BenchConfig {
        grism: grism_config_from_args(&args.geometry)?,
        scene: scene_params_from_args(&args.scene)?,
        workers: args.workers,
        iterations: args.iterations,
    };
    let out = pipeline::run_bench(&config)?;
    println!("{}", crate::report::format_bench_summary(&out, &config.grism));
    Ok(())
}

pub fn demo_config_from_args(args: &DemoArgs) -> Result<pipeline::DemoConfig, AppError> {
    let render = match args.workers {
        Some(n) => RenderSettings::with_workers(n),
        None => RenderSettings::from_env(),
    };
    Ok(pipeline::DemoConfig {
        grism: grism_config_from_args(&args.geometry)?,
        scene: scene_params_from_args(&args.scene)?,
        perturb: args.perturb,
        iterations: args.iterations,
        render,
    })
}

/// Build a [`GrismConfig`] from CLI geometry.
///
/// The library assumes physically sensible inputs; the CLI is the one place
/// that rejects empty grids and non-positive scales up front.
pub fn grism_config_from_args(args: &GeometryArgs) -> Result<GrismConfig, AppError> {
    let dims = [args.model_nx, args.model_ny, args.model_nlam, args.nx, args.ny];
    if dims.contains(&0) {
        return Err(AppError::new(2, "All cube and image dimensions must be > 0."));
    }
    let positive = [args.model_scale, args.pix_scale, args.diameter, args.exp_time, args.gain];
    if positive.iter().any(|v| !(v.is_finite() && *v > 0.0)) {
        return Err(AppError::new(
            2,
            "Pixel scales, diameter, exposure time and gain must be finite and > 0.",
        ));
    }

    Ok(GrismConfig {
        imaging: ImagingConfig {
            model_nx: args.model_nx,
            model_ny: args.model_ny,
            model_nlam: args.model_nlam,
            model_scale: args.model_scale,
            nx: args.nx,
            ny: args.ny,
            pix_scale: args.pix_scale,
            diameter: args.diameter,
            exp_time: args.exp_time,
            gain: args.gain,
        },
        dispersion: DispersionParams {
            r_spec: args.r_spec,
            disp_ang: args.disp_ang,
            offset: args.offset,
        },
    })
}

pub fn scene_params_from_args(args: &SceneArgs) -> Result<SceneParams, AppError> {
    let velocity = args
        .vcirc
        .map(|vcirc| VelocityModel::new(args.v0, vcirc, args.rscale, args.sini, args.theta_int))
        .transpose()?;
    Ok(SceneParams {
        sigma_arcsec: args.sigma,
        continuum: args.continuum,
        line_strength: args.line_strength,
        line_center: args.line_center,
        line_width: args.line_width,
        lambda_min: args.lambda_min,
        lambda_max: args.lambda_max,
        throughput: (0.6, 0.9),
        noise_sigma: args.noise,
        seed: args.seed,
        velocity,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Cli;

    #[test]
    fn demo_args_map_onto_config() {
        let cli = Cli::try_parse_from([
            "grism", "demo", "--nx", "20", "--offset", "-500", "--workers", "0", "--seed", "9",
        ])
        .unwrap();
        let Command::Demo(args) = cli.command else {
            panic!("expected demo command");
        };
        let config = demo_config_from_args(&args).unwrap();
        assert_eq!(config.grism.imaging.nx, 20);
        assert_eq!(config.grism.dispersion.offset, -500.0);
        assert_eq!(config.render.workers, 1);
        assert_eq!(config.scene.seed, 9);
    }

    #[test]
    fn vcirc_enables_rotating_disk() {
        let cli =
            Cli::try_parse_from(["grism", "demo", "--vcirc", "250", "--sini", "0.7"]).unwrap();
        let Command::Demo(args) = cli.command else {
            panic!("expected demo command");
        };
        let scene = scene_params_from_args(&args.scene).unwrap();
        let velocity = scene.velocity.unwrap();
        assert_eq!(velocity.sini(), 0.7);
        assert!(velocity.line_of_sight(0.5, 0.0) > 0.0);

        let cli = Cli::try_parse_from(["grism", "demo"]).unwrap();
        let Command::Demo(args) = cli.command else {
            panic!("expected demo command");
        };
        assert!(scene_params_from_args(&args.scene).unwrap().velocity.is_none());
    }

    #[test]
    fn edge_on_disk_is_rejected() {
        let cli = Cli::try_parse_from(["grism", "bench", "--vcirc", "200", "--sini", "1"]).unwrap();
        let Command::Bench(args) = cli.command else {
            panic!("expected bench command");
        };
        let err = scene_params_from_args(&args.scene).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn zero_dimension_is_rejected() {
        let cli = Cli::try_parse_from(["grism", "bench", "--model-nlam", "0"]).unwrap();
        let Command::Bench(args) = cli.command else {
            panic!("expected bench command");
        };
        let err = grism_config_from_args(&args.geometry).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }
}
