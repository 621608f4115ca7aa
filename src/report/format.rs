//! Formatted terminal output for the `grism` commands.
//!
//! Formatting lives here so the pipeline stays free of presentation code.

use std::time::Duration;

use crate::app::pipeline::{BenchOutput, DemoConfig, DemoOutput};
use crate::domain::{GrismConfig, TableSummary};

/// Summary of a `grism demo` run.
pub fn format_demo_summary(out: &DemoOutput, config: &DemoConfig) -> String {
    let mut s = String::new();

    s.push_str("=== grism - dispersed image forward model ===\n");
    s.push_str(&format_geometry(&config.grism));
    s.push_str(&format_table_summary(&out.table));
    s.push_str(&format!("Table build: {}\n", fmt_duration(out.build_time)));
    s.push('\n');

    s.push_str(&format!(
        "Observation: {} pixels | total counts {:.3} | noise sigma {}\n",
        out.npix, out.observed_total, config.scene.noise_sigma
    ));
    if let Some(v) = &config.scene.velocity {
        s.push_str(&format!(
            "Source: rotating disk | vcirc {} km/s | sini {}\n",
            v.vcirc(),
            v.sini()
        ));
    }
    s.push_str(&format!(
        "Render: {} renders | {} worker(s) | {} per render\n",
        out.renders,
        out.workers,
        fmt_duration(out.render_time)
    ));
    s.push('\n');

    s.push_str("Chi-squared:\n");
    s.push_str(&format!(
        "- truth cube       : {:.3} (reduced {:.3})\n",
        out.chi2_truth,
        reduced(out.chi2_truth, out.npix)
    ));
    s.push_str(&format!(
        "- truth x {:<8} : {:.3} (reduced {:.3})\n",
        config.perturb,
        out.chi2_perturbed,
        reduced(out.chi2_perturbed, out.npix)
    ));

    s
}

/// Summary of a `grism bench` run.
pub fn format_bench_summary(out: &BenchOutput, config: &GrismConfig) -> String {
    let mut s = String::new();

    s.push_str("=== grism - render benchmark ===\n");
    s.push_str(&format_geometry(config));
    s.push_str(&format_table_summary(&out.table));
    s.push('\n');

    let speedup = out.serial_time.as_secs_f64() / out.parallel_time.as_secs_f64().max(1e-12);
    s.push_str(&format!(
        "{:>3} worker(s): {} per render\n",
        1,
        fmt_duration(out.serial_time)
    ));
    s.push_str(&format!(
        "{:>3} worker(s): {} per render (x{speedup:.2})\n",
        out.workers,
        fmt_duration(out.parallel_time)
    ));
    s.push_str(&format!(
        "Renders per configuration: {} | max relative difference: {:.3e}\n",
        out.renders, out.max_rel_diff
    ));

    s
}

fn format_geometry(config: &GrismConfig) -> String {
    let img = &config.imaging;
    let disp = &config.dispersion;
    format!(
        "Theory cube: ({}, {}, {}) @ {}\"/pix\n\
         Observed image: ({}, {}) @ {}\"/pix\n\
         Grism: R={} angle={} rad offset={} pix\n",
        img.model_nlam,
        img.model_ny,
        img.model_nx,
        img.model_scale,
        img.ny,
        img.nx,
        img.pix_scale,
        disp.r_spec,
        disp.disp_ang,
        disp.offset
    )
}

fn format_table_summary(table: &TableSummary) -> String {
    format!(
        "Response table: {} entries | total weight {:.6e}\n",
        table.entries, table.total_weight
    )
}

fn reduced(chi2: f64, npix: usize) -> f64 {
    if npix == 0 { f64::NAN } else { chi2 / npix as f64 }
}

fn fmt_duration(d: Duration) -> String {
    let secs = d.as_secs_f64();
    if secs >= 1.0 {
        format!("{secs:.3}s")
    } else if secs >= 1e-3 {
        format!("{:.3}ms", secs * 1e3)
    } else {
        format!("{:.1}us", secs * 1e6)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{SceneParams, VelocityModel};
    use crate::domain::{DispersionParams, ImagingConfig};
    use crate::render::RenderSettings;

    fn grism() -> GrismConfig {
        GrismConfig {
            imaging: ImagingConfig {
                model_nx: 8,
                model_ny: 6,
                model_nlam: 4,
                model_scale: 0.05,
                nx: 5,
                ny: 3,
                pix_scale: 0.13,
                diameter: 250.0,
                exp_time: 600.0,
                gain: 1.0,
            },
            dispersion: DispersionParams {
                r_spec: 461.0,
                disp_ang: 0.0,
                offset: -605.0,
            },
        }
    }

    #[test]
    fn duration_units_scale() {
        assert_eq!(fmt_duration(Duration::from_millis(2500)), "2.500s");
        assert_eq!(fmt_duration(Duration::from_micros(1500)), "1.500ms");
        assert_eq!(fmt_duration(Duration::from_nanos(2500)), "2.5us");
    }

    fn demo_config() -> DemoConfig {
        DemoConfig {
            grism: grism(),
            scene: SceneParams {
                sigma_arcsec: 0.2,
                continuum: 1.0,
                line_strength: 1.0,
                line_center: 656.3,
                line_width: 1.0,
                lambda_min: 650.0,
                lambda_max: 660.0,
                throughput: (1.0, 1.0),
                noise_sigma: 2.0,
                seed: 0,
                velocity: None,
            },
            perturb: 1.05,
            iterations: 1,
            render: RenderSettings::default(),
        }
    }

    fn demo_output() -> DemoOutput {
        DemoOutput {
            table: TableSummary {
                entries: 120,
                total_weight: 3.5,
            },
            workers: 1,
            build_time: Duration::from_millis(3),
            render_time: Duration::from_micros(40),
            renders: 2,
            npix: 15,
            observed_total: 10.0,
            chi2_truth: 15.0,
            chi2_perturbed: 30.0,
        }
    }

    #[test]
    fn demo_summary_mentions_key_figures() {
        let text = format_demo_summary(&demo_output(), &demo_config());
        assert!(text.contains("Theory cube: (4, 6, 8)"));
        assert!(text.contains("Response table: 120 entries"));
        assert!(text.contains("15.000 (reduced 1.000)"));
        assert!(text.contains("30.000 (reduced 2.000)"));
        assert!(!text.contains("rotating disk"));
    }

    #[test]
    fn demo_summary_reports_disk_kinematics() {
        let mut config = demo_config();
        config.scene.velocity = Some(VelocityModel::new(0.0, 220.0, 0.3, 0.5, 0.0).unwrap());
        let text = format_demo_summary(&demo_output(), &config);
        assert!(text.contains("rotating disk | vcirc 220 km/s | sini 0.5"));
    }
}
