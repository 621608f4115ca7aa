//! Pixel response table construction.
//!
//! For every wavelength slice and every observed pixel we:
//!
//! 1. shift the pixel back along the dispersion direction,
//! 2. map its four edges into the theory cube's pixel coordinates,
//! 3. clamp to the cube and split the footprint over the cube cells it
//!    touches with area weights.
//!
//! Each touched cell becomes one [`PixelResponse`] carrying
//! `x_weight * y_weight * mean_bandpass * flux_scale`.

use log::{debug, info, trace};
use ndarray::ArrayView2;

use crate::diag;
use crate::domain::{GrismConfig, PixelResponse, SpectralBin};
use crate::error::GrismError;
use crate::math::{centered_grid, edge_to_theory_arcsec, lower_corner, overlap_weights};
use crate::shape::expect_shape;

/// Combine `lambdas[model_Nlam, 2]` and `bandpasses[model_Nlam, 2]` into one
/// [`SpectralBin`] per slice.
pub fn spectral_bins(
    lambdas: ArrayView2<'_, f64>,
    bandpasses: ArrayView2<'_, f64>,
    model_nlam: usize,
) -> Result<Vec<SpectralBin>, GrismError> {
    expect_shape("lambdas", &lambdas, &[model_nlam, 2])?;
    expect_shape("bandpasses", &bandpasses, &[model_nlam, 2])?;

    Ok(lambdas
        .rows()
        .into_iter()
        .zip(bandpasses.rows())
        .map(|(wave, bp)| SpectralBin {
            blue: wave[0],
            red: wave[1],
            bp_low: bp[0],
            bp_high: bp[1],
        })
        .collect())
}

/// Build the full response table for one grism observation.
///
/// `bins` must hold exactly `model_Nlam` entries; [`spectral_bins`] enforces
/// this for array inputs.
pub fn build_table(config: &GrismConfig, bins: &[SpectralBin]) -> Vec<PixelResponse> {
    let img = &config.imaging;
    let disp = &config.dispersion;

    // Cube frame: lower-left corner of the theory cube (arcsec).
    let ob_x = lower_corner(img.model_nx, img.model_scale);
    let ob_y = lower_corner(img.model_ny, img.model_scale);
    // Observed pixel centres (arcsec).
    let target_x = centered_grid(img.nx, img.pix_scale);
    let target_y = centered_grid(img.ny, img.pix_scale);

    trace!("{} observed x grid: {target_x:?}", diag::prefix());
    trace!("{} observed y grid: {target_y:?}", diag::prefix());
    debug!(
        "{} theory cube frame corner: ({ob_x}, {ob_y})",
        diag::prefix()
    );

    let flux_scale = img.flux_scale();
    let cube_nx = img.model_nx as f64;
    let cube_ny = img.model_ny as f64;

    info!("{} Setting pixel response table", diag::prefix());
    info!(
        "{} Theory model cube: scale = {} dimension = ({}, {}, {})",
        diag::prefix(),
        img.model_scale,
        img.model_nlam,
        img.model_ny,
        img.model_nx
    );
    info!(
        "{} Dispersed image: scale = {} dimension = ({}, {})",
        diag::prefix(),
        img.pix_scale,
        img.ny,
        img.nx
    );

    let mut table = Vec::new();
    for (z, bin) in bins.iter().enumerate() {
        let mean_wave = bin.mean_wave();
        let mean_bp = bin.mean_bandpass();
        let shift = disp.shift(mean_wave);
        debug!(
            "{} slice {z} shift = ({}, {}) mean wavelength = {mean_wave}",
            diag::prefix(),
            shift.x,
            shift.y
        );

        // The horizontal footprint depends only on the column, the vertical
        // one only on the row.
        let columns: Vec<Option<(usize, Vec<f64>)>> = target_x
            .iter()
            .map(|&cx| {
                let l = edge_to_theory_arcsec(cx, -1.0, shift.x, ob_x, img.pix_scale);
                let r = edge_to_theory_arcsec(cx, 1.0, shift.x, ob_x, img.pix_scale);
                let lb = (l / img.model_scale).clamp(0.0, cube_nx);
                let rb = (r / img.model_scale).clamp(0.0, cube_nx);
                overlap_weights(lb, rb)
            })
            .collect();

        for (j, &cy) in target_y.iter().enumerate() {
            let b = edge_to_theory_arcsec(cy, -1.0, shift.y, ob_y, img.pix_scale);
            let t = edge_to_theory_arcsec(cy, 1.0, shift.y, ob_y, img.pix_scale);
            let bb = (b / img.model_scale).clamp(0.0, cube_ny);
            let tb = (t / img.model_scale).clamp(0.0, cube_ny);
            // Pixel outside the cube along y.
            let Some((bi, y_weights)) = overlap_weights(bb, tb) else {
                continue;
            };

            for (k, column) in columns.iter().enumerate() {
                let Some((li, x_weights)) = column else {
                    continue;
                };
                for (p, &wy) in y_weights.iter().enumerate() {
                    for (q, &wx) in x_weights.iter().enumerate() {
                        table.push(PixelResponse {
                            image_x: k,
                            image_y: j,
                            cube_z: z,
                            cube_x: li + q,
                            cube_y: bi + p,
                            weight: wx * wy * mean_bp * flux_scale,
                        });
                    }
                }
            }
        }
    }

    info!(
        "{} Pixel res. table size = {}",
        diag::prefix(),
        table.len()
    );
    table
}
