//! Grism dispersion relation and observed-to-theory coordinate mapping.
//!
//! A slice with representative wavelength `λ` (nm) lands on the detector
//! shifted along the dispersion direction by
//!
//! ```text
//! d(λ) = λ * R_spec / 500 + offset          (observed pixels)
//! (dx, dy) = d(λ) * (cos θ, sin θ)
//! ```
//!
//! `R_spec` is quoted at 1 micron, hence the fixed 500 normalisation.

use nalgebra::Vector2;

use crate::domain::DispersionParams;

/// Wavelength normalisation of `R_spec`.
const R_SPEC_NORM: f64 = 500.0;

impl DispersionParams {
    /// Pixel-space displacement of a slice centred on `lambda` (nm).
    pub fn shift(&self, lambda: f64) -> Vector2<f64> {
        let along = lambda * (self.r_spec / R_SPEC_NORM) + self.offset;
        Vector2::new(along * self.disp_ang.cos(), along * self.disp_ang.sin())
    }
}

/// Map one edge of an observed pixel into theory-cube arcsec coordinates.
///
/// `center` is the pixel centre (arcsec), `edge_sign` is -1 for the
/// left/bottom edge and +1 for the right/top edge, `shift` is the dispersion
/// shift along this axis in observed pixels and `reference` is the theory
/// cube's lower-left corner along the same axis.
pub fn edge_to_theory_arcsec(
    center: f64,
    edge_sign: f64,
    shift: f64,
    reference: f64,
    pix_scale: f64,
) -> f64 {
    center + (edge_sign * 0.5 - shift) * pix_scale - reference
}
